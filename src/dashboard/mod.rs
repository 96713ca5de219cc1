//! Users dashboard: HTTP client, view-model and renderer.
//!
//! Data flows one way. A user action starts on the [`state::Dashboard`], the
//! [`api::ApiClient`] performs the single GET it needs, the response settles
//! back into the state and [`render::render`] turns the state into a view.
//! [`controller::Controller`] wires those steps together for the frontend.
//!
//! Endpoints:
//!
//! - `GET {base}/users` returns the list under `users`, `data`, or as a bare array.
//! - `GET {base}/users/{id}` returns the record under `user`, or as the bare body.

pub mod api;
pub mod config;
pub mod controller;
pub mod errors;
pub mod format;
pub mod records;
pub mod render;
pub mod state;

pub use api::{ApiClient, Endpoint};
pub use config::{AppConfig, RuntimeConfig};
pub use controller::Controller;
pub use errors::AppError;
pub use records::Record;
pub use render::{render, View};
pub use state::{Dashboard, Phase};
