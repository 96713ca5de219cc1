use thiserror::Error;

/// Failures surfaced by the dashboard. Every variant renders to a short,
/// user-facing line; actions convert them to strings before they reach state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid user id '{0}'")]
    InvalidId(String),
    #[error("unable to reach the server: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Request { status: u16, message: String },
    #[error("invalid response: {0}")]
    Parse(String),
    #[error("no result")]
    NoResult,
}
