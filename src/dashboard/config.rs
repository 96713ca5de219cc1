//! Build-time configuration for the API endpoint with an optional runtime
//! override. Defaults come from `USERBOARD_API_BASE` and `USERBOARD_ORIGIN` at
//! compile time; the CLI passes flag or environment values as overrides so a
//! prebuilt binary can target another backend without rebuilding.

use super::errors::AppError;
use url::Url;

/// Base path used when nothing was configured at build time.
pub const DEFAULT_API_BASE: &str = "/api";
/// Origin used to resolve a relative base, the backend's default listen address.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

/// Dashboard configuration injected into the HTTP client at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub origin: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables.
    #[must_use]
    pub fn load() -> Self {
        let api_base_url = option_env!("USERBOARD_API_BASE")
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let origin = option_env!("USERBOARD_ORIGIN")
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());

        Self {
            api_base_url,
            origin,
        }
    }

    /// Loads the build-time config and applies the given overrides.
    #[must_use]
    pub fn with_overrides(runtime: RuntimeConfig) -> Self {
        let mut config = Self::load();
        apply_runtime_overrides(&mut config, runtime);
        config
    }

    /// Resolves the API base to an absolute URL. A relative base such as `/api`
    /// is joined onto the origin the way a browser joins it onto the page.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base or origin is not a usable URL.
    pub fn resolve_base(&self) -> Result<Url, AppError> {
        let base = match Url::parse(&self.api_base_url) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let origin = Url::parse(&self.origin).map_err(|err| {
                    AppError::Config(format!("invalid origin '{}': {err}", self.origin))
                })?;
                origin.join(&self.api_base_url).map_err(|err| {
                    AppError::Config(format!(
                        "invalid API base '{}': {err}",
                        self.api_base_url
                    ))
                })?
            }
            Err(err) => {
                return Err(AppError::Config(format!(
                    "invalid API base '{}': {err}",
                    self.api_base_url
                )))
            }
        };

        if base.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "API base '{base}' cannot hold endpoint paths"
            )));
        }

        Ok(base)
    }
}

/// Values supplied at runtime; `None` keeps the build-time default.
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub origin: Option<String>,
}

impl RuntimeConfig {
    #[must_use]
    pub fn new(api_base_url: Option<&str>, origin: Option<&str>) -> Self {
        Self {
            api_base_url: api_base_url.and_then(normalize_runtime_value),
            origin: origin.and_then(normalize_runtime_value),
        }
    }
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.origin {
        config.origin = value;
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
