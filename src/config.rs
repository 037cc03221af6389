//! Configuration constants and utilities for postboard

use std::path::PathBuf;

/// API used when nothing else is configured
pub const DEFAULT_API_BASE: &str = "https://jsonplaceholder.typicode.com";

/// Environment variable name for overriding the API base URL
pub const API_BASE_ENV_VAR: &str = "POSTBOARD_API_BASE";

/// Environment variable holding the log filter (e.g. `debug`, `postboard=trace`)
pub const LOG_LEVEL_ENV_VAR: &str = "POSTBOARD_LOG_LEVEL";

/// Log filter used when the environment does not set one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Resolve the API base URL: command line first, then environment, then default
pub fn get_api_base(cli_value: Option<&str>) -> String {
    if let Some(value) = cli_value {
        return value.to_string();
    }
    std::env::var_os(API_BASE_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Get the log filter, checking the environment variable first
pub fn get_log_level() -> String {
    std::env::var_os(LOG_LEVEL_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
        .to_lowercase()
}

/// Expand `~` and environment variables in a user-supplied path
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            tracing::warn!("Could not expand path '{path}': {e}");
            PathBuf::from(shellexpand::tilde(path).as_ref())
        }
    }
}
