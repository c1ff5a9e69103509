/// Application-level constants
pub const APP_NAME: &str = "cvp-extractor";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming a JSON pipeline configuration file.
pub const CONFIG_PATH_ENV: &str = "CVP_EXTRACTOR_CONFIG";

/// Environment variable overriding the URL fetch timeout.
pub const FETCH_TIMEOUT_ENV: &str = "CVP_FETCH_TIMEOUT_SECS";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "warn,cvp_extractor_lib=info,cvp_extractor=info"
}

/// Log filter used with `--verbose`.
pub fn verbose_log_filter() -> &'static str {
    "warn,cvp_extractor_lib=debug,cvp_extractor=debug"
}
