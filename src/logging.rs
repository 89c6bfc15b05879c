//! # Structured Logging
//!
//! Environment-aware tracing setup for binaries and test harnesses.
//!
//! Initialization is idempotent and tolerant of an already-installed global
//! subscriber, so library consumers that bring their own subscriber are never
//! fought over it. `RUST_LOG` wins when set; otherwise the level falls back
//! on the `QUERYSPEC_ENV` environment name. Set `QUERYSPEC_LOG_FORMAT=json`
//! for line-delimited JSON output.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize the global tracing subscriber.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));
        let json = matches!(
            std::env::var("QUERYSPEC_LOG_FORMAT").as_deref(),
            Ok("json")
        );

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true);

        let initialized = if json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };

        if initialized.is_err() {
            tracing::debug!("global tracing subscriber already initialized");
        }
    });
}

/// Current environment name, defaulting to `development`.
fn get_environment() -> String {
    std::env::var("QUERYSPEC_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Default log level for an environment when `RUST_LOG` is unset.
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}
