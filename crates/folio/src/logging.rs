//! Logging initialization and configuration.
//!
//! Uses the `tracing` ecosystem for structured logging with support for
//! both human-readable and JSON output formats.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `level` - Default filter directive when `RUST_LOG` is unset.
/// * `json_format` - If true, outputs structured JSON logs; otherwise pretty-printed.
///
/// # Notes
///
/// - Log output goes to stderr (stdout is reserved for data output)
/// - The RUST_LOG environment variable can override the log level
/// - reqwest/hyper internals are held at `warn` unless RUST_LOG says otherwise
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},hyper=warn,reqwest=warn")));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Resolve the default level from config, with the `--verbose` override.
pub fn effective_level(config_level: &str, verbose: bool) -> &str {
    match config_level {
        _ if verbose && config_level != "trace" => "debug",
        "error" | "warn" | "info" | "debug" | "trace" => config_level,
        _ => "info",
    }
}

/// Initialize logging with configuration from Config.
pub fn init_from_config(config: &folio_core::Config, verbose_override: bool, json_logs_override: bool) {
    let level = effective_level(&config.logging.level, verbose_override);
    let json_format = json_logs_override || config.logging.format == "json";
    init(level, json_format);
}
