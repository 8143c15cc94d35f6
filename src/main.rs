//! DevRecord MCP Server Entry Point
//!
//! Loads configuration, initializes logging on stderr and serves on the
//! configured transport. Any startup failure is logged and ends the process
//! with a non-zero status.

use anyhow::Result;
use tracing::{Level, error};
use tracing_subscriber::{EnvFilter, fmt};

use devrecord_mcp_server::core::{Config, config::LoggingConfig, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging);

    if let Err(e) = serve(config).await {
        error!("Fatal: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Everything goes to stderr; stdout belongs to the STDIO transport.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
