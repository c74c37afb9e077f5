use std::env;

use env_logger::Builder;

use errors::*;

// Workers treat anything a payload writes to stderr as a failed operation, so only warnings and
// errors are logged unless RUST_LOG asks for more.
const DEFAULT_LOG_CONFIG: &str = "warn";

pub fn init_logger() -> Result<()> {
    let mut builder = Builder::new();
    match env::var("RUST_LOG") {
        Ok(log_config) => builder.parse_filters(&log_config),
        Err(_) => builder.parse_filters(DEFAULT_LOG_CONFIG),
    };

    builder.try_init().chain_err(|| "Failed to build env_logger")?;
    Ok(())
}
