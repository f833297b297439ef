//! Logger bootstrap.
//!
//! Diagnostics go to stderr so they never mix with prompts on stdout. The
//! level is fixed at build time; no environment variable is consulted.

use flexi_logger::{Logger, LoggerHandle};

pub fn default_log_level() -> &'static str {
    "warn"
}

/// Start the stderr logger. Keep the handle alive for the life of the process.
pub fn init_logging() -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    Logger::try_with_str(default_log_level())?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
}
