#![forbid(unsafe_code)]

//! Dated-file asynchronous logger.
//!
//! ```no_run
//! stlog::init("/var/log", "svc", "INFO", None)?;
//! stlog::set_thread_name("main");
//! stlog::info!("listening on {}", 8080);
//! log::logger().flush();
//! # Ok::<(), stlog::error::LogError>(())
//! ```

pub mod appender;
pub mod backend;
pub mod config;
pub mod consts;
pub mod date;
pub mod error;
pub mod formats;
pub mod level;
pub mod logger;
pub mod plugin;
pub mod runtime;
pub mod thread_name;

pub use backend::Backend;
pub use config::Config;
pub use formats::HeaderFormat;
pub use level::LogLevel;
pub use log::{debug, error, info, warn};
pub use logger::Logger;
pub use runtime::*;

use crate::error::LogError;
use once_cell::sync::OnceCell;
use std::path::Path;

static LOGGER: OnceCell<Logger> = OnceCell::new();

/// Start a [`Logger`] and install it as the `log` crate's global logger.
/// Fails if a global logger is already installed.
pub fn init<P: AsRef<Path>>(
    log_dir: P,
    app_name: &str,
    log_level: &str,
    date: Option<u32>,
) -> Result<&'static Logger, LogError> {
    if LOGGER.get().is_some() {
        return Err(LogError::from("stlog is already initialized"));
    }
    let logger = Logger::init(log_dir, app_name, log_level, date)?;
    if let Err(e) = log::set_boxed_logger(Box::new(logger.backend().clone())) {
        logger.shutdown();
        return Err(e.into());
    }
    log::set_max_level(logger.level().to_level_filter());
    logger.mark_installed();
    // only one caller gets past set_boxed_logger
    let _ = LOGGER.set(logger);
    LOGGER
        .get()
        .ok_or_else(|| LogError::from("stlog is not initialized"))
}

/// the global logger, if [`init`] succeeded
pub fn logger() -> Option<&'static Logger> {
    LOGGER.get()
}

/// Name the calling thread in log output.
pub fn set_thread_name(name: &str) {
    Logger::set_thread_name(name);
}
