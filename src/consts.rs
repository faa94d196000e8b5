use std::time::Duration;

use crate::level::LogLevel;

/// level used when the caller does not pass one
pub const DEFAULT_LOG_LEVEL: &str = "DEBUG";

pub const LOG_FILE_EXT: &str = "log";

/// `{YmdHMSF} {l} [{t:<6}] {s:<16} $`
pub const HEADER_PATTERN: &str = "{YmdHMSF} {l} [{t:<6}] {s:<16} $";

/// minimum width of the thread name column
pub const THREAD_NAME_WIDTH: usize = 6;

/// minimum width of the `file:line` column
pub const LOCATION_WIDTH: usize = 16;

/// records at or above this level are flushed to the file immediately
pub const FLUSH_ON: LogLevel = LogLevel::Warning;

/// buffered records below `FLUSH_ON` reach the file at least this often
pub const FLUSH_DELAY: Duration = Duration::from_micros(1_000_000);

/// wake-up interval of the polling thread
pub const POLL_INTERVAL: Duration = Duration::from_micros(1_000_000);

/// number of records the queue holds before the queue-full callback fires
pub const QUEUE_CAPACITY: usize = 1 << 16;

/// records drained from the queue per appender call
pub const BATCH_SIZE: usize = 1024;

pub const QUEUE_FULL_MESSAGE: &str = "Log Queue full.";
