use crate::appender::{LogAppender, RecordFormat};
use crate::backend::{Backend, QueueFullCallback};
use crate::consts::FLUSH_DELAY;
use crate::error::LogError;
use crate::formats::HeaderFormat;
use crate::level::LogLevel;
use crate::plugin::console::ConsoleAppender;
use crate::plugin::file::FileAppender;
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// the backend Config
/// for example:
// let backend = Backend::start(
//         Config::new().file("target/svc.log")?.preallocate(100000),
//         POLL_INTERVAL,
// )?;
pub struct Config {
    /// Each appender is responsible for printing its own business
    pub appends: Vec<Box<dyn LogAppender>>,
    /// the file the records are written to, if any
    pub log_file: Option<PathBuf>,
    /// the minimum emitted level
    pub level: LogLevel,
    /// format record into field formated:String
    pub format: Box<dyn RecordFormat>,
    /// the queue length, None means an unbounded queue
    pub chan_len: Option<usize>,
    /// records at or above this level flush immediately
    pub flush_on: Option<LogLevel>,
    /// max time buffered records wait for a flush
    pub flush_delay: Duration,
    /// called when the bounded queue is full
    pub queue_full: Option<QueueFullCallback>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("appends", &self.appends.len())
            .field("log_file", &self.log_file)
            .field("level", &self.level)
            .field("chan_len", &self.chan_len)
            .field("flush_on", &self.flush_on)
            .field("flush_delay", &self.flush_delay)
            .field("queue_full", &self.queue_full.is_some())
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            appends: vec![],
            log_file: None,
            level: LogLevel::Debug,
            format: Box::new(HeaderFormat::new()),
            chan_len: None,
            flush_on: None,
            flush_delay: FLUSH_DELAY,
            queue_full: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// open `path` for appending and write records there
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, LogError> {
        let appender = FileAppender::new(path)?;
        self.log_file = Some(appender.path().to_path_buf());
        self.appends.push(Box::new(appender));
        Ok(self)
    }
    /// set the minimum emitted level
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
    /// set log format
    pub fn format<F: RecordFormat + 'static>(mut self, format: F) -> Self {
        self.format = Box::new(format);
        self
    }
    /// reserve a bounded queue of `len` records when the backend starts
    pub fn preallocate(mut self, len: usize) -> Self {
        self.chan_len = Some(len.max(1));
        self
    }
    /// flush immediately when a record at or above `level` is written
    pub fn flush_on(mut self, level: LogLevel) -> Self {
        self.flush_on = Some(level);
        self
    }
    /// periodic flush interval for records below the flush-on level
    pub fn flush_delay(mut self, delay: Duration) -> Self {
        self.flush_delay = delay;
        self
    }
    /// register the queue-full callback
    pub fn queue_full_callback<F>(mut self, f: F) -> Self
    where
        F: Fn(&Backend) + Send + Sync + 'static,
    {
        self.queue_full = Some(Arc::new(f));
        self
    }
    /// add a ConsoleAppender
    pub fn console(mut self) -> Self {
        self.appends.push(Box::new(ConsoleAppender {}));
        self
    }
    /// add a custom LogAppender
    pub fn custom<Appender: LogAppender + 'static>(mut self, arg: Appender) -> Self {
        self.appends.push(Box::new(arg));
        self
    }
}
