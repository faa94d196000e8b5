use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::backend::Backend;
use crate::config::Config;
use crate::consts::{
    DEFAULT_LOG_LEVEL, FLUSH_DELAY, FLUSH_ON, POLL_INTERVAL, QUEUE_CAPACITY, QUEUE_FULL_MESSAGE,
};
use crate::date::{current_date, log_file_path, validate_date};
use crate::error::LogError;
use crate::formats::HeaderFormat;
use crate::level::LogLevel;
use crate::thread_name;

/// A process logger writing to `{log_dir}/{app_name}_{date}.log`.
///
/// ```no_run
/// let logger = stlog::Logger::init("/var/log", "svc", "INFO", None)?;
/// stlog::Logger::set_thread_name("main");
/// logger.backend().emit(stlog::LogLevel::Info, format_args!("ready"));
/// # Ok::<(), stlog::error::LogError>(())
/// ```
#[derive(Debug)]
pub struct Logger {
    backend: Backend,
    date: u32,
    log_file: PathBuf,
    installed: AtomicBool,
}

impl Logger {
    /// Configure and start a backend.
    ///
    /// `log_level` must be one of `DEBUG`, `INFO`, `WARNING`, `ERROR`, and
    /// `date` a `YYYYMMDD` day (today when None). Both are checked before
    /// the log file is opened, so an `InvalidArgument` leaves nothing behind.
    pub fn init<P: AsRef<Path>>(
        log_dir: P,
        app_name: &str,
        log_level: &str,
        date: Option<u32>,
    ) -> Result<Logger, LogError> {
        let level = LogLevel::from_str(log_level)?;
        let date = match date {
            Some(date) => validate_date(date)?,
            None => current_date(),
        };
        let log_file = log_file_path(log_dir.as_ref(), app_name, date);

        let config = Config::new()
            .file(&log_file)?
            .level(level)
            .format(HeaderFormat::new())
            .preallocate(QUEUE_CAPACITY)
            .flush_on(FLUSH_ON)
            .flush_delay(FLUSH_DELAY)
            .queue_full_callback(Self::log_queue_full);
        let backend = Backend::start(config, POLL_INTERVAL)?;
        Ok(Logger {
            backend,
            date,
            log_file,
            installed: AtomicBool::new(false),
        })
    }

    /// `init` at `DEBUG` for today's date
    pub fn init_default<P: AsRef<Path>>(log_dir: P, app_name: &str) -> Result<Logger, LogError> {
        Self::init(log_dir, app_name, DEFAULT_LOG_LEVEL, None)
    }

    /// Records emitted later from the calling thread show `thread_name`
    /// instead of the numeric thread id.
    pub fn set_thread_name(name: &str) {
        thread_name::set_thread_name(name);
    }

    /// change the minimum level at runtime, same names as `init`
    pub fn set_level(&self, log_level: &str) -> Result<(), LogError> {
        let level = LogLevel::from_str(log_level)?;
        self.backend.set_level(level);
        if self.installed.load(Ordering::Acquire) {
            log::set_max_level(level.to_level_filter());
        }
        Ok(())
    }

    pub fn level(&self) -> LogLevel {
        self.backend.level()
    }

    /// the `YYYYMMDD` in the file name
    pub fn date(&self) -> u32 {
        self.date
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// wait until every record emitted so far is in the file
    pub fn flush(&self) {
        self.backend.flush();
    }

    /// Flush and stop the polling thread. Records emitted afterwards are dropped.
    pub fn shutdown(&self) {
        self.backend.exit();
    }

    pub(crate) fn mark_installed(&self) {
        self.installed.store(true, Ordering::Release);
    }

    fn log_queue_full(backend: &Backend) {
        backend.emit_overflow(LogLevel::Error, QUEUE_FULL_MESSAGE);
    }
}

#[cfg(test)]
mod test {
    use super::Logger;
    use crate::level::LogLevel;
    use std::fs::{create_dir_all, read_dir, read_to_string, remove_dir_all};
    use std::path::Path;

    fn fresh_dir(name: &str) -> String {
        let dir = format!("target/test/logger/{}", name);
        let _ = remove_dir_all(&dir);
        create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_init_path() {
        let dir = fresh_dir("path");
        let logger = Logger::init(&dir, "svc", "INFO", Some(20240301)).unwrap();
        let expect = format!("{}/svc_20240301.log", dir);
        assert_eq!(logger.log_file(), Path::new(&expect));
        assert_eq!(logger.backend().log_file(), Some(Path::new(&expect)));
        assert!(Path::new(&expect).exists());
        assert_eq!(logger.date(), 20240301);
        logger.shutdown();
        let _ = remove_dir_all(&dir);
    }

    #[test]
    fn test_init_default() {
        let dir = fresh_dir("default");
        let logger = Logger::init_default(&dir, "svc").unwrap();
        assert_eq!(logger.level(), LogLevel::Debug);
        assert_eq!(logger.date(), crate::date::current_date());
        assert_eq!(logger.backend().capacity(), Some(crate::consts::QUEUE_CAPACITY));
        logger.shutdown();
        let _ = remove_dir_all(&dir);
    }

    #[test]
    fn test_each_level_selected() {
        let dir = fresh_dir("levels");
        for level in LogLevel::ALL {
            let logger = Logger::init(&dir, level.as_str(), level.as_str(), Some(20240301)).unwrap();
            assert_eq!(logger.level(), level);
            logger.shutdown();
        }
        let _ = remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_level_opens_nothing() {
        let dir = fresh_dir("invalid_level");
        for bad in ["", "debug", "Warning", "ERROR ", "WARN"] {
            let e = Logger::init(&dir, "svc", bad, Some(20240301)).err().unwrap();
            assert!(e.is_invalid_argument());
        }
        let e = Logger::init(&dir, "svc", "INFO", Some(20241301)).err().unwrap();
        assert!(e.is_invalid_argument());
        assert_eq!(read_dir(&dir).unwrap().count(), 0);
        let _ = remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_dir() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = Path::new(OsStr::from_bytes(b"target/test/logger/raw_\xff"));
        let _ = remove_dir_all(dir);
        create_dir_all(dir).unwrap();
        let logger = Logger::init(dir, "svc", "INFO", Some(20240301)).unwrap();
        assert_eq!(logger.log_file(), dir.join("svc_20240301.log"));
        logger.backend().emit(LogLevel::Info, format_args!("raw dir"));
        logger.flush();
        assert!(read_to_string(logger.log_file()).unwrap().ends_with(" raw dir\n"));
        logger.shutdown();
        let _ = remove_dir_all(dir);
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let e = Logger::init("target/test/logger/not/there", "svc", "INFO", None)
            .err()
            .unwrap();
        assert!(matches!(e, crate::error::LogError::Io(_)));
    }

    #[test]
    fn test_error_level_filters_file() {
        let dir = fresh_dir("error_only");
        let logger = Logger::init(&dir, "svc", "ERROR", Some(20240301)).unwrap();
        let b = logger.backend();
        b.emit(LogLevel::Info, format_args!("info-line"));
        b.emit(LogLevel::Warning, format_args!("warning-line"));
        b.emit(LogLevel::Error, format_args!("error-line"));
        logger.flush();
        let data = read_to_string(logger.log_file()).unwrap();
        assert!(!data.contains("info-line"));
        assert!(!data.contains("warning-line"));
        assert!(data.contains(" E ["));
        assert!(data.contains("error-line"));
        logger.shutdown();
        let _ = remove_dir_all(&dir);
    }

    #[test]
    fn test_thread_name_rendered() {
        let dir = fresh_dir("thread_name");
        let logger = Logger::init(&dir, "svc", "DEBUG", Some(20240301)).unwrap();
        let b = logger.backend().clone();
        std::thread::spawn(move || {
            Logger::set_thread_name("worker-1");
            b.emit(LogLevel::Info, format_args!("from worker"));
        })
        .join()
        .unwrap();
        logger.flush();
        let data = read_to_string(logger.log_file()).unwrap();
        let line = data.lines().find(|l| l.ends_with("from worker")).unwrap();
        assert!(line.contains(" I [worker-1] logger.rs:"));
        logger.shutdown();
        let _ = remove_dir_all(&dir);
    }

    #[test]
    fn test_queue_full_callback_logs_once() {
        let dir = fresh_dir("queue_full");
        let logger = Logger::init(&dir, "svc", "DEBUG", Some(20240301)).unwrap();
        Logger::log_queue_full(logger.backend());
        logger.flush();
        let data = read_to_string(logger.log_file()).unwrap();
        let full: Vec<&str> = data.lines().filter(|l| l.contains("Log Queue full.")).collect();
        assert_eq!(full.len(), 1);
        assert!(full[0].contains(" E ["));
        logger.shutdown();
        let _ = remove_dir_all(&dir);
    }

    #[test]
    fn test_set_level() {
        let dir = fresh_dir("set_level");
        let logger = Logger::init(&dir, "svc", "DEBUG", Some(20240301)).unwrap();
        logger.set_level("WARNING").unwrap();
        assert_eq!(logger.level(), LogLevel::Warning);
        assert!(logger.set_level("verbose").err().unwrap().is_invalid_argument());
        assert_eq!(logger.level(), LogLevel::Warning);
        logger.shutdown();
        let _ = remove_dir_all(&dir);
    }

    #[test]
    fn test_append_across_runs() {
        let dir = fresh_dir("append");
        let logger = Logger::init(&dir, "svc", "DEBUG", Some(20240301)).unwrap();
        logger.backend().emit(LogLevel::Info, format_args!("run-1"));
        logger.shutdown();
        let logger = Logger::init(&dir, "svc", "DEBUG", Some(20240301)).unwrap();
        logger.backend().emit(LogLevel::Info, format_args!("run-2"));
        logger.shutdown();
        let data = read_to_string(logger.log_file()).unwrap();
        assert_eq!(data.lines().count(), 2);
        assert!(data.lines().next().unwrap().ends_with("run-1"));
        let _ = remove_dir_all(&dir);
    }
}
