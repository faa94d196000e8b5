use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use crossbeam::channel::{RecvTimeoutError, TrySendError};
use log::{Metadata, Record};
use parking_lot::Mutex;

use crate::appender::{Command, LogAppender, LogRecord, RecordFormat};
use crate::config::Config;
use crate::consts::BATCH_SIZE;
use crate::error::LogError;
use crate::level::LogLevel;
use crate::thread_name::thread_name;
use crate::{chan, spawn, JoinHandle, Receiver, Sender, WaitGroup};

/// Invoked from the emitting thread when the bounded queue is full.
/// Must not block; the blocked record is sent once it returns.
pub type QueueFullCallback = Arc<dyn Fn(&Backend) + Send + Sync>;

struct Shared {
    level: AtomicU8,
    running: AtomicBool,
    sender: Sender<LogRecord>,
    capacity: Option<usize>,
    overflow: Arc<Mutex<Vec<LogRecord>>>,
    queue_full: Option<QueueFullCallback>,
    log_file: Option<PathBuf>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

/// Handle to a running logging engine: a record queue drained by one
/// polling thread that formats records and hands them to the appenders.
///
/// Clones share the same engine. The polling thread stops on [`Backend::exit`]
/// or once every handle is dropped.
#[derive(Clone)]
pub struct Backend {
    inner: Arc<Shared>,
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend")
            .field("level", &self.level())
            .field("running", &self.is_running())
            .field("capacity", &self.inner.capacity)
            .field("log_file", &self.inner.log_file)
            .finish()
    }
}

impl Backend {
    /// Start the polling thread, waking at least every `poll_interval`.
    pub fn start(config: Config, poll_interval: Duration) -> Result<Backend, LogError> {
        let Config {
            appends,
            log_file,
            level,
            format,
            chan_len,
            flush_on,
            flush_delay,
            queue_full,
        } = config;
        let (sender, receiver) = chan(chan_len);
        let overflow = Arc::new(Mutex::new(vec![]));
        let poller = Poller {
            receiver,
            overflow: overflow.clone(),
            appends,
            format,
            flush_on,
            flush_delay,
            poll_interval: poll_interval.max(Duration::from_millis(1)),
        };
        let worker = spawn("stlog-poll", move || poller.run())
            .map_err(|e| LogError::E(format!("spawn polling thread fail: {}", e)))?;
        Ok(Backend {
            inner: Arc::new(Shared {
                level: AtomicU8::new(level as u8),
                running: AtomicBool::new(true),
                sender,
                capacity: chan_len,
                overflow,
                queue_full,
                log_file,
                worker: Mutex::new(Some(worker)),
            }),
        })
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.inner.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: LogLevel) {
        self.inner.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn level_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.inner.log_file.as_deref()
    }

    /// queue capacity in records, None if unbounded
    pub fn capacity(&self) -> Option<usize> {
        self.inner.capacity
    }

    /// records waiting in the queue
    pub fn queue_len(&self) -> usize {
        self.inner.sender.len()
    }

    /// Emit a record from the caller's source location.
    #[track_caller]
    pub fn emit(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.level_enabled(level) {
            return;
        }
        let location = Location::caller();
        // the caller's module is unknown here, only its file and line
        self.send(self.new_record(
            level,
            "",
            args.to_string(),
            location.file(),
            Some(location.line()),
        ));
    }

    /// Emit a record through a side list instead of the queue. Never blocks
    /// on a full queue; the polling thread writes these first.
    #[track_caller]
    pub fn emit_overflow(&self, level: LogLevel, message: &str) {
        if !self.level_enabled(level) || !self.is_running() {
            return;
        }
        let location = Location::caller();
        let record = self.new_record(
            level,
            "",
            message.to_string(),
            location.file(),
            Some(location.line()),
        );
        self.inner.overflow.lock().push(record);
    }

    /// Block until every record emitted before this call is written and flushed.
    pub fn flush(&self) {
        if !self.is_running() {
            return;
        }
        let wg = WaitGroup::new();
        let cmd = LogRecord::command(Command::CommandFlush(wg.clone()));
        if self.inner.sender.send(cmd).is_ok() {
            wg.wait();
        }
    }

    /// Drain, flush and stop the polling thread. Later records are dropped.
    pub fn exit(&self) {
        if !self.inner.running.swap(false, Ordering::AcqRel) {
            return;
        }
        let _ = self.inner.sender.send(LogRecord::command(Command::CommandExit));
        if let Some(worker) = self.inner.worker.lock().take() {
            let _ = worker.join();
        }
    }

    fn new_record(
        &self,
        level: LogLevel,
        target: &str,
        args: String,
        file: &str,
        line: Option<u32>,
    ) -> LogRecord {
        LogRecord {
            command: Command::CommandRecord,
            level,
            target: target.to_string(),
            args,
            module_path: target.to_string(),
            file: file.to_string(),
            line,
            thread_name: thread_name(),
            now: SystemTime::now(),
            formated: String::new(),
        }
    }

    fn send(&self, record: LogRecord) {
        if !self.is_running() {
            return;
        }
        match self.inner.sender.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(record)) => {
                if let Some(f) = &self.inner.queue_full {
                    f(self);
                }
                let _ = self.inner.sender.send(record);
            }
            // polling thread is gone
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

impl log::Log for Backend {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.level_enabled(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &Record) {
        let level = LogLevel::from(record.level());
        if !self.level_enabled(level) {
            return;
        }
        let mut data = self.new_record(
            level,
            record.target(),
            record.args().to_string(),
            record.file().unwrap_or_default(),
            record.line(),
        );
        data.module_path = record.module_path().unwrap_or_default().to_string();
        self.send(data);
    }

    fn flush(&self) {
        Backend::flush(self)
    }
}

/// state owned by the polling thread
struct Poller {
    receiver: Receiver<LogRecord>,
    overflow: Arc<Mutex<Vec<LogRecord>>>,
    appends: Vec<Box<dyn LogAppender>>,
    format: Box<dyn RecordFormat>,
    flush_on: Option<LogLevel>,
    flush_delay: Duration,
    poll_interval: Duration,
}

impl Poller {
    fn run(mut self) {
        let mut last_flush = Instant::now();
        let mut dirty = false;
        let mut batch: Vec<LogRecord> = Vec::with_capacity(BATCH_SIZE);
        loop {
            let mut exit = false;
            let first = match self.receiver.recv_timeout(self.poll_interval) {
                Ok(v) => Some(v),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    exit = true;
                    None
                }
            };
            batch.append(&mut self.overflow.lock());
            if let Some(first) = first {
                batch.push(first);
                batch.extend(self.receiver.try_iter().take(BATCH_SIZE));
            }

            let mut flush_now = false;
            let mut waits = vec![];
            batch.retain_mut(|x| {
                match &x.command {
                    Command::CommandRecord => {}
                    Command::CommandFlush(wg) => {
                        waits.push(wg.clone());
                        return false;
                    }
                    Command::CommandExit => {
                        exit = true;
                        return false;
                    }
                }
                self.format.do_format(x);
                if self.flush_on.map_or(false, |on| x.level >= on) {
                    flush_now = true;
                }
                true
            });
            if !batch.is_empty() {
                for appender in self.appends.iter_mut() {
                    appender.do_logs(&batch);
                }
                dirty = true;
                batch.clear();
            }

            if flush_now
                || exit
                || !waits.is_empty()
                || (dirty && last_flush.elapsed() >= self.flush_delay)
            {
                for appender in self.appends.iter_mut() {
                    appender.flush();
                }
                dirty = false;
                last_flush = Instant::now();
            }
            // releases flush() callers
            drop(waits);
            if exit {
                break;
            }
        }
    }
}
