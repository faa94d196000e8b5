use crate::level::LogLevel;
use crate::WaitGroup;
use std::time::SystemTime;

/// LogAppender append logs
/// Appenders run on the polling thread only, one batch at a time
pub trait LogAppender: Send {
    /// Batch write log, or do nothing
    fn do_logs(&mut self, records: &[LogRecord]);

    /// flush or do nothing
    fn flush(&mut self) {}
}

#[derive(Clone, Debug)]
pub enum Command {
    CommandRecord,
    CommandExit,
    /// flush every appender, then drop the WaitGroup
    CommandFlush(WaitGroup),
}

impl Command {
    pub fn to_i32(&self) -> i32 {
        match self {
            Command::CommandRecord => 1,
            Command::CommandExit => 2,
            Command::CommandFlush(_) => 3,
        }
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        self.to_i32().eq(&other.to_i32())
    }
}

impl Eq for Command {}

#[derive(Clone, Debug)]
pub struct LogRecord {
    pub command: Command,
    pub level: LogLevel,
    pub target: String,
    pub args: String,
    pub module_path: String,
    pub file: String,
    pub line: Option<u32>,
    pub thread_name: String,
    pub now: SystemTime,
    pub formated: String,
}

impl LogRecord {
    /// a control record carrying no message
    pub fn command(command: Command) -> Self {
        Self {
            command,
            level: LogLevel::Debug,
            target: String::new(),
            args: String::new(),
            module_path: String::new(),
            file: String::new(),
            line: None,
            thread_name: String::new(),
            now: SystemTime::now(),
            formated: String::new(),
        }
    }

    pub fn is_record(&self) -> bool {
        self.command == Command::CommandRecord
    }
}

/// format record data
pub trait RecordFormat: Send + Sync {
    fn do_format(&self, arg: &mut LogRecord);
}
