use std::error::Error;
use std::fmt;
use std::fmt::Display;

use log::SetLoggerError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogError {
    /// a caller supplied value (log level, date) is not recognized
    InvalidArgument(String),
    /// the log file could not be opened or written
    Io(String),
    E(String),
}

impl LogError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LogError::InvalidArgument(_))
    }
}

impl From<&str> for LogError {
    fn from(arg: &str) -> Self {
        LogError::E(arg.to_string())
    }
}

impl From<String> for LogError {
    fn from(arg: String) -> Self {
        LogError::E(arg)
    }
}

impl From<std::io::Error> for LogError {
    fn from(arg: std::io::Error) -> Self {
        LogError::Io(arg.to_string())
    }
}

impl From<SetLoggerError> for LogError {
    fn from(arg: SetLoggerError) -> Self {
        LogError::E(arg.to_string())
    }
}

impl Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogError::InvalidArgument(err) => write!(f, "invalid argument: {}", err),
            LogError::Io(err) => write!(f, "log io error: {}", err),
            LogError::E(err) => write!(f, "log error: {}", err),
        }
    }
}

impl Error for LogError {}
