use crate::appender::{LogRecord, RecordFormat};
use crate::consts::{HEADER_PATTERN, LOCATION_WIDTH, THREAD_NAME_WIDTH};
use crate::date;
use crate::plugin::file_name::FileName;
use std::fmt::{self, Debug, Formatter};

/// Renders `{YmdHMSF} {l} [{t:<6}] {s:<16} $`:
///
/// ```text
/// 2024-03-01 09:15:02.031 I [worker-1] main.rs:42       order accepted
/// ```
pub struct HeaderFormat {
    pub thread_width: usize,
    pub location_width: usize,
}

impl HeaderFormat {
    pub fn new() -> HeaderFormat {
        Self {
            thread_width: THREAD_NAME_WIDTH,
            location_width: LOCATION_WIDTH,
        }
    }

    /// `file:line`, falling back to the target when the call site is unknown
    pub fn location(arg: &LogRecord) -> String {
        if arg.file.is_empty() {
            return arg.target.clone();
        }
        format!(
            "{}:{}",
            arg.file.as_str().extract_file_name(),
            arg.line.unwrap_or_default()
        )
    }

    pub fn timestamp(arg: &LogRecord) -> String {
        let dt = date::local(arg.now);
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            dt.year(),
            dt.mon(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.sec(),
            dt.nano() / 1_000_000
        )
    }
}

impl Debug for HeaderFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderFormat")
            .field("pattern", &HEADER_PATTERN)
            .field("thread_width", &self.thread_width)
            .field("location_width", &self.location_width)
            .finish()
    }
}

impl Default for HeaderFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordFormat for HeaderFormat {
    fn do_format(&self, arg: &mut LogRecord) {
        if !arg.is_record() {
            return;
        }
        arg.formated = format!(
            "{} {} [{:<tw$}] {:<lw$} {}\n",
            Self::timestamp(arg),
            arg.level.letter(),
            arg.thread_name,
            Self::location(arg),
            arg.args,
            tw = self.thread_width,
            lw = self.location_width
        );
    }
}

#[cfg(test)]
mod test {
    use super::HeaderFormat;
    use crate::appender::{Command, LogRecord, RecordFormat};
    use crate::level::LogLevel;

    fn record(thread_name: &str, file: &str, line: Option<u32>, args: &str) -> LogRecord {
        let mut r = LogRecord::command(Command::CommandRecord);
        r.level = LogLevel::Info;
        r.target = "svc::orders".to_string();
        r.thread_name = thread_name.to_string();
        r.file = file.to_string();
        r.line = line;
        r.args = args.to_string();
        r
    }

    #[test]
    fn test_header_layout() {
        let mut r = record("io", "src/orders/main.rs", Some(42), "order accepted");
        HeaderFormat::new().do_format(&mut r);
        let ts = HeaderFormat::timestamp(&r);
        assert_eq!(ts.len(), "2024-03-01 09:15:02.031".len());
        assert_eq!(
            r.formated,
            format!("{} I [io    ] main.rs:42       order accepted\n", ts)
        );
    }

    #[test]
    fn test_wide_fields_not_truncated() {
        let mut r = record("worker-1", "a_rather_long_file_name.rs", Some(7), "x");
        HeaderFormat::new().do_format(&mut r);
        assert!(r.formated.contains(" I [worker-1] a_rather_long_file_name.rs:7 x\n"));
    }

    #[test]
    fn test_location_fallback() {
        let r = record("1", "", None, "x");
        assert_eq!(HeaderFormat::location(&r), "svc::orders");
        let r = record("1", "C:\\src\\lib.rs", Some(3), "x");
        assert_eq!(HeaderFormat::location(&r), "lib.rs:3");
    }

    #[test]
    fn test_debug_shows_pattern() {
        let debug = format!("{:?}", HeaderFormat::new());
        assert!(debug.contains("{YmdHMSF} {l} [{t:<6}] {s:<16} $"));
        assert!(debug.contains("thread_width: 6"));
        assert!(debug.contains("location_width: 16"));
    }

    #[test]
    fn test_skip_commands() {
        let mut r = LogRecord::command(Command::CommandExit);
        HeaderFormat::new().do_format(&mut r);
        assert!(r.formated.is_empty());
    }
}
