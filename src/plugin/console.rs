use crate::appender::{LogAppender, LogRecord};

/// mirror records to stdout
pub struct ConsoleAppender {}

impl LogAppender for ConsoleAppender {
    fn do_logs(&mut self, records: &[LogRecord]) {
        for x in records {
            print!("{}", x.formated);
        }
    }
}
