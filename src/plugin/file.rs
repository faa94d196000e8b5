use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::appender::{LogAppender, LogRecord};
use crate::error::LogError;

/// only write append into file, buffered until flush
pub struct FileAppender {
    path: PathBuf,
    file: BufWriter<File>,
}

impl FileAppender {
    pub fn new<P: AsRef<Path>>(log_file_path: P) -> Result<FileAppender, LogError> {
        let path = log_file_path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LogError::Io(format!("open {}: {}", path.display(), e)))?;
        Ok(Self {
            path,
            file: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogAppender for FileAppender {
    fn do_logs(&mut self, records: &[LogRecord]) {
        for x in records {
            if let Err(e) = self.file.write_all(x.formated.as_bytes()) {
                eprintln!("[stlog] write {} fail: {}", self.path.display(), e);
                return;
            }
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.file.flush() {
            eprintln!("[stlog] flush {} fail: {}", self.path.display(), e);
        }
    }
}
