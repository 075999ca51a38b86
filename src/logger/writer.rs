//! Shared file writer for the file output layer

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;

/// Append-or-truncate log file shared by every event.
///
/// Falls back to stderr for a single write when the file write fails or the
/// lock is poisoned, so a full disk never takes the service down.
#[derive(Clone)]
pub struct LogFileWriter {
    file: Arc<Mutex<File>>,
}

impl LogFileWriter {
    /// Opens `config.path`, creating missing parent directories.
    pub fn new(config: &FileConfig) -> io::Result<Self> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = open_log_file(&config.path, config.append)?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
        })
    }
}

impl<'a> MakeWriter<'a> for LogFileWriter {
    type Writer = LogFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileGuard {
            file: self.file.lock().ok(),
        }
    }
}

/// Holds the file lock for the duration of one event.
pub struct LogFileGuard<'a> {
    file: Option<MutexGuard<'a, File>>,
}

impl Write for LogFileGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.file.as_mut().map(|file| file.write(buf)) {
            Some(Ok(written)) => Ok(written),
            Some(Err(e)) => {
                eprintln!("[logger] file write failed, writing to stderr: {e}");
                io::stderr().write(buf)
            }
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => io::stderr().flush(),
        }
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
}
