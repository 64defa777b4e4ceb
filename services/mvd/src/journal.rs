//! Append-only diagnostic log handed to each analysis run

use crate::error::Result;
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalLevel {
    Info,
    Warning,
    Error,
}

impl JournalLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalLevel::Info => "INFO",
            JournalLevel::Warning => "WARNING",
            JournalLevel::Error => "ERROR",
        }
    }
}

/// Sink for run diagnostics. Entries are informational only; a sink that
/// cannot write must not fail the run.
pub trait Journal {
    fn record(&self, level: JournalLevel, message: &str);

    fn info(&self, message: &str) {
        self.record(JournalLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(JournalLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(JournalLevel::Error, message);
    }
}

/// Journal appending `timestamp:LEVEL:message` lines to a file.
pub struct FileJournal {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileJournal {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            info!("Log file {:?} already exists. New logs will be appended.", path);
        } else {
            info!("Log file {:?} does not exist. It will be created.", path);
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Journal for FileJournal {
    fn record(&self, level: JournalLevel, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(file, "{}:{}:{}", timestamp, level.as_str(), message) {
            warn!("Failed to write to log {:?}: {}", self.path, e);
        }
    }
}

/// Journal kept in memory; used where no log file is wanted.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    entries: Mutex<Vec<(JournalLevel, String)>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(JournalLevel, String)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn contains(&self, level: JournalLevel, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl Journal for MemoryJournal {
    fn record(&self, level: JournalLevel, message: &str) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push((level, message.to_string()));
    }
}
