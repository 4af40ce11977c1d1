// Storage module: reads and writes the whole library as one JSON file.
// There is no incremental update and no locking; the file is fully read on
// startup and fully rewritten on exit.

use crate::models::Book;
use log::{info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name used when `LIBRARY_FILE` is not set.
pub const DEFAULT_LIBRARY_FILE: &str = "library.json";

/// Environment variable that overrides the storage location.
pub const LIBRARY_FILE_ENV: &str = "LIBRARY_FILE";

/// Failures the persistence layer reports to its caller. A missing or
/// undecodable file is not an error; it loads as an empty library.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read library file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write library file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode library as JSON")]
    Encode(#[from] serde_json::Error),
}

/// Handle on the library file. Holds only the path; every call opens,
/// reads or writes, and closes the file.
#[derive(Debug, Clone)]
pub struct LibraryStore {
    path: PathBuf,
}

impl LibraryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LibraryStore { path: path.into() }
    }

    /// Create a store from the `LIBRARY_FILE` environment variable or fall
    /// back to `library.json` in the working directory.
    pub fn from_env() -> Self {
        let raw = std::env::var(LIBRARY_FILE_ENV).unwrap_or_else(|_| DEFAULT_LIBRARY_FILE.into());
        Self::new(expand_home(&raw))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record. A missing, empty or corrupt file yields an empty
    /// list; only other I/O failures (permissions, a directory in the way)
    /// are returned as errors.
    pub fn load(&self) -> Result<Vec<Book>, StorageError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no library file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_slice::<Vec<Book>>(&data) {
            Ok(books) => {
                info!("loaded {} books from {}", books.len(), self.path.display());
                Ok(books)
            }
            Err(e) => {
                warn!(
                    "library file {} could not be decoded ({}), starting empty",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the file with `books`, pretty-printed with 4-space indents.
    /// Not atomic: a crash mid-write can leave a truncated file.
    pub fn save(&self, books: &[Book]) -> Result<(), StorageError> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        books.serialize(&mut ser)?;

        fs::write(&self.path, buf).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!("saved {} books to {}", books.len(), self.path.display());
        Ok(())
    }
}

/// Expand a leading `~/` against the home directory. Other paths are used
/// as given.
fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}
