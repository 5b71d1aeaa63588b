//! File-based storage backend for persistent storage.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Suffix of the advisory lock file kept next to the document.
const LOCK_SUFFIX: &str = ".lock";
/// Suffix of the temporary file used for atomic replacement.
const TEMP_SUFFIX: &str = ".tmp";

/// A file-based storage backend.
///
/// The document lives in a single file. Replacement uses the
/// write-then-rename pattern:
/// 1. Write the new bytes to `<path>.tmp`
/// 2. Sync the temporary file to disk
/// 3. Rename it over `<path>`
/// 4. Fsync the parent directory so the rename itself is durable
///
/// A crash or I/O error at any step leaves `<path>` holding its previous,
/// fully-written content.
///
/// # Locking
///
/// Opening a backend takes an exclusive advisory lock on `<path>.lock`.
/// The lock is held until the backend is dropped, so only one process can
/// own a document at a time.
///
/// # Example
///
/// ```no_run
/// use catalog_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open(Path::new("db.json")).unwrap();
/// backend.replace(b"{}").unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    sync_on_write: bool,
    /// Lock file handle (held for exclusive access).
    _lock_file: File,
}

impl FileBackend {
    /// Opens a file backend at the given path.
    ///
    /// The document file itself is not created here; it appears on the
    /// first successful [`StorageBackend::replace`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Locked`] if another owner holds the lock, or
    /// an I/O error if the lock file cannot be opened.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let lock_path = sibling(path, LOCK_SUFFIX);
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(StorageError::Locked { path: lock_path });
        }

        Ok(Self {
            path: path.to_path_buf(),
            sync_on_write: true,
            _lock_file: lock_file,
        })
    }

    /// Opens a file backend, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the backend cannot be opened.
    pub fn open_with_create_dirs(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Self::open(path)
    }

    /// Sets whether each replacement is fsynced before the rename.
    ///
    /// Disabling this trades crash durability for write latency; the rename
    /// still guarantees readers never see a half-written document.
    #[must_use]
    pub fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Returns the path to the document file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        sibling(&self.path, TEMP_SUFFIX)
    }

    fn write_temp(&self, temp_path: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = File::create(temp_path)?;
        file.write_all(data)?;
        if self.sync_on_write {
            file.sync_all()?;
        }
        Ok(())
    }

    /// Syncs the parent directory so the rename is durable.
    #[cfg(unix)]
    fn sync_directory(&self) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        File::open(dir)?.sync_all()
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> io::Result<()> {
        // NTFS journaling covers rename durability
        Ok(())
    }

    /// Syncs the parent directory after a rename.
    ///
    /// Once the rename succeeded the file already holds the new document,
    /// so a failure here is logged and does not fail the write.
    fn sync_directory_or_warn(&self) -> bool {
        match self.sync_directory() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "directory sync after rename failed"
                );
                false
            }
        }
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn replace(&mut self, data: &[u8]) -> StorageResult<()> {
        let temp_path = self.temp_path();

        if let Err(e) = self.write_temp(&temp_path, data) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                tracing::debug!(
                    path = %temp_path.display(),
                    error = %cleanup,
                    "temp file cleanup failed"
                );
            }
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        if self.sync_on_write {
            self.sync_directory_or_warn();
        }

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Returns `path` with `suffix` appended to its file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
