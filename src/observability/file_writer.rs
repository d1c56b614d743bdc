//! Rotating file writer with size-based rotation and backup retention.
//!
//! This module provides a thread-safe log sink that automatically rotates
//! the file when it exceeds a size threshold, keeping a fixed number of
//! backups. It plugs into `tracing-subscriber` as a [`MakeWriter`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// When the current file exceeds the size limit it is renamed to
/// `<name>.<unix_timestamp>` and a new file is started. Backups beyond the
/// retention limit are removed, oldest first.
///
/// The file is opened lazily on first write, so construction never fails.
///
/// # Example
///
/// ```rust
/// use whosnext::observability::FileWriter;
///
/// let dir = tempfile::tempdir()?;
/// let writer = FileWriter::new(dir.path().join("whosnext.log"));
/// writer.write_line("draw complete")?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer for `file_path` with the default 10 MB limit.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, MAX_FILE_SIZE_BYTES)
    }

    /// Creates a writer that rotates once the file grows past `max_bytes`.
    pub const fn with_limit(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            max_bytes,
            writer: Mutex::new(None),
        }
    }

    /// Path of the active log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Writes a single line, rotating first if needed.
    ///
    /// # Errors
    ///
    /// Fails if rotation, opening, writing or flushing fails, or if the
    /// internal lock is poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        self.write_bytes(&buf)
    }

    fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self.lock()?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::other("no log file available"))?;

        file.write_all(bytes)?;
        file.flush()
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, Option<File>>> {
        self.writer
            .lock()
            .map_err(|e| io::Error::other(format!("log writer mutex poisoned: {e}")))
    }

    fn check_and_rotate(&self, writer: &mut Option<File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_bytes {
                *writer = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    fn rotate_files(&self) -> io::Result<()> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let backup_path = self.backup_path(timestamp);

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.cleanup_old_backups()
    }

    fn backup_path(&self, timestamp: i64) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_os_string();
        name.push(format!(".{timestamp}"));
        PathBuf::from(name)
    }

    /// Removes backups beyond the retention limit, newest kept.
    ///
    /// Individual deletion errors are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent_dir = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::other("log file has no parent directory"))?;

        let prefix = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::other("invalid log file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .and_then(|name| name.strip_prefix(&prefix))
                    .is_some_and(|suffix| suffix.chars().all(|c| c.is_ascii_digit()))
            })
            .collect();

        // Newest first: mtime, then the timestamp suffix.
        backups.sort_by(|a, b| {
            let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
            let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time).then_with(|| b.cmp(a))
        });

        for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = &'a FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
