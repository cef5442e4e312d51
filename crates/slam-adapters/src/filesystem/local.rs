//! Local filesystem adapter using std::fs.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use slam_core::{application::ports::Filesystem, error::SlamResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> SlamResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SlamResult<()> {
        // Flushed to disk before the handle drops so a following rename
        // never publishes a half-written file.
        let write = || -> io::Result<()> {
            let mut file = File::create(path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()
        };
        write().map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> SlamResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn copy(&self, from: &Path, to: &Path) -> SlamResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, &format!("copy to {}", to.display())))
    }

    fn rename(&self, from: &Path, to: &Path) -> SlamResult<()> {
        std::fs::rename(from, to)
            .map_err(|e| map_io_error(from, e, &format!("rename to {}", to.display())))
    }

    fn remove_file(&self, path: &Path) -> SlamResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> slam_core::error::SlamError {
    use slam_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
