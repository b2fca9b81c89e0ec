//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::Path;

use crate::domain::Scope;
use crate::infrastructure::store::StoreResult;

/// Scoped string-map provider holding the user and system variables.
pub trait ScopedStore: Send + Sync {
    /// All variable names visible in `scope`, in no particular order.
    fn list(&self, scope: Scope) -> StoreResult<Vec<String>>;

    /// Value of `key` in `scope`, `None` if absent.
    fn get(&self, scope: Scope, key: &str) -> StoreResult<Option<String>>;

    /// Write `key` in `scope`. `None` removes the variable; removing an
    /// absent variable is not an error.
    fn set(&self, scope: Scope, key: &str, value: Option<&str>) -> StoreResult<()>;
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Line-oriented terminal used by the REPL.
pub trait Terminal {
    /// Show `prompt` and read one line. Returns `None` at end of input.
    fn read_line(&self, prompt: &str) -> io::Result<Option<String>>;

    /// Print command output.
    fn print(&self, text: &str);

    /// Print a recoverable warning.
    fn warn(&self, text: &str);

    /// Print an error.
    fn error(&self, text: &str);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
