//! Scoped variable stores
//!
//! `FileStore` keeps each scope in its own TOML file (a flat table of
//! string values). `MemoryStore` is an in-process fake for tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, trace};

use crate::config::Settings;
use crate::domain::Scope;
use crate::infrastructure::traits::{FileSystem, ScopedStore};

/// Failures reported by a scoped store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("access to {scope} variables denied: {location}")]
    PermissionDenied { scope: Scope, location: String },

    #[error("{scope} store I/O error: {context}")]
    Io {
        scope: Scope,
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("{scope} store is corrupt ({location}): {message}")]
    Corrupt {
        scope: Scope,
        location: String,
        message: String,
    },
}

impl StoreError {
    /// Classify an I/O error; permission problems get their own variant.
    pub fn from_io(scope: Scope, action: &str, path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                scope,
                location: path.display().to_string(),
            }
        } else {
            Self::Io {
                scope,
                context: format!("{}: {}", action, path.display()),
                source,
            }
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================
// FileStore
// ============================================================

/// Store backed by one TOML file per scope.
///
/// A missing file reads as an empty scope. Every write rewrites the whole file.
pub struct FileStore {
    fs: Arc<dyn FileSystem>,
    user_path: PathBuf,
    system_path: PathBuf,
}

impl FileStore {
    pub fn new(fs: Arc<dyn FileSystem>, user_path: PathBuf, system_path: PathBuf) -> Self {
        Self {
            fs,
            user_path,
            system_path,
        }
    }

    pub fn from_settings(fs: Arc<dyn FileSystem>, settings: &Settings) -> Self {
        Self::new(
            fs,
            settings.user_store.clone(),
            settings.system_store.clone(),
        )
    }

    /// File holding `scope`.
    pub fn path(&self, scope: Scope) -> &Path {
        match scope {
            Scope::User => &self.user_path,
            Scope::System => &self.system_path,
        }
    }

    fn load(&self, scope: Scope) -> StoreResult<BTreeMap<String, String>> {
        let path = self.path(scope);
        if !self.fs.exists(path) {
            trace!("load: {} store {} missing, empty", scope, path.display());
            return Ok(BTreeMap::new());
        }
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| StoreError::from_io(scope, "read", path, e))?;
        toml::from_str(&content).map_err(|e| StoreError::Corrupt {
            scope,
            location: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn save(&self, scope: Scope, vars: &BTreeMap<String, String>) -> StoreResult<()> {
        let path = self.path(scope);
        let content = toml::to_string(vars).map_err(|e| StoreError::Corrupt {
            scope,
            location: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.fs
            .ensure_parent(path)
            .map_err(|e| StoreError::from_io(scope, "create directory for", path, e))?;
        self.fs
            .write(path, &content)
            .map_err(|e| StoreError::from_io(scope, "write", path, e))?;
        debug!("save: wrote {} variables to {}", vars.len(), path.display());
        Ok(())
    }
}

impl ScopedStore for FileStore {
    fn list(&self, scope: Scope) -> StoreResult<Vec<String>> {
        Ok(self.load(scope)?.into_keys().collect())
    }

    fn get(&self, scope: Scope, key: &str) -> StoreResult<Option<String>> {
        Ok(self.load(scope)?.remove(key))
    }

    fn set(&self, scope: Scope, key: &str, value: Option<&str>) -> StoreResult<()> {
        let mut vars = self.load(scope)?;
        match value {
            Some(v) => {
                vars.insert(key.to_string(), v.to_string());
            }
            None => {
                if vars.remove(key).is_none() {
                    trace!("set: {} absent in {} scope, nothing to remove", key, scope);
                    return Ok(());
                }
            }
        }
        self.save(scope, &vars)
    }
}

// ============================================================
// MemoryStore
// ============================================================

/// In-memory store. Key enumeration follows `HashMap` order, i.e. unsorted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    vars: Mutex<HashMap<Scope, HashMap<String, String>>>,
    read_only: HashSet<Scope>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `scope` with variables.
    pub fn with_vars<I, K, V>(self, scope: Scope, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        {
            let mut guard = self.lock();
            let entry = guard.entry(scope).or_default();
            for (k, v) in vars {
                entry.insert(k.into(), v.into());
            }
        }
        self
    }

    /// Reject every write to `scope` with `PermissionDenied`.
    pub fn read_only(mut self, scope: Scope) -> Self {
        self.read_only.insert(scope);
        self
    }

    /// Sorted copy of a scope's contents.
    pub fn snapshot(&self, scope: Scope) -> BTreeMap<String, String> {
        self.lock()
            .get(&scope)
            .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Scope, HashMap<String, String>>> {
        self.vars.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ScopedStore for MemoryStore {
    fn list(&self, scope: Scope) -> StoreResult<Vec<String>> {
        Ok(self
            .lock()
            .get(&scope)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn get(&self, scope: Scope, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock().get(&scope).and_then(|m| m.get(key).cloned()))
    }

    fn set(&self, scope: Scope, key: &str, value: Option<&str>) -> StoreResult<()> {
        if self.read_only.contains(&scope) {
            return Err(StoreError::PermissionDenied {
                scope,
                location: "memory".to_string(),
            });
        }
        let mut guard = self.lock();
        let entry = guard.entry(scope).or_default();
        match value {
            Some(v) => {
                entry.insert(key.to_string(), v.to_string());
            }
            None => {
                entry.remove(key);
            }
        }
        Ok(())
    }
}
