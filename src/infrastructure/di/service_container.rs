//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{Dispatcher, Session};
use crate::config::Settings;
use crate::infrastructure::store::FileStore;
use crate::infrastructure::traits::{FileSystem, RealFileSystem, ScopedStore};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Scoped variable store
    pub store: Arc<dyn ScopedStore>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let store = Arc::new(FileStore::from_settings(fs.clone(), &settings));
        Self::with_deps(settings, fs, store)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn ScopedStore>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            store,
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.store.clone())
    }

    /// Fresh REPL session over the configured store.
    pub fn session(&self) -> Session {
        Session::new(self.dispatcher())
    }
}
