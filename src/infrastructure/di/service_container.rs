//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{GraphvizRenderer, RenderService, TrieLoader};
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, FileSystem, RealCommandRunner, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs, cmd }
    }

    /// Trie loader bound to the container's filesystem.
    pub fn loader(&self) -> TrieLoader {
        TrieLoader::new(Arc::clone(&self.fs))
    }

    /// Render service backed by Graphviz.
    pub fn render_service(&self) -> RenderService {
        let renderer = GraphvizRenderer::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.cmd),
            self.settings.dot_command.clone(),
        );
        RenderService::new(self.loader(), Arc::new(renderer), Arc::clone(&self.settings))
    }
}
