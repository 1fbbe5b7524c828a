//! Asynchronous module loading with placeholder substitution.
//!
//! DESIGN
//! ======
//! Each registry path maps to a [`ModuleLoader`] that resolves the
//! renderable module's manifest. Loading can fail (missing module, source
//! unavailable), and the one explicit failure-recovery policy of the engine
//! lives here: [`LoaderTable::resolve`] substitutes the placeholder module
//! on any failure and never surfaces an error to the caller. A host renders
//! *something* for every element; a missing module never blanks the page.
//!
//! The raw outcome is also exposed as a discriminated [`LoadOutcome`] for
//! callers that want to observe failures (e.g. palette diagnostics).

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

/// Reserved path for the fallback module. Registering a loader under this
/// key overrides the built-in placeholder.
pub const PLACEHOLDER_PATH: &str = "component-placeholder";

/// A resolved renderable module: its lookup path and the manifest the host
/// renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentModule {
    pub path: String,
    pub manifest: serde_json::Value,
}

impl ComponentModule {
    #[must_use]
    pub fn new(path: &str, manifest: serde_json::Value) -> Self {
        Self { path: path.to_owned(), manifest }
    }
}

/// Why a loader resolution failed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no loader registered for path: {0}")]
    NotFound(String),
    #[error("module source unavailable: {0}")]
    Unavailable(String),
    #[error("invalid module manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),
}

/// Raw result of a single loader resolution.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(ComponentModule),
    Failed(LoadError),
}

impl LoadOutcome {
    /// Whether the resolution produced a real module.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// An asynchronous source for one module's manifest.
#[async_trait::async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Resolve the module.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when the module cannot be produced.
    async fn load(&self) -> Result<ComponentModule, LoadError>;
}

/// A loader that always resolves to a fixed module. Used for stock modules
/// and as the test double.
pub struct StaticLoader {
    module: ComponentModule,
}

impl StaticLoader {
    #[must_use]
    pub fn new(module: ComponentModule) -> Self {
        Self { module }
    }
}

#[async_trait::async_trait]
impl ModuleLoader for StaticLoader {
    async fn load(&self) -> Result<ComponentModule, LoadError> {
        Ok(self.module.clone())
    }
}

/// The built-in last-resort placeholder module.
fn builtin_placeholder() -> ComponentModule {
    ComponentModule::new(
        PLACEHOLDER_PATH,
        serde_json::json!({
            "component": "placeholder",
            "message": "component unavailable",
        }),
    )
}

/// Side table mapping registry paths to loaders.
pub struct LoaderTable {
    loaders: HashMap<String, Arc<dyn ModuleLoader>>,
}

impl LoaderTable {
    /// Create an empty table. The built-in placeholder is always available
    /// even before any loader is registered.
    #[must_use]
    pub fn new() -> Self {
        Self { loaders: HashMap::new() }
    }

    /// Register a loader for a path, replacing any previous one.
    pub fn register(&mut self, path: &str, loader: Arc<dyn ModuleLoader>) {
        self.loaders.insert(path.to_owned(), loader);
    }

    /// Whether a loader is registered for `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.loaders.contains_key(path)
    }

    /// Resolve a path to its raw outcome without substitution.
    pub async fn load(&self, path: &str) -> LoadOutcome {
        let Some(loader) = self.loaders.get(path) else {
            return LoadOutcome::Failed(LoadError::NotFound(path.to_owned()));
        };
        match loader.load().await {
            Ok(module) => LoadOutcome::Loaded(module),
            Err(e) => LoadOutcome::Failed(e),
        }
    }

    /// Resolve a path to a renderable module, substituting the placeholder
    /// on any failure. Never fails.
    pub async fn resolve(&self, path: &str) -> ComponentModule {
        match self.load(path).await {
            LoadOutcome::Loaded(module) => module,
            LoadOutcome::Failed(e) => {
                warn!(%path, error = %e, "module load failed; substituting placeholder");
                self.placeholder().await
            }
        }
    }

    /// The placeholder module: the registered `component-placeholder`
    /// loader's result when present and working, else the built-in.
    pub async fn placeholder(&self) -> ComponentModule {
        match self.loaders.get(PLACEHOLDER_PATH) {
            Some(loader) => match loader.load().await {
                Ok(module) => module,
                Err(e) => {
                    warn!(error = %e, "placeholder loader failed; using built-in");
                    builtin_placeholder()
                }
            },
            None => builtin_placeholder(),
        }
    }

    /// Resolve many paths concurrently. Every entry resolves to a module;
    /// failures substitute the placeholder per path.
    pub async fn preload<S: AsRef<str>>(&self, paths: &[S]) -> Vec<ComponentModule> {
        futures::future::join_all(paths.iter().map(|p| self.resolve(p.as_ref()))).await
    }
}

impl Default for LoaderTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the loader table for a registry's stock templates: one static
/// manifest per template path, plus the placeholder entry.
#[must_use]
pub fn stock_loader_table(registry: &crate::catalog::Registry) -> LoaderTable {
    let mut table = LoaderTable::new();
    for def in registry.definitions() {
        let manifest = serde_json::json!({
            "component": def.path,
            "type": def.kind,
            "category": def.category,
        });
        table.register(&def.path, Arc::new(StaticLoader::new(ComponentModule::new(&def.path, manifest))));
    }
    table.register(PLACEHOLDER_PATH, Arc::new(StaticLoader::new(builtin_placeholder())));
    table
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;
