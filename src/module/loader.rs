//! Module discovery.
//!
//! # Responsibilities
//! - Produce the ordered list of module names to load
//!
//! # Design Decisions
//! - Directory discovery sorts names so load order (and route priority)
//!   does not depend on filesystem iteration order
//! - Hidden directories are skipped; any other non-conforming name is left
//!   for the manager to reject

use std::path::{Path, PathBuf};

use crate::config::{DiscoveryMode, ModulesConfig};
use crate::module::error::ModuleError;
use crate::module::paths::PathProvider;

/// Source of module names.
pub trait Loader: Send + Sync {
    fn modules(&self) -> Result<Vec<String>, ModuleError>;
}

/// A fixed, explicitly configured sequence.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    names: Vec<String>,
}

impl StaticLoader {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Loader for StaticLoader {
    fn modules(&self) -> Result<Vec<String>, ModuleError> {
        Ok(self.names.clone())
    }
}

/// Every subdirectory of the modules root.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    dir: PathBuf,
}

impl DirectoryLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Loader for DirectoryLoader {
    fn modules(&self) -> Result<Vec<String>, ModuleError> {
        let discovery_error = |source| ModuleError::Discovery {
            path: self.dir.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(discovery_error)? {
            let entry = entry.map_err(discovery_error)?;
            if !entry.file_type().map_err(discovery_error)?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if !name.starts_with('.') => names.push(name),
                Ok(_) => {}
                Err(raw) => tracing::warn!(name = ?raw, "Skipping non UTF-8 module directory"),
            }
        }

        names.sort();
        tracing::debug!(dir = ?self.dir, modules = ?names, "Modules discovered");
        Ok(names)
    }
}

/// Loader selected by `[modules] discovery`.
pub fn loader_from_config(config: &ModulesConfig, paths: &dyn PathProvider) -> Box<dyn Loader> {
    match config.discovery {
        DiscoveryMode::Static => Box::new(StaticLoader::new(config.names.iter().cloned())),
        DiscoveryMode::Directory => Box::new(DirectoryLoader::new(paths.modules_dir())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_loader_keeps_order() {
        let loader = StaticLoader::new(["Site", "Blog", "Admin"]);
        assert_eq!(loader.modules().unwrap(), vec!["Site", "Blog", "Admin"]);
    }

    #[test]
    fn test_directory_loader() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["Shop", "Blog", ".git"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        std::fs::write(dir.path().join("README.md"), "not a module").unwrap();

        let loader = DirectoryLoader::new(dir.path());
        assert_eq!(loader.modules().unwrap(), vec!["Blog", "Shop"]);
    }

    #[test]
    fn test_directory_loader_missing_dir() {
        let loader = DirectoryLoader::new("/no/such/modules/dir");
        assert!(matches!(loader.modules(), Err(ModuleError::Discovery { .. })));
    }
}
