//! Filesystem locations of module resources.

use std::path::{Path, PathBuf};

use crate::config::PathsConfig;

/// Per-module resource directories.
pub trait PathProvider: Send + Sync {
    /// Directory holding every module's sources.
    fn modules_dir(&self) -> PathBuf;

    fn module_dir(&self, module: &str) -> PathBuf {
        self.modules_dir().join(module)
    }

    fn module_views_dir(&self, module: &str) -> PathBuf {
        self.module_dir(module).join("View")
    }

    fn module_cache_dir(&self, module: &str) -> PathBuf;

    fn module_uploads_dir(&self, module: &str) -> PathBuf;
}

/// Paths derived from `[paths]`, relative entries resolved against the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
    modules_dir: PathBuf,
    cache_dir: PathBuf,
    uploads_dir: PathBuf,
}

impl AppPaths {
    pub fn from_config(config: &PathsConfig) -> Self {
        let root = PathBuf::from(&config.root);
        Self {
            modules_dir: root.join(&config.modules_dir),
            cache_dir: root.join(&config.cache_dir),
            uploads_dir: root.join(&config.uploads_dir),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PathProvider for AppPaths {
    fn modules_dir(&self) -> PathBuf {
        self.modules_dir.clone()
    }

    fn module_cache_dir(&self, module: &str) -> PathBuf {
        self.cache_dir.join(module)
    }

    fn module_uploads_dir(&self, module: &str) -> PathBuf {
        self.uploads_dir.join(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_from_config() {
        let config = PathsConfig {
            root: "/srv/app".into(),
            ..PathsConfig::default()
        };
        let paths = AppPaths::from_config(&config);

        assert_eq!(paths.module_dir("Blog"), PathBuf::from("/srv/app/modules/Blog"));
        assert_eq!(paths.module_views_dir("Blog"), PathBuf::from("/srv/app/modules/Blog/View"));
        assert_eq!(paths.module_cache_dir("Blog"), PathBuf::from("/srv/app/data/cache/Blog"));
        assert_eq!(
            paths.module_uploads_dir("Blog"),
            PathBuf::from("/srv/app/data/uploads/Blog")
        );
    }
}
