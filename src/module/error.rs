//! Module error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while discovering, loading or removing modules.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// Name does not match `^[A-Z][a-zA-Z]*$`.
    #[error("invalid module name '{0}': expected ^[A-Z][a-zA-Z]*$")]
    InvalidName(String),

    /// Discovery produced an empty module list.
    #[error("module discovery returned no modules")]
    NoModules,

    /// `initialize` was called twice.
    #[error("module manager is already initialized")]
    AlreadyInitialized,

    /// Required core modules are not loaded.
    #[error("missing core modules: {}", .0.join(", "))]
    MissingCoreModules(Vec<String>),

    /// Core modules cannot be removed from the filesystem.
    #[error("refusing to remove core module '{0}'")]
    CoreModuleRemoval(String),

    /// The modules directory could not be scanned.
    #[error("cannot discover modules in {path:?}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A module directory could not be removed.
    #[error("cannot remove {path:?} of module '{module}': {source}")]
    Filesystem {
        module: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
