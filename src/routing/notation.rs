//! Controller reference notation.
//!
//! # Encodings
//! ```text
//! compact:     Blog:Post@view
//! structural:  /Blog/Controller/Post   + action "view"
//! nested:      Blog:Admin:Post@edit  →  /Blog/Controller/Admin/Post + "edit"
//! ```
//!
//! # Design Decisions
//! - Pure string transforms, nothing here allocates state
//! - Malformed input degrades to malformed output rather than failing;
//!   use [`ControllerRef::parse`] when the caller needs a checked value

use std::fmt;

/// Fixed directory segment between the module and the controller path.
pub const CONTROLLER_DIR: &str = "Controller";

/// Conversions between compact and structural controller references.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteNotation;

impl RouteNotation {
    /// `Module:Sub:Path` → `/Module/Controller/Sub/Path`.
    ///
    /// Anything after the first `:` is carried verbatim, including an
    /// `@action` suffix.
    pub fn to_class_path(compact: &str) -> String {
        let mut parts = compact.split(':');
        let module = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        format!("/{}/{}/{}", module, CONTROLLER_DIR, rest.join("/"))
    }

    /// `Module:Controller@action` → (`/Module/Controller/Controller`, `action`).
    ///
    /// Without an `@` the action comes back empty.
    pub fn to_args(compact: &str) -> (String, String) {
        let path = Self::to_class_path(compact);
        match path.split_once('@') {
            Some((class_path, action)) => (class_path.to_string(), action.to_string()),
            None => (path, String::new()),
        }
    }

    /// Structural route-registration form: a single `path → action` pair.
    pub fn to_compliant(notation: &str) -> (String, String) {
        let (controller, action) = notation.split_once('@').unwrap_or((notation, ""));
        (Self::to_class_path(controller), action.to_string())
    }

    /// Inverse of [`RouteNotation::to_class_path`] for well-formed paths.
    ///
    /// Returns `None` when the path lacks the module or `Controller` segment.
    pub fn from_class_path(path: &str) -> Option<String> {
        let mut segments = path.strip_prefix('/')?.split('/');
        let module = segments.next().filter(|m| !m.is_empty())?;
        if segments.next()? != CONTROLLER_DIR {
            return None;
        }

        let rest: Vec<&str> = segments.collect();
        if rest.is_empty() || rest.iter().any(|s| s.is_empty()) {
            return None;
        }

        Some(format!("{}:{}", module, rest.join(":")))
    }

    /// Rebuild the compact form from a `path → action` pair.
    pub fn from_compliant(path: &str, action: &str) -> Option<String> {
        Self::from_class_path(path).map(|controller| format!("{}@{}", controller, action))
    }
}

/// A checked `(module, controller, action)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerRef {
    pub module: String,
    /// Controller path below the module, `:`-separated when nested.
    pub controller: String,
    pub action: String,
}

impl ControllerRef {
    /// Parse `Module:Controller@action`; every part must be non-empty.
    pub fn parse(compact: &str) -> Option<Self> {
        let (lhs, action) = compact.split_once('@')?;
        let (module, controller) = lhs.split_once(':')?;

        if module.is_empty() || controller.is_empty() || action.is_empty() || action.contains('@') {
            return None;
        }

        Some(Self {
            module: module.to_string(),
            controller: controller.to_string(),
            action: action.to_string(),
        })
    }

    /// Structural path of the controller, without the action.
    pub fn class_path(&self) -> String {
        RouteNotation::to_class_path(&format!("{}:{}", self.module, self.controller))
    }
}

impl fmt::Display for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.module, self.controller, self.action)
    }
}
