//! Required vs. loaded module bookkeeping.

/// Two name sets: modules that are loaded and modules that must be.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreBag {
    loaded: Vec<String>,
    core: Vec<String>,
}

impl CoreBag {
    pub fn new<L, C, S, T>(loaded: L, core: C) -> Self
    where
        L: IntoIterator<Item = S>,
        C: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            loaded: loaded.into_iter().map(Into::into).collect(),
            core: core.into_iter().map(Into::into).collect(),
        }
    }

    /// Core modules that are not loaded, in core-list order.
    pub fn missing_core_modules(&self) -> Vec<&str> {
        self.core
            .iter()
            .filter(|name| !self.loaded.contains(*name))
            .map(String::as_str)
            .collect()
    }

    pub fn has_all_core_modules(&self) -> bool {
        self.missing_core_modules().is_empty()
    }

    pub fn is_core_module(&self, name: &str) -> bool {
        self.core.iter().any(|core| core == name)
    }

    /// True when every given name is a core module.
    pub fn is_core_modules<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().all(|name| self.is_core_module(name.as_ref()))
    }

    pub fn core_modules(&self) -> &[String] {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_core_modules() {
        let bag = CoreBag::new(["Users"], ["Users", "Admin"]);
        assert!(!bag.has_all_core_modules());
        assert_eq!(bag.missing_core_modules(), vec!["Admin"]);
    }

    #[test]
    fn test_missing_preserves_core_order() {
        let bag = CoreBag::new(["Blog"], ["Site", "Blog", "Admin", "Users"]);
        assert_eq!(bag.missing_core_modules(), vec!["Site", "Admin", "Users"]);
    }

    #[test]
    fn test_membership() {
        let bag = CoreBag::new(["Users", "Admin", "Blog"], ["Users", "Admin"]);
        assert!(bag.has_all_core_modules());
        assert!(bag.is_core_module("Admin"));
        assert!(!bag.is_core_module("Blog"));
        assert!(bag.is_core_modules(&["Users", "Admin"]));
        assert!(!bag.is_core_modules(&["Users", "Blog"]));
    }

    #[test]
    fn test_no_core_modules() {
        let bag = CoreBag::new(["Blog"], Vec::<String>::new());
        assert!(bag.has_all_core_modules());
        assert!(bag.missing_core_modules().is_empty());
    }
}
