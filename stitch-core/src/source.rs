//! Kind-specific source storage
//!
//! Item source code lives in one directory per kind; an item's file is
//! `<dir>/<item name>`. The server-side resolver reads from here when
//! attaching code to resolved items.

use std::io;
use std::path::{Path, PathBuf};

use crate::schema::ItemKind;

/// Maps each item kind to the directory its source files live in
#[derive(Debug, Clone)]
pub struct SourceStore {
    components: PathBuf,
    hooks: PathBuf,
    types: PathBuf,
    utilities: PathBuf,
    styles: PathBuf,
}

impl SourceStore {
    /// Conventional layout under a single root:
    /// `components/`, `hooks/`, `types/`, `utils/`, `styles/`
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            components: root.join("components"),
            hooks: root.join("hooks"),
            types: root.join("types"),
            utilities: root.join("utils"),
            styles: root.join("styles"),
        }
    }

    /// The directory holding sources of the given kind
    pub fn dir_for(&self, kind: ItemKind) -> &Path {
        match kind {
            ItemKind::Component => &self.components,
            ItemKind::Hook => &self.hooks,
            ItemKind::Type => &self.types,
            ItemKind::Utility => &self.utilities,
            ItemKind::Style => &self.styles,
        }
    }

    /// Read the source file for an item as UTF-8 text
    pub fn read(&self, kind: ItemKind, name: &str) -> io::Result<String> {
        std::fs::read_to_string(self.dir_for(kind).join(name))
    }
}

#[cfg(test)]
mod source_tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_by_kind() {
        let temp = TempDir::new().unwrap();
        let hooks_dir = temp.path().join("hooks");
        std::fs::create_dir_all(&hooks_dir).unwrap();
        std::fs::write(hooks_dir.join("useInsets.ts"), "export {};").unwrap();

        let store = SourceStore::new(temp.path());
        let code = store.read(ItemKind::Hook, "useInsets.ts").unwrap();
        assert_eq!(code, "export {};");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let store = SourceStore::new(temp.path());

        let err = store.read(ItemKind::Style, "tokens.ts").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
