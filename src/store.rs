//! Read-only store of `.pptx` templates in one directory.

use crate::error::{DeckError, Result};
use crate::ooxml::pptx::{Package, Presentation};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// A template file found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// File name without extension
    pub name: String,

    /// File name, e.g. `awards.pptx`
    pub filename: String,

    pub path: PathBuf,
}

/// Directory of template decks.
///
/// Templates are only ever read; every open returns a fresh presentation
/// owned by the caller.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Every `.pptx` file directly inside the root, sorted by file name.
    pub fn list(&self) -> Result<Vec<TemplateFile>> {
        let mut templates = Vec::new();

        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file() || !is_pptx(&path) {
                continue;
            }

            let (Some(name), Some(filename)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.file_name().and_then(|s| s.to_str()),
            ) else {
                debug!(path = %path.display(), "skipping template with non UTF-8 name");
                continue;
            };

            templates.push(TemplateFile {
                name: name.to_string(),
                filename: filename.to_string(),
                path,
            });
        }

        templates.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(templates)
    }

    /// Path of the template called `filename`.
    ///
    /// # Errors
    /// `InvalidTemplateName` for empty names or names that are not a single
    /// path component, `TemplateNotFound` when no such file exists.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf> {
        let mut components = Path::new(filename).components();
        let single_file = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if filename.is_empty() || !single_file || filename.contains(['/', '\\']) {
            return Err(DeckError::InvalidTemplateName(filename.to_string()));
        }

        let path = self.root.join(filename);
        if !path.is_file() {
            return Err(DeckError::TemplateNotFound(filename.to_string()));
        }
        Ok(path)
    }

    /// Open a template by file name, loading every slide.
    pub fn open(&self, filename: &str) -> Result<Presentation> {
        let path = self.resolve(filename)?;
        Self::load(&path)
    }

    /// Load the presentation at `path`.
    pub fn load(path: &Path) -> Result<Presentation> {
        debug!(path = %path.display(), "loading template");
        Ok(Package::open(path)?.presentation()?)
    }
}

fn is_pptx(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pptx"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(files: &[&str]) -> (tempfile::TempDir, TemplateStore) {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            std::fs::write(dir.path().join(file), b"not really a deck").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.pptx")).unwrap();
        let store = TemplateStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_list_only_pptx_sorted() {
        let (_dir, store) = store_with(&["b.pptx", "A.PPTX", "notes.txt", "c.pptx.bak"]);
        let templates = store.list().unwrap();
        let filenames: Vec<&str> = templates.iter().map(|t| t.filename.as_str()).collect();
        assert_eq!(filenames, ["A.PPTX", "b.pptx"]);
        assert_eq!(templates[1].name, "b");
    }

    #[test]
    fn test_resolve_rejects_escaping_names() {
        let (_dir, store) = store_with(&["deck.pptx"]);
        assert!(store.resolve("deck.pptx").is_ok());
        for bad in ["", "..", "../deck.pptx", "sub/deck.pptx", "/etc/passwd", "a\\b.pptx"] {
            assert!(
                matches!(store.resolve(bad), Err(DeckError::InvalidTemplateName(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(matches!(
            store.resolve("missing.pptx"),
            Err(DeckError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_open_garbage_is_document_error() {
        let (_dir, store) = store_with(&["deck.pptx"]);
        assert!(matches!(store.open("deck.pptx"), Err(DeckError::Document(_))));
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let store = TemplateStore::new("/definitely/not/a/template/dir");
        assert!(matches!(store.list(), Err(DeckError::Io(_))));
    }
}
