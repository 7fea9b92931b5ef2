//! Filesystem implementation of the `BookSource` trait.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use inkbound_core::error::LoadError;
use inkbound_core::source::BookSource;

/// Reads books from a content directory.
///
/// Locators are relative paths (`books/startmenu.json`). Absolute locators
/// and `..` segments are refused so a book cannot reach outside the root.
#[derive(Debug, Clone)]
pub struct FsBookSource {
    root: PathBuf,
}

impl FsBookSource {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The content directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `locator` under the root.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Fetch` if the locator escapes the root.
    pub fn resolve(&self, locator: &str) -> Result<PathBuf, LoadError> {
        resolve_under(&self.root, locator).ok_or_else(|| LoadError::Fetch {
            locator: locator.to_owned(),
            message: "locator must stay inside the content root".into(),
        })
    }
}

/// Joins `reference` onto `root`, or returns `None` if the reference is
/// absolute or climbs out with `..`.
#[must_use]
pub fn resolve_under(root: &Path, reference: &str) -> Option<PathBuf> {
    let relative = Path::new(reference);
    let contained = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    contained.then(|| root.join(relative))
}

#[async_trait]
impl BookSource for FsBookSource {
    async fn fetch(&self, locator: &str) -> Result<String, LoadError> {
        let path = self.resolve(locator)?;
        debug!(path = %path.display(), "reading book");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => LoadError::NotFound {
                    locator: locator.to_owned(),
                },
                _ => LoadError::Fetch {
                    locator: locator.to_owned(),
                    message: err.to_string(),
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_relative_locator() {
        let source = FsBookSource::new("/srv/inkbound");

        let path = source.resolve("books/./startmenu.json").unwrap();

        assert_eq!(path, Path::new("/srv/inkbound/books/./startmenu.json"));
    }

    #[test]
    fn test_resolve_refuses_parent_segments() {
        let source = FsBookSource::new("/srv/inkbound");

        let result = source.resolve("../etc/passwd");

        assert!(matches!(result, Err(LoadError::Fetch { .. })));
    }

    #[test]
    fn test_resolve_refuses_absolute_locators() {
        let source = FsBookSource::new("/srv/inkbound");

        assert!(source.resolve("/etc/passwd").is_err());
    }

    #[test]
    fn test_resolve_under_keeps_references_inside_root() {
        let root = Path::new("/srv/inkbound");

        assert_eq!(
            resolve_under(root, "img/title.png"),
            Some(PathBuf::from("/srv/inkbound/img/title.png"))
        );
        assert_eq!(resolve_under(root, "img/../../secret.png"), None);
        assert_eq!(resolve_under(root, "/etc/hosts"), None);
    }
}
