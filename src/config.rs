//! Shell configuration.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::library::{MediaStore, UserLibrary};
use crate::Result;

/// Default number of history entries kept on disk.
pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Settings for one shell run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// History file; `None` keeps history in memory only
    pub history_path: Option<PathBuf>,
    /// Maximum number of history entries
    pub history_size: usize,
    /// Colour the prompt
    pub color: bool,
    /// Catalogue JSON file replacing the built-in catalogue
    pub catalog_path: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history_path: Some(default_history_path()),
            history_size: DEFAULT_HISTORY_SIZE,
            color: true,
            catalog_path: None,
        }
    }
}

impl ShellConfig {
    /// Set the history file
    #[must_use]
    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Set the history size
    #[must_use]
    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    /// Enable/disable colour output
    #[must_use]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Load the catalogue from a JSON file
    #[must_use]
    pub fn with_catalog_path(mut self, path: Option<PathBuf>) -> Self {
        self.catalog_path = path;
        self
    }

    /// Build the store for this configuration.
    ///
    /// A custom catalogue starts with an empty library, since the built-in
    /// library refers to built-in ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalogue file cannot be read or parsed.
    pub fn load_store(&self) -> Result<MediaStore> {
        match &self.catalog_path {
            Some(path) => load_catalog_store(path),
            None => Ok(MediaStore::builtin()),
        }
    }
}

fn load_catalog_store(path: &Path) -> Result<MediaStore> {
    let catalog = Catalog::from_json_file(path)?;
    tracing::info!(
        path = %path.display(),
        movies = catalog.movies.len(),
        shows = catalog.shows.len(),
        "catalogue loaded"
    );
    Ok(MediaStore::new(catalog, UserLibrary::default()))
}

/// `$HOME/.marquee_history`, or the current directory when `HOME` is unset.
#[must_use]
pub fn default_history_path() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(".marquee_history")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShellConfig::default();
        assert_eq!(config.history_size, DEFAULT_HISTORY_SIZE);
        assert!(config.color);
        assert!(config.catalog_path.is_none());
        assert!(config
            .history_path
            .is_some_and(|p| p.ends_with(".marquee_history")));
    }

    #[test]
    fn test_builder_chain() {
        let config = ShellConfig::default()
            .with_history_path(None)
            .with_history_size(10)
            .with_color(false)
            .with_catalog_path(Some(PathBuf::from("c.json")));
        assert!(config.history_path.is_none());
        assert_eq!(config.history_size, 10);
        assert!(!config.color);
        assert_eq!(config.catalog_path, Some(PathBuf::from("c.json")));
    }

    #[test]
    fn test_load_builtin_store() {
        let store = ShellConfig::default().load_store().unwrap();
        assert_eq!(store, MediaStore::builtin());
    }

    #[test]
    fn test_load_catalog_file_starts_with_empty_library() {
        let json = Catalog::builtin().to_json().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let store = ShellConfig::default()
            .with_catalog_path(Some(file.path().to_path_buf()))
            .load_store()
            .unwrap();
        assert_eq!(store.catalog, Catalog::builtin());
        assert!(store.library.movies().is_empty());
    }

    #[test]
    fn test_load_missing_catalog_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShellConfig::default()
            .with_catalog_path(Some(dir.path().join("missing.json")))
            .load_store();
        assert!(result.is_err());
    }
}
