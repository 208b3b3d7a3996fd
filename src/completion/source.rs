//! Completion sources: where candidate values for an argument come from.

use std::fmt;
use std::sync::Arc;

use crate::library::MediaStore;

/// Everything a completion function can look at.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    /// Catalogue and library snapshot
    pub store: &'a MediaStore,
    /// Finished tokens on the line, command name first
    pub tokens: &'a [String],
    /// Positional values already given to the innermost subcommand
    pub positionals: &'a [String],
    /// Partial word under the cursor
    pub text: &'a str,
}

/// Custom completion function. Extra parameters are bound by capture.
pub type CustomCompleter = Arc<dyn Fn(&CompletionRequest<'_>) -> Vec<String> + Send + Sync>;

/// Supplies candidate strings for one argument.
#[derive(Clone)]
pub enum CompletionSource {
    /// Fixed collection, prefix-filtered by the completer
    Static(Vec<String>),
    /// Evaluated at completion time, prefix-filtered by the completer
    Query(fn(&MediaStore) -> Vec<String>),
    /// Sees the whole request and filters on its own
    Custom(CustomCompleter),
}

impl CompletionSource {
    /// Static source from string slices.
    #[must_use]
    pub fn fixed(values: &[&str]) -> Self {
        Self::Static(values.iter().map(|v| (*v).to_string()).collect())
    }

    /// Custom source from a closure.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&CompletionRequest<'_>) -> Vec<String> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Resolve candidates for a request.
    #[must_use]
    pub fn candidates(&self, request: &CompletionRequest<'_>) -> Vec<String> {
        match self {
            Self::Static(values) => filter_prefix(request.text, values.iter().cloned()),
            Self::Query(query) => filter_prefix(request.text, query(request.store)),
            Self::Custom(f) => f(request),
        }
    }
}

impl fmt::Debug for CompletionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(values) => f.debug_tuple("Static").field(values).finish(),
            Self::Query(_) => f.write_str("Query(..)"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Keep candidates that start with `text`.
pub fn filter_prefix(text: &str, candidates: impl IntoIterator<Item = String>) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|c| c.starts_with(text))
        .collect()
}

/// Candidates from `full` that are not in `exclude` and start with `text`.
#[must_use]
pub fn filter_library(text: &str, full: &[String], exclude: &[String]) -> Vec<String> {
    full.iter()
        .filter(|entry| !exclude.contains(entry) && entry.starts_with(text))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(store: &'a MediaStore, text: &'a str) -> CompletionRequest<'a> {
        CompletionRequest {
            store,
            tokens: &[],
            positionals: &[],
            text,
        }
    }

    #[test]
    fn test_static_source_filters_prefix() {
        let store = MediaStore::default();
        let source = CompletionSource::fixed(&["George Lucas", "Gareth Edwards", "Rian Johnson"]);
        assert_eq!(
            source.candidates(&request(&store, "G")),
            vec!["George Lucas", "Gareth Edwards"]
        );
    }

    #[test]
    fn test_query_source_reads_store() {
        let store = MediaStore::builtin();
        let source = CompletionSource::Query(|store| store.catalog.show_ids());
        assert_eq!(
            source.candidates(&request(&store, "SW_T")),
            vec!["SW_TCW"]
        );
    }

    #[test]
    fn test_custom_source_does_own_filtering() {
        let store = MediaStore::default();
        let source = CompletionSource::custom(|req| vec![format!("{}!", req.text)]);
        assert_eq!(source.candidates(&request(&store, "x")), vec!["x!"]);
    }

    #[test]
    fn test_filter_library_excludes() {
        let full = vec!["A1".to_string(), "A2".to_string(), "B1".to_string()];
        let exclude = vec!["A2".to_string()];
        assert_eq!(filter_library("A", &full, &exclude), vec!["A1"]);
        assert_eq!(filter_library("", &full, &[]).len(), 3);
    }

    #[test]
    fn test_debug_hides_functions() {
        let source = CompletionSource::Query(|_| Vec::new());
        assert_eq!(format!("{source:?}"), "Query(..)");
    }
}
