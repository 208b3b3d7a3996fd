//! Completion tables: which source completes which argument, per subcommand.

use std::collections::HashMap;

use super::source::CompletionSource;

/// Maps argument ids to completion sources, with nested tables for
/// subcommands.
///
/// A table built with [`CompletionTable::flat`] applies to every subcommand
/// below it that has no table of its own.
#[derive(Debug, Clone, Default)]
pub struct CompletionTable {
    choices: HashMap<String, CompletionSource>,
    subcommands: HashMap<String, CompletionTable>,
    inherit: bool,
}

impl CompletionTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One lookup applied at every depth. Argument ids must be unique across
    /// the whole subcommand tree or they will complete identically.
    #[must_use]
    pub fn flat<'a>(choices: impl IntoIterator<Item = (&'a str, CompletionSource)>) -> Self {
        Self {
            choices: choices
                .into_iter()
                .map(|(arg, source)| (arg.to_string(), source))
                .collect(),
            subcommands: HashMap::new(),
            inherit: true,
        }
    }

    /// Bind a source to an argument of this command.
    #[must_use]
    pub fn with_choice(mut self, arg: &str, source: CompletionSource) -> Self {
        self.choices.insert(arg.to_string(), source);
        self
    }

    /// Attach the table for a subcommand.
    #[must_use]
    pub fn with_subcommand(mut self, name: &str, table: CompletionTable) -> Self {
        self.subcommands.insert(name.to_string(), table);
        self
    }

    /// Bind a source to an argument of the subcommand at `path`, creating
    /// intermediate tables as needed.
    #[must_use]
    pub fn tag(mut self, path: &[&str], arg: &str, source: CompletionSource) -> Self {
        let mut table = &mut self;
        for name in path {
            table = table.subcommands.entry((*name).to_string()).or_default();
        }
        table.choices.insert(arg.to_string(), source);
        self
    }

    /// Source bound to `arg` on this command.
    #[must_use]
    pub fn source(&self, arg: &str) -> Option<&CompletionSource> {
        self.choices.get(arg)
    }

    /// Table to use inside subcommand `name`.
    #[must_use]
    pub fn descend(&self, name: &str) -> Option<&CompletionTable> {
        match self.subcommands.get(name) {
            Some(table) => Some(table),
            None if self.inherit => Some(self),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(source: Option<&CompletionSource>) -> Vec<String> {
        match source {
            Some(CompletionSource::Static(values)) => values.clone(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_tag_builds_nested_path() {
        let table = CompletionTable::new()
            .tag(&["movies", "list"], "director", CompletionSource::fixed(&["A"]))
            .tag(&["movies", "add"], "director", CompletionSource::fixed(&["B"]));

        let movies = table.descend("movies").unwrap();
        assert!(movies.source("director").is_none());
        assert_eq!(names(movies.descend("list").unwrap().source("director")), vec!["A"]);
        assert_eq!(names(movies.descend("add").unwrap().source("director")), vec!["B"]);
        assert!(movies.descend("delete").is_none());
    }

    #[test]
    fn test_flat_table_applies_at_every_depth() {
        let table = CompletionTable::flat([("actor", CompletionSource::fixed(&["X"]))]);
        let deep = table
            .descend("movies")
            .and_then(|t| t.descend("list"))
            .unwrap();
        assert_eq!(names(deep.source("actor")), vec!["X"]);
    }

    #[test]
    fn test_nested_tables_differ_per_subcommand() {
        let table = CompletionTable::new()
            .with_subcommand(
                "add",
                CompletionTable::new().with_choice("movie_id", CompletionSource::fixed(&["NEW"])),
            )
            .with_subcommand(
                "remove",
                CompletionTable::new().with_choice("movie_id", CompletionSource::fixed(&["OLD"])),
            );
        assert_eq!(names(table.descend("add").unwrap().source("movie_id")), vec!["NEW"]);
        assert_eq!(names(table.descend("remove").unwrap().source("movie_id")), vec!["OLD"]);
    }

    #[test]
    fn test_child_table_overrides_flat_parent() {
        let table = CompletionTable::flat([("actor", CompletionSource::fixed(&["X"]))])
            .with_subcommand("shows", CompletionTable::new());
        assert!(table.descend("shows").unwrap().source("actor").is_none());
    }
}
