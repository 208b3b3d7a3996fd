//! Tab completion for the shell.
//!
//! Each media command registers its completion sources in a different style:
//! `video` tags sources per subcommand path, `media` uses one flat lookup for
//! every depth, and `library` mirrors the subcommand tree so that `movie_id`
//! completes unowned movies under `add` and owned ones under `remove`.

use clap::Command;

use super::commands::CommandParser;
use crate::catalog::DIRECTORS;
use crate::completion::{
    filter_library, filter_prefix, tokenize_for_completion, ArgCompleter, CompletionRequest,
    CompletionSource, CompletionTable,
};
use crate::library::{MediaStore, SharedStore};

/// Completer for REPL input, reading catalogue and library through a
/// [`SharedStore`] so it always sees the session's latest state.
#[derive(Debug)]
pub struct ShellCompleter {
    command: Command,
    table: CompletionTable,
    store: SharedStore,
}

impl ShellCompleter {
    /// Create a completer over `store`.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        let mut command = CommandParser::command();
        command.build();
        Self {
            command,
            table: registry(),
            store,
        }
    }

    /// Candidates for the last word of `input`, unquoted.
    #[must_use]
    pub fn complete(&self, input: &str) -> Vec<String> {
        let partial = tokenize_for_completion(input);
        let store = self.store.read();
        ArgCompleter::new(&self.command, &self.table).complete(
            &partial.tokens,
            &partial.word,
            &store,
        )
    }
}

/// Completion sources for every command of the shell.
#[must_use]
pub fn registry() -> CompletionTable {
    CompletionTable::new()
        .with_subcommand("video", video_table())
        .with_subcommand("media", media_table())
        .with_subcommand("library", library_table())
        .with_subcommand(
            "help",
            CompletionTable::new().with_choice("topic", CompletionSource::custom(help_topics)),
        )
}

fn actors(store: &MediaStore) -> Vec<String> {
    store.catalog.actors()
}

fn movie_ids(store: &MediaStore) -> Vec<String> {
    store.catalog.movie_ids()
}

fn video_table() -> CompletionTable {
    CompletionTable::new()
        .tag(&["movies", "list"], "director", CompletionSource::fixed(DIRECTORS))
        .tag(&["movies", "list"], "actor", CompletionSource::Query(actors))
        .tag(&["movies", "add"], "director", CompletionSource::fixed(DIRECTORS))
        .tag(&["movies", "add"], "actor", CompletionSource::Query(actors))
        .tag(&["movies", "delete"], "movie_id", CompletionSource::Query(movie_ids))
}

fn media_table() -> CompletionTable {
    CompletionTable::flat([
        ("actor", CompletionSource::Query(actors)),
        ("director", CompletionSource::fixed(DIRECTORS)),
        ("movie_id", CompletionSource::Query(movie_ids)),
    ])
}

fn library_table() -> CompletionTable {
    let movie = CompletionTable::new()
        .with_subcommand(
            "add",
            CompletionTable::new().with_choice(
                "movie_id",
                CompletionSource::Query(|store| store.library.movies_not_owned(&store.catalog)),
            ),
        )
        .with_subcommand(
            "remove",
            CompletionTable::new().with_choice(
                "movie_id",
                CompletionSource::Query(|store| store.library.owned_movie_ids()),
            ),
        );

    let show = CompletionTable::new()
        .with_subcommand(
            "add",
            CompletionTable::new()
                .with_choice("show_id", CompletionSource::custom(shows_with_missing_episodes))
                .with_choice("episode_id", CompletionSource::custom(|req| episodes(req, false))),
        )
        .with_subcommand(
            "remove",
            CompletionTable::new()
                .with_choice(
                    "show_id",
                    CompletionSource::Query(|store| store.library.shows().keys().cloned().collect()),
                )
                .with_choice("episode_id", CompletionSource::custom(|req| episodes(req, true))),
        );

    CompletionTable::new()
        .with_subcommand("movie", movie)
        .with_subcommand("show", show)
}

/// Catalogue shows that still have episodes the user does not own.
fn shows_with_missing_episodes(request: &CompletionRequest<'_>) -> Vec<String> {
    let store = request.store;
    let complete: Vec<String> = store
        .catalog
        .shows
        .iter()
        .filter(|show| {
            let owned = store.library.owned_episodes(&show.id);
            show.episodes().all(|ep| owned.contains(ep))
        })
        .map(|show| show.id.clone())
        .collect();
    filter_library(request.text, &store.catalog.show_ids(), &complete)
}

/// Episodes of the show named by the first positional: owned ones when
/// `owned`, otherwise the ones still missing from the library.
fn episodes(request: &CompletionRequest<'_>, owned: bool) -> Vec<String> {
    let Some(show_id) = request.positionals.first() else {
        return Vec::new();
    };
    let store = request.store;
    let in_library = store.library.owned_episodes(show_id);
    if owned {
        return filter_prefix(request.text, in_library.iter().cloned());
    }

    let all: Vec<String> = store
        .catalog
        .show(show_id)
        .map(|show| show.episodes().cloned().collect())
        .unwrap_or_default();
    filter_library(request.text, &all, in_library)
}

/// Command paths for `help`, one level per word.
fn help_topics(request: &CompletionRequest<'_>) -> Vec<String> {
    let root = CommandParser::command();
    let mut current = &root;
    for name in request.positionals {
        match current.find_subcommand(name) {
            Some(sub) => current = sub,
            None => return Vec::new(),
        }
    }
    filter_prefix(
        request.text,
        current
            .get_subcommands()
            .map(|sub| sub.get_name().to_string()),
    )
}

#[cfg(feature = "repl")]
use reedline::{Completer, Span, Suggestion};

#[cfg(feature = "repl")]
impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let input = line.get(..pos).unwrap_or(line);
        let partial = tokenize_for_completion(input);
        let span = Span::new(partial.word_start, pos);

        Self::complete(self, input)
            .into_iter()
            .map(|candidate| {
                let value = match partial.open_quote {
                    Some(q) => format!("{q}{candidate}{q}"),
                    None => crate::completion::quote_candidate(&candidate),
                };
                Suggestion {
                    value,
                    span,
                    append_whitespace: true,
                    ..Suggestion::default()
                }
            })
            .collect()
    }
}
