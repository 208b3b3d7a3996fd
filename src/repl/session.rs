//! REPL session state and command execution.

use std::fmt::Write as _;
use std::io::Write;

use super::commands::{
    CommandParser, LibraryMovieAction, LibraryShowAction, LibraryTarget, MediaRoot, MediaTarget,
    MovieAction, ReplCommand, ShowAction,
};
use crate::catalog::{render_movie, render_show, MediaKind, MovieFilter, NewMovie};
use crate::library::{Change, MediaStore, SharedStore};
use crate::suggest::{suggest, DurationConstraint};
use crate::{Error, Result};

/// Stateful REPL session.
///
/// Owns a handle to the store shared with the completer and the history of
/// accepted command lines.
#[derive(Debug, Default)]
pub struct ReplSession {
    store: SharedStore,
    history: Vec<String>,
}

impl ReplSession {
    /// Create a session over `store`.
    #[must_use]
    pub fn new(store: MediaStore) -> Self {
        Self::with_shared(SharedStore::new(store))
    }

    /// Create a session over a store that is also read elsewhere.
    #[must_use]
    pub fn with_shared(store: SharedStore) -> Self {
        Self {
            store,
            history: Vec::new(),
        }
    }

    /// Handle to the session's store.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Number of movies and shows in the catalogue.
    #[must_use]
    pub fn catalog_size(&self) -> (usize, usize) {
        let store = self.store.read();
        (store.catalog.movies.len(), store.catalog.shows.len())
    }

    /// Add a command line to history
    pub fn add_history(&mut self, command: &str) {
        self.history.push(command.to_string());
    }

    /// Get command history
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// History as a script that can be piped back into the shell.
    ///
    /// `history` commands themselves are left out.
    #[must_use]
    pub fn export_history(&self) -> String {
        let replayable: Vec<&String> = self
            .history
            .iter()
            .filter(|line| !is_history_command(line))
            .collect();

        let mut script = String::new();
        script.push_str("# marquee session export\n");
        let _ = writeln!(script, "# {} commands; replay with: marquee < FILE", replayable.len());
        for line in replayable {
            let _ = writeln!(script, "{line}");
        }
        script
    }

    /// Execute a command, writing output to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails or stdout cannot be written.
    pub fn execute(&mut self, cmd: ReplCommand) -> Result<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.execute_to(cmd, &mut lock)
    }

    /// Execute a command, writing output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails or `out` cannot be written.
    pub fn execute_to(&mut self, cmd: ReplCommand, out: &mut dyn Write) -> Result<()> {
        let text = match cmd {
            ReplCommand::Suggest { kind, constraints } => self.cmd_suggest(kind, &constraints),
            ReplCommand::Media { root, target } => self.cmd_media(root, target)?,
            ReplCommand::Library(target) => self.cmd_library(target)?,
            ReplCommand::History { export } => self.cmd_history(export),
            ReplCommand::Help { topic } => cmd_help(&topic)?,
            ReplCommand::Usage { text } => text,
            ReplCommand::Quit => String::new(), // Handled in main loop
        };
        out.write_all(text.as_bytes()).map_err(Error::io_no_path)?;
        out.flush().map_err(Error::io_no_path)
    }

    fn cmd_suggest(&self, kind: MediaKind, constraints: &[DurationConstraint]) -> String {
        let store = self.store.read();
        let found = suggest(&store, kind, constraints);
        tracing::debug!(%kind, constraints = constraints.len(), found = found.len(), "suggest");

        let mut out = String::new();
        let conditions: Vec<String> = constraints.iter().map(ToString::to_string).collect();
        if conditions.is_empty() {
            let _ = writeln!(out, "Suggested {kind}s:");
        } else {
            let _ = writeln!(out, "Suggested {kind}s ({}):", conditions.join(", "));
        }
        if found.is_empty() {
            out.push_str("  Nothing new fits.\n");
        }
        for item in found {
            match item.minutes {
                Some(minutes) => {
                    let _ = writeln!(out, "  {:<8} {} ({minutes} min)", item.id, item.title);
                }
                None => {
                    let _ = writeln!(out, "  {:<8} {} (runtime unknown)", item.id, item.title);
                }
            }
        }
        out
    }

    fn cmd_media(&mut self, root: MediaRoot, target: Option<MediaTarget>) -> Result<String> {
        let root_name = root.as_str();
        match target {
            None => help(&[root_name]),
            Some(MediaTarget::Movies(None)) => help(&[root_name, "movies"]),
            Some(MediaTarget::Shows(None)) => help(&[root_name, "shows"]),
            Some(MediaTarget::Movies(Some(action))) => self.cmd_movies(action),
            Some(MediaTarget::Shows(Some(ShowAction::List))) => Ok(self.list_shows()),
        }
    }

    fn cmd_movies(&mut self, action: MovieAction) -> Result<String> {
        match action {
            MovieAction::List(filter) => Ok(self.list_movies(&filter)),
            MovieAction::Add(movie) => self.add_movie(movie),
            MovieAction::Delete { ids } => self.delete_movies(&ids),
        }
    }

    fn list_movies(&self, filter: &MovieFilter) -> String {
        let store = self.store.read();
        let movies = store.catalog.filter_movies(filter);
        if movies.is_empty() {
            return "No movies match.\n".to_string();
        }
        movies.into_iter().map(render_movie).collect()
    }

    fn list_shows(&self) -> String {
        let store = self.store.read();
        if store.catalog.shows.is_empty() {
            return "No shows in the catalogue.\n".to_string();
        }
        store.catalog.shows.iter().map(render_show).collect()
    }

    fn add_movie(&mut self, movie: NewMovie) -> Result<String> {
        let title = movie.title.clone();
        let id = self.store.write().catalog.add_movie(movie)?;
        tracing::info!(%id, %title, "movie added to catalogue");
        Ok(format!("Added '{title}' as {id}\n"))
    }

    fn delete_movies(&mut self, ids: &[String]) -> Result<String> {
        let mut store = self.store.write();
        let removed = store.catalog.remove_movies(ids)?;
        store.library.forget_movies(ids);
        tracing::info!(count = removed.len(), "movies deleted from catalogue");

        let mut out = String::new();
        for movie in removed {
            let _ = writeln!(out, "Deleted {} ({})", movie.id, movie.title);
        }
        Ok(out)
    }

    fn cmd_library(&mut self, target: Option<LibraryTarget>) -> Result<String> {
        match target {
            None => help(&["library"]),
            Some(LibraryTarget::Movie(None)) => help(&["library", "movie"]),
            Some(LibraryTarget::Show(None)) => help(&["library", "show"]),
            Some(LibraryTarget::Movie(Some(action))) => self.library_movie(action),
            Some(LibraryTarget::Show(Some(action))) => self.library_show(action),
        }
    }

    fn library_movie(&mut self, action: LibraryMovieAction) -> Result<String> {
        let mut guard = self.store.write();
        let MediaStore { catalog, library } = &mut *guard;
        match action {
            LibraryMovieAction::Add { ids, borrowed } => {
                let change = library.add_movies(catalog, &ids, borrowed)?;
                let verb = if borrowed { "Borrowed" } else { "Added" };
                Ok(describe_change(&change, verb, "Already in library"))
            }
            LibraryMovieAction::Remove { ids } => {
                let change = library.remove_movies(&ids)?;
                Ok(describe_change(&change, "Removed", ""))
            }
            LibraryMovieAction::List => {
                if library.movies().is_empty() {
                    return Ok("No movies in your library.\n".to_string());
                }
                let mut out = String::new();
                for owned in library.movies() {
                    let title = catalog.movie(&owned.id).map_or("?", |m| m.title.as_str());
                    let marker = if owned.borrowed { "  (borrowed)" } else { "" };
                    let _ = writeln!(out, "{:<8} {title}{marker}", owned.id);
                }
                Ok(out)
            }
        }
    }

    fn library_show(&mut self, action: LibraryShowAction) -> Result<String> {
        let mut guard = self.store.write();
        let MediaStore { catalog, library } = &mut *guard;
        match action {
            LibraryShowAction::Add { show_id, episodes } => {
                let change = library.add_episodes(catalog, &show_id, &episodes)?;
                Ok(describe_change(
                    &change,
                    &format!("Added {show_id}"),
                    "Already in library",
                ))
            }
            LibraryShowAction::Remove { show_id, episodes } => {
                let change = library.remove_episodes(&show_id, &episodes)?;
                Ok(describe_change(&change, &format!("Removed {show_id}"), ""))
            }
            LibraryShowAction::List => {
                if library.shows().is_empty() {
                    return Ok("No shows in your library.\n".to_string());
                }
                let mut out = String::new();
                for (show_id, episodes) in library.shows() {
                    let title = catalog.show(show_id).map_or("?", |s| s.title.as_str());
                    let _ = writeln!(out, "{show_id:<8} {title}");
                    let _ = writeln!(out, "    {}", episodes.join(" "));
                }
                Ok(out)
            }
        }
    }

    fn cmd_history(&self, export: bool) -> String {
        if export {
            return self.export_history();
        }
        let mut out = String::new();
        for (i, cmd) in self.history.iter().enumerate() {
            let _ = writeln!(out, "{:4}  {}", i + 1, cmd);
        }
        out
    }
}

fn is_history_command(line: &str) -> bool {
    line.split_whitespace().next() == Some("history")
}

fn describe_change(change: &Change, verb: &str, skipped_label: &str) -> String {
    let mut out = String::new();
    if !change.applied.is_empty() {
        let _ = writeln!(out, "{verb}: {}", change.applied.join(", "));
    }
    if !change.skipped.is_empty() {
        let _ = writeln!(out, "{skipped_label}: {}", change.skipped.join(", "));
    }
    if out.is_empty() {
        out.push_str("Nothing changed.\n");
    }
    out
}

fn help(path: &[&str]) -> Result<String> {
    let path: Vec<String> = path.iter().map(|p| (*p).to_string()).collect();
    CommandParser::help_for(&path)
}

/// Commands that belong to the shell itself rather than the media library.
const BUILTIN_COMMANDS: &[&str] = &["history", "help", "quit"];

fn cmd_help(topic: &[String]) -> Result<String> {
    if !topic.is_empty() {
        return CommandParser::help_for(topic);
    }

    let root = CommandParser::command();
    let (builtins, media): (Vec<_>, Vec<_>) = root
        .get_subcommands()
        .partition(|cmd| BUILTIN_COMMANDS.contains(&cmd.get_name()));

    let mut out = String::new();
    for (heading, commands) in [("Completion commands", media), ("Shell commands", builtins)] {
        let _ = writeln!(out, "{heading}:");
        for cmd in commands {
            let about = cmd.get_about().map(ToString::to_string).unwrap_or_default();
            let _ = writeln!(out, "  {:<16}{about}", cmd.get_name());
        }
        out.push('\n');
    }
    out.push_str("Type 'help <command>' or '<command> -h' for details.\n");
    Ok(out)
}
