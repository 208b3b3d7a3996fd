//! Shell prompt showing catalogue size.
//!
//! ```text
//! marquee [10 movies, 3 shows] >
//! ```

#[cfg(feature = "repl")]
use std::borrow::Cow;

#[cfg(feature = "repl")]
use nu_ansi_term::{Color, Style};
#[cfg(feature = "repl")]
use reedline::{Prompt, PromptEditMode, PromptHistorySearch};

use crate::library::SharedStore;

/// Prompt that reads the shared store each time it is drawn.
#[derive(Debug, Clone)]
pub struct ShellPrompt {
    store: SharedStore,
    #[cfg_attr(not(feature = "repl"), allow(dead_code))]
    color: bool,
}

impl ShellPrompt {
    /// Create a prompt over `store`.
    #[must_use]
    pub fn new(store: SharedStore, color: bool) -> Self {
        Self { store, color }
    }

    /// Plain prompt text.
    #[must_use]
    pub fn render(movies: usize, shows: usize) -> String {
        format!("marquee [{}, {}] > ", plural(movies, "movie"), plural(shows, "show"))
    }

    /// Prompt text with terminal colours.
    #[cfg(feature = "repl")]
    #[must_use]
    pub fn render_colored(movies: usize, shows: usize) -> String {
        format!(
            "{} [{}, {}] > ",
            Style::new().bold().paint("marquee"),
            Color::Cyan.paint(plural(movies, "movie")),
            Color::Magenta.paint(plural(shows, "show")),
        )
    }

    /// Prompt text for the store's current state.
    #[must_use]
    pub fn current(&self) -> String {
        let (movies, shows) = {
            let store = self.store.read();
            (store.catalog.movies.len(), store.catalog.shows.len())
        };
        #[cfg(feature = "repl")]
        if self.color {
            return Self::render_colored(movies, shows);
        }
        Self::render(movies, shows)
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(feature = "repl")]
impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(self.current())
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("(search) ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::MediaStore;

    #[test]
    fn test_render_plain() {
        assert_eq!(ShellPrompt::render(10, 3), "marquee [10 movies, 3 shows] > ");
    }

    #[test]
    fn test_render_singular() {
        assert_eq!(ShellPrompt::render(1, 0), "marquee [1 movie, 0 shows] > ");
    }

    #[test]
    fn test_prompt_follows_store() {
        let store = SharedStore::new(MediaStore::builtin());
        let prompt = ShellPrompt::new(store.clone(), false);
        assert_eq!(prompt.current(), "marquee [10 movies, 3 shows] > ");

        store.write().catalog.shows.clear();
        assert_eq!(prompt.current(), "marquee [10 movies, 0 shows] > ");
    }

    #[cfg(feature = "repl")]
    #[test]
    fn test_render_colored_keeps_text() {
        let colored = ShellPrompt::render_colored(10, 3);
        assert!(colored.contains("marquee"));
        assert!(colored.contains("10 movies"));
        assert!(colored.contains('\u{1b}'));
    }
}
