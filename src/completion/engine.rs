//! Subcommand-aware argument completer driven by a `clap::Command` tree.

use std::collections::HashSet;

use clap::{Arg, ArgAction, Command};

use super::source::{filter_prefix, CompletionRequest};
use super::table::CompletionTable;
use crate::library::MediaStore;

/// Walks the tokens of a line through a command tree and produces candidates
/// for the word under the cursor.
///
/// The command should be built (`Command::build`) so argument counts are
/// resolved; unbuilt arguments fall back to their action's default.
#[derive(Debug, Clone, Copy)]
pub struct ArgCompleter<'a> {
    root: &'a Command,
    table: &'a CompletionTable,
}

impl<'a> ArgCompleter<'a> {
    /// Create a completer for `root`, whose subcommands are the shell's
    /// commands, using `table` for argument sources.
    #[must_use]
    pub fn new(root: &'a Command, table: &'a CompletionTable) -> Self {
        Self { root, table }
    }

    /// Candidates for `text` given the finished `tokens` before it.
    ///
    /// Results are sorted and de-duplicated.
    #[must_use]
    pub fn complete(&self, tokens: &[String], text: &str, store: &MediaStore) -> Vec<String> {
        let mut walk = Walk::new(self.root, Some(self.table));
        for token in tokens {
            walk.step(token);
        }

        let request = CompletionRequest {
            store,
            tokens,
            positionals: &walk.positionals,
            text,
        };
        let mut candidates = walk.candidates(&request);
        candidates.sort();
        candidates.dedup();

        tracing::debug!(
            command = walk.command.get_name(),
            text,
            count = candidates.len(),
            "completed"
        );
        candidates
    }
}

/// Minimum and maximum number of values an argument consumes.
fn value_range(arg: &Arg) -> (usize, usize) {
    match arg.get_num_args() {
        Some(range) => (range.min_values(), range.max_values()),
        None if arg.get_action().takes_values() => (1, 1),
        None => (0, 0),
    }
}

fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

fn repeatable(arg: &Arg) -> bool {
    matches!(arg.get_action(), ArgAction::Append | ArgAction::Count)
}

struct Walk<'a> {
    command: &'a Command,
    table: Option<&'a CompletionTable>,
    pending: Option<(&'a Arg, Vec<String>)>,
    used_flags: HashSet<&'a str>,
    positionals: Vec<String>,
    positional_index: usize,
    current_values: Vec<String>,
    flags_ended: bool,
    stray: bool,
}

impl<'a> Walk<'a> {
    fn new(command: &'a Command, table: Option<&'a CompletionTable>) -> Self {
        Self {
            command,
            table,
            pending: None,
            used_flags: HashSet::new(),
            positionals: Vec::new(),
            positional_index: 0,
            current_values: Vec::new(),
            flags_ended: false,
            stray: false,
        }
    }

    fn step(&mut self, token: &str) {
        if self.stray {
            return;
        }
        if let Some((arg, mut values)) = self.pending.take() {
            let (min, max) = value_range(arg);
            if token == "--" {
                self.flags_ended = true;
                return;
            }
            if !(looks_like_flag(token) && values.len() >= min) {
                values.push(token.to_string());
                if values.len() < max {
                    self.pending = Some((arg, values));
                }
                return;
            }
        }

        if !self.flags_ended {
            if token == "--" {
                self.flags_ended = true;
                return;
            }
            if looks_like_flag(token) {
                self.enter_flag(token);
                return;
            }
        }

        if self.command.has_subcommands() {
            match self.command.find_subcommand(token) {
                Some(sub) => self.descend(sub),
                None => self.stray = true,
            }
            return;
        }

        self.push_positional(token);
    }

    fn enter_flag(&mut self, token: &str) {
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if token.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };

        let found = if let Some(long) = name.strip_prefix("--") {
            self.command.get_arguments().find(|a| {
                a.get_long() == Some(long)
                    || a.get_all_aliases()
                        .is_some_and(|aliases| aliases.contains(&long))
            })
        } else {
            let short = name.chars().nth(1);
            self.command
                .get_arguments()
                .find(|a| a.get_short().is_some() && a.get_short() == short)
        };

        let Some(arg) = found else {
            return;
        };
        self.used_flags.insert(arg.get_id().as_str());
        let (_, max) = value_range(arg);
        if max > 0 && inline_value.is_none() {
            self.pending = Some((arg, Vec::new()));
        }
    }

    fn descend(&mut self, sub: &'a Command) {
        self.table = self.table.and_then(|t| t.descend(sub.get_name()));
        self.command = sub;
        self.pending = None;
        self.used_flags.clear();
        self.positionals.clear();
        self.positional_index = 0;
        self.current_values.clear();
        self.flags_ended = false;
    }

    fn current_positional(&self) -> Option<&'a Arg> {
        self.command.get_positionals().nth(self.positional_index)
    }

    fn push_positional(&mut self, token: &str) {
        self.positionals.push(token.to_string());
        let Some(arg) = self.current_positional() else {
            return;
        };
        self.current_values.push(token.to_string());
        let (_, max) = value_range(arg);
        if self.current_values.len() >= max {
            self.positional_index += 1;
            self.current_values.clear();
        }
    }

    fn candidates(&self, request: &CompletionRequest<'_>) -> Vec<String> {
        let text = request.text;
        if self.stray {
            return Vec::new();
        }

        if let Some((arg, values)) = &self.pending {
            let (min, _) = value_range(arg);
            if looks_like_flag(text) && values.len() >= min {
                return self.flag_candidates(text);
            }
            return self.arg_candidates(arg, values, request);
        }

        if !self.flags_ended && text.starts_with('-') {
            return self.flag_candidates(text);
        }

        if self.command.has_subcommands() {
            return filter_prefix(
                text,
                self.command
                    .get_subcommands()
                    .filter(|s| !s.is_hide_set())
                    .map(|s| s.get_name().to_string()),
            );
        }

        match self.current_positional() {
            Some(arg) => self.arg_candidates(arg, &self.current_values, request),
            None => Vec::new(),
        }
    }

    fn flag_candidates(&self, text: &str) -> Vec<String> {
        let mut flags = Vec::new();
        for arg in self.command.get_arguments() {
            if arg.is_positional() || arg.is_hide_set() {
                continue;
            }
            if self.used_flags.contains(arg.get_id().as_str()) && !repeatable(arg) {
                continue;
            }
            if let Some(short) = arg.get_short() {
                flags.push(format!("-{short}"));
            }
            if let Some(long) = arg.get_long() {
                flags.push(format!("--{long}"));
            }
        }
        filter_prefix(text, flags)
    }

    fn arg_candidates(
        &self,
        arg: &Arg,
        already: &[String],
        request: &CompletionRequest<'_>,
    ) -> Vec<String> {
        let choices = arg.get_possible_values();
        let candidates = if choices.is_empty() {
            self.table
                .and_then(|t| t.source(arg.get_id().as_str()))
                .map(|source| source.candidates(request))
                .unwrap_or_default()
        } else {
            filter_prefix(
                request.text,
                choices
                    .iter()
                    .filter(|v| !v.is_hide_set())
                    .map(|v| v.get_name().to_string()),
            )
        };

        candidates
            .into_iter()
            .filter(|c| !already.contains(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::builder::PossibleValuesParser;

    use super::*;
    use crate::completion::CompletionSource;

    fn tree() -> Command {
        let mut root = Command::new("shell")
            .multicall(true)
            .disable_help_subcommand(true)
            .subcommand(
                Command::new("pick")
                    .arg(
                        Arg::new("color")
                            .short('c')
                            .long("color")
                            .value_parser(PossibleValuesParser::new(["red", "green", "blue"])),
                    )
                    .arg(
                        Arg::new("size")
                            .short('s')
                            .long("size")
                            .num_args(1..=2)
                            .action(ArgAction::Append),
                    )
                    .arg(Arg::new("open").long("open").num_args(1..))
                    .arg(Arg::new("quiet").short('q').long("quiet").action(ArgAction::SetTrue))
                    .arg(Arg::new("first").required(true))
                    .arg(Arg::new("rest").num_args(0..)),
            )
            .subcommand(
                Command::new("group")
                    .disable_help_subcommand(true)
                    .subcommand(Command::new("alpha"))
                    .subcommand(Command::new("beta"))
                    .subcommand(Command::new("hidden").hide(true)),
            );
        root.build();
        root
    }

    fn table() -> CompletionTable {
        CompletionTable::new().with_subcommand(
            "pick",
            CompletionTable::new()
                .with_choice("size", CompletionSource::fixed(&["1", "2", "10"]))
                .with_choice("open", CompletionSource::fixed(&["x", "y"]))
                .with_choice("first", CompletionSource::fixed(&["one", "two"]))
                .with_choice("rest", CompletionSource::fixed(&["r1", "r2", "r3"])),
        )
    }

    fn complete(line: &[&str], text: &str) -> Vec<String> {
        let root = tree();
        let table = table();
        let store = MediaStore::default();
        let tokens: Vec<String> = line.iter().map(|t| (*t).to_string()).collect();
        ArgCompleter::new(&root, &table).complete(&tokens, text, &store)
    }

    #[test]
    fn test_top_level_commands() {
        assert_eq!(complete(&[], ""), vec!["group", "pick"]);
        assert_eq!(complete(&[], "p"), vec!["pick"]);
    }

    #[test]
    fn test_subcommands_skip_hidden() {
        assert_eq!(complete(&["group"], ""), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_flags() {
        let flags = complete(&["pick"], "--");
        assert!(flags.contains(&"--color".to_string()));
        assert!(flags.contains(&"--quiet".to_string()));
        assert!(!flags.contains(&"-q".to_string()));
    }

    #[test]
    fn test_used_flag_not_offered_again() {
        let flags = complete(&["pick", "--quiet"], "-");
        assert!(!flags.contains(&"--quiet".to_string()));
        assert!(flags.contains(&"--color".to_string()));
    }

    #[test]
    fn test_append_flag_offered_again() {
        let flags = complete(&["pick", "-s", "1"], "-");
        assert!(flags.contains(&"--size".to_string()));
    }

    #[test]
    fn test_possible_values_win() {
        assert_eq!(complete(&["pick", "--color"], "g"), vec!["green"]);
    }

    #[test]
    fn test_range_flag_takes_second_value() {
        assert_eq!(complete(&["pick", "-s", "1"], ""), vec!["10", "2"]);
    }

    #[test]
    fn test_range_flag_stops_after_max() {
        // Two sizes consumed; next word is the first positional
        assert_eq!(complete(&["pick", "-s", "1", "2"], ""), vec!["one", "two"]);
    }

    #[test]
    fn test_open_ended_flag_keeps_consuming() {
        assert_eq!(complete(&["pick", "--open", "x", "y", "x"], ""), vec![] as Vec<String>);
        assert_eq!(complete(&["pick", "--open", "x"], ""), vec!["y"]);
    }

    #[test]
    fn test_double_dash_ends_open_flag() {
        assert_eq!(complete(&["pick", "--open", "x", "--"], ""), vec!["one", "two"]);
    }

    #[test]
    fn test_flag_after_satisfied_range() {
        let flags = complete(&["pick", "-s", "1"], "--c");
        assert_eq!(flags, vec!["--color"]);
    }

    #[test]
    fn test_positionals_in_order() {
        assert_eq!(complete(&["pick", "one"], "r"), vec!["r1", "r2", "r3"]);
        assert_eq!(complete(&["pick", "one", "r1"], ""), vec!["r2", "r3"]);
    }

    #[test]
    fn test_inline_flag_value_consumed() {
        assert_eq!(complete(&["pick", "--color=red"], ""), vec!["one", "two"]);
    }

    #[test]
    fn test_unknown_command_has_no_candidates() {
        assert!(complete(&["nope"], "").is_empty());
    }
}
