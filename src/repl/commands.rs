//! REPL command tree and parser.
//!
//! The grammar is declared once as a `clap::Command` tree. Parsing, help
//! output and tab completion all read the same tree.

use clap::builder::{PossibleValuesParser, ValueRange};
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};

use crate::catalog::{MediaKind, MovieFilter, NewMovie, MOVIE_RATINGS};
use crate::completion::split_line;
use crate::suggest::DurationConstraint;
use crate::{Error, Result};

const DURATION_HELP: &str = "Duration constraint in minutes.\n\
    \tsingle value - maximum duration\n\
    \t[a, b] - duration range";

/// Which of the two equivalent media commands was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRoot {
    /// `video`
    Video,
    /// `media`
    Media,
}

impl MediaRoot {
    /// Command name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Media => "media",
        }
    }
}

/// `video|media movies <action>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieAction {
    /// List catalogue movies matching a filter
    List(MovieFilter),
    /// Add a movie to the catalogue
    Add(NewMovie),
    /// Delete movies from the catalogue
    Delete {
        /// Movie ids
        ids: Vec<String>,
    },
}

/// `video|media shows <action>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowAction {
    /// List catalogue shows
    List,
}

/// Second level of `video|media`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaTarget {
    /// `movies`, with its action if one was given
    Movies(Option<MovieAction>),
    /// `shows`, with its action if one was given
    Shows(Option<ShowAction>),
}

/// `library movie <action>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryMovieAction {
    /// Add movies to the library
    Add {
        /// Movie ids
        ids: Vec<String>,
        /// Mark as borrowed
        borrowed: bool,
    },
    /// Remove movies from the library
    Remove {
        /// Movie ids
        ids: Vec<String>,
    },
    /// List owned movies
    List,
}

/// `library show <action>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryShowAction {
    /// Add episodes (all when none are named)
    Add {
        /// Show id
        show_id: String,
        /// Episode ids
        episodes: Vec<String>,
    },
    /// Remove episodes (the whole show when none are named)
    Remove {
        /// Show id
        show_id: String,
        /// Episode ids
        episodes: Vec<String>,
    },
    /// List owned shows
    List,
}

/// Second level of `library`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryTarget {
    /// `library movie`
    Movie(Option<LibraryMovieAction>),
    /// `library show`
    Show(Option<LibraryShowAction>),
}

/// A parsed REPL command.
///
/// `None` in a nested position means the user stopped before choosing a
/// subcommand; the session answers with help for that path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// `suggest`, `hybrid_suggest` or `orig_suggest`
    Suggest {
        /// Kind of media to suggest
        kind: MediaKind,
        /// Every constraint must hold
        constraints: Vec<DurationConstraint>,
    },
    /// `video` or `media`
    Media {
        /// Which spelling was used
        root: MediaRoot,
        /// Chosen media type and action
        target: Option<MediaTarget>,
    },
    /// `library`
    Library(Option<LibraryTarget>),
    /// Show or export command history
    History {
        /// Export as a replayable script
        export: bool,
    },
    /// Help overview or help for a command path
    Help {
        /// Command path, e.g. `["media", "movies"]`
        topic: Vec<String>,
    },
    /// Help text produced by `-h`/`--help`
    Usage {
        /// Rendered help
        text: String,
    },
    /// Exit the REPL
    Quit,
}

/// Parser for REPL commands.
pub struct CommandParser;

impl CommandParser {
    /// Parse a command line into a [`ReplCommand`].
    ///
    /// # Errors
    ///
    /// Returns an error if the line is empty, has an unterminated quote, is
    /// rejected by the command grammar, or carries invalid values.
    pub fn parse(input: &str) -> Result<ReplCommand> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::parse("Empty command"));
        }

        let tokens = split_line(input)?;
        let matches = match Self::command().try_get_matches_from(&tokens) {
            Ok(matches) => matches,
            Err(e) => {
                return match e.kind() {
                    ErrorKind::DisplayHelp
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        Ok(ReplCommand::Usage {
                            text: e.render().to_string(),
                        })
                    }
                    _ => Err(Error::usage(e.render().to_string().trim_end())),
                };
            }
        };

        let command = Self::from_matches(&matches)?;
        tracing::debug!(?command, "parsed");
        Ok(command)
    }

    /// The full command tree.
    #[must_use]
    pub fn command() -> Command {
        Command::new("marquee")
            .multicall(true)
            .disable_help_subcommand(true)
            .subcommand_required(true)
            .subcommand_value_name("COMMAND")
            .subcommand_help_heading("Commands")
            .color(ColorChoice::Never)
            .subcommand(suggest_command(
                "suggest",
                "Suggest something to watch",
                ValueRange::new(1..=2),
                true,
            ))
            .subcommand(suggest_command(
                "hybrid_suggest",
                "Suggest something to watch (classic help layout)",
                ValueRange::new(1..=2),
                false,
            ))
            .subcommand(suggest_command(
                "orig_suggest",
                "Suggest something to watch (open-ended --duration)",
                ValueRange::new(1..),
                false,
            ))
            .subcommand(media_command(
                "video",
                "Video management with completion sources tagged per argument",
            ))
            .subcommand(media_command(
                "media",
                "Media management with one completion lookup for all levels",
            ))
            .subcommand(library_command())
            .subcommand(
                Command::new("history")
                    .about("Show command history")
                    .arg(
                        Arg::new("export")
                            .short('e')
                            .long("export")
                            .action(ArgAction::SetTrue)
                            .help("Print history as a replayable script"),
                    ),
            )
            .subcommand(
                Command::new("help")
                    .about("Show help for a command")
                    .alias("?")
                    .disable_help_flag(true)
                    .arg(
                        Arg::new("topic")
                            .num_args(0..)
                            .value_name("COMMAND")
                            .help("Command path, e.g. 'media movies'"),
                    ),
            )
            .subcommand(
                Command::new("quit")
                    .about("Exit the shell")
                    .aliases(["exit", "q"]),
            )
    }

    /// Names of the top-level commands.
    #[must_use]
    pub fn command_names() -> Vec<String> {
        Self::command()
            .get_subcommands()
            .map(|c| c.get_name().to_string())
            .collect()
    }

    /// Render help for a command path such as `["library", "movie"]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not name a command.
    pub fn help_for(path: &[String]) -> Result<String> {
        let not_found = || Error::not_found(format!("Help topic '{}'", path.join(" ")));
        let (first, rest) = path.split_first().ok_or_else(not_found)?;

        // Built from the multicall root, top-level usage lines get an empty
        // bin name prefix, so render from the top-level command instead.
        let mut top = Self::command()
            .find_subcommand(first)
            .ok_or_else(not_found)?
            .clone()
            .color(ColorChoice::Never);
        top.build();

        let mut current = &mut top;
        for name in rest {
            current = current.find_subcommand_mut(name).ok_or_else(not_found)?;
        }
        Ok(current.render_help().to_string())
    }

    fn from_matches(matches: &ArgMatches) -> Result<ReplCommand> {
        match matches.subcommand() {
            Some(("suggest" | "hybrid_suggest" | "orig_suggest", sub)) => Self::parse_suggest(sub),
            Some(("video", sub)) => Ok(ReplCommand::Media {
                root: MediaRoot::Video,
                target: Self::parse_media_target(sub),
            }),
            Some(("media", sub)) => Ok(ReplCommand::Media {
                root: MediaRoot::Media,
                target: Self::parse_media_target(sub),
            }),
            Some(("library", sub)) => Ok(ReplCommand::Library(Self::parse_library_target(sub))),
            Some(("history", sub)) => Ok(ReplCommand::History {
                export: sub.get_flag("export"),
            }),
            Some(("help", sub)) => Ok(ReplCommand::Help {
                topic: strings(sub, "topic"),
            }),
            Some(("quit", _)) => Ok(ReplCommand::Quit),
            Some((other, _)) => Err(Error::parse(format!("Unknown command: '{other}'"))),
            None => Err(Error::parse("Empty command")),
        }
    }

    fn parse_suggest(matches: &ArgMatches) -> Result<ReplCommand> {
        let kind = matches
            .get_one::<String>("type")
            .ok_or_else(|| Error::usage("--type is required"))?
            .parse()?;

        let constraints = match matches.get_occurrences::<u32>("duration") {
            Some(occurrences) => occurrences
                .map(|values| DurationConstraint::from_values(&values.copied().collect::<Vec<_>>()))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(ReplCommand::Suggest { kind, constraints })
    }

    fn parse_media_target(matches: &ArgMatches) -> Option<MediaTarget> {
        match matches.subcommand()? {
            ("movies", sub) => Some(MediaTarget::Movies(Self::parse_movie_action(sub))),
            ("shows", sub) => Some(MediaTarget::Shows(
                sub.subcommand_name().map(|_| ShowAction::List),
            )),
            _ => None,
        }
    }

    fn parse_movie_action(matches: &ArgMatches) -> Option<MovieAction> {
        match matches.subcommand()? {
            ("list", sub) => Some(MovieAction::List(MovieFilter {
                title: sub.get_one::<String>("title").cloned(),
                ratings: strings(sub, "rating"),
                director: sub.get_one::<String>("director").cloned(),
                actors: strings(sub, "actor"),
            })),
            ("add", sub) => Some(MovieAction::Add(NewMovie {
                title: sub.get_one::<String>("title").cloned().unwrap_or_default(),
                rating: sub.get_one::<String>("rating").cloned().unwrap_or_default(),
                directors: strings(sub, "director"),
                actors: strings(sub, "actor"),
                runtime: sub.get_one::<u32>("runtime").copied(),
            })),
            ("delete", sub) => Some(MovieAction::Delete {
                ids: strings(sub, "movie_id"),
            }),
            _ => None,
        }
    }

    fn parse_library_target(matches: &ArgMatches) -> Option<LibraryTarget> {
        match matches.subcommand()? {
            ("movie", sub) => Some(LibraryTarget::Movie(match sub.subcommand() {
                Some(("add", add)) => Some(LibraryMovieAction::Add {
                    ids: strings(add, "movie_id"),
                    borrowed: add.get_flag("borrowed"),
                }),
                Some(("remove", remove)) => Some(LibraryMovieAction::Remove {
                    ids: strings(remove, "movie_id"),
                }),
                Some(("list", _)) => Some(LibraryMovieAction::List),
                _ => None,
            })),
            ("show", sub) => Some(LibraryTarget::Show(match sub.subcommand() {
                Some(("add", add)) => Some(LibraryShowAction::Add {
                    show_id: add.get_one::<String>("show_id").cloned().unwrap_or_default(),
                    episodes: strings(add, "episode_id"),
                }),
                Some(("remove", remove)) => Some(LibraryShowAction::Remove {
                    show_id: remove.get_one::<String>("show_id").cloned().unwrap_or_default(),
                    episodes: strings(remove, "episode_id"),
                }),
                Some(("list", _)) => Some(LibraryShowAction::List),
                _ => None,
            })),
            _ => None,
        }
    }
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// A command that only groups subcommands.
fn group(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .disable_help_subcommand(true)
}

fn suggest_command(
    name: &'static str,
    about: &'static str,
    durations: ValueRange,
    group_required: bool,
) -> Command {
    let kind = Arg::new("type")
        .short('t')
        .long("type")
        .required(true)
        .value_parser(PossibleValuesParser::new(MediaKind::NAMES.iter().copied()))
        .help("Kind of media to suggest");
    let kind = if group_required {
        kind.help_heading("Required Arguments")
    } else {
        kind
    };

    Command::new(name).about(about).arg(kind).arg(
        Arg::new("duration")
            .short('d')
            .long("duration")
            .num_args(durations)
            .action(ArgAction::Append)
            .value_parser(value_parser!(u32))
            .value_name("MINUTES")
            .help(DURATION_HELP),
    )
}

fn rating_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(MOVIE_RATINGS.iter().copied())
}

fn media_command(name: &'static str, about: &'static str) -> Command {
    let list = Command::new("list")
        .about("List movies")
        .arg(Arg::new("title").short('t').long("title").help("Title Filter"))
        .arg(
            Arg::new("rating")
                .short('r')
                .long("rating")
                .num_args(1..)
                .value_parser(rating_parser())
                .help("Rating Filter"),
        )
        .arg(
            Arg::new("director")
                .short('d')
                .long("director")
                .help("Director Filter"),
        )
        .arg(
            Arg::new("actor")
                .short('a')
                .long("actor")
                .action(ArgAction::Append)
                .help("Actor Filter"),
        );

    let add = Command::new("add")
        .about("Add a movie to the catalogue")
        .arg(Arg::new("title").required(true).help("Movie Title"))
        .arg(
            Arg::new("rating")
                .required(true)
                .value_parser(rating_parser())
                .help("Movie Rating"),
        )
        .arg(
            Arg::new("director")
                .short('d')
                .long("director")
                .num_args(1..=2)
                .required(true)
                .help("Director"),
        )
        .arg(
            Arg::new("runtime")
                .long("runtime")
                .value_name("MINUTES")
                .value_parser(value_parser!(u32))
                .help("Runtime in minutes"),
        )
        .arg(Arg::new("actor").num_args(0..).help("Actors"));

    let delete = Command::new("delete").about("Delete movies from the catalogue").arg(
        Arg::new("movie_id")
            .required(true)
            .num_args(1..)
            .help("IDs of movies to delete"),
    );

    group(name, about)
        .subcommand_help_heading("Media Types")
        .subcommand(
            group("movies", "Manage movies")
                .subcommand_help_heading("Commands")
                .subcommand(list)
                .subcommand(add)
                .subcommand(delete),
        )
        .subcommand(
            group("shows", "Manage shows")
                .subcommand_help_heading("Commands")
                .subcommand(Command::new("list").about("List shows")),
        )
}

fn library_command() -> Command {
    let movie = group("movie", "Movies in your library")
        .subcommand_help_heading("Command")
        .subcommand(
            Command::new("add")
                .about("Add movies to your library")
                .arg(
                    Arg::new("movie_id")
                        .required(true)
                        .num_args(1..)
                        .help("ID of movie to add"),
                )
                .arg(
                    Arg::new("borrowed")
                        .short('b')
                        .long("borrowed")
                        .action(ArgAction::SetTrue)
                        .help("Mark as borrowed"),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove movies from your library")
                .arg(
                    Arg::new("movie_id")
                        .required(true)
                        .num_args(1..)
                        .help("ID of movie to remove"),
                ),
        )
        .subcommand(Command::new("list").about("List movies in your library"));

    let show = group("show", "Shows in your library")
        .subcommand_help_heading("Command")
        .subcommand(
            Command::new("add")
                .about("Add show episodes to your library")
                .arg(Arg::new("show_id").required(true).help("Show ID to add"))
                .arg(
                    Arg::new("episode_id")
                        .num_args(0..)
                        .help("Episode IDs to add (all when omitted)"),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove show episodes from your library")
                .arg(Arg::new("show_id").required(true).help("Show ID to remove"))
                .arg(
                    Arg::new("episode_id")
                        .num_args(0..)
                        .help("Episode IDs to remove (whole show when omitted)"),
                ),
        )
        .subcommand(Command::new("list").about("List shows in your library"));

    group("library", "Manage your personal library")
        .subcommand_help_heading("Media Types")
        .subcommand(movie)
        .subcommand(show)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Basics
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_command_tree_is_valid() {
        CommandParser::command().debug_assert();
    }

    #[test]
    fn test_parse_empty() {
        assert!(CommandParser::parse("").is_err());
        assert!(CommandParser::parse("   ").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = CommandParser::parse("frobnicate").unwrap_err();
        assert!(matches!(err, Error::Usage { .. }));
    }

    #[test]
    fn test_parse_quit_aliases() {
        for line in ["quit", "exit", "q"] {
            assert_eq!(CommandParser::parse(line).unwrap(), ReplCommand::Quit);
        }
    }

    #[test]
    fn test_parse_help_topic() {
        assert_eq!(
            CommandParser::parse("help media movies").unwrap(),
            ReplCommand::Help {
                topic: ids(&["media", "movies"])
            }
        );
        assert_eq!(
            CommandParser::parse("?").unwrap(),
            ReplCommand::Help { topic: vec![] }
        );
    }

    #[test]
    fn test_parse_history_export() {
        assert_eq!(
            CommandParser::parse("history -e").unwrap(),
            ReplCommand::History { export: true }
        );
    }

    #[test]
    fn test_dash_h_renders_usage() {
        match CommandParser::parse("library movie add -h").unwrap() {
            ReplCommand::Usage { text } => {
                assert!(text.contains("movie_id"));
                assert!(text.contains("--borrowed"));
            }
            other => panic!("expected usage, got {other:?}"),
        }
    }

    #[test]
    fn test_command_names() {
        let names = CommandParser::command_names();
        for name in ["suggest", "hybrid_suggest", "orig_suggest", "video", "media", "library"] {
            assert!(names.contains(&name.to_string()), "missing {name}");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // suggest
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_suggest_requires_type() {
        assert!(matches!(
            CommandParser::parse("suggest").unwrap_err(),
            Error::Usage { .. }
        ));
    }

    #[test]
    fn test_suggest_rejects_bad_type() {
        assert!(CommandParser::parse("suggest -t book").is_err());
    }

    #[test]
    fn test_suggest_durations() {
        assert_eq!(
            CommandParser::parse("suggest -t movie -d 120 -d 90 150").unwrap(),
            ReplCommand::Suggest {
                kind: MediaKind::Movie,
                constraints: vec![
                    DurationConstraint::Max(120),
                    DurationConstraint::Range(90, 150)
                ],
            }
        );
    }

    #[test]
    fn test_suggest_duration_takes_at_most_two() {
        assert!(CommandParser::parse("suggest -t show -d 1 2 3").is_err());
        assert!(CommandParser::parse("hybrid_suggest -t show -d 1 2 3").is_err());
    }

    #[test]
    fn test_orig_suggest_accepts_open_list_but_rejects_three() {
        let err = CommandParser::parse("orig_suggest -t show -d 1 2 3").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(CommandParser::parse("orig_suggest -t show -d 20 30").is_ok());
    }

    #[test]
    fn test_suggest_help_groups_required() {
        let help = CommandParser::help_for(&ids(&["suggest"])).unwrap();
        assert!(help.contains("Required Arguments"));
        let hybrid = CommandParser::help_for(&ids(&["hybrid_suggest"])).unwrap();
        assert!(!hybrid.contains("Required Arguments"));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // video / media
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_media_without_type() {
        assert_eq!(
            CommandParser::parse("video").unwrap(),
            ReplCommand::Media {
                root: MediaRoot::Video,
                target: None
            }
        );
    }

    #[test]
    fn test_media_movies_without_command() {
        assert_eq!(
            CommandParser::parse("media movies").unwrap(),
            ReplCommand::Media {
                root: MediaRoot::Media,
                target: Some(MediaTarget::Movies(None))
            }
        );
    }

    #[test]
    fn test_media_movies_list_filters() {
        let cmd = CommandParser::parse(
            r#"media movies list -t hope -r PG PG-13 -d "George Lucas" -a "Mark Hamill" -a "Harrison Ford""#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            ReplCommand::Media {
                root: MediaRoot::Media,
                target: Some(MediaTarget::Movies(Some(MovieAction::List(MovieFilter {
                    title: Some("hope".to_string()),
                    ratings: ids(&["PG", "PG-13"]),
                    director: Some("George Lucas".to_string()),
                    actors: ids(&["Mark Hamill", "Harrison Ford"]),
                }))))
            }
        );
    }

    #[test]
    fn test_media_movies_list_rejects_unknown_rating() {
        assert!(CommandParser::parse("media movies list -r TV-MA").is_err());
    }

    #[test]
    fn test_media_movies_add() {
        let cmd = CommandParser::parse(
            r#"video movies add "Solo" PG-13 -d "Ron Howard" -- "Alden Ehrenreich""#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            ReplCommand::Media {
                root: MediaRoot::Video,
                target: Some(MediaTarget::Movies(Some(MovieAction::Add(NewMovie {
                    title: "Solo".to_string(),
                    rating: "PG-13".to_string(),
                    directors: ids(&["Ron Howard"]),
                    actors: ids(&["Alden Ehrenreich"]),
                    runtime: None,
                }))))
            }
        );
    }

    #[test]
    fn test_media_movies_add_with_runtime() {
        let cmd = CommandParser::parse(r#"media movies add Solo PG-13 --runtime 135 -d "Ron Howard""#)
            .unwrap();
        let ReplCommand::Media {
            target: Some(MediaTarget::Movies(Some(MovieAction::Add(movie)))),
            ..
        } = cmd
        else {
            panic!("expected movies add, got {cmd:?}");
        };
        assert_eq!(movie.runtime, Some(135));
        assert!(CommandParser::parse("media movies add Solo PG -d X --runtime long").is_err());
    }

    #[test]
    fn test_media_movies_add_requires_director() {
        assert!(CommandParser::parse("media movies add Solo PG").is_err());
    }

    #[test]
    fn test_media_movies_add_director_takes_at_most_two() {
        match CommandParser::parse("media movies add Solo PG -d A B C").unwrap() {
            ReplCommand::Media {
                target: Some(MediaTarget::Movies(Some(MovieAction::Add(movie)))),
                ..
            } => {
                assert_eq!(movie.directors, ids(&["A", "B"]));
                assert_eq!(movie.actors, ids(&["C"]));
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn test_media_shows_list() {
        assert_eq!(
            CommandParser::parse("media shows list").unwrap(),
            ReplCommand::Media {
                root: MediaRoot::Media,
                target: Some(MediaTarget::Shows(Some(ShowAction::List)))
            }
        );
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // library
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_library_movie_add_borrowed() {
        assert_eq!(
            CommandParser::parse("library movie add SW_EP06 SW_EP07 -b").unwrap(),
            ReplCommand::Library(Some(LibraryTarget::Movie(Some(LibraryMovieAction::Add {
                ids: ids(&["SW_EP06", "SW_EP07"]),
                borrowed: true
            }))))
        );
    }

    #[test]
    fn test_library_show_add_episodes() {
        assert_eq!(
            CommandParser::parse("library show add SW_REB S01E02 S01E03").unwrap(),
            ReplCommand::Library(Some(LibraryTarget::Show(Some(LibraryShowAction::Add {
                show_id: "SW_REB".to_string(),
                episodes: ids(&["S01E02", "S01E03"]),
            }))))
        );
    }

    #[test]
    fn test_library_without_command() {
        assert_eq!(
            CommandParser::parse("library movie").unwrap(),
            ReplCommand::Library(Some(LibraryTarget::Movie(None)))
        );
        assert_eq!(CommandParser::parse("library").unwrap(), ReplCommand::Library(None));
    }

    #[test]
    fn test_help_for_unknown_path() {
        assert!(CommandParser::help_for(&ids(&["media", "books"])).is_err());
    }

    #[test]
    fn test_help_for_nested_path() {
        let help = CommandParser::help_for(&ids(&["media", "movies"])).unwrap();
        assert!(help.contains("list"));
        assert!(help.contains("delete"));
        assert!(help.contains("Usage: media movies "));
    }

    #[test]
    fn test_help_for_top_level_usage_line() {
        for topic in ["video", "library", "suggest", "quit"] {
            let help = CommandParser::help_for(&ids(&[topic])).unwrap();
            assert!(help.contains(&format!("Usage: {topic}")), "{help}");
            assert!(!help.contains("Usage:  "), "{help}");
        }
    }

    #[test]
    fn test_help_for_alias() {
        let help = CommandParser::help_for(&ids(&["exit"])).unwrap();
        assert!(help.contains("Usage: quit"));
    }
}
