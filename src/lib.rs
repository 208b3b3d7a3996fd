//! marquee - Media Library Shell with Subcommand-Aware Tab Completion
//!
//! An interactive shell over a small movie and show catalogue and a personal
//! library. Commands are declared once as a `clap` command tree; the same tree
//! drives parsing, help output and tab completion.
//!
//! # Design Principles
//!
//! 1. **One grammar** - parsing, help and completion read the same
//!    `clap::Command`
//! 2. **Pluggable sources** - candidates come from static lists, queries over
//!    the store, or custom functions bound per argument
//! 3. **Shared state** - the completer sees catalogue and library changes as
//!    soon as a command makes them
//!
//! # Quick Start
//!
//! ```no_run
//! use marquee::library::MediaStore;
//! use marquee::repl::{CommandParser, ReplSession};
//!
//! let mut session = ReplSession::new(MediaStore::builtin());
//! let cmd = CommandParser::parse("library movie add SW_EP06 --borrowed").unwrap();
//! session.execute(cmd).unwrap();
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::redundant_clone,
        clippy::needless_collect,
        clippy::too_many_lines
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod library;
pub mod repl;
pub mod suggest;

pub use catalog::{Catalog, MediaKind, Movie, MovieFilter, NewMovie, Show};
pub use config::ShellConfig;
pub use error::{Error, Result};
pub use library::{MediaStore, SharedStore, UserLibrary};
pub use suggest::{DurationConstraint, Suggestion};
