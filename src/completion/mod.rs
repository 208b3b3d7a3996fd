//! Tab completion over a `clap` command tree.
//!
//! Commands are declared with clap; this module walks the tokens already on
//! the line through that tree and asks a [`CompletionSource`] for candidates.
//! Sources are bound to argument ids through a [`CompletionTable`], which can
//! be flat (one lookup for every depth), tagged per subcommand path, or a full
//! nested tree when the same argument name must complete differently under
//! different subcommands.

mod engine;
mod source;
mod table;
mod tokens;

pub use engine::ArgCompleter;
pub use source::{
    filter_library, filter_prefix, CompletionRequest, CompletionSource, CustomCompleter,
};
pub use table::CompletionTable;
pub use tokens::{quote_candidate, split_line, tokenize_for_completion, PartialLine};
