//! Interactive shell over the media catalogue and library.
//!
//! Commands are parsed by a `clap` command tree ([`CommandParser`]) and run
//! against a [`ReplSession`]. In a terminal the shell uses reedline with
//! file-backed history and a completion menu driven by [`ShellCompleter`];
//! with piped input it reads one command per line, which is also how the
//! integration tests drive it.

mod commands;
mod completer;
mod prompt;
mod session;

use std::io::{BufRead, Write};

pub use commands::{
    CommandParser, LibraryMovieAction, LibraryShowAction, LibraryTarget, MediaRoot, MediaTarget,
    MovieAction, ReplCommand, ShowAction,
};
pub use completer::{registry, ShellCompleter};
pub use prompt::ShellPrompt;
pub use session::ReplSession;

use crate::config::ShellConfig;
use crate::library::SharedStore;
use crate::{Error, Result};

#[cfg(feature = "repl")]
use reedline::{Reedline, Signal};

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Leave the shell
    Quit,
}

/// Run the shell
///
/// # Errors
///
/// Returns an error if the catalogue cannot be loaded or the terminal fails.
pub fn run(config: &ShellConfig) -> Result<()> {
    let store = SharedStore::new(config.load_store()?);

    #[cfg(feature = "repl")]
    {
        use std::io::IsTerminal;
        // Piped input (tests, replayed exports) uses the line reader
        if std::io::stdin().is_terminal() {
            return run_interactive(config, store);
        }
    }

    let mut session = ReplSession::with_shared(store);
    let stdin = std::io::stdin();
    run_lines(
        &mut session,
        stdin.lock(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
}

fn banner() -> String {
    format!(
        "marquee {} - media library shell\nType 'help' for commands, 'quit' to exit\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Run commands read line by line from `input` until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only if `out` or `err` cannot be written; command
/// failures are reported on `err` and the loop continues.
pub fn run_lines(
    session: &mut ReplSession,
    input: impl BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "{}", banner()).map_err(Error::io_no_path)?;

    for line in input.lines() {
        let Ok(line) = line else {
            break;
        };
        if dispatch(session, &line, out, err)? == Flow::Quit {
            break;
        }
    }

    writeln!(out, "Goodbye!").map_err(Error::io_no_path)
}

/// Handle one input line.
///
/// Blank lines and `#` comments are skipped. Command errors are written to
/// `err`.
///
/// # Errors
///
/// Returns an error only if `err` cannot be written.
pub fn dispatch(
    session: &mut ReplSession,
    line: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Flow> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(Flow::Continue);
    }

    session.add_history(trimmed);
    let result = CommandParser::parse(trimmed).and_then(|cmd| {
        if cmd == ReplCommand::Quit {
            return Ok(Flow::Quit);
        }
        session.execute_to(cmd, out).map(|()| Flow::Continue)
    });

    match result {
        Ok(flow) => Ok(flow),
        Err(e) => {
            tracing::debug!(error = %e, line = trimmed, "command failed");
            match e {
                // Already formatted by the argument parser
                Error::Usage { message } => writeln!(err, "{message}"),
                other => writeln!(err, "Error: {other}"),
            }
            .map_err(Error::io_no_path)?;
            Ok(Flow::Continue)
        }
    }
}

/// Run the shell in a terminal with reedline.
#[cfg(feature = "repl")]
fn run_interactive(config: &ShellConfig, store: SharedStore) -> Result<()> {
    let mut session = ReplSession::with_shared(store.clone());
    let mut line_editor = create_editor(config, store.clone())?;
    let prompt = ShellPrompt::new(store, config.color);

    println!("{}", banner());

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                let flow = dispatch(
                    &mut session,
                    &line,
                    &mut std::io::stdout(),
                    &mut std::io::stderr(),
                )?;
                if flow == Flow::Quit {
                    println!("Goodbye!");
                    break;
                }
            }
            Ok(Signal::CtrlC) => {
                println!("^C");
            }
            Ok(Signal::CtrlD) => {
                println!("\nGoodbye!");
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(feature = "repl")]
fn create_editor(config: &ShellConfig, store: SharedStore) -> Result<Reedline> {
    use reedline::{
        default_emacs_keybindings, ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers,
        MenuBuilder, ReedlineEvent, ReedlineMenu,
    };

    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    let menu = ColumnarMenu::default().with_name("completion_menu");

    let mut editor = Reedline::create()
        .with_completer(Box::new(ShellCompleter::new(store)))
        .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    if let Some(path) = &config.history_path {
        let history = FileBackedHistory::with_file(config.history_size, path.clone())
            .map_err(|e| Error::io(std::io::Error::other(e.to_string()), path))?;
        editor = editor.with_history(Box::new(history));
    }

    Ok(editor)
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
