//! Terminal front end and entry point.
//!
//! This binary is the thin integration layer between the whosnext library and
//! an interactive terminal. It reads line commands from stdin, turns them into
//! [`Intent`]s, delegates to [`handle_intent`] and redraws the session after
//! every state change.
//!
//! # Lifecycle
//!
//! 1. **Load**: Parse `key=value` arguments, load config, initialize logging
//! 2. **Open**: Restore the saved session (advancing the colour theme)
//! 3. **Loop**: Read a command, handle it, execute actions, redraw
//! 4. **Exit**: `quit` or end of input; the store flushes on drop
//!
//! # Commands
//!
//! - *(empty line)*: Draw on the start screen, go back on the result screen
//! - `draw`: Draw the next batch
//! - `ok`: Leave the result screen
//! - `pick N`: Set how many names each draw takes
//! - `import [FILE]`: Replace the names list from a file, or from the
//!   following lines up to a lone `.`
//! - `names`: Print the current names list
//! - `reset`: Restart the lottery, keeping the names
//! - `init`: Forget everything, names included
//! - `theme`: Switch to the next colour theme
//! - `help`: Show the command list
//! - `quit`: Exit

#![allow(clippy::multiple_crate_versions)]

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use rand::Rng;
use whosnext::storage::KeyValueStore;
use whosnext::ui::render_view;
use whosnext::{handle_intent, Action, Config, Intent, Screen, Session, Theme, WhosNextError};

/// Width used when `COLUMNS` is not set.
const DEFAULT_COLS: usize = 60;

/// Terminator line for inline imports.
const IMPORT_END: &str = ".";

const HELP: &str = "\
commands:
  <enter>        draw (start screen) / back (result screen)
  draw           draw the next batch
  ok             leave the result screen
  pick N         names per draw
  import [FILE]  replace the names list (no FILE: type names, end with '.')
  names          print the names list
  reset          restart the lottery, keep the names
  init           forget everything
  theme          next colour theme
  help           this text
  quit           exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Forward to the intent handler.
    Intent(Intent),
    /// Context-dependent: draw on START, acknowledge on RESULT.
    Enter,
    /// Import from a file, or inline when `None`.
    Import(Option<String>),
    Names,
    Help,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Enter,
        "draw" | "d" => Command::Intent(Intent::Draw),
        "ok" | "back" => Command::Intent(Intent::AcknowledgeResult),
        "pick" | "p" => Command::Intent(Intent::SetPickCount(rest.to_string())),
        "import" | "i" => Command::Import((!rest.is_empty()).then(|| rest.to_string())),
        "names" => Command::Names,
        "reset" => Command::Intent(Intent::ResetOnly),
        "init" => Command::Intent(Intent::Initialize),
        "theme" | "t" => Command::Intent(Intent::CycleTheme),
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Intent(Intent::Quit),
        _ => Command::Unknown(line.to_string()),
    }
}

/// Interactive terminal state wrapping the library session.
struct Terminal<S, R> {
    session: Session<S, R>,
    /// Notice shown with the next frame, then cleared.
    notice: Option<String>,
    /// Pick count echoed in the prompt, kept in sync by the handler.
    pick_input: usize,
    cols: usize,
}

impl<S: KeyValueStore, R: Rng> Terminal<S, R> {
    fn new(session: Session<S, R>, cols: usize) -> Self {
        let pick_input = session.state().pick_count;
        Self {
            session,
            notice: None,
            pick_input,
            cols,
        }
    }

    /// Runs the command loop until `quit` or end of input.
    fn run<I, W>(&mut self, lines: &mut I, out: &mut W) -> whosnext::Result<()>
    where
        I: Iterator<Item = io::Result<String>>,
        W: Write,
    {
        self.redraw(out)?;

        while let Some(line) = lines.next() {
            let line = line?;
            let command = parse_command(&line);
            tracing::debug!(command = ?command, "command received");

            let intent = match command {
                Command::Intent(intent) => intent,
                Command::Enter => match self.session.state().screen {
                    Screen::Start => Intent::Draw,
                    Screen::Result => Intent::AcknowledgeResult,
                },
                Command::Import(path) => match read_import(path.as_deref(), lines, out) {
                    Ok(text) => Intent::ImportRoster(text),
                    Err(e) => {
                        tracing::warn!(error = %e, "import failed");
                        self.notice = Some(format!("Import failed: {e}"));
                        self.redraw(out)?;
                        continue;
                    }
                },
                Command::Names => {
                    writeln!(out, "{}", self.session.roster_text())?;
                    self.prompt(out)?;
                    continue;
                }
                Command::Help => {
                    writeln!(out, "{HELP}")?;
                    self.prompt(out)?;
                    continue;
                }
                Command::Unknown(text) => {
                    self.notice = Some(format!("Unknown command: {text} (try `help`)"));
                    self.redraw(out)?;
                    continue;
                }
            };

            let (should_render, actions) = match handle_intent(&mut self.session, &intent) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(error = %e, intent = ?intent, "intent failed");
                    self.notice = Some(format!("Could not save: {e}"));
                    self.redraw(out)?;
                    continue;
                }
            };
            tracing::debug!(
                action_count = actions.len(),
                should_render,
                "intent handled"
            );

            let mut quit = false;
            for action in &actions {
                match action {
                    Action::Notify(notice) => self.notice = Some(notice.to_string()),
                    Action::SyncPickInput(count) => self.pick_input = *count,
                    Action::Quit => quit = true,
                }
            }
            if quit {
                break;
            }

            if should_render || self.notice.is_some() {
                self.redraw(out)?;
            } else {
                self.prompt(out)?;
            }
        }

        writeln!(out, "{}", Theme::reset())?;
        Ok(())
    }

    fn redraw<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let view = self.session.compute_view();
        write!(out, "{}{}", view.theme.base(), Theme::clear_screen())?;
        render_view(out, &view, self.notice.as_deref(), self.cols)?;
        self.notice = None;
        self.prompt(out)
    }

    fn prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "pick {}> ", self.pick_input)?;
        out.flush()
    }
}

/// Reads import text from `path`, or from `lines` up to a lone `.`.
fn read_import<I, W>(path: Option<&str>, lines: &mut I, out: &mut W) -> whosnext::Result<String>
where
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    if let Some(path) = path {
        let path = whosnext::infrastructure::expand_tilde(path);
        return std::fs::read_to_string(&path)
            .map_err(|e| WhosNextError::Io(io::Error::new(e.kind(), format!("cannot read {path}: {e}"))));
    }

    writeln!(out, "Enter one name per line, finish with a lone '{IMPORT_END}':")?;
    out.flush()?;

    let mut text = String::new();
    for line in lines.by_ref() {
        let line = line?;
        if line.trim() == IMPORT_END {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}

fn terminal_cols() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse().ok())
        .filter(|&c| c > 0)
        .unwrap_or(DEFAULT_COLS)
}

fn run() -> whosnext::Result<()> {
    let overrides = Config::parse_overrides(std::env::args().skip(1))?;
    let config = Config::load(&overrides)?;
    whosnext::observability::init_tracing(&config);

    let span = tracing::debug_span!("whosnext_run");
    let _guard = span.entered();
    tracing::debug!(data_dir = %config.data_dir.display(), "starting");

    let session = whosnext::initialize(&config)?;
    let mut terminal = Terminal::new(session, terminal_cols());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    terminal.run(&mut stdin.lock().lines(), &mut out)?;

    tracing::debug!("exiting");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("whosnext: {e}");
            ExitCode::FAILURE
        }
    }
}
