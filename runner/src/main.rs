use anyhow::{Context, Result};
use clap::Parser;
use nde_orchestrator::display::{self, DEFAULT_ANNOTATION_COLUMN};
use nde_orchestrator::{Outcome, Session};
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, Reedline, Signal};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Command line ──

#[derive(Parser, Debug)]
#[command(name = "nde", version, about = "Interactive natural deduction proof checker")]
struct Args {
    /// Proof script to check non-interactively. Without one, commands are
    /// read from the terminal, or checked in batch when stdin is piped.
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Send the log to this file (default level: debug) instead of stderr
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Column at which justifications are printed
    #[arg(long, value_name = "N", default_value_t = DEFAULT_ANNOTATION_COLUMN)]
    annotation_column: usize,
}

// ── Logging ──

/// Use RUST_LOG to override the level, e.g. `RUST_LOG=nde_proof=trace`.
fn init_tracing(log: Option<&Path>) -> Result<()> {
    match log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .without_time()
                        .with_writer(io::stderr),
                )
                .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                .init();
        }
    }
    Ok(())
}

// ── Prompt ──

/// `NNNN. ` followed by one `| ` per open box.
struct ProofPrompt {
    number: usize,
    depth: usize,
}

impl ProofPrompt {
    fn for_session(session: &Session) -> Self {
        ProofPrompt {
            number: session.next_line_number(),
            depth: session.proof().depth(),
        }
    }
}

impl Prompt for ProofPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(display::gutter(Some(self.number), self.depth))
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("::: ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Owned(format!("(search: {}) ", history_search.term))
    }
}

// ── Outcome reporting (shared by REPL and batch) ──

fn write_export(dir: &Path, name: &str, document: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{}.tex", name));
    fs::write(&path, document).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "export written");
    Ok(path)
}

fn report<W: Write>(
    session: &Session,
    outcome: &Outcome,
    column: usize,
    export_dir: &Path,
    out: &mut W,
) -> Result<()> {
    if let Some(text) = session.describe(outcome, column) {
        writeln!(out, "{}", text)?;
    }
    match outcome {
        Outcome::Undone(line) => {
            writeln!(
                out,
                "[Undo] removed line {}: {}",
                session.next_line_number(),
                line.formula
            )?;
        }
        Outcome::Exported { name, document } => {
            let path = write_export(export_dir, name, document)?;
            writeln!(out, "[Export] wrote {}", path.display())?;
        }
        Outcome::Skipped | Outcome::Line(_) | Outcome::Opened | Outcome::Closed => {}
    }
    Ok(())
}

// ── Batch mode ──

/// Check a whole script. Stops at the first rejected command and returns
/// whether the proof went through.
fn check_script<R: BufRead, W: Write>(
    reader: R,
    column: usize,
    export_dir: &Path,
    out: &mut W,
) -> Result<bool> {
    let mut session = Session::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line.context("reading proof script")?;
        match session.execute(&line) {
            Ok(outcome) => report(&session, &outcome, column, export_dir, out)?,
            Err(err) => {
                debug!(line = n + 1, %err, "script rejected");
                writeln!(out, "error: line {}: {}", n + 1, err)?;
                return Ok(false);
            }
        }
    }
    writeln!(out, "The proof is correct.")?;
    Ok(true)
}

// ── Interactive mode ──

fn print_help() {
    println!("  presume <formula>       Add a premise");
    println!("  assume <formula>        Add an assumption (first line of a box)");
    println!("  open / close            Open or close a box");
    println!("  apply <rule> <inputs>   Apply a rule, e.g. apply =>e 1, 2");
    println!("  undo                    Remove the last line");
    println!("  export <name>           Write the proof to <name>.tex");
    println!("  :help                   Show this list");
    println!("  :quit                   Exit");
    println!();
    println!("  Operators: -  ^  /  =>  _|_");
    println!("  Rules: -i -e ^i ^e1 ^e2 /i1 /i2 /e =>i =>e _|_e --i --e MT PBC LEM copy");
}

fn repl(column: usize, export_dir: &Path) -> Result<()> {
    let mut session = Session::new();
    let mut line_editor = Reedline::create();
    let mut stdout = io::stdout();

    println!("Natural deduction. Type :help for commands, :quit to exit.\n");

    loop {
        let prompt = ProofPrompt::for_session(&session);
        let sig = line_editor.read_line(&prompt);
        match sig {
            Ok(Signal::Success(buffer)) => {
                let input = buffer.trim();
                match input {
                    ":quit" | ":q" => break,
                    ":help" | ":h" => {
                        print_help();
                        continue;
                    }
                    _ => {}
                }

                match session.execute(input) {
                    Ok(outcome) => {
                        if let Err(e) = report(&session, &outcome, column, export_dir, &mut stdout) {
                            println!("[Error] {:#}", e);
                        }
                    }
                    Err(e) => println!("[Error] {}", e),
                }
            }
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;

    let export_dir = Path::new(".");
    let column = args.annotation_column;
    let mut stdout = io::stdout();

    let correct = match &args.script {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            check_script(BufReader::new(file), column, export_dir, &mut stdout)?
        }
        None if !io::stdin().is_terminal() => {
            check_script(io::stdin().lock(), column, export_dir, &mut stdout)?
        }
        None => return repl(column, export_dir),
    };

    if !correct {
        std::process::exit(1);
    }
    Ok(())
}
