//! tnote CLI — terminal notes kept as plain Markdown files
//!
//! Commands: list, edit (default), create, remove, path, completions

mod app;
mod prompt;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};

use tnote_core::{NoteId, StoreConfig};
use tnote_store::NoteStore;

use crate::app::Action;
use crate::prompt::LineConfirm;

#[derive(Parser)]
#[command(name = "tnote")]
#[command(version)]
#[command(about = "Terminal notes kept as plain Markdown files")]
#[command(
    after_help = "Running `tnote <NOTE_ID>` without a command is the same as `tnote edit <NOTE_ID>`."
)]
struct Cli {
    /// Notes directory [default: ~/Documents/notes]
    #[arg(long, env = "TNOTE_ROOT", global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Editor used to open notes [default: vi]
    ///
    /// Split on whitespace into program and arguments (`code --wait`) unless
    /// the whole value names an existing file.
    #[arg(long, env = "EDITOR", global = true, hide_env_values = true)]
    editor: Option<String>,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Note to edit; words are joined with spaces
    #[arg(value_name = "NOTE_ID")]
    id: Vec<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List every note ID, including notes in nested folders
    #[command(alias = "ls")]
    List {
        /// Print a JSON array instead of one ID per line
        #[arg(long)]
        json: bool,
    },
    /// Open a note in the editor, offering to create it if missing
    Edit {
        /// Note ID, may be a relative path such as `work/standup`
        #[arg(required = true, value_name = "NOTE_ID")]
        id: Vec<String>,
    },
    /// Create an empty note without opening it
    Create {
        #[arg(required = true, value_name = "NOTE_ID")]
        id: Vec<String>,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Remove {
        #[arg(required = true, value_name = "NOTE_ID")]
        id: Vec<String>,
    },
    /// Print the notes directory, or the file a note ID maps to
    Path {
        #[arg(value_name = "NOTE_ID")]
        id: Vec<String>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and are not failures.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = execute(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let action = match cli.command {
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "tnote", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::List { json }) => Action::List { json },
        Some(Commands::Edit { id }) => Action::Edit(NoteId::from_words(&id)?),
        Some(Commands::Create { id }) => Action::Create(NoteId::from_words(&id)?),
        Some(Commands::Remove { id }) => Action::Remove(NoteId::from_words(&id)?),
        Some(Commands::Path { id }) if id.is_empty() => Action::Path(None),
        Some(Commands::Path { id }) => Action::Path(Some(NoteId::from_words(&id)?)),
        None if cli.id.is_empty() => bail!("missing command; run `tnote --help` for usage"),
        None => Action::Edit(NoteId::from_words(&cli.id)?),
    };

    let config = StoreConfig::resolve(cli.root, cli.editor)?;
    let store = NoteStore::open(config).context("cannot open notes directory")?;

    app::run(action, &store, &mut LineConfirm::stdio(), &mut io::stdout().lock())
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
