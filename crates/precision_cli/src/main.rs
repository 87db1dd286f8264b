//! precision-edit - interactive structural editor for .docx documents
//!
//! Loads a document, prints an identifier-annotated structure map, and
//! applies surgical edits addressed by those identifiers.

mod commands;

use clap::Parser;
use commands::{Repl, ReplAction};
use edit_engine::SessionOptions;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "precision-edit", version, about = "Identifier-addressed structural editor for .docx files", long_about = None)]
struct Cli {
    /// Document to load on startup
    #[arg(value_name = "FILE")]
    document: Option<PathBuf>,

    /// Reject boolean format values other than true/false
    #[arg(long = "strict-bool")]
    strict_bool: bool,

    /// New paragraphs get the default style instead of the target's
    #[arg(long = "no-inherit-style")]
    no_inherit_style: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the prompt and JSON output stay clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("starting precision-edit");

    let cli = Cli::parse();
    let options = SessionOptions {
        strict_bool: cli.strict_bool,
        inherit_style: !cli.no_inherit_style,
    };
    let mut repl = Repl::new(options);

    println!("Precision Document Editor");
    println!("Type 'help' for commands or 'exit' to quit.");

    if let Some(path) = &cli.document {
        println!("{}", repl.load(path));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let (action, output) = repl.handle_line(&line);
        if !output.is_empty() {
            println!("{}", output);
        }
        if action == ReplAction::Quit {
            break;
        }
    }

    Ok(())
}
