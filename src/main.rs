//! NOVA - Entry Point
//!
//! Loads configuration and the knowledge base, then hands control to one of
//! the front-ends: the full-screen chat screen (default), the line-mode loop
//! (`--cli`), or a single request (`--once`).

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use nova::command::Directive;
use nova::core::config::AssistantConfig;
use nova::core::error::Result;
use nova::session::Session;
use nova::ui::{run_repl, terminal};

/// NOVA - Neural Omni Virtual Assistant
#[derive(Parser, Debug)]
#[command(name = "nova")]
#[command(about = "Desktop assistant that answers questions and launches things")]
struct Args {
    /// Use the line-mode terminal loop instead of the chat screen
    #[arg(long)]
    cli: bool,

    /// Knowledge base file (overrides the config)
    #[arg(long, value_name = "PATH")]
    brain: Option<PathBuf>,

    /// TOML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log side effects instead of performing them
    #[arg(long)]
    dry_run: bool,

    /// Handle one utterance, print the reply and exit
    #[arg(long, value_name = "TEXT")]
    once: Option<String>,

    /// With --once, print a JSON report instead of plain text
    #[arg(long, requires = "once")]
    json: bool,
}

/// JSON output for `--once --json`
#[derive(Serialize)]
struct OnceReport<'a> {
    directive: &'a Directive,
    text: &'a str,
    degraded: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AssistantConfig::from_file(path)?,
        None => AssistantConfig::new(),
    };
    if let Some(brain) = args.brain {
        config.knowledge_base = brain;
    }
    if args.dry_run {
        config.dry_run = true;
    }
    config.validate()?;

    let full_screen = !args.cli && args.once.is_none();
    init_logging(&config, full_screen);
    tracing::info!("NOVA starting (knowledge base: {})", config.knowledge_base.display());

    let session = Session::bootstrap(&config)?;

    if let Some(text) = args.once {
        let outcome = session.process(&text);
        if args.json {
            let report = OnceReport {
                directive: &outcome.directive,
                text: &outcome.result.text,
                degraded: outcome.result.is_degraded(),
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{}", outcome.result.text);
        }
        return Ok(());
    }

    if args.cli {
        let stdin = io::stdin();
        return run_repl(&session, stdin.lock(), io::stdout().lock());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let bot_name = session.bot_name().to_string();
    terminal::run(Arc::new(session), runtime.handle().clone(), &bot_name)?;
    // Workers stuck on a launch must not keep the process alive
    runtime.shutdown_background();
    Ok(())
}

/// Set up tracing; the chat screen owns stdout/stderr, so it logs to a file or nowhere
fn init_logging(config: &AssistantConfig, full_screen: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    if !full_screen {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return;
    }

    let file = config.log_file.as_ref().and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("warning: cannot open log file {}: {}", path.display(), e);
                None
            }
        }
    });

    match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init(),
    }
}
