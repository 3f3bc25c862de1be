// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (to stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Resolve the config (API key, endpoints) once
// 4. Dispatch to the appropriate subcommand handler
// 5. Exit with proper code (0 = success, 1 = analysis failed, 2 = error)
// =============================================================================

mod assessment;    // src/assessment/ - prompt + Gemini call
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - runtime settings
mod error;         // src/error.rs - the error taxonomy
mod github;        // src/github/ - URL parsing + GitHub API
mod pipeline;      // src/pipeline.rs - runs the stages, drives the session
mod render;        // src/render.rs - dashboard / JSON output
mod session;       // src/session/ - state machine

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use config::Config;
use pipeline::{Analyzer, Session};
use session::{Event, Phase, SessionState};

/// The "Try example" shortcut
const EXAMPLE_REPO_URL: &str = "https://github.com/levy01/colisseum.git";

#[tokio::main]
async fn main() {
    // Logs go to stderr so --json output on stdout stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = analysis succeeded (or the interactive session ended)
//   Ok(1) = analysis failed, error banner printed
//   Err   = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::from_args(&cli.global)?;
    tracing::debug!(?config, "configuration resolved");

    let analyzer = Analyzer::new(&config).context("failed to set up HTTP clients")?;
    let mut session = Session::new(analyzer);

    match cli.command {
        Commands::Analyze { repo_url, json } => {
            handle_single(&mut session, &repo_url, json).await
        }
        Commands::Example { json } => {
            handle_single(&mut session, EXAMPLE_REPO_URL, json).await
        }
        Commands::Interactive => handle_interactive(&mut session).await,
    }
}

// Handles 'analyze' and 'example': one submission, one render
async fn handle_single(session: &mut Session, repo_url: &str, json: bool) -> Result<i32> {
    if !json {
        println!("🔍 Analyzing repository: {}", repo_url);
    }

    let state = session.submit_url(repo_url).await;
    print_state(state, json)?;

    Ok(match state.phase() {
        Phase::Success => 0,
        _ => 1,
    })
}

// Handles 'interactive': one URL per line until quit/EOF
async fn handle_interactive(session: &mut Session) -> Result<i32> {
    print_state(session.state(), false)?;
    println!("Type a GitHub URL, `example` to try levy01/colisseum, or `quit`.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        match line {
            "quit" | "exit" => break,
            "" => continue,
            "example" => {
                println!("🔍 Analyzing repository: {}", EXAMPLE_REPO_URL);
                session.submit_url(EXAMPLE_REPO_URL).await;
            }
            url => {
                session.dispatch(Event::InputChanged(url.to_string()));
                println!("🔍 Analyzing repository: {}", url);
                session.submit().await;
            }
        }
        print_state(session.state(), false)?;
    }

    Ok(0)
}

fn print_state(state: &SessionState, json: bool) -> Result<()> {
    if json {
        println!("{}", render::render_json(state)?);
    } else {
        println!("{}", render::render_dashboard(state));
    }
    Ok(())
}
