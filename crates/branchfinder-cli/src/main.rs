//! branchfinder — Command-line interface for branchfinder-core
//!
//! Loads the branch dataset once and answers free-text queries in a prompt
//! loop. Every query ends up in the session history, which is printed when
//! you type `exit` (or press Ctrl-D).
//!
//! Usage examples
//! --------------
//!
//! - Interactive session against a local CSV
//!   $ branchfinder --input uba_branches.csv
//!
//! - Same, but a stricter matcher and no per-branch geocoding
//!   $ branchfinder -i uba_branches.csv --threshold 70 --no-map
//!
//! - One-shot query
//!   $ branchfinder -i uba_branches.csv --query "lagos main"
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=branchfinder_core=debug`).
mod args;

use crate::args::CliArgs;
use anyhow::Context;
use branchfinder_cli::render;
use branchfinder_core::prelude::*;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "🔎 Enter a state, city, or branch name (or type 'exit' to quit): ";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = args.config.resolve().context("invalid configuration")?;

    // A missing dataset ends the session before any search happens.
    let table = match BranchTable::load_from_path(&config.dataset, &config.country) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", render::fatal(&e));
            std::process::exit(1);
        }
    };

    let geocoder = NominatimClient::from_config(&config).context("cannot build HTTP client")?;
    let finder = Finder::new(Some(table), geocoder, config);
    println!(
        "✅ Dataset loaded successfully ({} only)! {} branches.\n",
        finder.country_label(),
        finder.table().map_or(0, |t| t.len())
    );

    let mut session = Session::new();

    if let Some(q) = args.query {
        let outcome = session.run_query(&finder, &q);
        print!("{}", render::outcome(outcome));
        return Ok(());
    }

    let mut rl = DefaultEditor::new()?;
    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") {
            break;
        }
        if query.is_empty() {
            println!("Please enter a search query.");
            continue;
        }
        let _ = rl.add_history_entry(query);

        let outcome = session.run_query(&finder, query);
        println!("{}", render::outcome(outcome));
    }

    println!();
    print!("{}", render::history(&session.history));
    Ok(())
}
