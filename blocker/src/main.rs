//! Turn-based link-cutting agent.
//!
//! `blocker play` reads the game setup and one adversary position per turn
//! from stdin and prints the link it cuts each turn to stdout.

use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use blocker::core::classifier::DangerClassifier;
use blocker::core::setup::Setup;
use blocker::exit_codes;
use blocker::io::config::load_config;
use blocker::io::input::parse_setup;
use blocker::io::transcript::TranscriptWriter;
use blocker::logging;
use blocker::looping::run_loop;

#[derive(Parser)]
#[command(name = "blocker", version, about = "Turn-based link-cutting agent")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game over stdin/stdout until input ends.
    Play {
        /// Agent config (TOML). Defaults apply when the file is missing.
        #[arg(long, default_value = "blocker.toml")]
        config: PathBuf,
        /// Write one JSON line per turn to this file.
        #[arg(long)]
        transcript: Option<PathBuf>,
    },
    /// Validate a setup file and print a summary.
    Check {
        /// File holding the setup block (counts, links, gateways).
        setup: PathBuf,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Play { config, transcript } => cmd_play(&config, transcript.as_deref()),
        Command::Check { setup } => cmd_check(&setup),
    }
}

fn cmd_play(config_path: &Path, transcript_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let mut transcript = transcript_path.map(TranscriptWriter::create).transpose()?;

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    run_loop(stdin, stdout, &config, |report| match transcript.as_mut() {
        Some(writer) => writer.record(report),
        None => Ok(()),
    })?;
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read setup {}", path.display()))?;
    let setup: Setup =
        parse_setup(&contents).with_context(|| format!("parse setup {}", path.display()))?;
    let graph = setup.build_graph()?;
    let mut danger = DangerClassifier::default();
    danger.refresh(&graph);
    println!(
        "nodes={} links={} gateways={} dangerous={}",
        graph.node_count(),
        graph.link_count(),
        setup.gateways.len(),
        danger.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_play_defaults() {
        let cli = Cli::parse_from(["blocker", "play"]);
        match cli.command {
            Command::Play { config, transcript } => {
                assert_eq!(config, PathBuf::from("blocker.toml"));
                assert!(transcript.is_none());
            }
            Command::Check { .. } => panic!("expected play"),
        }
    }

    #[test]
    fn parse_play_with_transcript() {
        let cli = Cli::parse_from(["blocker", "play", "--transcript", "turns.jsonl"]);
        assert!(matches!(
            cli.command,
            Command::Play { transcript: Some(ref path), .. } if path == Path::new("turns.jsonl")
        ));
    }

    #[test]
    fn parse_check() {
        let cli = Cli::parse_from(["blocker", "check", "setup.txt"]);
        assert!(matches!(cli.command, Command::Check { .. }));
    }
}
