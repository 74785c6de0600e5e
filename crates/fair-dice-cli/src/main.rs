//! Fair Dice console
//!
//! Play non-transitive dice against the computer with provably fair rolls,
//! print the win probability table, or verify revealed draws offline.

mod config;
mod console;
mod table;
mod transcript;
mod verify;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::CliConfig;
use console::ConsoleOperator;
use fair_dice_core::{parse_dice_list, DiceGame, Outcome, ProbabilityTable};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use transcript::TranscriptWriter;

#[derive(Parser)]
#[command(name = "fair-dice")]
#[command(about = "Non-transitive dice game with commit-reveal fair rolls")]
#[command(version, args_conflicts_with_subcommands = true, arg_required_else_help = true)]
struct Cli {
    /// Log filter directive, e.g. `fair_dice_core=debug` (overrides RUST_LOG)
    #[arg(long, global = true, env = "FAIR_DICE_LOG")]
    log_level: Option<String>,

    /// Dice given without a subcommand start a match
    #[command(flatten)]
    play: PlayArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play a match against the computer
    Play(PlayArgs),
    /// Print the win probability table for a set of dice
    Table {
        #[command(flatten)]
        dice: DiceArgs,
    },
    /// Check revealed keys against published commitments
    Verify(VerifyArgs),
}

#[derive(Args)]
struct DiceArgs {
    /// Dice as comma separated faces, at least three: 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7
    #[arg(value_name = "DICE", allow_hyphen_values = true)]
    dice: Vec<String>,
}

#[derive(Args)]
struct PlayArgs {
    #[command(flatten)]
    dice: DiceArgs,

    /// Append every commitment and reveal to this JSON-lines file
    #[arg(long, env = "FAIR_DICE_TRANSCRIPT")]
    transcript: Option<PathBuf>,
}

#[derive(Args)]
#[group(required = true, multiple = true)]
struct VerifyArgs {
    /// Transcript file written by `play --transcript`
    #[arg(long, conflicts_with_all = ["commitment", "key", "value"])]
    transcript: Option<PathBuf>,

    /// Published commitment (64 hex characters)
    #[arg(long, requires_all = ["key", "value"])]
    commitment: Option<String>,

    /// Revealed key (64 hex characters)
    #[arg(long, requires = "commitment")]
    key: Option<String>,

    /// Revealed committed value
    #[arg(long, requires = "commitment")]
    value: Option<u8>,
}

fn main() -> Result<ExitCode> {
    let Cli {
        log_level,
        play: default_play,
        command,
    } = Cli::parse();
    let command = command.unwrap_or(Command::Play(default_play));

    let transcript = match &command {
        Command::Play(args) => args.transcript.clone(),
        _ => None,
    };
    let config = CliConfig::new(log_level, transcript);

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(io::stderr)
        .init();

    match command {
        Command::Play(args) => play(&config, &args.dice.dice),
        Command::Table { dice } => print_table(&dice.dice),
        Command::Verify(args) => run_verify(args),
    }
}

fn play(config: &CliConfig, groups: &[String]) -> Result<ExitCode> {
    let dice = parse_dice_list(groups)?;

    let stdin = io::stdin();
    let mut operator = ConsoleOperator::new(stdin.lock(), io::stdout());
    if let Some(path) = &config.transcript {
        let writer = TranscriptWriter::open(path)
            .with_context(|| format!("failed to open transcript {}", path.display()))?;
        info!(path = %path.display(), "recording transcript");
        operator = operator.with_transcript(writer);
    }

    let mut game = DiceGame::new(dice, operator)?;
    match game.play()? {
        Outcome::Finished(result) => {
            info!(match_id = %result.match_id, winner = %result.winner, "match complete");
        }
        Outcome::Aborted => {
            info!(match_id = %game.match_id(), "match aborted");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_table(groups: &[String]) -> Result<ExitCode> {
    let dice = parse_dice_list(groups)?;
    println!("Probability of the win for the user:");
    print!("{}", table::render(&ProbabilityTable::compute(&dice)));
    Ok(ExitCode::SUCCESS)
}

fn run_verify(args: VerifyArgs) -> Result<ExitCode> {
    if let Some(path) = args.transcript {
        let entries = transcript::read_entries(&path)
            .with_context(|| format!("failed to read transcript {}", path.display()))?;
        let checks = verify::verify_transcript(&entries);
        for check in &checks {
            println!("{} {}: {}", check.match_id, check.purpose, check.verdict());
        }
        println!("{} draw(s) checked", checks.len());
        return Ok(exit_for(checks.iter().all(|c| c.ok())));
    }

    // clap enforces that commitment, key and value arrive together
    let (Some(commitment), Some(key), Some(value)) = (args.commitment, args.key, args.value)
    else {
        anyhow::bail!("--commitment, --key and --value are required together");
    };
    let valid = verify::verify_reveal(&commitment, &key, value)?;
    println!("{}", if valid { "valid" } else { "INVALID" });
    Ok(exit_for(valid))
}

fn exit_for(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
