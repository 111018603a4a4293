//! Keccak-f ANF preimage CLI

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use keccak_anf_attack::{AttackConfig, AttackOutcome, PreimageAttack};

#[derive(Parser)]
#[command(name = "keccak-anf-attack")]
#[command(about = "Algebraic preimage search on reduced-round Keccak-f", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the preimage scenario
    Run {
        /// TOML configuration (defaults to the two-round Keccak-f[1600] setting)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as TOML
    ShowConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run { config, json } => {
            cmd_run(config, json)?;
        }
        Commands::ShowConfig => {
            print!("{}", AttackConfig::default().to_toml_string()?);
        }
    }

    Ok(())
}

fn cmd_run(config_path: Option<PathBuf>, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            AttackConfig::load(&path)?
        }
        None => AttackConfig::default(),
    };

    let attack = PreimageAttack::new(config)?;
    let outcome = attack.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        AttackOutcome::Unsatisfiable => {
            println!("No preimage: the constraint system is unsatisfiable");
        }
        AttackOutcome::Recovered {
            lanes,
            verified,
            stats,
        } => {
            println!("Recovered input lanes");
            println!("=====================");
            for (i, lane) in lanes.iter().enumerate() {
                println!("  [{:2}] (x={}, y={}) {:#018x}", i, i % 5, i / 5, lane);
            }
            println!();
            println!(
                "Residue: {} polynomials ({} linear), {} assigned, peak {} terms",
                stats.polys, stats.linear, stats.assigned, stats.peak_terms
            );
            println!(
                "Verification: {}",
                if verified { "PASSED" } else { "FAILED" }
            );
            if !verified {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
