//! CLI frontend for the TZ interactive fiction.

mod commands;
mod http;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ApiArgs, VoiceArgs};

#[derive(Parser)]
#[command(
    name = "tz",
    about = "TZ: talk a lost war robot through its repairs",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    Play {
        #[command(flatten)]
        api: ApiArgs,

        #[command(flatten)]
        voice: VoiceArgs,

        /// Never call the text generator; use fallback lines only
        #[arg(long)]
        offline: bool,

        /// Print each response as one JSON object per line
        #[arg(long)]
        json: bool,

        /// Pause between messages for their display delay
        #[arg(long)]
        paced: bool,
    },

    /// Show the voice a tone value maps to
    Tone {
        /// Tone value (0-100)
        value: u32,
    },

    /// Show which ending a result earns
    Ending {
        /// Modules repaired (0-5)
        #[arg(short, long)]
        modules: usize,

        /// Final deviation value (-1.0 to 1.0)
        #[arg(short, long, allow_negative_numbers = true)]
        deviation: f64,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            api,
            voice,
            offline,
            json,
            paced,
        } => commands::play::run(&api, &voice, offline, json, paced),
        Commands::Tone { value } => commands::tone::run(value),
        Commands::Ending { modules, deviation } => commands::ending::run(modules, deviation),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
