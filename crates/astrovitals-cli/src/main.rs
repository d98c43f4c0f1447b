//! CLI for astrovitals: a crew vitals dashboard running on simulated sensors.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "astrovitals")]
#[command(about = "astrovitals — simulated crew vital signs, ECG and anomaly drills")]
#[command(version = astrovitals_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live interactive vitals dashboard (TUI)
    Monitor {
        /// Waveform frames per second (overrides the config file)
        #[arg(long)]
        fps: Option<u32>,

        /// Seed the simulation for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Path to a JSON dashboard config
        #[arg(long)]
        config: Option<String>,
    },

    /// Headless run: print one readout per metric tick plus anomaly changes
    Run {
        /// Stop after this many seconds (default: until Ctrl+C)
        #[arg(long)]
        duration: Option<f64>,

        /// Seed the simulation for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Path to a JSON dashboard config
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON lines instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Print the static environmental forecast
    Forecast {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as JSON
    Config,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Monitor { fps, seed, config } => {
            commands::monitor::run(config.as_deref(), seed, fps)
        }
        Commands::Run {
            duration,
            seed,
            config,
            json,
        } => commands::run::run(commands::run::RunCommandConfig {
            config_path: config.as_deref(),
            seed,
            duration_secs: duration,
            json,
        }),
        Commands::Forecast { json } => commands::forecast::run(json),
        Commands::Config => commands::config::run(),
    }
}
