use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::{analysis::Analysis, app::App, config::Config, history::History};

mod analysis;
mod app;
mod config;
mod history;
mod page;
mod utils;

/// Browse a player's typing-performance history in the terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Player to show stats for
    #[arg(short, long)]
    player: String,

    /// Key to plot the speed history of
    #[arg(short, long)]
    key: Option<String>,

    /// Rolling-average window applied to the key speed plot
    #[arg(short, long)]
    smoothness: Option<usize>,

    /// How many transitions to list in the ranked views
    #[arg(long)]
    digraphs: Option<usize>,

    /// How many trigrams to list in the ranked view
    #[arg(long)]
    trigrams: Option<usize>,

    /// Directory containing the per-player history files
    #[arg(long)]
    stats_dir: Option<PathBuf>,

    /// Configuration directory override
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::get(args.config)?;

    let settings = &mut config.settings;
    if let Some(dir) = args.stats_dir {
        settings.stats_dir = Some(dir);
    }
    if let Some(smoothness) = args.smoothness {
        settings.smoothness = smoothness;
    }
    if let Some(top) = args.digraphs {
        settings.digraph_top = top;
    }
    if let Some(top) = args.trigrams {
        settings.trigram_top = top;
    }

    let history = History::load(&config.stats_dir(), &args.player)?;
    let analysis = Analysis::compute(&history, args.key.as_deref(), &config.settings);

    App::new(config, analysis).run()?;

    Ok(())
}
