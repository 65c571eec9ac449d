//! College Baseball Watchlist CLI
//!
//! Builds the 7-day report of ranked games worth watching.

use clap::{Parser, Subcommand};
use watchlist::{Config, Result};

#[derive(Parser)]
#[command(name = "watchlist")]
#[command(about = "Top ranked college baseball games for the week ahead", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "watchlist.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch schedules and rankings, then write the report
    Run {
        /// First day of the window (YYYY-MM-DD), defaults to today in the reference zone
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
        /// Output directory, overrides `output_dir` from the config
        #[arg(long)]
        output: Option<String>,
    },
    /// Fetch and print the current Top-25
    Rankings,
    /// Write a config file with the default settings
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run { date, output } => commands::run(&config, date, output),
        Commands::Rankings => commands::rankings(&config),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use chrono::NaiveDate;
    use watchlist::data::{RankingsScraper, ScoreboardScraper};
    use watchlist::pipeline::{load_rankings, Pipeline};
    use watchlist::report;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Edit {} to pick favorite teams and bonuses", config_path);
        println!("  2. Run 'watchlist run' to build the report");

        Ok(())
    }

    pub fn run(config: &Config, date: Option<NaiveDate>, output: Option<String>) -> Result<()> {
        let pipeline = Pipeline::new(
            ScoreboardScraper::new(config)?,
            RankingsScraper::new(config)?,
            config,
        );

        let today = date.unwrap_or_else(|| pipeline.today());
        log::info!(
            "Building {}-day watchlist starting {} ({})",
            config.lookahead_days,
            today,
            config.timezone
        );

        let run = pipeline.run(today)?;
        let dir = output.unwrap_or_else(|| config.output_dir.clone());
        let written = report::write_report(&run, config.reference_tz(), &dir)?;

        println!("Watchlist for {} days starting {}", run.days.len(), today);
        println!("───────────────────────────────");
        for (day, games) in &run.days {
            println!("{}", day.format("%a %b %-d"));
            if games.is_empty() {
                println!("  (no ranked games)");
            }
            for game in games {
                println!("  {:>3}  {}", game.score, game.matchup());
            }
        }
        println!();
        for path in written {
            println!("Wrote {}", path.display());
        }

        Ok(())
    }

    pub fn rankings(config: &Config) -> Result<()> {
        let table = load_rankings(&RankingsScraper::new(config)?)?;

        println!("Top 25 ({} teams)", table.len());
        println!("───────────────────────────────");
        for (rank, team) in table.sorted() {
            println!("  {:>2}  {}", rank, team);
        }

        Ok(())
    }
}
