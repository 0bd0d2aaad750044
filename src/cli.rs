use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "herdops", version, about = "Heifer growth tracking and husbandry scheduling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Register a new animal
    AddAnimal {
        /// Unique animal id (ear tag)
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: NaiveDate,
        #[arg(long)]
        breed: String,
        /// Target daily gain in kg/day (default from config)
        #[arg(long)]
        target_gain: Option<f64>,
    },
    /// Log a weigh-in for an animal
    LogWeight {
        #[arg(long)]
        id: String,
        /// Body weight in kg
        #[arg(long)]
        kg: f64,
        /// Weigh-in date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List upcoming husbandry tasks
    DueTasks {
        /// Days ahead to scan (default from config)
        #[arg(long)]
        days: Option<i64>,
    },
    /// Show the feed plan for an animal's latest weight
    FeedPlan {
        #[arg(long)]
        id: String,
    },
    /// Herd summary: head count, average weight, animals below target gain
    Summary,
    /// Write the herd dataset as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Replace the herd dataset from a JSON file
    Import {
        #[arg(long)]
        file: PathBuf,
    },
}
