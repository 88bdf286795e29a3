use clap::{ArgAction, Parser, Subcommand};

use crate::models::GemColor;

#[derive(Debug, Parser)]
#[command(
    name = "gemcheck",
    version,
    about = "Expected value of Path of Exile transfigured gem rolls"
)]
pub struct Cli {
    /// League to price against (defaults to the first active league)
    #[arg(short, long, global = true)]
    pub league: Option<String>,

    /// Number of top priced gems listed per color pool
    #[arg(long, global = true, default_value_t = 10)]
    pub top: usize,

    /// Ignore cached prices and fetch fresh ones
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Keep the cache in memory only (ignored by clear-cache)
    #[arg(long, global = true)]
    pub no_disk_cache: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List active leagues
    Leagues,
    /// Base gems ranked by the EV of a specific roll
    Gems {
        /// Only show one color (red, green, blue)
        #[arg(short, long)]
        color: Option<GemColor>,
    },
    /// Best-of-three EV and top priced gems of each color pool
    Pool {
        #[arg(short, long)]
        color: Option<GemColor>,
    },
    /// Variants, prices and odds for one base gem
    Detail {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Find base gems by name
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Drop every cached league, catalog and price entry
    ClearCache,
}

impl Command {
    /// Colors a command should render, in display order.
    pub fn colors(color: Option<GemColor>) -> Vec<GemColor> {
        match color {
            Some(c) => vec![c],
            None => GemColor::ALL.to_vec(),
        }
    }
}
