//! Command-line interface definition and argument parsing

use clap::{Parser, Subcommand};
use roulette_engine::gaming::parse_amount;
use roulette_engine::table::{parse_pocket, BetType};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Command-line interface definition for the roulette engine
#[derive(Parser)]
#[command(name = "roulette")]
#[command(about = "Roulette betting, settlement and Martingale strategy engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Place bets and spin once
    Spin {
        /// Bet as TYPE:AMOUNT or TYPE:NUMBERS:AMOUNT, e.g. red:10, split:1-2:5
        #[arg(short, long = "bet", required = true, value_parser = parse_bet_spec)]
        bets: Vec<BetSpec>,

        /// Seed for a reproducible wheel
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play many spins back to back and report statistics
    Simulate {
        #[arg(long, default_value = "100")]
        spins: usize,

        /// Let the Martingale strategy place the bets
        #[arg(long)]
        strategy: bool,

        #[arg(short, long = "bet", value_parser = parse_bet_spec)]
        bets: Vec<BetSpec>,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Timed auto-play with the strategy, stoppable with Ctrl-C
    Autoplay {
        #[arg(long, default_value = "10")]
        spins: usize,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Bankroll needed to survive a full losing run
    Bankroll {
        #[arg(long, default_value = "10", value_parser = parse_decimal_arg)]
        initial_bet: Decimal,

        #[arg(long, default_value = "7")]
        max_loss_streak: u32,

        /// Balance to check against
        #[arg(long, value_parser = parse_decimal_arg)]
        balance: Option<Decimal>,
    },

    /// Show the table layout and payouts
    Table,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Spin { .. } => "spin",
            Commands::Simulate { .. } => "simulate",
            Commands::Autoplay { .. } => "autoplay",
            Commands::Bankroll { .. } => "bankroll",
            Commands::Table => "table",
        }
    }
}

/// A bet as typed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetSpec {
    pub bet_type: BetType,
    pub numbers: Option<Vec<u8>>,
    pub amount: Decimal,
}

/// Parse `TYPE:AMOUNT` or `TYPE:NUMBERS:AMOUNT`, numbers joined with `-`
pub fn parse_bet_spec(spec: &str) -> Result<BetSpec, String> {
    let parts: Vec<&str> = spec.split(':').collect();
    let (type_part, numbers_part, amount_part) = match parts.as_slice() {
        [bet_type, amount] => (*bet_type, None, *amount),
        [bet_type, numbers, amount] => (*bet_type, Some(*numbers), *amount),
        _ => {
            return Err(format!(
                "Invalid bet '{}'. Use TYPE:AMOUNT or TYPE:NUMBERS:AMOUNT",
                spec
            ))
        }
    };

    let bet_type: BetType = type_part.parse().map_err(|e| format!("{}", e))?;
    let amount = parse_amount(amount_part).map_err(|e| format!("{}", e))?;

    let numbers = match numbers_part {
        Some(list) => Some(
            list.split('-')
                .map(parse_pocket)
                .collect::<Result<Vec<u8>, _>>()
                .map_err(|e| format!("{}", e))?,
        ),
        None => None,
    };

    Ok(BetSpec {
        bet_type,
        numbers,
        amount,
    })
}

pub fn parse_decimal_arg(value: &str) -> Result<Decimal, String> {
    parse_amount(value).map_err(|e| format!("{}", e))
}
