//! Roulette engine - betting, settlement, statistics and strategy
//!
//! The crate is organized as layers, bottom up:
//! - table: the wheel and felt, pockets and bet types with their payouts
//! - gaming: bets, spins, settlement, statistics, the Martingale strategy,
//!   and the stateful session plus its async auto-play driver
//! - config: game settings loaded from TOML and the environment
//! - logging: tracing subscriber setup for binaries
//!
//! Rules are plain functions over plain data, so they can be tested without
//! a session. `RouletteSession` strings them together and is the only place
//! a balance changes.

pub mod config;
pub mod error;
pub mod gaming;
pub mod logging;
pub mod table;

// Re-export commonly used types for easy access
pub use config::GameSettings;
pub use error::{Error, Result};
pub use gaming::{
    calculate_statistics, create_bet, process_spin, should_place_bet, spin_wheel,
    update_strategy_state, validate_bet_placement, AutoPlayer, Bet, GameStatistics,
    RouletteSession, SpinHistory, SpinResult, StrategyConfig, StrategyState,
};
pub use table::{BetType, Color, RouletteNumber, WheelVariant};
