//! Roulette gaming engine
//!
//! ## Pure rules
//! - `betting`: bet construction, table geometry, placement checks
//! - `wheel`: pocket draws behind the [`SpinSource`] seam
//! - `settlement`: settle bets against a pocket, spin history
//! - `statistics`: distributions and streaks rebuilt from history
//! - `strategy`: the modified Martingale decision engine
//!
//! ## Stateful play
//! - `session`: balance, bets and history with two-phase spins
//! - `auto_play`: timed async driver over a shared session

pub mod auto_play;
pub mod betting;
pub mod session;
pub mod settlement;
pub mod statistics;
pub mod strategy;
pub mod wheel;

pub use auto_play::{AutoPlayReport, AutoPlayer, ShutdownHandle, StopReason};
pub use betting::{
    calculate_potential_winnings, calculate_total_bet_amount, create_bet, create_bet_by_name,
    create_corner_bet, create_line_bet, create_split_bet, create_straight_bet, create_street_bet,
    describe_bet, find_bet_by_type, find_bets_by_number, parse_amount, remove_bet,
    validate_bet_placement, Bet,
};
pub use session::{PendingSpin, RouletteSession};
pub use settlement::{
    calculate_winnings, is_bet_winning, process_spin, SpinHistory, SpinOutcome, SpinResult,
};
pub use statistics::{calculate_statistics, current_streaks, max_streaks, GameStatistics, Streaks};
pub use strategy::{
    calculate_bet_amount, calculate_required_bankroll, has_sufficient_bankroll,
    initial_strategy_state, should_place_bet, strategy_recommendation, update_strategy_state,
    BankrollCheck, BetDecision, StrategyConfig, StrategyPhase, StrategyRecommendation,
    StrategyState, SuggestedBet,
};
pub use wheel::{spin_wheel, ScriptedSpinner, SecureSpinner, SeededSpinner, SpinSource};
