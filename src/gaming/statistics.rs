//! Game statistics recomputed from spin history
//!
//! Nothing here is persisted; [`calculate_statistics`] rebuilds the full
//! picture from history and the balance bounds every time it is asked.
//!
//! Streak rules, per dimension:
//! - color: a green pocket ends any red or black run
//! - parity and range: green pockets have neither, so they are skipped
//!   without ending or extending a run
//!
//! Each dimension is tracked on its own so a break in one never cuts
//! another short.

use super::settlement::{SpinHistory, SpinResult};
use crate::table::Color;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Streak lengths per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub red: u32,
    pub black: u32,
    pub odd: u32,
    pub even: u32,
    pub high: u32,
    pub low: u32,
}

/// Aggregate view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStatistics {
    pub total_spins: usize,
    pub total_bets: usize,
    pub winning_spins: usize,
    pub total_wagered: Decimal,
    pub total_winnings: Decimal,
    pub net_profit: Decimal,

    // Color distribution
    pub red_count: usize,
    pub black_count: usize,
    pub green_count: usize,
    pub red_percentage: f64,
    pub black_percentage: f64,
    pub green_percentage: f64,

    // Parity distribution, green excluded
    pub odd_count: usize,
    pub even_count: usize,
    pub odd_percentage: f64,
    pub even_percentage: f64,

    // Range distribution, green excluded
    pub high_count: usize,
    pub low_count: usize,
    pub high_percentage: f64,
    pub low_percentage: f64,

    /// Runs ending at the latest spin
    pub consecutive: Streaks,
    /// Longest runs seen anywhere in history
    pub max_consecutive: Streaks,

    // Bankroll
    pub starting_balance: Decimal,
    pub current_balance: Decimal,
    pub max_balance: Decimal,
    pub min_balance: Decimal,
}

/// Running and best length of one side's streak
#[derive(Debug, Clone, Copy, Default)]
struct StreakTracker {
    running: u32,
    best: u32,
}

impl StreakTracker {
    fn extend(&mut self) {
        self.running += 1;
        self.best = self.best.max(self.running);
    }

    fn reset(&mut self) {
        self.running = 0;
    }
}

/// Tracks both sides of a two-valued dimension
#[derive(Debug, Clone, Copy, Default)]
struct SidedTracker {
    yes: StreakTracker,
    no: StreakTracker,
}

impl SidedTracker {
    fn observe(&mut self, side: bool) {
        if side {
            self.yes.extend();
            self.no.reset();
        } else {
            self.no.extend();
            self.yes.reset();
        }
    }

    fn break_both(&mut self) {
        self.yes.reset();
        self.no.reset();
    }
}

fn parity_of(spin: &SpinResult) -> Option<bool> {
    (!spin.is_green()).then_some(spin.is_odd)
}

fn range_of(spin: &SpinResult) -> Option<bool> {
    (!spin.is_green()).then_some(spin.is_high)
}

/// Length of the run ending at the newest spin
///
/// `key` returns `None` for spins invisible to the dimension.
fn current_run<K, F>(history: &SpinHistory, key: F) -> Option<(K, u32)>
where
    K: PartialEq,
    F: Fn(&SpinResult) -> Option<K>,
{
    let mut visible = history.recent().filter_map(|spin| key(spin));
    let target = visible.next()?;
    let mut length = 1;
    for value in visible {
        if value != target {
            break;
        }
        length += 1;
    }
    Some((target, length))
}

/// Runs ending at the newest spin, each dimension walked independently
pub fn current_streaks(history: &SpinHistory) -> Streaks {
    let mut streaks = Streaks::default();

    match current_run(history, |spin| Some(spin.color)) {
        Some((Color::Red, n)) => streaks.red = n,
        Some((Color::Black, n)) => streaks.black = n,
        _ => {}
    }

    match current_run(history, parity_of) {
        Some((true, n)) => streaks.odd = n,
        Some((false, n)) => streaks.even = n,
        None => {}
    }

    match current_run(history, range_of) {
        Some((true, n)) => streaks.high = n,
        Some((false, n)) => streaks.low = n,
        None => {}
    }

    streaks
}

/// Longest runs over the whole history, walked oldest first
pub fn max_streaks(history: &SpinHistory) -> Streaks {
    let mut color = SidedTracker::default();
    let mut parity = SidedTracker::default();
    let mut range = SidedTracker::default();

    for spin in history.chronological() {
        match spin.color {
            Color::Red => color.observe(true),
            Color::Black => color.observe(false),
            Color::Green => color.break_both(),
        }
        if let Some(odd) = parity_of(spin) {
            parity.observe(odd);
        }
        if let Some(high) = range_of(spin) {
            range.observe(high);
        }
    }

    Streaks {
        red: color.yes.best,
        black: color.no.best,
        odd: parity.yes.best,
        even: parity.no.best,
        high: range.yes.best,
        low: range.no.best,
    }
}

/// `count / total * 100`, or 0 when there is nothing to divide by
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Rebuild session statistics from history and balance bounds
pub fn calculate_statistics(
    history: &SpinHistory,
    starting_balance: Decimal,
    current_balance: Decimal,
    max_balance: Decimal,
    min_balance: Decimal,
) -> GameStatistics {
    let mut red_count = 0;
    let mut black_count = 0;
    let mut green_count = 0;
    let mut odd_count = 0;
    let mut even_count = 0;
    let mut high_count = 0;
    let mut low_count = 0;
    let mut total_bets = 0;
    let mut winning_spins = 0;
    let mut total_wagered = Decimal::ZERO;
    let mut total_winnings = Decimal::ZERO;

    for spin in history.chronological() {
        match spin.color {
            Color::Red => red_count += 1,
            Color::Black => black_count += 1,
            Color::Green => green_count += 1,
        }
        if !spin.is_green() {
            if spin.is_odd {
                odd_count += 1;
            } else {
                even_count += 1;
            }
            if spin.is_high {
                high_count += 1;
            } else {
                low_count += 1;
            }
        }

        total_bets += spin.bet_count;
        total_wagered += spin.total_bet_amount;
        total_winnings += spin.total_winnings;
        if spin.net_profit > Decimal::ZERO {
            winning_spins += 1;
        }
    }

    let total_spins = history.len();
    let non_green = total_spins - green_count;

    GameStatistics {
        total_spins,
        total_bets,
        winning_spins,
        total_wagered,
        total_winnings,
        net_profit: total_winnings - total_wagered,
        red_count,
        black_count,
        green_count,
        red_percentage: percentage(red_count, total_spins),
        black_percentage: percentage(black_count, total_spins),
        green_percentage: percentage(green_count, total_spins),
        odd_count,
        even_count,
        odd_percentage: percentage(odd_count, non_green),
        even_percentage: percentage(even_count, non_green),
        high_count,
        low_count,
        high_percentage: percentage(high_count, non_green),
        low_percentage: percentage(low_count, non_green),
        consecutive: current_streaks(history),
        max_consecutive: max_streaks(history),
        starting_balance,
        current_balance,
        max_balance,
        min_balance,
    }
}
