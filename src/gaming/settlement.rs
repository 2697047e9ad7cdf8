//! Settlement of placed bets against a winning pocket
//!
//! Settlement is a pure function of (pocket, bets). Moving money is left to
//! the caller, which applies `net_profit` to the balance in one step.

use super::betting::Bet;
use crate::error::Result;
use crate::table::{roulette_number, Color};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Outcome of settling one spin, before it is stamped into history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub number: u8,
    pub color: Color,
    pub is_odd: bool,
    pub is_high: bool,
    pub winning_bets: Vec<Bet>,
    /// Stake returned plus profit, summed over winning bets
    pub total_winnings: Decimal,
    pub total_bet_amount: Decimal,
    pub net_profit: Decimal,
    /// Bets placed for the spin, winning or not
    pub bet_count: usize,
}

/// A settled spin as recorded in history; never mutated afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub number: u8,
    pub color: Color,
    pub is_odd: bool,
    pub is_high: bool,
    pub winning_bets: Vec<Bet>,
    pub total_winnings: Decimal,
    pub total_bet_amount: Decimal,
    pub net_profit: Decimal,
    pub bet_count: usize,
}

impl SpinResult {
    /// Stamp an outcome with an id and the current time
    pub fn record(outcome: SpinOutcome) -> Self {
        Self::record_at(outcome, Utc::now())
    }

    pub fn record_at(outcome: SpinOutcome, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            number: outcome.number,
            color: outcome.color,
            is_odd: outcome.is_odd,
            is_high: outcome.is_high,
            winning_bets: outcome.winning_bets,
            total_winnings: outcome.total_winnings,
            total_bet_amount: outcome.total_bet_amount,
            net_profit: outcome.net_profit,
            bet_count: outcome.bet_count,
        }
    }

    pub fn is_green(&self) -> bool {
        self.color == Color::Green
    }

    pub fn bet_won(&self, bet_id: Uuid) -> bool {
        self.winning_bets.iter().any(|bet| bet.id == bet_id)
    }
}

pub fn is_bet_winning(bet: &Bet, spin_number: u8) -> bool {
    bet.covers(spin_number)
}

/// Stake plus profit for a winning bet, zero otherwise
pub fn calculate_winnings(bet: &Bet, spin_number: u8) -> Decimal {
    if is_bet_winning(bet, spin_number) {
        bet.amount * Decimal::from(bet.payout_ratio + 1)
    } else {
        Decimal::ZERO
    }
}

/// Settle every bet against `spin_number`
pub fn process_spin(spin_number: u8, bets: &[Bet]) -> Result<SpinOutcome> {
    let pocket = roulette_number(spin_number)?;
    let mut winning_bets = Vec::new();
    let mut total_winnings = Decimal::ZERO;
    let mut total_bet_amount = Decimal::ZERO;

    for bet in bets {
        total_bet_amount += bet.amount;
        if is_bet_winning(bet, spin_number) {
            total_winnings += calculate_winnings(bet, spin_number);
            winning_bets.push(bet.clone());
        }
    }

    debug!(
        number = spin_number,
        bets = bets.len(),
        winners = winning_bets.len(),
        %total_winnings,
        "settled spin"
    );

    Ok(SpinOutcome {
        number: spin_number,
        color: pocket.color,
        is_odd: pocket.is_odd,
        is_high: pocket.is_high,
        winning_bets,
        total_winnings,
        total_bet_amount,
        net_profit: total_winnings - total_bet_amount,
        bet_count: bets.len(),
    })
}

/// Append-only spin history, stored oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpinHistory {
    spins: Vec<SpinResult>,
}

impl SpinHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, spin: SpinResult) {
        self.spins.push(spin);
    }

    pub fn len(&self) -> usize {
        self.spins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    /// Most recent spin
    pub fn latest(&self) -> Option<&SpinResult> {
        self.spins.last()
    }

    /// Oldest first
    pub fn chronological(&self) -> &[SpinResult] {
        &self.spins
    }

    /// Newest first, the display order
    pub fn recent(&self) -> impl Iterator<Item = &SpinResult> {
        self.spins.iter().rev()
    }

    pub fn total_net_profit(&self) -> Decimal {
        self.spins.iter().map(|spin| spin.net_profit).sum()
    }

    pub fn clear(&mut self) {
        self.spins.clear();
    }
}

impl FromIterator<SpinResult> for SpinHistory {
    fn from_iter<I: IntoIterator<Item = SpinResult>>(iter: I) -> Self {
        Self {
            spins: iter.into_iter().collect(),
        }
    }
}
