//! Modified Martingale strategy
//!
//! Bets every spin on the side opposite the last result, doubles the stake
//! after each loss while keeping the same side, and resets after a win.
//! Once the loss streak reaches `max_loss_streak` it stops until reset.
//!
//! Nothing in here fails: when no bet can be made the decision says so and
//! carries a reason.

use super::settlement::{SpinHistory, SpinResult};
use crate::table::{BetType, Color};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Strategy settings, fixed for a run unless explicitly updated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub enabled: bool,
    pub initial_bet: Decimal,
    /// Spins of history wanted before recommending activation
    pub pattern_threshold: usize,
    pub max_loss_streak: u32,
    /// Session profit at which auto-play stops; zero disables
    pub target_profit: Decimal,
    /// Side used when there is no history to react to
    pub bet_type: BetType,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_bet: Decimal::TEN,
            pattern_threshold: 2,
            max_loss_streak: 7,
            target_profit: Decimal::ONE_THOUSAND,
            bet_type: BetType::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyState {
    pub is_active: bool,
    pub current_bet: Decimal,
    pub consecutive_losses: u32,
    pub last_pattern: Option<String>,
    pub should_bet: bool,
    pub target_bet_type: Option<BetType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyPhase {
    /// Disabled, or waiting to pick a side
    Idle,
    /// Side chosen at the base stake
    Betting,
    /// Lost at least once; stake doubled, side kept
    Escalating,
    /// Loss limit reached
    Stopped,
}

impl StrategyState {
    pub fn phase(&self, config: &StrategyConfig) -> StrategyPhase {
        if !config.enabled {
            StrategyPhase::Idle
        } else if self.consecutive_losses >= config.max_loss_streak {
            StrategyPhase::Stopped
        } else if self.consecutive_losses > 0 {
            StrategyPhase::Escalating
        } else if self.target_bet_type.is_some() {
            StrategyPhase::Betting
        } else {
            StrategyPhase::Idle
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetDecision {
    pub should_bet: bool,
    pub bet_type: Option<BetType>,
    pub reason: String,
}

impl BetDecision {
    fn skip(reason: &str) -> Self {
        Self {
            should_bet: false,
            bet_type: None,
            reason: reason.to_string(),
        }
    }
}

pub fn initial_strategy_state(config: &StrategyConfig) -> StrategyState {
    StrategyState {
        is_active: config.enabled,
        current_bet: config.initial_bet,
        consecutive_losses: 0,
        last_pattern: None,
        should_bet: false,
        target_bet_type: None,
    }
}

/// Side opposite the newest spin on the dimension of `default_side`
///
/// Red and black react to color; a green result falls back to red.
/// Parity and range sides ignore green and fall back to `default_side`.
fn contrarian_side(history: &SpinHistory, default_side: BetType) -> BetType {
    let Some(last) = history.latest() else {
        return default_side;
    };

    match default_side {
        BetType::Red | BetType::Black => match last.color {
            Color::Red => BetType::Black,
            Color::Black => BetType::Red,
            Color::Green => BetType::Red,
        },
        BetType::Odd | BetType::Even if !last.is_green() => {
            if last.is_odd {
                BetType::Even
            } else {
                BetType::Odd
            }
        }
        BetType::Low | BetType::High if !last.is_green() => {
            if last.is_high {
                BetType::Low
            } else {
                BetType::High
            }
        }
        _ => default_side,
    }
}

/// Decide whether to bet this spin and on which side
pub fn should_place_bet(
    history: &SpinHistory,
    config: &StrategyConfig,
    state: &StrategyState,
) -> BetDecision {
    if !config.enabled {
        return BetDecision::skip("Strategy disabled");
    }
    if state.consecutive_losses >= config.max_loss_streak {
        return BetDecision::skip("Max loss streak reached");
    }

    let bet_type = match state.target_bet_type {
        Some(target) if state.consecutive_losses > 0 => target,
        _ => contrarian_side(history, config.bet_type),
    };

    BetDecision {
        should_bet: true,
        bet_type: Some(bet_type),
        reason: format!("Martingale: Betting {}", bet_type),
    }
}

/// `base * 2^doublings`, saturating at `Decimal::MAX`
fn doubled(base: Decimal, doublings: u32) -> Decimal {
    let mut amount = base;
    for _ in 0..doublings {
        match amount.checked_mul(Decimal::TWO) {
            Some(next) => amount = next,
            None => return Decimal::MAX,
        }
    }
    amount
}

pub fn calculate_bet_amount(config: &StrategyConfig, state: &StrategyState) -> Decimal {
    doubled(config.initial_bet, state.consecutive_losses)
}

/// Total stake needed to ride out a full losing run
///
/// Sums `initial_bet * 2^i` for `i` in `0..=max_loss_streak`.
pub fn calculate_required_bankroll(config: &StrategyConfig) -> Decimal {
    let mut total = Decimal::ZERO;
    for i in 0..=config.max_loss_streak {
        total = match total.checked_add(doubled(config.initial_bet, i)) {
            Some(sum) => sum,
            None => return Decimal::MAX,
        };
    }
    total
}

/// Advance the strategy after a spin
///
/// `won` says whether the strategy's own bet won that spin.
pub fn update_strategy_state(
    state: &StrategyState,
    spin: &SpinResult,
    won: bool,
    config: &StrategyConfig,
) -> StrategyState {
    let mut next = state.clone();

    if won {
        next.consecutive_losses = 0;
        next.current_bet = config.initial_bet;
        next.target_bet_type = None;
        next.last_pattern = None;
        debug!(number = spin.number, "strategy bet won, progression reset");
        return next;
    }

    next.consecutive_losses += 1;
    next.current_bet = calculate_bet_amount(config, &next);
    next.last_pattern = Some(spin.color.to_string());

    if next.consecutive_losses >= config.max_loss_streak {
        next.is_active = false;
        next.should_bet = false;
        warn!(
            losses = next.consecutive_losses,
            limit = config.max_loss_streak,
            "strategy stopped at loss limit"
        );
    } else {
        debug!(
            losses = next.consecutive_losses,
            next_bet = %next.current_bet,
            "strategy bet lost, doubling"
        );
    }

    next
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankrollCheck {
    pub sufficient: bool,
    pub required: Decimal,
    pub shortfall: Decimal,
}

pub fn has_sufficient_bankroll(balance: Decimal, config: &StrategyConfig) -> BankrollCheck {
    let required = calculate_required_bankroll(config);
    let sufficient = balance >= required;
    BankrollCheck {
        sufficient,
        required,
        shortfall: if sufficient {
            Decimal::ZERO
        } else {
            required - balance
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedBet {
    pub bet_type: BetType,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyRecommendation {
    pub should_activate: bool,
    pub reason: String,
    pub suggested_bet: Option<SuggestedBet>,
}

/// Whether turning the strategy on now looks sensible
///
/// Requires the full losing-run bankroll and at least `pattern_threshold`
/// spins of history.
pub fn strategy_recommendation(
    history: &SpinHistory,
    config: &StrategyConfig,
    balance: Decimal,
) -> StrategyRecommendation {
    let check = has_sufficient_bankroll(balance, config);
    if !check.sufficient {
        return StrategyRecommendation {
            should_activate: false,
            reason: format!(
                "Insufficient bankroll. Need ${:.2}, short by ${:.2}",
                check.required, check.shortfall
            ),
            suggested_bet: None,
        };
    }

    if history.len() < config.pattern_threshold {
        return StrategyRecommendation {
            should_activate: false,
            reason: format!(
                "Need at least {} spins to detect patterns",
                config.pattern_threshold
            ),
            suggested_bet: None,
        };
    }

    // Judge as if freshly enabled
    let probe = StrategyConfig {
        enabled: true,
        ..config.clone()
    };
    let decision = should_place_bet(history, &probe, &initial_strategy_state(&probe));
    match decision.bet_type {
        Some(bet_type) if decision.should_bet => {
            info!(%bet_type, "strategy activation recommended");
            StrategyRecommendation {
                should_activate: true,
                reason: decision.reason,
                suggested_bet: Some(SuggestedBet {
                    bet_type,
                    amount: config.initial_bet,
                }),
            }
        }
        _ => StrategyRecommendation {
            should_activate: false,
            reason: "No betting pattern detected yet".to_string(),
            suggested_bet: None,
        },
    }
}
