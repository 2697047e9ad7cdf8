//! Single-player roulette session
//!
//! Owns everything that changes during play: balance, placed bets, history
//! and strategy progress. Money only ever moves in [`RouletteSession::settle`],
//! which applies a whole spin in one step.
//!
//! A spin is two-phase. [`RouletteSession::begin_spin`] checks funds and
//! draws the pocket but leaves money, bets and history untouched; the host
//! may then animate the result before calling `settle`, or drop it with
//! [`RouletteSession::cancel_spin`]. Only one spin may be in flight.

use super::betting::{
    calculate_total_bet_amount, create_bet, double_bets, validate_bet_placement, Bet,
};
use super::settlement::{process_spin, SpinHistory, SpinResult};
use super::statistics::{calculate_statistics, GameStatistics};
use super::strategy::{
    calculate_bet_amount, initial_strategy_state, should_place_bet, strategy_recommendation,
    update_strategy_state, StrategyConfig, StrategyPhase, StrategyRecommendation, StrategyState,
};
use super::wheel::{SecureSpinner, SpinSource};
use crate::config::{validate_strategy_config, GameSettings};
use crate::error::{Error, Result};
use crate::table::{validate_pocket, BetType, WheelVariant};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A resolved but unsettled spin
///
/// Hand it back to the session that issued it to settle or cancel.
#[derive(Debug)]
#[must_use = "a pending spin keeps the session busy until settled or cancelled"]
pub struct PendingSpin {
    ticket: u64,
    number: u8,
    bets: Vec<Bet>,
    /// Spinning the bets on the table rather than a caller-supplied set
    from_table: bool,
}

impl PendingSpin {
    /// Winning pocket, known before settlement so hosts can reveal it
    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    pub fn total_bet_amount(&self) -> Decimal {
        calculate_total_bet_amount(&self.bets)
    }
}

pub struct RouletteSession {
    settings: GameSettings,
    balance: Decimal,
    max_balance: Decimal,
    min_balance: Decimal,
    current_bets: Vec<Bet>,
    last_bets: Vec<Bet>,
    history: SpinHistory,
    strategy_state: StrategyState,
    /// Bet placed by the strategy for the next spin
    strategy_bet: Option<Uuid>,
    spinner: Box<dyn SpinSource>,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl std::fmt::Debug for RouletteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouletteSession")
            .field("balance", &self.balance)
            .field("bets", &self.current_bets.len())
            .field("spins", &self.history.len())
            .field("spinning", &self.in_flight.is_some())
            .finish()
    }
}

impl RouletteSession {
    /// Session spinning with the OS CSPRNG
    pub fn new(settings: GameSettings) -> Self {
        Self::with_spinner(settings, Box::new(SecureSpinner))
    }

    pub fn with_spinner(settings: GameSettings, spinner: Box<dyn SpinSource>) -> Self {
        let balance = settings.starting_balance;
        let strategy_state = initial_strategy_state(&settings.strategy);
        Self {
            settings,
            balance,
            max_balance: balance,
            min_balance: balance,
            current_bets: Vec::new(),
            last_bets: Vec::new(),
            history: SpinHistory::new(),
            strategy_state,
            strategy_bet: None,
            spinner,
            in_flight: None,
            next_ticket: 0,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn variant(&self) -> WheelVariant {
        self.settings.wheel_variant()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn starting_balance(&self) -> Decimal {
        self.settings.starting_balance
    }

    pub fn max_balance(&self) -> Decimal {
        self.max_balance
    }

    pub fn min_balance(&self) -> Decimal {
        self.min_balance
    }

    /// Balance change since the session started
    pub fn session_profit(&self) -> Decimal {
        self.balance - self.settings.starting_balance
    }

    pub fn current_bets(&self) -> &[Bet] {
        &self.current_bets
    }

    pub fn last_bets(&self) -> &[Bet] {
        &self.last_bets
    }

    pub fn total_bet(&self) -> Decimal {
        calculate_total_bet_amount(&self.current_bets)
    }

    pub fn history(&self) -> &SpinHistory {
        &self.history
    }

    pub fn strategy_config(&self) -> &StrategyConfig {
        &self.settings.strategy
    }

    pub fn strategy_state(&self) -> &StrategyState {
        &self.strategy_state
    }

    pub fn strategy_phase(&self) -> StrategyPhase {
        self.strategy_state.phase(&self.settings.strategy)
    }

    pub fn is_spinning(&self) -> bool {
        self.in_flight.is_some()
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.in_flight.is_some() {
            return Err(Error::InvalidState("A spin is already in progress".to_string()));
        }
        Ok(())
    }

    fn check_pockets(&self, bet: &Bet) -> Result<()> {
        let variant = self.variant();
        for number in &bet.numbers {
            validate_pocket(variant, *number)?;
        }
        Ok(())
    }

    /// Place chips on a table position
    ///
    /// Chips on a position that already holds a bet are added to it. Returns
    /// the bet as it now stands.
    pub fn place_bet(
        &mut self,
        bet_type: BetType,
        numbers: Option<&[u8]>,
        amount: Decimal,
    ) -> Result<Bet> {
        self.ensure_idle()?;
        let bet = create_bet(bet_type, amount, numbers)?;
        self.check_pockets(&bet)?;

        if let Err(e) = validate_bet_placement(&bet, &self.current_bets, self.balance) {
            warn!(%bet_type, %amount, error = %e, "bet rejected");
            return Err(e);
        }

        let placed = match self
            .current_bets
            .iter_mut()
            .find(|existing| existing.is_at(bet_type, &bet.numbers))
        {
            Some(existing) => {
                existing.amount += amount;
                existing.clone()
            }
            None => {
                self.current_bets.push(bet.clone());
                bet
            }
        };

        debug!(%bet_type, amount = %placed.amount, "bet placed");
        Ok(placed)
    }

    /// Take `amount` off a bet, removing it once nothing is left
    ///
    /// Returns the remaining bet, or `None` if it was removed.
    pub fn reduce_bet(&mut self, bet_id: Uuid, amount: Decimal) -> Result<Option<Bet>> {
        self.ensure_idle()?;
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(
                "Reduction must be greater than 0".to_string(),
            ));
        }

        let index = self
            .current_bets
            .iter()
            .position(|bet| bet.id == bet_id)
            .ok_or_else(|| Error::InvalidBet(format!("No bet with id {}", bet_id)))?;

        let remaining = self.current_bets[index].amount - amount;
        if remaining <= Decimal::ZERO {
            self.current_bets.remove(index);
            if self.strategy_bet == Some(bet_id) {
                self.strategy_bet = None;
            }
            return Ok(None);
        }

        self.current_bets[index].amount = remaining;
        Ok(Some(self.current_bets[index].clone()))
    }

    pub fn clear_bets(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.current_bets.clear();
        self.strategy_bet = None;
        Ok(())
    }

    /// Double every placed bet, if the balance covers it
    pub fn double_bets(&mut self) -> Result<()> {
        self.ensure_idle()?;
        let doubled = double_bets(&self.current_bets);
        self.replace_bets(doubled)
    }

    /// Place the bets from the previous spin again
    pub fn repeat_bets(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.last_bets.is_empty() {
            return Err(Error::InvalidState("No previous bets to repeat".to_string()));
        }
        let repeated = self
            .last_bets
            .iter()
            .map(|bet| Bet {
                id: Uuid::new_v4(),
                ..bet.clone()
            })
            .collect();
        self.replace_bets(repeated)
    }

    fn replace_bets(&mut self, bets: Vec<Bet>) -> Result<()> {
        let total = calculate_total_bet_amount(&bets);
        if total > self.balance {
            return Err(Error::InsufficientBalance(format!(
                "Need ${}, have ${}",
                total, self.balance
            )));
        }
        self.current_bets = bets;
        self.strategy_bet = None;
        Ok(())
    }

    /// Resolve the next pocket for `bets`, or the placed bets when `None`
    ///
    /// Nothing is debited yet. The session stays busy until the returned
    /// spin is settled or cancelled.
    pub fn begin_spin(&mut self, bets: Option<Vec<Bet>>) -> Result<PendingSpin> {
        self.ensure_idle()?;
        let from_table = bets.is_none();
        let bets = bets.unwrap_or_else(|| self.current_bets.clone());

        for bet in &bets {
            if bet.amount <= Decimal::ZERO {
                return Err(Error::InvalidAmount(
                    "Bet amount must be greater than 0".to_string(),
                ));
            }
            self.check_pockets(bet)?;
        }

        let total = calculate_total_bet_amount(&bets);
        if total > self.balance {
            return Err(Error::InsufficientBalance(format!(
                "Need ${}, have ${}",
                total, self.balance
            )));
        }

        let variant = self.variant();
        let number = self.spinner.next_pocket(variant);
        validate_pocket(variant, number)?;

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.in_flight = Some(ticket);

        debug!(ticket, number, total = %total, "spin resolved");
        Ok(PendingSpin {
            ticket,
            number,
            bets,
            from_table,
        })
    }

    fn release(&mut self, pending: &PendingSpin) -> Result<()> {
        if self.in_flight != Some(pending.ticket) {
            return Err(Error::InvalidState(
                "Pending spin does not belong to this session".to_string(),
            ));
        }
        self.in_flight = None;
        Ok(())
    }

    /// Apply a pending spin: stake, winnings, history and strategy together
    pub fn settle(&mut self, pending: PendingSpin) -> Result<SpinResult> {
        self.release(&pending)?;
        let outcome = process_spin(pending.number, &pending.bets)?;
        let result = SpinResult::record(outcome);

        self.balance += result.net_profit;
        self.max_balance = self.max_balance.max(self.balance);
        self.min_balance = self.min_balance.min(self.balance);
        self.history.push(result.clone());

        let strategy_bet = if pending.from_table {
            self.strategy_bet.take()
        } else {
            None
        };
        if let Some(bet_id) = strategy_bet {
            let placed = pending.bets.iter().any(|bet| bet.id == bet_id);
            if self.settings.strategy.enabled && placed {
                let won = result.bet_won(bet_id);
                self.strategy_state = update_strategy_state(
                    &self.strategy_state,
                    &result,
                    won,
                    &self.settings.strategy,
                );
            }
        }

        if !pending.bets.is_empty() {
            self.last_bets = pending.bets;
        }
        if pending.from_table {
            self.current_bets.clear();
        }

        info!(
            number = result.number,
            color = %result.color,
            net = %result.net_profit,
            balance = %self.balance,
            "spin settled"
        );
        Ok(result)
    }

    /// Drop a pending spin; balance, bets and history are unchanged
    pub fn cancel_spin(&mut self, pending: PendingSpin) -> Result<()> {
        self.release(&pending)?;
        info!(number = pending.number, "spin cancelled");
        Ok(())
    }

    /// Resolve and settle the placed bets in one call
    pub fn spin(&mut self) -> Result<SpinResult> {
        let pending = self.begin_spin(None)?;
        self.settle(pending)
    }

    /// Place this spin's strategy bet, if the strategy wants one
    ///
    /// A strategy bet already on the table is returned as is.
    pub fn prepare_auto_bets(&mut self) -> Result<Option<Bet>> {
        self.ensure_idle()?;
        if let Some(bet_id) = self.strategy_bet {
            if let Some(existing) = self.current_bets.iter().find(|bet| bet.id == bet_id) {
                return Ok(Some(existing.clone()));
            }
            self.strategy_bet = None;
        }
        let config = self.settings.strategy.clone();
        let decision = should_place_bet(&self.history, &config, &self.strategy_state);
        self.strategy_state.should_bet = decision.should_bet;

        let bet_type = match decision.bet_type {
            Some(bet_type) if decision.should_bet => bet_type,
            _ => {
                debug!(reason = %decision.reason, "no strategy bet");
                return Ok(None);
            }
        };

        let amount = calculate_bet_amount(&config, &self.strategy_state);
        let bet = create_bet(bet_type, amount, None)?;
        validate_bet_placement(&bet, &self.current_bets, self.balance)?;

        self.strategy_state.target_bet_type = Some(bet_type);
        self.strategy_state.current_bet = amount;
        self.strategy_state.is_active = true;
        self.strategy_bet = Some(bet.id);
        self.current_bets.push(bet.clone());

        debug!(reason = %decision.reason, %amount, "strategy bet placed");
        Ok(Some(bet))
    }

    pub fn enable_strategy(&mut self, enabled: bool) {
        self.settings.strategy.enabled = enabled;
        self.strategy_state = initial_strategy_state(&self.settings.strategy);
        self.strategy_bet = None;
        info!(enabled, "strategy toggled");
    }

    /// Replace the strategy settings and restart its progression
    pub fn update_strategy_config(&mut self, config: StrategyConfig) -> Result<()> {
        validate_strategy_config(&config)?;
        self.strategy_state = initial_strategy_state(&config);
        self.settings.strategy = config;
        self.strategy_bet = None;
        info!("strategy config updated");
        Ok(())
    }

    /// Apply new settings; this restarts the game
    pub fn update_settings(&mut self, settings: GameSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        self.reset_game();
        Ok(())
    }

    /// Back to the starting balance with empty history
    ///
    /// Any spin still pending becomes stale and can no longer settle.
    pub fn reset_game(&mut self) {
        self.balance = self.settings.starting_balance;
        self.max_balance = self.balance;
        self.min_balance = self.balance;
        self.current_bets.clear();
        self.last_bets.clear();
        self.history.clear();
        self.strategy_state = initial_strategy_state(&self.settings.strategy);
        self.strategy_bet = None;
        self.in_flight = None;
        info!(balance = %self.balance, "game reset");
    }

    pub fn statistics(&self) -> GameStatistics {
        calculate_statistics(
            &self.history,
            self.settings.starting_balance,
            self.balance,
            self.max_balance,
            self.min_balance,
        )
    }

    pub fn recommendation(&self) -> StrategyRecommendation {
        strategy_recommendation(&self.history, &self.settings.strategy, self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaming::wheel::ScriptedSpinner;
    use rust_decimal_macros::dec;

    fn session(pockets: Vec<u8>) -> RouletteSession {
        RouletteSession::with_spinner(
            GameSettings::default(),
            Box::new(ScriptedSpinner::new(pockets)),
        )
    }

    #[test]
    fn test_stacking() {
        let mut session = session(vec![1]);
        let first = session.place_bet(BetType::Red, None, dec!(10)).unwrap();
        let second = session.place_bet(BetType::Red, None, dec!(15)).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(session.current_bets().len(), 1);
        assert_eq!(session.total_bet(), dec!(25));

        session.place_bet(BetType::Straight, Some(&[7]), dec!(1)).unwrap();
        session.place_bet(BetType::Straight, Some(&[8]), dec!(1)).unwrap();
        assert_eq!(session.current_bets().len(), 3);
    }

    #[test]
    fn test_stacking_respects_balance() {
        let mut session = session(vec![1]);
        session.place_bet(BetType::Red, None, dec!(9000)).unwrap();
        assert!(matches!(
            session.place_bet(BetType::Red, None, dec!(1001)),
            Err(Error::InsufficientBalance(_))
        ));
        assert_eq!(session.total_bet(), dec!(9000));
    }

    #[test]
    fn test_double_zero_needs_american_wheel() {
        let mut session = session(vec![1]);
        assert!(matches!(
            session.place_bet(BetType::Straight, Some(&[37]), dec!(1)),
            Err(Error::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_spin_settles_balance() {
        let mut session = session(vec![1]);
        session.place_bet(BetType::Red, None, dec!(100)).unwrap();
        session.place_bet(BetType::Even, None, dec!(50)).unwrap();

        let result = session.spin().unwrap();
        assert_eq!(result.net_profit, dec!(50));
        assert_eq!(session.balance(), dec!(10050));
        assert_eq!(session.max_balance(), dec!(10050));
        assert!(session.current_bets().is_empty());
        assert_eq!(session.last_bets().len(), 2);
    }

    #[test]
    fn test_cancel_leaves_everything() {
        let mut session = session(vec![0]);
        session.place_bet(BetType::Red, None, dec!(100)).unwrap();

        let pending = session.begin_spin(None).unwrap();
        assert_eq!(pending.number(), 0);
        assert_eq!(session.balance(), dec!(10000));
        assert!(session.begin_spin(None).is_err());

        session.cancel_spin(pending).unwrap();
        assert_eq!(session.balance(), dec!(10000));
        assert_eq!(session.current_bets().len(), 1);
        assert!(session.history().is_empty());
        assert!(!session.is_spinning());
    }

    #[test]
    fn test_reset_invalidates_pending() {
        let mut session = session(vec![3]);
        session.place_bet(BetType::Red, None, dec!(10)).unwrap();
        let pending = session.begin_spin(None).unwrap();
        session.reset_game();
        assert!(matches!(session.settle(pending), Err(Error::InvalidState(_))));
        assert_eq!(session.balance(), dec!(10000));
    }

    #[test]
    fn test_repeat_and_double() {
        let mut session = session(vec![2]);
        assert!(session.repeat_bets().is_err());

        session.place_bet(BetType::Red, None, dec!(10)).unwrap();
        session.spin().unwrap();
        assert_eq!(session.balance(), dec!(9990));

        session.repeat_bets().unwrap();
        session.double_bets().unwrap();
        assert_eq!(session.total_bet(), dec!(20));
    }

    #[test]
    fn test_reduce_bet() {
        let mut session = session(vec![2]);
        let bet = session.place_bet(BetType::Odd, None, dec!(10)).unwrap();
        let left = session.reduce_bet(bet.id, dec!(4)).unwrap().unwrap();
        assert_eq!(left.amount, dec!(6));
        assert!(session.reduce_bet(bet.id, dec!(6)).unwrap().is_none());
        assert!(session.current_bets().is_empty());
    }

    #[test]
    fn test_strategy_progression_through_session() {
        // black, black, red
        let mut session = session(vec![2, 4, 1]);
        session.enable_strategy(true);

        let bet = session.prepare_auto_bets().unwrap().unwrap();
        assert_eq!(bet.bet_type, BetType::Red);
        session.spin().unwrap();
        assert_eq!(session.strategy_state().consecutive_losses, 1);

        let bet = session.prepare_auto_bets().unwrap().unwrap();
        assert_eq!(bet.bet_type, BetType::Red);
        assert_eq!(bet.amount, dec!(20));
        session.spin().unwrap();

        let bet = session.prepare_auto_bets().unwrap().unwrap();
        assert_eq!(bet.amount, dec!(40));
        session.spin().unwrap();
        assert_eq!(session.strategy_state().consecutive_losses, 0);
        assert_eq!(session.balance(), dec!(10010));
    }

    #[test]
    fn test_statistics_follow_history() {
        let mut session = session(vec![1, 2, 0]);
        for _ in 0..3 {
            session.place_bet(BetType::Red, None, dec!(10)).unwrap();
            session.spin().unwrap();
        }
        let stats = session.statistics();
        assert_eq!(stats.total_spins, 3);
        assert_eq!(stats.total_bets, 3);
        assert_eq!(stats.net_profit, session.session_profit());
        assert_eq!(stats.min_balance, dec!(9990));
    }
}
