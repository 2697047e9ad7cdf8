//! Timed auto-play
//!
//! Drives a shared session one spin per tick. Each spin holds the session
//! lock only to begin and to settle; the reveal delay in between runs
//! unlocked, and the session's own busy flag keeps a second spin out.
//! A shutdown during the reveal cancels the pending spin, so no money moves.

use super::session::{PendingSpin, RouletteSession};
use super::settlement::SpinResult;
use super::strategy::StrategyPhase;
use crate::error::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    MaxSpins,
    Shutdown,
    StrategyStopped,
    NoBets,
    InsufficientFunds,
    TargetProfitReached,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoPlayReport {
    pub spins_played: usize,
    pub stop_reason: StopReason,
    pub starting_balance: Decimal,
    pub final_balance: Decimal,
    pub net_profit: Decimal,
    pub results: Vec<SpinResult>,
}

/// Stops a running [`AutoPlayer`] from another task
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

pub struct AutoPlayer {
    session: Arc<Mutex<RouletteSession>>,
    shutdown_tx: Arc<watch::Sender<bool>>,
}

enum Step {
    Spin(PendingSpin),
    Stop(StopReason),
}

impl AutoPlayer {
    pub fn new(session: Arc<Mutex<RouletteSession>>) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            session,
            shutdown_tx: Arc::new(shutdown_tx),
        }
    }

    pub fn session(&self) -> Arc<Mutex<RouletteSession>> {
        self.session.clone()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    /// Play until `max_spins` spins settle or something stops the run
    pub async fn run(&self, max_spins: usize) -> Result<AutoPlayReport> {
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        let (tick, reveal, starting_balance) = {
            let session = self.session.lock().await;
            (
                session.settings().auto_play_interval(),
                session.settings().reveal_delay(),
                session.balance(),
            )
        };

        let mut ticker = interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut results = Vec::new();
        info!(max_spins, "auto-play started");

        let stop_reason = loop {
            if results.len() >= max_spins {
                break StopReason::MaxSpins;
            }
            if *shutdown_rx.borrow() {
                break StopReason::Shutdown;
            }

            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown_rx.changed() => {
                    break StopReason::Shutdown;
                }
            }

            let pending = match self.begin_next().await? {
                Step::Spin(pending) => pending,
                Step::Stop(reason) => break reason,
            };

            let cancelled = tokio::select! {
                _ = sleep(reveal) => false,
                _ = shutdown_rx.changed() => true,
            };

            let mut session = self.session.lock().await;
            if cancelled {
                session.cancel_spin(pending)?;
                break StopReason::Shutdown;
            }
            let result = session.settle(pending)?;
            debug!(spin = results.len() + 1, number = result.number, "auto-play spin");
            results.push(result);
        };

        let final_balance = self.session.lock().await.balance();
        info!(
            spins = results.len(),
            reason = ?stop_reason,
            balance = %final_balance,
            "auto-play stopped"
        );

        Ok(AutoPlayReport {
            spins_played: results.len(),
            stop_reason,
            starting_balance,
            final_balance,
            net_profit: final_balance - starting_balance,
            results,
        })
    }

    /// Lay down this spin's bets and resolve the pocket
    async fn begin_next(&self) -> Result<Step> {
        let mut session = self.session.lock().await;
        let config = session.strategy_config().clone();

        if config.enabled
            && config.target_profit > Decimal::ZERO
            && session.session_profit() >= config.target_profit
        {
            return Ok(Step::Stop(StopReason::TargetProfitReached));
        }

        if config.enabled {
            match session.prepare_auto_bets() {
                Ok(Some(_)) => {}
                Ok(None) if session.strategy_phase() == StrategyPhase::Stopped => {
                    return Ok(Step::Stop(StopReason::StrategyStopped));
                }
                Ok(None) => {}
                Err(Error::InsufficientBalance(reason)) => {
                    warn!(%reason, "strategy bet unaffordable");
                    return Ok(Step::Stop(StopReason::InsufficientFunds));
                }
                Err(e) => return Err(e),
            }
        } else if session.current_bets().is_empty() && !session.last_bets().is_empty() {
            match session.repeat_bets() {
                Ok(()) => {}
                Err(Error::InsufficientBalance(_)) => {
                    return Ok(Step::Stop(StopReason::InsufficientFunds));
                }
                Err(e) => return Err(e),
            }
        }

        if session.current_bets().is_empty() {
            return Ok(Step::Stop(StopReason::NoBets));
        }

        match session.begin_spin(None) {
            Ok(pending) => Ok(Step::Spin(pending)),
            Err(Error::InsufficientBalance(_)) => Ok(Step::Stop(StopReason::InsufficientFunds)),
            Err(e) => Err(e),
        }
    }
}
