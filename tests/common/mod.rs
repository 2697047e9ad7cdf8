//! Shared helpers for integration tests

#![allow(dead_code)]

use roulette_engine::config::GameSettings;
use roulette_engine::gaming::{
    process_spin, Bet, RouletteSession, ScriptedSpinner, SpinHistory, SpinResult,
};

/// Session on default settings whose wheel lands on `pockets` in order
pub fn scripted_session(pockets: Vec<u8>) -> RouletteSession {
    scripted_session_with(GameSettings::default(), pockets)
}

pub fn scripted_session_with(settings: GameSettings, pockets: Vec<u8>) -> RouletteSession {
    RouletteSession::with_spinner(settings, Box::new(ScriptedSpinner::new(pockets)))
}

/// Settle `bets` against `number` and stamp the result
pub fn spin_result(number: u8, bets: &[Bet]) -> SpinResult {
    SpinResult::record(process_spin(number, bets).expect("valid pocket"))
}

/// History of bet-less spins, oldest first
pub fn history_of(numbers: &[u8]) -> SpinHistory {
    numbers.iter().map(|n| spin_result(*n, &[])).collect()
}

/// Settings tuned so async tests finish quickly
pub fn fast_settings() -> GameSettings {
    GameSettings {
        auto_play_speed_ms: 1,
        reveal_delay_ms: 0,
        ..GameSettings::default()
    }
}
