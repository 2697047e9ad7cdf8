//! Game settings
//!
//! Settings come from an optional TOML file, then environment overrides,
//! then validation. Anything missing from the file takes its default.

use crate::error::{Error, Result};
use crate::gaming::strategy::StrategyConfig;
use crate::table::{
    WheelVariant, DEFAULT_AUTO_PLAY_SPEED_MS, DEFAULT_REVEAL_DELAY_MS, DEFAULT_STARTING_BALANCE,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Longest loss streak the strategy may be configured to ride out
pub const MAX_LOSS_STREAK_LIMIT: u32 = 30;

/// Settings a session is created from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub starting_balance: Decimal,
    pub is_european: bool,
    /// Time between auto-play spins
    pub auto_play_speed_ms: u64,
    /// Pause between resolving a pocket and settling it
    pub reveal_delay_ms: u64,
    pub strategy: StrategyConfig,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            starting_balance: Decimal::from(DEFAULT_STARTING_BALANCE),
            is_european: true,
            auto_play_speed_ms: DEFAULT_AUTO_PLAY_SPEED_MS,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            strategy: StrategyConfig::default(),
        }
    }
}

impl GameSettings {
    /// Load from `path` if given, otherwise defaults; then apply environment
    /// overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        settings.override_from_env()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let settings: GameSettings = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        debug!(path = %path.display(), "loaded game settings");
        Ok(settings)
    }

    fn override_from_env(&mut self) -> Result<()> {
        if let Ok(val) = env::var("ROULETTE_STARTING_BALANCE") {
            self.starting_balance = val
                .trim()
                .parse()
                .map_err(|_| Error::Config("Invalid starting balance".to_string()))?;
        }

        if let Ok(val) = env::var("ROULETTE_EUROPEAN") {
            self.is_european = parse_flag(&val)
                .ok_or_else(|| Error::Config("Invalid wheel flag".to_string()))?;
        }

        if let Ok(val) = env::var("ROULETTE_AUTOPLAY_SPEED_MS") {
            self.auto_play_speed_ms = val
                .trim()
                .parse()
                .map_err(|_| Error::Config("Invalid auto-play speed".to_string()))?;
        }

        if let Ok(val) = env::var("ROULETTE_REVEAL_DELAY_MS") {
            self.reveal_delay_ms = val
                .trim()
                .parse()
                .map_err(|_| Error::Config("Invalid reveal delay".to_string()))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_balance <= Decimal::ZERO {
            return Err(Error::Config("Starting balance must be > 0".to_string()));
        }

        if self.auto_play_speed_ms == 0 {
            return Err(Error::Config("Auto-play speed must be > 0".to_string()));
        }

        validate_strategy_config(&self.strategy)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, contents)
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn wheel_variant(&self) -> WheelVariant {
        WheelVariant::from_is_european(self.is_european)
    }

    pub fn auto_play_interval(&self) -> Duration {
        Duration::from_millis(self.auto_play_speed_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

pub fn validate_strategy_config(config: &StrategyConfig) -> Result<()> {
    if config.initial_bet <= Decimal::ZERO {
        return Err(Error::Config("Initial bet must be > 0".to_string()));
    }

    if config.max_loss_streak == 0 || config.max_loss_streak > MAX_LOSS_STREAK_LIMIT {
        return Err(Error::Config(format!(
            "Max loss streak must be between 1 and {}",
            MAX_LOSS_STREAK_LIMIT
        )));
    }

    if config.target_profit < Decimal::ZERO {
        return Err(Error::Config("Target profit cannot be negative".to_string()));
    }

    if !config.bet_type.is_even_money() {
        return Err(Error::Config(format!(
            "Strategy side must be an even-money bet, got {}",
            config.bet_type
        )));
    }

    Ok(())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::BetType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.starting_balance, dec!(10000));
        assert!(settings.is_european);
        assert_eq!(settings.wheel_variant(), WheelVariant::European);
        assert_eq!(settings.auto_play_speed_ms, 2500);
        assert_eq!(settings.strategy.max_loss_streak, 7);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut settings = GameSettings::default();
        settings.starting_balance = Decimal::ZERO;
        assert!(settings.validate().is_err());

        let mut settings = GameSettings::default();
        settings.strategy.max_loss_streak = 31;
        assert!(settings.validate().is_err());

        let mut settings = GameSettings::default();
        settings.strategy.bet_type = BetType::Dozen1;
        assert!(settings.validate().is_err());

        let mut settings = GameSettings::default();
        settings.auto_play_speed_ms = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roulette.toml");

        let mut settings = GameSettings::default();
        settings.is_european = false;
        settings.strategy.enabled = true;
        settings.strategy.initial_bet = dec!(5);
        settings.save(&path).unwrap();

        let loaded = GameSettings::load_from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "is_european = false\n\n[strategy]\nmax_loss_streak = 5\n").unwrap();

        let loaded = GameSettings::load_from_file(&path).unwrap();
        assert!(!loaded.is_european);
        assert_eq!(loaded.strategy.max_loss_streak, 5);
        assert_eq!(loaded.strategy.initial_bet, dec!(10));
        assert_eq!(loaded.starting_balance, dec!(10000));
    }

    #[test]
    fn test_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "starting_balance = [").unwrap();
        assert!(matches!(
            GameSettings::load_from_file(&path),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            GameSettings::load_from_file(&dir.path().join("missing.toml")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
