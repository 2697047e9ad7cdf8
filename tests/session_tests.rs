mod common;

use common::{scripted_session, scripted_session_with};
use roulette_engine::config::GameSettings;
use roulette_engine::gaming::{create_bet, StrategyConfig, StrategyPhase};
use roulette_engine::table::{BetType, DOUBLE_ZERO};
use roulette_engine::Error;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_balance_matches_history() {
    let mut session = scripted_session(vec![1, 0, 17, 36, 2, 13]);
    for _ in 0..6 {
        session.place_bet(BetType::Red, None, dec!(15)).unwrap();
        session.place_bet(BetType::Straight, Some(&[17]), dec!(2)).unwrap();
        session.place_bet(BetType::Dozen2, None, dec!(5)).unwrap();
        session.spin().unwrap();
    }

    let expected = session.starting_balance() + session.history().total_net_profit();
    assert_eq!(session.balance(), expected);
    assert!(session.max_balance() >= session.balance());
    assert!(session.min_balance() <= session.balance());
}

#[test]
fn test_explicit_bets_leave_placed_bets_alone() {
    let mut session = scripted_session(vec![5]);
    session.place_bet(BetType::Black, None, dec!(10)).unwrap();

    let explicit = vec![create_bet(BetType::Odd, dec!(20), None).unwrap()];
    let pending = session.begin_spin(Some(explicit)).unwrap();
    assert_eq!(pending.total_bet_amount(), dec!(20));
    let result = session.settle(pending).unwrap();

    assert_eq!(result.net_profit, dec!(20));
    assert_eq!(session.balance(), dec!(10020));

    assert_eq!(session.current_bets().len(), 1);
    assert_eq!(session.current_bets()[0].bet_type, BetType::Black);
    assert_eq!(session.total_bet(), dec!(10));
}

#[test]
fn test_explicit_bets_keep_strategy_bet_pending() {
    let mut session = scripted_session(vec![5, 2]);
    session.enable_strategy(true);
    let strategy_bet = session.prepare_auto_bets().unwrap().unwrap();

    let explicit = vec![create_bet(BetType::Odd, dec!(20), None).unwrap()];
    let pending = session.begin_spin(Some(explicit)).unwrap();
    session.settle(pending).unwrap();
    assert_eq!(session.strategy_state().consecutive_losses, 0);

    // 2 is black, so the red strategy bet loses when it finally spins
    assert_eq!(session.prepare_auto_bets().unwrap().unwrap().id, strategy_bet.id);
    session.spin().unwrap();
    assert_eq!(session.strategy_state().consecutive_losses, 1);
}

#[test]
fn test_prepare_auto_bets_twice_places_one_bet() {
    let mut session = scripted_session(vec![1]);
    session.enable_strategy(true);

    let first = session.prepare_auto_bets().unwrap().unwrap();
    let second = session.prepare_auto_bets().unwrap().unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(session.current_bets().len(), 1);
    assert_eq!(session.total_bet(), dec!(10));
}

#[test]
fn test_second_spin_rejected_while_pending() {
    let mut session = scripted_session(vec![3, 4]);
    session.place_bet(BetType::Red, None, dec!(10)).unwrap();

    let pending = session.begin_spin(None).unwrap();
    assert!(session.is_spinning());
    assert!(matches!(session.begin_spin(None), Err(Error::InvalidState(_))));
    assert!(matches!(
        session.place_bet(BetType::Red, None, dec!(1)),
        Err(Error::InvalidState(_))
    ));

    session.settle(pending).unwrap();
    assert!(!session.is_spinning());
}

#[test]
fn test_cancel_then_spin_again() {
    let mut session = scripted_session(vec![2, 1]);
    session.place_bet(BetType::Red, None, dec!(100)).unwrap();

    let pending = session.begin_spin(None).unwrap();
    session.cancel_spin(pending).unwrap();
    assert_eq!(session.balance(), dec!(10000));

    // The wheel moves on; the cancelled pocket is never applied
    let result = session.spin().unwrap();
    assert_eq!(result.number, 1);
    assert_eq!(session.balance(), dec!(10100));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_spin_without_funds() {
    let settings = GameSettings {
        starting_balance: dec!(20),
        ..GameSettings::default()
    };
    let mut session = scripted_session_with(settings, vec![2]);
    let bets = vec![create_bet(BetType::Red, dec!(21), None).unwrap()];
    assert!(matches!(
        session.begin_spin(Some(bets)),
        Err(Error::InsufficientBalance(_))
    ));
    assert!(!session.is_spinning());
}

#[test]
fn test_american_wheel() {
    let settings = GameSettings {
        is_european: false,
        ..GameSettings::default()
    };
    let mut session = scripted_session_with(settings, vec![DOUBLE_ZERO]);
    session
        .place_bet(BetType::Straight, Some(&[DOUBLE_ZERO]), dec!(1))
        .unwrap();
    session.place_bet(BetType::Red, None, dec!(10)).unwrap();

    let result = session.spin().unwrap();
    assert_eq!(result.number, DOUBLE_ZERO);
    assert_eq!(result.net_profit, dec!(25));
    assert!(result.is_green());
}

#[test]
fn test_european_wheel_rejects_double_zero_spins() {
    let mut session = scripted_session(vec![DOUBLE_ZERO]);
    session.place_bet(BetType::Red, None, dec!(10)).unwrap();
    assert!(matches!(session.spin(), Err(Error::InvalidNumber(_))));
    assert!(!session.is_spinning());
    assert_eq!(session.balance(), dec!(10000));
}

#[test]
fn test_strategy_stops_at_limit() {
    let mut session = scripted_session(vec![2]);
    session
        .update_strategy_config(StrategyConfig {
            enabled: true,
            max_loss_streak: 3,
            ..StrategyConfig::default()
        })
        .unwrap();

    for _ in 0..3 {
        assert!(session.prepare_auto_bets().unwrap().is_some());
        session.spin().unwrap();
    }
    assert_eq!(session.strategy_phase(), StrategyPhase::Stopped);
    assert!(session.prepare_auto_bets().unwrap().is_none());
    assert_eq!(session.balance(), dec!(10000) - dec!(10) - dec!(20) - dec!(40));

    session.enable_strategy(true);
    assert_eq!(session.strategy_phase(), StrategyPhase::Idle);
    assert!(session.prepare_auto_bets().unwrap().is_some());
}

#[test]
fn test_update_settings_resets() {
    let mut session = scripted_session(vec![1]);
    session.place_bet(BetType::Red, None, dec!(10)).unwrap();
    session.spin().unwrap();

    let settings = GameSettings {
        starting_balance: dec!(500),
        ..GameSettings::default()
    };
    session.update_settings(settings).unwrap();
    assert_eq!(session.balance(), dec!(500));
    assert!(session.history().is_empty());
    assert!(session.last_bets().is_empty());

    let bad = GameSettings {
        starting_balance: Decimal::ZERO,
        ..GameSettings::default()
    };
    assert!(matches!(session.update_settings(bad), Err(Error::Config(_))));
    assert_eq!(session.balance(), dec!(500));
}

#[test]
fn test_statistics_and_recommendation() {
    let mut session = scripted_session(vec![1, 2]);
    assert!(!session.recommendation().should_activate);

    for _ in 0..2 {
        session.place_bet(BetType::Odd, None, dec!(10)).unwrap();
        session.spin().unwrap();
    }
    let stats = session.statistics();
    assert_eq!(stats.total_spins, 2);
    assert_eq!(stats.net_profit, Decimal::ZERO);
    assert_eq!(stats.max_balance, dec!(10010));

    let recommendation = session.recommendation();
    assert!(recommendation.should_activate);
    assert_eq!(
        recommendation.suggested_bet.map(|bet| bet.bet_type),
        Some(BetType::Red)
    );
}
