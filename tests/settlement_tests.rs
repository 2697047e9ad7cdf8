mod common;

use common::spin_result;
use roulette_engine::gaming::{
    calculate_potential_winnings, calculate_winnings, create_bet, create_bet_by_name,
    create_corner_bet, create_line_bet, create_straight_bet, create_street_bet, find_bets_by_number,
    is_bet_winning, process_spin, validate_bet_placement, Bet,
};
use roulette_engine::table::BetType;
use roulette_engine::Error;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_settlement_is_deterministic() {
    let bets = vec![
        create_bet(BetType::Red, dec!(10), None).unwrap(),
        create_straight_bet(7, dec!(2)).unwrap(),
        create_corner_bet(4, dec!(5)).unwrap(),
    ];
    for number in 0..=36 {
        assert_eq!(
            process_spin(number, &bets).unwrap(),
            process_spin(number, &bets).unwrap()
        );
    }
}

#[test]
fn test_unsorted_numbers_still_win() {
    // Bets arriving from outside the constructors need not be sorted
    let bet = Bet {
        id: uuid::Uuid::new_v4(),
        bet_type: BetType::Street,
        amount: dec!(10),
        numbers: vec![3, 1, 2],
        payout_ratio: BetType::Street.payout_ratio(),
    };
    assert!(is_bet_winning(&bet, 3));
    assert!(!is_bet_winning(&bet, 4));

    let outcome = process_spin(3, std::slice::from_ref(&bet)).unwrap();
    assert_eq!(outcome.total_winnings, dec!(120));
    assert_eq!(outcome.winning_bets.len(), 1);
}

#[test]
fn test_straight_bet_round_trip() {
    let amount = dec!(12.5);
    let bet = create_straight_bet(23, amount).unwrap();
    for number in 0..=36 {
        let outcome = process_spin(number, &[bet.clone()]).unwrap();
        if number == 23 {
            assert_eq!(outcome.total_winnings, amount * dec!(36));
        } else {
            assert_eq!(outcome.total_winnings, Decimal::ZERO);
        }
    }
}

#[test]
fn test_red_bet_pays_double() {
    let bet = create_bet(BetType::Red, dec!(25), None).unwrap();
    assert_eq!(process_spin(1, &[bet.clone()]).unwrap().total_winnings, dec!(50));
    assert_eq!(process_spin(2, &[bet.clone()]).unwrap().total_winnings, Decimal::ZERO);
    assert_eq!(process_spin(0, &[bet]).unwrap().total_winnings, Decimal::ZERO);
}

#[test]
fn test_every_bet_type_pays_its_ratio() {
    let bets = vec![
        create_straight_bet(17, dec!(1)).unwrap(),
        create_bet(BetType::Split, dec!(1), Some(&[17, 20])).unwrap(),
        create_street_bet(16, dec!(1)).unwrap(),
        create_corner_bet(16, dec!(1)).unwrap(),
        create_line_bet(16, dec!(1)).unwrap(),
        create_bet_by_name("black", dec!(1), None).unwrap(),
        create_bet_by_name("odd", dec!(1), None).unwrap(),
        create_bet_by_name("low", dec!(1), None).unwrap(),
        create_bet_by_name("dozen2", dec!(1), None).unwrap(),
        create_bet_by_name("column2", dec!(1), None).unwrap(),
    ];

    // 17 is black, odd, low, second dozen, second column
    let outcome = process_spin(17, &bets).unwrap();
    assert_eq!(outcome.winning_bets.len(), bets.len());
    for bet in &bets {
        assert_eq!(
            calculate_winnings(bet, 17),
            bet.amount * Decimal::from(bet.payout_ratio + 1)
        );
    }
    assert_eq!(
        outcome.total_winnings,
        dec!(36) + dec!(18) + dec!(12) + dec!(9) + dec!(6) + dec!(2) * dec!(3) + dec!(3) * dec!(2)
    );
    assert_eq!(find_bets_by_number(&bets, 17).len(), bets.len());
}

#[test]
fn test_potential_winnings_differ_from_settlement() {
    let bet = create_bet(BetType::Dozen1, dec!(10), None).unwrap();
    assert_eq!(calculate_potential_winnings(&[bet.clone()]), dec!(20));
    assert_eq!(calculate_winnings(&bet, 5), dec!(30));
}

#[test]
fn test_placement_rules() {
    let placed = vec![create_bet(BetType::Black, dec!(50), None).unwrap()];
    let bet = create_bet(BetType::Black, dec!(50), None).unwrap();

    // Duplicates are allowed as long as funds cover them
    assert!(validate_bet_placement(&bet, &placed, dec!(100)).is_ok());
    assert!(matches!(
        validate_bet_placement(&bet, &placed, dec!(99.99)),
        Err(Error::InsufficientBalance(_))
    ));

    let negative = create_bet(BetType::Black, dec!(-1), None).unwrap();
    assert!(matches!(
        validate_bet_placement(&negative, &[], dec!(100)),
        Err(Error::InvalidAmount(_))
    ));
}

#[test]
fn test_unknown_bet_type() {
    assert!(matches!(
        create_bet_by_name("trio", dec!(1), None),
        Err(Error::InvalidBetType(_))
    ));
}

#[test]
fn test_spin_result_records_winners() {
    let winner = create_bet(BetType::Even, dec!(5), None).unwrap();
    let loser = create_bet(BetType::Odd, dec!(5), None).unwrap();
    let result = spin_result(8, &[winner.clone(), loser.clone()]);
    assert!(result.bet_won(winner.id));
    assert!(!result.bet_won(loser.id));
    assert_eq!(result.net_profit, Decimal::ZERO);
    assert_eq!(result.bet_count, 2);
}
