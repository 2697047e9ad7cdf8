//! Bet construction and placement validation
//!
//! Bets are plain records: a type, a stake, the numbers they cover and the
//! payout ratio captured when they were made. Placement checks only look
//! at amounts and funds; stacking chips on an existing position is the
//! session's job.

use crate::error::{Error, Result};
use crate::table::{pocket_label, roulette_number, BetType, DOUBLE_ZERO, MAX_TABLE_NUMBER, ZERO};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single wager on the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub id: Uuid,
    pub bet_type: BetType,
    pub amount: Decimal,
    /// Covered numbers, ascending when built by `create_bet`
    pub numbers: Vec<u8>,
    pub payout_ratio: u32,
}

impl Bet {
    pub fn covers(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }

    /// Same table position: same type and the same covered numbers
    pub fn is_at(&self, bet_type: BetType, numbers: &[u8]) -> bool {
        self.bet_type == bet_type && self.numbers == numbers
    }
}

/// Create a bet of the given type
///
/// Outside bets cover their fixed set; `numbers`, when given, must match it.
/// Inside bets need numbers forming a legal position for the type.
pub fn create_bet(bet_type: BetType, amount: Decimal, numbers: Option<&[u8]>) -> Result<Bet> {
    let numbers = resolve_numbers(bet_type, numbers.unwrap_or(&[]))?;
    Ok(Bet {
        id: Uuid::new_v4(),
        bet_type,
        amount,
        numbers,
        payout_ratio: bet_type.payout_ratio(),
    })
}

/// Create a bet from a type name such as `"red"` or `"dozen2"`
pub fn create_bet_by_name(name: &str, amount: Decimal, numbers: Option<&[u8]>) -> Result<Bet> {
    let bet_type: BetType = name.parse()?;
    create_bet(bet_type, amount, numbers)
}

pub fn create_straight_bet(number: u8, amount: Decimal) -> Result<Bet> {
    create_bet(BetType::Straight, amount, Some(&[number]))
}

pub fn create_split_bet(first: u8, second: u8, amount: Decimal) -> Result<Bet> {
    create_bet(BetType::Split, amount, Some(&[first, second]))
}

/// Street starting at the first number of a row (1, 4, ..., 34)
pub fn create_street_bet(row_start: u8, amount: Decimal) -> Result<Bet> {
    let numbers = [row_start, row_start.saturating_add(1), row_start.saturating_add(2)];
    create_bet(BetType::Street, amount, Some(&numbers))
}

/// Corner anchored at its lowest number
pub fn create_corner_bet(top_left: u8, amount: Decimal) -> Result<Bet> {
    let numbers = [
        top_left,
        top_left.saturating_add(1),
        top_left.saturating_add(3),
        top_left.saturating_add(4),
    ];
    create_bet(BetType::Corner, amount, Some(&numbers))
}

/// Two adjacent rows starting at `row_start`
pub fn create_line_bet(row_start: u8, amount: Decimal) -> Result<Bet> {
    let numbers: Vec<u8> = (0..6).map(|i| row_start.saturating_add(i)).collect();
    create_bet(BetType::Line, amount, Some(&numbers))
}

fn resolve_numbers(bet_type: BetType, supplied: &[u8]) -> Result<Vec<u8>> {
    for number in supplied {
        roulette_number(*number)?;
    }

    let mut numbers = supplied.to_vec();
    numbers.sort_unstable();
    numbers.dedup();
    if numbers.len() != supplied.len() {
        return Err(Error::InvalidBet(format!(
            "{} bet lists a number more than once",
            bet_type
        )));
    }

    if let Some(fixed) = bet_type.fixed_numbers() {
        if numbers.is_empty() || numbers == fixed {
            return Ok(fixed.to_vec());
        }
        return Err(Error::InvalidBet(format!(
            "{} bet covers a fixed set of numbers",
            bet_type
        )));
    }

    let expected = bet_type.inside_size().unwrap_or(1);
    if numbers.len() != expected {
        return Err(Error::InvalidBet(format!(
            "{} bet needs {} number(s), got {}",
            bet_type,
            expected,
            numbers.len()
        )));
    }

    if !is_legal_position(bet_type, &numbers) {
        let labels: Vec<String> = numbers.iter().map(|n| pocket_label(*n)).collect();
        return Err(Error::InvalidBet(format!(
            "[{}] is not a {} on the table",
            labels.join(", "),
            bet_type
        )));
    }

    Ok(numbers)
}

/// `numbers` is sorted and sized for the type
fn is_legal_position(bet_type: BetType, numbers: &[u8]) -> bool {
    let first = numbers[0];
    let on_felt = |n: u8| (1..=MAX_TABLE_NUMBER).contains(&n);
    let row_start = |n: u8| on_felt(n) && n % 3 == 1;

    match bet_type {
        BetType::Straight => first <= DOUBLE_ZERO,
        BetType::Split => {
            let second = numbers[1];
            if first == ZERO {
                return (1..=3).contains(&second);
            }
            on_felt(first)
                && on_felt(second)
                && (second == first + 3 || (second == first + 1 && first % 3 != 0))
        }
        BetType::Street => row_start(first) && numbers == [first, first + 1, first + 2],
        BetType::Corner => {
            on_felt(first)
                && first % 3 != 0
                && first + 4 <= MAX_TABLE_NUMBER
                && numbers == [first, first + 1, first + 3, first + 4]
        }
        BetType::Line => {
            row_start(first)
                && first + 5 <= MAX_TABLE_NUMBER
                && numbers.iter().enumerate().all(|(i, n)| *n == first + i as u8)
        }
        _ => false,
    }
}

/// Check that `bet` can join `current_bets` with the given balance
pub fn validate_bet_placement(bet: &Bet, current_bets: &[Bet], balance: Decimal) -> Result<()> {
    if bet.amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount(
            "Bet amount must be greater than 0".to_string(),
        ));
    }

    let total = calculate_total_bet_amount(current_bets) + bet.amount;
    if total > balance {
        return Err(Error::InsufficientBalance(format!(
            "Need ${}, have ${}",
            total, balance
        )));
    }

    Ok(())
}

/// Parse a user-entered stake
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let amount: Decimal = input
        .trim()
        .parse()
        .map_err(|_| Error::InvalidAmount(format!("'{}' is not an amount", input.trim())))?;
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount(format!(
            "{} is not a positive amount",
            amount
        )));
    }
    Ok(amount)
}

pub fn calculate_total_bet_amount(bets: &[Bet]) -> Decimal {
    bets.iter().map(|bet| bet.amount).sum()
}

/// Profit if every bet won, stakes excluded
pub fn calculate_potential_winnings(bets: &[Bet]) -> Decimal {
    bets.iter()
        .map(|bet| bet.amount * Decimal::from(bet.payout_ratio))
        .sum()
}

/// Copies of `bets` at twice the stake, with fresh ids
pub fn double_bets(bets: &[Bet]) -> Vec<Bet> {
    bets.iter()
        .map(|bet| Bet {
            id: Uuid::new_v4(),
            amount: bet.amount * Decimal::TWO,
            ..bet.clone()
        })
        .collect()
}

pub fn find_bet_by_type(bets: &[Bet], bet_type: BetType) -> Option<&Bet> {
    bets.iter().find(|bet| bet.bet_type == bet_type)
}

pub fn find_bets_by_number(bets: &[Bet], number: u8) -> Vec<&Bet> {
    bets.iter().filter(|bet| bet.covers(number)).collect()
}

pub fn remove_bet(bets: &[Bet], bet_id: Uuid) -> Vec<Bet> {
    bets.iter().filter(|bet| bet.id != bet_id).cloned().collect()
}

pub fn describe_bet(bet: &Bet) -> String {
    if bet.bet_type.is_inside() {
        let labels: Vec<String> = bet.numbers.iter().map(|n| pocket_label(*n)).collect();
        format!("{}: {} (${})", bet.bet_type.label(), labels.join("/"), bet.amount)
    } else {
        format!("{}: ${}", bet.bet_type.label(), bet.amount)
    }
}
