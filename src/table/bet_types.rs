//! Bet type definitions for the roulette table
//!
//! Every bet type has a fixed payout ratio. Outside bets also cover a fixed
//! set of numbers; inside bets cover whatever table position the player
//! picked, so their numbers arrive with the bet.

use super::constants::*;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const fn stepped<const N: usize>(start: u8, step: u8) -> [u8; N] {
    let mut out = [0u8; N];
    let mut i = 0;
    while i < N {
        out[i] = start + (i as u8) * step;
        i += 1;
    }
    out
}

pub const ODD_NUMBERS: [u8; 18] = stepped(1, 2);
pub const EVEN_NUMBERS: [u8; 18] = stepped(2, 2);
pub const LOW_NUMBERS: [u8; 18] = stepped(1, 1);
pub const HIGH_NUMBERS: [u8; 18] = stepped(19, 1);
pub const DOZEN1_NUMBERS: [u8; 12] = stepped(1, 1);
pub const DOZEN2_NUMBERS: [u8; 12] = stepped(13, 1);
pub const DOZEN3_NUMBERS: [u8; 12] = stepped(25, 1);
pub const COLUMN1_NUMBERS: [u8; 12] = stepped(1, 3);
pub const COLUMN2_NUMBERS: [u8; 12] = stepped(2, 3);
pub const COLUMN3_NUMBERS: [u8; 12] = stepped(3, 3);

/// Complete bet types in roulette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    // Inside bets
    Straight,
    Split,
    Street,
    Corner,
    Line,

    // Even-money outside bets
    Red,
    Black,
    Odd,
    Even,
    Low,
    High,

    // Dozens
    Dozen1,
    Dozen2,
    Dozen3,

    // Columns
    Column1,
    Column2,
    Column3,
}

impl BetType {
    pub const ALL: [BetType; 17] = [
        BetType::Straight,
        BetType::Split,
        BetType::Street,
        BetType::Corner,
        BetType::Line,
        BetType::Red,
        BetType::Black,
        BetType::Odd,
        BetType::Even,
        BetType::Low,
        BetType::High,
        BetType::Dozen1,
        BetType::Dozen2,
        BetType::Dozen3,
        BetType::Column1,
        BetType::Column2,
        BetType::Column3,
    ];

    /// Profit multiple paid on a win, stake excluded
    pub fn payout_ratio(&self) -> u32 {
        match self {
            BetType::Straight => PAYOUT_STRAIGHT,
            BetType::Split => PAYOUT_SPLIT,
            BetType::Street => PAYOUT_STREET,
            BetType::Corner => PAYOUT_CORNER,
            BetType::Line => PAYOUT_LINE,
            BetType::Red
            | BetType::Black
            | BetType::Odd
            | BetType::Even
            | BetType::Low
            | BetType::High => PAYOUT_EVEN_MONEY,
            BetType::Dozen1
            | BetType::Dozen2
            | BetType::Dozen3
            | BetType::Column1
            | BetType::Column2
            | BetType::Column3 => PAYOUT_DOZEN_COLUMN,
        }
    }

    /// Fixed covered numbers; `None` for inside bets
    pub fn fixed_numbers(&self) -> Option<&'static [u8]> {
        let numbers: &'static [u8] = match self {
            BetType::Straight
            | BetType::Split
            | BetType::Street
            | BetType::Corner
            | BetType::Line => return None,
            BetType::Red => &RED_NUMBERS,
            BetType::Black => &BLACK_NUMBERS,
            BetType::Odd => &ODD_NUMBERS,
            BetType::Even => &EVEN_NUMBERS,
            BetType::Low => &LOW_NUMBERS,
            BetType::High => &HIGH_NUMBERS,
            BetType::Dozen1 => &DOZEN1_NUMBERS,
            BetType::Dozen2 => &DOZEN2_NUMBERS,
            BetType::Dozen3 => &DOZEN3_NUMBERS,
            BetType::Column1 => &COLUMN1_NUMBERS,
            BetType::Column2 => &COLUMN2_NUMBERS,
            BetType::Column3 => &COLUMN3_NUMBERS,
        };
        Some(numbers)
    }

    /// How many numbers an inside bet covers
    pub fn inside_size(&self) -> Option<usize> {
        match self {
            BetType::Straight => Some(1),
            BetType::Split => Some(2),
            BetType::Street => Some(3),
            BetType::Corner => Some(4),
            BetType::Line => Some(6),
            _ => None,
        }
    }

    pub fn is_inside(&self) -> bool {
        self.inside_size().is_some()
    }

    pub fn is_even_money(&self) -> bool {
        self.payout_ratio() == PAYOUT_EVEN_MONEY
    }

    /// The other side of an even-money bet
    pub fn opposite(&self) -> Option<BetType> {
        match self {
            BetType::Red => Some(BetType::Black),
            BetType::Black => Some(BetType::Red),
            BetType::Odd => Some(BetType::Even),
            BetType::Even => Some(BetType::Odd),
            BetType::Low => Some(BetType::High),
            BetType::High => Some(BetType::Low),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BetType::Straight => "straight",
            BetType::Split => "split",
            BetType::Street => "street",
            BetType::Corner => "corner",
            BetType::Line => "line",
            BetType::Red => "red",
            BetType::Black => "black",
            BetType::Odd => "odd",
            BetType::Even => "even",
            BetType::Low => "low",
            BetType::High => "high",
            BetType::Dozen1 => "dozen1",
            BetType::Dozen2 => "dozen2",
            BetType::Dozen3 => "dozen3",
            BetType::Column1 => "column1",
            BetType::Column2 => "column2",
            BetType::Column3 => "column3",
        }
    }

    /// Felt label
    pub fn label(&self) -> &'static str {
        match self {
            BetType::Straight => "Straight",
            BetType::Split => "Split",
            BetType::Street => "Street",
            BetType::Corner => "Corner",
            BetType::Line => "Line",
            BetType::Red => "Red",
            BetType::Black => "Black",
            BetType::Odd => "Odd",
            BetType::Even => "Even",
            BetType::Low => "1-18",
            BetType::High => "19-36",
            BetType::Dozen1 => "1st 12",
            BetType::Dozen2 => "2nd 12",
            BetType::Dozen3 => "3rd 12",
            BetType::Column1 | BetType::Column2 | BetType::Column3 => "2 to 1",
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "straight" | "straight-up" => Ok(BetType::Straight),
            "split" => Ok(BetType::Split),
            "street" => Ok(BetType::Street),
            "corner" => Ok(BetType::Corner),
            "line" | "six-line" => Ok(BetType::Line),
            "red" => Ok(BetType::Red),
            "black" => Ok(BetType::Black),
            "odd" => Ok(BetType::Odd),
            "even" => Ok(BetType::Even),
            "low" | "1-18" => Ok(BetType::Low),
            "high" | "19-36" => Ok(BetType::High),
            "dozen1" | "1st12" => Ok(BetType::Dozen1),
            "dozen2" | "2nd12" => Ok(BetType::Dozen2),
            "dozen3" | "3rd12" => Ok(BetType::Dozen3),
            "column1" => Ok(BetType::Column1),
            "column2" => Ok(BetType::Column2),
            "column3" => Ok(BetType::Column3),
            other => Err(Error::InvalidBetType(format!("'{}' is not a bet type", other))),
        }
    }
}
