//! Static roulette table model
//!
//! Pure lookups over the wheel: color, parity, range, dozen and column for
//! every pocket, plus the closed set of bet types in [`bet_types`].
//! Nothing in here holds state.

pub mod bet_types;
pub mod constants;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use bet_types::BetType;
pub use constants::*;

/// Pocket color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::Green => "green",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wheel variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WheelVariant {
    /// Single zero, 37 pockets
    #[default]
    European,
    /// Zero and double zero, 38 pockets
    American,
}

impl WheelVariant {
    pub fn from_is_european(is_european: bool) -> Self {
        if is_european {
            WheelVariant::European
        } else {
            WheelVariant::American
        }
    }

    /// Number of pockets on this wheel
    pub fn pockets(&self) -> u8 {
        match self {
            WheelVariant::European => EUROPEAN_POCKETS,
            WheelVariant::American => AMERICAN_POCKETS,
        }
    }

    pub fn contains(&self, pocket: u8) -> bool {
        pocket < self.pockets()
    }

    /// Pocket order around the wheel, where one is defined
    pub fn wheel_order(&self) -> Option<&'static [u8]> {
        match self {
            WheelVariant::European => Some(&EUROPEAN_WHEEL_ORDER),
            WheelVariant::American => None,
        }
    }
}

/// Immutable description of a single pocket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouletteNumber {
    pub number: u8,
    pub color: Color,
    pub is_odd: bool,
    /// 19-36
    pub is_high: bool,
    pub dozen: Option<u8>,
    pub column: Option<u8>,
}

impl RouletteNumber {
    const fn derive(number: u8) -> Self {
        if number == ZERO || number == DOUBLE_ZERO {
            return Self {
                number,
                color: Color::Green,
                is_odd: false,
                is_high: false,
                dozen: None,
                column: None,
            };
        }

        Self {
            number,
            color: color_of(number),
            is_odd: number % 2 == 1,
            is_high: number >= 19,
            dozen: Some((number - 1) / 12 + 1),
            column: Some((number - 1) % 3 + 1),
        }
    }

    /// Zero pockets carry no parity or range
    pub fn is_zero(&self) -> bool {
        self.color == Color::Green
    }

    /// Table label, "00" for the American double zero
    pub fn label(&self) -> String {
        pocket_label(self.number)
    }
}

const fn color_of(number: u8) -> Color {
    let mut i = 0;
    while i < RED_NUMBERS.len() {
        if RED_NUMBERS[i] == number {
            return Color::Red;
        }
        i += 1;
    }
    Color::Black
}

const fn build_numbers() -> [RouletteNumber; AMERICAN_POCKETS as usize] {
    let mut numbers = [RouletteNumber::derive(0); AMERICAN_POCKETS as usize];
    let mut n = 0;
    while n < AMERICAN_POCKETS {
        numbers[n as usize] = RouletteNumber::derive(n);
        n += 1;
    }
    numbers
}

/// Every pocket, indexed by value; index 37 is the American "00"
pub static ROULETTE_NUMBERS: [RouletteNumber; AMERICAN_POCKETS as usize] = build_numbers();

/// European pockets 0-36
pub fn european_numbers() -> &'static [RouletteNumber] {
    &ROULETTE_NUMBERS[..EUROPEAN_POCKETS as usize]
}

/// Look up a pocket (0-36, or 37 for "00")
pub fn roulette_number(number: u8) -> Result<RouletteNumber> {
    ROULETTE_NUMBERS
        .get(number as usize)
        .copied()
        .ok_or_else(|| Error::InvalidNumber(format!("{} is not a roulette pocket", number)))
}

/// Reject pockets that do not exist on the given wheel
pub fn validate_pocket(variant: WheelVariant, number: u8) -> Result<RouletteNumber> {
    if !variant.contains(number) {
        return Err(Error::InvalidNumber(format!(
            "{} is outside the {:?} wheel (0-{})",
            pocket_label(number),
            variant,
            variant.pockets() - 1
        )));
    }
    roulette_number(number)
}

pub fn number_color(number: u8) -> Result<Color> {
    roulette_number(number).map(|n| n.color)
}

pub fn pocket_label(number: u8) -> String {
    if number == DOUBLE_ZERO {
        "00".to_string()
    } else {
        number.to_string()
    }
}

/// Parse a pocket label, accepting "00" for the double zero
pub fn parse_pocket(label: &str) -> Result<u8> {
    let label = label.trim();
    if label == "00" {
        return Ok(DOUBLE_ZERO);
    }
    let number: u8 = label
        .parse()
        .map_err(|_| Error::InvalidNumber(format!("'{}' is not a pocket number", label)))?;
    if number > MAX_TABLE_NUMBER {
        return Err(Error::InvalidNumber(format!("{} is outside 0-36", number)));
    }
    Ok(number)
}
