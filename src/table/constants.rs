// src/table/constants.rs
pub const EUROPEAN_POCKETS: u8 = 37;
pub const AMERICAN_POCKETS: u8 = 38;
pub const ZERO: u8 = 0;
pub const DOUBLE_ZERO: u8 = 37; // American "00" pocket, keyed apart from 0
pub const MAX_TABLE_NUMBER: u8 = 36;

// Wheel coloring
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];
pub const BLACK_NUMBERS: [u8; 18] = [
    2, 4, 6, 8, 10, 11, 13, 15, 17, 20, 22, 24, 26, 28, 29, 31, 33, 35,
];

// European wheel order, clockwise from zero
pub const EUROPEAN_WHEEL_ORDER: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

// Felt layout, top row first
pub const TABLE_LAYOUT: [[u8; 12]; 3] = [
    [3, 6, 9, 12, 15, 18, 21, 24, 27, 30, 33, 36],
    [2, 5, 8, 11, 14, 17, 20, 23, 26, 29, 32, 35],
    [1, 4, 7, 10, 13, 16, 19, 22, 25, 28, 31, 34],
];

// Chip denominations
pub const CHIP_VALUES: [u32; 5] = [1, 5, 10, 25, 100];

// Payout ratios (profit multiple, stake excluded)
pub const PAYOUT_STRAIGHT: u32 = 35;
pub const PAYOUT_SPLIT: u32 = 17;
pub const PAYOUT_STREET: u32 = 11;
pub const PAYOUT_CORNER: u32 = 8;
pub const PAYOUT_LINE: u32 = 5;
pub const PAYOUT_EVEN_MONEY: u32 = 1;
pub const PAYOUT_DOZEN_COLUMN: u32 = 2;

// Session defaults
pub const DEFAULT_STARTING_BALANCE: u64 = 10_000;
pub const DEFAULT_AUTO_PLAY_SPEED_MS: u64 = 2_500;
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 2_000;
