//! Spin resolution
//!
//! The wheel is the single source of game randomness. Production play uses
//! the operating system CSPRNG; simulations can opt into a seeded ChaCha20
//! stream, and tests script the exact pockets they need.

use crate::table::WheelVariant;
use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Source of winning pockets
pub trait SpinSource: Send {
    /// Next winning pocket for the given wheel
    fn next_pocket(&mut self, variant: WheelVariant) -> u8;
}

/// Map raw 32-bit draws to `0..pockets` without modulo bias
pub fn uniform_pocket<R: RngCore + ?Sized>(rng: &mut R, pockets: u8) -> u8 {
    let range = pockets as u32;
    // Largest multiple of `range` that fits; draws at or above it are rerolled
    let threshold = u32::MAX - (u32::MAX % range);
    let mut value = rng.next_u32();
    while value >= threshold {
        value = rng.next_u32();
    }
    (value % range) as u8
}

/// Spin a European wheel with the OS CSPRNG
pub fn spin_wheel() -> u8 {
    SecureSpinner.next_pocket(WheelVariant::European)
}

/// Unpredictable spins backed by `OsRng`
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureSpinner;

impl SpinSource for SecureSpinner {
    fn next_pocket(&mut self, variant: WheelVariant) -> u8 {
        uniform_pocket(&mut OsRng, variant.pockets())
    }
}

/// Reproducible spins for simulations
///
/// Uses ChaCha20 so a given seed yields the same sequence on every platform.
#[derive(Clone, Debug)]
pub struct SeededSpinner {
    seed: [u8; 32],
    inner: ChaCha20Rng,
}

impl SeededSpinner {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            seed,
            inner: ChaCha20Rng::from_seed(seed),
        }
    }

    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::from_seed(bytes)
    }

    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }
}

impl SpinSource for SeededSpinner {
    fn next_pocket(&mut self, variant: WheelVariant) -> u8 {
        uniform_pocket(&mut self.inner, variant.pockets())
    }
}

/// Replays a fixed list of pockets, wrapping around at the end
#[derive(Clone, Debug)]
pub struct ScriptedSpinner {
    sequence: Vec<u8>,
    cursor: usize,
}

impl ScriptedSpinner {
    /// `sequence` must not be empty
    pub fn new(sequence: Vec<u8>) -> Self {
        assert!(!sequence.is_empty(), "scripted spinner needs at least one pocket");
        Self { sequence, cursor: 0 }
    }
}

impl SpinSource for ScriptedSpinner {
    fn next_pocket(&mut self, _variant: WheelVariant) -> u8 {
        let pocket = self.sequence[self.cursor % self.sequence.len()];
        self.cursor += 1;
        pocket
    }
}
