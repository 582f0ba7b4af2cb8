//! Injectable randomness for the combat engine and world generator.
//!
//! Gameplay code never touches a global RNG; it draws through the [`Dice`]
//! trait so a fixed seed (or a scripted sequence in tests) reproduces every
//! distribution exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The three draws the game needs: an inclusive integer range, a uniform
/// index into a collection, and a 1..=100 percentile roll for weighted
/// rarity tables.
pub trait Dice {
    /// Uniform integer in `lo..=hi`.
    fn roll(&mut self, lo: i32, hi: i32) -> i32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform integer in `1..=100`.
    fn percent(&mut self) -> u32 {
        self.roll(1, 100) as u32
    }
}

/// Production dice backed by [`StdRng`]. Seeded from config for
/// reproducible runs, or from entropy.
pub struct SeededDice {
    rng: StdRng,
}

impl SeededDice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Dice for SeededDice {
    fn roll(&mut self, lo: i32, hi: i32) -> i32 {
        self.rng.gen_range(lo..=hi)
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Deterministic dice for tests: pops predetermined values front-to-back.
/// Panics on an empty script so a test that under-provisions its rolls
/// fails loudly instead of silently drifting.
#[derive(Default)]
pub struct ScriptedDice {
    values: std::collections::VecDeque<i64>,
}

impl ScriptedDice {
    pub fn new(values: &[i64]) -> Self {
        Self {
            values: values.iter().copied().collect(),
        }
    }

    pub fn push(&mut self, value: i64) {
        self.values.push_back(value);
    }

    pub fn is_exhausted(&self) -> bool {
        self.values.is_empty()
    }

    fn next(&mut self) -> i64 {
        self.values
            .pop_front()
            .expect("scripted dice ran out of values")
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, lo: i32, hi: i32) -> i32 {
        let v = self.next();
        assert!(
            v >= lo as i64 && v <= hi as i64,
            "scripted roll {} outside {}..={}",
            v,
            lo,
            hi
        );
        v as i32
    }

    fn index(&mut self, len: usize) -> usize {
        let v = self.next();
        assert!(
            v >= 0 && (v as usize) < len,
            "scripted index {} outside 0..{}",
            v,
            len
        );
        v as usize
    }
}
