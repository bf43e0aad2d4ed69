//! Puzzle generation for arithmo.
//!
//! `RandomPuzzles` implements the per-tier operand ranges and operation sets;
//! `ScriptedPuzzles` replays a fixed queue for deterministic tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use arithmo_core::model::{Op, Puzzle, Tier};
use arithmo_core::traits::PuzzleSource;

mod scripted;

pub use scripted::ScriptedPuzzles;

/// Random puzzle generator.
///
/// Tier rules:
/// - easy: operands 1..=10, `+` and `-` (subtraction operands swapped so the
///   result is never negative)
/// - medium: operands 5..=50, adds `×` (multiplication uses 2..=12 instead)
/// - hard: operands 10..=100, adds `÷` (built as divisor × quotient, both
///   2..=10, so division is always exact)
pub struct RandomPuzzles {
    rng: StdRng,
}

impl RandomPuzzles {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn ops_for(tier: Tier) -> &'static [Op] {
        match tier {
            Tier::Easy => &[Op::Add, Op::Sub],
            Tier::Medium => &[Op::Add, Op::Sub, Op::Mul],
            Tier::Hard => &[Op::Add, Op::Sub, Op::Mul, Op::Div],
        }
    }

    fn operand_range(tier: Tier) -> (i64, i64) {
        match tier {
            Tier::Easy => (1, 10),
            Tier::Medium => (5, 50),
            Tier::Hard => (10, 100),
        }
    }
}

impl Default for RandomPuzzles {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleSource for RandomPuzzles {
    fn next_puzzle(&mut self, tier: Tier) -> Puzzle {
        let ops = Self::ops_for(tier);
        let op = ops[self.rng.gen_range(0..ops.len())];
        let (lo, hi) = Self::operand_range(tier);

        let (a, b) = match op {
            Op::Add | Op::Sub => {
                let mut a = self.rng.gen_range(lo..=hi);
                let mut b = self.rng.gen_range(lo..=hi);
                // Easy subtraction stays non-negative.
                if op == Op::Sub && tier == Tier::Easy && a < b {
                    std::mem::swap(&mut a, &mut b);
                }
                (a, b)
            }
            // Keep multiplication answers in times-table range.
            Op::Mul => (self.rng.gen_range(2..=12), self.rng.gen_range(2..=12)),
            Op::Div => {
                let divisor = self.rng.gen_range(2..=10);
                let quotient = self.rng.gen_range(2..=10);
                (divisor * quotient, divisor)
            }
        };

        Puzzle {
            question: format!("{a} {op} {b}"),
            answer: op.apply(a, b),
        }
    }
}
