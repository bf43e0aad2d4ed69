//! Seam between the session loop and its puzzle collaborator.
//!
//! Implemented by `arithmo-puzzles`; the core engine itself never generates
//! questions.

use crate::model::{Puzzle, Tier};

/// A source of puzzles for a given difficulty tier.
pub trait PuzzleSource {
    /// Produce the next question and its correct answer for `tier`.
    fn next_puzzle(&mut self, tier: Tier) -> Puzzle;
}
