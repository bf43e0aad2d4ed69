//! Scripted puzzle source for deterministic tests.

use std::collections::VecDeque;

use arithmo_core::model::{Puzzle, Tier};
use arithmo_core::traits::PuzzleSource;

/// Replays a fixed queue of puzzles, ignoring the requested tier.
///
/// When the queue runs dry it falls back to a trivial constant puzzle so the
/// session loop under test never stalls.
pub struct ScriptedPuzzles {
    queue: VecDeque<Puzzle>,
    served: usize,
}

impl ScriptedPuzzles {
    pub fn new(puzzles: impl IntoIterator<Item = Puzzle>) -> Self {
        Self {
            queue: puzzles.into_iter().collect(),
            served: 0,
        }
    }

    /// How many puzzles have been handed out so far.
    pub fn served(&self) -> usize {
        self.served
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl PuzzleSource for ScriptedPuzzles {
    fn next_puzzle(&mut self, _tier: Tier) -> Puzzle {
        self.served += 1;
        self.queue.pop_front().unwrap_or_else(|| Puzzle {
            question: "1 + 1".to_string(),
            answer: 2,
        })
    }
}
