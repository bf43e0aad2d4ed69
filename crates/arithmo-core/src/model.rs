//! Core data model types for arithmo.
//!
//! These are the fundamental types that the entire arithmo system uses to
//! represent difficulty tiers, puzzles, and recorded attempts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// One of the three ordered difficulty tiers: easy < medium < hard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    /// All tiers, in ascending order.
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    /// Ordinal position: easy = 0, medium = 1, hard = 2.
    pub fn index(self) -> usize {
        match self {
            Tier::Easy => 0,
            Tier::Medium => 1,
            Tier::Hard => 2,
        }
    }

    /// The next tier up, saturating at hard. Transitions are always a single
    /// step; tiers are never skipped.
    pub fn harder(self) -> Tier {
        match self {
            Tier::Easy => Tier::Medium,
            Tier::Medium | Tier::Hard => Tier::Hard,
        }
    }

    /// The next tier down, saturating at easy.
    pub fn easier(self) -> Tier {
        match self {
            Tier::Hard => Tier::Medium,
            Tier::Medium | Tier::Easy => Tier::Easy,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Easy => write!(f, "easy"),
            Tier::Medium => write!(f, "medium"),
            Tier::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Tier {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Tier::Easy),
            "medium" => Ok(Tier::Medium),
            "hard" => Ok(Tier::Hard),
            other => Err(InvalidInput::UnknownTier(other.to_string())),
        }
    }
}

/// Arithmetic operation kinds, in the fixed classification priority order
/// used for per-operation breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// The symbol this operation uses in question text.
    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '×',
            Op::Div => '÷',
        }
    }

    /// Human-readable operation name for breakdowns and summaries.
    pub fn label(self) -> &'static str {
        match self {
            Op::Add => "addition",
            Op::Sub => "subtraction",
            Op::Mul => "multiplication",
            Op::Div => "division",
        }
    }

    /// Apply the operation to two operands. Division truncates; puzzle
    /// generation only ever divides exactly.
    pub fn apply(self, a: i64, b: i64) -> i64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => a / b,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A generated question together with its correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Question text, e.g. "7 + 3".
    pub question: String,
    /// The correct numeric answer.
    pub answer: i64,
}

/// A single recorded answer. Immutable once recorded; owned by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    /// The question as shown to the user.
    pub question: String,
    /// What the user answered.
    pub user_answer: i64,
    /// What the correct answer was.
    pub correct_answer: i64,
    /// Whether the user answered correctly.
    pub correct: bool,
    /// Response latency in seconds.
    pub time_taken_secs: f64,
    /// The tier the question was asked at.
    pub tier: Tier,
    /// When the attempt was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Rolling statistics over the most recent attempts.
///
/// Derived fresh from the attempt log on every query; never stored and never
/// carries identity between calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceWindow {
    /// Fraction of correct answers, in [0, 1].
    pub accuracy: f64,
    /// Mean response latency in seconds.
    pub avg_time_secs: f64,
    /// Response latencies, oldest to newest.
    pub times: Vec<f64>,
    /// Correctness per attempt, oldest to newest.
    pub outcomes: Vec<bool>,
    /// Number of attempts the window covers.
    pub sample_count: usize,
}
