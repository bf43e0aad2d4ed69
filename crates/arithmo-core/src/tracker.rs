//! Session-scoped performance tracking and aggregation.
//!
//! The tracker owns the append-only attempt log. Rolling windows, operation
//! breakdowns, and learning velocity are all derived from it on demand.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;
use crate::model::{Attempt, Op, PerformanceWindow, Tier};

/// Per-operation attempt counts for the session breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpStats {
    pub total: usize,
    pub correct: usize,
    pub accuracy_pct: f64,
}

/// Coarse improvement trend across the session: accuracy of the first half
/// of the log against the second half.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "trend", rename_all = "snake_case")]
pub enum LearningVelocity {
    InsufficientData,
    Improving { start_accuracy: f64, end_accuracy: f64 },
    Declining { start_accuracy: f64, end_accuracy: f64 },
    Stable { start_accuracy: f64, end_accuracy: f64 },
}

impl LearningVelocity {
    /// Short label for tables and logs.
    pub fn label(&self) -> &'static str {
        match self {
            LearningVelocity::InsufficientData => "insufficient data",
            LearningVelocity::Improving { .. } => "improving",
            LearningVelocity::Declining { .. } => "declining",
            LearningVelocity::Stable { .. } => "stable",
        }
    }
}

/// Complete end-of-session statistics; the unit of persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub username: String,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub accuracy_percentage: f64,
    pub average_time_secs: f64,
    pub final_tier: Tier,
    /// The tier each question was asked at, in order.
    pub tier_progression: Vec<Tier>,
    pub session_duration_secs: i64,
    /// Keyed by operation label ("addition", ...); BTreeMap for stable JSON.
    pub operation_breakdown: BTreeMap<String, OpStats>,
    pub learning_velocity: LearningVelocity,
    pub finished_at: DateTime<Utc>,
}

/// Classify a question by the first operator symbol it contains.
///
/// Priority is fixed: `+`, `-`, `×`, `÷`, then "other". First match wins.
pub fn classify_operation(question: &str) -> &'static str {
    for op in [Op::Add, Op::Sub, Op::Mul, Op::Div] {
        if question.contains(op.symbol()) {
            return op.label();
        }
    }
    "other"
}

/// The append-only attempt log for one user session.
#[derive(Debug)]
pub struct PerformanceTracker {
    username: String,
    session_start: DateTime<Utc>,
    attempts: Vec<Attempt>,
    current_tier: Option<Tier>,
}

impl PerformanceTracker {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            session_start: Utc::now(),
            attempts: Vec::new(),
            current_tier: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn total_attempts(&self) -> usize {
        self.attempts.len()
    }

    /// Record one answered question; returns whether it was correct.
    pub fn record_attempt(
        &mut self,
        question: impl Into<String>,
        user_answer: i64,
        correct_answer: i64,
        time_taken_secs: f64,
        tier: Tier,
    ) -> Result<bool, InvalidInput> {
        if time_taken_secs < 0.0 {
            return Err(InvalidInput::NegativeLatency(time_taken_secs));
        }
        let correct = user_answer == correct_answer;
        self.attempts.push(Attempt {
            question: question.into(),
            user_answer,
            correct_answer,
            correct,
            time_taken_secs,
            tier,
            timestamp: Utc::now(),
        });
        self.current_tier = Some(tier);
        Ok(correct)
    }

    /// Rolling statistics over the last `n` attempts (all of them when fewer
    /// exist). An empty log yields a zeroed window.
    pub fn recent_window(&self, n: usize) -> PerformanceWindow {
        if self.attempts.is_empty() || n == 0 {
            return PerformanceWindow::default();
        }
        let start = self.attempts.len().saturating_sub(n);
        let recent = &self.attempts[start..];
        let sample_count = recent.len();
        let correct = recent.iter().filter(|a| a.correct).count();
        let times: Vec<f64> = recent.iter().map(|a| a.time_taken_secs).collect();
        let avg_time_secs = times.iter().sum::<f64>() / sample_count as f64;

        PerformanceWindow {
            accuracy: correct as f64 / sample_count as f64,
            avg_time_secs,
            times,
            outcomes: recent.iter().map(|a| a.correct).collect(),
            sample_count,
        }
    }

    /// Improvement trend: split the log at its midpoint and compare half
    /// accuracies. Fewer than four attempts is not enough signal.
    pub fn learning_velocity(&self) -> LearningVelocity {
        if self.attempts.len() < 4 {
            return LearningVelocity::InsufficientData;
        }
        let midpoint = self.attempts.len() / 2;
        let (first, second) = self.attempts.split_at(midpoint);
        let accuracy = |half: &[Attempt]| {
            half.iter().filter(|a| a.correct).count() as f64 / half.len() as f64
        };
        let start_accuracy = accuracy(first);
        let end_accuracy = accuracy(second);

        if end_accuracy > start_accuracy + 0.1 {
            LearningVelocity::Improving {
                start_accuracy,
                end_accuracy,
            }
        } else if start_accuracy > end_accuracy + 0.1 {
            LearningVelocity::Declining {
                start_accuracy,
                end_accuracy,
            }
        } else {
            LearningVelocity::Stable {
                start_accuracy,
                end_accuracy,
            }
        }
    }

    /// Per-operation accuracy over the whole log.
    pub fn operation_breakdown(&self) -> BTreeMap<String, OpStats> {
        let mut breakdown: BTreeMap<String, OpStats> = BTreeMap::new();
        for attempt in &self.attempts {
            let stats = breakdown
                .entry(classify_operation(&attempt.question).to_string())
                .or_insert(OpStats {
                    total: 0,
                    correct: 0,
                    accuracy_pct: 0.0,
                });
            stats.total += 1;
            if attempt.correct {
                stats.correct += 1;
            }
        }
        for stats in breakdown.values_mut() {
            stats.accuracy_pct = stats.correct as f64 / stats.total as f64 * 100.0;
        }
        breakdown
    }

    /// Full end-of-session statistics, or `None` when nothing was attempted.
    pub fn session_summary(&self) -> Option<SessionSummary> {
        let total = self.attempts.len();
        if total == 0 {
            return None;
        }
        let final_tier = self.current_tier?;
        let correct = self.attempts.iter().filter(|a| a.correct).count();
        let average_time_secs = self
            .attempts
            .iter()
            .map(|a| a.time_taken_secs)
            .sum::<f64>()
            / total as f64;
        let finished_at = Utc::now();

        Some(SessionSummary {
            username: self.username.clone(),
            total_questions: total,
            correct_answers: correct,
            accuracy_percentage: correct as f64 / total as f64 * 100.0,
            average_time_secs,
            final_tier,
            tier_progression: self.attempts.iter().map(|a| a.tier).collect(),
            session_duration_secs: (finished_at - self.session_start).num_seconds(),
            operation_breakdown: self.operation_breakdown(),
            learning_velocity: self.learning_velocity(),
            finished_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_with(results: &[(bool, f64)]) -> PerformanceTracker {
        let mut tracker = PerformanceTracker::new("test-user");
        for (i, &(correct, time)) in results.iter().enumerate() {
            let answer = i as i64;
            let user = if correct { answer } else { answer + 1 };
            tracker
                .record_attempt(format!("{i} + 0"), user, answer, time, Tier::Easy)
                .unwrap();
        }
        tracker
    }

    #[test]
    fn record_returns_correctness() {
        let mut tracker = PerformanceTracker::new("kim");
        assert!(tracker
            .record_attempt("5 + 3", 8, 8, 2.5, Tier::Easy)
            .unwrap());
        assert!(!tracker
            .record_attempt("7 + 2", 10, 9, 3.0, Tier::Easy)
            .unwrap());
        assert_eq!(tracker.total_attempts(), 2);
    }

    #[test]
    fn negative_latency_is_rejected() {
        let mut tracker = PerformanceTracker::new("kim");
        let err = tracker
            .record_attempt("5 + 3", 8, 8, -1.0, Tier::Easy)
            .unwrap_err();
        assert!(matches!(err, InvalidInput::NegativeLatency(_)));
        assert_eq!(tracker.total_attempts(), 0);
    }

    #[test]
    fn empty_log_yields_zeroed_window() {
        let tracker = PerformanceTracker::new("kim");
        let w = tracker.recent_window(3);
        assert_eq!(w.sample_count, 0);
        assert_eq!(w.accuracy, 0.0);
        assert!(w.outcomes.is_empty());
    }

    #[test]
    fn recent_window_covers_only_the_tail() {
        let tracker = tracker_with(&[(false, 10.0), (true, 2.0), (true, 3.0), (true, 4.0)]);
        let w = tracker.recent_window(3);
        assert_eq!(w.sample_count, 3);
        assert_eq!(w.accuracy, 1.0);
        assert_eq!(w.outcomes, vec![true, true, true]);
        assert!((w.avg_time_secs - 3.0).abs() < 1e-9);
    }

    #[test]
    fn recent_window_larger_than_log_takes_everything() {
        let tracker = tracker_with(&[(true, 2.0), (false, 3.0)]);
        let w = tracker.recent_window(10);
        assert_eq!(w.sample_count, 2);
        assert_eq!(w.accuracy, 0.5);
    }

    #[test]
    fn classify_operation_priority_order() {
        assert_eq!(classify_operation("3 + 4"), "addition");
        assert_eq!(classify_operation("9 - 4"), "subtraction");
        assert_eq!(classify_operation("12 × 4"), "multiplication");
        assert_eq!(classify_operation("36 ÷ 6"), "division");
        assert_eq!(classify_operation("what is seven"), "other");
        // A plus anywhere wins over later symbols.
        assert_eq!(classify_operation("3 + 4 × 2"), "addition");
    }

    #[test]
    fn operation_breakdown_counts_per_kind() {
        let mut tracker = PerformanceTracker::new("kim");
        tracker
            .record_attempt("5 + 3", 8, 8, 2.0, Tier::Easy)
            .unwrap();
        tracker
            .record_attempt("6 + 1", 9, 7, 2.0, Tier::Easy)
            .unwrap();
        tracker
            .record_attempt("8 × 5", 40, 40, 4.0, Tier::Medium)
            .unwrap();

        let breakdown = tracker.operation_breakdown();
        let addition = &breakdown["addition"];
        assert_eq!(addition.total, 2);
        assert_eq!(addition.correct, 1);
        assert!((addition.accuracy_pct - 50.0).abs() < 1e-9);
        assert_eq!(breakdown["multiplication"].total, 1);
    }

    #[test]
    fn velocity_needs_four_attempts() {
        let tracker = tracker_with(&[(true, 2.0), (true, 2.0), (true, 2.0)]);
        assert_eq!(
            tracker.learning_velocity(),
            LearningVelocity::InsufficientData
        );
    }

    #[test]
    fn velocity_improving_when_second_half_is_better() {
        let tracker = tracker_with(&[(false, 5.0), (false, 5.0), (true, 3.0), (true, 3.0)]);
        assert!(matches!(
            tracker.learning_velocity(),
            LearningVelocity::Improving { .. }
        ));
    }

    #[test]
    fn velocity_declining_when_second_half_is_worse() {
        let tracker = tracker_with(&[(true, 3.0), (true, 3.0), (false, 5.0), (false, 5.0)]);
        assert!(matches!(
            tracker.learning_velocity(),
            LearningVelocity::Declining { .. }
        ));
    }

    #[test]
    fn velocity_stable_within_tolerance() {
        let tracker = tracker_with(&[(true, 3.0), (false, 3.0), (true, 3.0), (false, 3.0)]);
        assert!(matches!(
            tracker.learning_velocity(),
            LearningVelocity::Stable { .. }
        ));
    }

    #[test]
    fn velocity_splits_odd_logs_at_floor_midpoint() {
        // Five attempts: first half is 2, second half is 3.
        let tracker = tracker_with(&[
            (false, 5.0),
            (false, 5.0),
            (true, 3.0),
            (true, 3.0),
            (true, 3.0),
        ]);
        match tracker.learning_velocity() {
            LearningVelocity::Improving {
                start_accuracy,
                end_accuracy,
            } => {
                assert_eq!(start_accuracy, 0.0);
                assert_eq!(end_accuracy, 1.0);
            }
            other => panic!("expected improving, got {other:?}"),
        }
    }

    #[test]
    fn empty_session_has_no_summary() {
        let tracker = PerformanceTracker::new("kim");
        assert!(tracker.session_summary().is_none());
    }

    #[test]
    fn summary_aggregates_the_session() {
        let mut tracker = PerformanceTracker::new("kim");
        tracker
            .record_attempt("5 + 3", 8, 8, 2.0, Tier::Easy)
            .unwrap();
        tracker
            .record_attempt("9 - 4", 5, 5, 4.0, Tier::Easy)
            .unwrap();
        tracker
            .record_attempt("8 × 5", 41, 40, 6.0, Tier::Medium)
            .unwrap();

        let summary = tracker.session_summary().unwrap();
        assert_eq!(summary.username, "kim");
        assert_eq!(summary.total_questions, 3);
        assert_eq!(summary.correct_answers, 2);
        assert!((summary.accuracy_percentage - 66.666).abs() < 0.01);
        assert!((summary.average_time_secs - 4.0).abs() < 1e-9);
        assert_eq!(summary.final_tier, Tier::Medium);
        assert_eq!(
            summary.tier_progression,
            vec![Tier::Easy, Tier::Easy, Tier::Medium]
        );
    }

    #[test]
    fn summary_serde_roundtrip() {
        let mut tracker = PerformanceTracker::new("kim");
        for i in 0..4i64 {
            tracker
                .record_attempt(format!("{i} + 1"), i + 1, i + 1, 3.0, Tier::Easy)
                .unwrap();
        }
        let summary = tracker.session_summary().unwrap();
        let json = serde_json::to_string_pretty(&summary).unwrap();
        let back: SessionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.username, summary.username);
        assert_eq!(back.total_questions, summary.total_questions);
        assert_eq!(back.learning_velocity, summary.learning_velocity);
    }
}
