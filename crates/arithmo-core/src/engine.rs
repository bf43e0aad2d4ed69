//! The adaptive difficulty engine.
//!
//! Combines accuracy, response-time consistency, alternation patterns, and
//! streak detection into a single heuristic score that decides whether to
//! raise, lower, or hold the difficulty tier. This is a deterministic
//! weighted heuristic, not a statistical learner model: every rule below is a
//! hand-tuned constant.

use serde::{Deserialize, Serialize};

use crate::model::{PerformanceWindow, Tier};

/// Minimum samples in the window before any adjustment is considered.
const MIN_SAMPLES: usize = 2;
/// Baseline evaluation window, in attempts.
const BASE_WINDOW: usize = 3;
/// The window never shrinks below this (avoids single-sample thrash).
const MIN_WINDOW: usize = 2;
/// The window never grows beyond this (avoids stale evaluation).
const MAX_WINDOW: usize = 5;
/// Trailing runs at least this long count as significant streaks.
const STREAK_THRESHOLD: usize = 3;

const ACCURACY_EXCELLENT: f64 = 0.9;
const ACCURACY_HIGH: f64 = 0.8;
const ACCURACY_MEDIUM: f64 = 0.6;
const ACCURACY_LOW: f64 = 0.5;
const TIME_FAST_SECS: f64 = 5.0;
const TIME_SLOW_SECS: f64 = 15.0;

/// Direction of a trailing run of identical outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    None,
    Hot,
    Cold,
}

/// The trailing run of identical outcomes ending at the most recent attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    pub kind: StreakKind,
    pub length: usize,
    /// Whether the run is long enough to influence scoring.
    pub significant: bool,
}

impl StreakInfo {
    /// The empty-sequence streak.
    pub fn none() -> Self {
        Self {
            kind: StreakKind::None,
            length: 0,
            significant: false,
        }
    }
}

/// What a decision did to the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjustment {
    Increase,
    Decrease,
    Maintain,
}

/// One difficulty decision, with the evidence that produced it.
///
/// Appended to the engine's in-memory history for end-of-session reporting;
/// the decision function itself never reads the history back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyDecision {
    pub previous_tier: Tier,
    pub next_tier: Tier,
    /// The accumulated rule score the thresholds were compared against.
    pub raw_score: f64,
    pub confidence: f64,
    pub streak: StreakInfo,
    /// Human-readable reasons for each rule that fired, in firing order.
    pub rationale: Vec<String>,
    pub adjustment: Adjustment,
    /// The evaluation window the decision demanded, in attempts.
    pub window_used: usize,
    /// Attempts seen since the last adjustment when this decision was made.
    pub attempts_evaluated: usize,
}

/// Counts over the decisions an engine made during one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationSummary {
    pub evaluations: usize,
    pub increases: usize,
    pub decreases: usize,
    pub maintained: usize,
    pub average_confidence: f64,
}

/// Confidence in the current performance picture, in [0, 1].
///
/// Weighted blend: 50% accuracy, 25% latency consistency (low variance in
/// response times), 25% pattern consistency (few correct/incorrect flips).
/// An empty window scores exactly 0.5, the neutral prior. Pure function.
pub fn confidence_score(window: &PerformanceWindow) -> f64 {
    if window.outcomes.is_empty() {
        return 0.5;
    }

    // Population variance of latencies, normalized against 100 s² (a fixed
    // constant tuned for latencies measured in seconds).
    let latency_consistency = if window.times.len() >= 2 {
        let mean = window.times.iter().sum::<f64>() / window.times.len() as f64;
        let variance = window
            .times
            .iter()
            .map(|t| (t - mean).powi(2))
            .sum::<f64>()
            / window.times.len() as f64;
        (1.0 - variance / 100.0).max(0.0)
    } else {
        0.5
    };

    // Alternating right/wrong answers signal unstable performance.
    let pattern_consistency = if window.outcomes.len() >= 3 {
        let flips = window
            .outcomes
            .windows(2)
            .filter(|pair| pair[0] != pair[1])
            .count();
        1.0 - flips as f64 / window.outcomes.len() as f64
    } else {
        0.5
    };

    (window.accuracy * 0.5 + latency_consistency * 0.25 + pattern_consistency * 0.25)
        .clamp(0.0, 1.0)
}

/// Detect the trailing streak in an oldest-to-newest outcome sequence.
pub fn detect_streak(outcomes: &[bool]) -> StreakInfo {
    let Some(&latest) = outcomes.last() else {
        return StreakInfo::none();
    };

    let length = outcomes.iter().rev().take_while(|&&o| o == latest).count();

    StreakInfo {
        kind: if latest { StreakKind::Hot } else { StreakKind::Cold },
        length,
        significant: length >= STREAK_THRESHOLD,
    }
}

/// How many attempts the next decision should wait for.
///
/// Harder tiers and lower confidence both demand more evidence before acting,
/// clamped to [`MIN_WINDOW`, `MAX_WINDOW`].
pub fn dynamic_window(tier: Tier, confidence: f64) -> usize {
    let uncertainty = ((1.0 - confidence.clamp(0.0, 1.0)) * 2.0) as usize;
    (BASE_WINDOW + tier.index() + uncertainty).clamp(MIN_WINDOW, MAX_WINDOW)
}

/// Signed contribution from a single scoring rule, with the rationale that
/// fired it. Rules that stay silent contribute zero and no rationale.
struct RuleHit {
    delta: f64,
    rationale: Option<String>,
}

impl RuleHit {
    fn silent() -> Self {
        Self {
            delta: 0.0,
            rationale: None,
        }
    }
}

/// Bucketed accuracy effect, scaled by confidence. First bucket wins.
/// Accuracy strictly inside (0.5, 0.6) deliberately contributes nothing and
/// produces no rationale; see `accuracy_gap_between_low_and_medium_is_silent`.
fn accuracy_rule(window: &PerformanceWindow, confidence: f64) -> RuleHit {
    let pct = window.accuracy * 100.0;
    if window.accuracy >= ACCURACY_EXCELLENT {
        RuleHit {
            delta: 3.0 * confidence,
            rationale: Some(format!("Excellent accuracy ({pct:.0}%)")),
        }
    } else if window.accuracy >= ACCURACY_HIGH {
        RuleHit {
            delta: 2.0 * confidence,
            rationale: Some(format!("High accuracy ({pct:.0}%)")),
        }
    } else if window.accuracy <= ACCURACY_LOW {
        RuleHit {
            delta: -2.0 * confidence,
            rationale: Some(format!("Low accuracy ({pct:.0}%)")),
        }
    } else if window.accuracy >= ACCURACY_MEDIUM {
        RuleHit {
            delta: 0.0,
            rationale: Some(format!("Steady accuracy ({pct:.0}%)")),
        }
    } else {
        RuleHit::silent()
    }
}

/// Significant streaks swing the score by up to ±2.
fn streak_rule(streak: &StreakInfo) -> RuleHit {
    if !streak.significant {
        return RuleHit::silent();
    }
    let swing = (streak.length as f64 / 3.0).min(2.0);
    match streak.kind {
        StreakKind::Hot => RuleHit {
            delta: swing,
            rationale: Some(format!("Hot streak ({} correct)", streak.length)),
        },
        StreakKind::Cold => RuleHit {
            delta: -swing,
            rationale: Some(format!("Cold streak ({} incorrect)", streak.length)),
        },
        // A significant streak always has a direction.
        StreakKind::None => RuleHit::silent(),
    }
}

/// Speed only matters once accuracy is at least steady.
fn speed_rule(window: &PerformanceWindow) -> RuleHit {
    if window.accuracy < ACCURACY_MEDIUM {
        return RuleHit::silent();
    }
    if window.avg_time_secs < TIME_FAST_SECS {
        RuleHit {
            delta: 1.0,
            rationale: Some(format!("Fast responses ({:.1}s avg)", window.avg_time_secs)),
        }
    } else if window.avg_time_secs > TIME_SLOW_SECS {
        RuleHit {
            delta: -0.5,
            rationale: Some(format!("Slow responses ({:.1}s avg)", window.avg_time_secs)),
        }
    } else {
        RuleHit::silent()
    }
}

/// The adaptive difficulty engine.
///
/// Stateless across decisions except for the audit trail of past decisions,
/// which is summarized at session end and never consulted by `decide`.
#[derive(Debug, Default)]
pub struct AdaptiveEngine {
    history: Vec<DifficultyDecision>,
}

impl AdaptiveEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// All decisions made so far, oldest first.
    pub fn history(&self) -> &[DifficultyDecision] {
        &self.history
    }

    /// Decide the next tier from the rolling window and the attempt count
    /// since the last adjustment.
    ///
    /// With fewer than two samples the engine holds the tier at zero
    /// confidence; that is a normal state, not an error, and it leaves no
    /// trace in the history.
    pub fn decide(
        &mut self,
        current_tier: Tier,
        window: &PerformanceWindow,
        attempts_since_adjustment: usize,
    ) -> DifficultyDecision {
        if window.sample_count < MIN_SAMPLES {
            return DifficultyDecision {
                previous_tier: current_tier,
                next_tier: current_tier,
                raw_score: 0.0,
                confidence: 0.0,
                streak: StreakInfo::none(),
                rationale: vec!["insufficient_data".to_string()],
                adjustment: Adjustment::Maintain,
                window_used: 0,
                attempts_evaluated: attempts_since_adjustment,
            };
        }

        let confidence = confidence_score(window);
        let streak = detect_streak(&window.outcomes);
        let target_window = dynamic_window(current_tier, confidence);

        let mut raw_score = 0.0;
        let mut rationale = Vec::new();
        for hit in [
            accuracy_rule(window, confidence),
            streak_rule(&streak),
            speed_rule(window),
        ] {
            raw_score += hit.delta;
            if let Some(reason) = hit.rationale {
                rationale.push(reason);
            }
        }

        // Confidence gates how boldly the accumulated score is applied.
        if confidence < 0.4 {
            raw_score *= 0.5;
            rationale.push("Low confidence - being conservative".to_string());
        } else if confidence > 0.8 {
            raw_score *= 1.2;
            rationale.push("High confidence in assessment".to_string());
        }

        // Confident engines act on slightly weaker evidence (1.6 at full
        // confidence vs 2.0 at none).
        let increase_threshold = 2.0 * (1.0 - 0.2 * confidence);
        let decrease_threshold = -increase_threshold;
        let window_open = attempts_since_adjustment >= target_window;

        let (adjustment, next_tier) = if window_open && raw_score >= increase_threshold {
            (Adjustment::Increase, current_tier.harder())
        } else if window_open && raw_score <= decrease_threshold {
            (Adjustment::Decrease, current_tier.easier())
        } else {
            (Adjustment::Maintain, current_tier)
        };

        let decision = DifficultyDecision {
            previous_tier: current_tier,
            next_tier,
            raw_score,
            confidence,
            streak,
            rationale,
            adjustment,
            window_used: target_window,
            attempts_evaluated: attempts_since_adjustment,
        };

        tracing::debug!(
            previous = %current_tier,
            next = %next_tier,
            raw_score,
            confidence,
            window = target_window,
            "difficulty decision"
        );

        self.history.push(decision.clone());
        decision
    }

    /// Summarize the decisions made this session, or `None` if the engine
    /// never got past the insufficient-data gate.
    pub fn adaptation_summary(&self) -> Option<AdaptationSummary> {
        if self.history.is_empty() {
            return None;
        }
        let evaluations = self.history.len();
        let increases = self
            .history
            .iter()
            .filter(|d| d.adjustment == Adjustment::Increase)
            .count();
        let decreases = self
            .history
            .iter()
            .filter(|d| d.adjustment == Adjustment::Decrease)
            .count();
        let average_confidence =
            self.history.iter().map(|d| d.confidence).sum::<f64>() / evaluations as f64;

        Some(AdaptationSummary {
            evaluations,
            increases,
            decreases,
            maintained: evaluations - increases - decreases,
            average_confidence,
        })
    }
}
