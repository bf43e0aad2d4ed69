//! Human-readable feedback over decisions and windows.
//!
//! Pure formatting, no decision logic: the same inputs always produce the
//! same strings, and a tier transition is always named when one occurred.

use crate::engine::{Adjustment, DifficultyDecision, StreakInfo, StreakKind};
use crate::model::PerformanceWindow;

/// Explain a difficulty decision to the user.
pub fn recommendation(decision: &DifficultyDecision, window: &PerformanceWindow) -> String {
    if decision.previous_tier == decision.next_tier {
        let base = "Maintaining current difficulty - ";
        return if decision.confidence > 0.7 {
            format!("{base}steady, confident performance")
        } else if window.accuracy >= 0.6 {
            format!("{base}good progress, building mastery")
        } else {
            format!("{base}need more data to assess")
        };
    }

    let accuracy_pct = window.accuracy * 100.0;
    let mut parts = vec![match decision.adjustment {
        Adjustment::Increase => format!(
            "Moving up! {accuracy_pct:.0}% accuracy earns a step from {} to {}",
            decision.previous_tier, decision.next_tier
        ),
        Adjustment::Decrease => format!(
            "Stepping back from {} to {} for a better learning pace",
            decision.previous_tier, decision.next_tier
        ),
        // previous != next implies a direction, but keep the transition named.
        Adjustment::Maintain => format!(
            "Adjusting from {} to {}",
            decision.previous_tier, decision.next_tier
        ),
    }];

    if decision.streak.significant {
        match decision.streak.kind {
            StreakKind::Hot => {
                parts.push(format!("({}-question hot streak!)", decision.streak.length));
            }
            StreakKind::Cold | StreakKind::None => {
                parts.push("(let's rebuild momentum at this pace)".to_string());
            }
        }
    }

    if decision.confidence > 0.8 {
        parts.push(format!(
            "[high confidence: {:.0}%]",
            decision.confidence * 100.0
        ));
    }

    parts.join(" ")
}

/// Streak-aware encouragement after an answer.
pub fn encouragement(window: &PerformanceWindow, streak: &StreakInfo) -> String {
    if streak.significant {
        return match streak.kind {
            StreakKind::Hot => format!("{} correct in a row! Keep it up!", streak.length),
            StreakKind::Cold | StreakKind::None => {
                "Don't worry! Every expert was once a beginner. Let's try again!".to_string()
            }
        };
    }

    let accuracy_pct = window.accuracy * 100.0;
    if accuracy_pct >= 90.0 {
        "Outstanding work! You're a math superstar!".to_string()
    } else if accuracy_pct >= 75.0 {
        "Great job! Keep up the excellent work!".to_string()
    } else if accuracy_pct >= 60.0 {
        "Good effort! You're making solid progress!".to_string()
    } else {
        "Keep practicing! Every mistake teaches us something new!".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AdaptiveEngine;
    use crate::model::Tier;

    fn window(accuracy: f64, times: Vec<f64>, outcomes: Vec<bool>) -> PerformanceWindow {
        let avg_time_secs = if times.is_empty() {
            0.0
        } else {
            times.iter().sum::<f64>() / times.len() as f64
        };
        PerformanceWindow {
            accuracy,
            avg_time_secs,
            sample_count: outcomes.len(),
            times,
            outcomes,
        }
    }

    #[test]
    fn transition_names_both_tiers() {
        let mut engine = AdaptiveEngine::new();
        let w = window(0.95, vec![3.2, 3.5, 3.6, 3.7], vec![true; 4]);
        let decision = engine.decide(Tier::Easy, &w, 4);
        assert_eq!(decision.next_tier, Tier::Medium);

        let text = recommendation(&decision, &w);
        assert!(!text.is_empty());
        assert!(text.contains("easy"));
        assert!(text.contains("medium"));
    }

    #[test]
    fn maintain_text_is_non_empty_and_deterministic() {
        let mut engine = AdaptiveEngine::new();
        let w = window(0.7, vec![7.5, 8.0, 8.5], vec![true, true, false]);
        let decision = engine.decide(Tier::Medium, &w, 3);
        assert_eq!(decision.adjustment, Adjustment::Maintain);

        let text = recommendation(&decision, &w);
        assert!(text.starts_with("Maintaining current difficulty"));
        assert_eq!(text, recommendation(&decision, &w));
    }

    #[test]
    fn encouragement_prefers_streaks() {
        let w = window(0.25, vec![5.0; 4], vec![false; 4]);
        let streak = crate::engine::detect_streak(&w.outcomes);
        let text = encouragement(&w, &streak);
        assert!(text.contains("expert"));

        let hot = crate::engine::detect_streak(&[true, true, true]);
        let text = encouragement(&window(1.0, vec![2.0; 3], vec![true; 3]), &hot);
        assert!(text.contains("3 correct in a row"));
    }

    #[test]
    fn encouragement_falls_back_to_accuracy_bands() {
        let quiet = crate::engine::detect_streak(&[true, false]);
        for accuracy in [0.95, 0.8, 0.65, 0.2] {
            let text = encouragement(&window(accuracy, vec![5.0; 2], vec![true, false]), &quiet);
            assert!(!text.is_empty());
        }
    }
}
