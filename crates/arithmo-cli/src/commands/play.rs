//! The `arithmo play` command: the interactive practice loop.
//!
//! One user, one session, fully sequential: ask, time, record, derive
//! statistics, maybe adjust difficulty, repeat. The loop owns the tracker and
//! engine; puzzles and persistence come from their collaborator crates.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use arithmo_core::engine::{confidence_score, detect_streak, dynamic_window, AdaptiveEngine};
use arithmo_core::feedback;
use arithmo_core::model::Tier;
use arithmo_core::tracker::{PerformanceTracker, SessionSummary};
use arithmo_core::traits::PuzzleSource;
use arithmo_puzzles::RandomPuzzles;
use arithmo_store::SessionStore;

use crate::config::load_config_from;

pub fn execute(
    name: String,
    tier: Option<String>,
    session_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let starting: Tier = tier.unwrap_or(config.default_tier).parse()?;
    let store = SessionStore::new(session_dir.unwrap_or(config.session_dir));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut source = RandomPuzzles::new();

    run_session(
        &mut input,
        &mut source,
        &store,
        &name,
        starting,
        config.milestone_every,
    )
}

/// Drive one full session. Takes the input stream and puzzle source as
/// parameters so tests can script both.
fn run_session(
    input: &mut dyn BufRead,
    source: &mut dyn PuzzleSource,
    store: &SessionStore,
    name: &str,
    starting: Tier,
    milestone_every: usize,
) -> Result<()> {
    let milestone_every = milestone_every.max(1);

    println!("{:=<70}", "");
    println!("arithmo - adaptive arithmetic practice");
    println!("{:=<70}", "");
    println!("Hi {name}! Starting at {starting} level.");
    println!("Answer each question, or type 'quit' to end the session.");

    show_previous_session(store, name);

    let mut tracker = PerformanceTracker::new(name);
    let mut engine = AdaptiveEngine::new();
    let mut tier = starting;
    let mut question_count = 0usize;
    let mut attempts_since_adjustment = 0usize;

    'session: loop {
        question_count += 1;
        attempts_since_adjustment += 1;

        println!();
        println!("{:-<70}", "");
        println!("Question {question_count} | difficulty: {tier}");

        let puzzle = source.next_puzzle(tier);
        println!("{} = ?", puzzle.question);

        let started = Instant::now();
        // Re-ask the same puzzle until we get a number or a quit.
        let user_answer: i64 = loop {
            let Some(answer_text) = ask(input, "Your answer (or 'quit'): ")? else {
                break 'session;
            };
            if answer_text.eq_ignore_ascii_case("quit") {
                break 'session;
            }
            match answer_text.parse() {
                Ok(n) => break n,
                Err(_) => println!("Please enter a whole number."),
            }
        };
        let time_taken = started.elapsed().as_secs_f64();

        let correct = tracker.record_attempt(
            &puzzle.question,
            user_answer,
            puzzle.answer,
            time_taken,
            tier,
        )?;

        if correct {
            if time_taken < 3.0 {
                println!("Correct! Lightning fast! ({time_taken:.1}s)");
            } else if time_taken < 5.0 {
                println!("Correct! Great speed! ({time_taken:.1}s)");
            } else {
                println!("Correct! ({time_taken:.1}s)");
            }
        } else {
            println!("Incorrect. The answer was {}.", puzzle.answer);
            if time_taken < 3.0 {
                println!("Tip: take a moment to double-check your work.");
            }
        }

        if question_count >= 3 {
            let recent = tracker.recent_window(question_count.min(5));
            println!(
                "Recent accuracy: {:.0}% (last {} questions)",
                recent.accuracy * 100.0,
                recent.sample_count
            );
        }

        if question_count >= 2 {
            let window = tracker.recent_window(question_count.min(5));
            let confidence = confidence_score(&window);
            let optimal_window = dynamic_window(tier, confidence);

            // Re-evaluate once enough attempts accumulated, or early when the
            // evidence is already convincing.
            let should_check = attempts_since_adjustment >= optimal_window
                || (attempts_since_adjustment >= 2 && confidence > 0.8);

            if should_check {
                let streak = detect_streak(&window.outcomes);
                let decision = engine.decide(tier, &window, attempts_since_adjustment);

                if decision.next_tier != tier {
                    println!();
                    println!("{}", feedback::recommendation(&decision, &window));
                    if !decision.rationale.is_empty() {
                        let factors: Vec<String> =
                            decision.rationale.iter().take(2).cloned().collect();
                        println!("Factors: {}", factors.join(", "));
                    }
                    tier = decision.next_tier;
                    attempts_since_adjustment = 0;
                }

                println!("{}", feedback::encouragement(&window, &streak));
            }
        }

        if question_count % milestone_every == 0 {
            println!();
            println!("Milestone: {question_count} questions completed.");
            if let Some(summary) = tracker.session_summary() {
                println!("Overall accuracy: {:.1}%", summary.accuracy_percentage);
                println!("Trend: {}", summary.learning_velocity.label());
            }
            match ask(input, "Continue? (yes/no): ")? {
                Some(answer) if is_no(&answer) => break,
                Some(_) => {}
                None => break,
            }
        }
    }

    let summary = print_final_report(&tracker, &engine);

    if let Some(summary) = summary {
        if let Some(answer) = ask(input, "Save this session? (yes/no): ")? {
            if is_yes(&answer) {
                // Best effort: a failed save never loses the session output.
                match store.save(&summary) {
                    Ok(handle) => println!("Session saved to {}", handle.path.display()),
                    Err(e) => eprintln!("Warning: could not save session: {e:#}"),
                }
            }
        }
    }

    println!("Thanks for practicing!");
    Ok(())
}

/// Offer a short recap of the most recent saved session, if any.
fn show_previous_session(store: &SessionStore, name: &str) {
    let sessions = match store.list_sessions(name) {
        Ok(sessions) => sessions,
        Err(e) => {
            tracing::warn!("could not list previous sessions: {e:#}");
            return;
        }
    };
    let Some(latest) = sessions.first() else {
        return;
    };
    match store.load(latest) {
        Ok(previous) => {
            println!();
            println!(
                "Last time: {} questions, {:.1}% accuracy, finished at {} level.",
                previous.total_questions, previous.accuracy_percentage, previous.final_tier
            );
        }
        Err(e) => tracing::warn!("could not load previous session: {e:#}"),
    }
}

/// Print the end-of-session report and hand back the summary for saving.
fn print_final_report(
    tracker: &PerformanceTracker,
    engine: &AdaptiveEngine,
) -> Option<SessionSummary> {
    println!();
    println!("{:=<70}", "");
    println!("FINAL SESSION REPORT");
    println!("{:=<70}", "");

    let Some(summary) = tracker.session_summary() else {
        println!("No attempts recorded.");
        return None;
    };

    println!("{}", super::summary_table(&summary));

    if !summary.operation_breakdown.is_empty() {
        println!();
        println!("By operation:");
        for (op, stats) in &summary.operation_breakdown {
            println!(
                "  {op}: {}/{} correct ({:.0}%)",
                stats.correct, stats.total, stats.accuracy_pct
            );
        }
    }

    if let Some(adaptation) = engine.adaptation_summary() {
        println!();
        println!("Adaptive system insights:");
        println!("  Evaluations: {}", adaptation.evaluations);
        println!("  Difficulty increases: {}", adaptation.increases);
        println!("  Difficulty decreases: {}", adaptation.decreases);
        println!(
            "  Average confidence: {:.0}%",
            adaptation.average_confidence * 100.0
        );
    }

    if summary.total_questions >= 3 {
        println!();
        println!("Recommendations:");
        if summary.accuracy_percentage >= 85.0 {
            println!("  Outstanding! Consider starting at a higher difficulty next time.");
        } else if summary.accuracy_percentage >= 70.0 {
            println!("  Great work. Focus on maintaining this consistency.");
        } else if summary.accuracy_percentage >= 50.0 {
            println!("  Good effort. Keep practicing at the current difficulty.");
        } else {
            println!("  Consider reviewing fundamentals and practicing more.");
        }

        if summary.average_time_secs < 5.0 {
            println!("  You're very quick - great mental math skills.");
        } else if summary.average_time_secs > 15.0 {
            println!("  Take your time, but try to build speed gradually.");
        }

        if summary.operation_breakdown.len() > 1 {
            // Ties resolve to whichever label compares first; good enough for
            // a coaching hint.
            let weakest = summary
                .operation_breakdown
                .iter()
                .min_by(|a, b| a.1.accuracy_pct.total_cmp(&b.1.accuracy_pct));
            let strongest = summary
                .operation_breakdown
                .iter()
                .max_by(|a, b| a.1.accuracy_pct.total_cmp(&b.1.accuracy_pct));
            if let Some((op, stats)) = weakest {
                if stats.accuracy_pct < 60.0 {
                    println!("  Focus area: {op} ({:.0}% accuracy)", stats.accuracy_pct);
                }
            }
            if let Some((op, stats)) = strongest {
                if stats.accuracy_pct >= 90.0 {
                    println!("  Strength: {op} ({:.0}% accuracy)", stats.accuracy_pct);
                }
            }
        }
    }

    println!();
    Some(summary)
}

/// Print a prompt and read one trimmed line; `None` means end of input.
fn ask(input: &mut dyn BufRead, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "yes" | "y")
}

fn is_no(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "no" | "n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use arithmo_core::model::Puzzle;
    use arithmo_puzzles::ScriptedPuzzles;

    fn puzzle(question: &str, answer: i64) -> Puzzle {
        Puzzle {
            question: question.to_string(),
            answer,
        }
    }

    #[test]
    fn scripted_session_records_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let mut source = ScriptedPuzzles::new([
            puzzle("2 + 2", 4),
            puzzle("9 - 4", 5),
            puzzle("3 + 3", 6),
        ]);
        // Two right, one wrong, quit, then save.
        let mut input = Cursor::new("4\n5\n7\nquit\nyes\n");

        run_session(&mut input, &mut source, &store, "kim", Tier::Easy, 5).unwrap();

        let sessions = store.list_sessions("kim").unwrap();
        assert_eq!(sessions.len(), 1);
        let saved = store.load(&sessions[0]).unwrap();
        assert_eq!(saved.total_questions, 3);
        assert_eq!(saved.correct_answers, 2);
    }

    #[test]
    fn immediate_quit_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let mut source = ScriptedPuzzles::new([puzzle("2 + 2", 4)]);
        let mut input = Cursor::new("quit\n");

        run_session(&mut input, &mut source, &store, "kim", Tier::Easy, 5).unwrap();

        assert!(store.list_sessions("kim").unwrap().is_empty());
    }

    #[test]
    fn non_numeric_answer_reprompts_same_puzzle() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let mut source = ScriptedPuzzles::new([puzzle("2 + 2", 4), puzzle("9 - 4", 5)]);
        // "four" is rejected, then "5" answers the same puzzle (wrongly).
        let mut input = Cursor::new("four\n5\nquit\nno\n");

        run_session(&mut input, &mut source, &store, "kim", Tier::Easy, 5).unwrap();

        // The re-prompt did not consume an extra puzzle.
        assert_eq!(source.served(), 2);
        // Declined to save, so nothing on disk.
        assert!(store.list_sessions("kim").unwrap().is_empty());
    }

    #[test]
    fn end_of_input_ends_the_session_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let mut source = ScriptedPuzzles::new([puzzle("2 + 2", 4)]);
        let mut input = Cursor::new("4\n");

        run_session(&mut input, &mut source, &store, "kim", Tier::Easy, 5).unwrap();
    }
}
