//! Subcommand implementations.

pub mod history;
pub mod init;
pub mod play;
pub mod show;

use comfy_table::{presets::UTF8_FULL, Table};

use arithmo_core::tracker::SessionSummary;

/// Render the headline numbers of a session as a two-column table.
pub(crate) fn summary_table(summary: &SessionSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Player".to_string(), summary.username.clone()]);
    table.add_row(vec![
        "Total questions".to_string(),
        summary.total_questions.to_string(),
    ]);
    table.add_row(vec![
        "Correct answers".to_string(),
        summary.correct_answers.to_string(),
    ]);
    table.add_row(vec![
        "Accuracy".to_string(),
        format!("{:.1}%", summary.accuracy_percentage),
    ]);
    table.add_row(vec![
        "Avg time per question".to_string(),
        format!("{:.1}s", summary.average_time_secs),
    ]);
    table.add_row(vec![
        "Final difficulty".to_string(),
        summary.final_tier.to_string(),
    ]);
    table.add_row(vec![
        "Session duration".to_string(),
        format!("{}s", summary.session_duration_secs),
    ]);
    table.add_row(vec![
        "Trend".to_string(),
        summary.learning_velocity.label().to_string(),
    ]);
    table
}
