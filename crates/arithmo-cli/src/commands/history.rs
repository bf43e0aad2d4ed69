//! The `arithmo history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use arithmo_store::SessionStore;

use crate::config::load_config_from;

pub fn execute(
    name: String,
    session_dir: Option<PathBuf>,
    limit: usize,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = SessionStore::new(session_dir.unwrap_or(config.session_dir));

    let handles = store.list_sessions(&name)?;
    if handles.is_empty() {
        println!("No saved sessions for {name}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Finished", "Questions", "Accuracy", "Final tier", "Trend",
    ]);

    for handle in handles.iter().take(limit) {
        match store.load(handle) {
            Ok(summary) => {
                table.add_row(vec![
                    summary.finished_at.format("%Y-%m-%d %H:%M").to_string(),
                    summary.total_questions.to_string(),
                    format!("{:.1}%", summary.accuracy_percentage),
                    summary.final_tier.to_string(),
                    summary.learning_velocity.label().to_string(),
                ]);
            }
            Err(e) => {
                tracing::warn!(path = %handle.path.display(), "skipping unreadable session: {e:#}");
            }
        }
    }

    println!("Sessions for {name} (most recent first):");
    println!("{table}");
    Ok(())
}
