//! The `arithmo show` command.

use std::path::PathBuf;

use anyhow::Result;

use arithmo_store::SessionStore;

pub fn execute(path: PathBuf) -> Result<()> {
    let summary = SessionStore::load_path(&path)?;

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

    if !summary.tier_progression.is_empty() {
        let progression: Vec<String> = summary
            .tier_progression
            .iter()
            .map(|t| t.to_string())
            .collect();
        println!();
        println!("Difficulty progression: {}", progression.join(" -> "));
    }

    Ok(())
}
