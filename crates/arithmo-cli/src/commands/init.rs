//! The `arithmo init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("arithmo.toml").exists() {
        println!("arithmo.toml already exists, skipping.");
    } else {
        std::fs::write("arithmo.toml", SAMPLE_CONFIG)?;
        println!("Created arithmo.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust arithmo.toml to taste");
    println!("  2. Run: arithmo play --name <your-name>");
    println!("  3. Run: arithmo history --name <your-name>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# arithmo configuration

# Where session summaries are written.
session_dir = "data/sessions"

# Starting difficulty when --tier is not given: easy, medium, or hard.
default_tier = "easy"

# Offer a break after this many questions.
milestone_every = 5
"#;
