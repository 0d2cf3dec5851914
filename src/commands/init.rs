use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::CHIRP_DIR;
use crate::config::Config;

pub fn run(stealth: bool) -> Result<()> {
    let chirp_dir = std::path::PathBuf::from(CHIRP_DIR);

    if chirp_dir.exists() {
        println!("Chirp already initialized in {}", chirp_dir.display());
        return Ok(());
    }

    fs::create_dir_all(&chirp_dir).context("Failed to create .chirp directory")?;
    Config::default().save(&chirp_dir)?;

    if stealth {
        add_to_gitignore()?;
    }

    println!("Initialized chirp in {}", chirp_dir.display());
    Ok(())
}

/// Adds `.chirp` to git exclusions.
/// Prefers `.git/info/exclude` if it exists (truly local), otherwise uses `.gitignore`.
fn add_to_gitignore() -> Result<()> {
    let exclude_path = Path::new(".git/info/exclude");
    let gitignore_path = Path::new(".gitignore");

    let target_path = if exclude_path.exists() {
        exclude_path
    } else if gitignore_path.exists() || Path::new(".git").is_dir() {
        gitignore_path
    } else {
        // Not a git repo, skip
        return Ok(());
    };

    let existing = fs::read_to_string(target_path).unwrap_or_default();
    if existing
        .lines()
        .any(|line| line.trim() == ".chirp" || line.trim() == ".chirp/")
    {
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(target_path)
        .context("Failed to open git exclusion file")?;

    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(file)?;
    }
    writeln!(file, ".chirp")?;

    println!("Added .chirp to {}", target_path.display());
    Ok(())
}
