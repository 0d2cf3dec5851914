use anyhow::{Context, Result};
use console::Term;

use crate::sync::SaveReport;
use crate::timeline::Timeline;

/// Clear the timeline. Without `yes`, asks on the terminal first;
/// `Ok(None)` means the user declined.
pub fn run(yes: bool, timeline: &mut Timeline) -> Result<Option<SaveReport>> {
    if !yes && !confirm()? {
        return Ok(None);
    }
    Ok(Some(timeline.clear()))
}

fn confirm() -> Result<bool> {
    let term = Term::stderr();
    term.write_str("Delete all posts? This cannot be undone. [y/N] ")
        .context("Failed to write prompt")?;
    let answer = term.read_line().context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
