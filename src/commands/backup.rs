use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use jiff::Timestamp;

use crate::error::SyncError;
use crate::store::atomic_write;
use crate::sync::SaveReport;
use crate::timeline::{ExportDocument, Timeline};

#[derive(Debug)]
pub struct Exported {
    pub path: PathBuf,
    pub post_count: usize,
}

/// Write the export document as pretty JSON. Defaults to
/// `tweets-backup-<date>.json` in the current directory.
pub fn export(output: Option<PathBuf>, timeline: &Timeline) -> Result<Exported> {
    let path = output.unwrap_or_else(|| PathBuf::from(ExportDocument::file_name(Timestamp::now())));
    let doc = timeline.export();
    let content = serde_json::to_string_pretty(&doc).context("Failed to serialize export")?;

    atomic_write(&path, content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(Exported {
        path,
        post_count: doc.tweets.len(),
    })
}

pub fn import(file: &Path, timeline: &mut Timeline) -> Result<SaveReport> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    timeline.import(&raw).map_err(|e| match e {
        SyncError::InvalidFormat(_) => anyhow!(e.user_message()),
        other => anyhow::Error::new(other),
    })
}
