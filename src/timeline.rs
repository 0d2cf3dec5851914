use std::collections::HashSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{SyncError, SyncResult};
use crate::id::next_id;
use crate::models::{Author, Post, Reply};
use crate::sync::{LoadSource, SaveReport, SyncCoordinator};

/// A mutation that went through the save protocol.
#[derive(Debug)]
pub struct Saved<T> {
    pub item: T,
    pub report: SaveReport,
}

/// Backup file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub tweets: Vec<Post>,
    pub export_date: String,
    pub source: String,
}

impl ExportDocument {
    /// `tweets-backup-YYYY-MM-DD.json`, dated in UTC.
    pub fn file_name(at: Timestamp) -> String {
        format!("tweets-backup-{}.json", at.strftime("%Y-%m-%d"))
    }
}

/// The session's authoritative, newest-first list of posts.
///
/// Every mutation hands the whole collection to the [`SyncCoordinator`];
/// persistence failures are reported, never rolled back.
pub struct Timeline {
    posts: Vec<Post>,
    expanded: HashSet<i64>,
    source: LoadSource,
    author: Author,
    sync: SyncCoordinator,
}

impl Timeline {
    /// Start a session: run the load protocol and adopt its result.
    pub fn open(sync: SyncCoordinator, author: Author) -> Self {
        let outcome = sync.load();
        Self {
            posts: outcome.posts,
            expanded: HashSet::new(),
            source: outcome.source,
            author,
            sync,
        }
    }

    /// Re-run the load protocol, replacing the in-memory collection.
    /// For long-lived front ends; each CLI invocation loads once in [`Timeline::open`].
    pub fn refresh(&mut self) -> LoadSource {
        let outcome = self.sync.load();
        self.posts = outcome.posts;
        self.source = outcome.source;
        self.expanded.retain(|id| self.posts.iter().any(|p| p.id == *id));
        self.source
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    pub fn sync(&self) -> &SyncCoordinator {
        &self.sync
    }

    pub fn sync_mut(&mut self) -> &mut SyncCoordinator {
        &mut self.sync
    }

    pub fn reply_total(&self) -> usize {
        self.posts.iter().map(Post::reply_count).sum()
    }

    pub fn is_expanded(&self, post_id: i64) -> bool {
        self.expanded.contains(&post_id)
    }

    /// Flip whether a post's replies are shown. Returns the new state.
    /// Library API for interactive front ends; the CLI expands threads
    /// through `list --replies` and `show` instead.
    pub fn toggle_replies(&mut self, post_id: i64) -> bool {
        if self.expanded.remove(&post_id) {
            false
        } else {
            self.expanded.insert(post_id);
            true
        }
    }

    /// Prepend a new post. Blank text is a no-op.
    pub fn compose(&mut self, text: &str) -> Option<Saved<Post>> {
        if text.trim().is_empty() {
            return None;
        }

        let now = Timestamp::now();
        let post = Post::new(
            next_id(&self.posts, now),
            &self.author,
            text.to_string(),
            now.as_millisecond(),
        );
        self.posts.insert(0, post.clone());

        let report = self.sync.save(&self.posts);
        Some(Saved { item: post, report })
    }

    /// Append a reply to `post_id` and expand its thread. Blank text or an
    /// unknown post is a no-op.
    pub fn reply(&mut self, post_id: i64, text: &str) -> Option<Saved<Reply>> {
        if text.trim().is_empty() {
            return None;
        }

        let now = Timestamp::now();
        let id = next_id(&self.posts, now);
        let reply = Reply::new(id, &self.author, text.to_string(), now.as_millisecond());

        let post = self.posts.iter_mut().find(|p| p.id == post_id)?;
        post.replies.push(reply.clone());
        self.expanded.insert(post_id);

        let report = self.sync.save(&self.posts);
        Some(Saved {
            item: reply,
            report,
        })
    }

    /// Replace the whole collection with an exported document.
    /// On `InvalidFormat` nothing changes, in memory or on disk.
    pub fn import(&mut self, raw: &str) -> SyncResult<SaveReport> {
        let posts = parse_import(raw).inspect_err(|e| warn!(error = %e, "import rejected"))?;

        self.posts = posts;
        self.expanded.clear();
        Ok(self.sync.save(&self.posts))
    }

    /// Snapshot for backup. Does not touch state.
    pub fn export(&self) -> ExportDocument {
        ExportDocument {
            tweets: self.posts.clone(),
            export_date: Timestamp::now().to_string(),
            source: self.source.as_ref().to_string(),
        }
    }

    /// Drop every post, save the empty collection, then purge the local key.
    pub fn clear(&mut self) -> SaveReport {
        self.posts.clear();
        self.expanded.clear();

        let mut report = self.sync.save(&self.posts);
        if let Err(e) = self.sync.purge_local() {
            warn!(error = %e, "failed to purge local posts");
            report.warnings.push(e);
        }
        report
    }
}

/// Shape-check an import document: a `tweets` (or `posts`) array of posts.
fn parse_import(raw: &str) -> SyncResult<Vec<Post>> {
    let doc: Value =
        serde_json::from_str(raw).map_err(|e| SyncError::InvalidFormat(e.to_string()))?;

    let list = doc
        .get("tweets")
        .or_else(|| doc.get("posts"))
        .ok_or_else(|| SyncError::InvalidFormat("missing `tweets` field".into()))?;

    if !list.is_array() {
        return Err(SyncError::InvalidFormat("`tweets` is not an array".into()));
    }

    serde_json::from_value(list.clone()).map_err(|e| SyncError::InvalidFormat(e.to_string()))
}
