use anyhow::{Result, anyhow, bail};

use crate::helpers::find_similar_id;
use crate::models::{Post, Reply};
use crate::timeline::{Saved, Timeline};

fn post_not_found(post_id: i64, timeline: &Timeline) -> anyhow::Error {
    let ids: Vec<i64> = timeline.posts().iter().map(|p| p.id).collect();
    match find_similar_id(post_id, &ids) {
        Some(suggestion) => anyhow!("Post not found: {post_id}\nDid you mean: {suggestion}"),
        None => anyhow!("Post not found: {post_id}"),
    }
}

pub fn create(text: &str, timeline: &mut Timeline) -> Result<Saved<Post>> {
    timeline
        .compose(text)
        .ok_or_else(|| anyhow!("Nothing to post: the message is empty"))
}

pub fn reply(post_id: i64, text: &str, timeline: &mut Timeline) -> Result<Saved<Reply>> {
    if text.trim().is_empty() {
        bail!("Nothing to post: the reply is empty");
    }
    if timeline.get(post_id).is_none() {
        return Err(post_not_found(post_id, timeline));
    }

    timeline
        .reply(post_id, text)
        .ok_or_else(|| post_not_found(post_id, timeline))
}

pub fn show(post_id: i64, timeline: &Timeline) -> Result<&Post> {
    timeline
        .get(post_id)
        .ok_or_else(|| post_not_found(post_id, timeline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;
    use crate::store::LocalStore;
    use crate::sync::{NetworkStatus, SyncCoordinator};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn timeline() -> (TempDir, Timeline) {
        let dir = TempDir::new().unwrap();
        let sync = SyncCoordinator::new(LocalStore::new(dir.path()), None, NetworkStatus::Offline);
        (dir, Timeline::open(sync, Author::default()))
    }

    #[rstest]
    fn create_rejects_blank(timeline: (TempDir, Timeline)) {
        let (_dir, mut timeline) = timeline;
        assert!(create("  ", &mut timeline).is_err());
        assert_eq!(timeline.posts().len(), 3);
    }

    // Unknown ids suggest a near match.
    #[rstest]
    fn reply_unknown_suggests(timeline: (TempDir, Timeline)) {
        let (_dir, mut timeline) = timeline;
        let err = reply(4, "hi", &mut timeline).unwrap_err().to_string();
        assert!(err.contains("Post not found: 4"));
        assert!(err.contains("Did you mean"));
    }

    #[rstest]
    fn reply_existing_post(timeline: (TempDir, Timeline)) {
        let (_dir, mut timeline) = timeline;
        let saved = reply(3, "nice", &mut timeline).unwrap();
        assert_eq!(saved.item.content, "nice");
        assert_eq!(timeline.get(3).unwrap().replies.len(), 1);
    }

    #[rstest]
    fn show_missing_post_fails(timeline: (TempDir, Timeline)) {
        let (_dir, timeline) = timeline;
        assert!(show(1, &timeline).is_ok());
        assert!(show(123_456_789, &timeline).is_err());
    }
}
