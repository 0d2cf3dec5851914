use std::collections::HashSet;

use jiff::Timestamp;

use crate::models::Post;

fn all_ids(posts: &[Post]) -> impl Iterator<Item = i64> + '_ {
    posts
        .iter()
        .flat_map(|p| std::iter::once(p.id).chain(p.replies.iter().map(|r| r.id)))
}

/// Id for a new post or reply created at `now`.
///
/// Ids are the creation millisecond. If that is not strictly greater than
/// every id already present (two creations in the same millisecond, or a
/// clock behind imported data) the id is bumped to `max + 1`. When `max`
/// is already `i64::MAX` the smallest unused positive id is taken instead,
/// so the result is always unique within `posts`.
pub fn next_id(posts: &[Post], now: Timestamp) -> i64 {
    let millis = now.as_millisecond();
    let Some(max) = all_ids(posts).max() else {
        return millis;
    };
    if max < millis {
        return millis;
    }
    if let Some(bumped) = max.checked_add(1) {
        return bumped;
    }

    let taken: HashSet<i64> = all_ids(posts).collect();
    (1..i64::MAX)
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(i64::MIN)
}
