use serde::{Deserialize, Serialize};

use super::{Author, Reply};

/// Characters a post is expected to fit in. Advisory only; longer posts
/// are accepted.
pub const CHAR_LIMIT: usize = 280;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "username")]
    pub author_name: String,
    #[serde(rename = "handle")]
    pub author_handle: String,
    #[serde(rename = "time")]
    pub created_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    pub content: String,
    pub avatar: String,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Post {
    pub fn new(id: i64, author: &Author, content: String, timestamp: i64) -> Self {
        Self {
            id,
            author_name: author.name.clone(),
            author_handle: author.handle.clone(),
            created_label: super::JUST_NOW.to_string(),
            timestamp: Some(timestamp),
            content,
            avatar: author.avatar.clone(),
            replies: Vec::new(),
        }
    }

    /// Remaining characters against [`CHAR_LIMIT`]; negative when over.
    pub fn remaining_chars(&self) -> i64 {
        let used = i64::try_from(self.content.chars().count()).unwrap_or(i64::MAX);
        i64::try_from(CHAR_LIMIT).unwrap_or(0) - used
    }

    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    // Posts use the field names of the browser documents on the wire so
    // existing exports and remote documents stay readable.
    #[rstest]
    fn serializes_with_document_field_names() {
        let post = Post::new(7, &Author::default(), "hello".to_string(), 1_000);
        let value = serde_json::to_value(&post).unwrap();

        assert_eq!(value["username"], "You");
        assert_eq!(value["handle"], "@you");
        assert_eq!(value["time"], "just now");
        assert_eq!(value["timestamp"], 1_000);
        assert_eq!(value["replies"], json!([]));
    }

    // Documents written before `timestamp` existed must still load.
    #[rstest]
    fn deserializes_without_timestamp() {
        let raw = json!({
            "id": 1,
            "username": "sakura",
            "handle": "@sakura_chan",
            "time": "2 minutes ago",
            "content": "hi",
            "replies": [],
            "avatar": "🌸"
        });
        let post: Post = serde_json::from_value(raw).unwrap();
        assert_eq!(post.timestamp, None);
        assert_eq!(post.author_handle, "@sakura_chan");

        let back = serde_json::to_value(&post).unwrap();
        assert!(back.get("timestamp").is_none());
    }

    #[rstest]
    #[case::empty("", 280)]
    #[case::ascii("hello", 275)]
    #[case::multibyte("🌸🌸", 278)]
    fn remaining_chars_counts_characters(#[case] content: &str, #[case] expected: i64) {
        let post = Post::new(1, &Author::default(), content.to_string(), 0);
        assert_eq!(post.remaining_chars(), expected);
    }

    #[rstest]
    fn remaining_chars_goes_negative_when_over() {
        let post = Post::new(1, &Author::default(), "x".repeat(300), 0);
        assert_eq!(post.remaining_chars(), -20);
    }
}
