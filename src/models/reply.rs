use serde::{Deserialize, Serialize};

use super::Author;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: i64,
    #[serde(rename = "username")]
    pub author_name: String,
    #[serde(rename = "handle")]
    pub author_handle: String,
    /// Relative-time label frozen at creation ("just now").
    #[serde(rename = "time")]
    pub created_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    pub content: String,
    pub avatar: String,
}

impl Reply {
    pub fn new(id: i64, author: &Author, content: String, timestamp: i64) -> Self {
        Self {
            id,
            author_name: author.name.clone(),
            author_handle: author.handle.clone(),
            created_label: super::JUST_NOW.to_string(),
            timestamp: Some(timestamp),
            content,
            avatar: author.avatar.clone(),
        }
    }
}
