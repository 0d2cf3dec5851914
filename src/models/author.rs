use serde::{Deserialize, Serialize};

/// Static display identity attached to posts and replies. There are no
/// accounts; this is whatever the profile config says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
    pub handle: String,
    pub avatar: String,
}

impl Author {
    pub fn new(name: impl Into<String>, handle: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handle: handle.into(),
            avatar: avatar.into(),
        }
    }
}

impl Default for Author {
    fn default() -> Self {
        Self::new("You", "@you", "💎")
    }
}
