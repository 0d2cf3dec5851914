mod author;
mod post;
mod reply;
mod seed;

pub use author::Author;
pub use post::{CHAR_LIMIT, Post};
pub use reply::Reply;
pub use seed::seed_posts;

/// Label given to freshly created posts and replies. Never refreshed.
pub const JUST_NOW: &str = "just now";
