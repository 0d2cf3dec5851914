use super::{Post, Reply};

fn sample_post(id: i64, name: &str, handle: &str, label: &str, content: &str, avatar: &str) -> Post {
    Post {
        id,
        author_name: name.to_string(),
        author_handle: handle.to_string(),
        created_label: label.to_string(),
        timestamp: None,
        content: content.to_string(),
        avatar: avatar.to_string(),
        replies: Vec::new(),
    }
}

/// The fixed sample timeline used when nothing could be loaded.
/// Three posts; the second carries exactly one reply.
pub fn seed_posts() -> Vec<Post> {
    let mut cafe = sample_post(
        2,
        "Mikan",
        "@mikan_love",
        "5 minutes ago",
        "Found a new dessert at the cafe! It looks amazing 🍰💕",
        "🍊",
    );
    cafe.replies.push(Reply {
        id: 21,
        author_name: "Himawari".to_string(),
        author_handle: "@himawari_sun".to_string(),
        created_label: "3 minutes ago".to_string(),
        timestamp: None,
        content: "Which cafe is it? I want to go too!".to_string(),
        avatar: "🌻".to_string(),
    });

    vec![
        sample_post(
            1,
            "Sakura",
            "@sakura_chan",
            "2 minutes ago",
            "The weather is lovely today, walking around was so much fun 🌸✨",
            "🌸",
        ),
        cafe,
        sample_post(
            3,
            "Himawari",
            "@himawari_sun",
            "10 minutes ago",
            "Studying programming! Tried writing my first CLI today 👩‍💻",
            "🌻",
        ),
    ]
}
