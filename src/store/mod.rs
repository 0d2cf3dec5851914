mod local;
mod remote;

pub use local::{LocalStore, POSTS_FILE, atomic_write};
pub use remote::{JsonBinClient, RemoteDocument};
