use std::path::PathBuf;

use serde::Serialize;

use crate::sync::{LoadSource, NetworkStatus};
use crate::timeline::Timeline;

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub network: NetworkStatus,
    pub remote_configured: bool,
    pub loaded_from: LoadSource,
    pub posts: usize,
    pub replies: usize,
    pub local_path: PathBuf,
}

pub fn run(timeline: &Timeline) -> StatusReport {
    let sync = timeline.sync();
    StatusReport {
        network: sync.status(),
        remote_configured: sync.has_remote(),
        loaded_from: timeline.source(),
        posts: timeline.posts().len(),
        replies: timeline.reply_total(),
        local_path: sync.local().path().to_path_buf(),
    }
}
