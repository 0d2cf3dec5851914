use serde::Serialize;
use strum::AsRefStr;
use tracing::{info, warn};

use crate::error::{SyncError, SyncResult};
use crate::models::{Post, seed_posts};
use crate::store::{LocalStore, RemoteDocument};

/// Connectivity as last reported from outside. Never probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "snake_case")]
pub enum NetworkStatus {
    Online,
    Offline,
}

impl NetworkStatus {
    pub fn from_online(online: bool) -> Self {
        if online {
            NetworkStatus::Online
        } else {
            NetworkStatus::Offline
        }
    }
}

/// Where the timeline adopted by the last load came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "snake_case")]
pub enum LoadSource {
    /// Fetched from the remote document.
    Remote,
    /// Online, but the remote failed or is not configured.
    Local,
    /// Offline; read from the local store.
    Offline,
    /// Nothing found anywhere; the sample timeline.
    Seed,
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub posts: Vec<Post>,
    pub source: LoadSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteSave {
    Saved,
    /// Offline or no remote configured; nothing attempted.
    Skipped,
    Failed,
}

/// Outcome of one save. Warnings never undo the in-memory change.
#[derive(Debug)]
pub struct SaveReport {
    pub local_saved: bool,
    pub remote: RemoteSave,
    pub warnings: Vec<SyncError>,
}

impl SaveReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// User-facing warning lines, without technical detail.
    pub fn messages(&self) -> Vec<&'static str> {
        self.warnings.iter().map(SyncError::user_message).collect()
    }
}

/// Decides which store to trust on load and fans writes out on save.
/// The only writer of persistent state.
pub struct SyncCoordinator {
    local: LocalStore,
    remote: Option<Box<dyn RemoteDocument>>,
    status: NetworkStatus,
}

impl SyncCoordinator {
    pub fn new(
        local: LocalStore,
        remote: Option<Box<dyn RemoteDocument>>,
        status: NetworkStatus,
    ) -> Self {
        Self {
            local,
            remote,
            status,
        }
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn status(&self) -> NetworkStatus {
        self.status
    }

    pub fn is_online(&self) -> bool {
        self.status == NetworkStatus::Online
    }

    pub fn set_status(&mut self, status: NetworkStatus) {
        if self.status != status {
            info!(from = self.status.as_ref(), to = status.as_ref(), "network status changed");
        }
        self.status = status;
    }

    /// The remote, but only when it may be used right now.
    fn reachable_remote(&self) -> Option<&dyn RemoteDocument> {
        if self.is_online() {
            self.remote.as_deref()
        } else {
            None
        }
    }

    /// Remote first when online, then local, then the seed timeline.
    pub fn load(&self) -> LoadOutcome {
        let adopted = match self.reachable_remote().map(|remote| remote.fetch()) {
            Some(Ok(posts)) => {
                info!(count = posts.len(), "loaded from remote");
                Some((posts, LoadSource::Remote))
            }
            Some(Err(e)) => {
                warn!(error = %e, "remote load failed, falling back to local");
                None
            }
            None => None,
        };

        let (posts, source) = adopted.unwrap_or_else(|| {
            let source = if self.is_online() {
                LoadSource::Local
            } else {
                LoadSource::Offline
            };
            let posts = self.local.read();
            info!(count = posts.len(), source = source.as_ref(), "loaded from local");
            (posts, source)
        });

        if !posts.is_empty() {
            return LoadOutcome { posts, source };
        }

        let seed = seed_posts();
        self.push_seed(&seed);
        LoadOutcome {
            posts: seed,
            source: LoadSource::Seed,
        }
    }

    /// Persist the seed timeline. Every failure here is only logged.
    fn push_seed(&self, seed: &[Post]) {
        info!("no posts found, seeding sample timeline");
        if let Err(e) = self.local.write(seed) {
            warn!(error = %e, "failed to store seed posts locally");
        }
        if let Some(remote) = self.reachable_remote() {
            if let Err(e) = remote.replace(seed) {
                warn!(error = %e, "failed to push seed posts to remote");
            }
        }
    }

    /// Local always, remote best-effort when online. No retries.
    pub fn save(&self, posts: &[Post]) -> SaveReport {
        let mut warnings = Vec::new();

        let local_saved = match self.local.write(posts) {
            Ok(()) => true,
            Err(e) => {
                warnings.push(e);
                false
            }
        };

        let remote = match self.reachable_remote() {
            None => RemoteSave::Skipped,
            Some(remote) => match remote.replace(posts) {
                Ok(()) => RemoteSave::Saved,
                Err(e) => {
                    warn!(error = %e, "remote save failed, local copy kept");
                    warnings.push(e);
                    RemoteSave::Failed
                }
            },
        };

        SaveReport {
            local_saved,
            remote,
            warnings,
        }
    }

    pub fn purge_local(&self) -> SyncResult<()> {
        self.local.purge()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    pub struct FakeState {
        pub posts: Vec<Post>,
        pub fail_fetch: bool,
        pub fail_replace: bool,
        pub fetches: usize,
        pub replaces: usize,
    }

    /// In-memory remote document. Clones share state so tests can inspect
    /// it after handing one to a coordinator.
    #[derive(Clone, Default)]
    pub struct FakeRemote(pub Rc<RefCell<FakeState>>);

    impl FakeRemote {
        pub fn with_posts(posts: Vec<Post>) -> Self {
            let remote = Self::default();
            remote.0.borrow_mut().posts = posts;
            remote
        }

        pub fn failing() -> Self {
            let remote = Self::default();
            {
                let mut state = remote.0.borrow_mut();
                state.fail_fetch = true;
                state.fail_replace = true;
            }
            remote
        }
    }

    impl RemoteDocument for FakeRemote {
        fn fetch(&self) -> SyncResult<Vec<Post>> {
            let mut state = self.0.borrow_mut();
            state.fetches += 1;
            if state.fail_fetch {
                return Err(SyncError::RemoteUnavailable("fake fetch failure".into()));
            }
            Ok(state.posts.clone())
        }

        fn replace(&self, posts: &[Post]) -> SyncResult<()> {
            let mut state = self.0.borrow_mut();
            state.replaces += 1;
            if state.fail_replace {
                return Err(SyncError::RemoteUnavailable("fake replace failure".into()));
            }
            state.posts = posts.to_vec();
            Ok(())
        }
    }
}
