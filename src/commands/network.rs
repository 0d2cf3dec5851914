use std::path::Path;

use anyhow::Result;

use crate::cli::NetworkArg;
use crate::config::Config;
use crate::sync::NetworkStatus;

/// Show the persisted network state, or set it and save the config.
pub fn run(state: Option<NetworkArg>, dir: &Path, mut config: Config) -> Result<NetworkStatus> {
    if let Some(state) = state {
        config.network.online = state == NetworkArg::Online;
        config.save(dir)?;
    }
    Ok(NetworkStatus::from_online(config.network.online))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    fn show_does_not_write_config() {
        let dir = TempDir::new().unwrap();
        let status = run(None, dir.path(), Config::default()).unwrap();
        assert_eq!(status, NetworkStatus::Online);
        assert!(!Config::path(dir.path()).exists());
    }

    #[rstest]
    #[case(NetworkArg::Offline, false)]
    #[case(NetworkArg::Online, true)]
    fn set_persists(#[case] arg: NetworkArg, #[case] online: bool) {
        let dir = TempDir::new().unwrap();
        run(Some(arg), dir.path(), Config::default()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().network.online, online);
    }
}
