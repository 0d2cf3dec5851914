#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod helpers;
pub mod id;
pub mod models;
pub mod output;
pub mod store;
pub mod sync;
pub mod timeline;

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::debug;

use cli::{Cli, Commands};
use config::Config;
use output::Output;
use store::{JsonBinClient, LocalStore, RemoteDocument};
use sync::{NetworkStatus, SyncCoordinator};
use timeline::Timeline;

pub const CHIRP_DIR: &str = ".chirp";
pub const REDIRECT_FILE: &str = "redirect";

/// Finds the `.chirp/` directory by walking up from the current directory.
/// Returns `None` if no `.chirp/` directory is found.
pub fn find_chirp_dir() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    let mut dir = current_dir.as_path();

    loop {
        let chirp_path = dir.join(CHIRP_DIR);
        if chirp_path.is_dir() {
            return Some(chirp_path);
        }

        dir = dir.parent()?;
    }
}

/// Resolves the final chirp directory, following any redirect file.
/// A redirect file contains a path (absolute or relative) to another `.chirp/` directory.
pub fn resolve_chirp_dir() -> Option<PathBuf> {
    let chirp_dir = find_chirp_dir()?;
    let redirect_path = chirp_dir.join(REDIRECT_FILE);

    if redirect_path.is_file() {
        let target = std::fs::read_to_string(&redirect_path).ok()?;
        let target = target.trim();

        let target_path = if PathBuf::from(target).is_absolute() {
            PathBuf::from(target)
        } else {
            chirp_dir.parent()?.join(target)
        };

        if target_path.is_dir() {
            return Some(target_path);
        }
    }

    Some(chirp_dir)
}

fn ensure_initialized() -> Result<PathBuf> {
    resolve_chirp_dir().ok_or_else(|| anyhow!("Chirp not initialized. Run 'chirp init' first."))
}

/// Start a session over `dir`: build the stores from config and run the
/// load protocol.
pub fn open_timeline(dir: &Path, config: &Config, force_offline: bool) -> Timeline {
    let status = NetworkStatus::from_online(config.network.online && !force_offline);
    let remote = JsonBinClient::from_config(&config.remote)
        .map(|client| Box::new(client) as Box<dyn RemoteDocument>);
    debug!(
        dir = %dir.display(),
        status = status.as_ref(),
        remote = remote.is_some(),
        "opening timeline"
    );

    let sync = SyncCoordinator::new(LocalStore::new(dir), remote, status);
    Timeline::open(sync, config.profile.clone())
}

pub fn run(cli: Cli) -> Result<()> {
    if let Commands::Init { stealth } = cli.command {
        return commands::init::run(stealth);
    }

    let dir = ensure_initialized()?;
    let config = Config::load(&dir)?;

    if let Commands::Network { state } = cli.command {
        let status = commands::network::run(state, &dir, config)?;
        return Output::new(false).network(status);
    }

    let mut timeline = open_timeline(&dir, &config, cli.offline);

    match cli.command {
        Commands::Post { text, json } => {
            let saved = commands::post::create(&text, &mut timeline)?;
            Output::new(json).post_created(&saved)
        }
        Commands::Reply {
            post_id,
            text,
            json,
        } => {
            let saved = commands::post::reply(post_id, &text, &mut timeline)?;
            Output::new(json).reply_created(&saved, &timeline, post_id)
        }
        Commands::List { replies, json } => Output::with_expanded(json, replies).timeline(&timeline),
        Commands::Show { post_id, json } => {
            let post = commands::post::show(post_id, &timeline)?;
            Output::with_expanded(json, true).post_detail(post)
        }
        // Opening the timeline already ran the load protocol.
        Commands::Refresh => Output::new(false).refreshed(timeline.source(), timeline.posts().len()),
        Commands::Export { output } => {
            let exported = commands::backup::export(output, &timeline)?;
            Output::new(false).exported(&exported)
        }
        Commands::Import { file } => {
            let report = commands::backup::import(&file, &mut timeline)?;
            Output::new(false).imported(&report, timeline.posts().len())
        }
        Commands::Clear { yes } => match commands::clear::run(yes, &mut timeline)? {
            Some(report) => Output::new(false).cleared(&report),
            None => Output::new(false).clear_cancelled(),
        },
        Commands::Status { json } => {
            let report = commands::status::run(&timeline);
            Output::new(json).status(&report)
        }
        Commands::Init { .. } | Commands::Network { .. } => Ok(()),
    }
}
