use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "chirp")]
#[command(about = "Post short messages and replies, synced to a shared JSON document", long_about = None)]
pub struct Cli {
    /// Treat the network as offline for this invocation
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize chirp in the current directory
    Init {
        /// Initialize without committing to the repo (adds .chirp to .gitignore or .git/info/exclude)
        #[arg(long)]
        stealth: bool,
    },

    /// Post a new message
    Post {
        /// The message text
        text: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reply to a post
    Reply {
        /// The post ID to reply to
        post_id: i64,

        /// The reply text
        text: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the timeline, newest first
    List {
        /// Show every reply thread expanded
        #[arg(long)]
        replies: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one post with its replies
    Show {
        /// The post ID to show
        post_id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reload the timeline (remote first, then local)
    Refresh,

    /// Write a JSON backup of the timeline
    Export {
        /// Destination file (defaults to tweets-backup-<date>.json)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace the timeline with a JSON backup
    Import {
        /// Backup file to read
        file: PathBuf,
    },

    /// Delete every post
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show or set the network state
    Network {
        /// New state; omit to show the current one
        state: Option<NetworkArg>,
    },

    /// Show sync status and counts
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NetworkArg {
    Online,
    Offline,
}
