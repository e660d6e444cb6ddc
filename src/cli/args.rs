//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::outline::NodeKind;

/// OPML outline editor: tree mutations, drag-and-drop reordering, and a round-tripping codec
#[derive(Parser, Debug)]
#[command(name = "rsopml")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (-d, -dd, -ddd)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the outline as a tree
    Show {
        /// OPML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Add a folder or feed
    Add {
        /// OPML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node kind to create
        #[arg(value_enum)]
        kind: KindArg,
        /// Parent folder (dash-joined path key, default: root sequence)
        #[arg(short, long)]
        at: Option<String>,
    },

    /// Edit a node's label and URLs
    Edit {
        /// OPML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Target node (dash-joined path key, e.g. 1-0)
        path: String,
        /// New display label
        #[arg(short, long)]
        label: Option<String>,
        /// New feed URL (ignored on folders)
        #[arg(long)]
        feed_url: Option<String>,
        /// New site URL (ignored on folders)
        #[arg(long)]
        site_url: Option<String>,
    },

    /// Delete a node and its subtree
    Delete {
        /// OPML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Target node (dash-joined path key)
        path: String,
    },

    /// Move a node (drag-and-drop semantics: a folder destination means "into it")
    Move {
        /// OPML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node to move (dash-joined path key)
        source: String,
        /// Destination (dash-joined path key)
        dest: String,
    },

    /// Write a normalized export of the document
    Export {
        /// OPML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Output file (default: configured export filename)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config path
    Path,
}

/// Node kinds as CLI values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Folder,
    Feed,
}

impl From<KindArg> for NodeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Folder => NodeKind::Folder,
            KindArg::Feed => NodeKind::Feed,
        }
    }
}
