//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notepin")]
#[command(about = "Terminal client for a personal notes server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Filters shared by every command that renders or acts on the note list
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Full-text search, evaluated by the server
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only notes in this group (name or id)
    #[arg(short, long)]
    pub group: Option<String>,

    /// Only notes updated on this day (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Comma-separated tags to filter by
    #[arg(short, long)]
    pub tags: Option<String>,

    /// How tags combine (or, and)
    #[arg(short, long, default_value = "or")]
    pub mode: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new workspace
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Base URL of the notes server
        #[arg(long, default_value = crate::infrastructure::config::DEFAULT_SERVER_URL)]
        server: String,

        /// Anti-forgery token for mutating requests
        #[arg(long)]
        csrf_token: Option<String>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// List notes: tag filter, manual order, pinned first
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show one note in full
    Show {
        id: i64,
    },

    /// Create a blank note
    New,

    /// Edit a note's fields; edits are debounced into one save
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        /// Rich-text markup
        #[arg(long)]
        content: Option<String>,

        /// Comma-separated tags (replaces existing)
        #[arg(long)]
        tags: Option<String>,

        /// Comma-separated group names (replaces existing)
        #[arg(long)]
        groups: Option<String>,

        /// Save immediately instead of after the quiet period
        #[arg(long)]
        save: bool,
    },

    /// Copy a note, title suffixed with "(copy)"
    Duplicate {
        id: i64,
    },

    /// Delete a note
    Delete {
        id: i64,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Pin or unpin a note
    Pin {
        id: i64,
    },

    /// Move a note to another note's position in the rendered list
    Move {
        /// Note being moved
        dragged: i64,

        /// Note whose position it takes
        target: i64,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Manage groups
    Groups {
        #[command(subcommand)]
        action: Option<GroupCommands>,
    },

    /// Upload files to a note
    Attach {
        note_id: i64,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Download an attachment
    Fetch {
        id: i64,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete an attachment
    Detach {
        id: i64,
    },

    /// Show or change the theme (dark, light, toggle)
    Theme {
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// List groups
    List,

    /// Create a group
    Add { name: String },

    /// Rename a group (name or id)
    Rename { group: String, name: String },

    /// Delete a group; its notes are kept. The notes list shown afterwards
    /// drops the group filter when it pointed at the deleted group.
    Delete {
        /// Group to delete (name or id)
        name: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,

        #[command(flatten)]
        view: ViewArgs,
    },
}
