//! CLI module for Tingli.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tingli - Timed-Transcript Language Study
///
/// A local-first study server and CLI for learning a language from video
/// clips with synchronized transcripts. The name comes from 听力 (tīnglì),
/// "listening comprehension."
#[derive(Parser, Debug)]
#[command(name = "tingli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Tingli: config file, data directory, and catalog
    Init,

    /// Manage clips in the catalog
    Clip {
        #[command(subcommand)]
        action: ClipAction,
    },

    /// Ingest a pasted transcript script for a clip
    Ingest {
        /// Clip ID to attach the phrases to
        clip_id: String,

        /// Read the script from a file instead of stdin
        #[arg(short, long)]
        file: Option<String>,
    },

    /// List clips in the catalog
    List,

    /// Show a clip's transcript with timestamps
    Show {
        /// Clip ID to show
        clip_id: String,
    },

    /// Export a clip's transcript
    Export {
        /// Clip ID to export
        clip_id: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (json, srt, vtt)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Resolve the active phrase for a playback position
    Locate {
        /// Clip ID to look in
        clip_id: String,

        /// Playback position in seconds (clip time)
        position: f64,
    },

    /// Manage bookmarks
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },

    /// Generate a review quiz for a clip
    Quiz {
        /// Clip ID to quiz on
        clip_id: String,

        /// Maximum number of questions
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Start the HTTP API server for the web frontend
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClipAction {
    /// Register a new clip
    Add {
        /// Clip ID (e.g. "clip_variety_1")
        id: String,

        /// Display title
        #[arg(short, long)]
        title: String,

        /// Source media identifier
        #[arg(short, long)]
        media: String,

        /// Excerpt start in the source media (seconds)
        #[arg(long)]
        start: f64,

        /// Excerpt end in the source media (seconds)
        #[arg(long)]
        end: f64,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Editor name recorded on the clip
        #[arg(long, default_value = "editor")]
        created_by: String,
    },

    /// Remove a clip and its phrases
    Remove {
        /// Clip ID to remove
        clip_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookmarkAction {
    /// Add a bookmark at a clip position
    Add {
        /// Clip ID to bookmark into
        clip_id: String,

        /// Position in seconds (clip time)
        position: f64,

        /// User the bookmark belongs to
        #[arg(short, long, default_value = "learner")]
        user: String,

        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },

    /// List a user's bookmarks
    List {
        /// User to list bookmarks for
        #[arg(short, long, default_value = "learner")]
        user: String,
    },

    /// Remove a bookmark by ID
    Remove {
        /// Bookmark ID
        bookmark_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. "store.provider")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
