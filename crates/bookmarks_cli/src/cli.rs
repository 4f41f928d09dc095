//! Command-line surface.
//!
//! Every subcommand maps onto one route of the core route table; `open`
//! accepts a raw location and lets the router pick the view.

use bookmarks_core::{parse_tag_input, BookmarkDraft, BookmarkId, BookmarkPatch, ListFilter};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookmarks")]
#[command(about = "Keep a local list of bookmarks with titles, urls and tags")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file path
    #[arg(long, global = true, env = "BOOKMARKS_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// SQLite database path
    #[arg(long, global = true, env = "BOOKMARKS_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Absolute directory for log files
    #[arg(long, global = true, env = "BOOKMARKS_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "BOOKMARKS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Prefix every route is mounted under, e.g. `/bookmarks`
    #[arg(long, global = true, env = "BOOKMARKS_BASE_PATH")]
    pub base_path: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List bookmarks, newest first (route `/`)
    List {
        /// Only bookmarks carrying this tag
        #[arg(long)]
        tag: Option<String>,
        /// Only bookmarks whose title or url contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a bookmark (route `/add`)
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        /// Comma separated tags, e.g. `rust,docs`
        #[arg(long)]
        tags: Option<String>,
    },
    /// Show, change or delete one bookmark (route `/edit/:id`)
    Edit {
        id: BookmarkId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        /// Comma separated tags; replaces the whole set
        #[arg(long)]
        tags: Option<String>,
        #[arg(long, conflicts_with_all = ["title", "url", "tags"])]
        delete: bool,
    },
    /// Export, import or wipe the collection (route `/config`)
    Config {
        /// Write the collection as JSON to this file (`-` for stdout)
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
        /// Replace the collection with a JSON array read from this file
        #[arg(long, value_name = "FILE", conflicts_with = "export")]
        import: Option<PathBuf>,
        /// Delete every bookmark
        #[arg(long, requires = "yes", conflicts_with_all = ["export", "import"])]
        delete_all: bool,
        /// Confirm a destructive action
        #[arg(long)]
        yes: bool,
    },
    /// Render the view for a location such as `/edit/1700000000000`
    Open { location: String },
    /// Print the route table
    Routes,
}

impl Command {
    pub fn list_filter(tag: Option<String>, search: Option<String>) -> ListFilter {
        ListFilter { tag, text: search }
    }

    pub fn draft(title: String, url: String, tags: Option<String>) -> BookmarkDraft {
        let draft = BookmarkDraft::new(title, url);
        match tags {
            Some(raw) => draft.with_tags(parse_tag_input(&raw)),
            None => draft,
        }
    }

    pub fn patch(
        title: Option<String>,
        url: Option<String>,
        tags: Option<String>,
    ) -> BookmarkPatch {
        BookmarkPatch {
            title,
            url,
            tags: tags.map(|raw| parse_tag_input(&raw)),
        }
    }
}
