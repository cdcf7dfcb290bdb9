//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blocknotes")]
#[command(about = "Notes made of text, image and audio blocks", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new notebook
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Create and save a new note
    New {
        title: String,

        /// Initial text block (repeatable)
        #[arg(short, long = "text", value_name = "BODY")]
        texts: Vec<String>,
    },

    /// List notes, most recently updated first
    List {
        /// Show at most this many notes
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show a note and its items, newest first
    Show { note_id: String },

    /// Append an item to a note and save it
    Add {
        note_id: String,

        #[command(subcommand)]
        item: AddItem,
    },

    /// Change a note's title
    Rename { note_id: String, title: String },

    /// Record an audio item until Enter is pressed
    Record { note_id: String },

    /// Play an audio item
    Play { note_id: String, item_id: String },

    /// Delete a note and all of its items
    Delete { note_id: String },

    /// Delete a single item from a note
    DeleteItem { note_id: String, item_id: String },

    /// Print the number of notes
    Count,

    /// Delete every note
    Clear {
        /// Confirm deleting all notes
        #[arg(long)]
        yes: bool,
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
}

#[derive(Subcommand, Debug)]
pub enum AddItem {
    /// A text block
    Text { body: String },

    /// An image stored outside the notebook (path or URI)
    Image { link: String },

    /// An existing audio file
    Audio {
        link: String,

        /// Length in seconds
        #[arg(short, long)]
        duration: u32,
    },
}
