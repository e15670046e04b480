use clap::{Parser, Subcommand};
use notes_client::CategoryFilter;
use notes_core::Category;

#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "Capture and organize notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the notes API (defaults to $NOTES_API_URL, then http://localhost:5001/api)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Quick capture: notes "my thought here"
    #[arg(trailing_var_arg = true)]
    pub note: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a new note
    #[command(alias = "add")]
    Capture {
        /// Optional title (defaults to "New Note at <time>")
        #[arg(short, long)]
        title: Option<String>,
        /// Category (defaults to Others)
        #[arg(short, long)]
        category: Option<Category>,
        /// Note content; read from stdin when omitted
        content: Vec<String>,
    },
    /// List notes, most recently updated first
    List {
        /// Only show one category ("All Notes" shows everything)
        #[arg(short, long, default_value = "All Notes")]
        category: CategoryFilter,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a single note
    Show {
        /// Note ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a note (or start a new one) and save on exit
    Edit {
        /// Note ID; omit to start a new note
        id: Option<String>,
        /// Replace the title
        #[arg(short, long)]
        title: Option<String>,
        /// Replace the content
        #[arg(long)]
        content: Option<String>,
        /// Move to a category
        #[arg(short = 'C', long)]
        category: Option<Category>,
        /// Autosave debounce window in milliseconds
        #[arg(long, default_value_t = 1000, value_name = "MS")]
        debounce_ms: u64,
    },
    /// Move a note to another category
    SetCategory {
        /// Note ID
        id: String,
        /// New category
        category: Category,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List the available categories
    Categories,
}
