use clap::Subcommand;

use super::PageArgs;

#[derive(Subcommand)]
pub(crate) enum LanguageCommands {
    /// List languages
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Count languages
    Count,

    /// Show a language
    Get {
        id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a language
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        flag: String,
        /// Culture code, e.g. `fr` or `en-us`
        #[arg(long)]
        culture: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a language
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        flag: Option<String>,
        #[arg(long)]
        culture: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a language and all of its resources
    Delete { id: String },

    /// List the known culture codes
    Cultures {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the key/value pairs served for a culture
    Display {
        culture: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ResourceCommands {
    /// List the resources of a language
    List {
        language: String,
        /// Case-insensitive match on key and value
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Count the resources of a language
    Count {
        language: String,
        #[arg(long)]
        search: Option<String>,
    },

    /// Add a resource to a language
    Add {
        language: String,
        #[arg(long)]
        key: String,
        #[arg(long)]
        value: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a resource of a language
    Update {
        language: String,
        id: String,
        #[arg(long)]
        key: String,
        #[arg(long)]
        value: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a resource of a language
    Delete { language: String, id: String },
}
