use clap::Subcommand;

use super::PageArgs;

#[derive(Subcommand)]
pub(crate) enum UserCommands {
    /// List users
    List {
        /// Case-insensitive match on email and names
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Count users
    Count {
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a user
    Get {
        id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a local user with no rights
    Create {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LINGO_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        firstname: String,
        #[arg(long)]
        lastname: String,
        #[arg(long, default_value_t = 0)]
        civility: u8,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change profile fields of a user
    Update {
        id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        firstname: Option<String>,
        #[arg(long)]
        lastname: Option<String>,
        #[arg(long)]
        civility: Option<u8>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a user
    Delete { id: String },

    /// Show the rights held by a user
    Rights {
        id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace the rights held by a user
    SetRights {
        id: String,
        /// Right codes, e.g. R_API_LANGUAGE_R
        rights: Vec<String>,
    },

    /// List every assignable right by family
    Catalogue {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}
