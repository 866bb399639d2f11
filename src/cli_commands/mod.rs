use clap::Subcommand;

pub(crate) mod identity;
pub(crate) mod languages;
pub(crate) mod users;

pub(crate) use self::languages::{LanguageCommands, ResourceCommands};
pub(crate) use self::users::UserCommands;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in and keep the session for later commands
    Login(identity::LoginArgs),

    /// Create an account and log in with it
    Register(identity::RegisterArgs),

    /// Invalidate the refresh token and forget the session
    Logout,

    /// Show the logged-in principal
    Whoami(identity::WhoamiArgs),

    /// Manage users (admin)
    #[command(alias = "user")]
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage languages
    #[command(alias = "language")]
    Languages {
        #[command(subcommand)]
        command: LanguageCommands,
    },

    /// Manage the translation resources of a language
    #[command(alias = "resource")]
    Resources {
        #[command(subcommand)]
        command: ResourceCommands,
    },
}

#[derive(clap::Args, Clone, Debug)]
pub(crate) struct PageArgs {
    /// Sort columns, e.g. `name:asc,culture:desc`
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// 1-based page; ignored unless --limit is set
    #[arg(long, default_value_t = 1)]
    pub(crate) page: i64,
    /// Page size (0 returns everything)
    #[arg(long, default_value_t = 0)]
    pub(crate) limit: i64,
}
