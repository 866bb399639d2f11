use clap::Args;

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "LINGO_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
}

#[derive(Args)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "LINGO_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
    #[arg(long)]
    pub(crate) firstname: String,
    #[arg(long)]
    pub(crate) lastname: String,
    /// 0, 1 or 2
    #[arg(long, default_value_t = 0)]
    pub(crate) civility: u8,
}

#[derive(Args)]
pub(crate) struct WhoamiArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
