use anyhow::{Context, Result};

use lingo::remote::{AdminClient, ListParams};

use crate::cli_runtime::print_json;
use crate::{Commands, LanguageCommands, PageArgs, ResourceCommands, UserCommands};

mod dispatch;
mod identity;
mod languages;
mod users;

pub(super) fn handle_command(client: AdminClient, command: Commands) -> Result<()> {
    dispatch::handle_command(client, command)
}

fn list_params(search: Option<String>, page: &PageArgs) -> ListParams {
    ListParams::new(search.as_deref(), page.sort.as_deref(), page.page, page.limit)
}
