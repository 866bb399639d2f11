use super::identity::{
    handle_login_command, handle_logout_command, handle_register_command, handle_whoami_command,
};
use super::languages::{handle_language_command, handle_resource_command};
use super::users::handle_user_command;
use super::*;

pub(super) fn handle_command(mut client: AdminClient, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => handle_login_command(&mut client, &args.email, &args.password)?,
        Commands::Register(args) => handle_register_command(&mut client, args)?,
        Commands::Logout => handle_logout_command(&mut client)?,
        Commands::Whoami(args) => handle_whoami_command(&mut client, args.json)?,
        Commands::Users { command } => handle_user_command(&mut client, command)?,
        Commands::Languages { command } => handle_language_command(&mut client, command)?,
        Commands::Resources { command } => handle_resource_command(&mut client, command)?,
    }

    Ok(())
}
