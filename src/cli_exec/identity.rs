use lingo::model::RegisterRequest;

use super::*;
use crate::cli_commands::identity::RegisterArgs;

pub(super) fn handle_login_command(
    client: &mut AdminClient,
    email: &str,
    password: &str,
) -> Result<()> {
    let auth = client.login(email, password)?;
    println!("Logged in as {} at {}", auth.username, client.base_url());
    Ok(())
}

pub(super) fn handle_register_command(client: &mut AdminClient, args: RegisterArgs) -> Result<()> {
    let request = RegisterRequest {
        email: args.email,
        password_confirm: args.password.clone(),
        password: args.password,
        civility: Some(args.civility),
        firstname: args.firstname,
        lastname: args.lastname,
    };
    let auth = client.register(&request)?;
    println!("Registered and logged in as {}", auth.username);
    Ok(())
}

pub(super) fn handle_logout_command(client: &mut AdminClient) -> Result<()> {
    if client.session().is_none() {
        println!("Not logged in");
        return Ok(());
    }
    client.logout()?;
    println!("Logged out");
    Ok(())
}

pub(super) fn handle_whoami_command(client: &mut AdminClient, json: bool) -> Result<()> {
    let session = client
        .session()
        .cloned()
        .context("not logged in (run `lingo login`)")?;
    if json {
        return print_json(
            &serde_json::json!({
                "url": session.base_url,
                "username": session.username,
                "rights": session.rights,
            }),
            "whoami",
        );
    }
    println!("user: {}", session.username);
    println!("url: {}", session.base_url);
    if session.rights.is_empty() {
        println!("rights: (none)");
    } else {
        println!("rights: {}", session.rights.join(", "));
    }
    Ok(())
}
