use lingo::model::{RegisterRequest, User, UserUpdate};

use super::*;

pub(super) fn handle_user_command(client: &mut AdminClient, command: UserCommands) -> Result<()> {
    match command {
        UserCommands::List { search, page, json } => {
            let users = client.list_users(&list_params(search, &page))?;
            if json {
                print_json(&users, "user list")?;
            } else {
                for user in &users {
                    println!("{}", user_line(user));
                }
            }
        }
        UserCommands::Count { search } => {
            println!("{}", client.count_users(search.as_deref())?);
        }
        UserCommands::Get { id, json } => {
            let user = client.get_user(&id)?;
            if json {
                print_json(&user, "user")?;
            } else {
                print_user(&user);
            }
        }
        UserCommands::Create {
            email,
            password,
            firstname,
            lastname,
            civility,
            json,
        } => {
            let request = RegisterRequest {
                email,
                password_confirm: password.clone(),
                password,
                civility: Some(civility),
                firstname,
                lastname,
            };
            let user = client.create_user(&request)?;
            if json {
                print_json(&user, "created user")?;
            } else {
                println!("{}", user.id.unwrap_or_default());
            }
        }
        UserCommands::Update {
            id,
            email,
            firstname,
            lastname,
            civility,
            phone,
            mobile,
            json,
        } => {
            let update = UserUpdate {
                id: Some(id.clone()),
                email,
                firstname,
                lastname,
                civility,
                phone,
                mobile,
                ..UserUpdate::default()
            };
            let user = client.update_user(&id, &update)?;
            if json {
                print_json(&user, "updated user")?;
            } else {
                print_user(&user);
            }
        }
        UserCommands::Delete { id } => {
            let count = client.delete_user(&id)?;
            println!("Deleted {} user(s)", count);
        }
        UserCommands::Rights { id, json } => {
            let rights = client.get_user_rights(&id)?;
            if json {
                print_json(&rights, "user rights")?;
            } else {
                for right in rights {
                    println!("{}", right);
                }
            }
        }
        UserCommands::SetRights { id, rights } => {
            let saved = client.save_user_rights(&id, &rights)?;
            println!("Saved {} right(s) for {}", saved.len(), id);
        }
        UserCommands::Catalogue { json } => {
            let catalogue = client.rights_catalogue()?;
            if json {
                print_json(&catalogue, "rights catalogue")?;
            } else {
                for (family, rights) in catalogue {
                    println!("{}: {}", family, rights.join(", "));
                }
            }
        }
    }

    Ok(())
}

fn user_line(user: &User) -> String {
    let name = [user.firstname.as_deref(), user.lastname.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{} {} {}",
        user.id.as_deref().unwrap_or("-"),
        user.email.as_deref().unwrap_or("-"),
        name
    )
    .trim_end()
    .to_string()
}

fn print_user(user: &User) {
    println!("id: {}", user.id.as_deref().unwrap_or("-"));
    println!("email: {}", user.email.as_deref().unwrap_or("-"));
    if let Some(firstname) = &user.firstname {
        println!("firstname: {}", firstname);
    }
    if let Some(lastname) = &user.lastname {
        println!("lastname: {}", lastname);
    }
    if let Some(civility) = user.civility {
        println!("civility: {}", civility);
    }
    if user.system() {
        println!("system: true");
    }
}
