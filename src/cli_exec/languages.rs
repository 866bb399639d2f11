use lingo::model::{Language, LanguageResource};

use super::*;

pub(super) fn handle_language_command(
    client: &mut AdminClient,
    command: LanguageCommands,
) -> Result<()> {
    match command {
        LanguageCommands::List { page, json } => {
            let languages = client.list_languages(&list_params(None, &page).pagination)?;
            if json {
                print_json(&languages, "language list")?;
            } else {
                for language in &languages {
                    println!("{}", language_line(language));
                }
            }
        }
        LanguageCommands::Count => {
            println!("{}", client.count_languages()?);
        }
        LanguageCommands::Get { id, json } => {
            let language = client.get_language(&id)?;
            if json {
                print_json(&language, "language")?;
            } else {
                println!("{}", language_line(&language));
            }
        }
        LanguageCommands::Create {
            name,
            flag,
            culture,
            json,
        } => {
            let language = client.create_language(&Language {
                id: None,
                name,
                flag,
                culture,
                resources: None,
            })?;
            if json {
                print_json(&language, "created language")?;
            } else {
                println!("{}", language.id.unwrap_or_default());
            }
        }
        LanguageCommands::Update {
            id,
            name,
            flag,
            culture,
            json,
        } => {
            let mut language = client.get_language(&id)?;
            if let Some(name) = name {
                language.name = name;
            }
            if let Some(flag) = flag {
                language.flag = flag;
            }
            if let Some(culture) = culture {
                language.culture = culture;
            }
            let language = client.update_language(&id, &language)?;
            if json {
                print_json(&language, "updated language")?;
            } else {
                println!("{}", language_line(&language));
            }
        }
        LanguageCommands::Delete { id } => {
            let count = client.delete_language(&id)?;
            println!("Deleted {} language(s)", count);
        }
        LanguageCommands::Cultures { json } => {
            let cultures = client.cultures()?;
            if json {
                print_json(&cultures, "cultures")?;
            } else {
                for culture in cultures {
                    println!("{} {}", culture.code, culture.name);
                }
            }
        }
        LanguageCommands::Display { culture, json } => {
            let resources = client.display(&culture)?;
            if json {
                print_json(&resources, "display resources")?;
            } else {
                for resource in resources {
                    println!("{} = {}", resource.key, resource.value);
                }
            }
        }
    }

    Ok(())
}

pub(super) fn handle_resource_command(
    client: &mut AdminClient,
    command: ResourceCommands,
) -> Result<()> {
    match command {
        ResourceCommands::List {
            language,
            search,
            page,
            json,
        } => {
            let resources = client.list_resources(&language, &list_params(search, &page))?;
            if json {
                print_json(&resources, "resource list")?;
            } else {
                for resource in &resources {
                    println!("{}", resource_line(resource));
                }
            }
        }
        ResourceCommands::Count { language, search } => {
            println!("{}", client.count_resources(&language, search.as_deref())?);
        }
        ResourceCommands::Add {
            language,
            key,
            value,
            json,
        } => {
            let resource = client.create_resource(
                &language,
                &LanguageResource {
                    id: None,
                    key,
                    value,
                },
            )?;
            if json {
                print_json(&resource, "created resource")?;
            } else {
                println!("{}", resource.id.unwrap_or_default());
            }
        }
        ResourceCommands::Update {
            language,
            id,
            key,
            value,
            json,
        } => {
            let resource = client.update_resource(
                &language,
                &id,
                &LanguageResource {
                    id: Some(id.clone()),
                    key,
                    value,
                },
            )?;
            if json {
                print_json(&resource, "updated resource")?;
            } else {
                println!("{}", resource_line(&resource));
            }
        }
        ResourceCommands::Delete { language, id } => {
            let count = client.delete_resource(&language, &id)?;
            println!("Deleted {} resource(s)", count);
        }
    }

    Ok(())
}

fn language_line(language: &Language) -> String {
    format!(
        "{} {} {} {}",
        language.id.as_deref().unwrap_or("-"),
        language.culture,
        language.flag,
        language.name
    )
}

fn resource_line(resource: &LanguageResource) -> String {
    format!(
        "{} {} = {}",
        resource.id.as_deref().unwrap_or("-"),
        resource.key,
        resource.value
    )
}
