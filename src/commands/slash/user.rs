//! User commands: /whois, /avatar and the "User Info" and "avatar" user context menus

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::{CommandOptionType, CommandType};

/// Creates user slash commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_whois_command(), create_avatar_command()]
}

/// Creates user context menu commands
pub fn create_context_menu_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_user_context_command("User Info"),
        create_user_context_command("avatar"),
    ]
}

fn create_whois_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("whois")
        .description("Gets information about a user")
        .dm_permission(false)
        .create_option(|option| {
            option
                .name("user")
                .description("The user to get information about")
                .kind(CommandOptionType::User)
                .required(false)
        })
        .to_owned()
}

fn create_avatar_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("avatar")
        .description("Replies with your avatar!")
        .create_option(|option| {
            option
                .name("target")
                .description("The user's avatar to show")
                .kind(CommandOptionType::User)
                .required(false)
        })
        .to_owned()
}

// Context menu commands carry no description or options
fn create_user_context_command(name: &str) -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name(name)
        .kind(CommandType::User)
        .to_owned()
}
