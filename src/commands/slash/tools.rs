//! Tool slash commands: /serverinfo, /botstatus, /embed

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Discord's cap on an embed title
pub const EMBED_TITLE_LIMIT: u16 = 256;
/// Discord's cap on an embed description
pub const EMBED_DESCRIPTION_LIMIT: u16 = 4096;

/// Creates tool commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_serverinfo_command(),
        create_botstatus_command(),
        create_embed_command(),
    ]
}

fn create_serverinfo_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("serverinfo")
        .description("Replies with server info!")
        .dm_permission(false)
        .to_owned()
}

fn create_botstatus_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("botstatus")
        .description("Gets information about the bot")
        .to_owned()
}

fn create_embed_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("embed")
        .description("Sends an embed")
        .dm_permission(false)
        .create_option(|option| {
            option
                .name("title")
                .description("The title of the embed")
                .kind(CommandOptionType::String)
                .required(true)
                .max_length(EMBED_TITLE_LIMIT)
        })
        .create_option(|option| {
            option
                .name("description")
                .description("The description of the embed")
                .kind(CommandOptionType::String)
                .required(true)
                .max_length(EMBED_DESCRIPTION_LIMIT)
        })
        .create_option(|option| {
            option
                .name("image")
                .description("Image URL shown in the embed")
                .kind(CommandOptionType::String)
                .required(false)
        })
        .to_owned()
}
