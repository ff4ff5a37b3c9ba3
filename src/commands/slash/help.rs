//! Help slash commands: /help, /ping, /invite

use serenity::builder::CreateApplicationCommand;

/// Creates help and resource commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_help_command(),
        create_ping_command(),
        create_invite_command(),
    ]
}

fn create_help_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("help")
        .description("Replies with Help!")
        .to_owned()
}

fn create_ping_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ping")
        .description("Replies with Pong!")
        .to_owned()
}

fn create_invite_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("invite")
        .description("Replies with the bot's invite link!")
        .to_owned()
}
