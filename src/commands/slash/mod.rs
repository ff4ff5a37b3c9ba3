//! # Application Command Definitions
//!
//! Registration payloads for slash commands and context menus, grouped the
//! same way as their handlers.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod fun;
pub mod help;
pub mod moderation;
pub mod tools;
pub mod user;

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::Command;
use serenity::model::application::interaction::application_command::{
    CommandDataOption, CommandDataOptionValue,
};
use serenity::model::id::GuildId;
use serenity::model::user::User;
use serenity::prelude::Context;

use super::handler::CommandKind;

/// Creates all slash command definitions
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    let mut commands = Vec::new();

    // Help & resources
    commands.extend(help::create_commands());

    // Moderation
    commands.extend(moderation::create_commands());

    // Tools
    commands.extend(tools::create_commands());

    // Fun
    commands.extend(fun::create_commands());

    // User lookups
    commands.extend(user::create_commands());

    commands
}

/// Creates all context menu commands
pub fn create_context_menu_commands() -> Vec<CreateApplicationCommand> {
    user::create_context_menu_commands()
}

/// Creates every definition registered with Discord
pub fn create_all_commands() -> Vec<CreateApplicationCommand> {
    let mut commands = create_slash_commands();
    commands.extend(create_context_menu_commands());
    commands
}

/// Kind and name of a definition, read back from its payload
pub fn definition_key(command: &CreateApplicationCommand) -> Option<(CommandKind, String)> {
    let name = command.0.get("name")?.as_str()?.to_string();
    let kind = match command.0.get("type").and_then(|v| v.as_u64()) {
        None | Some(1) => CommandKind::ChatInput,
        Some(2) => CommandKind::User,
        Some(3) => CommandKind::Message,
        Some(_) => return None,
    };
    Some((kind, name))
}

/// Registers all commands globally
pub async fn register_global_commands(ctx: &Context) -> Result<()> {
    let commands = create_all_commands();
    let count = commands.len();

    Command::set_global_application_commands(&ctx.http, |builder| {
        for command in commands {
            builder.add_application_command(command);
        }
        builder
    })
    .await?;

    info!("Global application commands registered successfully ({count} commands)");
    Ok(())
}

/// Registers all commands for a specific guild (faster for testing)
pub async fn register_guild_commands(ctx: &Context, guild_id: GuildId) -> Result<()> {
    let commands = create_all_commands();
    let count = commands.len();

    guild_id
        .set_application_commands(&ctx.http, |builder| {
            for command in commands {
                builder.add_application_command(command);
            }
            builder
        })
        .await?;

    info!("Guild application commands registered for guild {guild_id} ({count} commands)");
    Ok(())
}

/// Utility function to get string option from slash command
pub fn get_string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

/// Utility function to get integer option from slash command
pub fn get_integer_option(options: &[CommandDataOption], name: &str) -> Option<i64> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_i64())
}

/// Utility function to get boolean option from slash command
pub fn get_bool_option(options: &[CommandDataOption], name: &str) -> Option<bool> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_bool())
}

/// Utility function to get a resolved user option from slash command
pub fn get_user_option(options: &[CommandDataOption], name: &str) -> Option<User> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| match &opt.resolved {
            Some(CommandDataOptionValue::User(user, _)) => Some(user.clone()),
            _ => None,
        })
}
