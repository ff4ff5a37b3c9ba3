//! Moderation slash commands: /ban, /kick, /timeout, /untimeout, /unban, /purge

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;
use serenity::model::permissions::Permissions;

/// Timeout durations offered by /timeout, as (label, seconds)
///
/// Discord caps timeouts at 28 days.
pub const TIMEOUT_CHOICES: &[(&str, &str)] = &[
    ("60 seconds", "60"),
    ("5 minutes", "300"),
    ("10 minutes", "600"),
    ("30 minutes", "1800"),
    ("1 hour", "3600"),
    ("12 hours", "43200"),
    ("1 day", "86400"),
    ("1 week", "604800"),
    ("28 days", "2419200"),
];

/// Longest timeout Discord accepts, in seconds
pub const MAX_TIMEOUT_SECS: u64 = 2_419_200;

/// Upper bound of /purge's amount option (Discord's bulk delete limit)
pub const MAX_PURGE_AMOUNT: u64 = 100;

/// Creates moderation commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_ban_command(),
        create_kick_command(),
        create_timeout_command(),
        create_untimeout_command(),
        create_unban_command(),
        create_purge_command(),
    ]
}

/// Base builder shared by the moderation commands: guild only, gated by `permission`
fn moderation_command(
    name: &str,
    description: &str,
    permission: Permissions,
) -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name(name)
        .description(description)
        .default_member_permissions(permission)
        .dm_permission(false)
        .to_owned()
}

fn add_target_option(command: &mut CreateApplicationCommand, description: &str) {
    command.create_option(|option| {
        option
            .name("target")
            .description(description)
            .kind(CommandOptionType::User)
            .required(true)
    });
}

fn add_reason_option(command: &mut CreateApplicationCommand, description: &str) {
    command.create_option(|option| {
        option
            .name("reason")
            .description(description)
            .kind(CommandOptionType::String)
            .required(false)
    });
}

fn create_ban_command() -> CreateApplicationCommand {
    let mut command = moderation_command("ban", "Bans a user", Permissions::BAN_MEMBERS);
    add_target_option(&mut command, "The user to ban");
    add_reason_option(&mut command, "The reason for the ban");
    command
}

fn create_kick_command() -> CreateApplicationCommand {
    let mut command = moderation_command("kick", "Kicks a user", Permissions::KICK_MEMBERS);
    add_target_option(&mut command, "The user to kick");
    add_reason_option(&mut command, "The reason for the kick");
    command
}

fn create_timeout_command() -> CreateApplicationCommand {
    let mut command =
        moderation_command("timeout", "Times out a user", Permissions::MODERATE_MEMBERS);
    add_target_option(&mut command, "The user to time out");
    command.create_option(|option| {
        option
            .name("time")
            .description("The duration to time the user out")
            .kind(CommandOptionType::String)
            .required(true);
        for (label, seconds) in TIMEOUT_CHOICES {
            option.add_string_choice(label, seconds);
        }
        option
    });
    add_reason_option(&mut command, "The reason for the timeout");
    command
}

fn create_untimeout_command() -> CreateApplicationCommand {
    let mut command = moderation_command(
        "untimeout",
        "Removes a user's timeout",
        Permissions::MODERATE_MEMBERS,
    );
    add_target_option(&mut command, "The user to untimeout");
    command
}

fn create_unban_command() -> CreateApplicationCommand {
    let mut command = moderation_command("unban", "Unbans a user", Permissions::BAN_MEMBERS);
    add_target_option(&mut command, "The user to unban");
    command
}

fn create_purge_command() -> CreateApplicationCommand {
    moderation_command("purge", "Deletes messages.", Permissions::MANAGE_MESSAGES)
        .create_option(|option| {
            option
                .name("amount")
                .description("The amount of messages to delete.")
                .kind(CommandOptionType::Integer)
                .required(true)
                .min_int_value(1)
                .max_int_value(MAX_PURGE_AMOUNT)
        })
        .to_owned()
}
