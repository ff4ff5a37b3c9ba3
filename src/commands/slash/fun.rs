//! Fun slash commands: /roll, /raffle, /kittysay, /bottomify, /topify

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Longest text the kitty will say
pub const MAX_KITTY_INPUT: u16 = 1000;
/// Bottom grows each character into several emoji, so its input is kept short
pub const MAX_BOTTOMIFY_INPUT: u16 = 500;

/// Creates fun commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_roll_command(),
        create_raffle_command(),
        create_kittysay_command(),
        create_text_command(
            "bottomify",
            "Translate your words for the bottoms to understand",
            Some(MAX_BOTTOMIFY_INPUT),
        ),
        create_text_command(
            "topify",
            "Translate your words for the tops and normies to understand",
            None,
        ),
    ]
}

fn create_roll_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("roll")
        .description("Rolls dice based on given # of sides")
        .create_option(|option| {
            option
                .name("sides")
                .description("# of sides")
                .kind(CommandOptionType::Integer)
                .required(false)
                .min_int_value(1)
        })
        .to_owned()
}

fn create_raffle_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("raffle")
        .description("Select a random person to win a raffle")
        .dm_permission(false)
        .to_owned()
}

fn create_kittysay_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("kittysay")
        .description("Make the kitty say something :3")
        .dm_permission(false)
        .create_option(|option| {
            option
                .name("input")
                .description("say")
                .kind(CommandOptionType::String)
                .required(true)
                .max_length(MAX_KITTY_INPUT)
        })
        .create_option(|option| {
            option
                .name("think")
                .description("think")
                .kind(CommandOptionType::Boolean)
                .required(false)
        })
        .to_owned()
}

// bottomify and topify share a single text input
fn create_text_command(
    name: &str,
    description: &str,
    max_length: Option<u16>,
) -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name(name)
        .description(description)
        .dm_permission(false)
        .create_option(|option| {
            option
                .name("input")
                .description("text")
                .kind(CommandOptionType::String)
                .required(true);
            if let Some(max) = max_length {
                option.max_length(max);
            }
            option
        })
        .to_owned()
}
