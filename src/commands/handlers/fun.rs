//! Fun command handlers
//!
//! Handles: roll, raffle, kittysay, bottomify, topify

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::BotContext;
use crate::commands::handler::CommandHandler;
use crate::commands::reply::{follow_up, reply};
use crate::commands::slash::{get_bool_option, get_integer_option, get_string_option};
use crate::features::fun::{
    bottomify, code_block_messages, draw_winner, kitty_say, roll_die, topify, RaffleEntrant,
    DEFAULT_SIDES,
};

const UNDECODABLE: &str = "I couldn't decode that message.";
const NO_RAFFLE_ENTRANTS: &str = "Nobody else is online to win the raffle.";
const NOT_CACHED: &str = "This server is not cached yet, try again soon.";

/// Handler for fun commands: roll, raffle, kittysay, bottomify, topify
pub struct FunHandler;

#[async_trait]
impl CommandHandler for FunHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["roll", "raffle", "kittysay", "bottomify", "topify"]
    }

    async fn handle(
        &self,
        _ctx: Arc<BotContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let options = &command.data.options;
        match command.data.name.as_str() {
            "roll" => {
                let sides = roll_sides(get_integer_option(options, "sides"));
                let roll = roll_die(sides, &mut rand::rng());
                reply(serenity_ctx, command, format!("You rolled a **{roll}**"), false).await
            }
            "raffle" => self.handle_raffle(serenity_ctx, command).await,
            "kittysay" => {
                let input = get_string_option(options, "input").unwrap_or_default();
                let think = get_bool_option(options, "think").unwrap_or(false);
                reply(serenity_ctx, command, kitty_say(&input, think), false).await
            }
            "bottomify" => {
                let input = get_string_option(options, "input").unwrap_or_default();
                reply_in_code_blocks(serenity_ctx, command, &bottomify(&input)).await
            }
            "topify" => {
                let input = get_string_option(options, "input").unwrap_or_default();
                match topify(&input) {
                    Some(decoded) => reply_in_code_blocks(serenity_ctx, command, &decoded).await,
                    None => reply(serenity_ctx, command, UNDECODABLE, false).await,
                }
            }
            _ => Ok(()),
        }
    }
}

impl FunHandler {
    /// Handle /raffle: pick an online or idle human other than the invoker
    async fn handle_raffle(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let entrants = command.guild_id.and_then(|guild_id| {
            serenity_ctx.cache.guild_field(guild_id, |guild| {
                guild
                    .members
                    .values()
                    .map(|member| RaffleEntrant {
                        id: member.user.id.0,
                        bot: member.user.bot,
                        status: guild.presences.get(&member.user.id).map(|p| p.status),
                    })
                    .collect::<Vec<_>>()
            })
        });
        let Some(entrants) = entrants else {
            return reply(serenity_ctx, command, NOT_CACHED, true).await;
        };

        let winner = draw_winner(&entrants, command.user.id.0, &mut rand::rng());
        debug!(
            "Raffle in {} drew from {} cached members",
            command.channel_id,
            entrants.len()
        );
        match winner {
            Some(id) => {
                reply(serenity_ctx, command, format!("<@{id}> has won the raffle"), false).await
            }
            None => reply(serenity_ctx, command, NO_RAFFLE_ENTRANTS, true).await,
        }
    }
}

/// Reply with `text` fenced, continuing in follow-ups when it outgrows one message
async fn reply_in_code_blocks(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    text: &str,
) -> Result<()> {
    let mut messages = code_block_messages(text).into_iter();
    let Some(first) = messages.next() else {
        return reply(serenity_ctx, command, UNDECODABLE, false).await;
    };
    reply(serenity_ctx, command, first, false).await?;
    for message in messages {
        follow_up(serenity_ctx, command, message).await?;
    }
    Ok(())
}

/// Sides for /roll; Discord enforces the minimum, the default covers a missing option
fn roll_sides(option: Option<i64>) -> u32 {
    option
        .and_then(|sides| u32::try_from(sides).ok())
        .filter(|sides| *sides > 0)
        .unwrap_or(DEFAULT_SIDES)
}
