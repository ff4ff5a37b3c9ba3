//! Help command handlers
//!
//! Handles: help, ping, invite
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::{format_latency, shard_latency, BotContext};
use crate::commands::handler::CommandHandler;
use crate::commands::reply::{defer, edit_reply, reply, reply_embed};
use crate::core::{invite_url, snowflake_millis};
use crate::features::help::{help_buttons, help_embed, HelpPage};

/// Handler for help commands: help, ping, invite
pub struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["help", "ping", "invite"]
    }

    async fn handle(
        &self,
        _ctx: Arc<BotContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "help" => self.handle_help(serenity_ctx, command).await,
            "ping" => self.handle_ping(serenity_ctx, command).await,
            "invite" => self.handle_invite(serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl HelpHandler {
    /// Handle /help command
    async fn handle_help(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let thumbnail = serenity_ctx.cache.current_user().face();
        reply_embed(
            serenity_ctx,
            command,
            help_embed(HelpPage::Overview, Some(&thumbnail)),
            Some(help_buttons()),
        )
        .await
    }

    /// Handle /ping command
    async fn handle_ping(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        defer(serenity_ctx, command, false).await?;

        let response = command
            .get_interaction_response(&serenity_ctx.http)
            .await?;
        let message_latency =
            snowflake_millis(response.id.0).saturating_sub(snowflake_millis(command.id.0));
        let api_latency = format_latency(shard_latency(serenity_ctx).await);

        edit_reply(
            serenity_ctx,
            command,
            format!("API Latency is {api_latency}\nMessage Latency is {message_latency}ms"),
        )
        .await?;

        info!("Ping command completed for user {}", command.user.id);
        Ok(())
    }

    /// Handle /invite command
    async fn handle_invite(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        reply(serenity_ctx, command, invite_url(command.application_id.0), false).await
    }
}
