//! Tool command handlers
//!
//! Handles: serverinfo, botstatus, embed

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::{CreateComponents, CreateEmbed};
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::guild::{Guild, VerificationLevel};
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::{format_latency, shard_latency, BotContext};
use crate::commands::handler::CommandHandler;
use crate::commands::reply::{reply, reply_embed};
use crate::commands::slash::get_string_option;
use crate::core::embeds::role_mentions;
use crate::core::{brand_embed, format_uptime, invite_url, relative_timestamp, sign, Signature};

/// Handler for tool commands: serverinfo, botstatus, embed
pub struct ToolsHandler;

#[async_trait]
impl CommandHandler for ToolsHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["serverinfo", "botstatus", "embed"]
    }

    async fn handle(
        &self,
        ctx: Arc<BotContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "serverinfo" => self.handle_serverinfo(serenity_ctx, command).await,
            "botstatus" => self.handle_botstatus(&ctx, serenity_ctx, command).await,
            "embed" => self.handle_embed(serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl ToolsHandler {
    /// Handle /serverinfo command
    async fn handle_serverinfo(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let Some(guild) = command
            .guild_id
            .and_then(|id| id.to_guild_cached(&serenity_ctx.cache))
        else {
            return reply(
                serenity_ctx,
                command,
                "Server information is unavailable right now.",
                true,
            )
            .await;
        };

        let invoker = Signature::new(command.user.tag(), command.user.face());
        reply_embed(serenity_ctx, command, server_embed(&guild, &invoker), None).await
    }

    /// Handle /botstatus command
    async fn handle_botstatus(
        &self,
        ctx: &BotContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let bot = serenity_ctx.cache.current_user();
        let latency = format_latency(shard_latency(serenity_ctx).await);

        // Joined date and roles only exist inside a guild
        let member = match command.guild_id {
            Some(guild_id) => guild_id.member(serenity_ctx, bot.id).await.ok(),
            None => None,
        };
        let joined = member
            .as_ref()
            .and_then(|m| m.joined_at)
            .map(|t| relative_timestamp(t.unix_timestamp()))
            .unwrap_or_else(|| "Not in a server".to_string());
        let roles = member
            .as_ref()
            .map(|m| role_mentions(&m.roles.iter().map(|r| r.0).collect::<Vec<_>>()))
            .unwrap_or_else(|| "None".to_string());

        let mut embed = brand_embed();
        embed
            .title(bot.tag())
            .thumbnail(bot.face())
            .field(
                "Created At",
                relative_timestamp(bot.id.created_at().unix_timestamp()),
                true,
            )
            .field("Joined At", joined, true)
            .field("Latency", latency, true)
            .field("Servers", serenity_ctx.cache.guild_count().to_string(), true)
            .field("Uptime", format_uptime(ctx.uptime()), false)
            .field("Roles", roles, false);
        let invoker = Signature::new(command.user.tag(), command.user.face());
        let signature = Signature::new(bot.tag(), bot.face());
        sign(&mut embed, &invoker, &signature);

        let buttons = status_buttons(
            &invite_url(command.application_id.0),
            &ctx.config.source_url,
        );
        reply_embed(serenity_ctx, command, embed, Some(buttons)).await
    }

    /// Handle /embed command
    async fn handle_embed(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let options = &command.data.options;
        let title = get_string_option(options, "title").unwrap_or_default();
        let description = get_string_option(options, "description").unwrap_or_default();
        let image = get_string_option(options, "image").filter(|url| !url.trim().is_empty());

        let guild_icon = command
            .guild_id
            .and_then(|id| id.to_guild_cached(&serenity_ctx.cache))
            .and_then(|guild| guild.icon_url());
        let bot = serenity_ctx.cache.current_user();

        let embed = custom_embed(
            &title,
            &description,
            image.as_deref(),
            guild_icon.as_deref(),
            &Signature::new(command.user.tag(), command.user.face()),
            &Signature::new(bot.tag(), bot.face()),
        );
        reply_embed(serenity_ctx, command, embed, None).await
    }
}

fn verification_label(level: VerificationLevel) -> &'static str {
    match level {
        VerificationLevel::None => "None",
        VerificationLevel::Low => "Low",
        VerificationLevel::Medium => "Medium",
        VerificationLevel::High => "High",
        VerificationLevel::Higher => "Very High",
        _ => "Unknown",
    }
}

fn server_embed(guild: &Guild, invoker: &Signature) -> CreateEmbed {
    let mut embed = brand_embed();
    embed
        .title(&guild.name)
        .field("Name", &guild.name, true)
        .field("ID", guild.id.0.to_string(), true)
        .field("Owner", format!("<@{}>", guild.owner_id.0), true)
        .field(
            "Created At",
            relative_timestamp(guild.id.created_at().unix_timestamp()),
            true,
        )
        .field("Members", guild.member_count.to_string(), true)
        .field(
            "Verification Level",
            verification_label(guild.verification_level),
            true,
        )
        .field("Roles", guild.roles.len().to_string(), true)
        .field("Emojis", guild.emojis.len().to_string(), true)
        .field("Boosts", guild.premium_subscription_count.to_string(), true);
    if let Some(icon) = guild.icon_url() {
        embed.thumbnail(icon);
    }
    sign(&mut embed, invoker, invoker);
    embed
}

/// User-authored embed for /embed
fn custom_embed(
    title: &str,
    description: &str,
    image_url: Option<&str>,
    thumbnail_url: Option<&str>,
    author: &Signature,
    footer: &Signature,
) -> CreateEmbed {
    let mut embed = brand_embed();
    embed.title(title).description(description);
    if let Some(url) = image_url {
        embed.image(url);
    }
    if let Some(url) = thumbnail_url {
        embed.thumbnail(url);
    }
    sign(&mut embed, author, footer);
    embed
}

/// "Invite" and "Code" link buttons shown under /botstatus
fn status_buttons(invite: &str, source: &str) -> CreateComponents {
    CreateComponents::default()
        .create_action_row(|row| {
            row.create_button(|button| {
                button.style(ButtonStyle::Link).label("Invite").url(invite)
            })
            .create_button(|button| button.style(ButtonStyle::Link).label("Code").url(source))
        })
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_tools_handler_commands() {
        let handler = ToolsHandler;
        let names = handler.command_names();
        assert_eq!(names, &["serverinfo", "botstatus", "embed"]);
    }

    #[test]
    fn test_verification_label() {
        assert_eq!(verification_label(VerificationLevel::None), "None");
        assert_eq!(verification_label(VerificationLevel::Medium), "Medium");
        assert_eq!(verification_label(VerificationLevel::Higher), "Very High");
    }

    #[test]
    fn test_custom_embed() {
        let author = Signature::new("shark#0001", "https://cdn.example.com/a.png");
        let footer = Signature::new("blahaj#0000", "https://cdn.example.com/b.png");
        let embed = custom_embed(
            "Rules",
            "Be nice",
            Some("https://cdn.example.com/rules.png"),
            None,
            &author,
            &footer,
        );

        assert_eq!(embed.0.get("title").and_then(Value::as_str), Some("Rules"));
        assert_eq!(embed.0.get("description").and_then(Value::as_str), Some("Be nice"));
        assert!(embed.0.get("image").is_some());
        assert!(embed.0.get("thumbnail").is_none());
        assert!(embed.0.get("timestamp").is_some());
        assert_eq!(
            embed.0.get("footer").and_then(|f| f.get("text")).and_then(Value::as_str),
            Some("blahaj#0000")
        );
    }

    #[test]
    fn test_custom_embed_without_image() {
        let signature = Signature::new("x", "https://cdn.example.com/x.png");
        let embed = custom_embed("t", "d", None, Some("https://cdn.example.com/g.png"), &signature, &signature);
        assert!(embed.0.get("image").is_none());
        assert!(embed.0.get("thumbnail").is_some());
    }

    #[test]
    fn test_status_buttons_link_out() {
        let invite = "https://discord.com/oauth2/authorize?client_id=1";
        let source = "https://github.com/blahaj/blahaj";
        let components = status_buttons(invite, source);
        assert_eq!(components.0.len(), 1);

        let buttons = components.0[0]
            .get("components")
            .and_then(Value::as_array)
            .unwrap();
        let rendered: Vec<(u64, &str, &str)> = buttons
            .iter()
            .map(|b| {
                (
                    b.get("style").and_then(Value::as_u64).unwrap(),
                    b.get("label").and_then(Value::as_str).unwrap(),
                    b.get("url").and_then(Value::as_str).unwrap(),
                )
            })
            .collect();
        let link = ButtonStyle::Link as u64;
        assert_eq!(rendered, vec![(link, "Invite", invite), (link, "Code", source)]);
        assert!(buttons.iter().all(|b| b.get("custom_id").is_none()));
    }
}
