//! User command handlers
//!
//! Handles: whois, avatar, and the "User Info" and "avatar" user context menus
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, ResolvedTarget,
};
use serenity::model::guild::Member;
use serenity::model::user::User;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::BotContext;
use crate::commands::handler::{CommandHandler, CommandKind};
use crate::commands::reply::{reply, reply_embed};
use crate::commands::slash::get_user_option;
use crate::core::{user_info_embed, MemberProfile, Signature, UserProfile};

/// Handler for user slash commands: whois, avatar
pub struct UserHandler;

#[async_trait]
impl CommandHandler for UserHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["whois", "avatar"]
    }

    async fn handle(
        &self,
        _ctx: Arc<BotContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "whois" => {
                let user = get_user_option(&command.data.options, "user")
                    .unwrap_or_else(|| command.user.clone());
                let bot = serenity_ctx.cache.current_user();
                let footer = Signature::new(bot.tag(), bot.face());
                let author = signature_of(&command.user);
                show_user_info(serenity_ctx, command, &user, &author, &footer).await
            }
            "avatar" => {
                let user = get_user_option(&command.data.options, "target")
                    .unwrap_or_else(|| command.user.clone());
                reply(serenity_ctx, command, user.face(), false).await
            }
            _ => Ok(()),
        }
    }
}

/// Handler for user context menu entries: "User Info", "avatar"
pub struct UserContextHandler;

#[async_trait]
impl CommandHandler for UserContextHandler {
    fn kind(&self) -> CommandKind {
        CommandKind::User
    }

    fn command_names(&self) -> &'static [&'static str] {
        &["User Info", "avatar"]
    }

    async fn handle(
        &self,
        _ctx: Arc<BotContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let Some(ResolvedTarget::User(user, _)) = command.data.target() else {
            return reply(serenity_ctx, command, "Could not find that user.", true).await;
        };

        match command.data.name.as_str() {
            "User Info" => {
                let signature = signature_of(&user);
                show_user_info(serenity_ctx, command, &user, &signature, &signature).await
            }
            "avatar" => reply(serenity_ctx, command, user.face(), false).await,
            _ => Ok(()),
        }
    }
}

async fn show_user_info(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    user: &User,
    author: &Signature,
    footer: &Signature,
) -> Result<()> {
    // A user outside the guild still gets an embed, without member fields
    let member = match command.guild_id {
        Some(guild_id) => guild_id.member(serenity_ctx, user.id).await.ok(),
        None => None,
    };
    let member_profile = member.as_ref().map(member_profile);

    let embed = user_info_embed(&user_profile(user), member_profile.as_ref(), author, footer);
    reply_embed(serenity_ctx, command, embed, None).await
}

fn signature_of(user: &User) -> Signature {
    Signature::new(user.tag(), user.face())
}

fn user_profile(user: &User) -> UserProfile {
    UserProfile {
        id: user.id.0,
        tag: user.tag(),
        avatar_url: user.face(),
        created_at: user.id.created_at().unix_timestamp(),
        bot: user.bot,
    }
}

fn member_profile(member: &Member) -> MemberProfile {
    MemberProfile {
        joined_at: member.joined_at.map(|t| t.unix_timestamp()),
        role_ids: member.roles.iter().map(|role| role.0).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_handler_commands() {
        let handler = UserHandler;
        assert_eq!(handler.kind(), CommandKind::ChatInput);
        assert_eq!(handler.command_names(), &["whois", "avatar"]);
    }

    #[test]
    fn test_user_context_handler_commands() {
        let handler = UserContextHandler;
        assert_eq!(handler.kind(), CommandKind::User);
        assert!(handler.command_names().contains(&"User Info"));
        assert!(handler.command_names().contains(&"avatar"));
    }
}
