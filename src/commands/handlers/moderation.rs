//! Moderation command handlers
//!
//! Handles: ban, kick, timeout, untimeout, unban, purge
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{error, info, warn};
use serenity::http::StatusCode;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::guild::{Member, Role};
use serenity::model::id::{GuildId, MessageId, RoleId, UserId};
use serenity::model::permissions::Permissions;
use serenity::model::user::User;
use serenity::model::Timestamp;
use serenity::prelude::{Context, SerenityError};
use std::collections::HashMap;
use std::sync::Arc;

use crate::commands::context::BotContext;
use crate::commands::handler::CommandHandler;
use crate::commands::reply::{defer, edit_reply, reply};
use crate::commands::slash::moderation::{MAX_PURGE_AMOUNT, MAX_TIMEOUT_SECS};
use crate::commands::slash::{get_integer_option, get_string_option, get_user_option};
use crate::core::snowflake_millis;
use crate::features::moderation::{
    grants, top_role_position, ModerationAction, ModerationCheck,
};

const DEFAULT_REASON: &str = "No reason provided";
/// Days of message history removed along with a ban
const BAN_DELETE_MESSAGE_DAYS: u8 = 7;
/// Discord refuses to bulk delete messages older than two weeks
const BULK_DELETE_MAX_AGE_MS: u64 = 14 * 24 * 60 * 60 * 1000;

/// Handler for moderation commands: ban, kick, timeout, untimeout, unban, purge
pub struct ModerationHandler;

#[async_trait]
impl CommandHandler for ModerationHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ban", "kick", "timeout", "untimeout", "unban", "purge"]
    }

    async fn handle(
        &self,
        _ctx: Arc<BotContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let Some(guild_id) = command.guild_id else {
            return reply(
                serenity_ctx,
                command,
                "This command can only be used in a server",
                true,
            )
            .await;
        };

        let action = match command.data.name.as_str() {
            "ban" => ModerationAction::Ban,
            "kick" => ModerationAction::Kick,
            "timeout" => ModerationAction::Timeout,
            "untimeout" => ModerationAction::Untimeout,
            "unban" => ModerationAction::Unban,
            "purge" => return self.handle_purge(serenity_ctx, command).await,
            _ => return Ok(()),
        };

        self.handle_action(serenity_ctx, command, guild_id, action)
            .await
    }
}

impl ModerationHandler {
    /// Run the shared checks for a member action, then apply it
    async fn handle_action(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: GuildId,
        action: ModerationAction,
    ) -> Result<()> {
        let options = &command.data.options;
        let Some(target) = get_user_option(options, "target") else {
            return reply(serenity_ctx, command, "Please choose a user", true).await;
        };
        let reason = get_string_option(options, "reason")
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REASON.to_string());

        let (check, target_member) =
            gather_check(serenity_ctx, command, guild_id, &target, action).await?;

        if let Err(denial) = check.evaluate(action, &target.tag()) {
            info!(
                "Refused {} of {} by {}: {denial}",
                action.verb(),
                target.id,
                command.user.id
            );
            return reply(serenity_ctx, command, denial, true).await;
        }

        match (action, target_member) {
            (ModerationAction::Ban, _) => {
                self.ban(serenity_ctx, command, guild_id, &target, &reason)
                    .await
            }
            (ModerationAction::Kick, _) => {
                self.kick(serenity_ctx, command, guild_id, &target, &reason)
                    .await
            }
            (ModerationAction::Timeout, _) => {
                self.timeout(serenity_ctx, command, guild_id, &target, &reason)
                    .await
            }
            (ModerationAction::Untimeout, member) => {
                self.untimeout(serenity_ctx, command, guild_id, &target, member.as_ref())
                    .await
            }
            (ModerationAction::Unban, _) => {
                self.unban(serenity_ctx, command, guild_id, &target).await
            }
        }
    }

    async fn ban(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: GuildId,
        target: &User,
        reason: &str,
    ) -> Result<()> {
        let guild_name = guild_display_name(serenity_ctx, guild_id);
        notify_target(
            serenity_ctx,
            target,
            format!("You have been banned from {guild_name} for {reason}"),
        )
        .await;

        guild_id
            .ban_with_reason(&serenity_ctx.http, target.id, BAN_DELETE_MESSAGE_DAYS, reason)
            .await?;

        info!("{} banned {} in {guild_id}", command.user.id, target.id);
        reply(
            serenity_ctx,
            command,
            format!("Banned {} for {reason}", target.tag()),
            true,
        )
        .await
    }

    async fn kick(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: GuildId,
        target: &User,
        reason: &str,
    ) -> Result<()> {
        let guild_name = guild_display_name(serenity_ctx, guild_id);
        notify_target(
            serenity_ctx,
            target,
            format!("You have been kicked from {guild_name} for {reason}"),
        )
        .await;

        guild_id
            .kick_with_reason(&serenity_ctx.http, target.id, reason)
            .await?;

        info!("{} kicked {} in {guild_id}", command.user.id, target.id);
        reply(
            serenity_ctx,
            command,
            format!("Kicked {} for {reason}", target.tag()),
            true,
        )
        .await
    }

    async fn timeout(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: GuildId,
        target: &User,
        reason: &str,
    ) -> Result<()> {
        let Some(seconds) =
            get_string_option(&command.data.options, "time").and_then(|t| parse_timeout_secs(&t))
        else {
            return reply(serenity_ctx, command, "Please choose a valid duration", true).await;
        };

        let until = Timestamp::from_unix_timestamp(Timestamp::now().unix_timestamp() + seconds as i64)
            .map_err(|_| anyhow!("timeout end is out of range ({seconds}s)"))?;

        guild_id
            .edit_member(&serenity_ctx.http, target.id, |member| {
                member.disable_communication_until_datetime(until)
            })
            .await?;

        info!(
            "{} timed out {} in {guild_id} for {seconds}s",
            command.user.id, target.id
        );
        reply(
            serenity_ctx,
            command,
            format!("Timed out {} for {seconds} seconds for {reason}", target.tag()),
            true,
        )
        .await
    }

    async fn untimeout(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: GuildId,
        target: &User,
        member: Option<&Member>,
    ) -> Result<()> {
        let until = member.and_then(|m| m.communication_disabled_until);
        if !is_timed_out(until, Timestamp::now().unix_timestamp()) {
            return reply(
                serenity_ctx,
                command,
                format!("User {} is not timed out", target.tag()),
                true,
            )
            .await;
        }

        guild_id
            .edit_member(&serenity_ctx.http, target.id, |member| {
                member.enable_communication()
            })
            .await?;

        info!("{} removed timeout of {} in {guild_id}", command.user.id, target.id);
        reply(
            serenity_ctx,
            command,
            format!("Untimed out {}", target.tag()),
            true,
        )
        .await
    }

    async fn unban(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: GuildId,
        target: &User,
    ) -> Result<()> {
        let bans = guild_id.bans(&serenity_ctx.http).await?;
        if bans.is_empty() {
            return reply(
                serenity_ctx,
                command,
                "There are no banned users in this server",
                true,
            )
            .await;
        }
        if !bans.iter().any(|ban| ban.user.id == target.id) {
            return reply(serenity_ctx, command, "This user is not banned", true).await;
        }

        if let Err(e) = guild_id.unban(&serenity_ctx.http, target.id).await {
            error!("Failed to unban {} in {guild_id}: {e}", target.id);
            return reply(
                serenity_ctx,
                command,
                "There was an error unbanning this user",
                true,
            )
            .await;
        }

        info!("{} unbanned {} in {guild_id}", command.user.id, target.id);
        reply(
            serenity_ctx,
            command,
            format!("Unbanned {}", target.tag()),
            true,
        )
        .await
    }

    /// Handle /purge command
    async fn handle_purge(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        if !grants(actor_permissions(command), Permissions::MANAGE_MESSAGES) {
            return reply(
                serenity_ctx,
                command,
                "You do not have permission to purge messages",
                true,
            )
            .await;
        }

        let Some(amount) = get_integer_option(&command.data.options, "amount")
            .and_then(|a| u64::try_from(a).ok())
            .filter(|a| (1..=MAX_PURGE_AMOUNT).contains(a))
        else {
            return reply(
                serenity_ctx,
                command,
                format!("Please choose between 1 and {MAX_PURGE_AMOUNT} messages"),
                true,
            )
            .await;
        };

        defer(serenity_ctx, command, true).await?;

        let messages = command
            .channel_id
            .messages(&serenity_ctx.http, |request| request.limit(amount))
            .await?;
        let now_ms = u64::try_from(Timestamp::now().unix_timestamp()).unwrap_or(0) * 1000;
        let ids: Vec<MessageId> = messages
            .iter()
            .map(|message| message.id)
            .filter(|id| is_bulk_deletable(id.0, now_ms))
            .collect();

        if !ids.is_empty() {
            if let Err(e) = command
                .channel_id
                .delete_messages(&serenity_ctx.http, ids.iter().copied())
                .await
            {
                error!("Failed to purge messages in {}: {e}", command.channel_id);
                return edit_reply(
                    serenity_ctx,
                    command,
                    "There was an error trying to purge messages in this channel!",
                )
                .await;
            }
        }

        info!(
            "{} purged {} messages in {}",
            command.user.id,
            ids.len(),
            command.channel_id
        );
        edit_reply(
            serenity_ctx,
            command,
            format!("Successfully deleted {} messages.", ids.len()),
        )
        .await
    }
}

/// Owner and role table of a guild, from cache when available
struct GuildRoles {
    guild_id: GuildId,
    owner_id: UserId,
    roles: HashMap<RoleId, Role>,
}

impl GuildRoles {
    async fn load(serenity_ctx: &Context, guild_id: GuildId) -> Result<Self> {
        if let Some(guild) = serenity_ctx.cache.guild(guild_id) {
            return Ok(Self {
                guild_id,
                owner_id: guild.owner_id,
                roles: guild.roles,
            });
        }
        let guild = guild_id.to_partial_guild(&serenity_ctx.http).await?;
        Ok(Self {
            guild_id,
            owner_id: guild.owner_id,
            roles: guild.roles,
        })
    }

    fn top_position(&self, role_ids: &[RoleId]) -> i64 {
        top_role_position(
            role_ids
                .iter()
                .filter_map(|id| self.roles.get(id))
                .map(|role| i64::from(role.position)),
        )
    }

    /// Guild-level permissions granted by @everyone plus the given roles
    fn permissions_of(&self, role_ids: &[RoleId]) -> Permissions {
        let everyone = self
            .roles
            .get(&RoleId(self.guild_id.0))
            .map(|role| role.permissions)
            .unwrap_or_else(Permissions::empty);
        role_ids
            .iter()
            .filter_map(|id| self.roles.get(id))
            .fold(everyone, |acc, role| acc | role.permissions)
    }
}

fn actor_permissions(command: &ApplicationCommandInteraction) -> Permissions {
    command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .unwrap_or_else(Permissions::empty)
}

/// Collect the facts `ModerationCheck::evaluate` needs
async fn gather_check(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    guild_id: GuildId,
    target: &User,
    action: ModerationAction,
) -> Result<(ModerationCheck, Option<Member>)> {
    let mut check = ModerationCheck {
        actor_permissions: actor_permissions(command),
        target_is_actor: target.id == command.user.id,
        ..ModerationCheck::default()
    };

    if !action.targets_member() || !grants(check.actor_permissions, action.required_permission()) {
        return Ok((check, None));
    }

    let member = match guild_id.member(serenity_ctx, target.id).await {
        Ok(member) => member,
        Err(e) if is_missing_member(&e) => return Ok((check, None)),
        Err(e) => return Err(e.into()),
    };
    check.target_is_member = true;

    let roles = GuildRoles::load(serenity_ctx, guild_id).await?;
    let bot_member = guild_id
        .member(serenity_ctx, serenity_ctx.cache.current_user_id())
        .await?;

    check.target_is_privileged = member.user.id == roles.owner_id
        || roles
            .permissions_of(&member.roles)
            .contains(Permissions::ADMINISTRATOR);
    check.actor_is_owner = command.user.id == roles.owner_id;
    check.actor_top_role = command
        .member
        .as_ref()
        .map(|actor| roles.top_position(&actor.roles))
        .unwrap_or(0);
    check.target_top_role = roles.top_position(&member.roles);
    check.bot_top_role = roles.top_position(&bot_member.roles);

    Ok((check, Some(member)))
}

/// Discord answers 404 for a user who is not in the guild
fn is_missing_member(error: &SerenityError) -> bool {
    match error {
        SerenityError::Http(http) => http.status_code() == Some(StatusCode::NOT_FOUND),
        _ => false,
    }
}

/// Whether a communication timeout ending at `until` is still running at `now`
fn is_timed_out(until: Option<Timestamp>, now: i64) -> bool {
    until.is_some_and(|until| until.unix_timestamp() > now)
}

fn guild_display_name(serenity_ctx: &Context, guild_id: GuildId) -> String {
    guild_id
        .name(&serenity_ctx.cache)
        .unwrap_or_else(|| "the server".to_string())
}

/// DM the target before acting; closed DMs do not block the action
async fn notify_target(serenity_ctx: &Context, target: &User, content: String) {
    if let Err(e) = target
        .direct_message(serenity_ctx, |message| message.content(content))
        .await
    {
        warn!("DMs are disabled for user {}: {e}", target.id);
    }
}

/// Parse the /timeout duration choice into seconds
fn parse_timeout_secs(raw: &str) -> Option<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| (1..=MAX_TIMEOUT_SECS).contains(secs))
}

/// Whether a message is young enough for bulk deletion
fn is_bulk_deletable(message_id: u64, now_ms: u64) -> bool {
    now_ms.saturating_sub(snowflake_millis(message_id)) < BULK_DELETE_MAX_AGE_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::slash::moderation::TIMEOUT_CHOICES;
    use crate::core::format::DISCORD_EPOCH_MS;
    use serde_json::json;
    use serenity::http::error::ErrorResponse;
    use serenity::http::HttpError;

    /// Snowflake whose timestamp is `unix_ms`
    fn snowflake_at(unix_ms: u64) -> u64 {
        (unix_ms - DISCORD_EPOCH_MS) << 22
    }

    #[test]
    fn test_moderation_handler_commands() {
        let handler = ModerationHandler;
        let names = handler.command_names();
        assert_eq!(names.len(), 6);
        for name in ["ban", "kick", "timeout", "untimeout", "unban", "purge"] {
            assert!(names.contains(&name));
        }
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("60"), Some(60));
        assert_eq!(parse_timeout_secs(" 300 "), Some(300));
        assert_eq!(parse_timeout_secs("0"), None);
        assert_eq!(parse_timeout_secs("-5"), None);
        assert_eq!(parse_timeout_secs("2629743"), None);
        assert_eq!(parse_timeout_secs("soon"), None);
    }

    #[test]
    fn test_every_timeout_choice_parses() {
        for (_, seconds) in TIMEOUT_CHOICES {
            assert!(parse_timeout_secs(seconds).is_some());
        }
    }

    #[test]
    fn test_is_bulk_deletable() {
        let now = 1_700_000_000_000;
        assert!(is_bulk_deletable(snowflake_at(now - 1_000), now));
        assert!(is_bulk_deletable(snowflake_at(now - BULK_DELETE_MAX_AGE_MS + 1), now));
        assert!(!is_bulk_deletable(snowflake_at(now - BULK_DELETE_MAX_AGE_MS), now));
        assert!(!is_bulk_deletable(snowflake_at(now - 30 * 24 * 60 * 60 * 1000), now));
    }

    fn http_error(status_code: StatusCode) -> SerenityError {
        let response = ErrorResponse {
            status_code,
            url: "https://discord.com/api/v10/guilds/1/members/2".parse().unwrap(),
            error: serde_json::from_value(json!({"code": 10007, "message": "Unknown Member"}))
                .unwrap(),
        };
        SerenityError::Http(Box::new(HttpError::UnsuccessfulRequest(response)))
    }

    #[test]
    fn test_only_not_found_means_missing_member() {
        assert!(is_missing_member(&http_error(StatusCode::NOT_FOUND)));
        assert!(!is_missing_member(&http_error(StatusCode::TOO_MANY_REQUESTS)));
        assert!(!is_missing_member(&http_error(StatusCode::INTERNAL_SERVER_ERROR)));
        assert!(!is_missing_member(&SerenityError::Other("gateway closed")));
    }

    #[test]
    fn test_is_timed_out() {
        let now = 1_700_000_000;
        let at = |secs| Timestamp::from_unix_timestamp(secs).unwrap();
        assert!(is_timed_out(Some(at(now + 60)), now));
        assert!(!is_timed_out(Some(at(now)), now));
        assert!(!is_timed_out(Some(at(now - 60)), now));
        assert!(!is_timed_out(None, now));
    }
}
