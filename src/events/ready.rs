//! Ready event: command registration and presence

use log::{error, info, warn};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::Context;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::commands::{register_global_commands, register_guild_commands, BotContext};

/// Claimed by the first ready event so reconnects skip re-registration
#[derive(Debug, Default)]
pub struct RegistrationGuard {
    claimed: AtomicBool,
}

impl RegistrationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// True for exactly one caller until `release` is called
    pub fn try_claim(&self) -> bool {
        !self.claimed.swap(true, Ordering::SeqCst)
    }

    /// Allow a later ready event to retry after a failed registration
    pub fn release(&self) {
        self.claimed.store(false, Ordering::SeqCst);
    }
}

pub(super) async fn on_ready(
    bot: &BotContext,
    guard: &RegistrationGuard,
    ctx: &Context,
    ready: &Ready,
) {
    info!("🎉 {} is connected and ready!", ready.user.tag());
    info!("📡 Connected to {} guilds", ready.guilds.len());
    info!("🤖 Bot ID: {}", ready.user.id);
    if let Some(shard) = ready.shard {
        info!("⚡ Shard: {}/{}", shard[0] + 1, shard[1]);
    }

    if guard.try_claim() {
        let registered = match bot.config.discord_guild_id.map(GuildId) {
            Some(guild_id) => {
                info!("🔧 Development mode: Registering commands for guild {guild_id}");
                register_guild_commands(ctx, guild_id).await
            }
            None => {
                info!("🌍 Production mode: Registering commands globally");
                register_global_commands(ctx).await
            }
        };
        if let Err(e) = registered {
            error!("❌ Failed to register application commands: {e}");
            guard.release();
        }
    } else {
        info!("Commands already registered, skipping");
    }

    match bot.presences.pick() {
        Some(presence) => {
            ctx.set_presence(Some(presence.activity()), presence.online_status())
                .await;
            info!("Presence set to {}", presence.text);
        }
        None => warn!("No presence options configured"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_claims_once() {
        let guard = RegistrationGuard::new();
        assert!(guard.try_claim());
        assert!(!guard.try_claim());
        assert!(!guard.try_claim());
    }

    #[test]
    fn test_guard_release_allows_retry() {
        let guard = RegistrationGuard::new();
        assert!(guard.try_claim());
        guard.release();
        assert!(guard.try_claim());
    }
}
