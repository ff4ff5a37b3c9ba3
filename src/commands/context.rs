//! Shared context for command and component handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::client::bridge::gateway::{ShardId, ShardManager};
use serenity::prelude::{Context, Mutex, TypeMapKey};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::{Config, PresenceConfig};

/// TypeMap key for the client's shard manager, used to read heartbeat latency
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<Mutex<ShardManager>>;
}

/// Shared context for all handlers
///
/// Holds the loaded configuration, presence options and the process start time.
#[derive(Debug, Clone)]
pub struct BotContext {
    pub config: Config,
    pub presences: PresenceConfig,
    pub start_time: Instant,
}

impl BotContext {
    pub fn new(config: Config, presences: PresenceConfig) -> Self {
        Self {
            config,
            presences,
            start_time: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Heartbeat latency of the shard that received the event
///
/// Returns None until the shard has completed its first heartbeat.
pub async fn shard_latency(serenity_ctx: &Context) -> Option<Duration> {
    let manager = {
        let data = serenity_ctx.data.read().await;
        data.get::<ShardManagerContainer>()?.clone()
    };
    let manager = manager.lock().await;
    let runners = manager.runners.lock().await;
    runners.get(&ShardId(serenity_ctx.shard_id))?.latency
}

/// Format an optional latency as "{n}ms" or "unknown"
pub fn format_latency(latency: Option<Duration>) -> String {
    latency
        .map(|d| format!("{}ms", d.as_millis()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Context with a placeholder token, for handler tests
#[cfg(test)]
pub(crate) fn test_context() -> Arc<BotContext> {
    let config = Config::from_lookup(|key| (key == "DISCORD_TOKEN").then(|| "token".to_string()))
        .expect("token is set");
    Arc::new(BotContext::new(config, PresenceConfig::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_context_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<BotContext>();
    }

    #[test]
    fn test_uptime_monotonic() {
        let ctx = test_context();
        let first = ctx.uptime();
        let second = ctx.uptime();
        assert!(second >= first);
    }

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency(None), "unknown");
        assert_eq!(format_latency(Some(Duration::from_millis(42))), "42ms");
    }
}
