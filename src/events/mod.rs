//! # Client Events
//!
//! serenity event handler: ready, guild availability, messages and interactions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod message;
pub mod ready;

use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::guild::Guild;
use serenity::prelude::{Context, EventHandler};

use crate::dispatcher::Dispatcher;
pub use message::MessageHooks;
pub use ready::RegistrationGuard;

pub struct Handler {
    dispatcher: Dispatcher,
    messages: MessageHooks,
    registration: RegistrationGuard,
}

impl Handler {
    pub fn new(dispatcher: Dispatcher, messages: MessageHooks) -> Self {
        Self {
            dispatcher,
            messages,
            registration: RegistrationGuard::new(),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::on_ready(self.dispatcher.context(), &self.registration, &ctx, &ready).await;
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: bool) {
        if is_new {
            info!("🆕 Joined new guild: {} ({})", guild.name, guild.id);
        } else {
            info!(
                "📥 Guild available: {} ({}) - {} members",
                guild.name, guild.id, guild.member_count
            );
        }
    }

    async fn message(&self, ctx: Context, message: Message) {
        self.messages.on_message(&ctx, &message).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        self.dispatcher.dispatch(&ctx, interaction).await;
    }
}
