//! Message component handler trait

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::BotContext;

/// Trait for button handlers
///
/// Handlers are registered with a ComponentRegistry and dispatched on the
/// component's custom id.
#[async_trait]
pub trait ComponentHandler: Send + Sync {
    /// Custom id(s) this handler processes
    fn custom_ids(&self) -> &'static [&'static str];

    /// Handle the component interaction
    async fn handle(
        &self,
        ctx: Arc<BotContext>,
        serenity_ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()>;
}
