//! Message event: link mirrors and code link expansion

use anyhow::Result;
use log::{debug, info, warn};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::core::truncate_for_message;
use crate::features::{CodeExpander, LinkRewriter};

/// Hooks run on every message a human sends
pub struct MessageHooks {
    links: LinkRewriter,
    code: CodeExpander,
}

impl MessageHooks {
    pub fn new(client: reqwest::Client) -> Result<Self> {
        Ok(Self {
            links: LinkRewriter::new()?,
            code: CodeExpander::new(client)?,
        })
    }

    pub(super) async fn on_message(&self, ctx: &Context, message: &Message) {
        if message.author.bot {
            return;
        }
        if let Err(e) = self.replace_links(ctx, message).await {
            warn!("Link rewrite failed for message {}: {e}", message.id);
        }
        if let Err(e) = self.expand_code(ctx, message).await {
            warn!("Code expansion failed for message {}: {e}", message.id);
        }
    }

    async fn replace_links(&self, ctx: &Context, message: &Message) -> Result<()> {
        let Some(rewrite) = self.links.rewrite(&message.content) else {
            return Ok(());
        };

        // Needs Manage Messages; the mirrors are posted either way
        if let Err(e) = message
            .channel_id
            .edit_message(&ctx.http, message.id, |edit| edit.suppress_embeds(true))
            .await
        {
            debug!("Could not suppress embeds on {}: {e}", message.id);
        }

        message
            .reply(ctx, truncate_for_message(&rewrite.reply_content()))
            .await?;
        info!(
            "Mirrored {} link(s) from {} in {}",
            rewrite.links.len(),
            message.author.id,
            message.channel_id
        );
        Ok(())
    }

    async fn expand_code(&self, ctx: &Context, message: &Message) -> Result<()> {
        let embeds = self.code.expand(&message.content).await;
        if embeds.is_empty() {
            return Ok(());
        }

        let count = embeds.len();
        message
            .channel_id
            .send_message(&ctx.http, |reply| reply.set_embeds(embeds))
            .await?;
        info!("Expanded {count} code link(s) in {}", message.channel_id);
        Ok(())
    }
}
