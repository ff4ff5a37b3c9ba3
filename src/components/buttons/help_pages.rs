//! Help pager buttons: page1 through page5
//!
//! Only the user who ran /help may turn its pages. The invoker is read from
//! the message's interaction metadata, so pagers keep working after a restart.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::model::user::User;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::BotContext;
use crate::components::handler::ComponentHandler;
use crate::features::help::{help_buttons, help_embed, HelpPage};

pub struct HelpPagesButton;

#[async_trait]
impl ComponentHandler for HelpPagesButton {
    fn custom_ids(&self) -> &'static [&'static str] {
        &["page1", "page2", "page3", "page4", "page5"]
    }

    async fn handle(
        &self,
        _ctx: Arc<BotContext>,
        serenity_ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let Some(page) = HelpPage::from_custom_id(&interaction.data.custom_id) else {
            return Ok(());
        };

        if let Err(content) = may_page(&interaction.message, interaction.user.id) {
            debug!(
                "Rejected help page click from {} on message {}",
                interaction.user.id, interaction.message.id
            );
            interaction
                .create_interaction_response(&serenity_ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.content(content).ephemeral(true)
                        })
                })
                .await?;
            return Ok(());
        }

        let thumbnail = serenity_ctx.cache.current_user().face();
        interaction
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::UpdateMessage)
                    .interaction_response_data(|message| {
                        message
                            .set_embed(help_embed(page, Some(&thumbnail)))
                            .set_components(help_buttons())
                    })
            })
            .await?;

        Ok(())
    }
}

/// User who invoked the command that produced `message`, if Discord recorded one
fn pager_owner(message: &Message) -> Option<&User> {
    message.interaction.as_ref().map(|meta| &meta.user)
}

/// Whether `clicker` may turn the pages of `message`; the error is the refusal text
fn may_page(message: &Message, clicker: UserId) -> Result<(), String> {
    match pager_owner(message) {
        Some(owner) if owner.id != clicker => {
            Err(format!("Only {} can use these buttons!", owner.tag()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn user_json(id: u64, name: &str) -> Value {
        json!({
            "id": id.to_string(),
            "username": name,
            "discriminator": "0001",
            "avatar": null,
        })
    }

    /// A bot message, optionally carrying the interaction that produced it
    fn pager_message(invoker: Option<Value>) -> Message {
        let mut message = json!({
            "id": "1100000000000000000",
            "channel_id": "1000000000000000001",
            "author": user_json(7, "blahaj"),
            "content": "",
            "timestamp": "2024-01-01T00:00:00.000000+00:00",
            "edited_timestamp": null,
            "tts": false,
            "mention_everyone": false,
            "mentions": [],
            "mention_roles": [],
            "attachments": [],
            "embeds": [],
            "pinned": false,
            "type": 20,
        });
        if let Some(user) = invoker {
            message["interaction"] = json!({
                "id": "1100000000000000001",
                "type": 2,
                "name": "help",
                "user": user,
            });
        }
        serde_json::from_value(message).unwrap()
    }

    #[test]
    fn test_invoker_may_page() {
        let message = pager_message(Some(user_json(42, "shark")));
        assert_eq!(pager_owner(&message).map(|u| u.id), Some(UserId(42)));
        assert_eq!(may_page(&message, UserId(42)), Ok(()));
    }

    #[test]
    fn test_other_user_is_refused() {
        let message = pager_message(Some(user_json(42, "shark")));
        assert_eq!(
            may_page(&message, UserId(99)),
            Err("Only shark#0001 can use these buttons!".to_string())
        );
    }

    #[test]
    fn test_anyone_may_page_without_interaction_metadata() {
        let message = pager_message(None);
        assert!(pager_owner(&message).is_none());
        assert_eq!(may_page(&message, UserId(99)), Ok(()));
    }

    #[test]
    fn test_custom_ids_match_pages() {
        let handler = HelpPagesButton;
        let ids = handler.custom_ids();
        assert_eq!(ids.len(), HelpPage::ALL.len());
        for page in HelpPage::ALL {
            assert!(ids.contains(&page.custom_id()));
        }
    }

    #[test]
    fn test_registered_in_button_group() {
        let registry =
            crate::components::ComponentRegistry::with_handlers(crate::components::create_all_buttons());
        for page in HelpPage::ALL {
            assert!(registry.contains(page.custom_id()));
        }
    }
}
