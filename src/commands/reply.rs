//! Interaction reply helpers shared by command handlers

use anyhow::Result;
use serenity::builder::{CreateComponents, CreateEmbed};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;

/// Reply with plain content
pub async fn reply(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: impl ToString,
    ephemeral: bool,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| {
                    message.content(content).ephemeral(ephemeral)
                })
        })
        .await?;
    Ok(())
}

/// Reply with an embed and optional components
pub async fn reply_embed(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    embed: CreateEmbed,
    components: Option<CreateComponents>,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| {
                    message.set_embed(embed);
                    if let Some(components) = components {
                        message.set_components(components);
                    }
                    message
                })
        })
        .await?;
    Ok(())
}

/// Acknowledge now and edit the reply later
pub async fn defer(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    ephemeral: bool,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                .interaction_response_data(|message| message.ephemeral(ephemeral))
        })
        .await?;
    Ok(())
}

/// Replace the content of a deferred or sent reply
pub async fn edit_reply(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: impl ToString,
) -> Result<()> {
    command
        .edit_original_interaction_response(&serenity_ctx.http, |response| {
            response.content(content)
        })
        .await?;
    Ok(())
}

/// Send another message after the initial reply
pub async fn follow_up(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: impl ToString,
) -> Result<()> {
    command
        .create_followup_message(&serenity_ctx.http, |message| message.content(content))
        .await?;
    Ok(())
}
