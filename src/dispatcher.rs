//! # Interaction Dispatcher
//!
//! Routes gateway interactions to the registered command and component
//! handlers, and turns handler failures into generic ephemeral replies.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use log::{debug, error, info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::id::GuildId;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::{BotContext, CommandKind, CommandRegistry};
use crate::components::ComponentRegistry;

/// Which kind of handler failed, selecting the generic error reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Command,
    ContextMenu,
    Button,
}

impl InteractionKind {
    pub fn for_command(kind: CommandKind) -> Self {
        if kind.is_context_menu() {
            Self::ContextMenu
        } else {
            Self::Command
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            Self::Command => "There was an error while executing this command!",
            Self::ContextMenu => "There was an error while executing this context menu command!",
            Self::Button => "There was an error while executing this button!",
        }
    }
}

pub struct Dispatcher {
    ctx: Arc<BotContext>,
    commands: CommandRegistry,
    components: ComponentRegistry,
}

impl Dispatcher {
    pub fn new(
        ctx: Arc<BotContext>,
        commands: CommandRegistry,
        components: ComponentRegistry,
    ) -> Self {
        Self {
            ctx,
            commands,
            components,
        }
    }

    pub fn context(&self) -> &Arc<BotContext> {
        &self.ctx
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Handle one interaction from the gateway
    pub async fn dispatch(&self, serenity_ctx: &Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                self.dispatch_command(serenity_ctx, &command).await
            }
            Interaction::MessageComponent(component) => {
                self.dispatch_component(serenity_ctx, &component).await
            }
            other => debug!("Ignoring {:?} interaction {}", other.kind(), other.id()),
        }
    }

    async fn dispatch_command(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) {
        let name = command.data.name.as_str();
        let Some(kind) = CommandKind::from_command_type(command.data.kind) else {
            debug!("Ignoring command '{name}' of unknown type {:?}", command.data.kind);
            return;
        };
        let Some(handler) = self.commands.get(kind, name) else {
            debug!("No handler registered for {kind} command '{name}'");
            return;
        };

        let request_id = Uuid::new_v4();
        info!(
            "[{request_id}] {kind} command '{name}' from {} ({}) in {}",
            command.user.tag(),
            command.user.id,
            guild_label(command.guild_id)
        );

        if let Err(e) = handler
            .handle(Arc::clone(&self.ctx), serenity_ctx, command)
            .await
        {
            error!("[{request_id}] Error handling {kind} command '{name}': {e:?}");
            reply_command_error(serenity_ctx, command, InteractionKind::for_command(kind), request_id)
                .await;
        }
    }

    async fn dispatch_component(
        &self,
        serenity_ctx: &Context,
        component: &MessageComponentInteraction,
    ) {
        let custom_id = component.data.custom_id.as_str();
        let Some(handler) = self.components.get(custom_id) else {
            debug!("No handler registered for component '{custom_id}'");
            return;
        };

        let request_id = Uuid::new_v4();
        info!(
            "[{request_id}] Button '{custom_id}' from {} ({}) in {}",
            component.user.tag(),
            component.user.id,
            guild_label(component.guild_id)
        );

        if let Err(e) = handler
            .handle(Arc::clone(&self.ctx), serenity_ctx, component)
            .await
        {
            error!("[{request_id}] Error handling button '{custom_id}': {e:?}");
            reply_component_error(serenity_ctx, component, request_id).await;
        }
    }
}

fn guild_label(guild_id: Option<GuildId>) -> String {
    guild_id
        .map(|id| format!("guild {id}"))
        .unwrap_or_else(|| "DMs".to_string())
}

/// Send the generic error, as a follow-up if the handler already responded
async fn reply_command_error(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    kind: InteractionKind,
    request_id: Uuid,
) {
    let content = kind.error_message();
    let initial = command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(content).ephemeral(true))
        })
        .await;
    if initial.is_ok() {
        return;
    }

    if let Err(e) = command
        .create_followup_message(&serenity_ctx.http, |message| {
            message.content(content).ephemeral(true)
        })
        .await
    {
        warn!("[{request_id}] Could not deliver error reply: {e}");
    }
}

async fn reply_component_error(
    serenity_ctx: &Context,
    component: &MessageComponentInteraction,
    request_id: Uuid,
) {
    let content = InteractionKind::Button.error_message();
    let initial = component
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(content).ephemeral(true))
        })
        .await;
    if initial.is_ok() {
        return;
    }

    if let Err(e) = component
        .create_followup_message(&serenity_ctx.http, |message| {
            message.content(content).ephemeral(true)
        })
        .await
    {
        warn!("[{request_id}] Could not deliver error reply: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::test_context;
    use crate::commands::create_all_handlers;
    use crate::components::create_all_buttons;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            InteractionKind::Command.error_message(),
            "There was an error while executing this command!"
        );
        assert_eq!(
            InteractionKind::ContextMenu.error_message(),
            "There was an error while executing this context menu command!"
        );
        assert_eq!(
            InteractionKind::Button.error_message(),
            "There was an error while executing this button!"
        );
    }

    #[test]
    fn test_interaction_kind_for_command() {
        assert_eq!(
            InteractionKind::for_command(CommandKind::ChatInput),
            InteractionKind::Command
        );
        assert_eq!(
            InteractionKind::for_command(CommandKind::User),
            InteractionKind::ContextMenu
        );
        assert_eq!(
            InteractionKind::for_command(CommandKind::Message),
            InteractionKind::ContextMenu
        );
    }

    #[test]
    fn test_guild_label() {
        assert_eq!(guild_label(None), "DMs");
        assert_eq!(guild_label(Some(GuildId(7))), "guild 7");
    }

    #[test]
    fn test_dispatcher_resolves_avatar_per_kind() {
        let dispatcher = Dispatcher::new(
            test_context(),
            CommandRegistry::with_handlers(create_all_handlers()),
            ComponentRegistry::with_handlers(create_all_buttons()),
        );

        let slash = dispatcher.commands().get(CommandKind::ChatInput, "avatar").unwrap();
        let context = dispatcher.commands().get(CommandKind::User, "avatar").unwrap();
        assert_eq!(slash.kind(), CommandKind::ChatInput);
        assert_eq!(context.kind(), CommandKind::User);
        assert!(!Arc::ptr_eq(&slash, &context));
        assert!(dispatcher.components().get("page3").is_some());
        assert!(dispatcher.components().get("unknown").is_none());
    }
}
