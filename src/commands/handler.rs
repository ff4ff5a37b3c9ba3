//! Application command handler trait
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Commands carry a kind so a slash command and a context menu can share a name
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::command::CommandType;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::fmt;
use std::sync::Arc;

use super::context::BotContext;

/// Kind of application command, as Discord distinguishes them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Slash command typed in the chat input
    ChatInput,
    /// Entry in a user's right-click menu
    User,
    /// Entry in a message's right-click menu
    Message,
}

impl CommandKind {
    /// Map serenity's command type; unknown types yield None
    pub fn from_command_type(kind: CommandType) -> Option<Self> {
        match kind {
            CommandType::ChatInput => Some(Self::ChatInput),
            CommandType::User => Some(Self::User),
            CommandType::Message => Some(Self::Message),
            _ => None,
        }
    }

    /// Numeric type used in the registration payload
    pub fn api_value(self) -> u64 {
        match self {
            Self::ChatInput => 1,
            Self::User => 2,
            Self::Message => 3,
        }
    }

    pub fn is_context_menu(self) -> bool {
        !matches!(self, Self::ChatInput)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ChatInput => "slash",
            Self::User => "user context",
            Self::Message => "message context",
        };
        f.write_str(label)
    }
}

/// Trait for application command handlers
///
/// Each handler processes one or more commands of a single kind.
/// Handlers are registered with a CommandRegistry and dispatched on (kind, name).
///
/// # Example
///
/// ```ignore
/// pub struct InviteHandler;
///
/// #[async_trait]
/// impl CommandHandler for InviteHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["invite"]
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<BotContext>,
///         serenity_ctx: &Context,
///         command: &ApplicationCommandInteraction,
///     ) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Kind of the commands this handler processes
    fn kind(&self) -> CommandKind {
        CommandKind::ChatInput
    }

    /// Command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    /// Handle the command interaction
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared bot context
    /// * `serenity_ctx` - Serenity context for Discord API calls
    /// * `command` - The command interaction to handle
    async fn handle(
        &self,
        ctx: Arc<BotContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()>;
}
