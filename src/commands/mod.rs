//! # Command System
//!
//! Slash command and context menu handling for Discord interactions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod reply;
pub mod slash;

// Re-export handler infrastructure
pub use context::{BotContext, ShardManagerContainer};
pub use handler::{CommandHandler, CommandKind};
pub use handlers::create_all_handlers;
pub use registry::{CommandKey, CommandRegistry};

// Re-export commonly used items from submodules
pub use slash::{
    create_all_commands, create_context_menu_commands, create_slash_commands,
    get_integer_option, get_string_option, get_user_option, register_global_commands,
    register_guild_commands,
};
