//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Fun handler group
//! - 1.0.0: Help, moderation, tools and user handler groups

pub mod fun;
pub mod help;
pub mod moderation;
pub mod tools;
pub mod user;

use std::sync::Arc;

use super::handler::CommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(fun::FunHandler),
        Arc::new(help::HelpHandler),
        Arc::new(moderation::ModerationHandler),
        Arc::new(tools::ToolsHandler),
        Arc::new(user::UserHandler),
        Arc::new(user::UserContextHandler),
    ]
}
