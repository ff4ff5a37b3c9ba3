//! Command handler registry
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Key handlers on (kind, name)
//! - 1.0.0: Initial implementation for handler dispatch

use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

use super::handler::{CommandHandler, CommandKind};

/// Registry key: the command's kind and its name
pub type CommandKey = (CommandKind, &'static str);

/// Registry mapping (kind, name) pairs to handlers
///
/// The same name may be registered once per kind, so `/avatar` and the
/// "avatar" user context menu resolve to different handlers.
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(Arc::new(HelpHandler));
///
/// if let Some(handler) = registry.get(CommandKind::ChatInput, "help") {
///     handler.handle(ctx, serenity_ctx, command).await?;
/// }
/// ```
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<CommandKind, HashMap<&'static str, Arc<dyn CommandHandler>>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry from a list of handlers
    pub fn with_handlers(handlers: impl IntoIterator<Item = Arc<dyn CommandHandler>>) -> Self {
        let mut registry = Self::new();
        for handler in handlers {
            registry.register(handler);
        }
        registry
    }

    /// Register a handler for its declared command names
    ///
    /// A later registration for the same key replaces the earlier one.
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        let kind = handler.kind();
        let by_name = self.handlers.entry(kind).or_default();
        for &name in handler.command_names() {
            if by_name.insert(name, Arc::clone(&handler)).is_some() {
                warn!("Replacing existing {kind} command handler for '{name}'");
            }
        }
    }

    /// Get handler for a command
    pub fn get(&self, kind: CommandKind, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(&kind)?.get(name).cloned()
    }

    /// Check if a command is registered
    pub fn contains(&self, kind: CommandKind, name: &str) -> bool {
        self.handlers
            .get(&kind)
            .is_some_and(|by_name| by_name.contains_key(name))
    }

    /// Number of registered keys
    ///
    /// Note: This counts keys, not unique handlers.
    pub fn len(&self) -> usize {
        self.handlers.values().map(HashMap::len).sum()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get all registered keys
    pub fn keys(&self) -> impl Iterator<Item = CommandKey> + '_ {
        self.handlers
            .iter()
            .flat_map(|(&kind, by_name)| by_name.keys().map(move |&name| (kind, name)))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
