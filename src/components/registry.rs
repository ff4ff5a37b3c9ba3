//! Component handler registry

use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

use super::handler::ComponentHandler;

/// Registry mapping component custom ids to handlers
#[derive(Clone)]
pub struct ComponentRegistry {
    handlers: HashMap<&'static str, Arc<dyn ComponentHandler>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn with_handlers(handlers: impl IntoIterator<Item = Arc<dyn ComponentHandler>>) -> Self {
        let mut registry = Self::new();
        for handler in handlers {
            registry.register(handler);
        }
        registry
    }

    /// Register a handler for its declared custom ids
    ///
    /// A later registration for the same id replaces the earlier one.
    pub fn register(&mut self, handler: Arc<dyn ComponentHandler>) {
        for &id in handler.custom_ids() {
            if self.handlers.insert(id, Arc::clone(&handler)).is_some() {
                warn!("Replacing existing component handler for '{id}'");
            }
        }
    }

    pub fn get(&self, custom_id: &str) -> Option<Arc<dyn ComponentHandler>> {
        self.handlers.get(custom_id).cloned()
    }

    pub fn contains(&self, custom_id: &str) -> bool {
        self.handlers.contains_key(custom_id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn custom_ids(&self) -> impl Iterator<Item = &&'static str> {
        self.handlers.keys()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::BotContext;
    use anyhow::Result;
    use async_trait::async_trait;
    use serenity::model::application::interaction::message_component::MessageComponentInteraction;
    use serenity::prelude::Context;

    struct MockButton {
        ids: &'static [&'static str],
    }

    #[async_trait]
    impl ComponentHandler for MockButton {
        fn custom_ids(&self) -> &'static [&'static str] {
            self.ids
        }

        async fn handle(
            &self,
            _ctx: Arc<BotContext>,
            _serenity_ctx: &Context,
            _interaction: &MessageComponentInteraction,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_registry_register() {
        let mut registry = ComponentRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(MockButton {
            ids: &["page1", "page2"],
        }));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("page1"));
        assert!(registry.get("page2").is_some());
        assert!(registry.get("page3").is_none());
    }

    #[test]
    fn test_later_registration_replaces() {
        let second: Arc<dyn ComponentHandler> = Arc::new(MockButton { ids: &["confirm"] });
        let registry = ComponentRegistry::with_handlers(vec![
            Arc::new(MockButton { ids: &["confirm"] }) as Arc<dyn ComponentHandler>,
            second.clone(),
        ]);

        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(&registry.get("confirm").unwrap(), &second));
    }
}
