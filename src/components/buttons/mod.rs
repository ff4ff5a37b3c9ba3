//! Button handlers

pub mod help_pages;

use std::sync::Arc;

use super::handler::ComponentHandler;

/// Create all registered button handlers
pub fn create_all_buttons() -> Vec<Arc<dyn ComponentHandler>> {
    vec![Arc::new(help_pages::HelpPagesButton)]
}
