// Core layer - shared types and configuration
pub mod core;

// Features layer - pure rules behind commands
pub mod features;

// Application layer
pub mod commands;
pub mod components;
pub mod dispatcher;
pub mod events;

pub use crate::core::Config;
pub use dispatcher::Dispatcher;
pub use events::Handler;
