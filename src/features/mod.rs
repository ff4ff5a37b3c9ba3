//! # Features
//!
//! Domain logic used by the command and component handlers.

pub mod code_expansion;
pub mod fun;
pub mod help;
pub mod links;
pub mod moderation;

pub use code_expansion::{CodeExpander, CodeLink, Snippet};
pub use help::{help_buttons, help_embed, HelpPage};
pub use links::{LinkRewrite, LinkRewriter};
pub use moderation::{ModerationAction, ModerationCheck, ModerationDenial};
