//! # Core Module
//!
//! Configuration, shared embeds and formatting for the blahaj bot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;
pub mod embeds;
pub mod format;
pub mod presence;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use embeds::{brand_embed, sign, user_info_embed, MemberProfile, Signature, UserProfile};
pub use format::{format_uptime, invite_url, relative_timestamp, snowflake_millis};
pub use presence::{PresenceConfig, PresenceKind, PresenceOption, PresenceStatus};
pub use response::{truncate, truncate_for_message, FIELD_LIMIT, MESSAGE_LIMIT};
