//! # Message Components
//!
//! Button handling: the handler trait, its registry and the button group.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod buttons;
pub mod handler;
pub mod registry;

pub use buttons::create_all_buttons;
pub use handler::ComponentHandler;
pub use registry::ComponentRegistry;
