//! Screen layer coordinating store, search and form per entity kind.
//!
//! This module sits between a presentation layer (the CLI binary, or any UI
//! embedding the crate) and the storage/form layers. It follows a
//! unidirectional flow:
//!
//! ```text
//! User Input → ScreenEvent → ScreenController → Store/Form Mutations → Actions
//! ```
//!
//! # Modules
//!
//! - [`actions`]: notifications and form visibility commands
//! - [`controller`]: the event handler for one management screen

pub mod actions;
pub mod controller;

pub use actions::{Action, Notification, Severity};
pub use controller::{ScreenController, ScreenEvent};
