//! Google Analytics (analytics.js) reporting plugin for the interaction
//! tracking host.
//!
//! # Modules
//!
//! - [`loader`] — one-time stub install, script injection, and `create`
//! - [`hit_types`] — required/optional field registry per hit type
//! - [`dispatcher`] — `callSend`, `pageview`, and `click` translation
//! - [`plugin`] — host registration (`name` + event handler table)

pub mod dispatcher;
pub mod hit_types;
pub mod loader;
pub mod plugin;

pub use dispatcher::GaDispatcher;
pub use hit_types::{HitType, HitTypeSpec};
pub use loader::initialize;
pub use plugin::GaPlugin;
