//! Host-side contracts for interaction-tracking plugins: payloads, the
//! tracking-callable capability, the host page, and plugin registration.

pub mod config;
pub mod error;
pub mod node;
pub mod page;
pub mod plugin;
pub mod tracker;
pub mod types;

pub use config::{AppConfig, GaConfig};
pub use error::{DispatchError, DispatchResult, I13nError, I13nResult};
pub use node::{InteractionNode, StaticNode};
pub use page::{InMemoryPage, Page, ScriptElement};
pub use plugin::{EventPayload, I13nPlugin};
pub use tracker::{CaptureTracker, CommandQueue, Tracker};
pub use types::{
    hit_callback, ClickPayload, Command, CommandArg, EventTarget, FieldsObject, HitCallback,
    PageviewPayload, Payload,
};
