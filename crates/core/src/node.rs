//! Interaction nodes — the host's view of a trackable UI element.

use serde_json::{Map, Value};

use crate::types::EventTarget;

/// A node in the host's interaction tree. The host owns and mutates it; plugins
/// only read the merged model and the rendered text.
pub trait InteractionNode: Send + Sync {
    /// The node's model merged with every ancestor's model
    /// (`category`, `action`, `label`, `value`, ...).
    fn merged_model(&self) -> Map<String, Value>;

    /// Rendered text for the element that received the event.
    fn text(&self, target: Option<&EventTarget>) -> Option<String>;
}

/// Node with a precomputed model, for hosts that flatten their tree up front.
#[derive(Debug, Clone, Default)]
pub struct StaticNode {
    model: Map<String, Value>,
    text: Option<String>,
}

impl StaticNode {
    pub fn new(model: Map<String, Value>) -> Self {
        Self { model, text: None }
    }

    /// Build a node from a JSON object literal; anything else gives an empty model.
    pub fn from_json(model: Value) -> Self {
        match model {
            Value::Object(map) => Self::new(map),
            _ => Self::default(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl InteractionNode for StaticNode {
    fn merged_model(&self) -> Map<String, Value> {
        self.model.clone()
    }

    /// Prefers the target's own text, falling back to the node's.
    fn text(&self, target: Option<&EventTarget>) -> Option<String> {
        target
            .and_then(|t| t.text.clone())
            .or_else(|| self.text.clone())
    }
}
