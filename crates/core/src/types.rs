//! Payload and command types shared between the plugin host and plugins.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::node::InteractionNode;

/// Completion hook fired by the tracking library once a hit is recorded.
pub type HitCallback = Arc<dyn Fn() + Send + Sync>;

pub fn hit_callback(f: impl Fn() + Send + Sync + 'static) -> HitCallback {
    Arc::new(f)
}

/// Generic hit payload, tagged with its hit type name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(rename = "type")]
    pub hit_type: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Payload {
    pub fn new(hit_type: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            hit_type: hit_type.into(),
            data,
        }
    }

    /// Build a payload from a JSON object literal. Non-object `data` yields an
    /// empty field map.
    pub fn from_json(hit_type: impl Into<String>, data: Value) -> Self {
        let data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(hit_type, data)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageviewPayload {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// The element that received a DOM event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTarget {
    pub tag: String,
    pub id: Option<String>,
    pub text: Option<String>,
}

#[derive(Clone, Default)]
pub struct ClickPayload {
    pub i13n_node: Option<Arc<dyn InteractionNode>>,
    pub target: Option<EventTarget>,
}

impl fmt::Debug for ClickPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickPayload")
            .field("i13n_node", &self.i13n_node.as_ref().map(|n| n.merged_model()))
            .field("target", &self.target)
            .finish()
    }
}

/// Named fields passed as a trailing object argument, e.g.
/// `{page: "/x", title: "T", hitCallback: cb}`.
#[derive(Clone, Default)]
pub struct FieldsObject {
    pub fields: Map<String, Value>,
    pub hit_callback: Option<HitCallback>,
}

impl FieldsObject {
    pub fn with_callback(callback: HitCallback) -> Self {
        Self {
            fields: Map::new(),
            hit_callback: Some(callback),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut obj = self.fields.clone();
        if self.hit_callback.is_some() {
            obj.insert("hitCallback".into(), Value::String("[function]".into()));
        }
        Value::Object(obj)
    }
}

impl PartialEq for FieldsObject {
    fn eq(&self, other: &Self) -> bool {
        let same_callback = match (&self.hit_callback, &other.hit_callback) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.fields == other.fields && same_callback
    }
}

impl fmt::Debug for FieldsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldsObject")
            .field("fields", &self.fields)
            .field("hit_callback", &self.hit_callback.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandArg {
    Value(Value),
    Fields(FieldsObject),
}

impl CommandArg {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            CommandArg::Value(v) => Some(v),
            CommandArg::Fields(_) => None,
        }
    }

    pub fn as_fields(&self) -> Option<&FieldsObject> {
        match self {
            CommandArg::Fields(f) => Some(f),
            CommandArg::Value(_) => None,
        }
    }
}

impl From<Value> for CommandArg {
    fn from(value: Value) -> Self {
        CommandArg::Value(value)
    }
}

impl From<&str> for CommandArg {
    fn from(value: &str) -> Self {
        CommandArg::Value(Value::String(value.to_string()))
    }
}

impl From<FieldsObject> for CommandArg {
    fn from(fields: FieldsObject) -> Self {
        CommandArg::Fields(fields)
    }
}

/// One positional invocation of the tracking callable, e.g.
/// `ga('send', 'event', 'nav', 'click', 'home')`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Command {
    pub args: Vec<CommandArg>,
}

impl Command {
    pub fn new(name: &str) -> Self {
        Self {
            args: vec![name.into()],
        }
    }

    /// `send(hitType, ...)`
    pub fn send(hit_type: &str) -> Self {
        Self::new("send").arg(hit_type)
    }

    /// `create(trackingId, cookieDomain)`; a missing id is forwarded as null.
    pub fn create(tracking_id: Option<&str>, cookie_domain: &str) -> Self {
        let id = tracking_id.map_or(Value::Null, |id| Value::String(id.to_string()));
        Self::new("create").arg(id).arg(cookie_domain)
    }

    pub fn arg(mut self, arg: impl Into<CommandArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn push(&mut self, arg: impl Into<CommandArg>) {
        self.args.push(arg.into());
    }

    /// The command name (`send`, `create`, ...).
    pub fn name(&self) -> Option<&str> {
        self.args.first().and_then(CommandArg::as_value)?.as_str()
    }

    /// The second positional argument, which is the hit type for `send`.
    pub fn hit_type(&self) -> Option<&str> {
        self.args.get(1).and_then(CommandArg::as_value)?.as_str()
    }

    /// Callbacks carried by any fields object in this command.
    pub fn hit_callbacks(&self) -> impl Iterator<Item = &HitCallback> {
        self.args
            .iter()
            .filter_map(CommandArg::as_fields)
            .filter_map(|f| f.hit_callback.as_ref())
    }

    pub fn to_json(&self) -> Value {
        Value::Array(
            self.args
                .iter()
                .map(|arg| match arg {
                    CommandArg::Value(v) => v.clone(),
                    CommandArg::Fields(f) => f.to_json(),
                })
                .collect(),
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// JavaScript truthiness: null, false, 0, and "" are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
