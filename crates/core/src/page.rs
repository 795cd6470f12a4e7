//! Host page abstraction: global slots plus script injection into `<head>`.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::tracker::Tracker;

/// A `<script>` element appended to the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptElement {
    pub src: String,
    #[serde(rename = "type")]
    pub script_type: String,
    /// Fetch without blocking the parser.
    pub is_async: bool,
}

impl ScriptElement {
    pub fn async_js(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            script_type: "text/javascript".into(),
            is_async: true,
        }
    }
}

/// Document-like host that plugins load their libraries into.
pub trait Page: Send + Sync {
    /// The tracker installed under a global name, if any.
    fn tracker(&self, name: &str) -> Option<Arc<dyn Tracker>>;

    fn install_tracker(&self, name: &str, tracker: Arc<dyn Tracker>);

    /// Insert a script element into the head. Loading happens on the host's
    /// schedule; callers never wait for it.
    fn append_to_head(&self, script: ScriptElement);
}

/// Headless page that records globals and injected scripts.
#[derive(Default)]
pub struct InMemoryPage {
    globals: DashMap<String, Arc<dyn Tracker>>,
    head: Mutex<Vec<ScriptElement>>,
}

impl InMemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripts(&self) -> Vec<ScriptElement> {
        self.head.lock().clone()
    }

    pub fn has_global(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }
}

impl Page for InMemoryPage {
    fn tracker(&self, name: &str) -> Option<Arc<dyn Tracker>> {
        self.globals.get(name).map(|entry| entry.value().clone())
    }

    fn install_tracker(&self, name: &str, tracker: Arc<dyn Tracker>) {
        self.globals.insert(name.to_string(), tracker);
    }

    fn append_to_head(&self, script: ScriptElement) {
        self.head.lock().push(script);
    }
}
