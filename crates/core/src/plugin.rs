//! Plugin registration contract between the interaction-tracking host and
//! reporting plugins.
//!
//! The host looks a plugin up by [`I13nPlugin::name`], and for each
//! interaction event calls [`I13nPlugin::handle`] with the event name, its
//! payload, and a completion callback.

use crate::error::I13nResult;
use crate::types::{ClickPayload, HitCallback, PageviewPayload, Payload};

/// Payload delivered to an event handler.
#[derive(Debug, Clone)]
pub enum EventPayload {
    Send(Payload),
    Pageview(PageviewPayload),
    Click(ClickPayload),
}

impl EventPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            EventPayload::Send(_) => "send",
            EventPayload::Pageview(_) => "pageview",
            EventPayload::Click(_) => "click",
        }
    }
}

impl From<Payload> for EventPayload {
    fn from(payload: Payload) -> Self {
        EventPayload::Send(payload)
    }
}

impl From<PageviewPayload> for EventPayload {
    fn from(payload: PageviewPayload) -> Self {
        EventPayload::Pageview(payload)
    }
}

impl From<ClickPayload> for EventPayload {
    fn from(payload: ClickPayload) -> Self {
        EventPayload::Click(payload)
    }
}

pub trait I13nPlugin: Send + Sync {
    /// Plugin identifier (e.g. "ga").
    fn name(&self) -> &str;

    /// Names of the events this plugin handles.
    fn event_handlers(&self) -> &[&'static str];

    fn handles(&self, event: &str) -> bool {
        self.event_handlers().contains(&event)
    }

    /// Run the handler registered for `event`.
    fn handle(&self, event: &str, payload: EventPayload, callback: HitCallback) -> I13nResult<()>;
}
