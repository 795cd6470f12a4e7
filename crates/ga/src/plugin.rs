use std::sync::Arc;

use i13n_core::{
    EventPayload, GaConfig, HitCallback, I13nError, I13nPlugin, I13nResult, Page, Tracker,
};

use crate::dispatcher::GaDispatcher;
use crate::loader;

pub const PLUGIN_NAME: &str = "ga";

const EVENT_HANDLERS: [&str; 3] = ["callSend", "pageview", "click"];

/// Google Analytics reporting plugin.
pub struct GaPlugin {
    dispatcher: GaDispatcher,
}

impl GaPlugin {
    /// Load analytics.js into `page` (once per page) and bind to its tracker.
    pub fn new(page: &dyn Page, config: &GaConfig) -> Self {
        Self::with_tracker(loader::initialize(page, config))
    }

    pub fn with_tracker(tracker: Arc<dyn Tracker>) -> Self {
        Self {
            dispatcher: GaDispatcher::new(tracker),
        }
    }

    pub fn dispatcher(&self) -> &GaDispatcher {
        &self.dispatcher
    }
}

impl I13nPlugin for GaPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn event_handlers(&self) -> &[&'static str] {
        &EVENT_HANDLERS
    }

    fn handle(&self, event: &str, payload: EventPayload, callback: HitCallback) -> I13nResult<()> {
        match (event, payload) {
            ("callSend", EventPayload::Send(payload)) => {
                self.dispatcher.call_send(&payload, callback)?;
            }
            ("pageview", EventPayload::Pageview(payload)) => {
                self.dispatcher.pageview(&payload, callback);
            }
            ("click", EventPayload::Click(payload)) => {
                self.dispatcher.click(&payload, callback);
            }
            (event, payload) if self.handles(event) => {
                return Err(I13nError::PayloadMismatch {
                    event: event.to_string(),
                    payload: payload.kind(),
                });
            }
            (event, _) => {
                return Err(I13nError::UnhandledEvent {
                    plugin: PLUGIN_NAME.to_string(),
                    event: event.to_string(),
                });
            }
        }
        Ok(())
    }
}
