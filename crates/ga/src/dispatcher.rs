//! Translates interaction payloads into positional `send` commands.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use i13n_core::types::is_truthy;
use i13n_core::{
    ClickPayload, Command, DispatchError, DispatchResult, FieldsObject, HitCallback,
    PageviewPayload, Payload, Tracker,
};

use crate::hit_types::HitType;

pub const DEFAULT_CATEGORY: &str = "all";
pub const DEFAULT_ACTION: &str = "click";
pub const DEFAULT_LABEL: &str = "";

pub struct GaDispatcher {
    tracker: Arc<dyn Tracker>,
}

impl GaDispatcher {
    pub fn new(tracker: Arc<dyn Tracker>) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &Arc<dyn Tracker> {
        &self.tracker
    }

    /// Build the `send` command for a generic hit without issuing it.
    ///
    /// Required fields come first, then whichever optional fields are present,
    /// each in the hit type's declared order. A field counts as present when
    /// its key exists, whatever the value. The first missing required field
    /// aborts the build.
    pub fn build_send(payload: &Payload) -> Result<Command, DispatchError> {
        let hit_type: HitType = payload.hit_type.parse()?;
        let spec = hit_type.spec();
        let mut command = Command::send(hit_type.as_str());

        for &field in spec.required {
            let value = payload
                .data
                .get(field)
                .ok_or_else(|| DispatchError::MissingField {
                    hit_type: hit_type.to_string(),
                    field: field.to_string(),
                })?;
            command.push(value.clone());
        }

        for &field in spec.optional {
            if let Some(value) = payload.data.get(field) {
                command.push(value.clone());
            }
        }

        Ok(command)
    }

    /// Generic hit: validate against the hit-type registry and forward.
    /// The completion callback is not attached to the hit.
    pub fn call_send(&self, payload: &Payload, _callback: HitCallback) -> DispatchResult {
        let command = Self::build_send(payload)?;
        debug!(hit_type = %payload.hit_type, %command, "forwarding hit");
        self.tracker.call(command);
        Ok(())
    }

    /// `send('pageview', {page, title, hitCallback})`. Never fails.
    pub fn pageview(&self, payload: &PageviewPayload, callback: HitCallback) {
        let fields = FieldsObject::with_callback(callback)
            .field("page", payload.url.clone())
            .field("title", payload.title.clone());
        let command = Command::send(HitType::Pageview.as_str()).arg(fields);

        debug!(%command, "forwarding pageview");
        self.tracker.call(command);
    }

    /// `send('event', category, action, label, [value], {hitCallback})` from
    /// the node's merged model. Without a node the click is a no-op and the
    /// callback fires immediately.
    pub fn click(&self, payload: &ClickPayload, callback: HitCallback) {
        let Some(node) = payload.i13n_node.as_ref() else {
            debug!("click without interaction node, completing immediately");
            callback();
            return;
        };

        let model = node.merged_model();
        let truthy = |key: &str| model.get(key).filter(|v| is_truthy(v)).cloned();

        let category = truthy("category").unwrap_or_else(|| DEFAULT_CATEGORY.into());
        let action = truthy("action").unwrap_or_else(|| DEFAULT_ACTION.into());
        let label = truthy("label")
            .or_else(|| {
                node.text(payload.target.as_ref())
                    .filter(|text| !text.is_empty())
                    .map(Value::String)
            })
            .unwrap_or_else(|| DEFAULT_LABEL.into());

        let mut command = Command::send(HitType::Event.as_str())
            .arg(category)
            .arg(action)
            .arg(label);
        // Falsy values, including 0, are dropped.
        if let Some(value) = truthy("value") {
            command.push(value);
        }
        command.push(FieldsObject::with_callback(callback));

        debug!(%command, "forwarding click");
        self.tracker.call(command);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use i13n_core::tracker::capture_tracker;
    use i13n_core::{hit_callback, CommandArg, EventTarget, StaticNode};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_callback() -> (HitCallback, Arc<AtomicUsize>) {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let cb = hit_callback(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (cb, fired)
    }

    fn click_payload(model: Value, text: Option<&str>) -> ClickPayload {
        let mut node = StaticNode::from_json(model);
        if let Some(text) = text {
            node = node.with_text(text);
        }
        ClickPayload {
            i13n_node: Some(Arc::new(node)),
            target: Some(EventTarget {
                tag: "button".into(),
                id: None,
                text: None,
            }),
        }
    }

    #[test]
    fn test_send_full_argument_list() {
        let payloads = [
            (
                "event",
                json!({ "label": "l", "value": 4, "action": "a", "category": "c" }),
                json!(["send", "event", "c", "a", "l", 4]),
            ),
            (
                "pageview",
                json!({ "title": "T", "location": "https://x.test/p" }),
                json!(["send", "pageview", "https://x.test/p", "T"]),
            ),
            (
                "social",
                json!({ "socialTarget": "t", "socialNetwork": "n", "socialAction": "a" }),
                json!(["send", "social", "n", "a", "t"]),
            ),
            (
                "timing",
                json!({ "timingValue": 120, "timingVar": "load", "timingCategory": "js" }),
                json!(["send", "timing", "js", "load", 120]),
            ),
            (
                "exception",
                json!({ "errorData": { "exDescription": "boom" } }),
                json!(["send", "exception", { "exDescription": "boom" }]),
            ),
        ];

        for (hit_type, data, expected) in payloads {
            let tracker = capture_tracker();
            let dispatcher = GaDispatcher::new(tracker.clone());
            dispatcher
                .call_send(&Payload::from_json(hit_type, data), hit_callback(|| {}))
                .unwrap();

            let commands = tracker.commands();
            assert_eq!(commands.len(), 1, "{hit_type}");
            assert_eq!(commands[0].to_json(), expected, "{hit_type}");
        }
    }

    #[test]
    fn test_send_missing_required_field() {
        let tracker = capture_tracker();
        let dispatcher = GaDispatcher::new(tracker.clone());

        let err = dispatcher
            .call_send(
                &Payload::from_json("event", json!({ "category": "c", "label": "l" })),
                hit_callback(|| {}),
            )
            .unwrap_err();

        assert_eq!(
            err,
            DispatchError::MissingField {
                hit_type: "event".into(),
                field: "action".into(),
            }
        );
        assert_eq!(err.to_string(), "missing argument for event: action");
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn test_send_first_missing_field_wins() {
        let err = GaDispatcher::build_send(&Payload::from_json("timing", json!({}))).unwrap_err();
        assert_eq!(
            err,
            DispatchError::MissingField {
                hit_type: "timing".into(),
                field: "timingCategory".into(),
            }
        );
    }

    #[test]
    fn test_send_unsupported_hit_type() {
        let tracker = capture_tracker();
        let dispatcher = GaDispatcher::new(tracker.clone());

        let err = dispatcher
            .call_send(&Payload::from_json("bogus", json!(null)), hit_callback(|| {}))
            .unwrap_err();

        assert_eq!(err, DispatchError::UnsupportedHitType("bogus".into()));
        assert_eq!(err.to_string(), "hit type bogus not supported");
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn test_send_null_counts_as_present() {
        let command = GaDispatcher::build_send(&Payload::from_json(
            "social",
            json!({ "socialNetwork": null, "socialAction": "like", "socialTarget": "/p" }),
        ))
        .unwrap();
        assert_eq!(command.to_json(), json!(["send", "social", null, "like", "/p"]));
    }

    #[test]
    fn test_send_does_not_attach_callback() {
        let tracker = capture_tracker();
        let dispatcher = GaDispatcher::new(tracker.clone());
        let (cb, fired) = counting_callback();

        dispatcher
            .call_send(&Payload::from_json("exception", json!({})), cb)
            .unwrap();

        assert_eq!(tracker.commands()[0].to_json(), json!(["send", "exception"]));
        assert_eq!(tracker.complete_all(), 0);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_pageview_shape() {
        let tracker = capture_tracker();
        let dispatcher = GaDispatcher::new(tracker.clone());
        let cb = hit_callback(|| {});

        dispatcher.pageview(
            &PageviewPayload {
                title: Some("T".into()),
                url: Some("/x".into()),
            },
            cb.clone(),
        );

        let commands = tracker.commands();
        assert_eq!(commands.len(), 1);
        let expected = Command::send("pageview").arg(
            FieldsObject::with_callback(cb)
                .field("page", "/x")
                .field("title", "T"),
        );
        assert_eq!(commands[0], expected);
    }

    #[test]
    fn test_pageview_missing_fields_are_null() {
        let tracker = capture_tracker();
        let dispatcher = GaDispatcher::new(tracker.clone());

        dispatcher.pageview(&PageviewPayload::default(), hit_callback(|| {}));

        assert_eq!(
            tracker.commands()[0].to_json(),
            json!(["send", "pageview", { "page": null, "title": null, "hitCallback": "[function]" }])
        );
    }

    #[test]
    fn test_click_without_node_completes_immediately() {
        let tracker = capture_tracker();
        let dispatcher = GaDispatcher::new(tracker.clone());
        let (cb, fired) = counting_callback();

        dispatcher.click(&ClickPayload::default(), cb);

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn test_click_defaults_to_node_text() {
        let tracker = capture_tracker();
        let dispatcher = GaDispatcher::new(tracker.clone());
        let (cb, fired) = counting_callback();

        dispatcher.click(&click_payload(json!({}), Some("Buy")), cb.clone());

        let expected = Command::send("event")
            .arg("all")
            .arg("click")
            .arg("Buy")
            .arg(FieldsObject::with_callback(cb));
        assert_eq!(tracker.commands(), vec![expected]);
        // Completion is up to the library.
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        tracker.complete_all();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_click_empty_label_without_text() {
        let tracker = capture_tracker();
        let dispatcher = GaDispatcher::new(tracker.clone());

        dispatcher.click(&click_payload(json!({ "label": "" }), None), hit_callback(|| {}));

        assert_eq!(
            tracker.commands()[0].to_json(),
            json!(["send", "event", "all", "click", "", { "hitCallback": "[function]" }])
        );
    }

    #[test]
    fn test_click_model_with_value() {
        let tracker = capture_tracker();
        let dispatcher = GaDispatcher::new(tracker.clone());

        dispatcher.click(
            &click_payload(
                json!({ "category": "nav", "action": "tap", "label": "home", "value": 3 }),
                Some("ignored"),
            ),
            hit_callback(|| {}),
        );

        let args = &tracker.commands()[0].args;
        assert_eq!(args.len(), 7);
        assert_eq!(args[5], CommandArg::Value(json!(3)));
        assert!(args[6].as_fields().is_some());
    }

    #[test]
    fn test_click_drops_zero_value() {
        let tracker = capture_tracker();
        let dispatcher = GaDispatcher::new(tracker.clone());

        dispatcher.click(
            &click_payload(
                json!({ "category": "nav", "action": "tap", "label": "home", "value": 0 }),
                None,
            ),
            hit_callback(|| {}),
        );

        assert_eq!(
            tracker.commands()[0].to_json(),
            json!(["send", "event", "nav", "tap", "home", { "hitCallback": "[function]" }])
        );
    }
}
