/*!
# Interaction Normalizer

Classifies raw chart-surface events (plotly `click`, `hover` and `relayout`
payloads) into one outward event model and keeps the x-axis viewport in sync.

Classification is ordered, first match wins:

| Raw signal | Result | Viewport |
|---|---|---|
| non-empty `points`, press | `Click` | unchanged |
| non-empty `points`, move | `Hover` | unchanged |
| non-empty `points`, other action | `Other` (raw) | unchanged |
| `xaxis.range[0]`/`[1]` or `xaxis.range` | `Zoom` | pinned |
| `xaxis.autorange: true` | `Autoscale` | reset |
| anything else | `Other` (raw) | unchanged |
*/

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::fmt;

use crate::error::Result;
use crate::viewport::ViewportState;

const RANGE_START_KEY: &str = "xaxis.range[0]";
const RANGE_END_KEY: &str = "xaxis.range[1]";
const RANGE_KEY: &str = "xaxis.range";
const AUTORANGE_KEY: &str = "xaxis.autorange";

/// Event object exactly as emitted by the rendering surface
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent(Value);

impl RawEvent {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(input)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    fn field(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|obj| obj.get(key))
    }
}

impl From<Value> for RawEvent {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Pointer action that produced a point selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    Press,
    Move,
    Unrecognized,
}

impl DeviceAction {
    fn from_dom_type(kind: Option<&str>) -> Self {
        match kind {
            Some("mousedown") | Some("click") | Some("pointerdown") => DeviceAction::Press,
            Some("mousemove") | Some("pointermove") => DeviceAction::Move,
            _ => DeviceAction::Unrecognized,
        }
    }
}

/// Identifying fields of the first selected point
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointPayload {
    pub name: Value,
    pub text: Value,
    pub x: Value,
    pub y: Value,
}

impl PointPayload {
    fn from_point(point: &Value) -> Self {
        let get = |key: &str| point.get(key).cloned().unwrap_or(Value::Null);
        Self {
            name: point
                .get("data")
                .and_then(|data| data.get("name"))
                .cloned()
                .unwrap_or(Value::Null),
            text: get("text"),
            x: get("x"),
            y: get("y"),
        }
    }
}

/// Recognized shape of a raw event
#[derive(Debug, Clone, PartialEq)]
pub enum RawSignal {
    PointSelection { action: DeviceAction, point: PointPayload },
    RangeBounds { x_start: f64, x_end: f64 },
    Autorange,
    Unrecognized,
}

/// Determine which signal a raw event carries, honoring the precedence
/// points, range bounds, autorange.
pub fn classify(raw: &RawEvent) -> RawSignal {
    if let Some(first) = raw
        .field("points")
        .and_then(Value::as_array)
        .and_then(|points| points.first())
    {
        let action = DeviceAction::from_dom_type(
            raw.field("event")
                .and_then(|event| event.get("type"))
                .and_then(Value::as_str),
        );
        return RawSignal::PointSelection {
            action,
            point: PointPayload::from_point(first),
        };
    }

    if let Some((x_start, x_end)) = range_bounds(raw) {
        return RawSignal::RangeBounds { x_start, x_end };
    }

    if raw.field(AUTORANGE_KEY) == Some(&Value::Bool(true)) {
        return RawSignal::Autorange;
    }

    RawSignal::Unrecognized
}

/// Paired keys win over the array form; a missing or non-numeric bound means
/// the event carries no usable range.
fn range_bounds(raw: &RawEvent) -> Option<(f64, f64)> {
    if raw.field(RANGE_START_KEY).is_some() || raw.field(RANGE_END_KEY).is_some() {
        return Some((
            raw.field(RANGE_START_KEY).and_then(as_bound)?,
            raw.field(RANGE_END_KEY).and_then(as_bound)?,
        ));
    }

    match raw.field(RANGE_KEY).and_then(Value::as_array).map(Vec::as_slice) {
        Some([start, end]) => Some((as_bound(start)?, as_bound(end)?)),
        _ => None,
    }
}

fn as_bound(value: &Value) -> Option<f64> {
    let bound = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    bound.is_finite().then_some(bound)
}

/// Whole-number bounds go out as JSON integers, the way the surface sent them.
fn bound_value(bound: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if bound.fract() == 0.0 && bound.abs() <= MAX_EXACT {
        json!(bound as i64)
    } else {
        json!(bound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    Hover,
    Zoom,
    Autoscale,
    Other,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::Click => "Click",
            EventType::Hover => "Hover",
            EventType::Zoom => "Zoom",
            EventType::Autoscale => "Autoscale",
            EventType::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Outward event published to the caller
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedEvent {
    Click(PointPayload),
    Hover(PointPayload),
    Zoom { x_start: f64, x_end: f64 },
    Autoscale,
    /// Unrecognized raw event, passed through verbatim
    Other(Value),
}

impl NormalizedEvent {
    pub fn from_signal(signal: RawSignal, raw: &RawEvent) -> Self {
        match signal {
            RawSignal::PointSelection { action: DeviceAction::Press, point } => NormalizedEvent::Click(point),
            RawSignal::PointSelection { action: DeviceAction::Move, point } => NormalizedEvent::Hover(point),
            RawSignal::RangeBounds { x_start, x_end } => NormalizedEvent::Zoom { x_start, x_end },
            RawSignal::Autorange => NormalizedEvent::Autoscale,
            RawSignal::PointSelection { action: DeviceAction::Unrecognized, .. } | RawSignal::Unrecognized => {
                NormalizedEvent::Other(raw.as_value().clone())
            }
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            NormalizedEvent::Click(_) => EventType::Click,
            NormalizedEvent::Hover(_) => EventType::Hover,
            NormalizedEvent::Zoom { .. } => EventType::Zoom,
            NormalizedEvent::Autoscale => EventType::Autoscale,
            NormalizedEvent::Other(_) => EventType::Other,
        }
    }

    /// Outward JSON payload, `{"eventType": ..., ...}` for recognized events
    pub fn to_value(&self) -> Value {
        match self {
            NormalizedEvent::Click(point) | NormalizedEvent::Hover(point) => {
                let mut obj = Map::new();
                obj.insert("eventType".into(), json!(self.event_type().to_string()));
                obj.insert("name".into(), point.name.clone());
                obj.insert("text".into(), point.text.clone());
                obj.insert("x".into(), point.x.clone());
                obj.insert("y".into(), point.y.clone());
                Value::Object(obj)
            }
            NormalizedEvent::Zoom { x_start, x_end } => json!({
                "eventType": "Zoom",
                "xStart": bound_value(*x_start),
                "xEnd": bound_value(*x_end),
            }),
            NormalizedEvent::Autoscale => json!({ "eventType": "Autoscale" }),
            NormalizedEvent::Other(raw) => raw.clone(),
        }
    }

    /// Apply the viewport side effect of this event.
    fn apply(&self, viewport: &mut ViewportState) {
        match self {
            NormalizedEvent::Zoom { x_start, x_end } => viewport.pin(*x_start, *x_end),
            NormalizedEvent::Autoscale => viewport.reset(),
            _ => {}
        }
    }
}

impl Serialize for NormalizedEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Receiver of normalized events
pub trait EventSink {
    fn notify(&mut self, event: &NormalizedEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&NormalizedEvent),
{
    fn notify(&mut self, event: &NormalizedEvent) {
        (self)(event)
    }
}

/// Stateless apart from the optional sink; the viewport is borrowed per event.
#[derive(Default)]
pub struct InteractionNormalizer {
    sink: Option<Box<dyn EventSink>>,
}

impl InteractionNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink<S: EventSink + 'static>(mut self, sink: S) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn set_sink<S: EventSink + 'static>(&mut self, sink: S) {
        self.sink = Some(Box::new(sink));
    }

    pub fn clear_sink(&mut self) {
        self.sink = None;
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Classify `raw`, update `viewport` for Zoom/Autoscale, then notify the sink.
    ///
    /// Never fails: anything unrecognized comes back as [`NormalizedEvent::Other`].
    pub fn handle(&mut self, viewport: &mut ViewportState, raw: &RawEvent) -> NormalizedEvent {
        let event = NormalizedEvent::from_signal(classify(raw), raw);
        event.apply(viewport);

        if let Some(sink) = self.sink.as_mut() {
            sink.notify(&event);
        }
        event
    }
}

impl fmt::Debug for InteractionNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionNormalizer")
            .field("has_sink", &self.has_sink())
            .finish()
    }
}
