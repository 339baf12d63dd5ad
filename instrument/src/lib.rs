//! Event capture for simulation tests.
//!
//! Installs a `tracing` subscriber that stores every info-level event as a
//! row of typed fields, grouped by event target. Tests drain the recorder
//! and assert on the captured rows.
//!
//! # Usage
//!
//! ```ignore
//! // In simulation code:
//! tracing::info!(target: "trade", tick, quantity, price);
//!
//! // In a test:
//! instrument::install_subscriber();
//! // ... run simulation ...
//! let recorder = instrument::drain();
//! for trade in recorder.events("trade") {
//!     assert!(trade.f64("quantity").unwrap() > 0.0);
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Record};
use tracing::{Event, Id, Metadata, Subscriber};

/// One recorded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    U64(u64),
    I64(i64),
    F64(f64),
    Bool(bool),
    Str(String),
}

impl FieldValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            FieldValue::U64(v) => Some(v as f64),
            FieldValue::I64(v) => Some(v as f64),
            FieldValue::F64(v) => Some(v),
            FieldValue::Bool(_) | FieldValue::Str(_) => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            FieldValue::U64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// One captured event: its fields in recorded order.
#[derive(Debug, Clone, Default)]
pub struct EventRow {
    fields: Vec<(String, FieldValue)>,
}

impl EventRow {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    pub fn u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(FieldValue::as_u64)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }
}

/// All rows captured on this thread, grouped by event target.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub rows: HashMap<String, Vec<EventRow>>,
}

impl Recorder {
    /// Rows recorded under a target; empty if the target never fired
    pub fn events(&self, target: &str) -> &[EventRow] {
        self.rows.get(target).map(Vec::as_slice).unwrap_or(&[])
    }
}

thread_local! {
    static RECORDER: RefCell<Recorder> = RefCell::default();
}

/// Visitor that copies event fields into a row.
struct RowVisitor<'a> {
    row: &'a mut EventRow,
}

impl Visit for RowVisitor<'_> {
    fn record_u64(&mut self, field: &Field, value: u64) {
        self.row
            .fields
            .push((field.name().to_string(), FieldValue::U64(value)));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.row
            .fields
            .push((field.name().to_string(), FieldValue::I64(value)));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.row
            .fields
            .push((field.name().to_string(), FieldValue::F64(value)));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.row
            .fields
            .push((field.name().to_string(), FieldValue::Bool(value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.row
            .fields
            .push((field.name().to_string(), FieldValue::Str(value.to_string())));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.row
            .fields
            .push((field.name().to_string(), FieldValue::Str(format!("{value:?}"))));
    }
}

/// Tracing subscriber that collects info-level events into the thread-local
/// recorder.
pub struct EventRecorder;

impl Subscriber for EventRecorder {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        // Only collect info-level events (not spans, not debug/trace)
        metadata.is_event() && *metadata.level() <= tracing::Level::INFO
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        // Spans aren't tracked, just return a dummy ID
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let target = event.metadata().target().to_string();

        let mut row = EventRow::default();
        event.record(&mut RowVisitor { row: &mut row });

        RECORDER.with(|r| {
            r.borrow_mut().rows.entry(target).or_default().push(row);
        });
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Install the EventRecorder as the global default.
/// Call this once at the start of a test; repeated calls are harmless.
pub fn install_subscriber() {
    let _ = tracing::subscriber::set_global_default(EventRecorder);
}

/// Drain all rows recorded on this thread, leaving the recorder empty.
pub fn drain() -> Recorder {
    RECORDER.with(|r| std::mem::take(&mut *r.borrow_mut()))
}

/// Discard all rows recorded on this thread.
pub fn clear() {
    RECORDER.with(|r| *r.borrow_mut() = Recorder::default());
}
