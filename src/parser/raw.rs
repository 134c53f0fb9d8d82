//! Raw trace document schema and loading.
//!
//! The simulator writes a single JSON document with a top-level `events`
//! array. Fields on individual records vary by event kind, so everything
//! below `time` is optional at this layer; presence is validated by the
//! [`Event`](super::event::Event) wrapper when a field is actually needed.

use crate::utils::error::ParseError;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Top-level trace document produced by the simulator
///
/// Any other top-level fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceDocument {
    /// Event records in emission order (chronological, not re-sorted)
    pub events: Vec<RawEvent>,
}

/// One loosely-typed event record from the trace document
///
/// Numeric fields may arrive as JSON numbers or decimal strings; both are
/// accepted (see [`coerce_u64`]/[`coerce_i64`]).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    /// Simulation timestamp
    #[serde(default)]
    pub time: Option<Value>,

    /// Semantic event kind
    #[serde(default)]
    pub event_type: Option<String>,

    /// Plain task identity
    #[serde(default)]
    pub task_name: Option<String>,

    /// Server identity; takes precedence over `task_name`
    #[serde(default)]
    pub server_name: Option<String>,

    /// CPU number, or the literal sentinel "any"
    #[serde(default)]
    pub cpu_num: Option<Value>,

    /// Nested instruction kind for `end_instr` events
    #[serde(default)]
    pub instr_type: Option<String>,

    /// Resource identifier for wait/signal/acquire events
    #[serde(default)]
    pub resource: Option<String>,

    /// Remaining budget, present on budget-server events
    #[serde(default)]
    pub current_budget: Option<Value>,

    /// Arrival time of the job this event belongs to
    #[serde(default)]
    pub arrival_time: Option<Value>,

    /// New ceiling value for `system_ceiling_changed` events
    #[serde(default)]
    pub ceiling: Option<Value>,
}

/// Parse a trace document from a JSON string
///
/// **Public** - main entry point for in-memory documents
///
/// # Errors
/// * `ParseError::JsonError` - invalid JSON or missing `events` array
pub fn parse_document(input: &str) -> Result<Vec<RawEvent>, ParseError> {
    let doc: TraceDocument = serde_json::from_str(input)?;
    debug!("Parsed trace document with {} events", doc.events.len());
    Ok(doc.events)
}

/// Load a trace document from a file
///
/// **Public** - entry point used by the CLI driver (one document per call)
///
/// # Errors
/// * `ParseError::IoError` - file cannot be opened or read
/// * `ParseError::JsonError` - invalid JSON or missing `events` array
pub fn load_trace_file(path: impl AsRef<Path>) -> Result<Vec<RawEvent>, ParseError> {
    let path = path.as_ref();
    debug!("Loading trace file: {}", path.display());

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let doc: TraceDocument = serde_json::from_reader(reader)?;

    debug!("Loaded {} events from {}", doc.events.len(), path.display());
    Ok(doc.events)
}

/// Coerce a JSON value to u64, accepting numbers and decimal strings
pub(crate) fn coerce_u64(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        Some(n)
    } else if let Some(s) = value.as_str() {
        s.parse().ok()
    } else {
        None
    }
}

/// Coerce a JSON value to i64, accepting numbers and decimal strings
pub(crate) fn coerce_i64(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        Some(n)
    } else if let Some(s) = value.as_str() {
        s.parse().ok()
    } else {
        None
    }
}
