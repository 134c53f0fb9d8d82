//! Trace document parsing and the event model.
//!
//! This module handles:
//! - Deserializing the raw JSON trace document
//! - Wrapping raw records as typed, validated events
//! - Tolerant numeric coercion (JSON numbers or decimal strings)

pub mod event;
pub mod raw;

// Re-export main types
pub use event::{Event, EventKind};
pub use raw::{load_trace_file, parse_document, RawEvent, TraceDocument};
