//! Error types for the entire crate.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs.

use thiserror::Error;

/// Errors that can occur while loading a trace document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur while interpreting a single trace event
#[derive(Error, Debug)]
pub enum EventError {
    /// The record itself is unusable: no interpretable `time`, no
    /// `event_type`, or no task/server identity where one is required.
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    /// A derived accessor was invoked on an event lacking the backing field.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A field holds a value outside its expected domain (e.g. `cpu_num`
    /// is the "any" sentinel where a concrete CPU is demanded).
    #[error("invalid value for field `{field}`: {value}")]
    InvalidEnumValue { field: &'static str, value: String },
}

/// Errors that can occur while building or validating a trace context
#[derive(Error, Debug)]
pub enum TraceError {
    #[error(transparent)]
    Event(#[from] EventError),

    /// An unmatched or mis-nested `signal` found while reconstructing a
    /// task's critical-section stack.
    #[error("critical-section violation for task `{task}` at time {time}: {reason}")]
    CriticalSectionViolation {
        task: String,
        time: u64,
        reason: String,
    },

    /// A `scheduled`/`descheduled` pair that does not form a well-formed
    /// execution burst.
    #[error("burst pairing violation for task `{task}` at time {time}: {reason}")]
    BurstViolation {
        task: String,
        time: u64,
        reason: String,
    },
}
