//! Event model: a typed, validated view over one raw trace record.
//!
//! Construction eagerly validates `time` and `event_type`; every other
//! derived field is checked on access and fails with a typed error when the
//! backing raw field is absent or malformed. Events never mutate after
//! construction.

use crate::parser::raw::{coerce_i64, coerce_u64, RawEvent};
use crate::utils::config::{CPU_ANY_SENTINEL, INSTR_WAIT};
use crate::utils::error::EventError;
use serde_json::Value;
use std::fmt;

/// Semantic kind of a trace event (closed vocabulary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Arrival,
    EndInstance,
    DlineMiss,
    Scheduled,
    Descheduled,
    Signal,
    Wait,
    EndInstr,
    SystemCeilingChanged,
}

impl EventKind {
    /// Parse the simulator's `event_type` string
    ///
    /// Returns `None` for values outside the vocabulary.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "arrival" => Some(Self::Arrival),
            "end_instance" => Some(Self::EndInstance),
            "dline_miss" => Some(Self::DlineMiss),
            "scheduled" => Some(Self::Scheduled),
            "descheduled" => Some(Self::Descheduled),
            "signal" => Some(Self::Signal),
            "wait" => Some(Self::Wait),
            "end_instr" => Some(Self::EndInstr),
            "system_ceiling_changed" => Some(Self::SystemCeilingChanged),
            _ => None,
        }
    }

    /// Wire name of this kind, as emitted by the simulator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arrival => "arrival",
            Self::EndInstance => "end_instance",
            Self::DlineMiss => "dline_miss",
            Self::Scheduled => "scheduled",
            Self::Descheduled => "descheduled",
            Self::Signal => "signal",
            Self::Wait => "wait",
            Self::EndInstr => "end_instr",
            Self::SystemCeilingChanged => "system_ceiling_changed",
        }
    }

    /// True for kinds that belong to a task's lifecycle timeline
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::Arrival
                | Self::EndInstance
                | Self::Scheduled
                | Self::Descheduled
                | Self::DlineMiss
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, immutable wrapper over one raw trace record
///
/// **Public** - the unit every index in the trace context refers to
#[derive(Debug, Clone)]
pub struct Event {
    raw: RawEvent,
    time: u64,
    kind: EventKind,
    is_server_evt: bool,
}

impl Event {
    /// Wrap a raw record, validating the mandatory fields
    ///
    /// # Errors
    /// * `EventError::MalformedEvent` - `time` missing or not a
    ///   non-negative integer, or `event_type` missing
    /// * `EventError::InvalidEnumValue` - `event_type` outside the vocabulary
    pub fn new(raw: RawEvent) -> Result<Self, EventError> {
        let time = match &raw.time {
            Some(value) => coerce_u64(value).ok_or_else(|| {
                EventError::MalformedEvent(format!("non-integer `time`: {value}"))
            })?,
            None => return Err(EventError::MalformedEvent("missing `time`".to_string())),
        };

        let kind = match raw.event_type.as_deref() {
            Some(s) => EventKind::parse(s).ok_or_else(|| EventError::InvalidEnumValue {
                field: "event_type",
                value: s.to_string(),
            })?,
            None => {
                return Err(EventError::MalformedEvent(
                    "missing `event_type`".to_string(),
                ))
            }
        };

        let is_server_evt = raw.server_name.is_some();

        Ok(Self {
            raw,
            time,
            kind,
            is_server_evt,
        })
    }

    /// Simulation timestamp
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Semantic kind
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// True iff the record carries a server identity
    pub fn is_server_evt(&self) -> bool {
        self.is_server_evt
    }

    /// Identity this event belongs to: the server name when present,
    /// the plain task name otherwise
    ///
    /// # Errors
    /// * `EventError::MalformedEvent` - neither identity present
    pub fn task_name(&self) -> Result<&str, EventError> {
        self.raw
            .server_name
            .as_deref()
            .or(self.raw.task_name.as_deref())
            .ok_or_else(|| {
                EventError::MalformedEvent(
                    "event carries neither `task_name` nor `server_name`".to_string(),
                )
            })
    }

    /// True iff this is a resource-acquire completion: an `end_instr`
    /// whose nested instruction is `wait` (distinct from the blocking
    /// `wait` event itself)
    pub fn is_acquire_evt(&self) -> bool {
        self.kind == EventKind::EndInstr && self.raw.instr_type.as_deref() == Some(INSTR_WAIT)
    }

    /// Physical CPU this event is pinned to
    ///
    /// # Errors
    /// * `EventError::MissingField` - no `cpu_num` on the record
    /// * `EventError::InvalidEnumValue` - `cpu_num` is the "any" sentinel
    ///   (the event carries no single physical CPU) or not numeric
    pub fn cpu(&self) -> Result<u32, EventError> {
        let value = self
            .raw
            .cpu_num
            .as_ref()
            .ok_or(EventError::MissingField("cpu_num"))?;

        if value.as_str() == Some(CPU_ANY_SENTINEL) {
            return Err(invalid_value("cpu_num", value));
        }

        coerce_u64(value)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| invalid_value("cpu_num", value))
    }

    /// Resource identifier referenced by this event
    pub fn resource(&self) -> Result<&str, EventError> {
        self.raw
            .resource
            .as_deref()
            .ok_or(EventError::MissingField("resource"))
    }

    /// Remaining server budget carried by this event
    pub fn current_budget(&self) -> Result<i64, EventError> {
        let value = self
            .raw
            .current_budget
            .as_ref()
            .ok_or(EventError::MissingField("current_budget"))?;
        coerce_i64(value).ok_or_else(|| invalid_value("current_budget", value))
    }

    /// True iff the record carries a budget field
    pub fn has_current_budget(&self) -> bool {
        self.raw.current_budget.is_some()
    }

    /// Arrival time of the job this event belongs to
    pub fn arrival_time(&self) -> Result<u64, EventError> {
        let value = self
            .raw
            .arrival_time
            .as_ref()
            .ok_or(EventError::MissingField("arrival_time"))?;
        coerce_u64(value).ok_or_else(|| invalid_value("arrival_time", value))
    }

    /// New system ceiling carried by a `system_ceiling_changed` event
    pub fn ceiling(&self) -> Result<i64, EventError> {
        let value = self
            .raw
            .ceiling
            .as_ref()
            .ok_or(EventError::MissingField("ceiling"))?;
        coerce_i64(value).ok_or_else(|| invalid_value("ceiling", value))
    }
}

fn invalid_value(field: &'static str, value: &Value) -> EventError {
    EventError::InvalidEnumValue {
        field,
        value: value.to_string(),
    }
}
