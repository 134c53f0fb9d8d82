//! In-memory analytical model built from a trace event sequence.
//!
//! This module transforms a parsed event sequence into:
//! - Cross-indexed per-task / per-CPU / per-resource / per-server views
//! - Reconstructed critical-section and execution-burst intervals
//! - A diagnostic summary for logging

pub mod context;
pub mod sections;
pub mod summary;

// Re-export main types
pub use context::{BudgetRecord, CpuRecord, EventId, ResourceRecord, TaskRecord, TraceContext};
pub use sections::{Burst, CriticalSection};
pub use summary::TraceSummary;
