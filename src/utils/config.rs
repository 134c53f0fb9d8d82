//! Configuration and constants for the crate.

/// Sentinel used by the simulator when an event is not pinned to a
/// physical processor.
pub const CPU_ANY_SENTINEL: &str = "any";

/// Nested instruction kind marking a resource-acquire completion.
pub const INSTR_WAIT: &str = "wait";
