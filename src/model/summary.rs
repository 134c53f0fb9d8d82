//! Diagnostic summary of a built trace context.

use crate::model::context::TraceContext;
use serde::Serialize;
use std::fmt;

/// Compact description of a trace: event count plus the sorted key sets
/// of every index
///
/// **Public** - the only textual output of the core; suitable for
/// diagnostic logging
#[derive(Debug, Clone, Serialize)]
pub struct TraceSummary {
    pub events_count: usize,
    pub tasks: Vec<String>,
    pub budget_servers: Vec<String>,
    pub resources: Vec<String>,
    pub cpus: Vec<u32>,
}

impl TraceContext {
    /// Summarize this context
    pub fn describe(&self) -> TraceSummary {
        TraceSummary {
            events_count: self.events().len(),
            tasks: self.tasks().keys().cloned().collect(),
            budget_servers: self.budget_servers().keys().cloned().collect(),
            resources: self.resources().keys().cloned().collect(),
            cpus: self.cpus().keys().copied().collect(),
        }
    }
}

impl fmt::Display for TraceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
