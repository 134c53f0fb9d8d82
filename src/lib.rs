//! Schedtrace
//!
//! Trace indexing and timeline model construction for real-time
//! scheduling simulator traces.
//!
//! The simulator emits a JSON document of timestamped scheduling events:
//! task arrivals, CPU dispatch and preemption, deadline misses, resource
//! wait/acquire/signal, budget updates, and system-ceiling changes. This
//! crate builds the read-only analytical model a timeline renderer
//! consumes: events grouped and cross-indexed by task, CPU, resource, and
//! budget server, with critical-section nesting validated up front.
//!
//! ```no_run
//! use schedtrace::model::TraceContext;
//! use schedtrace::parser::load_trace_file;
//!
//! # fn main() -> anyhow::Result<()> {
//! let events = load_trace_file("trace.json")?;
//! let ctx = TraceContext::from_raw_events(events)?;
//! println!("{}", ctx.describe());
//! # Ok(())
//! # }
//! ```

pub mod model;
pub mod parser;
pub mod utils;
