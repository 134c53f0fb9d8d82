//! Interval reconstruction over a built trace context.
//!
//! Two per-task walks produce the intervals a timeline renderer draws:
//! - critical sections, reconstructed from the resource-event list with a
//!   LIFO lock stack (innermost lock must be released first)
//! - execution bursts, reconstructed from the lifecycle list by pairing
//!   `scheduled` with the next `descheduled`/`end_instance` on the same CPU
//!
//! The nesting walk doubles as the trace-consistency check run at
//! construction time; burst pairing is checked only on demand.

use crate::model::context::TraceContext;
use crate::parser::event::EventKind;
use crate::utils::error::TraceError;

/// A critical section held by one task on one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalSection {
    pub resource: String,

    /// Time of the acquire completion
    pub start: u64,

    /// Time of the matching signal; `None` when the lock is still held at
    /// trace end (the renderer extends it to `end_time`)
    pub end: Option<u64>,
}

/// A contiguous interval during which a task occupies one CPU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Burst {
    pub cpu: u32,
    pub start: u64,

    /// `None` when the task is still running at trace end
    pub end: Option<u64>,
}

impl TraceContext {
    /// Reconstruct the critical sections of one task, ordered by
    /// acquisition time
    ///
    /// **Public** - consumed by the presentation layer; also the
    /// construction-time nesting check
    ///
    /// An unknown task name yields an empty list.
    ///
    /// # Errors
    /// * `TraceError::CriticalSectionViolation` - a signal with no open
    ///   acquisition, or whose resource does not match the innermost one
    pub fn critical_sections(&self, task_name: &str) -> Result<Vec<CriticalSection>, TraceError> {
        let Some(record) = self.task(task_name) else {
            return Ok(Vec::new());
        };

        // stack of held (acquire time, resource)
        let mut stack: Vec<(u64, &str)> = Vec::new();
        let mut sections = Vec::new();

        for &id in &record.res_events {
            let evt = self.event(id);
            if evt.is_acquire_evt() {
                stack.push((evt.time(), evt.resource()?));
            } else if evt.kind() == EventKind::Signal {
                let signaled = evt.resource()?;
                let Some((start, held)) = stack.pop() else {
                    return Err(TraceError::CriticalSectionViolation {
                        task: task_name.to_string(),
                        time: evt.time(),
                        reason: format!("signal on `{signaled}` with no open acquisition"),
                    });
                };
                if held != signaled {
                    return Err(TraceError::CriticalSectionViolation {
                        task: task_name.to_string(),
                        time: evt.time(),
                        reason: format!(
                            "signal on `{signaled}` does not match innermost held resource `{held}`"
                        ),
                    });
                }
                sections.push(CriticalSection {
                    resource: held.to_string(),
                    start,
                    end: Some(evt.time()),
                });
            }
            // `wait` marks blocking, not possession
        }

        // locks still held when the trace ends stay open
        for (start, resource) in stack {
            sections.push(CriticalSection {
                resource: resource.to_string(),
                start,
                end: None,
            });
        }

        sections.sort_by_key(|s| s.start);
        Ok(sections)
    }

    /// Check critical-section nesting for every task
    ///
    /// Runs as the last step of construction; exposed for callers that
    /// build contexts through [`TraceContext::from_events`] indirectly.
    pub fn validate_critical_sections(&self) -> Result<(), TraceError> {
        for name in self.tasks().keys() {
            self.critical_sections(name)?;
        }
        Ok(())
    }

    /// Reconstruct the execution bursts of one task
    ///
    /// **Public** - consumed by the presentation layer
    ///
    /// An unknown task name yields an empty list.
    ///
    /// # Errors
    /// * `TraceError::BurstViolation` - `scheduled` while already running,
    ///   a closing event with no open burst, or a CPU mismatch between the
    ///   two ends of a burst
    pub fn exec_bursts(&self, task_name: &str) -> Result<Vec<Burst>, TraceError> {
        let Some(record) = self.task(task_name) else {
            return Ok(Vec::new());
        };

        let mut open: Option<(u64, u32)> = None;
        let mut bursts = Vec::new();

        for &id in &record.exec_events {
            let evt = self.event(id);
            match evt.kind() {
                EventKind::Scheduled => {
                    if let Some((start, cpu)) = open {
                        return Err(TraceError::BurstViolation {
                            task: task_name.to_string(),
                            time: evt.time(),
                            reason: format!(
                                "scheduled while already running on cpu {cpu} since {start}"
                            ),
                        });
                    }
                    open = Some((evt.time(), evt.cpu()?));
                }
                EventKind::Descheduled | EventKind::EndInstance => {
                    let Some((start, cpu)) = open.take() else {
                        return Err(TraceError::BurstViolation {
                            task: task_name.to_string(),
                            time: evt.time(),
                            reason: format!("{} with no open burst", evt.kind()),
                        });
                    };
                    let end_cpu = evt.cpu()?;
                    if end_cpu != cpu {
                        return Err(TraceError::BurstViolation {
                            task: task_name.to_string(),
                            time: evt.time(),
                            reason: format!(
                                "burst started on cpu {cpu} but closed on cpu {end_cpu}"
                            ),
                        });
                    }
                    bursts.push(Burst {
                        cpu,
                        start,
                        end: Some(evt.time()),
                    });
                }
                // arrival and dline_miss do not affect pairing
                _ => {}
            }
        }

        if let Some((start, cpu)) = open {
            bursts.push(Burst {
                cpu,
                start,
                end: None,
            });
        }

        Ok(bursts)
    }
}
