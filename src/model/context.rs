//! Trace context: the cross-indexed model built from one event sequence.
//!
//! A context is built exactly once from the complete, chronologically
//! ordered event list of a trace, in a single forward pass, and is
//! read-only afterwards. Every index refers to events by [`EventId`], so
//! one event may appear in several indices without aliasing.

use crate::parser::event::{Event, EventKind};
use crate::parser::raw::RawEvent;
use crate::utils::error::TraceError;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Handle to an event owned by a [`TraceContext`]
///
/// Dense index into the context's event list; valid only for the context
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(pub(crate) usize);

/// Per-task view of the trace
#[derive(Debug, Clone, Default)]
pub struct TaskRecord {
    /// Lifecycle events (arrival, end_instance, scheduled, descheduled,
    /// dline_miss) in emission order
    pub exec_events: Vec<EventId>,

    /// Resource events (wait, signal, acquire-completion) in emission order
    pub res_events: Vec<EventId>,

    /// Sorted identifiers of every resource the task ever references
    pub resources: Vec<String>,
}

/// Per-resource view: signal and acquire-completion events
#[derive(Debug, Clone, Default)]
pub struct ResourceRecord {
    pub events: Vec<EventId>,
}

/// Per-CPU view: scheduled and descheduled events
#[derive(Debug, Clone, Default)]
pub struct CpuRecord {
    pub events: Vec<EventId>,
}

/// Per-server view: budget-carrying events in emission order
#[derive(Debug, Clone, Default)]
pub struct BudgetRecord {
    pub budget_events: Vec<EventId>,
}

/// The fully indexed model of one trace
///
/// **Public** - the read-only surface consumed by the presentation layer.
/// All maps are `BTreeMap`/`BTreeSet`, so key iteration order is sorted and
/// deterministic regardless of the order events arrived in.
#[derive(Debug, Clone)]
pub struct TraceContext {
    events: Vec<Event>,
    tasks: BTreeMap<String, TaskRecord>,
    servers: BTreeSet<String>,
    budget_servers: BTreeMap<String, BudgetRecord>,
    resources: BTreeMap<String, ResourceRecord>,
    cpus: BTreeMap<u32, CpuRecord>,
    // TODO: for mrtp, this may become one list per cpu, keyed in `cpus`
    system_ceiling_events: Vec<EventId>,
    end_time: u64,
}

impl TraceContext {
    /// Build a context from raw records
    ///
    /// **Public** - main entry point
    ///
    /// Wraps each record as an [`Event`] and indexes it. Fail-fast: a single
    /// malformed record aborts the whole build and no partial context is
    /// returned. Critical-section nesting is validated before returning.
    ///
    /// # Errors
    /// * `TraceError::Event` - a record is malformed or lacks a field its
    ///   kind requires (concrete CPU, resource, identity)
    /// * `TraceError::CriticalSectionViolation` - a task signals a resource
    ///   it does not hold innermost
    pub fn from_raw_events(raw_events: Vec<RawEvent>) -> Result<Self, TraceError> {
        let mut events = Vec::with_capacity(raw_events.len());
        for raw in raw_events {
            events.push(Event::new(raw)?);
        }
        Self::from_events(events)
    }

    /// Build a context from already-wrapped events
    pub fn from_events(events: Vec<Event>) -> Result<Self, TraceError> {
        let mut builder = ContextBuilder::default();
        for (index, event) in events.iter().enumerate() {
            builder.inspect_event(EventId(index), event)?;
        }

        let ctx = builder.finish(events);
        ctx.validate_critical_sections()?;

        debug!(
            "Built trace context: {} events, {} tasks, {} resources, {} cpus, end_time {}",
            ctx.events.len(),
            ctx.tasks.len(),
            ctx.resources.len(),
            ctx.cpus.len(),
            ctx.end_time
        );
        Ok(ctx)
    }

    /// All events of the trace, in emission order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Resolve an id handed out by one of the indices
    pub fn event(&self, id: EventId) -> &Event {
        &self.events[id.0]
    }

    /// Resolve a list of ids into events, preserving order
    pub fn events_by_id<'a>(
        &'a self,
        ids: &'a [EventId],
    ) -> impl Iterator<Item = &'a Event> + 'a {
        ids.iter().map(move |&id| self.event(id))
    }

    /// Per-task indices, keyed by task name in sorted order
    pub fn tasks(&self) -> &BTreeMap<String, TaskRecord> {
        &self.tasks
    }

    /// Look up one task's record
    pub fn task(&self, name: &str) -> Option<&TaskRecord> {
        self.tasks.get(name)
    }

    /// Names that ever appeared with a server identity
    pub fn servers(&self) -> &BTreeSet<String> {
        &self.servers
    }

    /// True iff `name` is a server identity in this trace
    pub fn is_server(&self, name: &str) -> bool {
        self.servers.contains(name)
    }

    /// Per-server budget events, keyed by name in sorted order
    pub fn budget_servers(&self) -> &BTreeMap<String, BudgetRecord> {
        &self.budget_servers
    }

    /// Per-resource indices, keyed by identifier in sorted order
    pub fn resources(&self) -> &BTreeMap<String, ResourceRecord> {
        &self.resources
    }

    /// Per-CPU indices, keyed by CPU number in ascending order
    pub fn cpus(&self) -> &BTreeMap<u32, CpuRecord> {
        &self.cpus
    }

    /// Global ceiling-change events, in emission order
    pub fn system_ceiling_events(&self) -> &[EventId] {
        &self.system_ceiling_events
    }

    /// Maximum timestamp observed across all events (0 for an empty trace)
    ///
    /// The presentation layer uses this to close any still-open interval.
    pub fn end_time(&self) -> u64 {
        self.end_time
    }
}

/// Per-task accumulator used during the scanning pass
///
/// The resource set stays a `BTreeSet` while scanning and is frozen to a
/// sorted `Vec` in [`ContextBuilder::finish`].
#[derive(Default)]
struct TaskBuilder {
    exec_events: Vec<EventId>,
    res_events: Vec<EventId>,
    resources: BTreeSet<String>,
}

/// Mutable accumulator local to the construction pass
///
/// Get-or-create semantics (`entry().or_default()`) exist only here; the
/// finished [`TraceContext`] exposes read-only maps.
#[derive(Default)]
struct ContextBuilder {
    tasks: BTreeMap<String, TaskBuilder>,
    servers: BTreeSet<String>,
    budget_servers: BTreeMap<String, BudgetRecord>,
    resources: BTreeMap<String, ResourceRecord>,
    cpus: BTreeMap<u32, CpuRecord>,
    system_ceiling_events: Vec<EventId>,
    end_time: u64,
}

impl ContextBuilder {
    /// Dispatch one event into every index it belongs to
    fn inspect_event(&mut self, id: EventId, evt: &Event) -> Result<(), TraceError> {
        self.end_time = self.end_time.max(evt.time());
        let kind = evt.kind();

        if kind.is_lifecycle() {
            self.task_entry(evt.task_name()?).exec_events.push(id);
        }

        if matches!(kind, EventKind::Scheduled | EventKind::Descheduled) {
            self.cpus.entry(evt.cpu()?).or_default().events.push(id);
        }

        let is_acquire = evt.is_acquire_evt();
        if kind == EventKind::Signal || is_acquire {
            self.resources
                .entry(evt.resource()?.to_string())
                .or_default()
                .events
                .push(id);
        }

        if kind == EventKind::Wait || kind == EventKind::Signal || is_acquire {
            let resource = evt.resource()?.to_string();
            let task = self.task_entry(evt.task_name()?);
            task.res_events.push(id);
            task.resources.insert(resource);
        }

        if kind == EventKind::SystemCeilingChanged {
            self.system_ceiling_events.push(id);
        }

        if evt.is_server_evt() {
            self.servers.insert(evt.task_name()?.to_string());
        }

        if evt.has_current_budget() {
            self.budget_servers
                .entry(evt.task_name()?.to_string())
                .or_default()
                .budget_events
                .push(id);
        }

        Ok(())
    }

    fn task_entry(&mut self, name: &str) -> &mut TaskBuilder {
        self.tasks.entry(name.to_string()).or_default()
    }

    /// Seal the accumulators into the immutable context
    fn finish(self, events: Vec<Event>) -> TraceContext {
        let tasks = self
            .tasks
            .into_iter()
            .map(|(name, t)| {
                (
                    name,
                    TaskRecord {
                        exec_events: t.exec_events,
                        res_events: t.res_events,
                        resources: t.resources.into_iter().collect(),
                    },
                )
            })
            .collect();

        TraceContext {
            events,
            tasks,
            servers: self.servers,
            budget_servers: self.budget_servers,
            resources: self.resources,
            cpus: self.cpus,
            system_ceiling_events: self.system_ceiling_events,
            end_time: self.end_time,
        }
    }
}
