//! Dispatcher - periodic job creation and routing
//!
//! Every `interval_ms` of simulated time the dispatcher synthesizes one job and
//! routes it to the printer chosen by its [`DispatchPolicy`]. The due time is a
//! running accumulator that advances by exactly one interval per job, so
//! coarse ticking delays a job but never shifts the schedule.

use crate::arrivals::JobFactory;
use crate::models::{Event, Job, Printer};
use crate::orchestrator::SimulationError;
use crate::policy::DispatchPolicy;
use crate::rng::RngManager;
use std::fmt;

/// A job that was created and routed this tick
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub job: Job,

    /// Index of the receiving printer in the pool
    pub printer_index: usize,

    /// Created, queued and (if the printer was idle) started events, in order
    pub events: Vec<Event>,
}

pub struct Dispatcher {
    /// Due time of the most recent job; the next one is one interval later
    schedule_anchor_ms: u64,
    interval_ms: u64,
    factory: JobFactory,
    policy: Box<dyn DispatchPolicy>,
}

impl Dispatcher {
    /// Create a dispatcher whose first job is due one interval after `start_ms`
    ///
    /// # Panics
    /// Panics if `interval_ms` is zero
    pub fn new(
        start_ms: u64,
        interval_ms: u64,
        factory: JobFactory,
        policy: Box<dyn DispatchPolicy>,
    ) -> Self {
        assert!(interval_ms > 0, "interval_ms must be positive");
        Self {
            schedule_anchor_ms: start_ms,
            interval_ms,
            factory,
            policy,
        }
    }

    /// Create and route at most one job if one is due at `now_ms`
    pub fn tick(
        &mut self,
        now_ms: u64,
        printers: &mut [Printer],
        rng: &mut RngManager,
    ) -> Result<Option<Dispatch>, SimulationError> {
        if now_ms.saturating_sub(self.schedule_anchor_ms) < self.interval_ms {
            return Ok(None);
        }
        self.schedule_anchor_ms += self.interval_ms;

        let job = self.factory.create(rng);
        let mut events = vec![Event::JobCreated {
            time_ms: now_ms,
            job_id: job.id(),
            pages: job.pages(),
        }];

        let printer_index = self.policy.select_printer(printers).ok_or_else(|| {
            SimulationError::InternalInvariantViolation(format!(
                "{} policy found no printer for job {}",
                self.policy.name(),
                job.id()
            ))
        })?;
        let printer = printers.get_mut(printer_index).ok_or_else(|| {
            SimulationError::InternalInvariantViolation(format!(
                "printer index {} out of range",
                printer_index
            ))
        })?;
        events.extend(printer.enqueue(job, now_ms)?);

        Ok(Some(Dispatch {
            job,
            printer_index,
            events,
        }))
    }

    /// Simulated time the next job is due
    pub fn next_job_due_ms(&self) -> u64 {
        self.schedule_anchor_ms + self.interval_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn jobs_created(&self) -> usize {
        self.factory.jobs_created()
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("next_job_due_ms", &self.next_job_due_ms())
            .field("interval_ms", &self.interval_ms)
            .field("jobs_created", &self.jobs_created())
            .field("policy", &self.policy.name())
            .finish()
    }
}
