//! Printer model
//!
//! A printer owns a FIFO queue of jobs and prints the head job at a fixed
//! sheet rate. Progress on the head job is derived from the simulated time
//! elapsed since it started, so `update` can be called every tick without
//! accumulating error.
//!
//! # State Machine
//!
//! ```text
//! Idle ──enqueue on empty queue──▶ Printing
//! Printing ──head completes, queue non-empty──▶ Printing (next job starts same tick)
//! Printing ──head completes, queue empty──▶ Idle
//! ```
//!
//! # Critical Invariants
//!
//! 1. `total_pages_remaining - pages_printed` equals the remaining pages of
//!    every queued job (head job counted net of its progress)
//! 2. `pages_printed <= head.pages()`
//! 3. `printing` iff the queue is non-empty and the head job has started

use crate::models::event::Event;
use crate::models::job::Job;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Default sheet rate of every printer
pub const DEFAULT_SHEETS_PER_MINUTE: u32 = 7;

const MILLISECONDS_PER_MINUTE: u64 = 60_000;

/// Errors raised when page accounting would leave its valid range
#[derive(Debug, Error, PartialEq)]
pub enum PrinterError {
    #[error("Printer {printer_id}: adding {pages} pages to {total} overflows the page counter")]
    PageCountOverflow {
        printer_id: usize,
        pages: u32,
        total: u32,
    },

    #[error("Printer {printer_id}: completing job {job_id} ({pages} pages) exceeds remaining total {total}")]
    PageAccountingUnderflow {
        printer_id: usize,
        job_id: usize,
        pages: u32,
        total: u32,
    },
}

/// Milliseconds needed to print one sheet at the given rate
///
/// # Example
/// ```
/// use printer_queue_core::models::printer::milliseconds_per_sheet;
///
/// assert_eq!(milliseconds_per_sheet(7), 8_571);
/// ```
pub fn milliseconds_per_sheet(sheets_per_minute: u32) -> u64 {
    MILLISECONDS_PER_MINUTE / u64::from(sheets_per_minute)
}

/// A printer with its own job queue
///
/// # Example
/// ```
/// use printer_queue_core::{Job, Printer};
///
/// let mut printer = Printer::new(0, 7);
/// let events = printer.enqueue(Job::new(0, 2), 0).unwrap();
/// assert_eq!(events.len(), 2); // queued + started
/// assert!(printer.is_printing());
///
/// printer.update(8_571).unwrap();
/// assert_eq!(printer.pages_left(), 1);
/// assert_eq!(printer.total_pages_remaining(), 1);
///
/// let events = printer.update(17_142).unwrap();
/// assert_eq!(events.len(), 1); // completed
/// assert!(printer.has_no_jobs());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Printer {
    id: usize,

    queue: VecDeque<Job>,

    /// Simulated time the head job started printing (ms since epoch)
    print_start_ms: u64,

    /// Pages printed of the head job only
    pages_printed: u32,

    /// Pages of every queued job, head job counted in full until it completes
    total_pages_remaining: u32,

    printing: bool,

    ms_per_sheet: u64,
}

impl Printer {
    /// Create an idle printer
    ///
    /// # Panics
    /// Panics if `sheets_per_minute` is zero or faster than one sheet per
    /// millisecond
    pub fn new(id: usize, sheets_per_minute: u32) -> Self {
        assert!(
            sheets_per_minute > 0 && u64::from(sheets_per_minute) <= MILLISECONDS_PER_MINUTE,
            "sheets_per_minute must be in 1..=60000"
        );
        Self {
            id,
            queue: VecDeque::new(),
            print_start_ms: 0,
            pages_printed: 0,
            total_pages_remaining: 0,
            printing: false,
            ms_per_sheet: milliseconds_per_sheet(sheets_per_minute),
        }
    }

    /// Recompute progress on the head job and complete it if done
    ///
    /// Returns the completion event and, when another job is waiting, the
    /// start event of that job. No-op on an empty queue.
    pub fn update(&mut self, now_ms: u64) -> Result<Vec<Event>, PrinterError> {
        let head = match self.queue.front() {
            Some(job) => *job,
            None => return Ok(Vec::new()),
        };

        let elapsed = now_ms.saturating_sub(self.print_start_ms);
        let printed = (elapsed / self.ms_per_sheet).min(u64::from(head.pages()));
        self.pages_printed = printed as u32;

        if self.pages_printed < head.pages() {
            return Ok(Vec::new());
        }

        self.total_pages_remaining = self
            .total_pages_remaining
            .checked_sub(head.pages())
            .ok_or(PrinterError::PageAccountingUnderflow {
                printer_id: self.id,
                job_id: head.id(),
                pages: head.pages(),
                total: self.total_pages_remaining,
            })?;
        self.queue.pop_front();
        self.printing = false;
        self.pages_printed = 0;

        let mut events = vec![Event::JobCompleted {
            time_ms: now_ms,
            printer_id: self.id,
            job_id: head.id(),
            pages: head.pages(),
        }];
        events.extend(self.start_next_if_idle(now_ms));
        Ok(events)
    }

    /// Pages still to print on the head job
    pub fn pages_left(&self) -> u32 {
        match self.queue.front() {
            Some(head) => head.pages() - self.pages_printed,
            None => 0,
        }
    }

    /// Start the head job if one is waiting and nothing is printing
    pub fn start_next_if_idle(&mut self, now_ms: u64) -> Option<Event> {
        if self.printing {
            return None;
        }
        let head = self.queue.front()?;

        self.print_start_ms = now_ms;
        self.printing = true;
        Some(Event::JobStarted {
            time_ms: now_ms,
            printer_id: self.id,
            job_id: head.id(),
            pages: head.pages(),
        })
    }

    /// Append a job to the queue
    ///
    /// A job landing on an empty queue starts printing immediately.
    pub fn enqueue(&mut self, job: Job, now_ms: u64) -> Result<Vec<Event>, PrinterError> {
        self.total_pages_remaining = self
            .total_pages_remaining
            .checked_add(job.pages())
            .ok_or(PrinterError::PageCountOverflow {
                printer_id: self.id,
                pages: job.pages(),
                total: self.total_pages_remaining,
            })?;
        self.queue.push_back(job);

        let mut events = vec![Event::JobQueued {
            time_ms: now_ms,
            printer_id: self.id,
            job_id: job.id(),
            pages: job.pages(),
        }];
        if self.queue.len() == 1 {
            events.extend(self.start_next_if_idle(now_ms));
        }
        Ok(events)
    }

    /// Pages left across the whole queue, net of progress on the head job
    pub fn total_pages_remaining(&self) -> u32 {
        if self.queue.is_empty() {
            return 0;
        }
        self.total_pages_remaining - self.pages_printed
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> String {
        format!("Printer {}", self.id)
    }

    pub fn is_printing(&self) -> bool {
        self.printing
    }

    pub fn is_idle(&self) -> bool {
        !self.printing
    }

    pub fn has_no_jobs(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Pages printed of the head job
    pub fn pages_printed(&self) -> u32 {
        self.pages_printed
    }

    /// Start time of the head job while printing
    pub fn print_start_ms(&self) -> Option<u64> {
        self.printing.then_some(self.print_start_ms)
    }

    pub fn ms_per_sheet(&self) -> u64 {
        self.ms_per_sheet
    }

    /// Queue contents in print order; the queue itself is left untouched
    pub fn queued_jobs(&self) -> impl Iterator<Item = &Job> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_printer_is_idle() {
        let printer = Printer::new(3, DEFAULT_SHEETS_PER_MINUTE);
        assert_eq!(printer.id(), 3);
        assert_eq!(printer.name(), "Printer 3");
        assert!(printer.is_idle());
        assert!(printer.has_no_jobs());
        assert_eq!(printer.total_pages_remaining(), 0);
        assert_eq!(printer.pages_left(), 0);
        assert_eq!(printer.print_start_ms(), None);
    }

    #[test]
    #[should_panic(expected = "sheets_per_minute must be in 1..=60000")]
    fn test_zero_sheet_rate_panics() {
        Printer::new(0, 0);
    }

    #[test]
    fn test_update_on_empty_queue_is_noop() {
        let mut printer = Printer::new(0, 7);
        assert!(printer.update(1_000_000).unwrap().is_empty());
        assert!(printer.is_idle());
    }

    #[test]
    fn test_second_job_waits_behind_head() {
        let mut printer = Printer::new(0, 7);
        printer.enqueue(Job::new(0, 3), 0).unwrap();
        let events = printer.enqueue(Job::new(1, 4), 1_000).unwrap();

        assert_eq!(events.len(), 1, "only the queued event");
        assert_eq!(printer.queue_len(), 2);
        assert_eq!(printer.print_start_ms(), Some(0));
        assert_eq!(printer.total_pages_remaining(), 7);
    }

    #[test]
    fn test_completion_starts_next_job_same_tick() {
        let mut printer = Printer::new(0, 7);
        printer.enqueue(Job::new(0, 1), 0).unwrap();
        printer.enqueue(Job::new(1, 4), 0).unwrap();

        let events = printer.update(8_571).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "JobCompleted");
        assert_eq!(events[1].event_type(), "JobStarted");
        assert_eq!(events[1].job_id(), 1);
        assert!(printer.is_printing());
        assert_eq!(printer.print_start_ms(), Some(8_571));
        assert_eq!(printer.pages_printed(), 0);
        assert_eq!(printer.total_pages_remaining(), 4);
    }

    #[test]
    fn test_progress_clamped_to_head_pages() {
        let mut printer = Printer::new(0, 7);
        printer.enqueue(Job::new(0, 2), 0).unwrap();
        printer.enqueue(Job::new(1, 10), 0).unwrap();

        // Far past the head job's end: head completes, next job starts now
        printer.update(10_000_000).unwrap();
        assert_eq!(printer.queue_len(), 1);
        assert_eq!(printer.pages_left(), 10);
    }

    #[test]
    fn test_total_pages_overflow_is_reported() {
        let mut printer = Printer::new(0, 7);
        printer.enqueue(Job::new(0, u32::MAX), 0).unwrap();

        let err = printer.enqueue(Job::new(1, 1), 0).unwrap_err();
        assert_eq!(
            err,
            PrinterError::PageCountOverflow {
                printer_id: 0,
                pages: 1,
                total: u32::MAX,
            }
        );
        assert_eq!(printer.queue_len(), 1, "rejected job is not queued");
    }
}
