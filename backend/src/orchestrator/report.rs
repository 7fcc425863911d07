//! Final report - read-only snapshot of the printer pool
//!
//! Built from borrowed state after the last tick. Building a report never
//! touches a printer queue, so it can be taken at any point of a run.

use crate::core::time::format_time_of_day;
use crate::models::printer::Printer;
use crate::models::state::SimulationState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// End-of-run summary of the whole simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Simulated end time (ms since epoch)
    pub ended_at_ms: u64,

    /// Simulated end time as `HH:MM:SS`
    pub ended_at: String,

    pub jobs_created: usize,

    pub jobs_completed: usize,

    pub printers: Vec<PrinterReport>,
}

/// Remaining work of one printer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterReport {
    pub printer_id: usize,
    pub total_pages_remaining: u32,

    /// Queue contents in print order
    pub jobs: Vec<RemainingJob>,
}

/// One job still in a printer queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingJob {
    pub job_id: usize,
    pub pages: u32,

    /// Pages not yet printed; less than `pages` only for a partly printed head job
    pub remaining_pages: u32,
}

impl SimulationReport {
    pub fn from_state(state: &SimulationState, jobs_created: usize, jobs_completed: usize) -> Self {
        let ended_at_ms = state.clock().simulated_ms();
        Self {
            ended_at_ms,
            ended_at: format_time_of_day(ended_at_ms),
            jobs_created,
            jobs_completed,
            printers: state.printers().iter().map(PrinterReport::from).collect(),
        }
    }

    /// Pages left across all printers
    pub fn total_pages_remaining(&self) -> u64 {
        self.printers
            .iter()
            .map(|p| u64::from(p.total_pages_remaining))
            .sum()
    }
}

impl From<&Printer> for PrinterReport {
    fn from(printer: &Printer) -> Self {
        let jobs = printer
            .queued_jobs()
            .enumerate()
            .map(|(position, job)| RemainingJob {
                job_id: job.id(),
                pages: job.pages(),
                remaining_pages: if position == 0 {
                    printer.pages_left()
                } else {
                    job.pages()
                },
            })
            .collect();

        PrinterReport {
            printer_id: printer.id(),
            total_pages_remaining: printer.total_pages_remaining(),
            jobs,
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation ended at {}.", self.ended_at)?;
        writeln!(f, "Status of Printers:")?;
        for printer in &self.printers {
            writeln!(f, "{}", printer)?;
        }
        Ok(())
    }
}

impl fmt::Display for PrinterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Printer {} - Total pages left: {}, ",
            self.printer_id, self.total_pages_remaining
        )?;

        if self.jobs.is_empty() {
            return write!(f, "No jobs remaining.");
        }

        for (position, job) in self.jobs.iter().enumerate() {
            if position == 0 {
                write!(
                    f,
                    "Job {} ({} Pages, {} Remaining)",
                    job.job_id, job.pages, job.remaining_pages
                )?;
            } else {
                write!(f, ", Job {} ({} Pages)", job.job_id, job.pages)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    #[test]
    fn test_printer_report_lists_head_progress() {
        let mut printer = Printer::new(1, 7);
        printer.enqueue(Job::new(4, 10), 0).unwrap();
        printer.enqueue(Job::new(5, 3), 0).unwrap();
        printer.update(3 * 8_571).unwrap();

        let report = PrinterReport::from(&printer);

        assert_eq!(report.total_pages_remaining, 10);
        assert_eq!(report.jobs[0].remaining_pages, 7);
        assert_eq!(report.jobs[1].remaining_pages, 3);
        assert_eq!(
            report.to_string(),
            "Printer 1 - Total pages left: 10, Job 4 (10 Pages, 7 Remaining), Job 5 (3 Pages)"
        );
    }

    #[test]
    fn test_report_leaves_queue_untouched() {
        let mut printer = Printer::new(0, 7);
        printer.enqueue(Job::new(0, 5), 0).unwrap();
        printer.enqueue(Job::new(1, 5), 0).unwrap();

        let first = PrinterReport::from(&printer);
        let second = PrinterReport::from(&printer);

        assert_eq!(first, second);
        assert_eq!(printer.queue_len(), 2);
    }

    #[test]
    fn test_empty_printer_report() {
        let printer = Printer::new(2, 7);
        assert_eq!(
            PrinterReport::from(&printer).to_string(),
            "Printer 2 - Total pages left: 0, No jobs remaining."
        );
    }
}
