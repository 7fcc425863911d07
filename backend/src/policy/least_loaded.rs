//! Least-loaded dispatch
//!
//! Approximates shortest-remaining-work load balancing across the pool.
//!
//! # Behavior
//!
//! - Scan printers in index order
//! - The first printer with an empty queue wins immediately
//! - Otherwise keep the printer with the strictly smallest
//!   `total_pages_remaining()`; on ties the lower index stays selected

use super::DispatchPolicy;
use crate::models::Printer;

/// Least-loaded policy: idle printers first, then fewest remaining pages
///
/// # Example
///
/// ```
/// use printer_queue_core::policy::{DispatchPolicy, LeastLoadedPolicy};
/// use printer_queue_core::{Job, Printer};
///
/// let mut printers: Vec<Printer> = (0..3).map(|id| Printer::new(id, 7)).collect();
/// printers[0].enqueue(Job::new(0, 40), 0).unwrap();
/// printers[1].enqueue(Job::new(1, 10), 0).unwrap();
/// printers[2].enqueue(Job::new(2, 10), 0).unwrap();
///
/// // Printers 1 and 2 tie; the lower index is kept
/// assert_eq!(LeastLoadedPolicy.select_printer(&printers), Some(1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastLoadedPolicy;

impl DispatchPolicy for LeastLoadedPolicy {
    fn select_printer(&self, printers: &[Printer]) -> Option<usize> {
        if let Some(idle) = printers.iter().position(Printer::has_no_jobs) {
            return Some(idle);
        }

        let mut selected: Option<(usize, u32)> = None;
        for (index, printer) in printers.iter().enumerate() {
            let load = printer.total_pages_remaining();
            match selected {
                Some((_, best)) if load >= best => {}
                _ => selected = Some((index, load)),
            }
        }
        selected.map(|(index, _)| index)
    }

    fn name(&self) -> &'static str {
        "least_loaded"
    }
}
