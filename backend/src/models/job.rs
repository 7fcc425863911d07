//! Print job model
//!
//! A job is an immutable unit of print work: a sequential id and a page count.
//! Ids are handed out by the `JobFactory` that synthesizes jobs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A print job routed to exactly one printer
///
/// # Example
/// ```
/// use printer_queue_core::Job;
///
/// let job = Job::new(3, 12);
/// assert_eq!(job.id(), 3);
/// assert_eq!(job.pages(), 12);
/// assert_eq!(job.to_string(), "Job 3 (12 Pages)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    id: usize,
    pages: u32,
}

impl Job {
    /// Create a job
    ///
    /// # Panics
    /// Panics if `pages` is zero
    pub fn new(id: usize, pages: u32) -> Self {
        assert!(pages > 0, "pages must be positive");
        Self { id, pages }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Job {} ({} Pages)", self.id, self.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "pages must be positive")]
    fn test_zero_pages_panics() {
        Job::new(0, 0);
    }
}
