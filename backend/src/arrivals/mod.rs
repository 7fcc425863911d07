//! Job synthesis for the dispatcher.
//!
//! New print jobs get a page count drawn from a weighted distribution over
//! page-count bands and a sequential id owned by the [`JobFactory`]. All
//! sampling goes through the seeded [`RngManager`], so the sequence of jobs
//! is a pure function of the seed.
//!
//! # Default Distribution
//!
//! A draw `r` in `[0, 10)` picks the band by cumulative weight:
//!
//! | `r`   | pages    | probability |
//! |-------|----------|-------------|
//! | 0..=3 | 1..=10   | 0.4         |
//! | 4..=6 | 11..=25  | 0.3         |
//! | 7..=8 | 26..=50  | 0.2         |
//! | 9     | 51..=100 | 0.1         |
//!
//! # Example
//!
//! ```
//! use printer_queue_core::arrivals::JobFactory;
//! use printer_queue_core::rng::RngManager;
//!
//! let mut factory = JobFactory::default();
//! let mut rng = RngManager::new(42);
//!
//! let first = factory.create(&mut rng);
//! let second = factory.create(&mut rng);
//! assert_eq!(first.id(), 0);
//! assert_eq!(second.id(), 1);
//! assert!((1..=100).contains(&first.pages()));
//! ```

use crate::models::Job;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// One page-count band of the distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBand {
    /// Relative weight (out of the distribution's total weight)
    pub weight: u32,

    /// Smallest page count in the band (inclusive)
    pub min_pages: u32,

    /// Largest page count in the band (inclusive)
    pub max_pages: u32,
}

/// Weighted discrete distribution over page-count bands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDistribution {
    bands: Vec<PageBand>,
}

impl Default for PageDistribution {
    fn default() -> Self {
        Self {
            bands: vec![
                PageBand { weight: 4, min_pages: 1, max_pages: 10 },
                PageBand { weight: 3, min_pages: 11, max_pages: 25 },
                PageBand { weight: 2, min_pages: 26, max_pages: 50 },
                PageBand { weight: 1, min_pages: 51, max_pages: 100 },
            ],
        }
    }
}

impl PageDistribution {
    /// Build a distribution from bands
    ///
    /// # Panics
    /// Panics if there are no bands, all weights are zero, or a band is empty
    /// or starts at zero pages
    pub fn new(bands: Vec<PageBand>) -> Self {
        assert!(!bands.is_empty(), "distribution needs at least one band");
        assert!(
            bands.iter().any(|b| b.weight > 0),
            "distribution needs a positive weight"
        );
        for band in &bands {
            assert!(
                band.min_pages > 0 && band.min_pages <= band.max_pages,
                "band must satisfy 0 < min_pages <= max_pages"
            );
        }
        Self { bands }
    }

    pub fn total_weight(&self) -> u32 {
        self.bands.iter().map(|b| b.weight).sum()
    }

    /// Draw a page count
    ///
    /// One draw selects the band by cumulative weight, a second draw picks a
    /// page count uniformly inside the band.
    pub fn sample(&self, rng: &mut RngManager) -> u32 {
        let draw = rng.below(u64::from(self.total_weight())) as u32;
        let band = self.band_for_draw(draw);
        rng.range_inclusive(band.min_pages, band.max_pages)
    }

    /// Band selected by a draw in `[0, total_weight)`
    fn band_for_draw(&self, draw: u32) -> &PageBand {
        let mut cumulative = 0;
        for band in &self.bands {
            cumulative += band.weight;
            if draw < cumulative {
                return band;
            }
        }
        // draw is always below the total weight; the last band closes the range
        &self.bands[self.bands.len() - 1]
    }
}

/// Creates jobs with sequential ids and sampled page counts
#[derive(Debug, Clone, Default)]
pub struct JobFactory {
    distribution: PageDistribution,

    /// Next job ID counter
    next_job_id: usize,
}

impl JobFactory {
    pub fn new(distribution: PageDistribution) -> Self {
        Self {
            distribution,
            next_job_id: 0,
        }
    }

    /// Synthesize the next job
    pub fn create(&mut self, rng: &mut RngManager) -> Job {
        let pages = self.distribution.sample(rng);
        let job = Job::new(self.next_job_id, pages);
        self.next_job_id += 1;
        job
    }

    /// Number of jobs created so far
    pub fn jobs_created(&self) -> usize {
        self.next_job_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_band_boundaries() {
        let dist = PageDistribution::default();
        assert_eq!(dist.total_weight(), 10);

        let expected = [
            (0, 1),
            (3, 1),
            (4, 11),
            (6, 11),
            (7, 26),
            (8, 26),
            (9, 51),
        ];
        for (draw, min_pages) in expected {
            assert_eq!(
                dist.band_for_draw(draw).min_pages,
                min_pages,
                "draw {} selected the wrong band",
                draw
            );
        }
    }

    #[test]
    fn test_samples_stay_in_range() {
        let dist = PageDistribution::default();
        let mut rng = RngManager::new(42);

        for _ in 0..10_000 {
            let pages = dist.sample(&mut rng);
            assert!((1..=100).contains(&pages));
        }
    }

    #[test]
    fn test_band_frequencies_match_weights() {
        let dist = PageDistribution::default();
        let mut rng = RngManager::new(2024);
        let mut counts = [0usize; 4];
        let n = 100_000;

        for _ in 0..n {
            let pages = dist.sample(&mut rng);
            let idx = match pages {
                1..=10 => 0,
                11..=25 => 1,
                26..=50 => 2,
                _ => 3,
            };
            counts[idx] += 1;
        }

        let expected = [0.4, 0.3, 0.2, 0.1];
        for (count, p) in counts.iter().zip(expected) {
            let observed = *count as f64 / n as f64;
            assert!(
                (observed - p).abs() < 0.01,
                "observed {} expected {}",
                observed,
                p
            );
        }
    }

    #[test]
    fn test_factory_is_deterministic() {
        let mut f1 = JobFactory::default();
        let mut f2 = JobFactory::default();
        let mut rng1 = RngManager::new(7);
        let mut rng2 = RngManager::new(7);

        for _ in 0..50 {
            assert_eq!(f1.create(&mut rng1), f2.create(&mut rng2));
        }
        assert_eq!(f1.jobs_created(), 50);
    }

    #[test]
    fn test_single_band_distribution() {
        let dist = PageDistribution::new(vec![PageBand {
            weight: 1,
            min_pages: 7,
            max_pages: 7,
        }]);
        let mut rng = RngManager::new(1);
        assert_eq!(dist.sample(&mut rng), 7);
    }

    #[test]
    #[should_panic(expected = "distribution needs a positive weight")]
    fn test_all_zero_weights_rejected() {
        PageDistribution::new(vec![PageBand {
            weight: 0,
            min_pages: 1,
            max_pages: 2,
        }]);
    }
}
