//! Property Tests
//!
//! Invariants that must hold for arbitrary sampling patterns and workloads.

use printer_queue_core::{Event, Job, Printer, RngManager, SimClock};
use proptest::prelude::*;
use std::time::Duration;

proptest! {
    #[test]
    fn prop_clock_is_monotonic_and_ticks_on_grid(
        start in 0u64..1_000_000_000,
        speed in 1u32..2_000,
        steps in prop::collection::vec(0u64..5_000, 1..200),
    ) {
        let mut clock = SimClock::new(start, speed);
        let mut previous = clock.simulated_ms();

        for micros in steps {
            clock.advance(Duration::from_micros(micros));
            prop_assert!(clock.simulated_ms() >= previous);
            previous = clock.simulated_ms();

            while clock.should_tick() {
                prop_assert_eq!((clock.last_tick_ms() - start) % 1_000, 0);
                prop_assert!(clock.last_tick_ms() <= clock.simulated_ms());
            }
            prop_assert!(clock.simulated_ms() - clock.last_tick_ms() < 1_000);
        }
    }

    #[test]
    fn prop_total_pages_drop_only_by_progress_or_completion(
        pages in prop::collection::vec(1u32..=100, 1..20),
        increments in prop::collection::vec(0u64..20_000, 1..300),
    ) {
        let mut printer = Printer::new(0, 7);
        for (id, &p) in pages.iter().enumerate() {
            printer.enqueue(Job::new(id, p), 0).unwrap();
        }
        let mut expected_total: u32 = pages.iter().sum();
        let mut now = 0;

        for step in increments {
            now += step;
            let events = printer.update(now).unwrap();
            for event in &events {
                if let Event::JobCompleted { pages, .. } = event {
                    expected_total -= pages;
                }
            }

            // Stored total net of head-job progress
            prop_assert_eq!(
                printer.total_pages_remaining(),
                if printer.has_no_jobs() { 0 } else { expected_total - printer.pages_printed() }
            );
            prop_assert!(printer.pages_printed() <= printer.queued_jobs().next().map_or(0, |j| j.pages()));
        }
    }

    #[test]
    fn prop_update_is_idempotent(
        pages in prop::collection::vec(1u32..=50, 1..10),
        at in 0u64..5_000_000,
    ) {
        let mut printer = Printer::new(0, 7);
        for (id, &p) in pages.iter().enumerate() {
            printer.enqueue(Job::new(id, p), 0).unwrap();
        }

        printer.update(at).unwrap();
        let queue_len = printer.queue_len();
        let progress = printer.pages_printed();
        let total = printer.total_pages_remaining();

        prop_assert!(printer.update(at).unwrap().is_empty());
        prop_assert_eq!(printer.queue_len(), queue_len);
        prop_assert_eq!(printer.pages_printed(), progress);
        prop_assert_eq!(printer.total_pages_remaining(), total);
    }

    #[test]
    fn prop_range_inclusive_stays_in_bounds(
        seed in any::<u64>(),
        min in 1u32..100,
        width in 0u32..100,
    ) {
        let mut rng = RngManager::new(seed);
        let max = min + width;
        for _ in 0..50 {
            let value = rng.range_inclusive(min, max);
            prop_assert!((min..=max).contains(&value));
        }
    }
}
