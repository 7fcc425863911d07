//! Dispatch Tests
//!
//! Least-loaded selection against real printer loads, end to end through
//! the dispatcher.

use printer_queue_core::orchestrator::Dispatcher;
use printer_queue_core::policy::{DispatchPolicy, LeastLoadedPolicy};
use printer_queue_core::{Event, Job, JobFactory, PageBand, PageDistribution, Printer, RngManager};

// ============================================================================
// Test Helpers
// ============================================================================

/// Pool whose printers hold one job each with the given page counts (0 = idle)
fn create_pool(loads: &[u32]) -> Vec<Printer> {
    loads
        .iter()
        .enumerate()
        .map(|(id, &pages)| {
            let mut printer = Printer::new(id, 7);
            if pages > 0 {
                printer.enqueue(Job::new(100 + id, pages), 0).unwrap();
            }
            printer
        })
        .collect()
}

/// Factory that always produces jobs of `pages` pages
fn fixed_factory(pages: u32) -> JobFactory {
    JobFactory::new(PageDistribution::new(vec![PageBand {
        weight: 1,
        min_pages: pages,
        max_pages: pages,
    }]))
}

// ============================================================================
// Policy Selection
// ============================================================================

#[test]
fn test_idle_printer_wins() {
    let printers = create_pool(&[50, 0, 30, 30]);
    assert_eq!(LeastLoadedPolicy.select_printer(&printers), Some(1));
}

#[test]
fn test_minimum_load_wins_when_none_idle() {
    let printers = create_pool(&[50, 20, 30, 30]);
    assert_eq!(LeastLoadedPolicy.select_printer(&printers), Some(1));
}

#[test]
fn test_partial_progress_counts_against_load() {
    let mut printers = create_pool(&[30, 25, 0, 0]);
    printers[2].enqueue(Job::new(7, 40), 0).unwrap();
    printers[3].enqueue(Job::new(8, 40), 0).unwrap();

    // Printer 0 has printed 10 of its 30 pages, leaving 20 < 25
    printers[0].update(10 * 8_571).unwrap();
    assert_eq!(printers[0].total_pages_remaining(), 20);

    assert_eq!(LeastLoadedPolicy.select_printer(&printers), Some(0));
}

// ============================================================================
// Dispatcher Routing
// ============================================================================

#[test]
fn test_dispatcher_routes_to_idle_printer() {
    let mut printers = create_pool(&[50, 0, 30, 30]);
    let mut dispatcher = Dispatcher::new(0, 30_000, fixed_factory(5), Box::new(LeastLoadedPolicy));
    let mut rng = RngManager::new(7);

    let dispatch = dispatcher
        .tick(30_000, &mut printers, &mut rng)
        .unwrap()
        .expect("job due at 30s");

    assert_eq!(dispatch.printer_index, 1);
    assert_eq!(dispatch.job.pages(), 5);
    assert_eq!(printers[1].queue_len(), 1);
    assert!(printers[1].is_printing());

    let kinds: Vec<&str> = dispatch.events.iter().map(Event::event_type).collect();
    assert_eq!(kinds, vec!["JobCreated", "JobQueued", "JobStarted"]);
}

#[test]
fn test_dispatcher_routes_to_least_loaded() {
    let mut printers = create_pool(&[50, 20, 30, 30]);
    let mut dispatcher = Dispatcher::new(0, 30_000, fixed_factory(5), Box::new(LeastLoadedPolicy));
    let mut rng = RngManager::new(7);

    let dispatch = dispatcher
        .tick(30_000, &mut printers, &mut rng)
        .unwrap()
        .expect("job due at 30s");

    assert_eq!(dispatch.printer_index, 1);
    assert_eq!(printers[1].queue_len(), 2);
    assert_eq!(printers[1].total_pages_remaining(), 25);

    // Queued behind the running job: no start event
    let kinds: Vec<&str> = dispatch.events.iter().map(Event::event_type).collect();
    assert_eq!(kinds, vec!["JobCreated", "JobQueued"]);
}

#[test]
fn test_successive_jobs_spread_across_pool() {
    let mut printers = create_pool(&[0, 0, 0]);
    let mut dispatcher = Dispatcher::new(0, 1_000, fixed_factory(10), Box::new(LeastLoadedPolicy));
    let mut rng = RngManager::new(7);

    let mut targets = Vec::new();
    for second in 1..=6 {
        let dispatch = dispatcher
            .tick(second * 1_000, &mut printers, &mut rng)
            .unwrap()
            .expect("one job per second");
        targets.push(dispatch.printer_index);
    }

    // Idle printers first, then ties broken by lowest index
    assert_eq!(targets, vec![0, 1, 2, 0, 1, 2]);
}
