use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use geopath_lib::{
    search, search_with_observer, CancellationToken, IterationLimit, Point, QueueStrategy,
    SearchAlgorithm, SearchRequest, SearchStep, StepCallback, StepDelay, StepRecorder,
};

fn meridian(count: usize) -> Vec<Point> {
    (0..count).map(|i| Point::new(i as f64 * 0.5, 0.0)).collect()
}

#[test]
fn recorder_sees_one_step_per_iteration() {
    let points = meridian(6);
    let mut recorder = StepRecorder::new();
    let outcome = search_with_observer(&SearchRequest::default(), &points, &mut recorder)
        .expect("valid request");

    assert_eq!(outcome.iterations, recorder.steps.len());
    assert_eq!(recorder.expansion_order(), vec![0, 1, 2, 3, 4, 5]);
    let iterations: Vec<usize> = recorder.steps.iter().map(|s| s.iteration).collect();
    assert_eq!(iterations, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn a_star_expands_chain_in_order() {
    let points = meridian(5);
    let mut recorder = StepRecorder::new();
    search_with_observer(
        &SearchRequest::new(SearchAlgorithm::AStar),
        &points,
        &mut recorder,
    )
    .expect("valid request");

    assert_eq!(recorder.expansion_order(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn cancelled_search_returns_no_path() {
    let token = CancellationToken::new();
    token.cancel();

    for algorithm in [SearchAlgorithm::Dijkstra, SearchAlgorithm::AStar] {
        for queue in [QueueStrategy::LinearScan, QueueStrategy::BinaryHeap] {
            let mut observer = token.clone();
            let outcome = search_with_observer(
                &SearchRequest::new(algorithm).with_queue(queue),
                &meridian(4),
                &mut observer,
            )
            .expect("valid request");
            assert!(outcome.path.is_empty());
            assert_eq!(outcome.total_distance_km, 0.0);
            assert_eq!(outcome.iterations, 0);
        }
    }
}

#[test]
fn cancelling_mid_search_stops_expansion() {
    let token = CancellationToken::new();
    let trigger = token.clone();
    let mut observer = (
        token,
        StepCallback(move |step: &SearchStep| {
            if step.iteration == 2 {
                trigger.cancel();
            }
        }),
    );

    let outcome = search_with_observer(&SearchRequest::default(), &meridian(10), &mut observer)
        .expect("valid request");
    assert!(outcome.path.is_empty());
    assert_eq!(outcome.iterations, 2);
}

#[test]
fn iteration_limit_allows_short_searches() {
    let points = meridian(3);

    let mut generous = IterationLimit::new(3);
    let outcome = search_with_observer(&SearchRequest::default(), &points, &mut generous)
        .expect("valid request");
    assert_eq!(outcome.path_ids(), vec![0, 1, 2]);

    let mut strict = IterationLimit::new(2);
    let outcome = search_with_observer(&SearchRequest::default(), &points, &mut strict)
        .expect("valid request");
    assert!(outcome.path.is_empty());
}

#[test]
fn step_delay_paces_iterations() {
    let points = meridian(3);
    let mut delay = StepDelay::from_millis(5);
    let started = Instant::now();
    let outcome = search_with_observer(&SearchRequest::default(), &points, &mut delay)
        .expect("valid request");

    assert_eq!(outcome.path_ids(), vec![0, 1, 2]);
    assert!(started.elapsed() >= Duration::from_millis(5 * outcome.iterations as u64));
}

#[test]
fn callback_receives_frontier_sizes() {
    let calls = AtomicUsize::new(0);
    let mut observer = StepCallback(|step: &SearchStep| {
        calls.fetch_add(1, Ordering::Relaxed);
        assert!(step.frontier < 4);
    });

    search_with_observer(&SearchRequest::default(), &meridian(4), &mut observer)
        .expect("valid request");
    assert_eq!(calls.load(Ordering::Relaxed), 4);
}

#[test]
fn concurrent_searches_are_independent() {
    let handles: Vec<_> = (2..8)
        .map(|count| {
            std::thread::spawn(move || {
                let outcome = search(&SearchRequest::new(SearchAlgorithm::AStar), &meridian(count))
                    .expect("valid request");
                (count, outcome.path_ids())
            })
        })
        .collect();

    for handle in handles {
        let (count, ids) = handle.join().expect("thread completes");
        assert_eq!(ids, (0..count).collect::<Vec<_>>());
    }
}
