//! The scheduler must touch every interior index exactly once per step and
//! produce the same bits regardless of how the range is split.

use std::sync::atomic::{AtomicUsize, Ordering};

use heat1d_core::{
    Boundary, Granularity, SolverConfig, SolverCore, WorkRange, divide_and_conquer, stencil, sweep,
};
use proptest::prelude::*;

fn kernel_calls_per_index(n: usize, grain: Granularity) -> Vec<usize> {
    let calls: Vec<AtomicUsize> = (0..n).map(|_| AtomicUsize::new(0)).collect();
    let previous: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let mut next = vec![0.0; n];
    let interior = WorkRange::new(1, n - 2);

    divide_and_conquer(
        interior,
        &mut next[1..=n - 2],
        grain,
        &|r: WorkRange, chunk: &mut [f64]| {
            for (slot, i) in chunk.iter_mut().zip(r.start..=r.end) {
                calls[i].fetch_add(1, Ordering::Relaxed);
                *slot = stencil(previous[i - 1], previous[i], previous[i + 1], 0.25);
            }
        },
    );
    calls.into_iter().map(AtomicUsize::into_inner).collect()
}

#[test]
fn every_interior_index_written_exactly_once() {
    for threshold in [1, 2, 3, 7, 25, 1024] {
        let grain = Granularity::new(threshold).unwrap();
        for n in [3, 4, 5, 17, 100, 1001] {
            let calls = kernel_calls_per_index(n, grain);
            assert_eq!(calls[0], 0, "n={n} threshold={threshold}");
            assert_eq!(calls[n - 1], 0, "n={n} threshold={threshold}");
            assert!(
                calls[1..n - 1].iter().all(|&c| c == 1),
                "n={n} threshold={threshold}: {calls:?}"
            );
        }
    }
}

#[test]
fn empty_range_leaves_next_untouched() {
    let previous = vec![1.0; 6];
    let mut next = vec![-1.0; 6];
    sweep(WorkRange::new(4, 3), &previous, &mut next, 0.3, Granularity::FINEST);
    assert!(next.iter().all(|&v| v == -1.0));

    let mut out: [f64; 0] = [];
    divide_and_conquer(
        WorkRange::new(9, 2),
        &mut out[..],
        Granularity::FINEST,
        &|_: WorkRange, _: &mut [f64]| panic!("leaf called for empty range"),
    );
}

#[test]
fn sweep_matches_sequential_loop() {
    let n = 257;
    let previous: Vec<f64> = (0..n).map(|i| ((i * i) % 13) as f64 - 6.0).collect();
    let mut expected = vec![0.0; n];
    for i in 1..n - 1 {
        expected[i] = stencil(previous[i - 1], previous[i], previous[i + 1], 0.4);
    }

    let mut next = vec![0.0; n];
    sweep(
        WorkRange::new(1, n - 2),
        &previous,
        &mut next,
        0.4,
        Granularity::new(5).unwrap(),
    );
    assert_eq!(next, expected);
}

#[test]
fn dedicated_pool_matches_global_pool() {
    let base = SolverConfig::default()
        .with_points(513)
        .with_steps(200)
        .with_total_time(0.001)
        .with_threshold(16);
    let global = SolverCore::new(&base).unwrap().run();
    let dedicated = SolverCore::new(&base.with_threads(Some(4))).unwrap().run();
    assert_eq!(global, dedicated);
}

fn stable_config() -> impl Strategy<Value = SolverConfig> {
    (3usize..300, 0.01f64..2.0, 0.5f64..5.0, 1usize..40, 0.01f64..0.5).prop_map(
        |(points, alpha, length, steps, target_factor)| {
            let h = length / (points - 1) as f64;
            let dt = target_factor * h * h / alpha;
            SolverConfig::default()
                .with_points(points)
                .with_alpha(alpha)
                .with_length(length)
                .with_steps(steps)
                .with_total_time(dt * steps as f64)
                .with_boundary(Boundary::dirichlet(0.25, -0.5))
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn splitting_does_not_change_results(cfg in stable_config()) {
        let seed = |x: f64| (7.0 * x).cos() + 0.3 * x;
        let sequential = SolverCore::with_seed(&cfg.clone().with_threshold(usize::MAX), seed)
            .unwrap()
            .run();
        let finest = SolverCore::with_seed(&cfg.clone().with_threshold(1), seed)
            .unwrap()
            .run();
        prop_assert_eq!(sequential.values(), finest.values());
    }
}
