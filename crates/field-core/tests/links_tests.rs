use field_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn params(cap: usize) -> LinkParams {
    LinkParams {
        max_distance: 5.0,
        cap,
        rebuild_interval_sec: 0.1,
        rebuild_window_sec: 0.016,
    }
}

fn cloud(n: usize, half_width: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-half_width..half_width),
                rng.gen_range(-half_width..half_width),
                rng.gen_range(-half_width..half_width),
            )
        })
        .collect()
}

fn builders() -> [(&'static str, Links); 2] {
    [
        ("quadratic", Links::for_strategy(LinkStrategy::Quadratic)),
        ("grid", Links::for_strategy(LinkStrategy::Grid)),
    ]
}

#[test]
fn four_particle_scenario_links_expected_pairs() {
    let pts = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 40.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
    ];
    let expected = vec![(pts[0], pts[1]), (pts[0], pts[3]), (pts[1], pts[3])];
    for (name, mut b) in builders() {
        let mut out = EdgeSet::default();
        b.rebuild(&pts, &params(800), &mut out);
        let got: Vec<(Vec3, Vec3)> = out.segments().collect();
        assert_eq!(got, expected, "{name} builder");
    }
}

#[test]
fn edge_count_never_exceeds_cap() {
    for n in [0, 1, 50, 2_000, 10_000] {
        let pts = cloud(n, 10.0, n as u64);
        for cap in [1, 800, 1200] {
            for (name, mut b) in builders() {
                let mut out = EdgeSet::with_capacity(cap);
                b.rebuild(&pts, &params(cap), &mut out);
                assert!(
                    out.len() <= cap,
                    "{name}: {} edges over cap {cap} for {n} particles",
                    out.len()
                );
            }
        }
    }
}

#[test]
fn dense_cloud_fills_cap_exactly() {
    let pts = cloud(2_000, 5.0, 3);
    for (name, mut b) in builders() {
        let mut out = EdgeSet::default();
        b.rebuild(&pts, &params(800), &mut out);
        assert_eq!(out.len(), 800, "{name}");
    }
}

#[test]
fn grid_matches_quadratic_under_cap() {
    let pts = cloud(600, 30.0, 42);
    let p = params(usize::MAX);
    let mut quad = EdgeSet::default();
    let mut grid = EdgeSet::default();
    QuadraticLinks.rebuild(&pts, &p, &mut quad);
    GridLinks::new().rebuild(&pts, &p, &mut grid);
    assert!(!quad.is_empty());
    assert_eq!(quad, grid);
}

#[test]
fn grid_matches_quadratic_when_capped() {
    let pts = cloud(1_500, 20.0, 9);
    let p = params(300);
    let mut quad = EdgeSet::default();
    let mut grid = EdgeSet::default();
    QuadraticLinks.rebuild(&pts, &p, &mut quad);
    GridLinks::new().rebuild(&pts, &p, &mut grid);
    assert_eq!(quad.len(), 300);
    assert_eq!(quad, grid);
}

#[test]
fn rebuild_replaces_previous_edges() {
    let near = [Vec3::ZERO, Vec3::X];
    let apart = [Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)];
    for (name, mut b) in builders() {
        let mut out = EdgeSet::default();
        b.rebuild(&near, &params(10), &mut out);
        assert_eq!(out.len(), 1, "{name}");
        b.rebuild(&apart, &params(10), &mut out);
        assert!(out.is_empty(), "{name}");
    }
}

#[test]
fn threshold_is_exclusive() {
    let pts = [Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)];
    for (name, mut b) in builders() {
        let mut out = EdgeSet::default();
        b.rebuild(&pts, &params(10), &mut out);
        assert!(out.is_empty(), "{name}: pair at exactly the threshold was linked");
    }
}

#[test]
fn grid_matches_quadratic_for_far_out_positions() {
    let pts = [
        Vec3::splat(1e12),
        Vec3::splat(1e12),
        Vec3::splat(-1e12),
        Vec3::new(f32::MAX, 0.0, f32::MIN),
        Vec3::new(f32::MAX, 0.0, f32::MIN),
        Vec3::ZERO,
        Vec3::X,
    ];
    let mut quad = EdgeSet::default();
    let mut grid = EdgeSet::default();
    QuadraticLinks.rebuild(&pts, &params(10), &mut quad);
    GridLinks::new().rebuild(&pts, &params(10), &mut grid);
    assert_eq!(quad.len(), 3);
    assert_eq!(quad, grid);
}

#[test]
fn grid_matches_quadratic_at_smallest_link_distance() {
    let pts = cloud(400, 50.0, 11);
    let mut p = params(usize::MAX);
    p.max_distance = field_core::constants::LINK_MIN_DISTANCE;
    let mut quad = EdgeSet::default();
    let mut grid = EdgeSet::default();
    QuadraticLinks.rebuild(&pts, &p, &mut quad);
    GridLinks::new().rebuild(&pts, &p, &mut grid);
    assert_eq!(quad, grid);
}
