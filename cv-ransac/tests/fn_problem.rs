use approx::assert_relative_eq;
use cv_ransac::{FnProblem, Ransac, RansacSettings};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::cell::Cell;

/// Points on `y = 2x + 1` with small noise, followed by gross outliers.
fn noisy_line(rng: &mut Pcg64) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = (0..80)
        .map(|_| {
            let x = rng.gen_range(-10.0..10.0);
            [x, 2.0 * x + 1.0 + rng.gen_range(-0.05..0.05)]
        })
        .collect();
    points.extend((0..20).map(|_| [rng.gen_range(-10.0..10.0), rng.gen_range(30.0..60.0)]));
    points
}

fn line_through(a: [f64; 2], b: [f64; 2]) -> Option<(f64, f64)> {
    let dx = b[0] - a[0];
    if dx.abs() < 1e-9 {
        return None;
    }
    let slope = (b[1] - a[1]) / dx;
    Some((slope, a[1] - slope * a[0]))
}

#[test]
fn closure_problem_finds_line() {
    let _ = pretty_env_logger::try_init();
    let mut rng = Pcg64::seed_from_u64(0);
    let points = noisy_line(&mut rng);
    let degenerate_checks = Cell::new(0);

    let problem = FnProblem::new(
        points.len(),
        2,
        |sample: &[usize]| line_through(points[sample[0]], points[sample[1]]),
        |&(slope, intercept): &(f64, f64), threshold: f64| {
            points
                .iter()
                .enumerate()
                .filter(|(_, p)| (slope * p[0] + intercept - p[1]).abs() <= threshold)
                .map(|(ix, _)| ix)
                .collect()
        },
    )
    .with_degenerate(|sample: &[usize]| {
        degenerate_checks.set(degenerate_checks.get() + 1);
        (points[sample[0]][0] - points[sample[1]][0]).abs() < 1e-3
    });

    let mut ransac = Ransac::new(0.2, rng);
    let ((slope, intercept), inliers) = ransac.compute(&problem).unwrap();
    assert_relative_eq!(slope, 2.0, epsilon = 0.1);
    assert_relative_eq!(intercept, 1.0, epsilon = 0.5);
    assert!(degenerate_checks.get() > 0);
    assert!(inliers.len() >= 60, "only {} inliers", inliers.len());
    assert!(inliers.iter().all(|&ix| ix < 80));
}

#[test]
fn same_seed_same_result() {
    let points = noisy_line(&mut Pcg64::seed_from_u64(1));
    let problem = FnProblem::new(
        points.len(),
        2,
        |sample: &[usize]| line_through(points[sample[0]], points[sample[1]]),
        |&(slope, intercept): &(f64, f64), threshold: f64| {
            (0..points.len())
                .filter(|&ix| (slope * points[ix][0] + intercept - points[ix][1]).abs() <= threshold)
                .collect()
        },
    );
    let settings = RansacSettings {
        probability: 0.999,
        ..Default::default()
    };
    let run = |seed| {
        Ransac::with_settings(0.2, settings, Pcg64::seed_from_u64(seed))
            .unwrap()
            .compute(&problem)
            .unwrap()
    };
    let (a, inliers_a) = run(7);
    let (b, inliers_b) = run(7);
    assert_eq!(a, b);
    assert_eq!(inliers_a, inliers_b);
}
