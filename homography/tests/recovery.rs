use approx::assert_relative_eq;
use cv_core::{nalgebra::Point2, FeatureMatch};
use homography::{Homography, RansacHomography};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

fn ground_truth() -> Homography {
    Homography::from_elements([0.95, 0.1, 10.0, -0.08, 1.05, 5.0, 2e-4, 1e-4])
}

/// 100 points in `[0, 100]²`: the first 80 map through the ground truth with
/// up to 0.1 px of noise, the last 20 are displaced by 20 to 40 px.
fn correspondences(rng: &mut Pcg64) -> Vec<FeatureMatch<Point2<f64>>> {
    let h = ground_truth();
    (0..100)
        .map(|i| {
            let a = Point2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
            let b = h.transform_point(&a);
            let offset = if i < 80 {
                cv_core::nalgebra::Vector2::new(rng.gen_range(-0.1..0.1), rng.gen_range(-0.1..0.1))
            } else {
                let angle = rng.gen_range(0.0..std::f64::consts::TAU);
                let length = rng.gen_range(20.0..40.0);
                cv_core::nalgebra::Vector2::new(angle.cos(), angle.sin()) * length
            };
            FeatureMatch(a, b + offset)
        })
        .collect()
}

#[test]
fn recovers_homography_despite_outliers() {
    let _ = pretty_env_logger::try_init();
    let mut rng = Pcg64::seed_from_u64(0);
    let matches = correspondences(&mut rng);

    let mut estimator = RansacHomography::new(5e-3, 0.99, rng).unwrap();
    let estimate = estimator.estimate(&matches).unwrap().unwrap();

    assert!(estimate.inliers.iter().all(|&ix| ix < 80));
    assert!(
        estimate.inliers.len() >= 70,
        "only {} inliers",
        estimate.inliers.len()
    );
    let truth = ground_truth();
    for &ix in &estimate.inliers {
        let FeatureMatch(a, _) = matches[ix];
        let projected = estimate.homography.transform_point(&a);
        assert_relative_eq!(projected, truth.transform_point(&a), epsilon = 0.5);
    }

    // Linear part, translation and perspective terms live on different scales.
    let tolerances = [0.02, 0.02, 0.5, 0.02, 0.02, 0.5, 1e-4, 1e-4];
    let recovered = estimate.homography.elements();
    for ((found, expected), epsilon) in recovered.iter().zip(truth.elements()).zip(tolerances) {
        assert_relative_eq!(*found, expected, epsilon = epsilon);
    }
}

#[test]
fn inverse_maps_back() {
    let _ = pretty_env_logger::try_init();
    let mut rng = Pcg64::seed_from_u64(1);
    let matches = correspondences(&mut rng);
    let estimate = homography::estimate_homography(&matches, 5e-3, 0.99, rng)
        .unwrap()
        .unwrap();
    let inverse = estimate.homography.inverse().unwrap();
    for &ix in &estimate.inliers {
        let FeatureMatch(a, b) = matches[ix];
        assert_relative_eq!(inverse.transform_point(&b), a, epsilon = 0.5);
        let round_trip = inverse.transform_point(&estimate.homography.transform_point(&a));
        assert_relative_eq!(round_trip, a, epsilon = 1e-6);
    }
}

#[test]
fn fewer_than_four_is_none() {
    let _ = pretty_env_logger::try_init();
    let mut rng = Pcg64::seed_from_u64(2);
    let matches = correspondences(&mut rng);
    let mut estimator = RansacHomography::new(5e-3, 0.99, rng).unwrap();
    for n in 0..4 {
        assert_eq!(estimator.estimate(&matches[..n]).unwrap(), None);
    }
}

#[test]
fn unrelated_points_only_fit_a_sample() {
    let _ = pretty_env_logger::try_init();
    let mut rng = Pcg64::seed_from_u64(3);
    // Second points are unrelated to the first, so only the 4 points a sample
    // was drawn from agree with its homography.
    let matches: Vec<_> = (0..30)
        .map(|_| {
            FeatureMatch(
                Point2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)),
                Point2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)),
            )
        })
        .collect();
    let mut estimator = RansacHomography::new(1e-9, 0.99, rng).unwrap();
    let estimate = estimator.estimate(&matches).unwrap().unwrap();
    assert_eq!(estimate.inliers.len(), 4);
    for &ix in &estimate.inliers {
        let FeatureMatch(a, b) = matches[ix];
        assert_relative_eq!(estimate.homography.transform_point(&a), b, epsilon = 1e-4);
    }
}
