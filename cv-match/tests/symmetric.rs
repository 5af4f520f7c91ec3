use cv_match::{Error, Feature, KnnMatcher, MatchSettings};
use cv_knn::Manhattan;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

fn random_descriptors(rng: &mut impl Rng, count: usize) -> Vec<Vec<f64>> {
    (0..count)
        .map(|_| (0..8).map(|_| rng.gen_range(0.0..100.0)).collect())
        .collect()
}

#[test]
fn matching_is_symmetric() {
    let _ = pretty_env_logger::try_init();
    let mut rng = Pcg64::seed_from_u64(0);
    let a = random_descriptors(&mut rng, 40);
    let b = random_descriptors(&mut rng, 25);
    let matcher = KnnMatcher::new(3, 0.0);

    let forward = matcher.match_indices(&a, &b).unwrap();
    let mut backward: Vec<(usize, usize)> = matcher
        .match_indices(&b, &a)
        .unwrap()
        .into_iter()
        .map(|(i, j)| (j, i))
        .collect();
    backward.sort_unstable();
    assert!(!forward.is_empty());
    assert_eq!(forward, backward);
}

#[test]
fn linear_and_indexed_matching_agree() {
    let _ = pretty_env_logger::try_init();
    let mut rng = Pcg64::seed_from_u64(1);
    let a = random_descriptors(&mut rng, 30);
    let b = random_descriptors(&mut rng, 50);
    let matcher = KnnMatcher::new(1, 0.0).with_metric(Manhattan);
    assert_eq!(
        matcher.match_indices(&a, &b).unwrap(),
        matcher.match_indices_linear(&a, &b).unwrap()
    );
}

#[test]
fn perturbed_features_find_their_source() {
    let _ = pretty_env_logger::try_init();
    let mut rng = Pcg64::seed_from_u64(2);
    let a: Vec<Feature> = random_descriptors(&mut rng, 30)
        .into_iter()
        .enumerate()
        .map(|(i, descriptor)| Feature::new(i as f64, 0.0, descriptor))
        .collect();
    // Every second feature reappears shifted by one pixel with a slightly noisy descriptor.
    let b: Vec<Feature> = a
        .iter()
        .step_by(2)
        .map(|f| {
            let descriptor = f
                .descriptor
                .iter()
                .map(|&v| v + rng.gen_range(-0.01..0.01))
                .collect();
            Feature::new(f.keypoint.x + 1.0, 0.0, descriptor)
        })
        .collect();

    let matches = KnnMatcher::from_settings(&MatchSettings {
        k: 1,
        threshold: 0.5,
    })
    .match_features(&a, &b)
    .unwrap();
    assert_eq!(matches.len(), b.len());
    for m in matches {
        assert_eq!(m.1.x, m.0.x + 1.0);
    }
}

#[test]
fn zero_neighbors_is_rejected() {
    let a = vec![vec![1.0], vec![2.0]];
    let b = vec![vec![1.5]];
    assert_eq!(
        KnnMatcher::new(0, 0.0).match_indices(&a, &b),
        Err(Error::InvalidNeighborCount { k: 0, samples: 2 })
    );
}

#[test]
fn too_many_neighbors_is_rejected() {
    let a = vec![vec![1.0], vec![2.0]];
    let b = vec![vec![1.5]];
    assert!(matches!(
        KnnMatcher::new(3, 0.0).match_indices(&a, &b),
        Err(Error::InvalidNeighborCount { k: 3, samples: 2 })
    ));
}
