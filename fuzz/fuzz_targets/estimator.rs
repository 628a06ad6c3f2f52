#![no_main]

use distinct_count::CardinalityEstimator;
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut estimator1 = CardinalityEstimator::<sha2::Sha256>::new(64).unwrap();
    for chunk in first_half.chunks(4) {
        estimator1.add(chunk);
        assert!(estimator1.estimate() > 0.0);
    }

    let mut estimator2 = CardinalityEstimator::<sha2::Sha256>::new(64).unwrap();
    for chunk in second_half.chunks(4) {
        estimator2.add(chunk);
        assert!(estimator2.estimate() > 0.0);
    }

    let mut merged = estimator1.clone();
    merged.merge(&estimator2).unwrap();
    let mut reversed = estimator2.clone();
    reversed.merge(&estimator1).unwrap();
    assert_eq!(merged, reversed);

    let mut combined = estimator1;
    for chunk in second_half.chunks(4) {
        combined.add(chunk);
    }
    assert_eq!(merged, combined);
});
