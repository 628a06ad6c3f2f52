#![no_main]

use distinct_count::CardinalityEstimator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut estimator) = serde_json::from_slice::<CardinalityEstimator>(data) {
        assert!(estimator.bucket_count().is_power_of_two());
        assert_eq!(estimator.registers().len(), estimator.bucket_count());
        estimator.add(&1u64.to_le_bytes());
        assert!(estimator.estimate() > 0.0);
    }
});
