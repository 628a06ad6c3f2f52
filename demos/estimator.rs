use distinct_count::{CardinalityEstimator, EstimatorError};
use rand::RngCore;
use tracing_subscriber::EnvFilter;

/// Number of random items, overridden with environment variable `N`.
const DEFAULT_ITEMS: usize = 1_000_000;
/// Number of registers, overridden with environment variable `BUCKETS`.
const DEFAULT_BUCKETS: usize = 512;

fn env_or(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), EstimatorError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let n = env_or("N", DEFAULT_ITEMS);
    let bucket_count = env_or("BUCKETS", DEFAULT_BUCKETS);

    let mut rng = rand::thread_rng();
    let mut bytes = [0u8; 32];
    let mut estimator = CardinalityEstimator::<sha2::Sha256>::new(bucket_count)?;
    for _ in 0..n {
        rng.fill_bytes(&mut bytes);
        let item: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        estimator.add(&item);
    }

    let estimate = estimator.estimate();
    println!("items = {}", n);
    println!("estimate = {:.1} ({})", estimate, estimator.cardinality());
    if n > 0 {
        println!(
            "relative error = {:.4} (expected ~{:.4})",
            (estimate - n as f64).abs() / n as f64,
            estimator.relative_error()
        );
    }

    Ok(())
}
