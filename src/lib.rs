//! `distinct-count` estimates the number of distinct items in a stream or dataset
//! using bounded memory.
//!
//! It implements HyperLogLog over a SHA-256 digest of each item, with linear counting for
//! small cardinalities and a collision correction for very large ones. Estimators with the
//! same bucket count can be merged, so independent workers can count separately and
//! combine their results.
//!
//! ```
//! use distinct_count::CardinalityEstimator;
//!
//! let mut estimator = CardinalityEstimator::<sha2::Sha256>::new(512)?;
//! for item in ["alice", "bob", "carol", "alice"] {
//!     estimator.add(item);
//! }
//! assert_eq!(estimator.cardinality(), 3);
//! # Ok::<(), distinct_count::EstimatorError>(())
//! ```
pub mod error;
pub mod estimator;
mod hash;
mod hyperloglog;
#[cfg(feature = "with_serde")]
mod serde;

pub use error::EstimatorError;
pub use estimator::CardinalityEstimator;
