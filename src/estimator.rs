//! Cardinality estimator allows to estimate number of distinct items
//! in the stream or dataset. It is defined by a runtime `bucket_count` (`m`),
//! which must be a power of two, and a digest type `D` (SHA-256 by default).
//!
//! # Data-structure design rationale
//!
//! ## Fixed memory footprint
//! The estimator holds `m` one-byte HyperLogLog registers, allocated once at construction.
//! `add`, `estimate` and `merge` never allocate.
//!
//! ## Accuracy
//! - Small cardinalities (estimate `<= 2.5 * m`) are counted with linear counting.
//! - Large cardinalities use the HyperLogLog harmonic mean with `alpha` bias correction.
//!   - Expected error is `1.04 / sqrt(m)`:
//!     m = 16: 26%
//!     m = 512: 4.6%
//!     m = 4096: 1.62%
//!     m = 16384: 0.81%
//!
//! ## Hashing
//! Items are hashed with a 256-bit cryptographic digest, which keeps the register index and rank
//! independent of the item distribution. See the `hash` module for how a digest is split.

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::size_of;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::EstimatorError;
use crate::hash::bucket_and_rank;
use crate::hyperloglog::{alpha, estimate};

/// Bucket counts below this one have no reliable `alpha` constant.
const MIN_STANDARD_BUCKET_COUNT: usize = 16;

/// HyperLogLog estimator of the number of distinct items, hashing items with digest `D`.
pub struct CardinalityEstimator<D: Digest = Sha256> {
    /// HyperLogLog registers, one rank per bucket
    registers: Vec<u8>,
    /// Number of digest bits used for register index, `log2(bucket_count)`
    precision: u32,
    /// Bias correction constant derived from bucket count
    alpha: f64,
    /// Zero-sized digest marker
    _digest: PhantomData<D>,
}

impl<D: Digest> CardinalityEstimator<D> {
    /// Creates new instance of `CardinalityEstimator` with `bucket_count` registers.
    ///
    /// `bucket_count` must be a positive power of two. Counts below 16 are accepted
    /// but give poorly calibrated estimates, which is reported with a warning.
    pub fn new(bucket_count: usize) -> Result<Self, EstimatorError> {
        let (precision, alpha) = Self::shape(bucket_count)?;
        debug!(bucket_count, alpha, "created cardinality estimator");

        Ok(Self {
            registers: vec![0; bucket_count],
            precision,
            alpha,
            _digest: PhantomData,
        })
    }

    /// Validates `bucket_count` and returns its precision and alpha.
    fn shape(bucket_count: usize) -> Result<(u32, f64), EstimatorError> {
        if !bucket_count.is_power_of_two() {
            return Err(EstimatorError::InvalidConfiguration(format!(
                "bucket count {} is not a positive power of two",
                bucket_count
            )));
        }
        if bucket_count < MIN_STANDARD_BUCKET_COUNT {
            warn!(
                bucket_count,
                "non-standard bucket count, consider 16, 32, 64 or a power of two >= 128"
            );
        }
        Ok((bucket_count.trailing_zeros(), alpha(bucket_count)))
    }

    /// Creates `CardinalityEstimator` with the smallest bucket count whose standard error
    /// `1.04 / sqrt(m)` does not exceed `relative_error`.
    pub fn with_error(relative_error: f64) -> Result<Self, EstimatorError> {
        if relative_error.is_nan() || relative_error <= 0.0 || relative_error >= 1.0 {
            return Err(EstimatorError::InvalidConfiguration(format!(
                "relative error {} is not in (0, 1)",
                relative_error
            )));
        }
        let min_buckets = (1.04 / relative_error).powi(2).ceil() as usize;
        let bucket_count = min_buckets.checked_next_power_of_two().ok_or_else(|| {
            EstimatorError::InvalidConfiguration(format!(
                "relative error {} needs more than {} buckets",
                relative_error,
                usize::MAX
            ))
        })?;
        Self::new(bucket_count)
    }

    /// Add an item into `CardinalityEstimator`
    #[inline]
    pub fn add<T: AsRef<[u8]> + ?Sized>(&mut self, item: &T) {
        let digest = D::digest(item.as_ref());
        self.add_digest(&digest);
    }

    /// Add precomputed item digest into `CardinalityEstimator`
    #[inline]
    pub fn add_digest(&mut self, digest: &[u8]) {
        let (idx, rank) = bucket_and_rank(digest, self.precision);
        let register = &mut self.registers[idx];
        *register = (*register).max(rank);
    }

    /// Return cardinality estimate
    #[inline]
    pub fn estimate(&self) -> f64 {
        estimate(&self.registers, self.alpha)
    }

    /// Return cardinality estimate truncated to an integer
    #[inline]
    pub fn cardinality(&self) -> u64 {
        self.estimate() as u64
    }

    /// Merge cardinality estimators.
    ///
    /// Fails without modifying `self` if `rhs` has a different bucket count.
    pub fn merge(&mut self, rhs: &Self) -> Result<(), EstimatorError> {
        if self.bucket_count() != rhs.bucket_count() {
            debug!(
                expected = self.bucket_count(),
                found = rhs.bucket_count(),
                "rejected merge of estimators with different bucket counts"
            );
            return Err(EstimatorError::IncompatibleShape {
                expected: self.bucket_count(),
                found: rhs.bucket_count(),
            });
        }

        for (lhs, &rhs) in self.registers.iter_mut().zip(rhs.registers.iter()) {
            *lhs = (*lhs).max(rhs);
        }
        Ok(())
    }

    /// Number of HyperLogLog registers
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.registers.len()
    }

    /// Number of digest bits used for register index
    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Bias correction constant
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// HyperLogLog registers
    #[inline]
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Expected relative standard error of the estimate, `1.04 / sqrt(m)`
    #[inline]
    pub fn relative_error(&self) -> f64 {
        1.04 / (self.bucket_count() as f64).sqrt()
    }

    /// Return memory size of `CardinalityEstimator`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.registers.capacity()
    }

    /// Create `CardinalityEstimator` from previously exported registers.
    ///
    /// The number of registers must be a valid bucket count.
    pub fn from_registers(registers: Vec<u8>) -> Result<Self, EstimatorError> {
        let (precision, alpha) = Self::shape(registers.len())?;
        Ok(Self {
            registers,
            precision,
            alpha,
            _digest: PhantomData,
        })
    }
}

impl<D: Digest> Clone for CardinalityEstimator<D> {
    fn clone(&self) -> Self {
        Self {
            registers: self.registers.clone(),
            precision: self.precision,
            alpha: self.alpha,
            _digest: PhantomData,
        }
    }
}

impl<D: Digest> PartialEq for CardinalityEstimator<D> {
    /// Estimators are equal when their registers are equal
    fn eq(&self, rhs: &Self) -> bool {
        self.registers == rhs.registers
    }
}

impl<D: Digest> Eq for CardinalityEstimator<D> {}

impl<D: Digest> Debug for CardinalityEstimator<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ buckets: {}, estimate: {}, size: {} }}",
            self.bucket_count(),
            self.cardinality(),
            self.size_of()
        )
    }
}
