//! ## HyperLogLog estimate
//! Turns a register array into a cardinality estimate.
//!
//! [Original HyperLogLog paper](https://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)
//!
//! The raw estimate `alpha * m^2 / sum(2^-register)` is biased at both ends of its range:
//! - small range: while `raw <= 2.5 * m` and some registers are still zero,
//!   linear counting `m * ln(m / zeros)` is used instead.
//! - large range: above `2^32 / 30` the estimate is corrected for hash collisions
//!   with `-2^32 * ln(1 - estimate / 2^32)`.

use tracing::trace;

/// `2^32`, upper end of the range where the large range correction applies.
const TWO_POW_32: f64 = 4_294_967_296.0;
/// Estimates above this threshold get the large range correction.
const LARGE_RANGE_THRESHOLD: f64 = TWO_POW_32 / 30.0;

/// Parameter for bias correction
#[inline]
pub(crate) fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

/// Return cardinality estimate of `registers` with bias correction constant `alpha`
pub(crate) fn estimate(registers: &[u8], alpha: f64) -> f64 {
    let m = registers.len() as f64;
    let (zeros, sum) = registers
        .iter()
        .fold((0usize, 0.0f64), |(zeros, sum), &rank| {
            (zeros + usize::from(rank == 0), sum + 2f64.powi(-i32::from(rank)))
        });
    let raw = alpha * m * m / sum;

    let mut estimate = raw;
    // without zero registers linear counting is undefined, keep the raw estimate
    if raw <= 2.5 * m && zeros > 0 {
        estimate = linear_counting(m, zeros as f64);
        trace!(raw, zeros, estimate, "small range correction");
    }
    if estimate > LARGE_RANGE_THRESHOLD {
        estimate = large_range_correction(estimate);
        trace!(raw, estimate, "large range correction");
    }
    estimate
}

/// Linear counting estimate for `m` registers of which `zeros` are still unset
#[inline]
fn linear_counting(m: f64, zeros: f64) -> f64 {
    m * (m / zeros).ln()
}

/// Correct `estimate` for hash collisions near the 32-bit range boundary.
///
/// The correction is undefined once `estimate` reaches `2^32`, such estimates are returned as is.
#[inline]
fn large_range_correction(estimate: f64) -> f64 {
    let saturation = 1.0 - estimate / TWO_POW_32;
    if saturation > 0.0 {
        -TWO_POW_32 * saturation.ln()
    } else {
        estimate
    }
}
