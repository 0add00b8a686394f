//! Largest-remainder rounding of percentages.
//!
//! Rounds a vector of real-valued shares to integers that add up to an exact
//! total (100 for percentages). Every share is floored first, then the
//! shortfall is handed out one unit at a time to the shares where the extra
//! unit costs the least weighted error.
//!
//! # Example
//!
//! ```
//! use gtest_report::round_to_100;
//!
//! let rounded = round_to_100(&[33.3, 33.3, 33.4])?;
//! assert_eq!(rounded, vec![33, 33, 34]);
//! # Ok::<(), gtest_report::Error>(())
//! ```

use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Relative tolerance used when checking that shares add up to their total.
pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Weighted squared error of representing `actual` as `rounded`.
///
/// The squared error is divided by `sqrt(max(actual, 1.0))` so that large
/// categories do not dominate the penalty; the floor at 1.0 keeps categories
/// near zero from blowing up the weight.
pub fn error_weight(actual: f64, rounded: f64) -> f64 {
    let divisor = actual.max(1.0).sqrt();
    (rounded - actual).powi(2) / divisor
}

/// Whether `a` and `b` are equal within [`RELATIVE_TOLERANCE`].
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= RELATIVE_TOLERANCE * a.abs().max(b.abs())
}

/// Round percentages to integers that sum to exactly 100.
///
/// The output is positionally aligned with the input and every element is
/// either the floor of its input or one more than that.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the input does not sum to 100 within
/// tolerance (an empty slice included) or holds a negative or non-finite
/// value.
pub fn round_to_100(percentages: &[f64]) -> Result<Vec<u32>> {
    allocate(percentages, 100)
}

/// Round shares to integers that sum to exactly `total`.
///
/// [`round_to_100`] is `allocate(shares, 100)`. Renderers use other totals,
/// such as the number of cells in a progress bar.
pub fn allocate(shares: &[f64], total: u32) -> Result<Vec<u32>> {
    if let Some(bad) = shares.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(Error::InvalidInput(format!(
            "share {} is not a finite non-negative number",
            bad
        )));
    }

    let sum: f64 = shares.iter().sum();
    if !is_close(sum, f64::from(total)) {
        return Err(Error::InvalidInput(format!(
            "shares sum to {}, expected {}",
            sum, total
        )));
    }

    let mut rounded: Vec<u32> = shares.iter().map(|v| v.floor() as u32).collect();

    let floored: u32 = rounded.iter().sum();
    let deficit = total.checked_sub(floored).ok_or_else(|| {
        Error::InvalidInput(format!("floored shares sum to {}, above {}", floored, total))
    })?;

    // Cost of one extra unit per share, cheapest first. The sort is stable,
    // so exact ties keep input order.
    let mut rank: Vec<(f64, usize)> = shares
        .iter()
        .zip(&rounded)
        .enumerate()
        .map(|(i, (&actual, &base))| {
            let base = f64::from(base);
            let cost = error_weight(actual, base + 1.0) - error_weight(actual, base);
            (cost, i)
        })
        .collect();
    rank.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    for &(_, i) in rank.iter().take(deficit as usize) {
        rounded[i] += 1;
    }

    Ok(rounded)
}
