//! Pure descriptive-statistics routines
//!
//! Everything in this module is a stateless function over a slice (or over
//! previously accumulated sums). Bins use these to fold new elements into
//! their running aggregates and to derive statistics from them.
//!
//! Functions named `*_sorted` require their input to be sorted ascending.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Running `(min, max, sum, sum_of_squares)` tuple folded by [`incremental_update`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub sum_of_squares: f64,
}

impl BasicStats {
    /// Accumulator state before any element has been folded in
    pub const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
        sum: 0.0,
        sum_of_squares: 0.0,
    };

    /// Compute the tuple for a whole slice in one pass
    pub fn of(data: &[f64]) -> Self {
        let mut stats = Self::EMPTY;
        incremental_update(data, &mut stats);
        stats
    }
}

impl Default for BasicStats {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Fold `data` into the running accumulator
pub fn incremental_update(data: &[f64], acc: &mut BasicStats) {
    let mut min = acc.min;
    let mut max = acc.max;
    let mut sum = acc.sum;
    let mut sum_of_squares = acc.sum_of_squares;

    for &x in data {
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
        sum += x;
        sum_of_squares += x * x;
    }

    *acc = BasicStats {
        min,
        max,
        sum,
        sum_of_squares,
    };
}

/// Fold `data` into consecutive sums of powers.
///
/// `sums[j]` accumulates `Σ x^(from_order + j)`.
pub fn incremental_update_sums_of_powers(data: &[f64], from_order: i32, sums: &mut [f64]) {
    if sums.is_empty() {
        return;
    }
    for &x in data {
        let mut pow = x.powi(from_order);
        for slot in sums.iter_mut() {
            *slot += pow;
            pow *= x;
        }
    }
}

/// `Σ x^k`
pub fn sum_of_powers(data: &[f64], k: i32) -> f64 {
    match k {
        0 => data.len() as f64,
        1 => data.iter().sum(),
        2 => data.iter().map(|x| x * x).sum(),
        _ => data.iter().map(|x| x.powi(k)).sum(),
    }
}

/// `Σ ln(x)`
pub fn sum_of_logarithms(data: &[f64]) -> f64 {
    data.iter().map(|x| x.ln()).sum()
}

/// `Σ 1/x`
pub fn sum_of_inversions(data: &[f64]) -> f64 {
    data.iter().map(|x| 1.0 / x).sum()
}

/// Binomial coefficient `n choose k` as a float
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

/// `Σ(x - c)^k / size` reconstructed from the sums of powers `sums[j] = Σ x^j`, `j = 0..=k`
pub fn moment_from_sums(k: usize, c: f64, size: usize, sums: &[f64]) -> f64 {
    debug_assert!(sums.len() > k);
    let mut total = 0.0;
    for i in 0..=k {
        total += binomial(k, i) * (-c).powi(i as i32) * sums[k - i];
    }
    total / size as f64
}

/// `Σ(x - c)^k / size` computed directly from the elements
pub fn moment(data: &[f64], k: i32, c: f64) -> f64 {
    let sum: f64 = data.iter().map(|x| (x - c).powi(k)).sum();
    sum / data.len() as f64
}

/// Arithmetic mean, NaN for an empty sample
pub fn mean(size: usize, sum: f64) -> f64 {
    sum / size as f64
}

/// Sample variance `(Σx² - mean·Σx) / (n - 1)`, NaN when `size < 2`
pub fn sample_variance(size: usize, sum: f64, sum_of_squares: f64) -> f64 {
    if size < 2 {
        return f64::NAN;
    }
    let mean = sum / size as f64;
    (sum_of_squares - mean * sum) / (size - 1) as f64
}

/// Root mean square
pub fn rms(size: usize, sum_of_squares: f64) -> f64 {
    (sum_of_squares / size as f64).sqrt()
}

/// Standard error of the mean
pub fn standard_error(size: usize, variance: f64) -> f64 {
    (variance / size as f64).sqrt()
}

pub fn skew(moment3: f64, standard_deviation: f64) -> f64 {
    moment3 / standard_deviation.powi(3)
}

/// Excess kurtosis
pub fn kurtosis(moment4: f64, standard_deviation: f64) -> f64 {
    moment4 / standard_deviation.powi(4) - 3.0
}

pub fn geometric_mean(size: usize, sum_of_logarithms: f64) -> f64 {
    (sum_of_logarithms / size as f64).exp()
}

pub fn harmonic_mean(size: usize, sum_of_inversions: f64) -> f64 {
    size as f64 / sum_of_inversions
}

pub fn product(sum_of_logarithms: f64) -> f64 {
    sum_of_logarithms.exp()
}

/// Linearly interpolated quantile of sorted data.
///
/// The position is `phi * (n - 1)`; the result interpolates between the two
/// neighbouring order statistics.
pub fn quantile_sorted(sorted: &[f64], phi: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let index = phi * (n - 1) as f64;
    let lhs = index.floor() as usize;
    let delta = index - lhs as f64;
    if lhs >= n - 1 {
        return sorted[n - 1];
    }
    (1.0 - delta) * sorted[lhs] + delta * sorted[lhs + 1]
}

/// Quantiles of sorted data for each of `phis`
pub fn quantiles_sorted(sorted: &[f64], phis: &[f64]) -> Vec<f64> {
    phis.iter().map(|&phi| quantile_sorted(sorted, phi)).collect()
}

/// Number of elements `<= x`, linearly interpolated between neighbouring
/// order statistics when `x` is not itself an element
pub fn rank_interpolated(sorted: &[f64], x: f64) -> f64 {
    let at_or_below = sorted.partition_point(|&v| v <= x);
    let insertion_point = sorted.partition_point(|&v| v < x);
    if at_or_below > insertion_point {
        return at_or_below as f64;
    }
    if insertion_point == 0 || insertion_point == sorted.len() {
        return insertion_point as f64;
    }
    let lo = sorted[insertion_point - 1];
    let hi = sorted[insertion_point];
    insertion_point as f64 + (x - lo) / (hi - lo)
}

/// Fraction of elements `<= x` (interpolated), NaN for empty data
pub fn quantile_inverse_sorted(sorted: &[f64], x: f64) -> f64 {
    rank_interpolated(sorted, x) / sorted.len() as f64
}

/// Sample covariance of two equally sized samples
pub fn covariance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::SizeMismatch {
            expected: a.len(),
            actual: b.len(),
            context: "covariance",
        });
    }
    Error::check_size(a.len(), 2)?;

    let mut sum_x = a[0];
    let mut sum_y = b[0];
    let mut s_xy = 0.0;
    for i in 1..a.len() {
        let x = a[i];
        let y = b[i];
        sum_x += x;
        s_xy += (x - sum_x / (i + 1) as f64) * (y - sum_y / i as f64);
        sum_y += y;
    }
    Ok(s_xy / (a.len() - 1) as f64)
}

/// Pearson correlation given both samples and their standard deviations
pub fn correlation(a: &[f64], sd_a: f64, b: &[f64], sd_b: f64) -> Result<f64> {
    Ok(covariance(a, b)? / (sd_a * sd_b))
}

/// Auto-correlation at `lag`
pub fn auto_correlation(data: &[f64], lag: usize, mean: f64, variance: f64) -> Result<f64> {
    let n = data.len();
    if lag >= n {
        return Err(Error::invalid_parameter(format!(
            "Lag {lag} is too large for {n} elements"
        )));
    }
    let run: f64 = (lag..n)
        .map(|i| (data[i] - mean) * (data[i - lag] - mean))
        .sum();
    Ok((run / (n - lag) as f64) / variance)
}

/// Mean of sorted data with the `left` smallest and `right` largest elements excluded.
///
/// Starts from the full-sample `mean` and removes the extremes one at a time.
pub fn trimmed_mean_sorted(sorted: &[f64], mean: f64, left: usize, right: usize) -> Result<f64> {
    let n = sorted.len();
    Error::check_size(n, 1)?;
    left.checked_add(right)
        .filter(|&trimmed| trimmed < n)
        .ok_or(Error::InsufficientData {
            expected: left.saturating_add(right).saturating_add(1),
            actual: n,
        })?;

    let mut mean = mean;
    let mut remaining = n;
    for &x in &sorted[..left] {
        remaining -= 1;
        mean += (mean - x) / remaining as f64;
    }
    for &x in sorted[n - right..].iter().rev() {
        remaining -= 1;
        mean += (mean - x) / remaining as f64;
    }
    Ok(mean)
}

/// Distinct values of sorted data and their multiplicities, in lock-step.
///
/// Both output vectors are cleared first.
pub fn frequencies_sorted(sorted: &[f64], distinct: &mut Vec<f64>, frequencies: &mut Vec<usize>) {
    distinct.clear();
    frequencies.clear();

    let mut iter = sorted.iter().copied();
    let Some(mut current) = iter.next() else {
        return;
    };
    let mut count = 1;
    for x in iter {
        if x == current {
            count += 1;
        } else {
            distinct.push(current);
            frequencies.push(count);
            current = x;
            count = 1;
        }
    }
    distinct.push(current);
    frequencies.push(count);
}
