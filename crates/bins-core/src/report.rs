//! Human-readable dumps and comparisons of bins
//!
//! The text produced here is for diagnostics only and carries no format
//! guarantees.

use crate::traits::{Bin1D, MomentBin1D};
use crate::Result;
use std::fmt::{self, Write};

/// Bins with unbounded power orders list orders up to this one
const MAX_REPORTED_ORDER: i32 = 6;

/// Relative error of `a` against `b`, in percent
pub fn rel_error(a: f64, b: f64) -> f64 {
    100.0 * (1.0 - a / b)
}

fn format_measure(value: Result<f64>) -> String {
    match value {
        Ok(v) => v.to_string(),
        Err(e) => format!("n/a ({e})"),
    }
}

/// Percent differences of the basic statistics of `a` from `b`
pub fn basic_differences<A, B>(a: &A, b: &B) -> String
where
    A: Bin1D + ?Sized,
    B: Bin1D + ?Sized,
{
    let rows = [
        ("Size", a.size() as f64, b.size() as f64),
        ("Sum", a.sum(), b.sum()),
        ("SumOfSquares", a.sum_of_squares(), b.sum_of_squares()),
        ("Min", a.min(), b.min()),
        ("Max", a.max(), b.max()),
        ("Mean", a.mean(), b.mean()),
        ("RMS", a.rms(), b.rms()),
        ("Variance", a.variance(), b.variance()),
        ("Std dev", a.standard_deviation(), b.standard_deviation()),
        ("Std error", a.standard_error(), b.standard_error()),
    ];

    let mut out = String::from("\nDifferences [percent]");
    for (label, x, y) in rows {
        let _ = write!(out, "\n{label}: {}", rel_error(x, y));
    }
    out
}

/// Percent differences of the moment statistics both bins can provide
pub fn moment_differences<A, B>(a: &A, b: &B) -> String
where
    A: MomentBin1D + ?Sized,
    B: MomentBin1D + ?Sized,
{
    let rows: [(&str, Result<f64>, Result<f64>); 5] = [
        ("Geometric mean", a.geometric_mean(), b.geometric_mean()),
        ("Harmonic mean", a.harmonic_mean(), b.harmonic_mean()),
        ("Product", a.product(), b.product()),
        ("Skew", a.skew(), b.skew()),
        ("Kurtosis", a.kurtosis(), b.kurtosis()),
    ];

    let mut out = String::new();
    for (label, x, y) in rows {
        if let (Ok(x), Ok(y)) = (x, y) {
            let _ = write!(out, "\n{label}: {}", rel_error(x, y));
        }
    }
    out
}

/// Write the basic statistics of `bin`, one per line
pub fn write_basic<B: Bin1D + ?Sized>(f: &mut fmt::Formatter<'_>, bin: &B) -> fmt::Result {
    writeln!(f, "{}", bin.name())?;
    writeln!(f, "-------------")?;
    writeln!(f, "Size: {}", bin.size())?;
    writeln!(f, "Sum: {}", bin.sum())?;
    writeln!(f, "SumOfSquares: {}", bin.sum_of_squares())?;
    writeln!(f, "Min: {}", bin.min())?;
    writeln!(f, "Max: {}", bin.max())?;
    writeln!(f, "Mean: {}", bin.mean())?;
    writeln!(f, "RMS: {}", bin.rms())?;
    writeln!(f, "Variance: {}", bin.variance())?;
    writeln!(f, "Std.Dev.: {}", bin.standard_deviation())?;
    writeln!(f, "Std.Error: {}", bin.standard_error())
}

/// Write the optional measures of `bin` and its moments around zero and the mean
pub fn write_moments<B: MomentBin1D + ?Sized>(f: &mut fmt::Formatter<'_>, bin: &B) -> fmt::Result {
    writeln!(f, "Geometric mean: {}", format_measure(bin.geometric_mean()))?;
    writeln!(f, "Product: {}", format_measure(bin.product()))?;
    writeln!(f, "Harmonic mean: {}", format_measure(bin.harmonic_mean()))?;
    writeln!(
        f,
        "Sum of inversions: {}",
        format_measure(bin.sum_of_inversions())
    )?;
    writeln!(f, "Skew: {}", format_measure(bin.skew()))?;
    writeln!(f, "Kurtosis: {}", format_measure(bin.kurtosis()))?;

    let lowest = bin.min_order_for_sum_of_powers().max(-1);
    let highest = bin.max_order_for_sum_of_powers().min(MAX_REPORTED_ORDER);
    for k in lowest..=highest {
        writeln!(f, "Sum of powers({k}): {}", format_measure(bin.sum_of_powers(k)))?;
    }
    let mean = bin.mean();
    for k in 0..=highest {
        writeln!(
            f,
            "Moment({k},0): {}  Moment({k},mean()): {}",
            format_measure(bin.moment(k, 0.0)),
            format_measure(bin.moment(k, mean))
        )?;
    }
    Ok(())
}
