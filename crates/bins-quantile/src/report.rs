//! Quantile sections of the diagnostic dumps

use crate::traits::QuantileEstimator;
use bins_core::report::rel_error;
use std::fmt::{self, Write};

const QUARTILES: [f64; 3] = [0.25, 0.5, 0.75];

/// Percent differences of the quartiles and of `quantile_inverse(median)`
pub fn quantile_differences<A, B>(a: &A, b: &B) -> String
where
    A: QuantileEstimator + ?Sized,
    B: QuantileEstimator + ?Sized,
{
    let mut out = String::new();
    if let (Ok(qa), Ok(qb)) = (a.quantiles(&QUARTILES), b.quantiles(&QUARTILES)) {
        let _ = write!(out, "\n25%, 50%, 75% Quantiles: ");
        for (x, y) in qa.iter().zip(&qb) {
            let _ = write!(out, "{}, ", rel_error(*x, *y));
        }
        if let (Ok(ia), Ok(ib)) = (a.quantile_inverse(qa[1]), b.quantile_inverse(qb[1])) {
            let _ = write!(out, "\nquantileInverse(median): {}", rel_error(ia, ib));
        }
    }
    out
}

/// Write the quartiles and `quantile_inverse(median)` of `bin`
pub fn write_quantiles<B: QuantileEstimator + ?Sized>(
    f: &mut fmt::Formatter<'_>,
    bin: &B,
) -> fmt::Result {
    match bin.quantiles(&QUARTILES) {
        Ok(q) => {
            writeln!(f, "25%, 50%, 75% Quantiles: {}, {}, {}", q[0], q[1], q[2])?;
            match bin.quantile_inverse(q[1]) {
                Ok(inverse) => writeln!(f, "quantileInverse(median): {inverse}"),
                Err(e) => writeln!(f, "quantileInverse(median): n/a ({e})"),
            }
        }
        Err(e) => writeln!(f, "25%, 50%, 75% Quantiles: n/a ({e})"),
    }
}
