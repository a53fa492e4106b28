//! Greenwald-Khanna ε-approximate quantile summary
//!
//! Backed by [`quantiles::greenwald_khanna::Stream`], which answers any
//! quantile query within `εn` ranks. The stream cannot be copied, so cloning
//! a finder freezes its summary behind an [`Arc`] that both copies keep
//! reading, and each copy feeds new values into a fresh summary of its own.
//! Queries over several summaries combine their rank estimates.

use super::QuantileFinder;
use bins_core::{Error, Result};
use ordered_float::OrderedFloat;
use parking_lot::Mutex;
use quantiles::greenwald_khanna::Stream;
use std::iter;
use std::sync::Arc;
use tracing::trace;

type Summary = Stream<OrderedFloat<f64>>;

/// Largest epsilon the summary runs at; a coarser request is met by it
const MAX_EPSILON: f64 = 0.5;

#[derive(Debug)]
struct Segments {
    /// Summaries frozen by a clone, read by every copy
    frozen: Vec<Arc<Summary>>,
    /// Summary receiving new values
    live: Summary,
}

impl Segments {
    fn new(epsilon: f64) -> Self {
        Self {
            frozen: Vec::new(),
            live: Summary::new(epsilon),
        }
    }

    /// Every non-empty summary
    fn parts(&self) -> Vec<&Summary> {
        self.frozen
            .iter()
            .map(Arc::as_ref)
            .chain(iter::once(&self.live))
            .filter(|s| s.n() > 0)
            .collect()
    }

    fn freeze(&mut self, epsilon: f64) {
        if self.live.n() == 0 {
            return;
        }
        let live = std::mem::replace(&mut self.live, Summary::new(epsilon));
        trace!(n = live.n(), tuples = live.s(), "froze quantile summary");
        self.frozen.push(Arc::new(live));
    }
}

/// Deterministic ε-approximate quantile summary
#[derive(Debug)]
pub struct GreenwaldKhannaFinder {
    epsilon: f64,
    segments: Mutex<Segments>,
}

impl GreenwaldKhannaFinder {
    /// Create a summary with rank error at most `epsilon * n`.
    ///
    /// Fails unless `0 < epsilon <= 1`. Values above 0.5 run at 0.5.
    pub fn new(epsilon: f64) -> Result<Self> {
        if !(epsilon > 0.0 && epsilon <= 1.0) {
            return Err(Error::invalid_parameter(format!(
                "Greenwald-Khanna epsilon {epsilon} must be in (0, 1]"
            )));
        }
        Ok(Self::with_epsilon(epsilon))
    }

    /// Like [`new`](Self::new) with `epsilon` clamped into `[1e-9, 0.5]`
    pub(crate) fn with_epsilon(epsilon: f64) -> Self {
        let epsilon = if epsilon.is_nan() {
            MAX_EPSILON
        } else {
            epsilon.clamp(1e-9, MAX_EPSILON)
        };
        Self {
            epsilon,
            segments: Mutex::new(Segments::new(epsilon)),
        }
    }

    /// Epsilon the summary runs at
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of summaries a query consults
    pub fn summaries(&self) -> usize {
        self.segments.lock().parts().len()
    }
}

/// Fraction passed to `Stream::quantile` so that it targets rank index `r` of `n`
fn rank_fraction(r: usize, n: usize) -> f64 {
    ((r as f64 + 0.5) / n as f64).min(1.0)
}

/// Estimated number of values of `summary` that are `<= x`.
///
/// `Stream::quantile` is non-decreasing in its rank, so this counts the rank
/// indices `0..=n` whose answer is `<= x`. The count is within `εn` of the
/// true one.
fn count_at_most(summary: &Summary, x: OrderedFloat<f64>) -> usize {
    let n = summary.n();
    let (mut lo, mut hi) = (0, n + 1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if *summary.quantile(rank_fraction(mid, n)) <= x {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo.min(n)
}

fn total_at_most(parts: &[&Summary], x: OrderedFloat<f64>) -> usize {
    parts.iter().map(|part| count_at_most(part, x)).sum()
}

/// Smallest retained value whose combined count reaches rank `phi * n`
fn combined_quantile(parts: &[&Summary], n: usize, phi: f64) -> f64 {
    let target = ((phi * n as f64).ceil() as usize).clamp(1, n);
    parts
        .iter()
        .filter_map(|part| {
            let m = part.n();
            let (mut lo, mut hi) = (0, m + 1);
            while lo < hi {
                let mid = lo + (hi - lo) / 2;
                let candidate = *part.quantile(rank_fraction(mid, m));
                if total_at_most(parts, candidate) >= target {
                    hi = mid;
                } else {
                    lo = mid + 1;
                }
            }
            (lo <= m).then(|| *part.quantile(rank_fraction(lo, m)))
        })
        .min()
        .map_or(f64::NAN, OrderedFloat::into_inner)
}

impl QuantileFinder for GreenwaldKhannaFinder {
    fn name(&self) -> &'static str {
        "GreenwaldKhannaFinder"
    }

    fn add_all_of(&mut self, values: &[f64]) {
        let live = &mut self.segments.get_mut().live;
        for &x in values {
            live.insert(OrderedFloat(x));
        }
    }

    fn clear(&mut self) {
        *self.segments.get_mut() = Segments::new(self.epsilon);
    }

    fn phi(&self, x: f64) -> f64 {
        let segments = self.segments.lock();
        let parts = segments.parts();
        let n: usize = parts.iter().map(|part| part.n()).sum();
        if n == 0 {
            return f64::NAN;
        }
        total_at_most(&parts, OrderedFloat(x)) as f64 / n as f64
    }

    fn quantile_elements(&self, phis: &[f64]) -> Vec<f64> {
        let segments = self.segments.lock();
        match segments.parts().as_slice() {
            [] => vec![f64::NAN; phis.len()],
            [single] => phis
                .iter()
                .map(|&phi| single.quantile(phi.clamp(0.0, 1.0)).into_inner())
                .collect(),
            parts => {
                let n = parts.iter().map(|part| part.n()).sum();
                phis.iter()
                    .map(|&phi| combined_quantile(parts, n, phi.clamp(0.0, 1.0)))
                    .collect()
            }
        }
    }

    fn size(&self) -> usize {
        let segments = self.segments.lock();
        segments.frozen.iter().map(|s| s.n()).sum::<usize>() + segments.live.n()
    }

    fn memory(&self) -> usize {
        let segments = self.segments.lock();
        segments.frozen.iter().map(|s| s.s()).sum::<usize>() + segments.live.s()
    }

    fn clone_box(&self) -> Box<dyn QuantileFinder> {
        let mut segments = self.segments.lock();
        segments.freeze(self.epsilon);
        Box::new(Self {
            epsilon: self.epsilon,
            segments: Mutex::new(Segments {
                frozen: segments.frozen.clone(),
                live: Summary::new(self.epsilon),
            }),
        })
    }
}
