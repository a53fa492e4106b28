use super::QuantileFinder;
use bins_core::{descriptive, Cached};

/// Retains every value; quantiles interpolate linearly between order statistics
#[derive(Debug, Clone, Default)]
pub struct ExactQuantileFinder {
    values: Vec<f64>,
    sorted: Cached<Vec<f64>>,
}

impl ExactQuantileFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finder with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            sorted: Cached::new(),
        }
    }

    fn sorted(&self) -> &[f64] {
        self.sorted.get_or_compute(|| {
            let mut sorted = self.values.clone();
            sorted.sort_by(f64::total_cmp);
            sorted
        })
    }
}

impl QuantileFinder for ExactQuantileFinder {
    fn name(&self) -> &'static str {
        "ExactQuantileFinder"
    }

    fn add_all_of(&mut self, values: &[f64]) {
        if values.is_empty() {
            return;
        }
        self.values.extend_from_slice(values);
        self.sorted.invalidate();
    }

    fn clear(&mut self) {
        self.values.clear();
        self.sorted.invalidate();
    }

    fn phi(&self, x: f64) -> f64 {
        descriptive::quantile_inverse_sorted(self.sorted(), x)
    }

    fn quantile_elements(&self, phis: &[f64]) -> Vec<f64> {
        descriptive::quantiles_sorted(self.sorted(), phis)
    }

    fn size(&self) -> usize {
        self.values.len()
    }

    fn memory(&self) -> usize {
        self.values.len()
    }

    fn clone_box(&self) -> Box<dyn QuantileFinder> {
        Box::new(self.clone())
    }
}
