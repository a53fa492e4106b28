//! Thread-safe handle around any bin
//!
//! Bins themselves take `&mut self` for every mutation and are not internally
//! synchronized. [`SharedBin`] puts one behind an `Arc<RwLock<_>>` so that
//! several threads can feed and query it. Queries take the read lock and
//! mutations the write lock. Lazy caches are filled through shared
//! references, so concurrent readers may fill them.

use bins_core::Bin1D;
use parking_lot::RwLock;
use std::sync::Arc;

/// A bin shared between threads
#[derive(Debug, Default)]
pub struct SharedBin<B> {
    inner: Arc<RwLock<B>>,
}

impl<B> Clone for SharedBin<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: Bin1D> SharedBin<B> {
    pub fn new(bin: B) -> Self {
        Self {
            inner: Arc::new(RwLock::new(bin)),
        }
    }

    /// Run `f` with shared access to the bin
    pub fn with<T>(&self, f: impl FnOnce(&B) -> T) -> T {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access to the bin
    pub fn with_mut<T>(&self, f: impl FnOnce(&mut B) -> T) -> T {
        f(&mut self.inner.write())
    }

    pub fn add(&self, element: f64) {
        self.inner.write().add(element);
    }

    pub fn add_all_of(&self, elements: &[f64]) {
        self.inner.write().add_all_of(elements);
    }

    /// Run `f` with shared access to this bin and `other` at once.
    ///
    /// Both locks are taken in address order, so concurrent calls with the
    /// arguments swapped cannot deadlock. Passing the same bin twice locks
    /// it once.
    pub fn with_pair<T>(&self, other: &SharedBin<B>, f: impl FnOnce(&B, &B) -> T) -> T {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            let guard = self.inner.read();
            return f(&guard, &guard);
        }
        if Arc::as_ptr(&self.inner) < Arc::as_ptr(&other.inner) {
            let first = self.inner.read();
            let second = other.inner.read();
            f(&first, &second)
        } else {
            let first = other.inner.read();
            let second = self.inner.read();
            f(&second, &first)
        }
    }

    /// Unwrap the bin if this is the last handle, otherwise give the handle back
    pub fn into_inner(self) -> std::result::Result<B, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<B: Bin1D + Clone> SharedBin<B> {
    /// A copy of the bin as it is now
    pub fn snapshot(&self) -> B {
        self.inner.read().clone()
    }
}

impl<B: Bin1D> From<B> for SharedBin<B> {
    fn from(bin: B) -> Self {
        Self::new(bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DynamicBin1D;
    use bins_quantile::QuantileEstimator;
    use std::thread;

    #[test]
    fn test_concurrent_adds() {
        let shared = SharedBin::new(DynamicBin1D::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let bin = shared.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        bin.add((t * 250 + i) as f64);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.with(|b| b.size()), 1000);
        assert_eq!(shared.with(|b| b.median().unwrap()), 499.5);
        let bin = shared.into_inner().unwrap();
        assert_eq!(bin.sum(), 999.0 * 1000.0 / 2.0);
    }

    #[test]
    fn test_with_pair_both_orders() {
        let a = SharedBin::new(DynamicBin1D::new());
        let b = SharedBin::new(DynamicBin1D::new());
        a.add_all_of(&[1.0, 2.0, 3.0]);
        b.add_all_of(&[2.0, 4.0, 6.0]);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let (a, b) = (a.clone(), b.clone());
                thread::spawn(move || {
                    let (x, y) = if t % 2 == 0 { (&a, &b) } else { (&b, &a) };
                    for _ in 0..100 {
                        x.with_pair(y, |p, q| p.correlation(q).unwrap());
                        x.with_mut(|bin| bin.sort());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let r = a.with_pair(&b, |p, q| p.correlation(q).unwrap());
        assert!((r - 1.0).abs() < 1e-12);
        assert_eq!(b.with_pair(&a, |p, q| p.size() + q.size()), 6);
        assert_eq!(a.with_pair(&a, |p, q| p.sum() + q.sum()), 12.0);
    }

    #[test]
    fn test_snapshot_and_into_inner() {
        let shared: SharedBin<DynamicBin1D> = DynamicBin1D::new().into();
        shared.with_mut(|b| b.add_all_of(&[1.0, 2.0]));
        let copy = shared.snapshot();
        shared.add(3.0);
        assert_eq!(copy.size(), 2);

        let other = shared.clone();
        let shared = shared.into_inner().unwrap_err();
        drop(other);
        assert_eq!(shared.into_inner().unwrap().size(), 3);
    }
}
