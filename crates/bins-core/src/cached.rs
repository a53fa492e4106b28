//! Lazily computed aggregates with structural invalidation
//!
//! A [`Cached`] value is filled on first read under shared access and cleared
//! only through `&mut self`, so any mutation of the owning bin that calls
//! [`Cached::invalidate`] cannot race with a reader.

use std::sync::OnceLock;

/// An aggregate that is either stale or holds a value computed from the
/// current contents of its owner
#[derive(Debug)]
pub struct Cached<T> {
    cell: OnceLock<T>,
}

impl<T> Cached<T> {
    /// Create a stale cache
    pub fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the cached value, computing it first if stale
    pub fn get_or_compute(&self, compute: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(compute)
    }

    /// The cached value, if valid
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Whether a value is currently cached
    pub fn is_valid(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Mark the cache stale
    pub fn invalidate(&mut self) {
        self.cell.take();
    }

    /// Mutable access to a valid value, for updates that keep it consistent
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.cell.get_mut()
    }
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Cached<T> {
    fn clone(&self) -> Self {
        let cell = OnceLock::new();
        if let Some(value) = self.cell.get() {
            let _ = cell.set(value.clone());
        }
        Self { cell }
    }
}
