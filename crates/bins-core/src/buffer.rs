//! Buffered sinks for streaming elements into a bin
//!
//! Adding elements one at a time pays the per-call overhead of every running
//! aggregate. A [`BufferedBin`] collects elements and hands them to the bin in
//! batches, flushing when full and when dropped.

use crate::traits::Bin1D;

/// A sink that receives elements and forwards them somewhere on `flush`
pub trait ElementBuffer {
    fn add(&mut self, element: f64);

    fn add_all_of(&mut self, elements: &[f64]) {
        for &element in elements {
            self.add(element);
        }
    }

    /// Discard pending, not yet flushed elements
    fn clear(&mut self);

    /// Forward pending elements to their destination
    fn flush(&mut self);
}

/// Batches adds into a bin
pub struct BufferedBin<'a, B: Bin1D + ?Sized> {
    target: &'a mut B,
    pending: Vec<f64>,
    capacity: usize,
}

impl<'a, B: Bin1D + ?Sized> BufferedBin<'a, B> {
    /// Create a buffer of the given capacity (at least 1) in front of `target`
    pub fn new(target: &'a mut B, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            target,
            pending: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of elements waiting to be flushed
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<B: Bin1D + ?Sized> ElementBuffer for BufferedBin<'_, B> {
    fn add(&mut self, element: f64) {
        self.pending.push(element);
        if self.pending.len() >= self.capacity {
            self.flush();
        }
    }

    fn clear(&mut self) {
        self.pending.clear();
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.target.add_all_of(&self.pending);
            self.pending.clear();
        }
    }
}

impl<B: Bin1D + ?Sized> Drop for BufferedBin<'_, B> {
    fn drop(&mut self) {
        self.flush();
    }
}

/// A plain vector is its own destination: `clear` empties it and `flush` is a no-op
impl ElementBuffer for Vec<f64> {
    fn add(&mut self, element: f64) {
        self.push(element);
    }

    fn add_all_of(&mut self, elements: &[f64]) {
        self.extend_from_slice(elements);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn flush(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticBin1D;

    #[test]
    fn test_flushes_when_full() {
        let mut bin = StaticBin1D::new();
        {
            let mut buffer = bin.buffered(3);
            buffer.add(1.0);
            buffer.add(2.0);
            assert_eq!(buffer.pending(), 2);
            buffer.add(3.0);
            assert_eq!(buffer.pending(), 0);
            buffer.add(4.0);
        }
        assert_eq!(bin.size(), 4);
        assert_eq!(bin.sum(), 10.0);
    }

    #[test]
    fn test_clear_discards_pending() {
        let mut bin = StaticBin1D::new();
        {
            let mut buffer = bin.buffered(10);
            buffer.add_all_of(&[1.0, 2.0]);
            buffer.clear();
            buffer.add(5.0);
        }
        assert_eq!(bin.size(), 1);
        assert_eq!(bin.max(), 5.0);
    }

    #[test]
    fn test_zero_capacity_is_unbuffered() {
        let mut bin = StaticBin1D::new();
        let mut buffer = BufferedBin::new(&mut bin, 0);
        assert_eq!(buffer.capacity(), 1);
        buffer.add(2.0);
        assert_eq!(buffer.pending(), 0);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink = vec![9.0];
        ElementBuffer::clear(&mut sink);
        ElementBuffer::add(&mut sink, 1.0);
        sink.add_all_of(&[2.0, 3.0]);
        sink.flush();
        assert_eq!(sink, vec![1.0, 2.0, 3.0]);
    }
}
