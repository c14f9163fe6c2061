//! Packed frame buffer storage
//!
//! Buffer length depends on the panel model and its pixel packing, so the
//! allocation happens at driver construction time rather than as a fixed
//! array. Allocation is fallible because panel buffers are large relative to
//! the heaps of the targets this runs on (an 800x480 Spectra 6 panel needs
//! 192 KiB).

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::error::DriverError;

/// Heap-allocated byte buffer holding one packed frame.
#[derive(Debug)]
pub struct FrameBuffer {
    bytes: Vec<u8>,
}

impl FrameBuffer {
    /// Allocate a zeroed buffer of `len` bytes.
    ///
    /// Returns [`DriverError::BufferAlloc`] instead of aborting when the heap
    /// cannot satisfy the request.
    pub fn try_new(len: usize) -> Result<Self, DriverError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| DriverError::BufferAlloc)?;
        bytes.resize(len, 0);
        Ok(Self { bytes })
    }

    /// Overwrite every byte with `value`.
    pub fn fill(&mut self, value: u8) {
        self.bytes.fill(value);
    }

    /// Buffer length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The packed frame as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Index<usize> for FrameBuffer {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }
}

impl IndexMut<usize> for FrameBuffer {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        &mut self.bytes[index]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_zeroed() {
        let buf = FrameBuffer::try_new(16).unwrap();
        assert_eq!(buf.len(), 16);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn fill_overwrites_every_byte() {
        let mut buf = FrameBuffer::try_new(8).unwrap();
        buf.fill(0x11);
        assert!(buf.as_bytes().iter().all(|&b| b == 0x11));
    }

    #[test]
    fn indexing_reads_and_writes() {
        let mut buf = FrameBuffer::try_new(4).unwrap();
        buf[2] = 0x5A;
        assert_eq!(buf[2], 0x5A);
        assert_eq!(buf[0], 0);
    }
}
