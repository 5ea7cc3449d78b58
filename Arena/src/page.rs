use std::cell::Cell;
use std::ptr::NonNull;

/// A single fixed-capacity byte buffer within a [`BumpArena`](crate::BumpArena).
///
/// The backing storage is a boxed slice, which keeps its heap address fixed
/// even when the owning arena's page vector reallocates to grow — only the
/// `Page` value (a pointer + a length counter) moves.
pub(crate) struct Page {
    buf: Box<[u8]>,
    len: Cell<usize>,
}

impl Page {
    pub(crate) fn new(capacity: usize) -> Self {
        Page {
            buf: vec![0u8; capacity].into_boxed_slice(),
            len: Cell::new(0),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.len.get()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.capacity() - self.len()
    }

    pub(crate) fn reset(&self) {
        self.len.set(0);
    }

    /// Bumps the fill counter by `n` bytes and returns a pointer to the start
    /// of the reserved span. Caller must have already checked `remaining()`.
    pub(crate) fn bump(&self, n: usize) -> NonNull<u8> {
        let offset = self.len.get();
        self.len.set(offset + n);
        let ptr = self.buf.as_ptr() as *mut u8;
        // SAFETY: `offset` is within `buf`'s allocation because the caller
        // verified `remaining() >= n` before calling.
        unsafe { NonNull::new_unchecked(ptr.add(offset)) }
    }
}
