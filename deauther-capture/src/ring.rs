//! Single-producer/single-consumer capture ring
//!
//! The radio receive callback pushes frame copies; the main loop drains them.
//! Neither side ever blocks or allocates. The producer owns the slot at the
//! write index, the consumer owns the slot at the read index, and one slot is
//! always left empty so that `write == read` means "empty" and
//! `write + 1 == read` means "full".

use deauther_core::MAX_FRAME_LEN;
use std::cell::UnsafeCell;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::warn;

/// Number of slots in the default ring (one is always kept free)
pub const MAX_BUFFER_SIZE: usize = 10;

/// One captured frame
#[derive(Clone)]
pub struct FrameRecord {
    data: [u8; MAX_FRAME_LEN],
    len: u16,
}

impl FrameRecord {
    /// Create an empty record
    pub const fn empty() -> Self {
        Self {
            data: [0u8; MAX_FRAME_LEN],
            len: 0,
        }
    }

    /// Captured bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }

    /// Captured length
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Check if nothing was captured
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for FrameRecord {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for FrameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRecord").field("len", &self.len).finish()
    }
}

/// Fixed-capacity capture ring shared by the receive callback and the main loop
///
/// `N` slots hold at most `N - 1` pending frames.
pub struct CaptureRing<const N: usize = MAX_BUFFER_SIZE> {
    slots: [UnsafeCell<FrameRecord>; N],
    /// Advanced only by the producer
    write: AtomicUsize,
    /// Advanced only by the consumer
    read: AtomicUsize,
    /// Set while a push is copying into the write slot
    pushing: AtomicBool,
    /// Set while a [`FrameView`] is outstanding
    viewing: AtomicBool,
}

// SAFETY: slot access is partitioned by the indices. The producer writes only
// the slot at `write`, which lies outside the pending range [read, write); the
// consumer reads only the slot at `read`, which lies inside it. The `pushing`
// and `viewing` flags guarantee at most one producer and one consumer touch
// their slot at any time, and index stores use release/acquire ordering so
// slot contents are visible before the index that publishes them.
unsafe impl<const N: usize> Sync for CaptureRing<N> {}

impl<const N: usize> CaptureRing<N> {
    const VALID_CAPACITY: () = assert!(N >= 2, "capture ring needs at least two slots");

    /// Create an empty ring
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_CAPACITY;

        Self {
            slots: std::array::from_fn(|_| UnsafeCell::new(FrameRecord::empty())),
            write: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
            pushing: AtomicBool::new(false),
            viewing: AtomicBool::new(false),
        }
    }

    /// Number of slots
    pub const fn slots(&self) -> usize {
        N
    }

    /// Maximum number of pending frames
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Copy `frame` into the next free slot
    ///
    /// Producer side. Returns `false` without touching the ring when the
    /// frame exceeds [`MAX_FRAME_LEN`], the ring is full, or another push is
    /// in progress. Frames are never truncated and unread frames are never
    /// overwritten.
    pub fn try_push(&self, frame: &[u8]) -> bool {
        if frame.len() > MAX_FRAME_LEN {
            return false;
        }

        if self
            .pushing
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return false;
        }

        let write = self.write.load(Ordering::Relaxed);
        let next = (write + 1) % N;
        let accepted = next != self.read.load(Ordering::Acquire);

        if accepted {
            // SAFETY: `write` is outside the pending range, so the consumer
            // cannot be reading this slot, and `pushing` excludes other
            // producers.
            let slot = unsafe { &mut *self.slots[write].get() };
            slot.data[..frame.len()].copy_from_slice(frame);
            slot.len = frame.len() as u16;
            self.write.store(next, Ordering::Release);
        }

        self.pushing.store(false, Ordering::Release);
        accepted
    }

    /// Check whether frames are waiting to be drained
    pub fn has_pending(&self) -> bool {
        self.read.load(Ordering::Relaxed) != self.write.load(Ordering::Acquire)
    }

    /// Number of frames waiting to be drained
    pub fn len(&self) -> usize {
        let write = self.write.load(Ordering::Acquire);
        let read = self.read.load(Ordering::Acquire);
        (write + N - read) % N
    }

    /// Check if no frames are pending
    pub fn is_empty(&self) -> bool {
        !self.has_pending()
    }

    /// Borrow the oldest pending frame
    ///
    /// Consumer side. Returns `None` when the ring is empty or another view
    /// is still outstanding. The slot stays reserved until the view is passed
    /// to [`advance_read`](Self::advance_read); dropping the view instead
    /// leaves the frame pending.
    pub fn pop_view(&self) -> Option<FrameView<'_, N>> {
        if self
            .viewing
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return None;
        }

        let read = self.read.load(Ordering::Relaxed);
        if read == self.write.load(Ordering::Acquire) {
            self.viewing.store(false, Ordering::Release);
            return None;
        }

        Some(FrameView {
            ring: self,
            index: read,
        })
    }

    /// Release the slot behind `view` to the producer
    ///
    /// The slot is always released on the ring that produced `view`; a view
    /// from another ring leaves this ring untouched.
    pub fn advance_read(&self, view: FrameView<'_, N>) {
        if !std::ptr::eq(view.ring, self) {
            warn!("Frame view released through a foreign capture ring");
        }
        view.release();
    }

    /// Hand every pending frame to `sink`, releasing each slot afterwards
    ///
    /// Returns the number of frames drained.
    pub fn drain<F>(&self, mut sink: F) -> usize
    where
        F: FnMut(&FrameRecord),
    {
        let mut drained = 0;
        while let Some(view) = self.pop_view() {
            sink(&*view);
            self.advance_read(view);
            drained += 1;
        }
        drained
    }
}

impl<const N: usize> Default for CaptureRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for CaptureRing<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureRing")
            .field("slots", &N)
            .field("write", &self.write.load(Ordering::Relaxed))
            .field("read", &self.read.load(Ordering::Relaxed))
            .finish()
    }
}

/// Read-only view of the oldest pending frame
pub struct FrameView<'a, const N: usize> {
    ring: &'a CaptureRing<N>,
    index: usize,
}

impl<const N: usize> Deref for FrameView<'_, N> {
    type Target = FrameRecord;

    fn deref(&self) -> &FrameRecord {
        // SAFETY: the slot at `index` is inside the pending range and stays
        // there until `advance_read` consumes this view.
        unsafe { &*self.ring.slots[self.index].get() }
    }
}

impl<const N: usize> FrameView<'_, N> {
    /// Release this slot to the producer of the ring it was taken from
    pub fn release(self) {
        let ring = self.ring;
        let index = self.index;
        std::mem::forget(self);

        ring.read.store((index + 1) % N, Ordering::Release);
        ring.viewing.store(false, Ordering::Release);
    }
}

impl<const N: usize> Drop for FrameView<'_, N> {
    fn drop(&mut self) {
        self.ring.viewing.store(false, Ordering::Release);
    }
}
