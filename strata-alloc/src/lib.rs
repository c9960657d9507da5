//! Typed raw-storage primitives for the strata containers.
//!
//! Containers built on this crate never touch the global allocator or run
//! element lifetime events outside two chokepoints:
//!
//! - [`alloc_array`] / [`dealloc_array`] (and the owning [`RawBuf`] handle)
//!   obtain and release storage for `n` elements of `T` without initializing
//!   a single one of them.
//! - [`uninit`] placement-constructs elements into that raw storage and is
//!   the only place where a panicking `Clone` has to be cleaned up after.
//!
//! Allocation failure aborts via [`handle_alloc_error`]; a request whose
//! byte size cannot be represented panics with a capacity-overflow message
//! *before* the allocator is consulted. Zero-length requests and zero-sized
//! element types never allocate and hand back a dangling, well-aligned
//! pointer.
//!
//! # Example
//!
//! ```
//! use strata_alloc::RawBuf;
//!
//! let buf: RawBuf<u64> = RawBuf::allocate(8);
//! assert_eq!(buf.cap(), 8);
//!
//! // Slots are raw: construct before reading, destroy before freeing.
//! unsafe {
//!     buf.as_ptr().write(42);
//!     assert_eq!(buf.as_ptr().read(), 42);
//! }
//! // Dropping RawBuf frees the storage; elements are the caller's problem.
//! ```

pub mod uninit;

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::mem;
use std::ptr::NonNull;

/// Largest element count representable for `T`.
///
/// Allocations are capped at `isize::MAX` bytes; for zero-sized types every
/// count is representable.
#[inline]
pub const fn max_len<T>() -> usize {
    if mem::size_of::<T>() == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / mem::size_of::<T>()
    }
}

/// Aborts the growth path that asked for an unrepresentable capacity.
///
/// Kept out of line so the checks inline to a compare-and-branch.
#[cold]
pub fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

/// Allocates raw, uninitialized storage for exactly `n` elements of `T`.
///
/// Returns a dangling (well-aligned, non-null) pointer for `n == 0` or
/// zero-sized `T`. Panics with a capacity-overflow message if the byte size
/// exceeds `isize::MAX`; aborts via [`handle_alloc_error`] if the allocator
/// refuses.
pub fn alloc_array<T>(n: usize) -> NonNull<T> {
    if mem::size_of::<T>() == 0 || n == 0 {
        return NonNull::dangling();
    }

    let layout = match Layout::array::<T>(n) {
        Ok(layout) => layout,
        Err(_) => capacity_overflow(),
    };
    if layout.size() > isize::MAX as usize {
        capacity_overflow();
    }

    let ptr = unsafe { alloc(layout) } as *mut T;
    match NonNull::new(ptr) {
        Some(ptr) => ptr,
        None => handle_alloc_error(layout),
    }
}

/// Releases storage previously returned by [`alloc_array`] for the same `n`.
///
/// No-op for `n == 0` or zero-sized `T`.
///
/// # Safety
///
/// `ptr` must come from `alloc_array::<T>(n)` with this exact `n`, and no
/// live element may remain in the storage.
pub unsafe fn dealloc_array<T>(ptr: NonNull<T>, n: usize) {
    if mem::size_of::<T>() == 0 || n == 0 {
        return;
    }
    // Round-trips the layout the allocation was made with.
    let layout = Layout::array::<T>(n).unwrap();
    unsafe { dealloc(ptr.as_ptr() as *mut u8, layout) };
}

// =============================================================================
// RawBuf - owning handle for one typed allocation
// =============================================================================

/// Owning handle for a single typed allocation of `cap` raw slots.
///
/// `RawBuf` frees its storage on drop but never runs element destructors:
/// which slots hold live values is the container's bookkeeping, not the
/// buffer's. That split is what makes strong-guarantee reallocation compose:
/// fully populate a fresh `RawBuf`, swap it in, and let the old one free
/// itself on scope exit.
///
/// For zero-sized `T` the capacity is `usize::MAX` and no memory is ever
/// allocated.
pub struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
}

impl<T> RawBuf<T> {
    /// An empty buffer: dangling pointer, no allocation.
    #[inline]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: if mem::size_of::<T>() == 0 {
                usize::MAX
            } else {
                0
            },
        }
    }

    /// Allocates exactly `n` uninitialized slots.
    pub fn allocate(n: usize) -> Self {
        if mem::size_of::<T>() == 0 || n == 0 {
            return Self::new();
        }
        Self {
            ptr: alloc_array(n),
            cap: n,
        }
    }

    /// Base pointer of the allocation. Dangling when `cap` slots were never
    /// allocated; still valid for zero-size access.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Number of slots.
    #[inline]
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Pointer to slot `i`.
    ///
    /// # Safety
    ///
    /// `i` must not exceed `cap`.
    #[inline]
    pub unsafe fn slot(&self, i: usize) -> *mut T {
        debug_assert!(i <= self.cap);
        unsafe { self.ptr.as_ptr().add(i) }
    }
}

impl<T> Default for RawBuf<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if mem::size_of::<T>() != 0 && self.cap != 0 {
            // Safety: ptr/cap came from alloc_array; elements were the
            // container's responsibility and are gone by now.
            unsafe { dealloc_array(self.ptr, self.cap) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let buf: RawBuf<u64> = RawBuf::new();
        assert_eq!(buf.cap(), 0);
    }

    #[test]
    fn allocate_round_trip() {
        let buf: RawBuf<u32> = RawBuf::allocate(16);
        assert_eq!(buf.cap(), 16);
        unsafe {
            for i in 0..16 {
                buf.as_ptr().add(i).write(i as u32);
            }
            for i in 0..16 {
                assert_eq!(buf.as_ptr().add(i).read(), i as u32);
            }
        }
    }

    #[test]
    fn zero_len_does_not_allocate() {
        let buf: RawBuf<u64> = RawBuf::allocate(0);
        assert_eq!(buf.cap(), 0);

        let ptr = alloc_array::<u64>(0);
        // Dangling, nothing to free, but dealloc must tolerate it.
        unsafe { dealloc_array(ptr, 0) };
    }

    #[test]
    fn zst_capacity_is_unbounded() {
        let buf: RawBuf<()> = RawBuf::new();
        assert_eq!(buf.cap(), usize::MAX);

        let buf: RawBuf<()> = RawBuf::allocate(128);
        assert_eq!(buf.cap(), usize::MAX);
    }

    #[test]
    fn max_len_scales_with_element_size() {
        assert_eq!(max_len::<u8>(), isize::MAX as usize);
        assert_eq!(max_len::<u64>(), isize::MAX as usize / 8);
        assert_eq!(max_len::<()>(), usize::MAX);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn unrepresentable_request_panics_before_allocating() {
        let _ = alloc_array::<u64>(usize::MAX / 2);
    }
}
