//! Guarded initialization of raw element regions.
//!
//! Every function here turns a span of raw slots into live elements (or
//! relocates live elements between spans). Where construction can fail (a
//! `Clone` or closure panic), the constructed prefix is dropped and the
//! destination is formally raw again before the panic resumes, so callers
//! can offer the strong guarantee without their own cleanup.
//!
//! Relocation ([`move_range`]) is always the trivial path: Rust moves are
//! bitwise, so it is a single `ptr::copy` that cannot fail. Dropping a span
//! of elements without drop glue compiles to nothing; there is no runtime
//! "is this type trivial" branch anywhere in this module.

use std::mem;
use std::ptr;

/// Drops the constructed prefix of a region if initialization unwinds.
struct InitGuard<T> {
    dst: *mut T,
    initialized: usize,
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        // Safety: exactly `initialized` leading slots hold live values.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.dst, self.initialized));
        }
    }
}

/// Clone-constructs `n` copies of `value` into the raw slots at `dst`.
///
/// On a clone panic, every copy constructed so far is dropped and the panic
/// resumes; `dst` is raw again.
///
/// # Safety
///
/// `dst` must be valid for writes of `n` elements and hold no live values.
pub unsafe fn fill<T: Clone>(dst: *mut T, n: usize, value: &T) {
    let mut guard = InitGuard {
        dst,
        initialized: 0,
    };
    for i in 0..n {
        unsafe { dst.add(i).write(value.clone()) };
        guard.initialized = i + 1;
    }
    mem::forget(guard);
}

/// Constructs `n` elements at `dst` from successive calls to `f`.
///
/// Same unwind contract as [`fill`].
///
/// # Safety
///
/// `dst` must be valid for writes of `n` elements and hold no live values.
pub unsafe fn fill_with<T>(dst: *mut T, n: usize, mut f: impl FnMut() -> T) {
    let mut guard = InitGuard {
        dst,
        initialized: 0,
    };
    for i in 0..n {
        unsafe { dst.add(i).write(f()) };
        guard.initialized = i + 1;
    }
    mem::forget(guard);
}

/// Clone-constructs `src` in order into the raw slots at `dst`.
///
/// Same unwind contract as [`fill`].
///
/// # Safety
///
/// `dst` must be valid for writes of `src.len()` elements, hold no live
/// values, and not overlap `src`.
pub unsafe fn copy_from_slice<T: Clone>(dst: *mut T, src: &[T]) {
    let mut guard = InitGuard {
        dst,
        initialized: 0,
    };
    for (i, item) in src.iter().enumerate() {
        unsafe { dst.add(i).write(item.clone()) };
        guard.initialized = i + 1;
    }
    mem::forget(guard);
}

/// Relocates `n` elements from `src` to `dst` (regions may overlap).
///
/// Bitwise and infallible; the source slots are raw afterwards.
///
/// # Safety
///
/// `src` must hold `n` live values; `dst` must be valid for writes of `n`
/// elements. After the call the caller must treat `src`'s slots (where not
/// covered by `dst`) as uninitialized.
#[inline]
pub unsafe fn move_range<T>(src: *const T, dst: *mut T, n: usize) {
    unsafe { ptr::copy(src, dst, n) };
}
