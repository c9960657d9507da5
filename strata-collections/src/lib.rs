//! Sequence containers over raw typed storage.
//!
//! Two containers, one discipline: element lifetimes are managed by hand
//! through the `strata-alloc` chokepoints, and the live/uninitialized
//! boundary is explicit at every step.
//!
//! - [`Vector<T>`] - one contiguous buffer with a capacity frontier.
//!   Amortized geometric growth; reallocation builds the replacement buffer
//!   completely before the old one is released, so a mid-flight panic
//!   leaves the container untouched.
//! - [`Deque<T>`] - a map of fixed-size buffers with reserved headroom at
//!   both ends. Pushes at either end are O(1); the map itself is
//!   reallocated (pointers move, elements never do) when headroom runs out.
//!
//! Both are single-threaded by design: no internal locking, `Send`/`Sync`
//! exactly when the element type allows it, external synchronization is the
//! caller's job.
//!
//! # Example
//!
//! ```
//! use strata_collections::{Deque, Vector};
//!
//! let mut v: Vector<i32> = (0..5).collect();
//! v.insert(2, 99);
//! assert_eq!(v.as_slice(), &[0, 1, 99, 2, 3, 4]);
//!
//! let mut d: Deque<i32> = Deque::new();
//! d.push_front(1);
//! d.push_back(2);
//! assert_eq!(d.pop_front(), Some(1));
//! assert_eq!(d.pop_front(), Some(2));
//! ```

pub mod deque;
pub mod vec;

pub use deque::Deque;
pub use vec::Vector;

use std::ops::{Bound, RangeBounds};

/// Resolves a range argument against `len`, panicking on out-of-bounds or
/// inverted ranges.
pub(crate) fn resolve_range(range: impl RangeBounds<usize>, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s + 1,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e + 1,
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    assert!(
        start <= end && end <= len,
        "range {start}..{end} out of bounds for length {len}"
    );
    (start, end)
}
