//! Growable contiguous buffer with a capacity frontier.
//!
//! `Vector<T>` owns one allocation of `capacity()` slots of which the first
//! `len()` are live; everything past the frontier is raw storage. Growth is
//! geometric (3/2 with an absolute floor) and every reallocation populates
//! the replacement buffer completely before the old one is freed, so a
//! panicking `Clone` never costs the caller their data.

use std::cmp;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut, Index, IndexMut, RangeBounds};
use std::ptr::{self, NonNull};
use std::slice::SliceIndex;

use strata_alloc::{capacity_overflow, max_len, uninit, RawBuf};

use crate::resolve_range;

/// Smallest non-zero capacity a growth step will produce.
const MIN_CAP: usize = 16;

/// A growable contiguous sequence with manual storage management.
///
/// The std-`Vec` surface where the two agree, built on `strata-alloc`'s
/// chokepoints. Reallocating operations give the strong guarantee: a panic
/// out of an element's `Clone` leaves length, capacity, and contents exactly
/// as they were.
///
/// # Example
///
/// ```
/// use strata_collections::Vector;
///
/// let mut v = Vector::new();
/// for i in 0..20 {
///     v.push(i);
/// }
/// assert_eq!(v.len(), 20);
/// assert_eq!(v[19], 19);
/// assert!(v.capacity() >= 20);
/// ```
pub struct Vector<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> Vector<T> {
    /// An empty vector. Does not allocate; the first growth step does.
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// An empty vector with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuf::allocate(capacity),
            len: 0,
        }
    }

    /// Clone-constructs a vector from a slice.
    pub fn from_slice(slice: &[T]) -> Self
    where
        T: Clone,
    {
        let mut v = Self::with_capacity(slice.len());
        // Safety: fresh buffer of slice.len() raw slots.
        unsafe {
            uninit::copy_from_slice(v.ptr(), slice);
            v.len = slice.len();
        }
        v
    }

    /// Number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots the current allocation can hold without growing.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.cap()
    }

    /// The live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: [0, len) is live; dangling base is fine for len == 0.
        unsafe { std::slice::from_raw_parts(self.ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr(), self.len) }
    }

    #[inline]
    fn ptr(&self) -> *mut T {
        self.buf.as_ptr()
    }

    /// Ensures room for at least `additional` more elements, growing
    /// geometrically. Capacity never shrinks.
    pub fn reserve(&mut self, additional: usize) {
        if self.capacity() - self.len >= additional {
            return;
        }
        let new_cap = self.next_cap(additional);
        self.relocate(new_cap);
    }

    /// Ensures room for exactly `additional` more elements, without the
    /// amortization headroom.
    pub fn reserve_exact(&mut self, additional: usize) {
        if self.capacity() - self.len >= additional {
            return;
        }
        if additional > max_len::<T>() - self.len {
            capacity_overflow();
        }
        self.relocate(self.len + additional);
    }

    /// Reallocates down to exactly `len()` slots.
    pub fn shrink_to_fit(&mut self) {
        if mem::size_of::<T>() != 0 && self.capacity() > self.len {
            self.relocate(self.len);
        }
    }

    /// Growth arithmetic: 3/2 of the old capacity or the exact need,
    /// whichever is larger, floored at [`MIN_CAP`]. Near the representable
    /// frontier, grows by only the requested amount (plus headroom while it
    /// still fits) so the arithmetic cannot wrap.
    fn next_cap(&self, additional: usize) -> usize {
        let max = max_len::<T>();
        let cap = self.capacity();
        if cap > max - additional {
            capacity_overflow();
        }
        if cap > max - cap / 2 {
            if cap + additional > max - MIN_CAP {
                cap + additional
            } else {
                cap + additional + MIN_CAP
            }
        } else if cap == 0 {
            cmp::max(additional, MIN_CAP)
        } else {
            cmp::max(cap + cap / 2, cap + additional)
        }
    }

    /// Moves the live prefix into a fresh allocation of `new_cap` slots and
    /// adopts it. The old buffer is freed only after the move completes.
    fn relocate(&mut self, new_cap: usize) {
        debug_assert!(new_cap >= self.len);
        if mem::size_of::<T>() == 0 {
            return;
        }
        let new_buf = RawBuf::allocate(new_cap);
        // Safety: relocation is bitwise; the old slots become raw and the
        // old RawBuf frees storage only, on assignment below.
        unsafe {
            uninit::move_range(self.ptr(), new_buf.as_ptr(), self.len);
        }
        self.buf = new_buf;
    }

    /// Appends an element.
    #[inline]
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            let new_cap = self.next_cap(1);
            self.relocate(new_cap);
        }
        unsafe { self.ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Removes and returns the last element.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(unsafe { self.ptr().add(self.len).read() })
    }

    /// Inserts `value` at `index`, shifting everything after it one slot
    /// toward the back.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
        if self.len == self.capacity() {
            self.realloc_insert(index, value);
            return;
        }
        unsafe {
            let p = self.ptr().add(index);
            uninit::move_range(p, p.add(1), self.len - index);
            p.write(value);
        }
        self.len += 1;
    }

    /// Reallocation-with-insertion: move the prefix, place the new element,
    /// move the suffix, then swap buffers. Every step is infallible, so the
    /// old state survives any earlier growth-arithmetic panic untouched.
    fn realloc_insert(&mut self, index: usize, value: T) {
        let new_cap = self.next_cap(1);
        let new_buf = RawBuf::allocate(new_cap);
        unsafe {
            uninit::move_range(self.ptr(), new_buf.as_ptr(), index);
            new_buf.as_ptr().add(index).write(value);
            uninit::move_range(
                self.ptr().add(index),
                new_buf.as_ptr().add(index + 1),
                self.len - index,
            );
        }
        self.buf = new_buf;
        self.len += 1;
    }

    /// Inserts every element of `iterable` at `index`, preserving order.
    ///
    /// The iterator must know its exact length up front (the multi-element
    /// shift happens once, before any element is constructed). A panicking
    /// element constructor unwinds with the vector exactly as it was. If the
    /// iterator under-delivers, the gap is closed and only the delivered
    /// elements are inserted; surplus items are left unconsumed.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_many<I>(&mut self, index: usize, iterable: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
        let mut iter = iterable.into_iter();
        let n = iter.len();
        if n == 0 {
            return;
        }
        self.reserve(n);

        struct GapGuard<T> {
            vec: *mut Vector<T>,
            base: *mut T,
            index: usize,
            gap: usize,
            tail: usize,
            filled: usize,
        }

        impl<T> Drop for GapGuard<T> {
            fn drop(&mut self) {
                // Unwind path: destroy what was built, pull the suffix back
                // over the gap, restore the original length.
                unsafe {
                    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                        self.base.add(self.index),
                        self.filled,
                    ));
                    uninit::move_range(
                        self.base.add(self.index + self.gap),
                        self.base.add(self.index),
                        self.tail,
                    );
                    (*self.vec).len = self.index + self.tail;
                }
            }
        }

        let base = self.ptr();
        let tail = self.len - index;
        unsafe {
            // Open the gap; [index, index + n) is raw from here on.
            uninit::move_range(base.add(index), base.add(index + n), tail);
        }
        // While the gap exists the vector admits only the prefix, so an
        // unguarded unwind cannot double-drop the suffix.
        self.len = index;

        let mut guard = GapGuard {
            vec: self as *mut _,
            base,
            index,
            gap: n,
            tail,
            filled: 0,
        };
        for i in 0..n {
            match iter.next() {
                Some(value) => {
                    unsafe { base.add(index + i).write(value) };
                    guard.filled = i + 1;
                }
                None => break,
            }
        }
        let filled = guard.filled;
        mem::forget(guard);

        if filled < n {
            // The iterator lied about its length; close the leftover gap.
            unsafe {
                uninit::move_range(base.add(index + n), base.add(index + filled), tail);
            }
        }
        self.len = index + filled + tail;
    }

    /// Clone-appends every element of `other`.
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        self.reserve(other.len());
        unsafe {
            uninit::copy_from_slice(self.ptr().add(self.len), other);
        }
        self.len += other.len();
    }

    /// Removes and returns the element at `index`, shifting everything
    /// after it one slot toward the front.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index (is {index}) should be < len (is {})",
            self.len
        );
        unsafe {
            let p = self.ptr().add(index);
            let value = p.read();
            uninit::move_range(p.add(1), p, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Removes and returns the element at `index` by swapping the last
    /// element into its place. O(1), does not preserve order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index (is {index}) should be < len (is {})",
            self.len
        );
        unsafe {
            let p = self.ptr().add(index);
            let value = p.read();
            self.len -= 1;
            if index != self.len {
                p.write(self.ptr().add(self.len).read());
            }
            value
        }
    }

    /// Removes the range and yields its elements front to back. Dropping
    /// the `Drain` (fully consumed or not) closes the hole by shifting the
    /// trailing elements forward; no reallocation.
    pub fn drain<R>(&mut self, range: R) -> Drain<'_, T>
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = resolve_range(range, self.len);
        let old_len = self.len;
        // Leak safety: if the Drain is forgotten, the vector admits only
        // the prefix before the range; the rest leaks rather than
        // double-drops.
        self.len = start;
        Drain {
            base: self.ptr(),
            vec: NonNull::from(self),
            tail_start: end,
            tail_len: old_len - end,
            front: start,
            back: end,
            _marker: std::marker::PhantomData,
        }
    }

    /// Drops every element past `len`, keeping the allocation.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let remaining = self.len - len;
        unsafe {
            // Length is cut first so a panicking Drop leaks the rest of the
            // tail instead of double-dropping it.
            self.len = len;
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.ptr().add(len),
                remaining,
            ));
        }
    }

    /// Drops every element, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Grows to `new_len` by cloning `value`, or shrinks via [`truncate`].
    ///
    /// [`truncate`]: Vector::truncate
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        let extra = new_len - self.len;
        self.reserve(extra);
        unsafe {
            uninit::fill(self.ptr().add(self.len), extra, &value);
        }
        self.len = new_len;
    }

    /// Grows to `new_len` with elements produced by `f`, or shrinks.
    pub fn resize_with(&mut self, new_len: usize, f: impl FnMut() -> T) {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        let extra = new_len - self.len;
        self.reserve(extra);
        unsafe {
            uninit::fill_with(self.ptr().add(self.len), extra, f);
        }
        self.len = new_len;
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr(), self.len));
        }
        // RawBuf frees the storage.
    }
}

impl<T> Default for Vector<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for Vector<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &I::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self)
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend_from_slice(source);
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(slice: &[T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut v = Self::with_capacity(lower);
        for value in iter {
            v.push(value);
        }
        v
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq> PartialEq<[T]> for Vector<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for Vector<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Vector<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for Vector<T> {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

// Safety: Vector owns its elements; no shared interior state.
unsafe impl<T: Send> Send for Vector<T> {}
unsafe impl<T: Sync> Sync for Vector<T> {}

// =============================================================================
// Owning iterator
// =============================================================================

/// By-value iterator over a [`Vector`]. Holds the allocation until dropped.
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    front: usize,
    back: usize,
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let me = ManuallyDrop::new(self);
        // Safety: buf ownership moves to the iterator; `me` is never dropped.
        let buf = unsafe { ptr::read(&me.buf) };
        IntoIter {
            buf,
            front: 0,
            back: me.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let value = unsafe { self.buf.slot(self.front).read() };
        self.front += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(unsafe { self.buf.slot(self.back).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> std::iter::FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.slot(self.front),
                self.back - self.front,
            ));
        }
    }
}

unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

// =============================================================================
// Drain
// =============================================================================

/// Draining iterator for [`Vector::drain`]. On drop, unyielded elements are
/// destroyed and the tail shifts forward to close the hole.
pub struct Drain<'a, T> {
    base: *mut T,
    vec: NonNull<Vector<T>>,
    tail_start: usize,
    tail_len: usize,
    front: usize,
    back: usize,
    _marker: std::marker::PhantomData<&'a mut Vector<T>>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let value = unsafe { self.base.add(self.front).read() };
        self.front += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(unsafe { self.base.add(self.back).read() })
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}
impl<T> std::iter::FusedIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        unsafe {
            // Destroy whatever the caller did not consume.
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.base.add(self.front),
                self.back - self.front,
            ));
            // Close the hole and hand the tail back to the vector.
            let vec = self.vec.as_mut();
            let start = vec.len;
            uninit::move_range(
                self.base.add(self.tail_start),
                self.base.add(start),
                self.tail_len,
            );
            vec.len = start + self.tail_len;
        }
    }
}

unsafe impl<T: Send> Send for Drain<'_, T> {}
unsafe impl<T: Sync> Sync for Drain<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let v: Vector<u64> = Vector::new();
        assert!(v.is_empty());
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 0);
    }

    #[test]
    fn push_pop_round_trip() {
        let mut v = Vector::new();
        for i in 0..100 {
            v.push(i);
            assert!(v.len() <= v.capacity());
        }
        for i in (0..100).rev() {
            assert_eq!(v.pop(), Some(i));
        }
        assert_eq!(v.pop(), None);
    }

    #[test]
    fn growth_is_monotonic() {
        let mut v = Vector::new();
        let mut last_cap = 0;
        for i in 0..1000 {
            v.push(i);
            assert!(v.capacity() >= last_cap);
            last_cap = v.capacity();
        }
        assert_eq!(v.len(), 1000);
    }

    #[test]
    fn first_growth_hits_floor() {
        let mut v = Vector::new();
        v.push(1u8);
        assert_eq!(v.capacity(), 16);
        // 16 -> 24 at the next frontier.
        for i in 0..16 {
            v.push(i);
        }
        assert_eq!(v.capacity(), 24);
    }

    #[test]
    fn with_capacity_is_exact() {
        let v: Vector<u32> = Vector::with_capacity(20);
        assert_eq!(v.capacity(), 20);
        assert_eq!(v.len(), 0);
    }

    #[test]
    fn insert_shifts_suffix() {
        let mut v: Vector<i32> = (0..5).collect();
        v.insert(2, 99);
        assert_eq!(v, [0, 1, 99, 2, 3, 4]);
        v.insert(0, -1);
        assert_eq!(v, [-1, 0, 1, 99, 2, 3, 4]);
        v.insert(7, 100);
        assert_eq!(v, [-1, 0, 1, 99, 2, 3, 4, 100]);
    }

    #[test]
    fn insert_at_capacity_reallocates() {
        let mut v = Vector::with_capacity(4);
        v.extend([1, 2, 3, 4]);
        assert_eq!(v.capacity(), 4);
        v.insert(2, 9);
        assert_eq!(v, [1, 2, 9, 3, 4]);
        assert!(v.capacity() > 4);
    }

    #[test]
    fn insert_many_middle() {
        let mut v: Vector<i32> = (0..6).collect();
        v.insert_many(3, [7, 8, 9]);
        assert_eq!(v, [0, 1, 2, 7, 8, 9, 3, 4, 5]);
    }

    #[test]
    fn insert_many_repeat() {
        let mut v: Vector<i32> = Vector::from_slice(&[1, 2, 3, 4, 5]);
        v.insert_many(2, std::iter::repeat_n(99, 2));
        assert_eq!(v, [1, 2, 99, 99, 3, 4, 5]);
    }

    #[test]
    fn insert_many_short_iterator_closes_gap() {
        struct Liar(std::ops::Range<i32>);
        impl Iterator for Liar {
            type Item = i32;
            fn next(&mut self) -> Option<i32> {
                self.0.next()
            }
            fn size_hint(&self) -> (usize, Option<usize>) {
                (5, Some(5)) // claims 5, delivers 2
            }
        }
        impl ExactSizeIterator for Liar {}

        let mut v: Vector<i32> = (0..4).collect();
        v.insert_many(1, Liar(10..12));
        assert_eq!(v, [0, 10, 11, 1, 2, 3]);
    }

    #[test]
    fn remove_and_swap_remove() {
        let mut v: Vector<i32> = (0..6).collect();
        assert_eq!(v.remove(2), 2);
        assert_eq!(v, [0, 1, 3, 4, 5]);
        assert_eq!(v.swap_remove(1), 1);
        assert_eq!(v, [0, 5, 3, 4]);
        assert_eq!(v.swap_remove(3), 4);
        assert_eq!(v, [0, 5, 3]);
    }

    #[test]
    fn drain_middle() {
        let mut v: Vector<i32> = (0..8).collect();
        let taken: Vec<i32> = v.drain(2..5).collect();
        assert_eq!(taken, [2, 3, 4]);
        assert_eq!(v, [0, 1, 5, 6, 7]);
    }

    #[test]
    fn drain_partially_consumed() {
        let mut v: Vector<i32> = (0..8).collect();
        {
            let mut d = v.drain(1..7);
            assert_eq!(d.next(), Some(1));
            assert_eq!(d.next_back(), Some(6));
            // Remaining 2..=5 destroyed on drop.
        }
        assert_eq!(v, [0, 7]);
    }

    #[test]
    fn drain_everything() {
        let mut v: Vector<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        v.drain(..);
        assert!(v.is_empty());
    }

    #[test]
    fn truncate_and_clear() {
        let mut v: Vector<i32> = (0..10).collect();
        let cap = v.capacity();
        v.truncate(4);
        assert_eq!(v, [0, 1, 2, 3]);
        assert_eq!(v.capacity(), cap);
        v.clear();
        assert!(v.is_empty());
        assert_eq!(v.capacity(), cap);
    }

    #[test]
    fn resize_grows_and_shrinks() {
        let mut v = Vector::new();
        v.resize(4, 7);
        assert_eq!(v, [7, 7, 7, 7]);
        v.resize(2, 0);
        assert_eq!(v, [7, 7]);
        let mut n = 0;
        v.resize_with(5, || {
            n += 1;
            n
        });
        assert_eq!(v, [7, 7, 1, 2, 3]);
    }

    #[test]
    fn shrink_to_fit_is_exact() {
        let mut v = Vector::with_capacity(64);
        v.extend(0..20);
        v.shrink_to_fit();
        assert_eq!(v.capacity(), 20);
        assert_eq!(v.len(), 20);
        assert_eq!(v[19], 19);
    }

    #[test]
    fn reserve_amortizes() {
        let mut v: Vector<u8> = Vector::new();
        v.reserve(10);
        assert_eq!(v.capacity(), 16);
        v.reserve_exact(40);
        assert_eq!(v.capacity(), 40);
    }

    #[test]
    fn slice_surface() {
        let mut v: Vector<i32> = (0..5).collect();
        assert_eq!(v.first(), Some(&0));
        assert_eq!(v.last(), Some(&4));
        assert_eq!(v.get(2), Some(&2));
        assert_eq!(v.get(9), None);
        v[1] = 10;
        assert_eq!(&v[1..3], &[10, 2]);
        v.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(v, [10, 4, 3, 2, 0]);
    }

    #[test]
    fn into_iter_both_ends() {
        let v: Vector<i32> = (0..5).collect();
        let mut it = v.into_iter();
        assert_eq!(it.len(), 5);
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.next_back(), Some(4));
        assert_eq!(it.collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn into_iter_drops_unconsumed() {
        let v: Vector<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut it = v.into_iter();
        let _ = it.next();
        // Remaining strings destroyed with the iterator.
    }

    #[test]
    fn clone_and_compare() {
        let v: Vector<i32> = (0..5).collect();
        let mut w = v.clone();
        assert_eq!(v, w);
        w.push(5);
        assert!(v < w);
        w.clone_from(&v);
        assert_eq!(v, w);
    }

    #[test]
    fn zero_sized_elements() {
        let mut v = Vector::new();
        assert_eq!(v.capacity(), usize::MAX);
        for _ in 0..1000 {
            v.push(());
        }
        assert_eq!(v.len(), 1000);
        assert_eq!(v.pop(), Some(()));
        v.truncate(10);
        assert_eq!(v.len(), 10);
        assert_eq!(v.iter().count(), 10);
    }

    #[test]
    #[should_panic(expected = "insertion index")]
    fn insert_out_of_bounds_panics() {
        let mut v: Vector<i32> = (0..3).collect();
        v.insert(4, 0);
    }
}
