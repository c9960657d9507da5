//! Segmented double-ended queue.
//!
//! Storage is a set of fixed-size element buffers threaded through a
//! contiguous map of buffer pointers. The live region is a window
//! `[begin, end)` of multi-region cursors; both ends admit O(1) push and
//! pop, and growing one end never moves elements at the other. Only the
//! map itself ever reallocates, and that moves pointers, never elements.
//!
//! Buffer capacity is derived from the element size: small elements get
//! 4096-byte buffers, elements of 256 bytes or more get 16 slots each.
//! Zero-sized element types are rejected at compile time.

use std::cmp::{self, Ordering};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut, RangeBounds};
use std::ptr::{self, NonNull};

use strata_alloc::{alloc_array, dealloc_array, RawBuf};

use crate::resolve_range;
use crate::vec::Vector;

/// Initial (and minimum) number of slots in the buffer-pointer map.
const MAP_INIT_SIZE: usize = 8;

/// Elements per buffer for a given element type.
///
/// Evaluated as an associated const so that instantiating [`Deque`] with a
/// zero-sized type fails to compile rather than misbehaving at run time.
pub(crate) const fn buf_cap<T>() -> usize {
    let size = mem::size_of::<T>();
    if size == 0 {
        panic!("Deque does not support zero-sized element types");
    }
    if size < 256 {
        4096 / size
    } else {
        16
    }
}

// =============================================================================
// Multi-region cursor
// =============================================================================

/// Position inside the segmented storage: a slot pointer plus the bounds of
/// the buffer it sits in and the map slot that buffer hangs off.
///
/// `cur` always lies in `[first, last)`; stepping off either edge re-seats
/// the cursor on the adjacent map slot. Every method that walks requires the
/// destination map slot to hold a live buffer.
struct RawIter<T> {
    cur: *mut T,
    first: *mut T,
    last: *mut T,
    node: *mut *mut T,
}

impl<T> Clone for RawIter<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawIter<T> {}

impl<T> RawIter<T> {
    const BUF_CAP: usize = buf_cap::<T>();

    /// Seats a cursor at the first slot of the buffer in `node`.
    ///
    /// # Safety
    ///
    /// `node` must point at a map slot holding a live buffer.
    unsafe fn seat(node: *mut *mut T) -> Self {
        let mut it = RawIter {
            cur: ptr::null_mut(),
            first: ptr::null_mut(),
            last: ptr::null_mut(),
            node,
        };
        it.set_node(node);
        it.cur = it.first;
        it
    }

    /// Re-derives the buffer bounds from a map slot; `cur` is left alone.
    #[inline]
    unsafe fn set_node(&mut self, node: *mut *mut T) {
        self.node = node;
        self.first = *node;
        self.last = self.first.add(Self::BUF_CAP);
    }

    /// One slot toward the back, crossing into the next buffer at the edge.
    #[inline]
    unsafe fn bump(&mut self) {
        self.cur = self.cur.add(1);
        if self.cur == self.last {
            self.set_node(self.node.add(1));
            self.cur = self.first;
        }
    }

    /// One slot toward the front, crossing into the previous buffer at the
    /// edge.
    #[inline]
    unsafe fn retreat(&mut self) {
        if self.cur == self.first {
            self.set_node(self.node.sub(1));
            self.cur = self.last;
        }
        self.cur = self.cur.sub(1);
    }

    /// Moves the cursor by `n` slots in one step. Floor division keeps the
    /// buffer index correct for negative offsets.
    unsafe fn offset(&mut self, n: isize) {
        let cap = Self::BUF_CAP as isize;
        let off = n + self.cur.offset_from(self.first);
        if off >= 0 && off < cap {
            self.cur = self.cur.offset(n);
        } else {
            let step = if off > 0 {
                off / cap
            } else {
                -((-off - 1) / cap) - 1
            };
            self.set_node(self.node.offset(step));
            self.cur = self.first.offset(off - step * cap);
        }
    }

    /// Element distance `self - other`. Both cursors must belong to the
    /// same map.
    #[inline]
    unsafe fn sub(&self, other: &Self) -> isize {
        let cap = Self::BUF_CAP as isize;
        cap * self.node.offset_from(other.node) + self.cur.offset_from(self.first)
            - other.cur.offset_from(other.first)
    }
}

// =============================================================================
// Deque
// =============================================================================

/// A double-ended queue over segmented storage.
///
/// Pushing at either end is amortized O(1) and never relocates existing
/// elements; indexing is O(1) via cursor arithmetic. Interior insertion and
/// removal shift whichever side is shorter.
///
/// # Example
///
/// ```
/// use strata_collections::Deque;
///
/// let mut d = Deque::new();
/// d.push_back(2);
/// d.push_back(3);
/// d.push_front(1);
/// assert_eq!(d.len(), 3);
/// assert_eq!(d[0], 1);
/// assert_eq!(d.pop_back(), Some(3));
/// assert_eq!(d.pop_front(), Some(1));
/// ```
pub struct Deque<T> {
    map: RawBuf<*mut T>,
    begin: RawIter<T>,
    end: RawIter<T>,
}

impl<T> Deque<T> {
    const BUF_CAP: usize = buf_cap::<T>();

    /// An empty deque. Allocates the initial map and one buffer.
    pub fn new() -> Self {
        Self::with_map_capacity(0)
    }

    /// An empty deque whose map already has room for `capacity` elements'
    /// worth of buffers, so that many back pushes reallocate nothing but
    /// element buffers.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_map_capacity(capacity)
    }

    fn with_map_capacity(n: usize) -> Self {
        let n_node = n / Self::BUF_CAP + 1;
        let map_size = cmp::max(MAP_INIT_SIZE, n_node + 2);
        let map = RawBuf::<*mut T>::allocate(map_size);
        unsafe {
            // Slots outside the live window stay null.
            ptr::write_bytes(map.as_ptr(), 0, map_size);
            let node = map.as_ptr().add((map_size - n_node) / 2);
            node.write(alloc_array::<T>(Self::BUF_CAP).as_ptr());
            let it = RawIter::seat(node);
            Self {
                map,
                begin: it,
                end: it,
            }
        }
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        unsafe { self.end.sub(&self.begin) as usize }
    }

    /// Returns `true` if there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin.cur == self.end.cur
    }

    /// A reference to the element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        unsafe {
            let mut it = self.begin;
            it.offset(index as isize);
            Some(&*it.cur)
        }
    }

    /// A mutable reference to the element at `index`, or `None` past the
    /// end.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len() {
            return None;
        }
        unsafe {
            let mut it = self.begin;
            it.offset(index as isize);
            Some(&mut *it.cur)
        }
    }

    /// The first element, if any.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            unsafe { Some(&*self.begin.cur) }
        }
    }

    /// The first element, mutably.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            None
        } else {
            unsafe { Some(&mut *self.begin.cur) }
        }
    }

    /// The last element, if any.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            let mut it = self.end;
            it.retreat();
            Some(&*it.cur)
        }
    }

    /// The last element, mutably.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            let mut it = self.end;
            it.retreat();
            Some(&mut *it.cur)
        }
    }

    /// Appends an element at the back.
    pub fn push_back(&mut self, value: T) {
        unsafe {
            if self.end.cur != self.end.last.sub(1) {
                self.end.cur.write(value);
                self.end.cur = self.end.cur.add(1);
            } else {
                // Writing the last slot of the buffer; the crossing needs
                // the next buffer in place first.
                self.require_capacity(1, false);
                self.end.cur.write(value);
                self.end.bump();
            }
        }
    }

    /// Prepends an element at the front.
    pub fn push_front(&mut self, value: T) {
        unsafe {
            if self.begin.cur != self.begin.first {
                self.begin.cur = self.begin.cur.sub(1);
                self.begin.cur.write(value);
            } else {
                self.require_capacity(1, true);
                self.begin.retreat();
                self.begin.cur.write(value);
            }
        }
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            let value = self.begin.cur.read();
            let old_node = self.begin.node;
            self.begin.bump();
            if self.begin.node != old_node {
                self.release_slot(old_node);
            }
            Some(value)
        }
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            let old_node = self.end.node;
            self.end.retreat();
            if self.end.node != old_node {
                self.release_slot(old_node);
            }
            Some(self.end.cur.read())
        }
    }

    /// Inserts `value` at `index`, shifting whichever side is shorter.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        if index == 0 {
            return self.push_front(value);
        }
        if index == len {
            return self.push_back(value);
        }
        unsafe {
            if index < len / 2 {
                self.require_capacity(1, true);
                // Walk the prefix one slot toward the front.
                let mut hole = self.begin;
                hole.retreat();
                let new_begin = hole;
                let mut src = self.begin;
                for _ in 0..index {
                    hole.cur.write(src.cur.read());
                    hole = src;
                    src.bump();
                }
                hole.cur.write(value);
                self.begin = new_begin;
            } else {
                self.require_capacity(1, false);
                let mut new_end = self.end;
                new_end.bump();
                // Walk the suffix one slot toward the back, last first.
                let mut hole = self.end;
                let mut src = self.end;
                for _ in 0..(len - index) {
                    src.retreat();
                    hole.cur.write(src.cur.read());
                    hole = src;
                }
                hole.cur.write(value);
                self.end = new_end;
            }
        }
    }

    /// Inserts every element of `iterable` at `index`, preserving order.
    ///
    /// Elements are staged into a scratch buffer first, so a panicking
    /// element constructor unwinds with the deque untouched. The actual
    /// splice is then pure cursor moves and cannot fail.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_many<I>(&mut self, index: usize, iterable: I)
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        let staged: Vector<T> = iterable.into_iter().collect();
        if staged.is_empty() {
            return;
        }
        unsafe { self.splice_staged(index, staged) };
    }

    /// Opens an `staged.len()`-slot gap at `index` by shifting the shorter
    /// side, then moves the staged elements in. Infallible once entered.
    unsafe fn splice_staged(&mut self, index: usize, staged: Vector<T>) {
        let len = self.len();
        let n = staged.len();
        if index < len / 2 {
            self.require_capacity(n, true);
            let mut dst = self.begin;
            dst.offset(-(n as isize));
            let new_begin = dst;
            let mut src = self.begin;
            for _ in 0..index {
                dst.cur.write(src.cur.read());
                dst.bump();
                src.bump();
            }
            for value in staged {
                dst.cur.write(value);
                dst.bump();
            }
            self.begin = new_begin;
        } else {
            self.require_capacity(n, false);
            let mut new_end = self.end;
            new_end.offset(n as isize);
            let mut src = self.end;
            let mut dst = new_end;
            for _ in 0..(len - index) {
                src.retreat();
                dst.retreat();
                dst.cur.write(src.cur.read());
            }
            // src has walked back to the gap's first slot.
            let mut gap = src;
            for value in staged {
                gap.cur.write(value);
                gap.bump();
            }
            self.end = new_end;
        }
    }

    /// Removes and returns the element at `index`, shifting whichever side
    /// is shorter. Returns `None` if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let len = self.len();
        if index >= len {
            return None;
        }
        unsafe {
            let mut pos = self.begin;
            pos.offset(index as isize);
            let value = pos.cur.read();
            if index < len / 2 {
                // Pull the prefix one slot toward the back.
                let mut dst = pos;
                let mut src = pos;
                for _ in 0..index {
                    src.retreat();
                    dst.cur.write(src.cur.read());
                    dst = src;
                }
                let old_node = self.begin.node;
                self.begin.bump();
                if self.begin.node != old_node {
                    self.release_slot(old_node);
                }
            } else {
                // Pull the suffix one slot toward the front.
                let mut dst = pos;
                let mut src = pos;
                src.bump();
                for _ in 0..(len - index - 1) {
                    dst.cur.write(src.cur.read());
                    dst = src;
                    src.bump();
                }
                let old_node = self.end.node;
                self.end.retreat();
                if self.end.node != old_node {
                    self.release_slot(old_node);
                }
            }
            Some(value)
        }
    }

    /// Removes every element in `range`, shifting whichever side is
    /// shorter over the hole and releasing vacated buffers.
    ///
    /// If an element's `Drop` panics, the remaining victims leak but the
    /// deque's structure is repaired before the unwind continues.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn remove_range<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        let len = self.len();
        let (start, end) = resolve_range(range, len);
        let n = end - start;
        if n == 0 {
            return;
        }
        if n == len {
            return self.clear();
        }
        unsafe {
            if start < len - end {
                // The prefix is the shorter survivor; a scope guard slides
                // it back over the hole even if a victim's Drop unwinds.
                struct FrontFix<T> {
                    deque: *mut Deque<T>,
                    start: usize,
                    n: usize,
                }
                impl<T> Drop for FrontFix<T> {
                    fn drop(&mut self) {
                        unsafe {
                            let d = &mut *self.deque;
                            let mut src = d.begin;
                            src.offset(self.start as isize);
                            let mut dst = src;
                            dst.offset(self.n as isize);
                            for _ in 0..self.start {
                                src.retreat();
                                dst.retreat();
                                dst.cur.write(src.cur.read());
                            }
                            for _ in 0..self.n {
                                let old_node = d.begin.node;
                                d.begin.bump();
                                if d.begin.node != old_node {
                                    d.release_slot(old_node);
                                }
                            }
                        }
                    }
                }
                let guard = FrontFix {
                    deque: self as *mut _,
                    start,
                    n,
                };
                let mut cur = self.begin;
                cur.offset(start as isize);
                for _ in 0..n {
                    ptr::drop_in_place(cur.cur);
                    cur.bump();
                }
                drop(guard);
            } else {
                struct BackFix<T> {
                    deque: *mut Deque<T>,
                    start: usize,
                    tail: usize,
                    n: usize,
                }
                impl<T> Drop for BackFix<T> {
                    fn drop(&mut self) {
                        unsafe {
                            let d = &mut *self.deque;
                            let mut src = d.begin;
                            src.offset((self.start + self.n) as isize);
                            let mut dst = d.begin;
                            dst.offset(self.start as isize);
                            for _ in 0..self.tail {
                                dst.cur.write(src.cur.read());
                                src.bump();
                                dst.bump();
                            }
                            for _ in 0..self.n {
                                let old_node = d.end.node;
                                d.end.retreat();
                                if d.end.node != old_node {
                                    d.release_slot(old_node);
                                }
                            }
                        }
                    }
                }
                let guard = BackFix {
                    deque: self as *mut _,
                    start,
                    tail: len - end,
                    n,
                };
                let mut cur = self.begin;
                cur.offset(start as isize);
                for _ in 0..n {
                    ptr::drop_in_place(cur.cur);
                    cur.bump();
                }
                drop(guard);
            }
        }
    }

    /// Drops every element past `new_len`, releasing vacated buffers.
    pub fn truncate(&mut self, new_len: usize) {
        let len = self.len();
        if new_len >= len {
            return;
        }
        unsafe {
            for _ in 0..(len - new_len) {
                // Retreat first so a panicking Drop leaks the victim
                // instead of leaving it reachable.
                let old_node = self.end.node;
                self.end.retreat();
                if self.end.node != old_node {
                    self.release_slot(old_node);
                }
                ptr::drop_in_place(self.end.cur);
            }
        }
    }

    /// Drops every element. The map and one buffer are kept.
    pub fn clear(&mut self) {
        let n = self.len();
        let mut cur = self.begin;
        // Collapse the window first so a panicking Drop cannot expose
        // already-dropped slots.
        self.end = self.begin;
        unsafe {
            for _ in 0..n {
                ptr::drop_in_place(cur.cur);
                cur.bump();
            }
        }
        self.shrink_to_fit();
    }

    /// Releases every buffer outside the live window `[begin.node,
    /// end.node]`. The map keeps its size.
    pub fn shrink_to_fit(&mut self) {
        unsafe {
            let map = self.map.as_ptr();
            for i in 0..self.map.cap() {
                let slot = map.add(i);
                if slot >= self.begin.node && slot <= self.end.node {
                    continue;
                }
                self.release_slot(slot);
            }
        }
    }

    /// Grows the deque to `new_len` by cloning `value` at the back, or
    /// truncates down to it.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        let len = self.len();
        if new_len <= len {
            self.truncate(new_len);
        } else {
            for _ in 0..(new_len - len) {
                self.push_back(value.clone());
            }
        }
    }

    /// Front-to-back iterator.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.begin,
            back: self.end,
            len: self.len(),
            _marker: PhantomData,
        }
    }

    /// Front-to-back iterator with mutable references.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            front: self.begin,
            back: self.end,
            len: self.len(),
            _marker: PhantomData,
        }
    }

    /// Frees the buffer in `slot` and nulls it, if there is one.
    unsafe fn release_slot(&mut self, slot: *mut *mut T) {
        if let Some(p) = NonNull::new(*slot) {
            dealloc_array(p, Self::BUF_CAP);
            *slot = ptr::null_mut();
        }
    }

    /// Ensures `n` raw slots are reachable beyond the chosen end: grows the
    /// map if the window lacks headroom, then allocates the buffers the new
    /// slots span. Map growth moves buffer pointers, never elements.
    fn require_capacity(&mut self, n: usize, front: bool) {
        unsafe {
            if front {
                let spare = self.begin.cur.offset_from(self.begin.first) as usize;
                if spare >= n {
                    return;
                }
                // Ceiling division: when the shortfall is an exact multiple
                // of the buffer size the cursor comes to rest on the last
                // buffer, not past it.
                let need = (n - spare + Self::BUF_CAP - 1) / Self::BUF_CAP;
                let headroom = self.begin.node.offset_from(self.map.as_ptr()) as usize;
                if need > headroom {
                    self.reallocate_map(need, true);
                }
                for i in 1..=need {
                    let slot = self.begin.node.sub(i);
                    if (*slot).is_null() {
                        *slot = alloc_array::<T>(Self::BUF_CAP).as_ptr();
                    }
                }
            } else {
                let spare = self.end.last.offset_from(self.end.cur) as usize - 1;
                if spare >= n {
                    return;
                }
                let need = (n - spare + Self::BUF_CAP - 1) / Self::BUF_CAP;
                let map_end = self.map.as_ptr().add(self.map.cap());
                let headroom = map_end.offset_from(self.end.node) as usize - 1;
                if need > headroom {
                    self.reallocate_map(need, false);
                }
                for i in 1..=need {
                    let slot = self.end.node.add(i);
                    if (*slot).is_null() {
                        *slot = alloc_array::<T>(Self::BUF_CAP).as_ptr();
                    }
                }
            }
        }
    }

    /// Replaces the map with a larger one, recentering the occupied window
    /// biased away from the growing side. Cursors are rebuilt at the same
    /// in-buffer offsets.
    fn reallocate_map(&mut self, need: usize, front: bool) {
        // Only the live window is carried over; a buffer left outside it
        // would be orphaned when the old map array is freed.
        self.shrink_to_fit();
        let old_size = self.map.cap();
        let new_size = cmp::max(old_size * 2, old_size + need + MAP_INIT_SIZE);
        let new_map = RawBuf::<*mut T>::allocate(new_size);
        unsafe {
            ptr::write_bytes(new_map.as_ptr(), 0, new_size);
            let old_nodes = self.end.node.offset_from(self.begin.node) as usize + 1;
            let start = (new_size - (old_nodes + need)) / 2;
            let begin_node = if front {
                new_map.as_ptr().add(start + need)
            } else {
                new_map.as_ptr().add(start)
            };
            ptr::copy_nonoverlapping(self.begin.node, begin_node, old_nodes);

            let begin_off = self.begin.cur.offset_from(self.begin.first);
            let end_off = self.end.cur.offset_from(self.end.first);
            self.begin.set_node(begin_node);
            self.begin.cur = self.begin.first.offset(begin_off);
            self.end.set_node(begin_node.add(old_nodes - 1));
            self.end.cur = self.end.first.offset(end_off);
        }
        self.map = new_map;
    }
}

impl<T> Drop for Deque<T> {
    fn drop(&mut self) {
        self.clear();
        // clear() leaves exactly one buffer, at the collapsed window.
        unsafe {
            self.release_slot(self.begin.node);
        }
        // RawBuf frees the map.
    }
}

impl<T> Default for Deque<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        let mut d = Self::with_capacity(self.len());
        for item in self {
            d.push_back(item.clone());
        }
        d
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        for item in source {
            self.push_back(item.clone());
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        assert!(
            index < len,
            "index out of bounds: the len is {len} but the index is {index}"
        );
        unsafe {
            let mut it = self.begin;
            it.offset(index as isize);
            &*it.cur
        }
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        assert!(
            index < len,
            "index out of bounds: the len is {len} but the index is {index}"
        );
        unsafe {
            let mut it = self.begin;
            it.offset(index as isize);
            &mut *it.cur
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut d = Self::with_capacity(lower);
        for value in iter {
            d.push_back(value);
        }
        d
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: PartialOrd> PartialOrd for Deque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for Deque<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for Deque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for item in self {
            item.hash(state);
        }
    }
}

// Safety: Deque owns its elements; no shared interior state.
unsafe impl<T: Send> Send for Deque<T> {}
unsafe impl<T: Sync> Sync for Deque<T> {}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`Deque`].
pub struct Iter<'a, T> {
    front: RawIter<T>,
    back: RawIter<T>,
    len: usize,
    _marker: PhantomData<&'a T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front,
            back: self.back,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        unsafe {
            let item = &*self.front.cur;
            self.front.bump();
            Some(item)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        unsafe {
            self.back.retreat();
            Some(&*self.back.cur)
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

/// Mutably borrowing iterator over a [`Deque`].
pub struct IterMut<'a, T> {
    front: RawIter<T>,
    back: RawIter<T>,
    len: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        unsafe {
            let item = &mut *self.front.cur;
            self.front.bump();
            Some(item)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        unsafe {
            self.back.retreat();
            Some(&mut *self.back.cur)
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// By-value iterator over a [`Deque`].
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { deque: self }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
