use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use strata_collections::Vector;

/// Counts live instances so tests can assert nothing leaked or
/// double-dropped across panics.
struct Counted {
    value: u32,
    poison: bool,
}

static LIVE: AtomicUsize = AtomicUsize::new(0);

impl Counted {
    fn new(value: u32) -> Self {
        LIVE.fetch_add(1, Ordering::SeqCst);
        Counted {
            value,
            poison: false,
        }
    }

    fn poisoned(value: u32) -> Self {
        let mut c = Counted::new(value);
        c.poison = true;
        c
    }
}

impl Clone for Counted {
    fn clone(&self) -> Self {
        if self.poison {
            panic!("poisoned clone");
        }
        Counted::new(self.value)
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        LIVE.fetch_sub(1, Ordering::SeqCst);
    }
}

#[test]
fn end_to_end_growth_and_access() {
    let mut v = Vector::new();
    assert_eq!(v.capacity(), 0);
    let mut caps = vec![];
    for i in 0..10_000 {
        v.push(i);
        caps.push(v.capacity());
    }
    assert!(caps.windows(2).all(|w| w[0] <= w[1]));
    assert!(v.iter().copied().eq(0..10_000));
    assert_eq!(v[9_999], 9_999);
}

#[test]
fn build_shrink_scenario() {
    // Fill past several growth steps, trim, then shrink to the exact fit.
    let mut v: Vector<u32> = (0..100).collect();
    assert!(v.capacity() >= 100);
    v.truncate(20);
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 20);
    assert!(v.iter().copied().eq(0..20));
}

#[test]
fn insert_many_scenario() {
    let mut v = Vector::from_slice(&[1, 2, 3, 4, 5]);
    v.insert_many(2, std::iter::repeat_n(99, 2));
    assert_eq!(v, [1, 2, 99, 99, 3, 4, 5]);
}

#[test]
fn drain_then_reuse_scenario() {
    let mut v: Vector<String> = (0..50).map(|i| i.to_string()).collect();
    let drained: Vec<String> = v.drain(10..40).collect();
    assert_eq!(drained.len(), 30);
    assert_eq!(drained[0], "10");
    assert_eq!(v.len(), 20);
    assert_eq!(v[10], "40");
    v.push("new".to_string());
    assert_eq!(v.len(), 21);
}

#[test]
fn clone_panic_during_resize_leaks_nothing() {
    let before = LIVE.load(Ordering::SeqCst);
    let result = catch_unwind(AssertUnwindSafe(|| {
        let mut v = Vector::new();
        for i in 0..10 {
            v.push(Counted::new(i));
        }
        // Every clone of a poisoned element panics; the partially
        // constructed suffix must be destroyed on the way out.
        v.resize(20, Counted::poisoned(0));
    }));
    assert!(result.is_err());
    assert_eq!(LIVE.load(Ordering::SeqCst), before);
}

#[test]
fn clone_panic_during_from_slice_leaks_nothing() {
    struct Flaky(u32);
    impl Clone for Flaky {
        fn clone(&self) -> Self {
            if self.0 == 3 {
                panic!("flaky clone");
            }
            Flaky(self.0)
        }
    }

    let source = [Flaky(0), Flaky(1), Flaky(2), Flaky(3), Flaky(4)];
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = Vector::from_slice(&source);
    }));
    assert!(result.is_err());
}

#[test]
fn panic_in_insert_many_restores_the_vector() {
    let before = LIVE.load(Ordering::SeqCst);
    let mut v: Vector<Counted> = (0..8).map(Counted::new).collect();
    let result = catch_unwind(AssertUnwindSafe(|| {
        let template = Counted::poisoned(0);
        // Two elements construct, the third panics mid-insertion.
        v.insert_many(
            4,
            (0..3).map(|i| if i < 2 { Counted::new(i) } else { template.clone() }),
        );
    }));
    assert!(result.is_err());
    // The vector is exactly as it was before the failed insertion.
    assert_eq!(v.len(), 8);
    for (i, c) in v.iter().enumerate() {
        assert_eq!(c.value, i as u32);
    }
    drop(v);
    assert_eq!(LIVE.load(Ordering::SeqCst), before);
}

#[test]
fn drop_accounting_across_operations() {
    let before = LIVE.load(Ordering::SeqCst);
    {
        let mut v: Vector<Counted> = (0..100).map(Counted::new).collect();
        v.truncate(60);
        v.drain(10..30);
        let _ = v.remove(5);
        let _ = v.swap_remove(0);
        v.insert(3, Counted::new(999));
        let tail: Vec<Counted> = v.drain(30..).collect();
        drop(tail);
        assert_eq!(v.len(), 30);
    }
    assert_eq!(LIVE.load(Ordering::SeqCst), before);
}

#[test]
fn into_iter_drop_accounting() {
    let before = LIVE.load(Ordering::SeqCst);
    {
        let v: Vector<Counted> = (0..50).map(Counted::new).collect();
        let mut it = v.into_iter();
        for _ in 0..17 {
            let _ = it.next();
        }
        let _ = it.next_back();
        // 32 remain in the iterator.
    }
    assert_eq!(LIVE.load(Ordering::SeqCst), before);
}

#[test]
fn capacity_is_preserved_by_element_ops() {
    let mut v: Vector<u32> = Vector::with_capacity(64);
    v.extend(0..64);
    let cap = v.capacity();
    v.truncate(10);
    v.clear();
    v.extend(0..32);
    let _ = v.pop();
    v.remove(0);
    assert_eq!(v.capacity(), cap);
}

#[test]
fn equality_across_representations() {
    let a: Vector<i32> = (0..5).collect();
    let b = Vector::from_slice(&[0, 1, 2, 3, 4]);
    let c: Vector<i32> = Vector::from([0, 1, 2, 3, 4]);
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(a, [0, 1, 2, 3, 4]);
    assert_eq!(a, &[0, 1, 2, 3, 4][..]);
}
