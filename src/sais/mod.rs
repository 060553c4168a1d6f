//! Suffix array construction by induced sorting over dense integer
//! alphabets of arbitrary scale, as described in
//! [Two Efficient Algorithms for Linear Time Suffix Array
//! Construction](https://ieeexplore.ieee.org/document/5582081).
//!
//! The entry point is generic over the symbol width, so the 8, 16 and
//! 32 bit streams produced by the alphabet packer share one engine; the
//! reduced problems built during recursion run through the same code with
//! an `i64` alphabet. Indices are 64-bit throughout, matching the final
//! sparse-array output.

#[cfg(test)]
mod tests;
mod utils;

pub use utils::Symbol;
use utils::{Bucket, Types};

/// Inputs shorter than this are sorted by plain suffix comparison.
const THRESHOLD: usize = 64;

/// Empty name slot during the lms renumbering.
const NIL: i64 = -1;

/// Maximum length of the input string.
pub const MAX_LENGTH: usize = (i64::max_value() / 2) as usize;

/// Sort all suffixes of `s` into `sa`, which must provide one extra slot.
///
/// `scale` is the alphabet size (every symbol indexes below it). On return
/// `sa[0] == s.len()` is the virtual empty suffix and `sa[1..]` holds the
/// suffix array proper.
pub fn construct<T: Symbol>(s: &[T], scale: usize, sa: &mut [i64]) {
    assert_eq!(s.len() + 1, sa.len());
    assert!(s.len() <= MAX_LENGTH);

    sort_suffixes(s, scale, sa);
}

/// Shared dispatcher for the top level and every recursion level.
#[inline]
fn sort_suffixes<T: Symbol>(s: &[T], scale: usize, sa: &mut [i64]) {
    if s.len() < THRESHOLD {
        naive_sort(s, sa);
    } else {
        induced_sort(s, scale, sa);
    }
}

/// The simplest but time costing way to calculate a suffix array.
/// No auxiliary data structure is required.
fn naive_sort<T: Ord>(s: &[T], sa: &mut [i64]) {
    for (i, x) in (0..=s.len()).rev().enumerate() {
        sa[i] = x as i64;
    }

    (&mut sa[1..]).sort_by(|&i, &j| Ord::cmp(&s[i as usize..], &s[j as usize..]));
}

/// Suffix array induced-sorting.
/// O(n) time, with one bucket span per symbol plus a type bitmap.
fn induced_sort<T: Symbol>(s: &[T], scale: usize, sa: &mut [i64]) {
    if s.is_empty() {
        sa[0] = 0;
        return;
    }

    let ty = &Types::calculate(s);
    let bkt = &mut Bucket::calculate(s, scale);

    place_sorted_lms(s, ty, sa, bkt);
    induce_by_lms(s, ty, sa, bkt);
}

/// Put the totally ordered lms suffixes at the tails of their buckets,
/// ready for the final induction.
fn place_sorted_lms<T: Symbol>(s: &[T], ty: &Types, sa: &mut [i64], bkt: &mut Bucket) {
    let (n, is_permutation) = rank_lms_suffixes(s, ty, sa, bkt);

    if is_permutation {
        // gather lms positions in text order into the head of sa
        let mut m = 0;
        for i in 0..=s.len() {
            if ty.is_lms(i) {
                sa[m] = i as i64;
                m += 1;
            }
        }

        // translate the ranks in the tail back to text positions
        for i in sa.len() - n..sa.len() {
            sa[i] = sa[sa[i] as usize];
        }
    }

    // move the sorted lms suffixes to the head first
    sa.copy_within(sa.len() - n.., 0);

    // then drop each one at the decrementing tail of its bucket; the
    // target slot never falls below the read cursor, so nothing unread
    // gets clobbered
    for i in (1..n).rev() {
        let c = s[sa[i] as usize].index();
        let sp = &mut bkt[c];
        sp.j -= 1;
        sa[sp.j] = sa[i];
    }
}

/// Sort the lms substrings, name them, and resolve collisions by
/// recursing on the reduced string. Leaves either the sorted lms suffixes
/// (`false`) or their rank permutation (`true`) in the tail of `sa`,
/// returning the lms count as well.
fn rank_lms_suffixes<T: Symbol>(
    s: &[T],
    ty: &Types,
    sa: &mut [i64],
    bkt: &mut Bucket,
) -> (usize, bool) {
    // place lms characters at the tails of their buckets
    sa[0] = s.len() as i64;
    for i in (1..s.len()).rev() {
        if ty.is_lms(i) {
            let sp = &mut bkt[s[i].index()];
            sp.j -= 1;
            sa[sp.j] = i as i64;
        }
    }

    // one full induction sorts the lms substrings
    induce_by_lms(s, ty, sa, bkt);

    // collect them into the tail of sa, keeping the induced order
    let mut lms_head = sa.len();
    for i in (0..sa.len()).rev() {
        if ty.is_lms(sa[i] as usize) {
            lms_head -= 1;
            sa[lms_head] = sa[i];
        }
    }
    let (head, lms) = sa.split_at_mut(lms_head);

    // rename: adjacent equal substrings share a name, stored at s-indexed
    // slots of the head region (lms positions are at least two apart)
    for x in head.iter_mut() {
        *x = NIL;
    }
    let mut names: i64 = 0;
    let mut last = lms[0];
    for p in 1..lms.len() {
        let x = lms[p];
        if !lms_substring_eq(s, ty, last as usize, x as usize) {
            names += 1;
        }
        head[x as usize / 2] = names - 1;
        last = x;
    }

    // compact the reduced string, which reads in text order
    let mut n = 0;
    for i in 0..head.len() {
        if head[i] == NIL {
            continue;
        }
        head[n] = head[i];
        n += 1;
    }

    if (names as usize) + 1 < lms.len() {
        // name collisions: recurse to order the lms suffixes
        let reduced = &head[..n];
        sort_suffixes(reduced, names as usize, lms);
        (lms.len(), true)
    } else {
        // all names unique, substring order is already suffix order
        (lms.len(), false)
    }
}

/// Induce the whole suffix array from sorted lms suffixes, or the order
/// of lms substrings from lms characters dropped in their buckets.
fn induce_by_lms<T: Symbol>(s: &[T], ty: &Types, sa: &mut [i64], bkt: &mut Bucket) {
    // seed with the predecessor of the sentinel, always L-type
    let c = s[s.len() - 1].index();
    bkt[c].push_front(sa, (s.len() - 1) as i64);

    // left-to-right pass: append L-type predecessors at bucket heads
    for c0 in 0..bkt.len() {
        let mut i = bkt[c0].head;
        while i < bkt[c0].i {
            let j = sa[i];
            if j > 0 && !ty[j as usize - 1] {
                let c = s[j as usize - 1].index();
                bkt[c].push_front(sa, j - 1);
            }
            i += 1;
        }

        // entries in the lms region always have an L-type predecessor
        i = bkt[c0].j;
        while i < bkt[c0].tail {
            let j = sa[i];
            let c = s[j as usize - 1].index();
            bkt[c].push_front(sa, j - 1);
            i += 1;
        }
    }

    for c in 0..bkt.len() {
        bkt[c].reset_back();
    }

    // right-to-left pass: prepend S-type predecessors at bucket tails,
    // overwriting the stale lms region on the way
    for c0 in (0..bkt.len()).rev() {
        let mut i = bkt[c0].tail;
        while i > bkt[c0].j {
            let j = sa[i - 1];
            if j > 0 && ty[j as usize - 1] {
                let c = s[j as usize - 1].index();
                bkt[c].push_back(sa, j - 1);
            }
            i -= 1;
        }

        i = bkt[c0].i;
        while i > bkt[c0].head {
            let j = sa[i - 1];
            if j > 0 && ty[j as usize - 1] {
                let c = s[j as usize - 1].index();
                bkt[c].push_back(sa, j - 1);
            }
            i -= 1;
        }
    }

    for c in 0..bkt.len() {
        bkt[c].reset();
    }
}

/// Test whether two lms substrings are equal, symbol for symbol and type
/// for type. `i` or `j` may be the sentinel position.
fn lms_substring_eq<T: Symbol>(s: &[T], ty: &Types, i: usize, j: usize) -> bool {
    use std::iter::once;
    let xs = s[i..].iter().map(Some).chain(once(None));
    let ys = s[j..].iter().map(Some).chain(once(None));

    for (k, (x, y)) in Iterator::zip(xs, ys).enumerate() {
        if x != y || ty[i + k] != ty[j + k] {
            return false;
        }
        if k > 0 && (ty.is_lms(i + k) || ty.is_lms(j + k)) {
            return true;
        }
    }
    false
}
