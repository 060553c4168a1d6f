use std::ops::{Index, IndexMut};

/// Symbol of the text being sorted.
///
/// The engine accepts 8, 16 and 32 bit packed streams; `i64` is the
/// alphabet of the reduced problems built during recursion.
pub trait Symbol: Copy + Ord {
    fn index(self) -> usize;
}

impl Symbol for u8 {
    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl Symbol for u16 {
    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl Symbol for u32 {
    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl Symbol for i64 {
    #[inline]
    fn index(self) -> usize {
        debug_assert!(self >= 0);
        self as usize
    }
}

/// Type bitmap of the input string (S-type bits set, L-type clear).
#[derive(Debug, Clone)]
pub struct Types {
    len: usize,
    map: Vec<u64>,
}

impl Types {
    fn new(len: usize) -> Self {
        let chunks = if len % 64 == 0 {
            len / 64
        } else {
            len / 64 + 1
        };
        Types {
            len,
            map: vec![0; chunks],
        }
    }

    /// Classify every position by a single right-to-left scan.
    /// The last position is always L-type (the sentinel is smaller).
    pub fn calculate<T: Ord>(s: &[T]) -> Self {
        let mut types = Types::new(s.len());

        for i in (0..s.len() - 1).rev() {
            use std::cmp::Ordering::*;
            match Ord::cmp(&s[i], &s[i + 1]) {
                Less => types.set(i),
                Greater => (),
                Equal => {
                    if types[i + 1] {
                        types.set(i);
                    }
                }
            }
        }
        types
    }

    #[inline]
    fn set(&mut self, i: usize) {
        debug_assert!(i < self.len);
        self.map[i / 64] |= 1 << (i % 64);
    }

    /// Test for an S-type position preceded by an L-type one.
    /// The sentinel position (`i == len`) counts as lms.
    #[inline]
    pub fn is_lms(&self, i: usize) -> bool {
        debug_assert!(i <= self.len);
        if i == self.len {
            true
        } else if i == 0 {
            false
        } else {
            self[i] && !self[i - 1]
        }
    }
}

impl Index<usize> for Types {
    type Output = bool;

    fn index(&self, i: usize) -> &bool {
        debug_assert!(i < self.len);
        let chunk = if cfg!(debug_assertions) {
            self.map[i / 64]
        } else {
            unsafe { *self.map.get_unchecked(i / 64) }
        };

        if chunk & (1 << (i % 64)) != 0 {
            &true
        } else {
            &false
        }
    }
}

/// Non-overlapping span of the suffix array with double direction pointers.
/// `head..tail` are the bucket bounds; `i` fills forward, `j` backward.
#[derive(Debug, Copy, Clone)]
pub struct Span {
    pub head: usize,
    pub tail: usize,
    pub i: usize,
    pub j: usize,
}

impl Span {
    #[inline]
    fn new() -> Span {
        Span {
            head: 0,
            tail: 0,
            i: 0,
            j: 0,
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        self.reset_front();
        self.reset_back();
    }

    #[inline]
    pub fn reset_front(&mut self) {
        self.i = self.head;
    }

    #[inline]
    pub fn reset_back(&mut self) {
        self.j = self.tail;
    }

    #[inline]
    pub fn push_front(&mut self, sa: &mut [i64], n: i64) {
        if cfg!(debug_assertions) {
            sa[self.i] = n;
        } else {
            unsafe {
                *sa.get_unchecked_mut(self.i) = n;
            }
        }
        self.i += 1;
    }

    #[inline]
    pub fn push_back(&mut self, sa: &mut [i64], n: i64) {
        self.j -= 1;
        if cfg!(debug_assertions) {
            sa[self.j] = n;
        } else {
            unsafe {
                *sa.get_unchecked_mut(self.j) = n;
            }
        }
    }
}

/// Bucket index: one span per symbol, offset by one for the sentinel slot.
#[derive(Debug)]
pub struct Bucket(Vec<Span>);

impl Bucket {
    pub fn calculate<T: Symbol>(s: &[T], scale: usize) -> Self {
        let mut bkt = vec![Span::new(); scale];

        for &c in s.iter() {
            bkt[c.index()].tail += 1;
        }

        let mut offset = 1;
        for sp in bkt.iter_mut() {
            sp.head = offset;
            offset += sp.tail;
            sp.tail += sp.head;
            sp.reset();
        }
        Bucket(bkt)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Index<usize> for Bucket {
    type Output = Span;

    fn index(&self, i: usize) -> &Span {
        if cfg!(debug_assertions) {
            &self.0[i]
        } else {
            unsafe { self.0.get_unchecked(i) }
        }
    }
}

impl IndexMut<usize> for Bucket {
    fn index_mut(&mut self, i: usize) -> &mut Span {
        if cfg!(debug_assertions) {
            &mut self.0[i]
        } else {
            unsafe { self.0.get_unchecked_mut(i) }
        }
    }
}
