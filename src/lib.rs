//! Sparse suffix array construction for DNA and protein sequences,
//! balanced for indexing large texts with a fraction of the memory a full
//! suffix array would take.
//!
//! A sparse suffix array of factor `k` lists the text positions divisible
//! by `k`, sorted by the lexicographic order of the suffixes starting
//! there. Instead of building the full array and subsampling it, the
//! builder packs each window of `k` characters into one machine word in an
//! order-preserving way, sorts the packed text with SAIS as described in
//! [Two Efficient Algorithms for Linear Time Suffix Array
//! Construction](https://ieeexplore.ieee.org/document/5582081), and scales
//! the resulting indices back up. Construction is single-threaded and
//! deterministic.

mod alphabet;
mod packed;
mod sais;

pub use alphabet::{Alphabet, PackedText, SequenceKind, Symbols};
pub use packed::PackedSparseArray;
pub use sais::MAX_LENGTH;

use alphabet::ceiling_div;
use std::cmp::Ordering;
use std::fmt;
use std::io::{Error, ErrorKind, Read, Result, Write};

/// Reasons a sparse suffix array cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// The packed symbols would not fit the widest supported stream:
    /// `bits_per_char · sparseness` exceeds 32.
    AlphabetTooLarge {
        bits_per_char: u32,
        sparseness: usize,
    },
    /// The sparseness factor must be at least one.
    InvalidSparseness,
    /// The sparseness factor does not fit the single header byte of the
    /// packed output format.
    SparsenessTooLarge,
    /// The text exceeds the engine's addressable range.
    TextTooLong,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BuildError::AlphabetTooLarge {
                bits_per_char,
                sparseness,
            } => write!(
                f,
                "alphabet too large: {} bits per character at sparseness {} \
                 exceeds the 32-bit symbol limit",
                bits_per_char, sparseness
            ),
            BuildError::InvalidSparseness => {
                write!(f, "sparseness factor must be at least one")
            }
            BuildError::SparsenessTooLarge => {
                write!(f, "sparseness factor must fit a single byte")
            }
            BuildError::TextTooLong => write!(f, "input text too long"),
        }
    }
}

impl std::error::Error for BuildError {}

/// Sparse suffix array over a byte text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseSuffixArray {
    sparseness: u32,
    text_len: usize,
    sa: Vec<i64>,
}

impl SparseSuffixArray {
    /// Build the sparse suffix array of `text` with the given sparseness
    /// factor, by packing `sparseness`-character windows into single
    /// symbols and suffix-sorting the packed text.
    pub fn build(
        text: &[u8],
        sparseness: u32,
        kind: SequenceKind,
    ) -> std::result::Result<Self, BuildError> {
        let k = Self::validate(text, sparseness)?;
        if text.is_empty() {
            return Ok(SparseSuffixArray {
                sparseness,
                text_len: 0,
                sa: Vec::new(),
            });
        }

        let packed = Alphabet::from_text(text, kind).pack(text, k)?;
        let mut sa = vec![0i64; packed.len() + 1];
        sort_packed(&packed, &mut sa[..]);

        // drop the sentinel, scale packed indices back to text positions
        let step = sparseness as i64;
        let sa = sa[1..].iter().map(|&p| p * step).collect();
        Ok(SparseSuffixArray {
            sparseness,
            text_len: text.len(),
            sa,
        })
    }

    /// Reference construction: suffix-sort the whole text, then keep the
    /// positions divisible by the sparseness factor. Same result as
    /// [`build`](Self::build), with none of its memory savings.
    pub fn build_unoptimized(
        text: &[u8],
        sparseness: u32,
        kind: SequenceKind,
    ) -> std::result::Result<Self, BuildError> {
        let k = Self::validate(text, sparseness)?;
        if text.is_empty() {
            return Ok(SparseSuffixArray {
                sparseness,
                text_len: 0,
                sa: Vec::new(),
            });
        }

        let packed = Alphabet::from_text(text, kind).pack(text, 1)?;
        let mut sa = vec![0i64; packed.len() + 1];
        sort_packed(&packed, &mut sa[..]);

        let sa = sa[1..]
            .iter()
            .copied()
            .filter(|p| p % k as i64 == 0)
            .collect();
        Ok(SparseSuffixArray {
            sparseness,
            text_len: text.len(),
            sa,
        })
    }

    fn validate(text: &[u8], sparseness: u32) -> std::result::Result<usize, BuildError> {
        if sparseness == 0 {
            return Err(BuildError::InvalidSparseness);
        }
        if sparseness > u8::max_value() as u32 {
            return Err(BuildError::SparsenessTooLarge);
        }
        if text.len() > MAX_LENGTH {
            return Err(BuildError::TextTooLong);
        }
        Ok(sparseness as usize)
    }

    /// Take out the sparseness factor and the sorted positions.
    pub fn into_parts(self) -> (u32, Vec<i64>) {
        (self.sparseness, self.sa)
    }

    /// Compose an existing position array with its text, checking that it
    /// really is the sparse suffix array of that text.
    pub fn from_parts(
        text: &[u8],
        kind: SequenceKind,
        sparseness: u32,
        sa: Vec<i64>,
    ) -> Option<Self> {
        let compose = SparseSuffixArray {
            sparseness,
            text_len: text.len(),
            sa,
        };
        if compose.check_integrity(text, kind) {
            Some(compose)
        } else {
            None
        }
    }

    /// The sparseness factor this array was built with.
    pub fn sparseness(&self) -> u32 {
        self.sparseness
    }

    /// Length of the underlying text.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Number of sampled suffixes.
    pub fn len(&self) -> usize {
        self.sa.len()
    }

    /// Test if no suffix was sampled.
    pub fn is_empty(&self) -> bool {
        self.sa.len() == 0
    }

    /// Sampled text positions in lexicographic order of their suffixes.
    pub fn positions(&self) -> &[i64] {
        &self.sa[..]
    }

    /// Write the array as raw little-endian 64-bit entries, no header.
    pub fn dump_raw<W: Write>(&self, mut file: W) -> Result<()> {
        for &p in self.sa.iter() {
            file.write_all(&(p as u64).to_le_bytes())?;
        }
        Ok(())
    }

    /// Write the array in the bit-packed format.
    pub fn dump_packed<W: Write>(&self, file: W) -> Result<()> {
        PackedSparseArray::from_positions(&self.sa[..], self.text_len, self.sparseness).dump(file)
    }

    /// Read a bit-packed array and check it against its text.
    pub fn load_packed<R: Read>(text: &[u8], kind: SequenceKind, file: R) -> Result<Self> {
        let packed = PackedSparseArray::load(file)?;
        let sparseness = packed.sparseness() as u32;
        let ssa = SparseSuffixArray {
            sparseness,
            text_len: text.len(),
            sa: packed.into_positions(),
        };

        if !ssa.check_integrity(text, kind) {
            Err(Error::new(
                ErrorKind::InvalidData,
                "inconsistent sparse suffix array",
            ))
        } else {
            Ok(ssa)
        }
    }

    /// Test that the array is a permutation of the sample grid sorted by
    /// suffix order.
    fn check_integrity(&self, text: &[u8], kind: SequenceKind) -> bool {
        let k = self.sparseness as usize;
        if k == 0 || text.len() > MAX_LENGTH {
            return false;
        }

        let expected = ceiling_div(text.len(), k);
        if self.sa.len() != expected {
            return false;
        }

        let mut seen = vec![false; expected];
        for &p in self.sa.iter() {
            if p < 0 || p as usize >= text.len() || p as usize % k != 0 {
                return false;
            }
            let slot = p as usize / k;
            if seen[slot] {
                return false;
            }
            seen[slot] = true;
        }

        self.sa.windows(2).all(|w| {
            suffix_cmp(text, kind, w[0] as usize, w[1] as usize) == Ordering::Less
        })
    }
}

impl From<SparseSuffixArray> for Vec<i64> {
    fn from(ssa: SparseSuffixArray) -> Vec<i64> {
        ssa.sa
    }
}

/// Suffix-sort a packed text through the entry matching its symbol width.
fn sort_packed(packed: &PackedText, sa: &mut [i64]) {
    match packed.symbols {
        Symbols::U8(ref v) => sais::construct(&v[..], packed.scale, sa),
        Symbols::U16(ref v) => sais::construct(&v[..], packed.scale, sa),
        Symbols::U32(ref v) => sais::construct(&v[..], packed.scale, sa),
    }
}

/// Compare two suffixes under the alphabet folding of `kind`.
fn suffix_cmp(text: &[u8], kind: SequenceKind, i: usize, j: usize) -> Ordering {
    Iterator::cmp(
        text[i..].iter().map(|&b| kind.fold(b)),
        text[j..].iter().map(|&b| kind.fold(b)),
    )
}
