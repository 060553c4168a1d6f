//! Bit-packed serialization of a sparse suffix array.
//!
//! Entries are stored in the minimum number of bits sufficient to address
//! the original text, most significant bit first within each 64-bit word,
//! words concatenated across the stream. A ten-byte header records the
//! element width, the sparseness factor and the entry count.

use super::alphabet::{bit_length, ceiling_div};
use std::io::prelude::*;
use std::io::{Error, ErrorKind, Result};

/// Sparse suffix array packed to `bits` bits per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedSparseArray {
    bits: u8,
    sparseness: u8,
    length: u64,
    words: Vec<u64>,
}

impl PackedSparseArray {
    /// Pack `sa`, whose entries address a text of `text_len` bytes.
    /// The sparseness factor must fit the single header byte.
    pub fn from_positions(sa: &[i64], text_len: usize, sparseness: u32) -> Self {
        assert!(sparseness >= 1 && sparseness <= u8::max_value() as u32);

        let bits = index_bits(text_len as u64);
        PackedSparseArray {
            bits,
            sparseness: sparseness as u8,
            length: sa.len() as u64,
            words: compress(sa, bits),
        }
    }

    /// Unpack back into positions.
    pub fn into_positions(self) -> Vec<i64> {
        decompress(&self.words[..], self.bits, self.length as usize)
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    pub fn sparseness(&self) -> u8 {
        self.sparseness
    }

    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the header and the packed words.
    pub fn dump<W: Write>(&self, mut file: W) -> Result<()> {
        file.write_all(&[self.bits, self.sparseness])?;
        file.write_all(&self.length.to_le_bytes())?;
        for w in self.words.iter() {
            file.write_all(&w.to_le_bytes())?;
        }
        Ok(())
    }

    /// Read an array written by `dump`.
    pub fn load<R: Read>(mut file: R) -> Result<Self> {
        let mut header = [0u8; 2];
        file.read_exact(&mut header)?;
        let (bits, sparseness) = (header[0], header[1]);
        if bits == 0 || bits > 64 {
            return Err(invalid("unrepresentable element width"));
        }
        if sparseness == 0 {
            return Err(invalid("zero sparseness factor"));
        }

        let mut raw = [0u8; 8];
        file.read_exact(&mut raw)?;
        let length = u64::from_le_bytes(raw);

        let total_bits = length
            .checked_mul(bits as u64)
            .ok_or_else(|| invalid("element count out of range"))?;
        let word_count = ceiling_div(total_bits as usize, 64);
        let mut words = Vec::with_capacity(word_count);
        for _ in 0..word_count {
            file.read_exact(&mut raw)?;
            words.push(u64::from_le_bytes(raw));
        }

        Ok(PackedSparseArray {
            bits,
            sparseness,
            length,
            words,
        })
    }
}

/// Width of a packed element for a text of `text_len` bytes: enough bits
/// to address every position, plus one.
pub fn index_bits(text_len: u64) -> u8 {
    (bit_length(text_len.saturating_sub(1)) + 1) as u8
}

/// Pack each value into `bits` bits, most significant bit first within
/// each 64-bit word.
fn compress(values: &[i64], bits: u8) -> Vec<u64> {
    debug_assert!(bits >= 1 && bits <= 64);

    let b = bits as u32;
    let mut words = Vec::with_capacity(ceiling_div(values.len() * b as usize, 64));
    let mut word = 0u64;
    let mut used = 0u32;

    for &v in values.iter() {
        debug_assert!(v >= 0);
        let v = v as u64;
        debug_assert!(b == 64 || v < 1 << b);

        if used + b <= 64 {
            word |= v << (64 - used - b);
            used += b;
            if used == 64 {
                words.push(word);
                word = 0;
                used = 0;
            }
        } else {
            // split across the word boundary
            let spill = used + b - 64;
            word |= v >> spill;
            words.push(word);
            word = v << (64 - spill);
            used = spill;
        }
    }
    if used > 0 {
        words.push(word);
    }
    words
}

/// Exact inverse of `compress` for `len` entries.
fn decompress(words: &[u64], bits: u8, len: usize) -> Vec<i64> {
    debug_assert!(bits >= 1 && bits <= 64);

    let b = bits as u32;
    let mask = if b == 64 {
        u64::max_value()
    } else {
        (1u64 << b) - 1
    };
    let mut values = Vec::with_capacity(len);
    let mut w = 0;
    let mut used = 0u32;

    for _ in 0..len {
        let v = if used + b <= 64 {
            let v = (words[w] >> (64 - used - b)) & mask;
            used += b;
            if used == 64 {
                w += 1;
                used = 0;
            }
            v
        } else {
            let spill = used + b - 64;
            let high = words[w] & (u64::max_value() >> used);
            w += 1;
            let low = words[w] >> (64 - spill);
            used = spill;
            ((high << spill) | low) & mask
        };
        values.push(v as i64);
    }
    values
}

fn invalid(what: &str) -> Error {
    Error::new(ErrorKind::InvalidData, what)
}
