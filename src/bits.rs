//! MSB-first bit packing and unpacking.

use crate::error::{HuffError, Result};

/// Packed payload bytes plus the number of zero filler bits in the last byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    pub padding: u8,
}

impl PackedBits {
    /// Number of meaningful bits, excluding padding.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 - self.padding as usize
    }
}

#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_count: 0,
        }
    }

    pub fn bit_len(&self) -> usize {
        self.bit_count
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }
        self.bit_count += 1;
    }

    /// Appends a code given as a string of `'0'`/`'1'` characters.
    pub fn push_code(&mut self, code: &str) {
        for c in code.bytes() {
            self.push_bit(c == b'1');
        }
    }

    /// Pads to a byte boundary. New bytes start zeroed, so the filler bits
    /// are already in place and only need counting.
    pub fn finish(self) -> PackedBits {
        let padding = ((8 - self.bit_count % 8) % 8) as u8;
        PackedBits {
            bytes: self.bytes,
            padding,
        }
    }
}

/// Iterates the bits of packed bytes MSB-first, stopping before the padding.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    position: usize,
    end: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8], padding: u8) -> Result<Self> {
        if padding > 7 {
            return Err(HuffError::format(format!(
                "padding {} out of range 0..=7",
                padding
            )));
        }
        let available = bytes.len() * 8;
        if padding as usize > available {
            return Err(HuffError::format(format!(
                "padding {} exceeds the {} payload bits",
                padding, available
            )));
        }
        if let Some(&last) = bytes.last() {
            let filler_mask = ((1u16 << padding) - 1) as u8;
            if last & filler_mask != 0 {
                return Err(HuffError::format("padding bits are not zero"));
            }
        }
        Ok(Self {
            bytes,
            position: 0,
            end: available - padding as usize,
        })
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.position >= self.end {
            return None;
        }
        let byte = self.bytes[self.position / 8];
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitReader<'_> {}
