use std::fmt;

use crate::{error::{Error, Result}, huffman::canonical::CodeTable};

const BITS_PER_WORD: usize = 64;
const BYTES_PER_WORD: usize = 8;

/// A growable sequence of bits packed most-significant-bit first into 64-bit words.
///
/// Bit `i` lives in word `i / 64` at position `63 - i % 64`, so appending never
/// moves what has already been written. Bits past `size_bits` are always zero.
#[derive(Clone, Debug, Default)]
pub struct BitBuffer {
    words: Vec<u64>,
    size_bits: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::with_capacity(BITS_PER_WORD)
    }

    pub fn with_capacity(capacity_bits: usize) -> Self {
        BitBuffer {
            words: vec![0; capacity_bits.div_ceil(BITS_PER_WORD).max(1)],
            size_bits: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.size_bits
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.size_bits == 0
    }

    pub fn capacity(&self) -> usize {
        self.words.len() * BITS_PER_WORD
    }

    /// Returns the bit at `index`, or `None` past the end.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.size_bits {
            return None;
        }

        let word = self.words[index / BITS_PER_WORD];
        Some((word >> (BITS_PER_WORD - 1 - index % BITS_PER_WORD)) & 1 == 1)
    }

    /// Appends the low `len` bits of `value`, highest of them first.
    #[inline(always)]
    pub fn append(&mut self, value: u64, len: usize) {
        assert!(len <= BITS_PER_WORD, "Cannot append {} bits from an integer", len);

        if len == 0 {
            return;
        }

        self.ensure_capacity(self.size_bits + len);

        let value = if len == BITS_PER_WORD { value } else { value & ((1 << len) - 1) };
        let word = self.size_bits / BITS_PER_WORD;
        let free = BITS_PER_WORD - self.size_bits % BITS_PER_WORD;

        if len <= free {
            self.words[word] |= value << (free - len);
        } else {
            let spill = len - free;
            self.words[word] |= value >> spill;
            self.words[word + 1] |= value << (BITS_PER_WORD - spill);
        }

        self.size_bits += len;
    }

    fn ensure_capacity(&mut self, min_bits: usize) {
        let needed = min_bits.div_ceil(BITS_PER_WORD);
        if needed > self.words.len() {
            let grown = (self.words.len() * 2).max(needed);
            self.words.resize(grown, 0);
        }
    }

    /// Exports the buffer. Byte 0 holds how many bits of the last payload byte are
    /// significant (1 to 8); the payload follows with its unused low bits zeroed.
    /// An empty buffer exports as the single byte `8`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload_len = self.size_bits.div_ceil(8);
        let tail = self.size_bits % 8;

        let mut bytes = Vec::with_capacity(payload_len + 1);
        bytes.push(if tail == 0 { 8 } else { tail as u8 });

        for i in 0..payload_len {
            let word = self.words[i / BYTES_PER_WORD];
            bytes.push((word >> (56 - 8 * (i % BYTES_PER_WORD))) as u8);
        }

        bytes
    }

    /// Rebuilds a buffer from the output of [`to_bytes`](BitBuffer::to_bytes) starting at `offset`.
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Result<Self> {
        let (&significant, payload) = bytes
            .get(offset..)
            .and_then(|b| b.split_first())
            .ok_or(Error::TruncatedPayload)?;

        if significant == 0 || significant > 8 {
            return Err(Error::InvalidTrailer(significant));
        }

        if payload.is_empty() {
            if significant != 8 {
                return Err(Error::TruncatedPayload);
            }
            return Ok(Self::new());
        }

        let mut buffer = Self::with_capacity(payload.len() * 8);
        let last = payload.len() - 1;

        for (i, &b) in payload.iter().enumerate() {
            let b = if i == last { b & (0xFF << (8 - significant)) } else { b };
            buffer.words[i / BYTES_PER_WORD] |= (b as u64) << (56 - 8 * (i % BYTES_PER_WORD));
        }
        buffer.size_bits = last * 8 + significant as usize;

        Ok(buffer)
    }

    /// Resolves the bits into symbols. Bits are accumulated one at a time into a
    /// candidate code, and a symbol is emitted as soon as the candidate matches an
    /// entry of `table`. The table must be prefix-free.
    pub fn decode(&self, table: &CodeTable) -> Result<String> {
        let mut text = String::with_capacity(self.size_bits / table.max_length().max(1) as usize);

        let mut value = 0u64;
        let mut length = 0u8;
        let mut start = 0;

        for i in 0..self.size_bits {
            let word = self.words[i / BITS_PER_WORD];
            let bit = (word >> (BITS_PER_WORD - 1 - i % BITS_PER_WORD)) & 1;

            value = (value << 1) | bit;
            length += 1;

            if let Some(symbol) = table.lookup(value, length) {
                text.push(symbol);
                value = 0;
                length = 0;
                start = i + 1;
            } else if length >= table.max_length() {
                return Err(Error::UnknownCode { position: start });
            }
        }

        if length != 0 {
            return Err(Error::TruncatedPayload);
        }

        Ok(text)
    }
}

impl PartialEq for BitBuffer {
    /// Equal when the bit sequences are, whatever the spare capacity.
    fn eq(&self, other: &Self) -> bool {
        let used = self.size_bits.div_ceil(BITS_PER_WORD);
        self.size_bits == other.size_bits && self.words[..used] == other.words[..used]
    }
}

impl Eq for BitBuffer {}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size_bits {
            let word = self.words[i / BITS_PER_WORD];
            let bit = (word >> (BITS_PER_WORD - 1 - i % BITS_PER_WORD)) & 1;
            f.write_str(if bit == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
