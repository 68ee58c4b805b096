use std::{collections::HashMap, fmt};

use serde::Serialize;

use crate::error::{Error, Result};

use super::MAX_CODE_LENGTH;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CodeEntry {
    pub symbol: char,
    pub length: u8,
    /// Fits in the low `length` bits.
    pub value: u64,
}

impl fmt::Display for CodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.length as usize)
    }
}

/// A canonical Huffman code.
///
/// Entries are kept sorted by `(length, symbol)`, which makes the codes of each
/// length a run of consecutive integers. Decoding only needs, for every length,
/// the first code and where its run starts in `entries`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    entries: Vec<CodeEntry>,
    by_symbol: HashMap<char, usize>,
    /// Indexed by code length; slot 0 is unused.
    first_code: Vec<u64>,
    first_index: Vec<usize>,
    counts: Vec<usize>,
    max_length: u8,
}

impl CodeTable {
    /// Assigns canonical values to `(symbol, length)` pairs. The result depends only on
    /// the set of pairs, not on their order.
    ///
    /// After sorting by `(length, symbol)` the first code is 0 and every next one is
    /// `(previous + 1) << (length - previous_length)`.
    pub fn from_lengths(mut lengths: Vec<(char, u8)>) -> Result<Self> {
        lengths.sort_unstable_by_key(|&(symbol, length)| (length, symbol));

        let max_length = lengths.last().map_or(0, |&(_, length)| length);
        let mut table = CodeTable {
            entries: Vec::with_capacity(lengths.len()),
            by_symbol: HashMap::with_capacity(lengths.len()),
            first_code: vec![0; max_length as usize + 1],
            first_index: vec![0; max_length as usize + 1],
            counts: vec![0; max_length as usize + 1],
            max_length,
        };

        let mut previous: Option<(u128, u8)> = None;

        for (symbol, length) in lengths {
            if length == 0 || length as usize > MAX_CODE_LENGTH {
                return Err(Error::InvalidCodeLength(symbol, length as usize));
            }

            let value = match previous {
                None => 0,
                Some((value, previous_length)) => (value + 1) << (length - previous_length),
            };

            if value >> length != 0 {
                return Err(Error::OversubscribedCode);
            }

            if table.by_symbol.insert(symbol, table.entries.len()).is_some() {
                return Err(Error::DuplicateSymbol(symbol));
            }

            let slot = length as usize;
            if table.counts[slot] == 0 {
                table.first_code[slot] = value as u64;
                table.first_index[slot] = table.entries.len();
            }
            table.counts[slot] += 1;

            table.entries.push(CodeEntry { symbol, length, value: value as u64 });
            previous = Some((value, length));
        }

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    pub fn max_length(&self) -> u8 {
        self.max_length
    }

    /// Entries in canonical order.
    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    #[inline(always)]
    pub fn code_for(&self, symbol: char) -> Option<&CodeEntry> {
        self.by_symbol.get(&symbol).map(|&i| &self.entries[i])
    }

    /// The symbol whose code is exactly the low `length` bits of `value`.
    #[inline(always)]
    pub fn lookup(&self, value: u64, length: u8) -> Option<char> {
        let slot = length as usize;
        let count = *self.counts.get(slot)?;

        let offset = value.checked_sub(self.first_code[slot])?;
        if slot == 0 || offset >= count as u64 {
            return None;
        }

        Some(self.entries[self.first_index[slot] + offset as usize].symbol)
    }
}
