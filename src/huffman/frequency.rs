use std::collections::HashMap;

/// Occurrence count of every distinct code point of a text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<char, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        text.chars().collect()
    }

    #[inline(always)]
    pub fn add(&mut self, symbol: char) {
        self.counts.entry(symbol).and_modify(|freq| *freq += 1).or_insert(1);
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `(symbol, count)` pairs ordered by symbol, independent of insertion order.
    pub fn sorted(&self) -> Vec<(char, u64)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(&s, &c)| (s, c)).collect();
        entries.sort_unstable_by_key(|&(s, _)| s);
        entries
    }
}

impl FromIterator<char> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for c in iter {
            table.add(c);
        }
        table
    }
}

impl From<&str> for FrequencyTable {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
