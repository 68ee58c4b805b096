//! The binary container: a table of `(symbol, code length)` pairs followed by the
//! bit-packed text.
//!
//! ```text
//! [entry count: u32, big-endian]
//! entry count times:
//!     [symbol: 1 to 4 bytes of UTF-8]
//!     [code length: u8]
//! [payload: BitBuffer::to_bytes()]
//! ```
//!
//! Code values are not stored; the decoder re-derives them by canonical assignment.

use tracing::debug;

use crate::{
    bitstreams::BitBuffer,
    error::{Error, Result},
    huffman::{build_code_table, canonical::CodeTable, frequency::FrequencyTable},
};

pub const ENTRY_COUNT_BYTES: usize = 4;

/// Encodes texts with the canonical code derived from a reference text.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    table: CodeTable,
}

impl Encoder {
    /// Derives the code from the symbol frequencies of `text`. An empty text yields
    /// an empty table.
    pub fn new(text: &str) -> Result<Self> {
        let frequencies = FrequencyTable::from_text(text);
        if frequencies.is_empty() {
            return Ok(Self::default());
        }

        Ok(Self { table: build_code_table(&frequencies)? })
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    pub fn write_header(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.table.len() as u32).to_be_bytes());

        let mut utf8 = [0u8; 4];
        for entry in self.table.entries() {
            out.extend_from_slice(entry.symbol.encode_utf8(&mut utf8).as_bytes());
            out.push(entry.length);
        }
    }

    /// Packs the codes of every symbol of `text`, in order.
    pub fn write_payload(&self, text: &str) -> Result<BitBuffer> {
        let mut bits = BitBuffer::with_capacity(text.len() * 8);

        for symbol in text.chars() {
            let entry = self.table.code_for(symbol).ok_or(Error::UnknownSymbol(symbol))?;
            bits.append(entry.value, entry.length as usize);
        }

        Ok(bits)
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let bits = self.write_payload(text)?;

        let mut out = Vec::with_capacity(ENTRY_COUNT_BYTES + 5 * self.table.len() + bits.len().div_ceil(8) + 1);
        self.write_header(&mut out);
        let header_bytes = out.len();
        out.extend_from_slice(&bits.to_bytes());

        debug!(symbols = self.table.len(), header_bytes, payload_bits = bits.len(), total_bytes = out.len(), "encoded container");

        Ok(out)
    }
}

/// Encodes `text` into a self-contained container.
pub fn encode(text: &str) -> Result<Vec<u8>> {
    Encoder::new(text)?.encode(text)
}

/// Reconstructs the text stored in a container produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<String> {
    let (table, payload_offset) = read_header(bytes)?;
    let bits = BitBuffer::from_bytes(bytes, payload_offset)?;

    let text = bits.decode(&table)?;
    debug!(symbols = table.len(), payload_bits = bits.len(), chars = text.chars().count(), "decoded container");

    Ok(text)
}

/// Reads the header and rebuilds the canonical table. Returns the table and the
/// offset of the payload.
pub fn read_header(bytes: &[u8]) -> Result<(CodeTable, usize)> {
    let mut reader = HeaderReader::new(bytes);

    let count = reader.read_u32()? as usize;
    // Every entry takes at least two bytes.
    let mut lengths = Vec::with_capacity(count.min(bytes.len() / 2));

    for _ in 0..count {
        let symbol = reader.read_symbol()?;
        let length = reader.read_u8()?;
        lengths.push((symbol, length));
    }

    Ok((CodeTable::from_lengths(lengths)?, reader.position))
}

struct HeaderReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> HeaderReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        HeaderReader { bytes, position: 0 }
    }

    #[inline(always)]
    fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let slice = self.bytes
            .get(self.position..self.position + len)
            .ok_or(Error::TruncatedHeader(self.position))?;
        self.position += len;
        Ok(slice)
    }

    #[inline(always)]
    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_slice(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut be = [0u8; 4];
        be.copy_from_slice(self.read_slice(4)?);
        Ok(u32::from_be_bytes(be))
    }

    /// Reads one UTF-8 encoded scalar value; its width comes from the lead byte.
    ///
    /// A lead byte that is not a UTF-8 lead is `InvalidSymbolEncoding`. A valid lead
    /// whose continuation bytes run past the end of the input is `TruncatedHeader`,
    /// reported at the offset of the lead byte.
    fn read_symbol(&mut self) -> Result<char> {
        let start = self.position;
        let lead = *self.bytes.get(start).ok_or(Error::TruncatedHeader(start))?;

        let width = match lead {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(Error::InvalidSymbolEncoding(start)),
        };

        let raw = self.read_slice(width)?;
        std::str::from_utf8(raw)
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or(Error::InvalidSymbolEncoding(start))
    }
}
