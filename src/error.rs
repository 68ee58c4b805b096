//! Error type shared by the codec, the container format and the binary.

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A header symbol does not start with a valid UTF-8 lead byte, or its bytes
    /// do not form a scalar value.
    #[error("invalid UTF-8 symbol encoding at byte {0}")]
    InvalidSymbolEncoding(usize),
    /// The header ended before all of its entries were read.
    #[error("container header is truncated at byte {0}")]
    TruncatedHeader(usize),
    /// The payload is missing, or ends in the middle of a code.
    #[error("container payload is truncated")]
    TruncatedPayload,
    /// The first payload byte must count the significant bits of the last byte.
    #[error("payload trailer declares {0} significant bits, expected 1 to 8")]
    InvalidTrailer(u8),
    /// A Huffman tree needs at least one symbol.
    #[error("cannot build a Huffman tree without symbols")]
    EmptyInput,
    /// Code lengths must lie in `1..=64`.
    #[error("invalid code length {1} for symbol {0:?}")]
    InvalidCodeLength(char, usize),
    #[error("symbol {0:?} appears more than once in the code table")]
    DuplicateSymbol(char),
    /// The code lengths claim more code space than exists, so no prefix code fits them.
    #[error("code lengths oversubscribe the code space")]
    OversubscribedCode,
    #[error("symbol {0:?} has no code in the table")]
    UnknownSymbol(char),
    /// The payload bits starting at `position` match no code of the table.
    #[error("payload bits at {position} match no code")]
    UnknownCode { position: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("could not read or write properties: {0}")]
    Properties(#[from] java_properties::PropertiesError),
    /// A properties file lacks a key or holds a value that does not parse.
    #[error("missing or malformed property {0:?}")]
    InvalidProperty(String),
}

pub type Result<T> = std::result::Result<T, Error>;
