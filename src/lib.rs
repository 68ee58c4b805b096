pub mod bitstreams;
pub mod huffman;
pub mod container;
pub mod properties;
pub mod logging;
pub mod error;

pub use bitstreams::BitBuffer;
pub use container::{decode, encode, Encoder};
pub use error::{Error, Result};
pub use huffman::{canonical::{CodeEntry, CodeTable}, frequency::FrequencyTable, tree::HuffmanTree};
pub use properties::ContainerProperties;
