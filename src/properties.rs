use std::{collections::HashMap, fs::File, io::{BufReader, BufWriter}, path::Path};

use java_properties::PropertiesWriter;

use crate::{bitstreams::BitBuffer, container::read_header, error::{Error, Result}};

/// Summary of a container, stored next to it as a `.properties` file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerProperties {
    /// Distinct symbols in the code table.
    pub symbols: usize,
    /// Code points in the encoded text.
    pub characters: usize,
    pub header_bytes: usize,
    pub payload_bits: usize,
    pub container_bytes: usize,
    pub max_code_length: u8,
}

const KEYS: [&str; 6] = ["symbols", "characters", "headerbytes", "payloadbits", "containerbytes", "maxcodelength"];

impl ContainerProperties {
    /// Reads the header and payload of `bytes`. The payload is decoded to count the characters.
    pub fn inspect(bytes: &[u8]) -> Result<Self> {
        let (table, header_bytes) = read_header(bytes)?;
        let bits = BitBuffer::from_bytes(bytes, header_bytes)?;
        let characters = bits.decode(&table)?.chars().count();

        Ok(Self {
            symbols: table.len(),
            characters,
            header_bytes,
            payload_bits: bits.len(),
            container_bytes: bytes.len(),
            max_code_length: table.max_length(),
        })
    }

    /// Average payload bits per character, or 0 for an empty text.
    pub fn bits_per_character(&self) -> f64 {
        if self.characters == 0 {
            return 0.0;
        }
        self.payload_bits as f64 / self.characters as f64
    }

    pub fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = PropertiesWriter::new(BufWriter::new(File::create(path)?));
        writer.write_comment("Huffman container properties")?;
        for (key, value) in KEYS.iter().zip(self.values()) {
            writer.write(key, &value)?;
        }
        writer.finish()?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let map = java_properties::read(BufReader::new(File::open(path)?))?;
        Self::try_from(map)
    }

    fn values(&self) -> [String; 6] {
        [
            self.symbols.to_string(),
            self.characters.to_string(),
            self.header_bytes.to_string(),
            self.payload_bits.to_string(),
            self.container_bytes.to_string(),
            self.max_code_length.to_string(),
        ]
    }
}

fn parse<T: std::str::FromStr>(map: &HashMap<String, String>, key: &str) -> Result<T> {
    map.get(key)
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| Error::InvalidProperty(key.to_string()))
}

impl TryFrom<HashMap<String, String>> for ContainerProperties {
    type Error = Error;

    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        Ok(ContainerProperties {
            symbols: parse(&value, "symbols")?,
            characters: parse(&value, "characters")?,
            header_bytes: parse(&value, "headerbytes")?,
            payload_bits: parse(&value, "payloadbits")?,
            container_bytes: parse(&value, "containerbytes")?,
            max_code_length: parse(&value, "maxcodelength")?,
        })
    }
}

impl From<&ContainerProperties> for String {
    fn from(val: &ContainerProperties) -> Self {
        let mut s = String::new();

        for (key, value) in KEYS.iter().zip(val.values()) {
            s.push_str(&format!("{}={}\n", key, value));
        }
        s.push_str(&format!("bitspercharacter={:.3}\n", val.bits_per_character()));

        s
    }
}
