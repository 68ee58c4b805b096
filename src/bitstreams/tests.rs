use rand::Rng;

use crate::{error::Error, huffman::canonical::CodeTable};

use super::BitBuffer;

#[test]
fn test_append_msb_first() {
    let mut buffer = BitBuffer::new();
    buffer.append(0b101, 3);
    buffer.append(0b0, 1);
    buffer.append(0b11, 2);

    assert_eq!(buffer.len(), 6);
    assert_eq!(buffer.to_string(), "101011");
    assert_eq!(buffer.get(0), Some(true));
    assert_eq!(buffer.get(1), Some(false));
    assert_eq!(buffer.get(5), Some(true));
    assert_eq!(buffer.get(6), None);
}

#[test]
fn test_append_keeps_only_low_bits() {
    let mut buffer = BitBuffer::new();
    buffer.append(0xFF, 4);
    buffer.append(u64::MAX, 0);

    assert_eq!(buffer.to_string(), "1111");
    assert_eq!(buffer.to_bytes(), vec![4, 0b1111_0000]);
}

#[test]
fn test_zero_length_append_is_noop() {
    let mut buffer = BitBuffer::new();
    buffer.append(0, 0);

    assert!(buffer.is_empty());
    assert_eq!(buffer, BitBuffer::new());
    assert_eq!(buffer.to_bytes(), vec![8]);
}

#[test]
#[should_panic]
fn test_append_more_than_a_word() {
    let mut buffer = BitBuffer::new();
    buffer.append(0, 65);
}

#[test]
fn test_append_across_words() {
    let mut buffer = BitBuffer::new();
    buffer.append(0, 60);
    buffer.append(0xABCD, 16);
    buffer.append(u64::MAX, 64);

    assert_eq!(buffer.len(), 140);
    assert!(buffer.capacity() >= 140);

    let s = buffer.to_string();
    assert_eq!(&s[..60], "0".repeat(60));
    assert_eq!(&s[60..76], "1010101111001101");
    assert_eq!(&s[76..], "1".repeat(64));
}

#[test]
fn test_capacity_doubles() {
    let mut buffer = BitBuffer::with_capacity(64);
    assert_eq!(buffer.capacity(), 64);

    buffer.append(1, 64);
    assert_eq!(buffer.capacity(), 64);

    buffer.append(1, 1);
    assert_eq!(buffer.capacity(), 128);

    buffer.append(0, 64);
    assert_eq!(buffer.capacity(), 256);
}

#[test]
fn test_to_bytes_layout() {
    let mut buffer = BitBuffer::new();
    buffer.append(0b0001, 4);
    assert_eq!(buffer.to_bytes(), vec![4, 0b0001_0000]);

    buffer.append(0b1010, 4);
    assert_eq!(buffer.to_bytes(), vec![8, 0b0001_1010]);

    buffer.append(0b1, 1);
    assert_eq!(buffer.to_bytes(), vec![1, 0b0001_1010, 0b1000_0000]);
}

#[test]
fn test_from_bytes_with_offset() {
    let bytes = [0xAA, 0xBB, 3, 0b1111_1111, 0b0101_1111];
    let buffer = BitBuffer::from_bytes(&bytes, 2).unwrap();

    // the unused low bits of the last byte are dropped
    assert_eq!(buffer.to_string(), "11111111010");
    assert_eq!(buffer.to_bytes(), vec![3, 0b1111_1111, 0b0100_0000]);
}

#[test]
fn test_from_bytes_errors() {
    assert!(matches!(BitBuffer::from_bytes(&[], 0), Err(Error::TruncatedPayload)));
    assert!(matches!(BitBuffer::from_bytes(&[8], 1), Err(Error::TruncatedPayload)));
    assert!(matches!(BitBuffer::from_bytes(&[5], 0), Err(Error::TruncatedPayload)));
    assert!(matches!(BitBuffer::from_bytes(&[0, 1], 0), Err(Error::InvalidTrailer(0))));
    assert!(matches!(BitBuffer::from_bytes(&[12, 1], 0), Err(Error::InvalidTrailer(12))));

    assert!(BitBuffer::from_bytes(&[8], 0).unwrap().is_empty());
}

#[test]
fn test_random_appends_survive_bytes() {
    let mut rng = rand::thread_rng();

    for _ in 0..50 {
        let mut buffer = BitBuffer::new();
        let mut expected = String::new();

        for _ in 0..rng.gen_range(1..200) {
            let len = rng.gen_range(1..=64);
            let value: u64 = rng.gen();
            buffer.append(value, len);
            let low = if len == 64 { value } else { value & ((1 << len) - 1) };
            expected.push_str(&format!("{:0width$b}", low, width = len));
        }

        assert_eq!(buffer.to_string(), expected);

        let restored = BitBuffer::from_bytes(&buffer.to_bytes(), 0).unwrap();
        assert_eq!(restored.len(), buffer.len());
        assert_eq!(restored.to_string(), expected);
        assert_eq!(restored.to_bytes(), buffer.to_bytes());
    }
}

#[test]
fn test_decode_with_table() {
    // a = 0, b = 10, c = 11
    let table = CodeTable::from_lengths(vec![('a', 1), ('b', 2), ('c', 2)]).unwrap();

    let mut buffer = BitBuffer::new();
    for symbol in "abcacba".chars() {
        let code = table.code_for(symbol).unwrap();
        buffer.append(code.value, code.length as usize);
    }
    assert_eq!(buffer.to_string(), "01011011100");

    assert_eq!(buffer.decode(&table).unwrap(), "abcacba");
    assert_eq!(BitBuffer::new().decode(&table).unwrap(), "");
}

#[test]
fn test_equality_ignores_capacity() {
    let mut small = BitBuffer::new();
    let mut large = BitBuffer::with_capacity(1024);
    small.append(0b1011, 4);
    large.append(0b1011, 4);

    assert_eq!(small, large);
    assert_eq!(BitBuffer::from_bytes(&small.to_bytes(), 0).unwrap(), large);

    large.append(0, 1);
    assert_ne!(small, large);
}

#[test]
fn test_from_bytes_capacity_covers_length() {
    for payload_len in 0..20usize {
        let mut bytes = vec![8u8];
        bytes.extend(std::iter::repeat(0xA5).take(payload_len));

        let buffer = BitBuffer::from_bytes(&bytes, 0).unwrap();
        assert_eq!(buffer.len(), payload_len * 8);
        assert!(buffer.capacity() >= buffer.len());
        assert_eq!(buffer.to_bytes(), bytes);
        assert_eq!(buffer.to_string().len(), buffer.len());
        assert_eq!(buffer, buffer.clone());
    }
}
