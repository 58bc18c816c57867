//! In-memory compress/decompress entry points.

use crate::bits::{BitReader, BitWriter};
use crate::codes::CodeTable;
use crate::container::Container;
use crate::error::{HuffError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::CodeTree;
use serde::Serialize;

/// Bytes and file name recovered from a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    pub data: Vec<u8>,
    pub original_file_name: String,
}

/// Header summary of a container, gathered without decoding the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerInfo {
    pub original_file_name: String,
    pub distinct_symbols: usize,
    pub padding: u8,
    pub payload_bytes: usize,
    pub encoded_bits: usize,
    pub longest_code: usize,
}

/// Builds the Huffman container for `data`.
pub fn compress(data: &[u8], original_file_name: &str) -> Vec<u8> {
    encode(data, original_file_name).to_bytes()
}

/// Encodes `data` into a container value without serializing it.
pub fn encode(data: &[u8], original_file_name: &str) -> Container {
    let frequencies = FrequencyTable::from_bytes(data);
    let Some(tree) = CodeTree::build(&frequencies) else {
        log::debug!("empty input for {:?}, writing empty container", original_file_name);
        return Container::new(0, CodeTable::new(), original_file_name, Vec::new());
    };

    let codes = CodeTable::from_tree(&tree);
    let mut writer = BitWriter::with_capacity(codes.encoded_bits(&frequencies) as usize);
    for &byte in data {
        if let Some(code) = codes.get(byte) {
            writer.push_code(code);
        }
    }
    let packed = writer.finish();

    log::debug!(
        "encoded {:?}: {} bytes, {} symbols, {} bits, padding {}",
        original_file_name,
        data.len(),
        codes.len(),
        packed.bit_len(),
        packed.padding
    );
    Container::new(packed.padding, codes, original_file_name, packed.bytes)
}

/// Recovers the original bytes and file name from a container.
///
/// Truncation is only caught when it breaks the payload's structure: padding
/// that exceeds the remaining bits, non-zero filler bits, or a dangling partial
/// code. The header stores no payload length, so a container cut at a code
/// boundary can decode cleanly into a shorter output. For example, a
/// single-symbol input whose payload is all zero bytes still decodes after
/// losing whole bytes. Callers that need to detect truncation must record the
/// original length themselves.
pub fn decompress(container: &[u8]) -> Result<Decompressed> {
    let container = Container::parse(container)?;
    let data = decode(&container)?;
    Ok(Decompressed {
        data,
        original_file_name: container.header.original_file_name,
    })
}

/// Decodes the payload of an already parsed container.
pub fn decode(container: &Container) -> Result<Vec<u8>> {
    let codes = container.codes();
    codes.validate()?;
    let bits = BitReader::new(&container.payload, container.padding())?;

    let inverse = codes.inverse();
    let max_len = codes.max_len();
    let mut decoded = Vec::with_capacity(container.payload.len() * 2);
    let mut candidate = String::with_capacity(max_len);

    for (position, bit) in bits.enumerate() {
        candidate.push(if bit { '1' } else { '0' });
        if let Some(&byte) = inverse.get(candidate.as_str()) {
            decoded.push(byte);
            candidate.clear();
        } else if candidate.len() >= max_len {
            // No code this long matched, so none ever will.
            return Err(HuffError::decode(format!(
                "invalid code sequence ending at bit {}",
                position
            )));
        }
    }

    if !candidate.is_empty() {
        return Err(HuffError::decode("incomplete code sequence"));
    }
    log::trace!("decoded {} bytes", decoded.len());
    Ok(decoded)
}

/// Parses a container and checks its header against the payload.
pub fn inspect(container: &[u8]) -> Result<ContainerInfo> {
    let container = Container::parse(container)?;
    container.codes().validate()?;
    let bits = BitReader::new(&container.payload, container.padding())?;

    Ok(ContainerInfo {
        distinct_symbols: container.codes().len(),
        padding: container.padding(),
        payload_bytes: container.payload.len(),
        encoded_bits: bits.len(),
        longest_code: container.codes().max_len(),
        original_file_name: container.header.original_file_name,
    })
}

/// Fully decodes a container and discards the result.
pub fn validate(container: &[u8]) -> Result<()> {
    decompress(container).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_text() {
        let original = b"Hello, world! This is a test of the Huffman codec.";
        let compressed = compress(original, "hello.txt");
        let restored = decompress(&compressed).unwrap();
        assert_eq!(restored.data, original.to_vec());
        assert_eq!(restored.original_file_name, "hello.txt");
    }

    #[test]
    fn test_empty_input() {
        let container = encode(&[], "empty.bin");
        assert_eq!(container.padding(), 0);
        assert!(container.codes().is_empty());
        assert!(container.payload.is_empty());

        let restored = decompress(&container.to_bytes()).unwrap();
        assert!(restored.data.is_empty());
        assert_eq!(restored.original_file_name, "empty.bin");
    }

    #[test]
    fn test_single_repeated_byte() {
        let container = encode(&[5, 5, 5, 5, 5], "a");
        assert_eq!(container.codes().iter().collect::<Vec<_>>(), vec![(5, "0")]);
        assert_eq!(container.padding(), 3);
        assert_eq!(container.payload, vec![0]);

        let restored = decompress(&container.to_bytes()).unwrap();
        assert_eq!(restored.data, vec![5, 5, 5, 5, 5]);
    }

    #[test]
    fn test_two_symbols() {
        let container = encode(b"abbb", "ab");
        // a is less frequent and is extracted first, taking the 0 branch.
        assert_eq!(container.codes().get(b'a'), Some("0"));
        assert_eq!(container.codes().get(b'b'), Some("1"));
        assert_eq!(container.payload, vec![0b0111_0000]);
        assert_eq!(container.padding(), 4);
    }

    #[test]
    fn test_padding_matches_encoded_bits() {
        for len in 1..40usize {
            let data: Vec<u8> = (0..len).map(|i| (i * i % 7) as u8).collect();
            let container = encode(&data, "p");
            let frequencies = FrequencyTable::from_bytes(&data);
            let bits = container.codes().encoded_bits(&frequencies) as usize;
            assert!(container.padding() <= 7);
            assert_eq!((bits + container.padding() as usize) % 8, 0);
            assert_eq!(container.payload.len() * 8, bits + container.padding() as usize);
        }
    }

    #[test]
    fn test_incomplete_code_sequence() {
        // Bits 0, 0, 1: two complete codes followed by the first half of "10" or "11".
        let codes = [(1u8, "0".to_string()), (2u8, "10".to_string()), (3u8, "11".to_string())]
            .into_iter()
            .collect();
        let container = Container::new(5, codes, "x", vec![0b0010_0000]);
        let err = decode(&container).unwrap_err();
        assert!(matches!(err, HuffError::Decode(ref msg) if msg == "incomplete code sequence"));
    }

    #[test]
    fn test_unmatched_code_sequence() {
        // The table is prefix-free but incomplete: "1" can never start a code.
        let codes = [(1u8, "00".to_string()), (2u8, "01".to_string())].into_iter().collect();
        let container = Container::new(0, codes, "x", vec![0b1000_0000]);
        assert!(decode(&container).unwrap_err().is_decode());
    }

    #[test]
    fn test_rejects_invalid_table() {
        let codes = [(1u8, "0".to_string()), (2u8, "01".to_string())].into_iter().collect();
        let container = Container::new(0, codes, "x", vec![0]);
        assert!(decompress(&container.to_bytes()).unwrap_err().is_format());
    }

    #[test]
    fn test_rejects_padding_out_of_range() {
        let mut container = encode(b"abcabc", "x");
        container.header.padding = 9;
        assert!(decompress(&container.to_bytes()).unwrap_err().is_format());
    }

    #[test]
    fn test_inspect() {
        let compressed = compress(b"aabc", "info.txt");
        let info = inspect(&compressed).unwrap();
        assert_eq!(info.original_file_name, "info.txt");
        assert_eq!(info.distinct_symbols, 3);
        assert_eq!(info.encoded_bits, 6);
        assert_eq!(info.padding, 2);
        assert_eq!(info.payload_bytes, 1);
        assert_eq!(info.longest_code, 2);
    }

    #[test]
    fn test_validate() {
        let compressed = compress(b"validate me please", "v");
        assert!(validate(&compressed).is_ok());
    }

    #[test]
    fn test_truncated_payload_is_rejected() {
        // "aabcaabc" packs to 001011 001011 + 4 filler bits = [0x2C, 0xB0].
        let compressed = compress(b"aabcaabc", "t");
        assert_eq!(&compressed[compressed.len() - 2..], &[0x2C, 0xB0]);

        // Without the last byte, the low 4 bits of 0x2C would be filler but are not zero.
        let err = decompress(&compressed[..compressed.len() - 1]).unwrap_err();
        assert!(err.is_format() || err.is_decode());

        // A one-byte payload loses every bit while padding stays 2.
        let compressed = compress(b"aabc", "t");
        let err = decompress(&compressed[..compressed.len() - 1]).unwrap_err();
        assert!(err.is_format());
    }
}
