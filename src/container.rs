//! Container layout: `[JSON header][0x00][payload]`.
//!
//! The header is compact JSON produced by `serde_json`, which escapes every
//! control character inside strings, so a raw NUL byte can only ever be the
//! delimiter.

use crate::codes::CodeTable;
use crate::error::{HuffError, Result};
use serde::{Deserialize, Serialize};

pub const DELIMITER: u8 = 0x00;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
	pub padding: u8,
	pub codes: CodeTable,
	#[serde(rename = "originalFileName")]
	pub original_file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
	pub header: Header,
	pub payload: Vec<u8>,
}

impl Container {
	pub fn new(padding: u8, codes: CodeTable, original_file_name: impl Into<String>, payload: Vec<u8>) -> Self {
		Self {
			header: Header { padding, codes, original_file_name: original_file_name.into() },
			payload,
		}
	}

	pub fn padding(&self) -> u8 { self.header.padding }

	pub fn codes(&self) -> &CodeTable { &self.header.codes }

	pub fn original_file_name(&self) -> &str { &self.header.original_file_name }

	pub fn to_bytes(&self) -> Vec<u8> {
		// Serializing plain structs with string keys into a Vec cannot fail.
		let header = serde_json::to_vec(&self.header).unwrap_or_else(|e| {
			debug_assert!(false, "header serialization failed: {}", e);
			log::error!("header serialization failed: {}", e);
			Vec::new()
		});
		debug_assert!(!header.contains(&DELIMITER));

		let mut bytes = Vec::with_capacity(header.len() + 1 + self.payload.len());
		bytes.extend_from_slice(&header);
		bytes.push(DELIMITER);
		bytes.extend_from_slice(&self.payload);
		bytes
	}

	/// Splits at the first NUL byte and parses the header in front of it.
	///
	/// The header's fields are parsed but not validated here; padding range
	/// and code table checks happen when the payload is decoded.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let split = bytes
			.iter()
			.position(|&b| b == DELIMITER)
			.ok_or_else(|| HuffError::format("missing delimiter"))?;

		let header: Header = serde_json::from_slice(&bytes[..split])
			.map_err(|e| HuffError::format(format!("malformed header: {}", e)))?;
		log::trace!("parsed header of {} bytes, payload {} bytes", split, bytes.len() - split - 1);

		Ok(Self { header, payload: bytes[split + 1..].to_vec() })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Container {
		let codes = [(5u8, "0".to_string()), (7u8, "1".to_string())].into_iter().collect();
		Container::new(3, codes, "notes.txt", vec![0b0101_0000])
	}

	#[test]
	fn test_header_layout() {
		let bytes = sample().to_bytes();
		let expected_header = br#"{"padding":3,"codes":{"5":"0","7":"1"},"originalFileName":"notes.txt"}"#;
		assert_eq!(&bytes[..expected_header.len()], &expected_header[..]);
		assert_eq!(bytes[expected_header.len()], DELIMITER);
		assert_eq!(&bytes[expected_header.len() + 1..], &[0b0101_0000]);
	}

	#[test]
	fn test_parse_written_container() {
		let container = sample();
		assert_eq!(Container::parse(&container.to_bytes()).unwrap(), container);
	}

	#[test]
	fn test_payload_may_contain_nul() {
		let codes = [(1u8, "0".to_string()), (2u8, "1".to_string())].into_iter().collect();
		let container = Container::new(0, codes, "zeros", vec![0, 0, 0xFF, 0]);
		let parsed = Container::parse(&container.to_bytes()).unwrap();
		assert_eq!(parsed.payload, vec![0, 0, 0xFF, 0]);
	}

	#[test]
	fn test_nul_in_file_name_is_escaped() {
		let container = Container::new(0, CodeTable::new(), "a\0b\u{1}c", Vec::new());
		let bytes = container.to_bytes();
		assert_eq!(bytes.iter().filter(|&&b| b == DELIMITER).count(), 1);
		assert_eq!(*bytes.last().unwrap(), DELIMITER);
		assert_eq!(Container::parse(&bytes).unwrap().original_file_name(), "a\0b\u{1}c");
	}

	#[test]
	fn test_missing_delimiter() {
		let err = Container::parse(br#"{"padding":0,"codes":{},"originalFileName":"x"}"#).unwrap_err();
		assert!(matches!(err, HuffError::Format(ref msg) if msg == "missing delimiter"));
	}

	#[test]
	fn test_malformed_header() {
		let err = Container::parse(b"not json\0payload").unwrap_err();
		assert!(matches!(err, HuffError::Format(ref msg) if msg.starts_with("malformed header")));
	}

	#[test]
	fn test_missing_field() {
		let err = Container::parse(b"{\"padding\":0,\"codes\":{}}\0").unwrap_err();
		assert!(matches!(err, HuffError::Format(ref msg) if msg.starts_with("malformed header")));
	}

	#[test]
	fn test_repeated_code_entry() {
		let bytes = b"{\"padding\":0,\"codes\":{\"5\":\"0\",\"5\":\"1\"},\"originalFileName\":\"x\"}\0\x00";
		let err = Container::parse(bytes).unwrap_err();
		assert!(matches!(err, HuffError::Format(ref msg) if msg.contains("duplicate code for byte 5")));
	}

	#[test]
	fn test_unknown_fields_ignored() {
		let bytes = b"{\"padding\":0,\"codes\":{},\"originalFileName\":\"x\",\"extra\":1}\0";
		assert_eq!(Container::parse(bytes).unwrap().original_file_name(), "x");
	}

	#[test]
	fn test_invalid_utf8_header() {
		let err = Container::parse(b"\xFF\xFE\0").unwrap_err();
		assert!(err.is_format());
	}
}
