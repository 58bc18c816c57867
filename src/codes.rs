//! Code assignment and code table validation.

use crate::error::{HuffError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{CodeTree, CodeTreeNode};
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Byte value to prefix code, each code a string of `'0'` and `'1'`.
///
/// Serializes as a JSON object keyed by the decimal byte value. A byte that
/// appears twice when deserializing is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CodeTable {
    codes: BTreeMap<u8, String>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns codes by walking `tree`: `'0'` for left, `'1'` for right.
    ///
    /// A tree that is a single leaf gets the one-bit code `"0"`.
    pub fn from_tree(tree: &CodeTree) -> Self {
        let mut codes = BTreeMap::new();
        match &tree.root {
            CodeTreeNode::Leaf { byte, .. } => {
                codes.insert(*byte, "0".to_string());
            }
            internal => assign(internal, &mut String::new(), &mut codes),
        }
        Self { codes }
    }

    pub fn get(&self, byte: u8) -> Option<&str> {
        self.codes.get(&byte).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.codes.iter().map(|(&byte, code)| (byte, code.as_str()))
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    /// Number of payload bits needed to encode data with these frequencies.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .map(|(byte, count)| count * self.get(byte).map_or(0, str::len) as u64)
            .sum()
    }

    /// Checks that every code is a non-empty binary string and that no code
    /// is a prefix of (or equal to) another.
    pub fn validate(&self) -> Result<()> {
        for (byte, code) in &self.codes {
            if code.is_empty() {
                return Err(HuffError::format(format!("empty code for byte {}", byte)));
            }
            if !code.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(HuffError::format(format!(
                    "code for byte {} is not a bit string: {:?}",
                    byte, code
                )));
            }
        }

        // In lexicographic order a prefix sorts directly before some string
        // it prefixes, so checking neighbours is enough.
        let mut sorted: Vec<&str> = self.codes.values().map(String::as_str).collect();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            if pair[1].starts_with(pair[0]) {
                return Err(HuffError::format(format!(
                    "code table is not prefix-free: {:?} prefixes {:?}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(())
    }

    /// Code string to byte value, for decoding.
    pub fn inverse(&self) -> HashMap<&str, u8> {
        self.codes
            .iter()
            .map(|(&byte, code)| (code.as_str(), byte))
            .collect()
    }
}

impl FromIterator<(u8, String)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u8, String)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for CodeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CodeTableVisitor)
    }
}

struct CodeTableVisitor;

impl<'de> Visitor<'de> for CodeTableVisitor {
    type Value = CodeTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from byte value to code string")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<CodeTable, A::Error> {
        let mut codes = BTreeMap::new();
        while let Some((byte, code)) = map.next_entry::<u8, String>()? {
            if codes.insert(byte, code).is_some() {
                return Err(de::Error::custom(format!("duplicate code for byte {}", byte)));
            }
        }
        Ok(CodeTable { codes })
    }
}

fn assign(node: &CodeTreeNode, prefix: &mut String, codes: &mut BTreeMap<u8, String>) {
    match node {
        CodeTreeNode::Leaf { byte, .. } => {
            codes.insert(*byte, prefix.clone());
        }
        CodeTreeNode::Internal { left, right, .. } => {
            prefix.push('0');
            assign(left, prefix, codes);
            prefix.pop();

            prefix.push('1');
            assign(right, prefix, codes);
            prefix.pop();
        }
    }
}
