//! Bit string representation of encoded text

use crate::error::{BitflipperError, Result};
use std::fmt;
use std::str::FromStr;

/// Text encoded as a big-endian bit string, one full byte per encoded character
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitString {
    bytes: Vec<u8>,
}

impl BitString {
    /// Encode text, most significant bit first in each byte
    pub fn from_text(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
        }
    }

    /// Number of bits, always a multiple of 8
    pub fn len(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Copy of this bit string with bit `index` inverted
    pub fn flipped(&self, index: usize) -> Option<Self> {
        let mut bytes = self.bytes.clone();
        *bytes.get_mut(index / 8)? ^= mask(index);
        Some(Self { bytes })
    }

    /// All single-bit mutations, in bit order
    pub fn single_flips(&self) -> impl Iterator<Item = BitString> + '_ {
        (0..self.len()).filter_map(move |i| self.flipped(i))
    }

    /// Decode back to text.
    ///
    /// The bits are read as one big-endian number, so leading zero bytes
    /// disappear before decoding. Returns `None` when the remaining bytes
    /// are not valid UTF-8.
    pub fn to_text(&self) -> Option<String> {
        let start = self
            .bytes
            .iter()
            .position(|&b| b != 0)
            .unwrap_or(self.bytes.len());
        String::from_utf8(self.bytes[start..].to_vec()).ok()
    }
}

fn mask(index: usize) -> u8 {
    0x80 >> (index % 8)
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{:08b}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = BitflipperError;

    /// Parse a string of '0'/'1' characters; shorter input is zero-padded on the left
    fn from_str(s: &str) -> Result<Self> {
        if let Some(bad) = s.chars().find(|c| *c != '0' && *c != '1') {
            return Err(BitflipperError::parse(
                format!("unexpected character '{}' in bit string", bad),
                Some(s.to_string()),
            ));
        }

        let padding = (8 - s.len() % 8) % 8;
        let padded: String = "0".repeat(padding) + s;
        let bytes = padded
            .as_bytes()
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .fold(0u8, |acc, bit| (acc << 1) | (bit - b'0'))
            })
            .collect();

        Ok(Self { bytes })
    }
}
