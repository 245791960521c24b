//! Stable record identifiers.

use crate::error::{Error, Result};
use std::fmt;
use std::hash::Hasher;
use twox_hash::XxHash64;

/// A 12-byte record identifier, rendered as 24 lowercase hex characters.
///
/// Ids either come with the source document or are derived
/// deterministically from it at ingest, so re-indexing the same corpus
/// assigns the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId([u8; 12]);

impl RecordId {
    /// Parse a 24-character hex string. Casing is accepted on input;
    /// rendering is always lowercase.
    pub fn parse(input: &str) -> Result<Self> {
        let s = input.trim();
        if s.len() != 24 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidRequest(format!(
                "malformed record id: {input:?}"
            )));
        }
        let mut bytes = [0u8; 12];
        for (i, pair) in s.as_bytes().chunks(2).enumerate() {
            bytes[i] = (hex_val(pair[0]) << 4) | hex_val(pair[1]);
        }
        Ok(Self(bytes))
    }

    /// Derive a deterministic id from an arbitrary seed string.
    pub fn derive(seed: &str) -> Self {
        let mut bytes = [0u8; 12];
        let mut head = XxHash64::with_seed(0);
        head.write(seed.as_bytes());
        bytes[..8].copy_from_slice(&head.finish().to_be_bytes());
        let mut tail = XxHash64::with_seed(1);
        tail.write(seed.as_bytes());
        bytes[8..].copy_from_slice(&tail.finish().to_be_bytes()[..4]);
        Self(bytes)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

// Caller has already checked the digit is ASCII hex.
fn hex_val(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
