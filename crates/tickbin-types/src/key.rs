//! Fixed-width contract identifiers.

use derive_more::{From, Into};
use serde::{Deserialize, Serialize};

/// Identifier of a tradable contract: three opaque 32-bit words.
///
/// Keys compare bitwise. The all-zero value is [`ContractKey::NULL`], which
/// marks an unclaimed bucket and is never a live contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, From, Into,
)]
pub struct ContractKey([u32; 3]);

impl ContractKey {
    /// The reserved "no contract" key.
    pub const NULL: Self = Self([0; 3]);

    /// Width of a key in bytes.
    pub const SIZE: usize = 12;

    /// Creates a key from its three words.
    #[must_use]
    pub const fn new(w0: u32, w1: u32, w2: u32) -> Self {
        Self([w0, w1, w2])
    }

    /// Creates a key from a word array.
    #[must_use]
    pub const fn from_words(words: [u32; 3]) -> Self {
        Self(words)
    }

    /// Packs a ticker symbol of up to 12 bytes into a key.
    ///
    /// Bytes fill the words little-endian and the tail is zero padded.
    /// Returns `None` for an empty symbol or one longer than 12 bytes.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let bytes = symbol.as_bytes();
        if bytes.is_empty() || bytes.len() > Self::SIZE {
            return None;
        }
        let mut buf = [0u8; Self::SIZE];
        buf[..bytes.len()].copy_from_slice(bytes);
        Some(Self::from_bytes(buf))
    }

    /// Creates a key from its little-endian byte form.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self([
            u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        ])
    }

    /// Returns the little-endian byte form of the key.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; Self::SIZE];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.0) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Returns the three words of the key.
    #[must_use]
    pub const fn words(&self) -> [u32; 3] {
        self.0
    }

    /// Returns true for the reserved null key.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0
    }

    /// Returns the packed symbol if the key holds printable ASCII.
    fn symbol(&self) -> Option<String> {
        let bytes = self.to_bytes();
        let len = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        let body = &bytes[..len];
        if body.is_empty() || !body.iter().all(|b| b.is_ascii_graphic()) {
            return None;
        }
        String::from_utf8(body.to_vec()).ok()
    }
}

impl std::fmt::Display for ContractKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.symbol() {
            Some(symbol) => f.write_str(&symbol),
            None => write!(f, "{:08x}:{:08x}:{:08x}", self.0[0], self.0[1], self.0[2]),
        }
    }
}
