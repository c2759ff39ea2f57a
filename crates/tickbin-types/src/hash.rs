//! Contract key hashing.

use crate::ContractKey;
use serde::{Deserialize, Serialize};

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Seeded, non-cryptographic 32-bit hash over a [`ContractKey`].
///
/// The three key words are XOR-folded into one block, which goes through a
/// single multiply/rotate mixing pass, is combined with the seed, and then
/// finished with two avalanche rounds. Equal keys always hash equally under
/// the same seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyHasher {
    seed: u32,
}

impl KeyHasher {
    /// Seed used when none is configured.
    pub const DEFAULT_SEED: u32 = 0x9747_b28c;

    /// Creates a hasher with the given seed.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Returns the configured seed.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Hashes a key.
    #[must_use]
    #[inline]
    pub const fn hash(&self, key: &ContractKey) -> u32 {
        let [w0, w1, w2] = key.words();
        let mut k = w0 ^ w1 ^ w2;
        k = k.wrapping_mul(C1);
        k = k.rotate_left(15);
        k = k.wrapping_mul(C2);

        let mut h = self.seed ^ k;
        h = h.rotate_left(13);
        h = h.wrapping_mul(5).wrapping_add(0xe654_6b64);
        h ^= ContractKey::SIZE as u32;

        avalanche(h)
    }
}

impl Default for KeyHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

#[inline]
const fn avalanche(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
