//! Random byte sources for the random password generator.
//!
//! The generator never reaches for ambient randomness. It is handed an
//! [`EntropySource`], which in production is [`OsEntropy`] and in tests is
//! any scripted implementation.

use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// A source of random bytes.
///
/// # Security
///
/// Production implementations must be backed by a cryptographically secure
/// generator and must fail rather than fall back to a weaker one.
pub trait EntropySource {
    /// Fills `dest` with random bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;

    /// Returns an index in `0..bound`.
    ///
    /// Reads a little-endian `u32` and reduces it modulo `bound`. The bias is
    /// below `bound / 2^32`, which for table-sized bounds is negligible.
    fn next_index(&mut self, bound: usize) -> Result<usize> {
        debug_assert!(bound > 0 && bound <= u32::MAX as usize);

        let mut bytes = Zeroizing::new([0u8; 4]);
        self.fill_bytes(&mut bytes[..])?;
        Ok(u32::from_le_bytes(*bytes) as usize % bound)
    }
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }
}

/// ChaCha20 keystream keyed once from the operating system CSPRNG.
///
/// Create one per generated password; instances are not meant to be shared.
pub struct OsEntropy {
    cipher: ChaCha20,
}

impl OsEntropy {
    pub fn new() -> Result<Self> {
        let mut seed = Zeroizing::new([0u8; 32]);
        getrandom::fill(&mut seed[..]).map_err(|e| {
            tracing::error!(error = %e, "operating system random source failed");
            Error::Entropy(e.to_string())
        })?;

        let key: &[u8; 32] = &seed;
        let cipher = ChaCha20::new(key.into(), &[0u8; 12].into());

        Ok(Self { cipher })
    }
}

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        dest.fill(0);
        self.cipher.apply_keystream(dest);
        Ok(())
    }
}
