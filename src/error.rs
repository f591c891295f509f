//! Error types shared by every operation in the crate.

use thiserror::Error;

use crate::{MAX_LENGTH, MIN_LENGTH};

/// Errors from password derivation and generation.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested length is outside `MIN_LENGTH..=MAX_LENGTH`.
    #[error(
        "password length must be between {min} and {max} characters, got {length}",
        min = MIN_LENGTH,
        max = MAX_LENGTH
    )]
    InvalidLength {
        /// The rejected length.
        length: usize,
    },

    /// Argon2 rejected its parameters or failed to run.
    #[error("Argon2 derivation failed: {0}")]
    Kdf(String),

    /// The operating system random source is unavailable.
    #[error("secure random source failed: {0}")]
    Entropy(String),
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied bad input and may retry with different input.
    Validation,
    /// A cryptographic primitive failed. Fatal for the call.
    Computation,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLength { .. } => ErrorKind::Validation,
            Self::Kdf(_) | Self::Entropy(_) => ErrorKind::Computation,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejects lengths outside the supported range. Never clamps.
pub(crate) fn check_length(length: usize) -> Result<()> {
    if (MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(Error::InvalidLength { length })
    }
}
