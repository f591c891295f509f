//! Stateless per-site passwords.
//!
//! Three independent operations:
//!
//! - [`derive_password`]: master secret + domain -> the same password every
//!   time, via Argon2id (t=4, m=64 MiB, p=2) salted with `SHA-256(domain)`.
//! - [`generate_random`]: a fresh password guaranteed to contain uppercase,
//!   lowercase, digit and special characters.
//! - [`estimate_strength`]: entropy-based strength label and score.
//!
//! Nothing is stored and no operation keeps state between calls.

pub mod charset;
pub mod entropy;
pub mod error;
pub mod generator;
pub mod kdf;
pub mod limit;
pub mod strength;

/// Shortest password either generator produces.
pub const MIN_LENGTH: usize = 16;
/// Longest password either generator produces.
pub const MAX_LENGTH: usize = 128;

pub use charset::{CharClass, character_table, restricted_table};
pub use entropy::{EntropySource, OsEntropy};
pub use error::{Error, ErrorKind, Result};
pub use generator::{derive_password, generate_random, generate_random_with};
pub use kdf::{Argon2Config, canonicalize_domain, domain_salt, derive_pool};
pub use limit::DerivationLimiter;
pub use strength::{StrengthAssessment, StrengthLabel, estimate_strength};
