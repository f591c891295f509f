use argon2::{Algorithm, Argon2, Params, Version};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

pub const SALT_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Config {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Argon2Config {
    /// The only parameter set used for derivation. Changing any field changes
    /// every derived password.
    pub const STANDARD: Self = Self {
        memory_kib: 64 * 1024,
        iterations: 4,
        parallelism: 2,
    };

    pub fn memory_mib(&self) -> u32 {
        self.memory_kib / 1024
    }
}

/// Lowercases and trims a domain so that visually identical input always
/// selects the same salt.
pub fn canonicalize_domain(domain: &str) -> String {
    domain.to_lowercase().trim().to_owned()
}

/// SHA-256 of the canonical domain.
pub fn domain_salt(domain: &str) -> Zeroizing<[u8; SALT_LEN]> {
    let canonical = Zeroizing::new(canonicalize_domain(domain));
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Zeroizing::new(hasher.finalize().into())
}

/// Runs Argon2id over `master` and `salt`, producing `output_len` bytes.
pub fn derive_pool(
    master: &[u8],
    salt: &[u8; SALT_LEN],
    output_len: usize,
    config: Argon2Config,
) -> Result<Zeroizing<Vec<u8>>> {
    let params = Params::new(
        config.memory_kib,
        config.iterations,
        config.parallelism,
        Some(output_len),
    )
    .map_err(|e| Error::Kdf(format!("invalid parameters: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut pool = Zeroizing::new(vec![0u8; output_len]);
    argon2
        .hash_password_into(master, salt, &mut pool)
        .map_err(|e| {
            tracing::error!(error = %e, "argon2 derivation failed");
            Error::Kdf(e.to_string())
        })?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_canonicalize_domain() {
        let cases = vec![
            ("example.com", "example.com"),
            ("Example.COM", "example.com"),
            ("  example.com  ", "example.com"),
            ("\tExample.com\n", "example.com"),
            ("sub.Example.com ", "sub.example.com"),
            ("ÉCOLE.fr", "école.fr"),
            ("", ""),
            ("   ", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(canonicalize_domain(input), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_canonicalize_idempotent() {
        let once = canonicalize_domain("  MiXeD.Example.ORG ");
        assert_eq!(canonicalize_domain(&once), once);
    }

    #[test]
    fn test_domain_salt_known_value() {
        let salt = domain_salt("example.com");
        assert_eq!(
            hex(salt.as_ref()),
            "a379a6f6eeafb9a55e378c118034e2751e682fab9f2d30ab13d2125586ce1947"
        );
    }

    #[test]
    fn test_domain_salt_canonical() {
        let expected = domain_salt("example.com");
        for variant in ["Example.com", " example.com ", "EXAMPLE.COM\n"] {
            assert_eq!(domain_salt(variant).as_ref(), expected.as_ref());
        }
        assert_ne!(domain_salt("example.org").as_ref(), expected.as_ref());
    }

    #[test]
    fn test_pool_regression() {
        let salt = domain_salt("example.com");
        let pool = derive_pool(
            b"correct horse battery staple",
            &salt,
            32,
            Argon2Config::STANDARD,
        )
        .unwrap();

        assert_eq!(
            hex(&pool),
            "c4ee386b0fd4182318948b911230110da058cd18f1c387149f4ca9fad71cc3e8"
        );
    }

    #[test]
    fn test_pool_length_follows_request() {
        let salt = domain_salt("example.com");
        let short = derive_pool(b"master", &salt, 32, Argon2Config::STANDARD).unwrap();
        let long = derive_pool(b"master", &salt, 256, Argon2Config::STANDARD).unwrap();

        assert_eq!(short.len(), 32);
        assert_eq!(long.len(), 256);
        // Argon2 encodes the tag length in its initial hash, so a longer
        // pool is not an extension of a shorter one.
        assert_ne!(&short[..], &long[..32]);
    }

    #[test]
    fn test_different_salts_different_pools() {
        let a = derive_pool(
            b"master",
            &domain_salt("a.example"),
            32,
            Argon2Config::STANDARD,
        )
        .unwrap();
        let b = derive_pool(
            b"master",
            &domain_salt("b.example"),
            32,
            Argon2Config::STANDARD,
        )
        .unwrap();

        assert_ne!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn test_master_is_not_normalized() {
        let salt = domain_salt("example.com");
        let nfc = derive_pool("café".as_bytes(), &salt, 32, Argon2Config::STANDARD).unwrap();
        let nfd = derive_pool(
            "cafe\u{0301}".as_bytes(),
            &salt,
            32,
            Argon2Config::STANDARD,
        )
        .unwrap();
        let padded = derive_pool(" café ".as_bytes(), &salt, 32, Argon2Config::STANDARD).unwrap();

        assert_ne!(nfc.as_slice(), nfd.as_slice());
        assert_ne!(nfc.as_slice(), padded.as_slice());
    }

    #[test]
    fn test_invalid_params_are_computation_errors() {
        let salt = domain_salt("example.com");
        let config = Argon2Config {
            memory_kib: 1,
            ..Argon2Config::STANDARD
        };

        let err = derive_pool(b"master", &salt, 32, config).unwrap_err();
        assert!(matches!(err, Error::Kdf(_)));
        assert_eq!(err.kind(), crate::ErrorKind::Computation);
    }

    #[test]
    fn test_memory_mib() {
        assert_eq!(Argon2Config::STANDARD.memory_mib(), 64);
    }
}
