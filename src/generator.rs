use std::time::Instant;

use zeroize::Zeroizing;

use crate::charset::{character_table, restricted_classes, restricted_table};
use crate::entropy::{EntropySource, OsEntropy};
use crate::error::{Result, check_length};
use crate::kdf::{Argon2Config, derive_pool, domain_salt};

/// Derives the password for `domain` from `master`.
///
/// The domain is lowercased and trimmed first; the master is used exactly as
/// given. Argon2id produces `2 * length` bytes and the first `length` of them
/// are mapped through the 117-entry character table.
pub fn derive_password(master: &str, domain: &str, length: usize) -> Result<Zeroizing<String>> {
    check_length(length)?;

    let config = Argon2Config::STANDARD;
    let salt = domain_salt(domain);

    let start = Instant::now();
    let pool = derive_pool(master.as_bytes(), &salt, length * 2, config)?;

    tracing::debug!(
        length,
        memory_mib = config.memory_mib(),
        iterations = config.iterations,
        parallelism = config.parallelism,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "derived password"
    );

    Ok(map_to_table(&pool[..length]))
}

fn map_to_table(bytes: &[u8]) -> Zeroizing<String> {
    let table = character_table();

    // Extended symbols take up to three bytes; reserve so the buffer never
    // reallocates and leaves an unzeroized copy behind.
    let mut password = Zeroizing::new(String::with_capacity(bytes.len() * 3));
    for &byte in bytes {
        password.push(table[byte as usize % table.len()]);
    }
    password
}

/// Generates a random password with at least one uppercase, lowercase, digit
/// and special character, using a freshly seeded [`OsEntropy`].
pub fn generate_random(length: usize) -> Result<Zeroizing<String>> {
    check_length(length)?;

    let mut source = OsEntropy::new()?;
    generate_random_with(&mut source, length)
}

/// Like [`generate_random`] but draws from `source`.
pub fn generate_random_with<E: EntropySource + ?Sized>(
    source: &mut E,
    length: usize,
) -> Result<Zeroizing<String>> {
    check_length(length)?;

    let table = restricted_table();
    let mut password_bytes = Zeroizing::new(Vec::with_capacity(length));

    for class in restricted_classes() {
        password_bytes.push(class[source.next_index(class.len())?]);
    }

    while password_bytes.len() < length {
        password_bytes.push(table[source.next_index(table.len())?]);
    }

    // Fisher-Yates
    for i in (1..password_bytes.len()).rev() {
        let j = source.next_index(i + 1)?;
        password_bytes.swap(i, j);
    }

    tracing::debug!(length, "generated random password");

    Ok(Zeroizing::new(
        password_bytes.iter().map(|&b| char::from(b)).collect(),
    ))
}
