//! Bounding concurrent derivations.
//!
//! Every derivation holds a 64 MiB Argon2 working set until it returns, so a
//! host serving many callers should route them through one
//! [`DerivationLimiter`] instead of calling [`derive_password`] directly.
//!
//! # Invariants
//!
//! - At most `max_in_flight` closures run inside [`DerivationLimiter::run`]
//!   at any instant.
//! - A slot is released when the closure returns or unwinds.
//! - Waiting callers block; a running derivation is never interrupted.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use zeroize::Zeroizing;

use crate::error::Result;
use crate::generator::derive_password;

#[derive(Debug)]
pub struct DerivationLimiter {
    max_in_flight: usize,
    in_flight: Mutex<usize>,
    released: Condvar,
}

impl DerivationLimiter {
    /// Creates a limiter admitting `max_in_flight` derivations at once.
    /// A value of zero is treated as one.
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
            in_flight: Mutex::new(0),
            released: Condvar::new(),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Number of derivations currently holding a slot.
    pub fn in_flight(&self) -> usize {
        *self.lock()
    }

    /// [`derive_password`], waiting for a free slot first.
    pub fn derive_password(
        &self,
        master: &str,
        domain: &str,
        length: usize,
    ) -> Result<Zeroizing<String>> {
        self.run(|| derive_password(master, domain, length))
    }

    /// Runs `f` while holding one slot.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> T {
        let _slot = self.acquire();
        f()
    }

    fn acquire(&self) -> Slot<'_> {
        let mut in_flight = self.lock();
        if *in_flight >= self.max_in_flight {
            tracing::debug!(
                in_flight = *in_flight,
                max = self.max_in_flight,
                "waiting for derivation slot"
            );
        }
        while *in_flight >= self.max_in_flight {
            in_flight = self
                .released
                .wait(in_flight)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *in_flight += 1;
        Slot { limiter: self }
    }

    // The counter stays consistent even if a holder panicked, so a poisoned
    // lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Slot<'a> {
    limiter: &'a DerivationLimiter,
}

impl Drop for Slot<'_> {
    fn drop(&mut self) {
        *self.limiter.lock() -= 1;
        self.limiter.released.notify_one();
    }
}
