//! Sieve of Eratosthenes over a bounded range.

/// Primality table for `0..=limit`, built with the sieve of Eratosthenes.
///
/// Memory is linear in `limit`, so this is a reference for checking small
/// ranges, not a replacement for trial division on a stream.
#[derive(Debug, Clone)]
pub struct PrimeSieve {
    flags: Vec<bool>,
}

impl PrimeSieve {
    /// Sieves all integers up to and including `limit`.
    pub fn new(limit: usize) -> Self {
        let mut flags = vec![true; limit + 1];
        flags[0] = false;
        if limit >= 1 {
            flags[1] = false;
        }

        let mut p = 2;
        while p * p <= limit {
            if flags[p] {
                for multiple in (p * p..=limit).step_by(p) {
                    flags[multiple] = false;
                }
            }
            p += 1;
        }

        Self { flags }
    }

    /// Largest value covered by the table.
    #[inline]
    pub fn limit(&self) -> usize {
        self.flags.len() - 1
    }

    /// Returns true if `n` is prime, or false if it is composite or
    /// lies outside the sieved range.
    #[inline]
    pub fn is_prime(&self, n: u64) -> bool {
        usize::try_from(n)
            .ok()
            .and_then(|i| self.flags.get(i).copied())
            .unwrap_or(false)
    }

    /// Number of primes in `0..=limit`.
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&p| p).count()
    }

    /// Iterates the primes in ascending order.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, &p)| p)
            .map(|(i, _)| i as u64)
    }
}
