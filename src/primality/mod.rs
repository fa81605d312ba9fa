//! Primality testing.
//!
//! The oracle used by the density estimator is deterministic trial
//! division restricted to candidates of the form 6k ± 1. It is exact for
//! every integer the host can represent and needs no precomputed tables.
//! The sieve is a reference oracle for validating small ranges.

mod sieve;
mod trial;

pub use sieve::PrimeSieve;
pub use trial::{is_prime, TrialDivision};
