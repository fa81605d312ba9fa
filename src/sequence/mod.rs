//! Quadratic sequence generation.
//!
//! A [`Polynomial`] describes P(n) = a·n² + b·n + c. Calling
//! [`Polynomial::stream`] yields a fresh [`PolynomialStream`] that walks
//! n = 0, 1, …, limit − 1 and hands out each positive value one at a time.
//! Nothing is buffered, so a stream uses constant memory whatever the limit.

mod polynomial;
mod stream;

pub use polynomial::{Polynomial, PolynomialError};
pub use stream::{PolynomialStream, SequenceValue};
