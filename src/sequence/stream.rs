//! Lazy, single-pass stream of positive polynomial values.

use super::polynomial::MAX_EXACT_FLOAT;
use crate::primality::is_prime;
use std::iter::FusedIterator;

/// One positive value of the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequenceValue {
    /// Exact value from integer coefficients.
    Integer(u64),
    /// Value from real coefficients. May have a fractional part.
    Real(f64),
}

impl SequenceValue {
    /// Returns true if the value is a prime integer.
    ///
    /// Real values are prime only when they are whole numbers within the
    /// exact floating range and prime as integers.
    pub fn is_prime(&self) -> bool {
        match *self {
            SequenceValue::Integer(v) => is_prime(v),
            SequenceValue::Real(v) => {
                v.fract() == 0.0 && v <= MAX_EXACT_FLOAT && is_prime(v as u64)
            }
        }
    }

    /// The value as `f64`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            SequenceValue::Integer(v) => v as f64,
            SequenceValue::Real(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) enum Evaluator {
    Exact { a: i128, b: i128, c: i128 },
    Real { a: f64, b: f64, c: f64 },
}

impl Evaluator {
    /// P(n) if positive. Range validation in `Polynomial::stream` keeps
    /// every exact value below 2^63, so it always fits `u64`.
    #[inline]
    fn positive_value(&self, n: u64) -> Option<SequenceValue> {
        match *self {
            Evaluator::Exact { a, b, c } => {
                let n = n as i128;
                let v = a * n * n + b * n + c;
                if v > 0 {
                    debug_assert!(v <= u64::MAX as i128, "exact value {} outside u64", v);
                    Some(SequenceValue::Integer(
                        u64::try_from(v).unwrap_or(u64::MAX),
                    ))
                } else {
                    None
                }
            }
            Evaluator::Real { a, b, c } => {
                let n = n as f64;
                let v = a * n * n + b * n + c;
                (v > 0.0).then_some(SequenceValue::Real(v))
            }
        }
    }
}

/// Iterator over the positive values of P(n) for n in `[0, limit)`.
///
/// Holds only the coefficients and the next `n`. Once exhausted it stays
/// exhausted; a new pass needs a new stream from
/// [`Polynomial::stream`](super::Polynomial::stream).
#[derive(Debug, Clone)]
pub struct PolynomialStream {
    evaluator: Evaluator,
    limit: u64,
    next_n: u64,
}

impl PolynomialStream {
    pub(super) fn new(evaluator: Evaluator, limit: u64) -> Self {
        Self {
            evaluator,
            limit,
            next_n: 0,
        }
    }

    /// Number of domain points not yet visited.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.limit - self.next_n
    }
}

impl Iterator for PolynomialStream {
    type Item = SequenceValue;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_n < self.limit {
            let n = self.next_n;
            self.next_n += 1;
            if let Some(value) = self.evaluator.positive_value(n) {
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, usize::try_from(self.remaining()).ok())
    }
}

impl FusedIterator for PolynomialStream {}
