//! Quadratic polynomial description and range validation.

use super::stream::{Evaluator, PolynomialStream};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Largest integer magnitude an `f64` represents without gaps (2^53).
pub(crate) const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// 2^63, the first magnitude outside `i64`. Also the ceiling for exact
/// ranges, leaving headroom below `u64::MAX` for rounding in the f64 bound.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Errors raised when a polynomial or its range cannot be evaluated exactly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolynomialError {
    /// A coefficient is NaN or infinite.
    #[error("coefficient {name} is not finite ({value})")]
    NonFiniteCoefficient {
        /// Coefficient name: `a`, `b` or `c`.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Values in the range could exceed the exact representation.
    #[error(
        "values of {polynomial} over n < {limit} may reach {bound:.3e}, beyond the exact range {max:.3e}"
    )]
    MagnitudeOverflow {
        /// Formula of the rejected polynomial.
        polynomial: String,
        /// Requested domain bound.
        limit: u64,
        /// Term-wise upper bound on |P(n)|.
        bound: f64,
        /// Exact-representation ceiling that was exceeded.
        max: f64,
    },
}

/// The quadratic P(n) = a·n² + b·n + c.
///
/// Coefficients are real-valued. When all three are whole numbers that
/// fit in `i64`, streams evaluate P(n) exactly in integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Polynomial {
    a: f64,
    b: f64,
    c: f64,
}

impl Polynomial {
    /// Creates a polynomial, rejecting NaN and infinite coefficients.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, PolynomialError> {
        for (name, value) in [("a", a), ("b", b), ("c", c)] {
            if !value.is_finite() {
                return Err(PolynomialError::NonFiniteCoefficient { name, value });
            }
        }
        Ok(Self { a, b, c })
    }

    /// Euler's prime-generating polynomial n² + n + 41.
    pub fn euler() -> Self {
        Self {
            a: 1.0,
            b: 1.0,
            c: 41.0,
        }
    }

    /// Quadratic coefficient.
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Linear coefficient.
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Constant term.
    #[inline]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Returns the coefficients as `i64` if all three are whole numbers
    /// in range.
    pub fn integral(&self) -> Option<(i64, i64, i64)> {
        Some((as_i64(self.a)?, as_i64(self.b)?, as_i64(self.c)?))
    }

    /// Evaluates P(n) in floating point.
    pub fn eval(&self, n: u64) -> f64 {
        let n = n as f64;
        self.a * n * n + self.b * n + self.c
    }

    /// Upper bound on |P(n)| for every n in `[0, limit)`.
    ///
    /// Bounds each term separately, so it never underestimates, even when
    /// terms cancel.
    pub fn magnitude_bound(&self, limit: u64) -> f64 {
        if limit == 0 {
            return 0.0;
        }
        let n = (limit - 1) as f64;
        self.a.abs() * n * n + self.b.abs() * n + self.c.abs()
    }

    /// Starts a new single-pass stream over n = 0..limit.
    ///
    /// Fails if some value in the range could not be represented exactly:
    /// at or beyond 2^63 for integer coefficients, or beyond 2^53 for real
    /// ones.
    pub fn stream(&self, limit: u64) -> Result<PolynomialStream, PolynomialError> {
        let bound = self.magnitude_bound(limit);

        let evaluator = match self.integral() {
            Some((a, b, c)) if bound < I64_BOUND => Evaluator::Exact {
                a: a as i128,
                b: b as i128,
                c: c as i128,
            },
            None if bound <= MAX_EXACT_FLOAT => Evaluator::Real {
                a: self.a,
                b: self.b,
                c: self.c,
            },
            integral => {
                let max = if integral.is_some() {
                    I64_BOUND
                } else {
                    MAX_EXACT_FLOAT
                };
                return Err(PolynomialError::MagnitudeOverflow {
                    polynomial: self.to_string(),
                    limit,
                    bound,
                    max,
                });
            }
        };

        Ok(PolynomialStream::new(evaluator, limit))
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::euler()
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P(n) = {}n^2 + {}n + {}", self.a, self.b, self.c)
    }
}

fn as_i64(x: f64) -> Option<i64> {
    if x.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&x) {
        Some(x as i64)
    } else {
        None
    }
}
