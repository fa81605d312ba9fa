//! Trial division with the 6k ± 1 wheel.

/// Deterministic primality test by trial division.
///
/// Implemented for every primitive integer type. Signed values at or below
/// one, including all negatives, are never prime.
pub trait TrialDivision: Copy {
    /// Returns true if `self` is prime.
    fn is_prime(self) -> bool;
}

/// Returns true if `n` is prime.
///
/// Shorthand for [`TrialDivision::is_prime`].
///
/// ```
/// use prime_density::primality::is_prime;
///
/// assert!(is_prime(41u64));
/// assert!(!is_prime(-7i64));
/// ```
#[inline]
pub fn is_prime<T: TrialDivision>(n: T) -> bool {
    n.is_prime()
}

macro_rules! impl_wheel {
    ($name:ident, $t:ty) => {
        fn $name(n: $t) -> bool {
            if n <= 1 {
                return false;
            }
            if n <= 3 {
                return true;
            }
            if n % 2 == 0 || n % 3 == 0 {
                return false;
            }

            // `i <= n / i` is `i * i <= n` without the overflow near MAX.
            let mut i: $t = 5;
            while i <= n / i {
                if n % i == 0 || n % (i + 2) == 0 {
                    return false;
                }
                i += 6;
            }
            true
        }
    };
}

impl_wheel!(wheel_u64, u64);
impl_wheel!(wheel_u128, u128);

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl TrialDivision for $t {
            #[inline]
            fn is_prime(self) -> bool {
                wheel_u64(self as u64)
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl TrialDivision for $t {
            #[inline]
            fn is_prime(self) -> bool {
                self > 1 && wheel_u64(self as u64)
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, usize);
impl_signed!(i8, i16, i32, i64, isize);

impl TrialDivision for u128 {
    fn is_prime(self) -> bool {
        match u64::try_from(self) {
            Ok(small) => wheel_u64(small),
            Err(_) => wheel_u128(self),
        }
    }
}

impl TrialDivision for i128 {
    fn is_prime(self) -> bool {
        self > 1 && (self as u128).is_prime()
    }
}
