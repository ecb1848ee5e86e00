//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into the range `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Clamp a value into the symmetric range `[-limit, limit]`.
pub fn clamp_sym<T>(value: T, limit: T) -> T
where
    T: Float
{
    clamp(&value, &-limit.abs(), &limit.abs())
}

/// Get the shortest signed angular distance represented by `diff_deg`.
///
/// The result is always in the half-open range (-180, 180] degrees, so that
/// `ang_diff_deg(x) == ang_diff_deg(x + 360 * k)` for any integer `k`.
pub fn ang_diff_deg<T>(diff_deg: T) -> T
where
    T: Float
{
    let full_turn = T::from(360.0).unwrap_or_else(|| T::max_value());
    let half_turn = full_turn / (T::one() + T::one());

    let mut d = half_turn - rem_euclid(half_turn - diff_deg, full_turn);

    // Round-off in rem_euclid can land exactly on a full turn
    if d <= -half_turn {
        d = d + full_turn;
    }

    d
}

/// Apply a deadband and ceiling to a signed value.
///
/// Magnitudes below `min` map to zero, magnitudes above `max` are limited to
/// `max` (keeping the sign), anything in between passes through unchanged.
pub fn deadband<T>(value: T, min: T, max: T) -> T
where
    T: Float
{
    let mag = value.abs();

    if mag < min {
        T::zero()
    }
    else if mag > max {
        max * value.signum()
    }
    else {
        value
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}
