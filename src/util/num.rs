/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;
/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use engscript::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big!"), Ok(42.0));
/// assert!(i64_to_f64_checked(MAX_SAFE_I64_INT + 1, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Safely converts a `usize` (a length or count) to `f64`.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT`.
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked<E>(value: usize, error: E) -> Result<f64, E> {
    if value as u64 > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts a repetition count to `usize`.
///
/// Negative whole numbers repeat zero times. Fractional, non-finite and
/// oversized values are rejected.
///
/// ## Errors
/// Returns `Err(error)` for values that are not whole numbers or exceed
/// `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use engscript::util::num::f64_to_repeat_count;
///
/// assert_eq!(f64_to_repeat_count(3.0, ()), Ok(3));
/// assert_eq!(f64_to_repeat_count(-2.0, ()), Ok(0));
/// assert!(f64_to_repeat_count(1.5, ()).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_repeat_count<E>(value: f64, error: E) -> Result<usize, E> {
    if !value.is_finite() || value.fract() != 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return Err(error);
    }
    if value <= 0.0 {
        return Ok(0);
    }
    usize::try_from(value as u64).map_err(|_| error)
}

/// Formats a number the way the interpreter prints it.
///
/// Whole numbers inside the exactly-representable range print as integers,
/// everything else uses the shortest `f64` form.
///
/// ## Example
/// ```
/// use engscript::util::num::format_number;
///
/// assert_eq!(format_number(4.0), "4");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(12.5), "12.5");
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_I64_INT as f64 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
