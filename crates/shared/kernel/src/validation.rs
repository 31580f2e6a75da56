//! Argument guards returning [`AppError`] with [`ErrorKind::BadRequest`].
//!
//! ```
//! use catalog_kernel::validation;
//!
//! let port = validation::not_negative_or_zero(Some(3000), "port").unwrap();
//! assert_eq!(port, 3000);
//!
//! let err = validation::valid_currency(Some("BTC"), "currency").unwrap_err();
//! assert_eq!(err.message(), "currency is not a valid currency. Allowed: USD, EUR, GBP, JPY, CAD");
//! ```

use crate::problem::{AppError, ErrorKind};
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;

pub const ALLOWED_CURRENCIES: [&str; 5] = ["USD", "EUR", "GBP", "JPY", "CAD"];

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

type GuardResult<T> = Result<T, AppError>;

fn rejected(message: String) -> AppError {
    AppError::new(ErrorKind::BadRequest, message)
}

/// # Errors
/// Fails when `value` is `None`.
pub fn not_null<T>(value: Option<T>, name: &str) -> GuardResult<T> {
    value.ok_or_else(|| rejected(format!("{name} cannot be null or undefined.")))
}

/// # Errors
/// Fails when `value` is `None` or empty.
pub fn not_empty<'a>(value: Option<&'a str>, name: &str) -> GuardResult<&'a str> {
    let value = not_null(value, name)?;
    if value.is_empty() {
        return Err(rejected(format!("{name} cannot be empty.")));
    }
    Ok(value)
}

/// # Errors
/// Fails when `value` is `None` or only whitespace.
pub fn not_null_or_whitespace<'a>(value: Option<&'a str>, name: &str) -> GuardResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(rejected(format!("{name} cannot be null or white space."))),
    }
}

/// # Errors
/// Fails when `value` is `None`, zero or negative.
pub fn not_negative_or_zero<T>(value: Option<T>, name: &str) -> GuardResult<T>
where
    T: PartialOrd + Default,
{
    let value = not_null(value, name)?;
    if value <= T::default() {
        return Err(rejected(format!("{name} cannot be negative or zero.")));
    }
    Ok(value)
}

/// Inclusive on both ends.
///
/// # Errors
/// Fails when `value` is `None` or outside `min..=max`.
pub fn in_range<T>(value: Option<T>, min: T, max: T, name: &str) -> GuardResult<T>
where
    T: PartialOrd + Display,
{
    let value = not_null(value, name)?;
    if value < min || value > max {
        return Err(rejected(format!("{name} must be between {min} and {max}.")));
    }
    Ok(value)
}

/// Length is counted in characters.
///
/// # Errors
/// Fails when `value` is `None` or longer than `max`.
pub fn max_length<'a>(value: Option<&'a str>, max: usize, name: &str) -> GuardResult<&'a str> {
    let value = not_null(value, name)?;
    if value.chars().count() > max {
        return Err(rejected(format!("{name} cannot exceed {max} characters.")));
    }
    Ok(value)
}

/// # Errors
/// Fails when `value` is `None` or shorter than `min`.
pub fn min_length<'a>(value: Option<&'a str>, min: usize, name: &str) -> GuardResult<&'a str> {
    let value = not_null(value, name)?;
    if value.chars().count() < min {
        return Err(rejected(format!("{name} must be at least {min} characters.")));
    }
    Ok(value)
}

/// # Errors
/// Fails when `value` is blank or not shaped like `local@domain.tld`.
pub fn valid_email<'a>(value: Option<&'a str>, name: &str) -> GuardResult<&'a str> {
    let value = not_null_or_whitespace(value, name)?;
    if !EMAIL_REGEX.is_match(value) {
        return Err(rejected(format!("{name} is not a valid email address.")));
    }
    Ok(value)
}

/// Case-insensitive; returns the input unchanged.
///
/// # Errors
/// Fails when `value` is blank or not one of [`ALLOWED_CURRENCIES`].
pub fn valid_currency<'a>(value: Option<&'a str>, name: &str) -> GuardResult<&'a str> {
    let value = not_null_or_whitespace(value, name)?;
    if !ALLOWED_CURRENCIES.iter().any(|c| c.eq_ignore_ascii_case(value)) {
        return Err(rejected(format!(
            "{name} is not a valid currency. Allowed: {}",
            ALLOWED_CURRENCIES.join(", ")
        )));
    }
    Ok(value)
}

/// # Errors
/// Fails when `value` is `None` or does not match `pattern`.
pub fn matches_regex<'a>(value: Option<&'a str>, pattern: &Regex, name: &str) -> GuardResult<&'a str> {
    let value = not_null(value, name)?;
    if !pattern.is_match(value) {
        return Err(rejected(format!("{name} does not match the required pattern.")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ProblemMapper;

    #[test]
    fn guards_pass_valid_input_through() {
        assert_eq!(not_null(Some(5), "n").unwrap(), 5);
        assert_eq!(not_empty(Some("a"), "s").unwrap(), "a");
        assert_eq!(in_range(Some(5), 1, 10, "n").unwrap(), 5);
        assert_eq!(max_length(Some("héllo"), 5, "s").unwrap(), "héllo");
        assert_eq!(valid_email(Some("jane@example.com"), "email").unwrap(), "jane@example.com");
        assert_eq!(valid_currency(Some("eur"), "currency").unwrap(), "eur");
    }

    #[test]
    fn messages_name_the_argument() {
        let cases = [
            (not_null::<u8>(None, "port").unwrap_err(), "port cannot be null or undefined."),
            (not_empty(Some(""), "name").unwrap_err(), "name cannot be empty."),
            (not_null_or_whitespace(Some("  "), "name").unwrap_err(), "name cannot be null or white space."),
            (not_negative_or_zero(Some(0), "port").unwrap_err(), "port cannot be negative or zero."),
            (not_negative_or_zero(Some(-1.5), "price").unwrap_err(), "price cannot be negative or zero."),
            (in_range(Some(11), 1, 10, "page").unwrap_err(), "page must be between 1 and 10."),
            (max_length(Some("abcdef"), 5, "code").unwrap_err(), "code cannot exceed 5 characters."),
            (min_length(Some("ab"), 3, "code").unwrap_err(), "code must be at least 3 characters."),
            (valid_email(Some("jane@example"), "email").unwrap_err(), "email is not a valid email address."),
        ];

        for (err, expected) in cases {
            assert_eq!(err.message(), expected);
            assert_eq!(err.kind(), ErrorKind::BadRequest);
        }
    }

    #[test]
    fn regex_guard_uses_caller_pattern() {
        let sku = Regex::new(r"^[A-Z]{3}-\d{4}$").unwrap();
        assert!(matches_regex(Some("ABC-1234"), &sku, "sku").is_ok());
        assert_eq!(
            matches_regex(Some("abc"), &sku, "sku").unwrap_err().message(),
            "sku does not match the required pattern."
        );
    }

    #[test]
    fn guard_failures_map_to_bad_request() {
        let err = not_null::<u16>(None, "port").unwrap_err();
        assert_eq!(ProblemMapper::new().map_status_code(&err), 400);
    }
}
