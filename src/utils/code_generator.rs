//! Short code generation.
//!
//! Codes are identifiers, not secrets: they only need to be statistically
//! well spread, not unpredictable.

use rand::{Rng, distr::Alphanumeric};

/// Default number of characters in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 5;

/// Alphabet size of [`Alphanumeric`]: `A-Z`, `a-z`, `0-9`.
pub const ALPHABET_SIZE: usize = 62;

/// Codes that would shadow fixed routes and are never issued.
const RESERVED_CODES: &[&str] = &["ping", "health", "shorten"];

/// Generates a random short code of `length` characters.
///
/// Each character is drawn independently and uniformly from `[A-Za-z0-9]`
/// using the thread-local generator, so concurrent callers share no state.
/// Uniqueness is not guaranteed; the store enforces it on insert.
///
/// # Examples
///
/// ```
/// use shorty::utils::code_generator::generate_code;
///
/// let code = generate_code(5);
/// assert_eq!(code.len(), 5);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}
