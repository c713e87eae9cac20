//! Field Rules
//!
//! A [`Rule`] is a tag plus a pure predicate. The tag is what the client sees
//! in the `message` of a violation, so tags are part of the wire contract.
//!
//! Apart from `required`, rules ignore absent fields: "not supplied" and
//! "supplied but invalid" are different failures.

use std::fmt;

/// Country calling code every phone number must start with
pub const PHONE_NUMBER_PREFIX: &str = "+62";

/// Minimum phone number length, prefix included
pub const PHONE_NUMBER_MIN_LENGTH: usize = 9;

/// Maximum phone number length, prefix included
pub const PHONE_NUMBER_MAX_LENGTH: usize = 14;

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

enum Check {
    Required,
    Text(Predicate),
}

/// A named predicate bound to a field
pub struct Rule {
    tag: &'static str,
    check: Check,
}

impl Rule {
    /// Rule with a custom predicate over textual values
    pub fn new<F>(tag: &'static str, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            tag,
            check: Check::Text(Box::new(predicate)),
        }
    }

    /// `required`: present and non-empty
    pub fn required() -> Self {
        Self {
            tag: "required",
            check: Check::Required,
        }
    }

    /// `min`: at least `n` characters (code points)
    pub fn min_chars(n: usize) -> Self {
        Self::new("min", move |value| value.chars().count() >= n)
    }

    /// `max`: at most `n` characters (code points)
    pub fn max_chars(n: usize) -> Self {
        Self::new("max", move |value| value.chars().count() <= n)
    }

    /// `phone_number`: see [`is_valid_phone_number`]
    pub fn phone_number() -> Self {
        Self::new("phone_number", |value| {
            is_valid_phone_number(value, PHONE_NUMBER_PREFIX)
        })
    }

    /// `pwd`: see [`is_complex_password`]
    pub fn password_complexity() -> Self {
        Self::new("pwd", is_complex_password)
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// `None` means the field was absent
    pub fn passes(&self, value: Option<&str>) -> bool {
        match (&self.check, value) {
            (Check::Required, Some(text)) => !text.is_empty(),
            (Check::Required, None) => false,
            (Check::Text(predicate), Some(text)) => predicate(text),
            (Check::Text(_), None) => true,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.tag).finish()
    }
}

/// Phone number format check
///
/// - empty string passes (absence is `required`'s business)
/// - 9 to 14 characters, prefix included
/// - starts with `prefix`
/// - everything after the prefix is an ASCII digit
pub fn is_valid_phone_number(value: &str, prefix: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    let length = value.chars().count();
    if !(PHONE_NUMBER_MIN_LENGTH..=PHONE_NUMBER_MAX_LENGTH).contains(&length) {
        return false;
    }

    match value.strip_prefix(prefix) {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// Password complexity check
///
/// Requires at least one upper-case letter, one digit and one character that
/// is neither a letter nor a digit. Length is not checked here.
pub fn is_complex_password(value: &str) -> bool {
    let mut has_upper = false;
    let mut has_digit = false;
    let mut has_special = false;

    for ch in value.chars() {
        if ch.is_uppercase() {
            has_upper = true;
        } else if ch.is_numeric() {
            has_digit = true;
        } else if !ch.is_alphanumeric() {
            has_special = true;
        }
    }

    has_upper && has_digit && has_special
}
