//! Validator library: pure predicates over converted values.

use std::sync::LazyLock;

use mms_model::FieldValue;
use regex::Regex;

use crate::normalization::normalize_url;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("Invalid email regex")
});

/// Optional leading `+`, then digits and ` -.()` separators.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 .()\-]+$").expect("Invalid phone regex"));

const PHONE_MIN_DIGITS: usize = 8;
const PHONE_MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validator {
    Required,
    Positive,
    Email,
    Url,
    Phone,
}

impl Validator {
    pub const ALL: [Validator; 5] = [
        Self::Required,
        Self::Positive,
        Self::Email,
        Self::Url,
        Self::Phone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Positive => "positive",
            Self::Email => "email",
            Self::Url => "url",
            Self::Phone => "phone",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Returns true when `value` satisfies the predicate. Never panics.
    pub fn check(self, value: &FieldValue) -> bool {
        match self {
            Self::Required => !value.is_empty(),
            Self::Positive => value.as_f64().is_some_and(|n| n > 0.0),
            Self::Email => value
                .as_str()
                .is_some_and(|text| EMAIL_REGEX.is_match(text.trim())),
            Self::Url => match value {
                FieldValue::Url(_) => true,
                FieldValue::Text(text) => normalize_url(text).is_ok(),
                _ => false,
            },
            Self::Phone => match value {
                FieldValue::Text(text) => is_phone(text.trim()),
                FieldValue::Integer(number) => is_phone(&number.to_string()),
                _ => false,
            },
        }
    }
}

fn is_phone(text: &str) -> bool {
    if !PHONE_REGEX.is_match(text) {
        return false;
    }
    let digits = text.chars().filter(char::is_ascii_digit).count();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}
