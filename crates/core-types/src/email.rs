use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An email address accepted for lead capture.
///
/// The accepted shape is `local@domain.tld`: the local part and the domain are
/// runs of ASCII word characters (`[A-Za-z0-9_]`) joined by single `.` or `-`
/// separators, and the domain ends in a top-level label of two or three word
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        if is_valid_email(&raw) {
            Ok(Self(raw))
        } else {
            Err(CoreError::InvalidEmail(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if !is_word_sequence(local) {
        return false;
    }
    // The top-level label is whatever follows the last dot of the domain.
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    is_word_sequence(host) && (2..=3).contains(&tld.len()) && tld.bytes().all(is_word_byte)
}

/// Word runs joined by single `.` or `-` separators, never at either end.
fn is_word_sequence(s: &str) -> bool {
    let bytes = s.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    if !is_word_byte(*first) || !is_word_byte(*last) {
        return false;
    }
    let mut previous_was_separator = false;
    for &b in bytes {
        if is_word_byte(b) {
            previous_was_separator = false;
        } else if b == b'.' || b == b'-' {
            if previous_was_separator {
                return false;
            }
            previous_was_separator = true;
        } else {
            return false;
        }
    }
    true
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
