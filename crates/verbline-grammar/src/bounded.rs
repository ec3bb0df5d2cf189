//! Explicit-length string values.
//!
//! Every name in a grammar table and every value extracted from the argument
//! vector travels as a [`BoundedString`]: a byte-capped text value whose
//! length is always explicit. Comparisons are length-bounded and
//! ASCII-case-insensitive; nothing here ever relies on an implicit
//! terminator.
//!
//! The cap defaults to [`MAX_VALUE_LEN`] but is a per-construction argument
//! rather than a structural limit, so tests can push longer synthetic inputs
//! through [`BoundedString::with_cap`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default byte cap for extracted values and names.
pub const MAX_VALUE_LEN: usize = 255;

/// A value exceeded the byte cap it was constructed under.
///
/// This is the engine's fatal, parse-aborting resource failure: the partially
/// built context stays droppable, but the parse itself does not continue.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("value is {len} bytes, the cap is {max}")]
pub struct ValueTooLong {
    pub len: usize,
    pub max: usize,
}

/// Byte-capped text value with an explicit length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundedString {
    text: String,
}

impl BoundedString {
    /// Construct under the default [`MAX_VALUE_LEN`] cap.
    pub fn new(text: &str) -> Result<Self, ValueTooLong> {
        Self::with_cap(text, MAX_VALUE_LEN)
    }

    /// Construct under an explicit cap.
    pub fn with_cap(text: &str, cap: usize) -> Result<Self, ValueTooLong> {
        if text.len() > cap {
            return Err(ValueTooLong {
                len: text.len(),
                max: cap,
            });
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    /// The empty value, used for presence-only qualifiers.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Explicit byte length.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Full-length, ASCII-case-insensitive equality against `other`.
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.text.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for BoundedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// True when `input` is an acceptable abbreviation of `name`.
///
/// The typed prefix must not be longer than the full name, and the two must
/// agree ASCII-case-insensitively over the prefix's own length. Note that a
/// full name is its own acceptable abbreviation; it does not get special
/// treatment over a longer name it also prefixes (`SET` abbreviates both
/// `SET` and `SETUP`).
pub fn abbreviates(input: &str, name: &str) -> bool {
    input.len() <= name.len()
        && input
            .as_bytes()
            .iter()
            .zip(name.as_bytes())
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}
