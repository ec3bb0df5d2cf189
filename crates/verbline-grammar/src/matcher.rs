//! Abbreviated-name resolution.
//!
//! One contract, three call sites: command verbs, qualifier names and
//! keyword values are all resolved by [`resolve`] against their table. A
//! candidate matches when the typed token abbreviates its name (see
//! [`crate::bounded::abbreviates`]); zero matches is
//! [`LookupError::Unrecognized`], two or more is [`LookupError::Ambiguous`]
//! with the first two conflicting names captured for diagnostics.
//!
//! `ST` against `{START, STOP}` is ambiguous; so is `SET` against
//! `{SET, SETUP}`, because an exact match does not defeat a longer candidate
//! it also prefixes.

use crate::bounded::abbreviates;
use crate::grammar::{Keyword, Qualifier, Verb};
use thiserror::Error;

/// A table entry resolvable by abbreviated name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Verb {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Qualifier {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Keyword {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Failed name resolution, with the offending token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("ambiguous input `{input}` (matched to: `{first}`, `{second}`)")]
    Ambiguous {
        input: String,
        first: String,
        second: String,
    },

    #[error("illegal or unrecognized input `{input}`")]
    Unrecognized { input: String },
}

/// Resolve `input` against `table`, allowing unambiguous abbreviation.
///
/// Deterministic and call-order independent: the outcome depends only on
/// `input` and the table contents.
pub fn resolve<'t, T: Named>(input: &str, table: &'t [T]) -> Result<&'t T, LookupError> {
    let mut selected: Option<&T> = None;

    for candidate in table {
        if !abbreviates(input, candidate.name()) {
            continue;
        }
        if let Some(first) = selected {
            return Err(LookupError::Ambiguous {
                input: input.to_string(),
                first: first.name().to_string(),
                second: candidate.name().to_string(),
            });
        }
        selected = Some(candidate);
    }

    selected.ok_or_else(|| LookupError::Unrecognized {
        input: input.to_string(),
    })
}
