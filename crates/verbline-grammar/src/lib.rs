//! Verbline command-grammar engine
//!
//! This crate matches a raw argument vector against a static, caller-supplied
//! grammar of *verbs* (commands, optionally nested), *positional parameters*
//! (P1..P8) and *qualifiers* (`/NAME`, `/NAME=value`), producing an ordered
//! [`Context`] the caller queries afterwards.
//!
//! The defining feature is abbreviation support: any verb, qualifier or
//! keyword name may be typed as an unambiguous prefix. A prefix that matches
//! more than one candidate is a hard [`ParseError::Ambiguous`], never a guess.
//!
//! Layering, leaves first:
//! - [`bounded`]: the explicit-length string values every name and extracted
//!   value travel in
//! - [`grammar`]: the immutable verb/parameter/qualifier/keyword model
//! - [`matcher`]: the single prefix-resolution contract (verbs, qualifier
//!   names and keyword values all go through it)
//! - [`context`]: the per-parse result (verb chain + assignment list)
//! - [`parser`]: the driver tying the above together
//!
//! The grammar is read-only and may be shared across parses; every parse gets
//! its own [`Context`] and the whole engine is synchronous and in-process.

pub mod bounded;
pub mod context;
pub mod grammar;
pub mod matcher;
pub mod parser;

pub use bounded::{BoundedString, ValueTooLong, MAX_VALUE_LEN};
pub use context::{Assignment, Context, VerbStep};
pub use grammar::{validate_grammar, GrammarError, Keyword, Parameter, Qualifier, ValueType, Verb};
pub use matcher::{resolve, LookupError, Named};
pub use parser::{parse, parse_with_options, NameKind, ParseError, ParseOptions};
