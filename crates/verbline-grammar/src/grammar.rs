//! The command grammar model.
//!
//! A grammar is a caller-owned, read-only tree of [`Verb`]s. A verb either
//! owns an ordered list of sub-verbs (an interior node of the command tree)
//! or is a leaf owning positional [`Parameter`]s (P1..P8) and named
//! [`Qualifier`]s. Parameters and qualifiers may restrict their values to a
//! [`Keyword`] enumeration.
//!
//! Tables are ordinary `Vec`s with explicit length; there is no sentinel
//! entry and a zero-length name is invalid everywhere (see
//! [`validate_grammar`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Highest positional parameter a leaf verb may declare (P1..P8).
pub const MAX_POSITIONS: u8 = 8;

// ============================================================================
// Value types
// ============================================================================

/// Declared type of a parameter or qualifier value.
///
/// Type tags are carried through to the parse context for the caller's
/// benefit (prompting, help text, later conversion); the engine records them
/// but does not validate literals against them. The one exception is
/// [`ValueType::Keyword`], whose values are resolved against the declared
/// keyword table during the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    File,
    Date,
    Number,
    Ipv4,
    Ipv6,
    /// Presence-only option, no value.
    Flag,
    QuotedString,
    Uuid,
    Device,
    /// Value drawn from a declared keyword enumeration.
    Keyword,
}

impl ValueType {
    /// Human-readable description for help text.
    pub fn description(&self) -> &'static str {
        match self {
            ValueType::File => "FILE (./filename.ext, device:\\path\\filename.ext)",
            ValueType::Date => "DATE (dd-mm-yyyy[-hh:mm:ss])",
            ValueType::Number => "DIGIT (decimal, octal, hex)",
            ValueType::Ipv4 => "IPV4 (aa.bb.cc.dd)",
            ValueType::Ipv6 => "IPV6",
            ValueType::Flag => "OPTION (no value)",
            ValueType::QuotedString => "ASCII string in double quotes",
            ValueType::Uuid => "UUID",
            ValueType::Device => "DEVICE (/dev/...)",
            ValueType::Keyword => "KEYWORD",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// ============================================================================
// Tables
// ============================================================================

/// One permitted symbolic value in an enumerated value domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub name: String,
    /// Caller-defined constant associated with the keyword.
    pub value: u64,
}

impl Keyword {
    pub fn new(name: &str, value: u64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// An order-dependent argument bound to a fixed position of a leaf verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Position index, 1..=[`MAX_POSITIONS`].
    pub position: u8,
    /// Short label used in prompts and diagnostics ("Input file 1").
    pub name: String,
    pub value_type: ValueType,
    /// Optional parameters may be left unfilled by the argument vector.
    pub optional: bool,
    /// Assigned when an optional parameter is left unfilled.
    pub default: Option<String>,
    /// Keyword enumeration, non-empty iff `value_type` is `Keyword`.
    pub keywords: Vec<Keyword>,
}

impl Parameter {
    pub fn new(position: u8, name: &str, value_type: ValueType) -> Self {
        Self {
            position,
            name: name.to_string(),
            value_type,
            optional: false,
            default: None,
            keywords: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn default_value(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn keywords(mut self, keywords: Vec<Keyword>) -> Self {
        self.keywords = keywords;
        self
    }
}

/// A named, marker-prefixed argument of a leaf verb (`/NAME`, `/NAME=value`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub name: String,
    pub value_type: ValueType,
    /// Declared negatable (`NO`-prefix convention). Carried for callers;
    /// the scanner itself does not rewrite negated spellings.
    pub negatable: bool,
    /// Consulted by [`crate::Context::qualifier`] when the qualifier was
    /// supplied without `=value`; the scanner itself always stores the empty
    /// presence marker for a value-less occurrence.
    pub default: Option<String>,
    /// Keyword enumeration, non-empty iff `value_type` is `Keyword`.
    pub keywords: Vec<Keyword>,
}

impl Qualifier {
    pub fn new(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            negatable: false,
            default: None,
            keywords: Vec::new(),
        }
    }

    pub fn negatable(mut self) -> Self {
        self.negatable = true;
        self
    }

    pub fn default_value(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn keywords(mut self, keywords: Vec<Keyword>) -> Self {
        self.keywords = keywords;
        self
    }
}

/// A named command. Interior verbs own sub-verbs; leaves own parameters and
/// qualifiers. The `tag` is an opaque caller constant surfaced on the parsed
/// context's verb chain, for routing after a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    pub name: String,
    pub tag: u64,
    pub subverbs: Vec<Verb>,
    pub params: Vec<Parameter>,
    pub quals: Vec<Qualifier>,
}

impl Verb {
    /// A leaf verb; attach parameters/qualifiers with [`Verb::params`] and
    /// [`Verb::quals`].
    pub fn leaf(name: &str, tag: u64) -> Self {
        Self {
            name: name.to_string(),
            tag,
            subverbs: Vec::new(),
            params: Vec::new(),
            quals: Vec::new(),
        }
    }

    /// An interior verb owning a sub-verb table.
    pub fn group(name: &str, subverbs: Vec<Verb>) -> Self {
        Self {
            name: name.to_string(),
            tag: 0,
            subverbs,
            params: Vec::new(),
            quals: Vec::new(),
        }
    }

    pub fn params(mut self, params: Vec<Parameter>) -> Self {
        self.params = params;
        self
    }

    pub fn quals(mut self, quals: Vec<Qualifier>) -> Self {
        self.quals = quals;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

/// A structural defect in a grammar table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("verb `{verb}`: empty name in {table} table")]
    EmptyName { verb: String, table: &'static str },

    #[error("verb `{verb}` owns sub-verbs and its own parameters/qualifiers")]
    MixedVerb { verb: String },

    #[error("verb `{verb}`: P{position} is outside 1..={max}", max = MAX_POSITIONS)]
    PositionOutOfRange { verb: String, position: u8 },

    #[error("verb `{verb}`: positions must ascend strictly (P{prev} then P{next})")]
    PositionOrder { verb: String, prev: u8, next: u8 },

    #[error("verb `{verb}`: `{name}` is typed KEYWORD but declares no keywords")]
    MissingKeywordTable { verb: String, name: String },

    #[error("verb `{verb}`: `{name}` declares keywords but is not typed KEYWORD")]
    UnexpectedKeywordTable { verb: String, name: String },

    #[error("verb `{verb}`: duplicate name `{name}` in {table} table")]
    DuplicateName {
        verb: String,
        name: String,
        table: &'static str,
    },
}

/// Check a verb table (recursively) for structural defects.
///
/// Grammars are static data; run this once at startup or from a test rather
/// than on every parse.
pub fn validate_grammar(verbs: &[Verb]) -> Result<(), GrammarError> {
    validate_table(verbs, "(root)")
}

fn validate_table(verbs: &[Verb], parent: &str) -> Result<(), GrammarError> {
    check_unique(
        verbs.iter().map(|v| v.name.as_str()),
        parent,
        "verb",
    )?;

    for verb in verbs {
        if verb.name.is_empty() {
            return Err(GrammarError::EmptyName {
                verb: parent.to_string(),
                table: "verb",
            });
        }

        if !verb.subverbs.is_empty() {
            if !verb.params.is_empty() || !verb.quals.is_empty() {
                return Err(GrammarError::MixedVerb {
                    verb: verb.name.clone(),
                });
            }
            validate_table(&verb.subverbs, &verb.name)?;
            continue;
        }

        validate_params(verb)?;
        validate_quals(verb)?;
    }

    Ok(())
}

fn validate_params(verb: &Verb) -> Result<(), GrammarError> {
    let mut prev: u8 = 0;
    for param in &verb.params {
        if param.name.is_empty() {
            return Err(GrammarError::EmptyName {
                verb: verb.name.clone(),
                table: "parameter",
            });
        }
        if param.position < 1 || param.position > MAX_POSITIONS {
            return Err(GrammarError::PositionOutOfRange {
                verb: verb.name.clone(),
                position: param.position,
            });
        }
        if param.position <= prev {
            return Err(GrammarError::PositionOrder {
                verb: verb.name.clone(),
                prev,
                next: param.position,
            });
        }
        prev = param.position;

        validate_keywords(
            verb,
            &param.name,
            param.value_type,
            &param.keywords,
        )?;
    }
    Ok(())
}

fn validate_quals(verb: &Verb) -> Result<(), GrammarError> {
    check_unique(
        verb.quals.iter().map(|q| q.name.as_str()),
        &verb.name,
        "qualifier",
    )?;

    for qual in &verb.quals {
        if qual.name.is_empty() {
            return Err(GrammarError::EmptyName {
                verb: verb.name.clone(),
                table: "qualifier",
            });
        }
        validate_keywords(verb, &qual.name, qual.value_type, &qual.keywords)?;
    }
    Ok(())
}

fn validate_keywords(
    verb: &Verb,
    owner: &str,
    value_type: ValueType,
    keywords: &[Keyword],
) -> Result<(), GrammarError> {
    match (value_type, keywords.is_empty()) {
        (ValueType::Keyword, true) => Err(GrammarError::MissingKeywordTable {
            verb: verb.name.clone(),
            name: owner.to_string(),
        }),
        (ValueType::Keyword, false) => {
            for kwd in keywords {
                if kwd.name.is_empty() {
                    return Err(GrammarError::EmptyName {
                        verb: verb.name.clone(),
                        table: "keyword",
                    });
                }
            }
            check_unique(
                keywords.iter().map(|k| k.name.as_str()),
                &verb.name,
                "keyword",
            )
        }
        (_, false) => Err(GrammarError::UnexpectedKeywordTable {
            verb: verb.name.clone(),
            name: owner.to_string(),
        }),
        (_, true) => Ok(()),
    }
}

fn check_unique<'a>(
    names: impl Iterator<Item = &'a str>,
    verb: &str,
    table: &'static str,
) -> Result<(), GrammarError> {
    let mut seen: Vec<String> = Vec::new();
    for name in names {
        let folded = name.to_ascii_lowercase();
        if seen.contains(&folded) {
            return Err(GrammarError::DuplicateName {
                verb: verb.to_string(),
                name: name.to_string(),
                table,
            });
        }
        seen.push(folded);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_with_params(positions: &[u8]) -> Verb {
        Verb::leaf("copy", 1).params(
            positions
                .iter()
                .map(|&p| Parameter::new(p, "file", ValueType::File))
                .collect(),
        )
    }

    #[test]
    fn accepts_a_well_formed_tree() {
        let verbs = vec![
            Verb::group(
                "show",
                vec![Verb::leaf("volume", 1)
                    .params(vec![Parameter::new(1, "Volume name", ValueType::Device)])
                    .quals(vec![
                        Qualifier::new("uuid", ValueType::Uuid),
                        Qualifier::new("full", ValueType::Flag),
                    ])],
            ),
            Verb::leaf("diff", 2).quals(vec![Qualifier::new(
                "logging",
                ValueType::Keyword,
            )
            .keywords(vec![
                Keyword::new("FULL", 1),
                Keyword::new("TRACE", 2),
            ])]),
        ];
        assert_eq!(validate_grammar(&verbs), Ok(()));
    }

    #[test]
    fn rejects_mixed_interior_verbs() {
        let verb = Verb {
            params: vec![Parameter::new(1, "p", ValueType::File)],
            ..Verb::group("show", vec![Verb::leaf("volume", 1)])
        };
        assert!(matches!(
            validate_grammar(&[verb]),
            Err(GrammarError::MixedVerb { .. })
        ));
    }

    #[test]
    fn rejects_bad_positions() {
        assert!(matches!(
            validate_grammar(&[leaf_with_params(&[9])]),
            Err(GrammarError::PositionOutOfRange { position: 9, .. })
        ));
        assert!(matches!(
            validate_grammar(&[leaf_with_params(&[2, 1])]),
            Err(GrammarError::PositionOrder {
                prev: 2,
                next: 1,
                ..
            })
        ));
        assert!(matches!(
            validate_grammar(&[leaf_with_params(&[1, 1])]),
            Err(GrammarError::PositionOrder { .. })
        ));
    }

    #[test]
    fn rejects_keyword_type_without_table_and_vice_versa() {
        let no_table = Verb::leaf("set", 1).quals(vec![Qualifier::new(
            "logging",
            ValueType::Keyword,
        )]);
        assert!(matches!(
            validate_grammar(&[no_table]),
            Err(GrammarError::MissingKeywordTable { .. })
        ));

        let stray_table = Verb::leaf("set", 1).quals(vec![Qualifier::new(
            "count",
            ValueType::Number,
        )
        .keywords(vec![Keyword::new("ONE", 1)])]);
        assert!(matches!(
            validate_grammar(&[stray_table]),
            Err(GrammarError::UnexpectedKeywordTable { .. })
        ));
    }

    #[test]
    fn rejects_case_insensitive_duplicates() {
        let verbs = vec![Verb::leaf("start", 1), Verb::leaf("START", 2)];
        assert!(matches!(
            validate_grammar(&verbs),
            Err(GrammarError::DuplicateName { .. })
        ));
    }
}
