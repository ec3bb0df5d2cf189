//! The parser driver and its extractors.
//!
//! [`parse`] walks the argument vector depth-first: it resolves the leading
//! token against the current verb table, descends into sub-verb tables for as
//! long as the matched verb declares them, then hands the tail to positional
//! extraction and finally to the qualifier scanner. Every matching step goes
//! through [`crate::matcher::resolve`].
//!
//! The whole pipeline is synchronous and deterministic: a parse either
//! completes with a fully populated [`Context`] or fails with a definitive
//! [`ParseError`]. Nothing is retried or guessed.

use crate::bounded::{BoundedString, ValueTooLong};
use crate::context::Context;
use crate::grammar::Verb;
use crate::matcher::{resolve, LookupError};
use std::fmt;
use thiserror::Error;

/// Which name table a resolution failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Verb,
    Qualifier,
    Keyword,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameKind::Verb => "command verb",
            NameKind::Qualifier => "qualifier",
            NameKind::Keyword => "keyword",
        })
    }
}

/// Definitive outcome of a failed parse.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A typed prefix matched two or more candidates at the same length.
    #[error("ambiguous {kind} `{input}` (matched to: `{first}`, `{second}`)")]
    Ambiguous {
        kind: NameKind,
        input: String,
        first: String,
        second: String,
    },

    /// A typed token matched no candidate.
    #[error("illegal or unrecognized {kind} `{input}`")]
    Unrecognized { kind: NameKind, input: String },

    /// The argument vector ran out before a required position was filled.
    #[error("missing P{position} - {name}")]
    MissingParameter { position: u8, name: String },

    /// Not even a verb token was supplied.
    #[error("insufficient arguments, a command verb is required")]
    InsufficientArguments,

    /// A value exceeded the byte cap; fatal, the parse does not continue.
    #[error(transparent)]
    ValueTooLong(#[from] ValueTooLong),
}

fn lookup_failed(err: LookupError, kind: NameKind) -> ParseError {
    match err {
        LookupError::Ambiguous {
            input,
            first,
            second,
        } => ParseError::Ambiguous {
            kind,
            input,
            first,
            second,
        },
        LookupError::Unrecognized { input } => ParseError::Unrecognized { kind, input },
    }
}

/// Processing options, all off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Emit a `tracing::error!` diagnostic when the parse fails, in addition
    /// to returning the error.
    pub signal: bool,
    /// Emit `tracing::trace!` events per matching step.
    pub trace: bool,
}

/// Parse `args` against the verb table `verbs` with default options.
pub fn parse<S: AsRef<str>>(verbs: &[Verb], args: &[S]) -> Result<Context, ParseError> {
    parse_with_options(verbs, args, ParseOptions::default())
}

/// Parse `args` against the verb table `verbs`.
///
/// On success the returned [`Context`] holds the resolved verb chain and
/// every extracted assignment, in consumption order. The grammar itself is
/// never mutated, so one table may back any number of parses.
pub fn parse_with_options<S: AsRef<str>>(
    verbs: &[Verb],
    args: &[S],
    options: ParseOptions,
) -> Result<Context, ParseError> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    if options.trace {
        tracing::trace!(argc = args.len(), "parsing command line");
    }

    let mut ctx = Context::default();
    match parse_verb(&mut ctx, verbs, &args, options) {
        Ok(()) => Ok(ctx),
        Err(err) => {
            if options.signal {
                tracing::error!(error = %err, "command line parse failed");
            }
            Err(err)
        }
    }
}

fn parse_verb(
    ctx: &mut Context,
    table: &[Verb],
    args: &[&str],
    options: ParseOptions,
) -> Result<(), ParseError> {
    let Some((&token, rest)) = args.split_first() else {
        return Err(ParseError::InsufficientArguments);
    };

    let verb = resolve(token, table).map_err(|e| lookup_failed(e, NameKind::Verb))?;
    if options.trace {
        tracing::trace!(token, verb = %verb.name, "matched verb");
    }
    ctx.push_verb(verb, token);

    if !verb.subverbs.is_empty() {
        return parse_verb(ctx, &verb.subverbs, rest, options);
    }

    if verb.params.is_empty() && verb.quals.is_empty() {
        return Ok(());
    }

    parse_params(ctx, verb, rest, options)
}

/// Consume the leading arguments against the verb's declared positions, one
/// argument per parameter in ascending position order; excess arguments flow
/// on to the qualifier scanner.
fn parse_params(
    ctx: &mut Context,
    verb: &Verb,
    args: &[&str],
    options: ParseOptions,
) -> Result<(), ParseError> {
    let mut taken = 0usize;

    for param in &verb.params {
        let Some(&token) = args.get(taken) else {
            if !param.optional {
                return Err(ParseError::MissingParameter {
                    position: param.position,
                    name: param.name.clone(),
                });
            }
            if let Some(default) = &param.default {
                ctx.push_positional(param, BoundedString::new(default)?);
            }
            continue;
        };

        let value = if param.keywords.is_empty() {
            BoundedString::new(token)?
        } else {
            let kwd = resolve(token, &param.keywords)
                .map_err(|e| lookup_failed(e, NameKind::Keyword))?;
            BoundedString::new(&kwd.name)?
        };

        if options.trace {
            tracing::trace!(position = param.position, value = %value, "positional parameter");
        }
        ctx.push_positional(param, value);
        taken += 1;
    }

    parse_quals(ctx, verb, &args[taken..], options)
}

/// Scan the remaining arguments for `/NAME[=value]` / `-NAME[=value]` tokens.
///
/// Unmarked tokens are skipped with a warning rather than rejected; see the
/// qualifier-scan notes in DESIGN.md. Every occurrence of a repeated
/// qualifier is appended; last-one-wins is the query layer's policy, not
/// the scanner's.
fn parse_quals(
    ctx: &mut Context,
    verb: &Verb,
    args: &[&str],
    options: ParseOptions,
) -> Result<(), ParseError> {
    for &arg in args {
        let Some(body) = arg.strip_prefix('/').or_else(|| arg.strip_prefix('-')) else {
            tracing::warn!(token = arg, "unmarked trailing token ignored");
            continue;
        };

        let (name_part, value_part) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let qual = resolve(name_part, &verb.quals)
            .map_err(|e| lookup_failed(e, NameKind::Qualifier))?;

        let value = match value_part {
            Some(v) if !qual.keywords.is_empty() => {
                // Keyword-typed values are resolved (abbreviation included)
                // and stored in canonical full-name form.
                let kwd = resolve(v, &qual.keywords)
                    .map_err(|e| lookup_failed(e, NameKind::Keyword))?;
                BoundedString::new(&kwd.name)?
            }
            Some(v) => BoundedString::new(v)?,
            // Value-less occurrence: the empty marker signals presence only.
            // A declared default is the query layer's business.
            None => BoundedString::empty(),
        };

        if options.trace {
            tracing::trace!(qualifier = %qual.name, value = %value, "qualifier");
        }
        ctx.push_qualifier(qual, value);
    }

    Ok(())
}
