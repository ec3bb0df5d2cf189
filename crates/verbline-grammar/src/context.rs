//! The per-parse result: verb chain + assignment list.
//!
//! A [`Context`] is born empty, filled append-only by the parser during a
//! single parse call, then handed to the caller read-only. Both lists are
//! owned `Vec`s of value-typed entries: entries clone the matched grammar
//! definition, so a context is self-contained. It shares nothing with the
//! grammar it was parsed against or with any other context, and teardown is
//! an ordinary drop.

use crate::bounded::BoundedString;
use crate::grammar::{Parameter, Qualifier, Verb};
use serde::{Deserialize, Serialize};

/// One resolved step on the root-to-leaf verb path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbStep {
    /// Full name of the matched verb definition.
    pub verb: String,
    /// The verb's dispatch tag.
    pub tag: u64,
    /// The raw (possibly abbreviated) token that matched it.
    pub token: String,
}

/// One extracted value, tagged by what it bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Assignment {
    /// Bound to a positional parameter; the position lives on the definition.
    Positional {
        definition: Parameter,
        value: BoundedString,
    },
    /// Bound to a qualifier; an empty value signals presence-only.
    Qualifier {
        definition: Qualifier,
        value: BoundedString,
    },
}

impl Assignment {
    pub fn value(&self) -> &BoundedString {
        match self {
            Assignment::Positional { value, .. } | Assignment::Qualifier { value, .. } => value,
        }
    }

    /// The position index for positional assignments, `None` for qualifiers.
    pub fn position(&self) -> Option<u8> {
        match self {
            Assignment::Positional { definition, .. } => Some(definition.position),
            Assignment::Qualifier { .. } => None,
        }
    }
}

/// Result of one parse invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    verb_chain: Vec<VerbStep>,
    assignments: Vec<Assignment>,
}

impl Context {
    /// Resolved verb path, root first.
    pub fn verb_chain(&self) -> &[VerbStep] {
        &self.verb_chain
    }

    /// Extracted assignments in the order they were consumed.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Dispatch tag of the leaf verb, for routing after the parse.
    pub fn dispatch_tag(&self) -> Option<u64> {
        self.verb_chain.last().map(|step| step.tag)
    }

    /// Value bound to position `position`, or `None` if it was never filled.
    ///
    /// Repeated fills (not producible by the parser, but allowed by the data
    /// model) resolve last-one-wins, like qualifiers.
    pub fn param(&self, position: u8) -> Option<&str> {
        self.assignments
            .iter()
            .rev()
            .find(|a| a.position() == Some(position))
            .map(|a| a.value().as_str())
    }

    /// Last-one-wins value lookup by full qualifier name (case-insensitive).
    ///
    /// The scanner appends every occurrence of a repeated qualifier; this is
    /// the query-side policy that makes the last one authoritative. A
    /// value-less occurrence resolves to the qualifier's declared default,
    /// or to the empty presence marker when none is declared.
    pub fn qualifier(&self, name: &str) -> Option<&str> {
        self.assignments.iter().rev().find_map(|a| match a {
            Assignment::Qualifier { definition, value }
                if definition.name.eq_ignore_ascii_case(name) =>
            {
                if value.is_empty() {
                    Some(definition.default.as_deref().unwrap_or(""))
                } else {
                    Some(value.as_str())
                }
            }
            _ => None,
        })
    }

    /// True when the qualifier was supplied at all (with or without a value).
    pub fn qualifier_present(&self, name: &str) -> bool {
        self.qualifier(name).is_some()
    }

    /// Total appended entries across both lists.
    pub fn node_count(&self) -> usize {
        self.verb_chain.len() + self.assignments.len()
    }

    pub(crate) fn push_verb(&mut self, verb: &Verb, token: &str) {
        self.verb_chain.push(VerbStep {
            verb: verb.name.clone(),
            tag: verb.tag,
            token: token.to_string(),
        });
    }

    pub(crate) fn push_positional(&mut self, definition: &Parameter, value: BoundedString) {
        self.assignments.push(Assignment::Positional {
            definition: definition.clone(),
            value,
        });
    }

    pub(crate) fn push_qualifier(&mut self, definition: &Qualifier, value: BoundedString) {
        self.assignments.push(Assignment::Qualifier {
            definition: definition.clone(),
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ValueType;

    fn sample() -> Context {
        let mut ctx = Context::default();
        ctx.push_verb(&Verb::leaf("show", 7), "sh");
        ctx.push_positional(
            &Parameter::new(1, "Volume name", ValueType::Device),
            BoundedString::new("sdb").unwrap(),
        );
        ctx.push_qualifier(
            &Qualifier::new("uuid", ValueType::Uuid),
            BoundedString::new("ABCD").unwrap(),
        );
        ctx
    }

    #[test]
    fn queries_see_appended_entries() {
        let ctx = sample();
        assert_eq!(ctx.node_count(), 3);
        assert_eq!(ctx.dispatch_tag(), Some(7));
        assert_eq!(ctx.param(1), Some("sdb"));
        assert_eq!(ctx.param(2), None);
        assert_eq!(ctx.qualifier("UUID"), Some("ABCD"));
        assert!(!ctx.qualifier_present("full"));
    }

    #[test]
    fn repeated_qualifiers_resolve_last_one_wins() {
        let mut ctx = Context::default();
        let group = Qualifier::new("group", ValueType::QuotedString);
        ctx.push_qualifier(&group, BoundedString::new("staff").unwrap());
        ctx.push_qualifier(&group, BoundedString::new("wheel").unwrap());
        assert_eq!(ctx.qualifier("group"), Some("wheel"));
        // Both occurrences stay on the list.
        assert_eq!(ctx.assignments().len(), 2);
    }

    #[test]
    fn valueless_qualifier_defaults_resolve_in_the_query() {
        let mut ctx = Context::default();
        let depth = Qualifier::new("depth", ValueType::Number).default_value("1");
        ctx.push_qualifier(&depth, BoundedString::empty());
        assert_eq!(ctx.qualifier("depth"), Some("1"));

        // An explicit value still wins over the default.
        ctx.push_qualifier(&depth, BoundedString::new("4").unwrap());
        assert_eq!(ctx.qualifier("depth"), Some("4"));
    }

    #[test]
    fn empty_context_is_a_valid_terminal_state() {
        let ctx = Context::default();
        assert_eq!(ctx.node_count(), 0);
        assert_eq!(ctx.dispatch_tag(), None);
        assert_eq!(ctx.qualifier("anything"), None);
        drop(ctx);
    }

    #[test]
    fn contexts_round_trip_through_serde() {
        let ctx = sample();
        let json = serde_json::to_string(&ctx).unwrap();
        let back: Context = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }
}
