//! Human-readable rendering of grammar trees and parsed contexts.

use colored::Colorize;
use verbline_grammar::{Assignment, Context, Verb};

/// Print a verb table as an indented tree, with per-leaf parameter and
/// qualifier summaries.
pub fn print_grammar(verbs: &[Verb], level: usize) {
    let pad = "  ".repeat(level);

    for verb in verbs {
        println!("{pad}{}", verb.name.to_uppercase().bold());

        if !verb.subverbs.is_empty() {
            print_grammar(&verb.subverbs, level + 1);
            continue;
        }

        for param in &verb.params {
            println!(
                "{pad}   P{} - '{}' ({})",
                param.position,
                param.name,
                param.value_type.description().dimmed()
            );
            for kwd in &param.keywords {
                println!("{pad}      {}={:#x}", kwd.name, kwd.value);
            }
        }

        for qual in &verb.quals {
            println!(
                "{pad}   /{} ({})",
                qual.name.to_uppercase(),
                qual.value_type.description().dimmed()
            );
            for kwd in &qual.keywords {
                println!("{pad}      {}={:#x}", kwd.name, kwd.value);
            }
        }
    }
}

/// Print a parsed context: the resolved verb chain, then every assignment in
/// consumption order.
pub fn print_context(ctx: &Context) {
    println!("{}", "Parsed command".bold());

    let mut pad = String::new();
    for step in ctx.verb_chain() {
        pad.push_str("  ");
        println!(
            "{pad}{}  ('{}')",
            step.verb.to_uppercase().green(),
            step.token
        );
    }

    for assignment in ctx.assignments() {
        match assignment {
            Assignment::Positional { definition, value } => println!(
                "   P{}[0:{}]='{}'",
                definition.position,
                value.len(),
                value.to_string().cyan()
            ),
            Assignment::Qualifier { definition, value } => println!(
                "   /{}[0:{}]='{}'",
                definition.name.to_uppercase(),
                value.len(),
                value.to_string().cyan()
            ),
        }
    }
}
