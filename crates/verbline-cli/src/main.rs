//! Verbline demo front-end.
//!
//! Exercises the grammar engine against the SHOW/DIFF demo grammar:
//!
//! ```text
//! verbline show vol sdb /uuid=ABCD /full
//! verbline diff a.dat b.dat /logging=tr
//! verbline --json sh us peter
//! ```
//!
//! With no command (or `help`) it prints the grammar tree. `--json` dumps
//! the parsed context as JSON instead of the human rendering. Diagnostics go
//! through `tracing`; set `RUST_LOG=verbline_grammar=trace` to watch the
//! matcher work.

use anyhow::{Context as _, Result};
use colored::Colorize;
use std::env;
use tracing_subscriber::EnvFilter;
use verbline_grammar::{parse_with_options, validate_grammar, Context, ParseOptions};

mod demo;
mod render;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let json = matches!(args.first().map(String::as_str), Some("--json"));
    if json {
        args.remove(0);
    }

    let grammar = demo::grammar();
    validate_grammar(&grammar).context("demo grammar is malformed")?;

    if args.is_empty() || args[0] == "help" || args[0] == "--help" {
        println!("{}", "Available commands".bold());
        render::print_grammar(&grammar, 0);
        return Ok(());
    }

    let ctx = parse_with_options(
        &grammar,
        &args,
        ParseOptions {
            signal: true,
            trace: true,
        },
    )
    .context("cannot parse command line")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ctx)?);
    } else {
        render::print_context(&ctx);
    }

    dispatch(&ctx)
}

/// Route on the leaf verb's dispatch tag, the way the original wired action
/// routines to verbs.
fn dispatch(ctx: &Context) -> Result<()> {
    tracing::debug!(tag = ?ctx.dispatch_tag(), "dispatching parsed command");
    match ctx.dispatch_tag() {
        Some(demo::SHOW_VOLUME) => {
            println!(
                "show volume: name='{}' uuid='{}' full={}",
                ctx.param(1).unwrap_or(""),
                ctx.qualifier("uuid").unwrap_or(""),
                ctx.qualifier_present("full"),
            );
        }
        Some(demo::SHOW_USER) | Some(demo::SHOW_VM) => {
            println!(
                "show: target='{}' group='{}' full={}",
                ctx.param(1).unwrap_or(""),
                ctx.qualifier("group").unwrap_or(""),
                ctx.qualifier_present("full"),
            );
        }
        Some(demo::DIFF) => {
            println!(
                "diff: '{}' vs '{}' logging='{}'",
                ctx.param(1).unwrap_or(""),
                ctx.param(2).unwrap_or(""),
                ctx.qualifier("logging").unwrap_or(""),
            );
        }
        other => {
            tracing::error!(tag = ?other, "no action routine for dispatch tag");
            anyhow::bail!("no action routine for dispatch tag {other:?}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use verbline_grammar::parse;

    #[test]
    fn every_demo_leaf_has_an_action_routine() {
        let grammar = demo::grammar();
        for args in [
            vec!["show", "volume", "sdb", "/uuid=ABCD"],
            vec!["show", "user", "peter"],
            vec!["show", "vm", "vm-17"],
            vec!["diff", "a.dat", "b.dat", "/logging=tr"],
        ] {
            let ctx = parse(&grammar, &args).expect("demo command parses");
            dispatch(&ctx).expect("demo command dispatches");
        }
    }

    #[test]
    fn an_empty_context_has_nothing_to_dispatch() {
        assert!(dispatch(&Context::default()).is_err());
    }
}
