use proptest::prelude::*;
use proptest::sample::Index;
use verbline_grammar::bounded::abbreviates;
use verbline_grammar::matcher::{resolve, LookupError};
use verbline_grammar::Keyword;

fn name() -> impl Strategy<Value = String> {
    // Keep names small and readable (the matcher is byte-wise and
    // case-insensitive over ASCII, like the grammar tables it serves).
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9_]{0,11}").unwrap()
}

fn table() -> impl Strategy<Value = Vec<Keyword>> {
    proptest::collection::vec(name(), 0..8).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, n)| Keyword::new(&n, i as u64))
            .collect()
    })
}

fn token() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_]{0,12}").unwrap()
}

/// Candidate count under the abbreviation rule, computed independently of
/// the matcher.
fn matching(input: &str, table: &[Keyword]) -> Vec<String> {
    table
        .iter()
        .filter(|k| abbreviates(input, &k.name))
        .map(|k| k.name.clone())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn classification_is_total_and_matches_the_candidate_count(
        input in token(),
        table in table(),
    ) {
        let hits = matching(&input, &table);
        match resolve(&input, &table) {
            Ok(entry) => {
                prop_assert_eq!(hits.len(), 1);
                prop_assert_eq!(&entry.name, &hits[0]);
            }
            Err(LookupError::Unrecognized { input: reported }) => {
                prop_assert_eq!(hits.len(), 0);
                prop_assert_eq!(reported, input);
            }
            Err(LookupError::Ambiguous { first, second, .. }) => {
                prop_assert!(hits.len() >= 2);
                // The first two conflicting candidates, in table order.
                prop_assert_eq!(&first, &hits[0]);
                prop_assert_eq!(&second, &hits[1]);
            }
        }
    }

    #[test]
    fn a_name_drawn_from_the_table_is_never_unrecognized(
        table in table(),
        pick in any::<Index>(),
    ) {
        prop_assume!(!table.is_empty());
        let chosen = table[pick.index(table.len())].name.clone();
        let outcome = resolve(&chosen, &table);
        prop_assert!(
            !matches!(outcome, Err(LookupError::Unrecognized { .. })),
            "a name drawn from the table was reported as unrecognized",
        );

        // Classification is deterministic and call-order independent.
        let again = resolve(&chosen, &table);
        prop_assert_eq!(outcome.cloned(), again.cloned());
    }

    #[test]
    fn longer_inputs_never_gain_candidates(
        input in token(),
        table in table(),
    ) {
        // Extending the typed prefix can only narrow the candidate set.
        let extended = format!("{input}x");
        let before = matching(&input, &table);
        let after = matching(&extended, &table);
        prop_assert!(after.iter().all(|n| before.contains(n)));
    }
}
