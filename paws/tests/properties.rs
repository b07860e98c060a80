use paws::validate::{is_bool_literal, parse_bool_literal};
use paws::{ErrorKind, FlagDefinition, Registry};
use proptest::prelude::*;

const LITERALS: [&str; 10] = ["t", "f", "y", "n", "1", "0", "yes", "no", "true", "false"];

fn mixed_case(word: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
        word.chars()
            .zip(upper)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

fn typed_registry() -> Registry {
    let mut registry = Registry::new();
    registry.add_flags([
        FlagDefinition::string("name", &[]),
        FlagDefinition::int("int", &[]),
        FlagDefinition::uint("uint", &[]),
        FlagDefinition::float("float", &[]),
    ]);
    registry
}

fn group_registry() -> Registry {
    let mut registry = Registry::new();
    registry.add_flags([
        FlagDefinition::bool("alpha", &["a"]),
        FlagDefinition::bool("bravo", &["b"]),
        FlagDefinition::bool("charlie", &["c"]),
        FlagDefinition::string("sierra", &["s"]),
    ]);
    registry
}

proptest! {
    #[test]
    fn bool_grammar_accepts_any_case(
        literal in prop::sample::select(LITERALS.to_vec()).prop_flat_map(mixed_case)
    ) {
        let expected = matches!(literal.to_ascii_lowercase().as_str(), "t" | "y" | "1" | "yes" | "true");
        prop_assert_eq!(parse_bool_literal(&literal), Some(expected));
    }

    #[test]
    fn bool_grammar_rejects_everything_else(value in any::<String>()) {
        let lowered = value.to_ascii_lowercase();
        prop_assert_eq!(is_bool_literal(&value), LITERALS.contains(&lowered.as_str()));
    }

    #[test]
    fn equals_and_next_token_agree(value in "[a-zA-Z0-9_.][a-zA-Z0-9_.=-]{0,12}") {
        let registry = typed_registry();
        let joined = format!("--name={value}");

        let left = registry.parse(&[joined.as_str()]).unwrap();
        let right = registry.parse(&["--name", value.as_str()]).unwrap();

        prop_assert_eq!(left.string("name"), right.string("name"));
        prop_assert_eq!(left.string("name"), value.as_str());
        prop_assert!(right.positional().is_empty());
    }

    #[test]
    fn non_negative_ints_agree_in_both_forms(value in 0..=i64::MAX) {
        let registry = typed_registry();
        let value = value.to_string();
        let joined = format!("--int={value}");

        let left = registry.parse(&[joined.as_str()]).unwrap();
        let right = registry.parse(&["--int", value.as_str()]).unwrap();

        prop_assert_eq!(left.int("int"), right.int("int"));
    }

    #[test]
    fn int_round_trip(value in any::<i64>()) {
        let registry = typed_registry();
        let arg = format!("--int={value}");

        prop_assert_eq!(registry.parse(&[arg.as_str()]).unwrap().int("int"), value);
    }

    #[test]
    fn uint_round_trip(value in any::<u64>()) {
        let registry = typed_registry();
        let value_arg = value.to_string();

        let result = registry.parse(&["--uint", value_arg.as_str()]).unwrap();
        prop_assert_eq!(result.uint("uint"), value);
    }

    #[test]
    fn float_round_trip(value in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        let registry = typed_registry();
        let arg = format!("--float={value}");

        prop_assert_eq!(registry.parse(&[arg.as_str()]).unwrap().float("float"), value);
    }

    #[test]
    fn groups_are_all_or_nothing(group in "[abcsx]{2,5}") {
        let registry = group_registry();
        let arg = format!("-{group}");
        let all_bool = group.chars().all(|c| "abc".contains(c));

        match registry.parse(&[arg.as_str()]) {
            Ok(result) => {
                prop_assert!(all_bool);
                for (alias, name) in [('a', "alpha"), ('b', "bravo"), ('c', "charlie")] {
                    prop_assert_eq!(result.bool(name), group.contains(alias));
                }
            }
            Err(err) => {
                prop_assert!(!all_bool);
                prop_assert!(matches!(
                    err.kind(),
                    ErrorKind::UnknownFlag | ErrorKind::GroupedNonBooleanFlag
                ));
            }
        }
    }
}
