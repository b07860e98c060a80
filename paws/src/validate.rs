/*!
Per-type value checking, and the boolean literal grammar shared by the parser
and the [`ParseResult`][crate::ParseResult] accessors.
 */

use crate::errors::{InvalidValue, ParseError};
use crate::flag::{FlagDefinition, FlagRange, FlagType};

/**
Parse a boolean literal. Accepts `t`, `f`, `y`, `n`, `1`, `0`, `yes`, `no`,
`true`, and `false`, ignoring ASCII case. Anything else is `None`.
*/
#[must_use]
pub fn parse_bool_literal(value: &str) -> Option<bool> {
    const TRUE: [&str; 5] = ["t", "y", "1", "yes", "true"];
    const FALSE: [&str; 5] = ["f", "n", "0", "no", "false"];

    let matches = |literals: [&str; 5]| {
        literals
            .iter()
            .any(|literal| value.eq_ignore_ascii_case(literal))
    };

    if matches(TRUE) {
        Some(true)
    } else if matches(FALSE) {
        Some(false)
    } else {
        None
    }
}

#[inline]
#[must_use]
pub fn is_bool_literal(value: &str) -> bool {
    parse_bool_literal(value).is_some()
}

/// Coerce a stored value to a bool. Non-literals are `false`.
#[inline]
#[must_use]
pub fn coerce_bool(value: &str) -> bool {
    parse_bool_literal(value).unwrap_or(false)
}

fn in_range(
    range: Option<FlagRange>,
    contains: impl FnOnce(FlagRange) -> bool,
) -> Result<(), InvalidValue> {
    match range {
        Some(range) if !contains(range) => Err(InvalidValue::OutOfRange {
            min: range.min,
            max: range.max,
        }),
        _ => Ok(()),
    }
}

/// Check `value` against the flag's type and constraints.
pub fn check(flag: &FlagDefinition, value: &str) -> Result<(), InvalidValue> {
    match flag.kind() {
        FlagType::Bool => parse_bool_literal(value)
            .map(drop)
            .ok_or(InvalidValue::NotBoolean),

        FlagType::String => match flag.choices() {
            [] => Ok(()),
            choices if choices.iter().any(|choice| choice == value) => Ok(()),
            choices => Err(InvalidValue::NotAChoice {
                choices: choices.to_vec(),
            }),
        },

        FlagType::Int => {
            let parsed: i64 = value.parse().map_err(InvalidValue::Int)?;
            in_range(flag.range(), |range| (range.min..=range.max).contains(&parsed))
        }

        FlagType::Uint => {
            // u64's FromStr allows a leading `+`
            if value.starts_with(['+', '-']) {
                return Err(InvalidValue::Signed);
            }

            let parsed: u64 = value.parse().map_err(InvalidValue::Int)?;

            match flag.range() {
                None => Ok(()),
                Some(FlagRange { min, max }) => {
                    let min = min.max(0);
                    let fits = u64::try_from(max)
                        .is_ok_and(|max| (min.unsigned_abs()..=max).contains(&parsed));

                    if fits {
                        Ok(())
                    } else {
                        Err(InvalidValue::OutOfRange { min, max })
                    }
                }
            }
        }

        FlagType::Float => {
            let parsed: f64 = value.parse().map_err(InvalidValue::Float)?;
            in_range(flag.range(), |range| {
                (range.min as f64..=range.max as f64).contains(&parsed)
            })
        }
    }
}

/// [`check`], with the error wrapped up for the parser
pub(crate) fn validate(flag: &FlagDefinition, value: &str) -> Result<(), ParseError> {
    check(flag, value).map_err(|reason| ParseError::InvalidFlagValue {
        flag: flag.name().to_owned(),
        value: value.to_owned(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::FlagOptions;

    fn ranged(kind: FlagType, min: i64, max: i64) -> FlagDefinition {
        FlagDefinition::new("n", kind, FlagOptions {
            range: Some(FlagRange::new(min, max)),
            ..FlagOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn bool_literals() {
        for value in ["t", "T", "y", "Y", "1", "yes", "YeS", "true", "TRUE"] {
            assert_eq!(parse_bool_literal(value), Some(true), "{value}");
        }

        for value in ["f", "F", "n", "N", "0", "no", "NO", "false", "False"] {
            assert_eq!(parse_bool_literal(value), Some(false), "{value}");
        }

        for value in ["", "2", "on", "off", "tru", "yess", "ye", " true", "nope"] {
            assert_eq!(parse_bool_literal(value), None, "{value}");
        }
    }

    #[test]
    fn coercion_defaults_to_false() {
        assert!(coerce_bool("Yes"));
        assert!(!coerce_bool("banana"));
        assert!(!coerce_bool(""));
    }

    #[test]
    fn string_choices_are_case_sensitive() {
        let flag = FlagDefinition::new("color", FlagType::String, FlagOptions {
            choices: vec!["red".to_owned(), "blue".to_owned()],
            ..FlagOptions::default()
        })
        .unwrap();

        assert_eq!(check(&flag, "red"), Ok(()));
        assert_eq!(
            check(&flag, "Red"),
            Err(InvalidValue::NotAChoice {
                choices: vec!["red".to_owned(), "blue".to_owned()]
            })
        );
        assert_eq!(check(&FlagDefinition::string("any", &[]), ""), Ok(()));
    }

    #[test]
    fn int_range_is_inclusive() {
        let flag = ranged(FlagType::Int, -5, 10);

        assert_eq!(check(&flag, "-5"), Ok(()));
        assert_eq!(check(&flag, "10"), Ok(()));
        assert_eq!(
            check(&flag, "11"),
            Err(InvalidValue::OutOfRange { min: -5, max: 10 })
        );
        assert!(matches!(check(&flag, "ten"), Err(InvalidValue::Int(_))));
    }

    #[test]
    fn zero_range_is_enforced() {
        let flag = ranged(FlagType::Int, 0, 0);

        assert_eq!(check(&flag, "0"), Ok(()));
        assert!(check(&flag, "1").is_err());
    }

    #[test]
    fn uint_minimum_is_clamped() {
        let flag = ranged(FlagType::Uint, -10, 3);

        assert_eq!(check(&flag, "0"), Ok(()));
        assert_eq!(
            check(&flag, "4"),
            Err(InvalidValue::OutOfRange { min: 0, max: 3 })
        );
        assert_eq!(check(&flag, "-1"), Err(InvalidValue::Signed));
        assert_eq!(check(&flag, "+2"), Err(InvalidValue::Signed));
        assert!(matches!(check(&flag, "2+"), Err(InvalidValue::Int(_))));
        assert_eq!(check(&FlagDefinition::uint("big", &[]), "18446744073709551615"), Ok(()));
    }

    #[test]
    fn uint_with_negative_maximum_accepts_nothing() {
        let flag = ranged(FlagType::Uint, -10, -1);

        assert_eq!(
            check(&flag, "0"),
            Err(InvalidValue::OutOfRange { min: 0, max: -1 })
        );
    }

    #[test]
    fn float_range_uses_integer_bounds() {
        let flag = ranged(FlagType::Float, 0, 1);

        assert_eq!(check(&flag, "0.5"), Ok(()));
        assert_eq!(check(&flag, "1.0"), Ok(()));
        assert!(check(&flag, "1.0001").is_err());
        assert!(check(&flag, "NaN").is_err());
        assert!(matches!(check(&flag, "half"), Err(InvalidValue::Float(_))));
    }

    #[test]
    fn bools_must_be_literals() {
        let flag = FlagDefinition::bool("verbose", &[]);

        assert_eq!(check(&flag, "no"), Ok(()));
        assert_eq!(check(&flag, "maybe"), Err(InvalidValue::NotBoolean));
    }
}
