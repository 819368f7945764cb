//! Property-based tests for envspec using proptest.
//!
//! These check that binding round-trips every representable value, that the
//! boolean styles and fallback policy hold for arbitrary text, and that
//! error accumulation obeys the semigroup laws.

use proptest::prelude::*;

use envspec::prelude::*;
use envspec::{group_by_origin, Semigroup};

// ============================================================================
// Records under test
// ============================================================================

#[derive(Debug, Default, DeriveSpec)]
struct Numbers {
    #[spec(key = "SIGNED")]
    signed: i64,

    #[spec(key = "UNSIGNED")]
    unsigned: u64,

    #[spec(key = "FLOAT")]
    float: f64,
}

#[derive(Debug, Default, DeriveSpec)]
struct Text {
    #[spec(key = "TEXT", default = "fallback")]
    text: String,
}

#[derive(Debug, Default, DeriveSpec)]
struct Switch {
    #[spec(key = "SWITCH")]
    on: bool,
}

#[derive(Debug, Default, DeriveSpec)]
struct FlagNumbers {
    signed: i64,
    unsigned: u64,
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Non-empty text without NUL, as an environment value could hold.
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _./:@=-]{1,40}"
}

fn arb_error() -> impl Strategy<Value = BindError> {
    prop_oneof![
        Just(BindError::MissingKey { field: "a" }),
        "[A-Z_]{1,10}".prop_map(|key| BindError::RequiredValueMissing { key, field: "b" }),
        ("[A-Z_]{1,10}", "[a-z]{0,8}").prop_map(|(key, raw)| BindError::Coercion {
            field: "c",
            origin: Origin::env(key),
            raw,
            expected: "int",
            message: "invalid digit found in string".to_string(),
        }),
        "[a-z-]{1,10}".prop_map(|name| BindError::Hook {
            field: "d",
            origin: Origin::flag(name),
            message: "rejected".to_string(),
        }),
    ]
}

fn arb_errors() -> impl Strategy<Value = BindErrors> {
    prop::collection::vec(arb_error(), 1..6)
        .prop_map(|errors| BindErrors::from_vec(errors).expect("non-empty"))
}

// ============================================================================
// Round trips
// ============================================================================

proptest! {
    #[test]
    fn prop_numbers_round_trip(
        signed in any::<i64>(),
        unsigned in any::<u64>(),
        float in any::<f64>().prop_filter("finite", |f| f.is_finite()),
    ) {
        let env = MockEnv::new()
            .with_env("SIGNED", signed.to_string())
            .with_env("UNSIGNED", unsigned.to_string())
            .with_env("FLOAT", float.to_string());
        let mut numbers = Numbers::default();

        Binder::new().bind_with_env(&mut numbers, &env).unwrap();

        prop_assert_eq!(numbers.signed, signed);
        prop_assert_eq!(numbers.unsigned, unsigned);
        prop_assert_eq!(numbers.float, float);
    }

    #[test]
    fn prop_text_round_trip(text in arb_text()) {
        let env = MockEnv::new().with_env("TEXT", text.clone());
        let mut spec = Text::default();

        Binder::new().bind_with_env(&mut spec, &env).unwrap();

        prop_assert_eq!(spec.text, text);
    }

    #[test]
    fn prop_flag_numbers_round_trip(signed in any::<i64>(), unsigned in any::<u64>()) {
        let env = MockEnv::new().with_args([
            "app".to_string(),
            format!("--signed={signed}"),
            "--unsigned".to_string(),
            unsigned.to_string(),
        ]);
        let mut numbers = FlagNumbers::default();

        Binder::new().bind_flags_with_env(&mut numbers, &env).unwrap();

        prop_assert_eq!(numbers.signed, signed);
        prop_assert_eq!(numbers.unsigned, unsigned);
    }
}

// ============================================================================
// Fallback and boolean policy
// ============================================================================

proptest! {
    #[test]
    fn prop_default_only_when_unset_or_empty(
        text in proptest::option::of(arb_text()),
        empty in any::<bool>(),
    ) {
        let env = match (&text, empty) {
            (Some(text), _) => MockEnv::new().with_env("TEXT", text.clone()),
            (None, true) => MockEnv::new().with_env("TEXT", ""),
            (None, false) => MockEnv::new(),
        };
        let mut spec = Text::default();

        Binder::new().bind_with_env(&mut spec, &env).unwrap();

        prop_assert_eq!(spec.text, text.unwrap_or_else(|| "fallback".to_string()));
    }

    #[test]
    fn prop_presence_reads_any_text_as_true(text in arb_text()) {
        let env = MockEnv::new().with_env("SWITCH", text);
        let mut switch = Switch::default();

        Binder::new().bind_with_env(&mut switch, &env).unwrap();

        prop_assert!(switch.on);
    }

    #[test]
    fn prop_strict_accepts_only_one_or_zero(text in arb_text()) {
        let env = MockEnv::new().with_env("SWITCH", text.clone());
        let mut switch = Switch::default();

        let result = Binder::new()
            .booleans(BoolStyle::Strict)
            .bind_with_env(&mut switch, &env);

        match text.as_str() {
            "1" => prop_assert!(result.is_ok() && switch.on),
            "0" => prop_assert!(result.is_ok() && !switch.on),
            _ => {
                let is_bool_error = matches!(
                    result,
                    Err(BindError::Coercion { expected: "bool", .. })
                );
                prop_assert!(is_bool_error);
            }
        }
    }

    #[test]
    fn prop_check_agrees_with_bind(signed in "-?[0-9a-z]{1,6}") {
        let env = MockEnv::new()
            .with_env("SIGNED", signed.clone())
            .with_env("UNSIGNED", "1")
            .with_env("FLOAT", "1.0");

        let checked = Binder::new().check_with_env(&mut Numbers::default(), &env);
        let bound = Binder::new().bind_with_env(&mut Numbers::default(), &env);

        prop_assert_eq!(checked.is_success(), bound.is_ok());
    }
}

// ============================================================================
// Error accumulation laws
// ============================================================================

proptest! {
    #[test]
    fn prop_combine_adds_lengths(a in arb_errors(), b in arb_errors()) {
        let expected = a.len() + b.len();
        prop_assert_eq!(a.combine(b).len(), expected);
    }

    #[test]
    fn prop_combine_is_associative(a in arb_errors(), b in arb_errors(), c in arb_errors()) {
        let left: Vec<_> = a.clone().combine(b.clone()).combine(c.clone()).into_iter().collect();
        let right: Vec<_> = a.combine(b.combine(c)).into_iter().collect();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_combine_keeps_first(a in arb_errors(), b in arb_errors()) {
        let first = a.first().clone();
        let combined = a.combine(b);
        prop_assert_eq!(combined.first(), &first);
    }

    #[test]
    fn prop_grouping_preserves_count(errors in arb_errors()) {
        let grouped: usize = group_by_origin(&errors).values().map(Vec::len).sum();
        prop_assert_eq!(grouped, errors.len());
    }
}
