use std::str::FromStr;

use aivi_assert::{expect, BigInt, Expectations, FailureKind, Value};
use proptest::prelude::*;

fn decimal() -> impl Strategy<Value = String> {
    "-?[0-9]{1,40}"
}

fn parse(text: &str) -> BigInt {
    BigInt::from_str(text).expect("strategy yields decimal integers")
}

/// Same value, different spelling: extra leading zeros and an optional `+`.
fn respell(value: &BigInt, zeros: usize, plus: bool) -> String {
    let digits = value.magnitude().to_string();
    let sign = match (value.sign(), plus) {
        (num_bigint::Sign::Minus, _) => "-",
        (_, true) => "+",
        _ => "",
    };
    format!("{sign}{}{digits}", "0".repeat(zeros))
}

proptest! {
    #[test]
    fn equal_holds_iff_values_match(a in decimal(), b in decimal()) {
        let same = parse(&a) == parse(&b);
        prop_assert_eq!(expect(a.as_str()).bignumber().equal(b.as_str()).is_ok(), same);
        prop_assert_eq!(expect(a.as_str()).bignumber().not().equal(b.as_str()).is_ok(), !same);
    }

    #[test]
    fn equal_ignores_spelling(a in decimal(), zeros in 0usize..5, plus in any::<bool>()) {
        let value = parse(&a);
        let respelled = respell(&value, zeros, plus);
        prop_assert!(expect(a.as_str()).bignumber().equal(respelled.as_str()).is_ok());
        prop_assert!(expect(Value::from(value)).bignumber().equal(respelled).is_ok());
    }

    #[test]
    fn sign_and_zero_are_exclusive(a in decimal()) {
        let negative = expect(a.as_str()).bignumber().negative().is_ok();
        let non_negative = expect(a.as_str()).bignumber().not().negative().is_ok();
        prop_assert!(negative != non_negative);

        let zero = expect(a.as_str()).bignumber().zero().is_ok();
        let non_zero = expect(a.as_str()).bignumber().not().zero().is_ok();
        prop_assert!(zero != non_zero);
        prop_assert!(!(zero && negative));
    }

    #[test]
    fn ordering_verbs_agree(a in decimal(), b in decimal()) {
        let above = expect(a.as_str()).bignumber().above(b.as_str()).is_ok();
        let below_flipped = expect(b.as_str()).bignumber().below(a.as_str()).is_ok();
        prop_assert_eq!(above, below_flipped);

        let least = expect(a.as_str()).bignumber().least(b.as_str()).is_ok();
        let below = expect(a.as_str()).bignumber().below(b.as_str()).is_ok();
        prop_assert_eq!(least, !below);

        let most = expect(a.as_str()).bignumber().most(b.as_str()).is_ok();
        prop_assert_eq!(most, !above);
    }

    #[test]
    fn close_to_matches_the_interval(a in decimal(), e in decimal(), d in "[0-9]{1,20}") {
        let (actual, expected, delta) = (parse(&a), parse(&e), parse(&d));
        let inside = actual >= &expected - &delta && actual <= &expected + &delta;
        prop_assert_eq!(
            expect(a.as_str()).bignumber().close_to(e.as_str(), d.as_str()).is_ok(),
            inside
        );
    }

    #[test]
    fn close_to_bounds_pass(e in decimal(), d in "[0-9]{1,20}") {
        let (expected, delta) = (parse(&e), parse(&d));
        let low = (&expected - &delta).to_string();
        let high = (&expected + &delta).to_string();
        prop_assert!(expect(low).bignumber().close_to(e.as_str(), d.as_str()).is_ok());
        prop_assert!(expect(high).bignumber().close_to(e.as_str(), d.as_str()).is_ok());
    }

    #[test]
    fn native_numbers_never_convert(n in any::<i64>(), a in decimal()) {
        let err = expect(n).bignumber().equal(a.as_str()).unwrap_err();
        prop_assert_eq!(err.kind, FailureKind::Conversion);
        let err = expect(a.as_str()).bignumber().not().equal(n).unwrap_err();
        prop_assert_eq!(err.kind, FailureKind::Conversion);
    }

    #[test]
    fn unmarked_chains_match_the_host(a in any::<i64>(), b in any::<i64>()) {
        let host = Expectations::host();
        let outcomes = |lib: &Expectations| {
            [
                lib.that(a).equal(b).map(|_| ()),
                lib.that(a).above(b).map(|_| ()),
                lib.that(a).least(b).map(|_| ()),
                lib.that(a).below(b).map(|_| ()),
                lib.that(a).most(b).map(|_| ()),
                lib.that(a).close_to(b, 3).map(|_| ()),
                lib.that(a).negative().map(|_| ()),
                lib.that(a).zero().map(|_| ()),
                lib.that(a).not().equal(b).map(|_| ()),
            ]
        };
        prop_assert_eq!(outcomes(&host), outcomes(&Expectations::default()));
    }
}

#[test]
fn deep_equal_over_aggregates_with_differently_spelled_numbers() {
    let left = Value::record([
        ("name", Value::Bool(true)),
        ("amounts", Value::list([Value::from("5"), Value::from("-12")])),
        ("total", Value::from(BigInt::from(-7))),
    ]);
    let right = Value::record([
        ("name", Value::Bool(true)),
        ("amounts", Value::list([Value::from("05"), Value::from(BigInt::from(-12))])),
        ("total", Value::from("-0007")),
    ]);
    assert!(expect(left.clone()).bignumber().deep().equal(right.clone()).is_ok());
    // Without the marker the texts differ and the host says no.
    assert!(expect(left).deep().equal(right).is_err());
}

#[test]
fn deep_equal_still_checks_structure() {
    let left = Value::record([("amounts", Value::list([Value::from("5")]))]);
    let right = Value::record([("totals", Value::list([Value::from("5")]))]);
    let err = expect(left).bignumber().deep().equal(right).unwrap_err();
    assert_eq!(err.kind, FailureKind::Comparison);
}
