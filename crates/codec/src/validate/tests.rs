use super::*;
use crate::element::Element;
use crate::value::Opaque;

fn cyclic_object() -> Value {
    let cycle = Value::empty_object();
    if let Value::Object(map) = &cycle {
        map.borrow_mut().insert("x".to_string(), cycle.clone());
    }
    cycle
}

#[test]
fn classifies_values_like_json() {
    let plain = Value::object([("a", Value::from(1)), ("b", Value::from(2))]);
    let cases: Vec<(Value, bool)> = vec![
        (Value::from("hi"), true),
        (Value::Number(f64::NAN), false),
        (Value::from(true), true),
        (Value::from(1.7e12), true),
        (
            Value::array([Value::from(1), Value::from(2), Value::from("a")]),
            true,
        ),
        (
            Value::array([Value::opaque(Opaque::date("2022-01-01T00:00:00.000Z"))]),
            false,
        ),
        (Value::object([("a", Value::from(1.7))]), true),
        (
            Value::object([(
                "a",
                Value::array([
                    Value::from(0),
                    Value::object([(
                        "b",
                        Value::object([(
                            "c",
                            Value::object([(
                                "d",
                                Value::array([Value::from(1), Value::Undefined]),
                            )]),
                        )]),
                    )]),
                ]),
            )]),
            false,
        ),
        (
            Value::object([(
                "a",
                Value::array([Value::object([
                    ("b", Value::from(12)),
                    ("c.d", Value::from(false)),
                ])]),
            )]),
            true,
        ),
        (Value::opaque(Opaque::function("anonymous")), false),
        (cyclic_object(), false),
        // the same object three times is shared, not cyclic
        (
            Value::array([plain.clone(), plain.clone(), plain.clone()]),
            true,
        ),
        (Value::Null, true),
        (Value::array([]), true),
        (Value::empty_object(), true),
    ];
    for (value, expected) in cases {
        assert_eq!(is_json(&value), expected, "for {}", value.describe());
    }
}

#[test]
fn reports_path_and_reason() {
    let value = Value::object([(
        "a",
        Value::array([
            Value::from(0),
            Value::object([("b", Value::array([Value::from(1), Value::Undefined]))]),
        ]),
    )]);
    let err = check(&value).unwrap_err();
    assert_eq!(err.reason, InvalidReason::Undefined);
    assert_eq!(err.path.to_string(), "obj.a.1.b.1");
    assert_eq!(
        err.to_string(),
        "obj.a.1.b.1, type undefined = undefined is undefined"
    );
}

#[test]
fn non_finite_numbers_are_rejected_anywhere() {
    for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let value = Value::array([Value::object([("n", Value::Number(n))])]);
        let err = check(&value).unwrap_err();
        assert_eq!(err.reason, InvalidReason::NonFinite);
        assert_eq!(err.path.to_string(), "obj.0.n");
    }
    let err = check(&Value::Number(f64::INFINITY)).unwrap_err();
    assert_eq!(err.to_string(), "obj, type number = Infinity is infinite or NaN");
}

#[test]
fn self_reference_forms_a_cycle() {
    let err = check(&cyclic_object()).unwrap_err();
    assert_eq!(err.reason, InvalidReason::Cycle);
    assert_eq!(err.path.to_string(), "obj.x");
    assert_eq!(err.reason.message(), "forms a cycle");
}

#[test]
fn indirect_cycle_through_array_is_found() {
    let outer = Value::array([]);
    let inner = Value::object([("back", outer.clone())]);
    if let Value::Array(items) = &outer {
        items.borrow_mut().push(Value::from(1));
        items.borrow_mut().push(inner);
    }
    let err = check(&outer).unwrap_err();
    assert_eq!(err.reason, InvalidReason::Cycle);
    assert_eq!(err.path.to_string(), "obj.1.back");
}

#[test]
fn shared_subtree_at_different_depths_is_not_a_cycle() {
    let leaf = Value::object([("v", Value::from(1))]);
    let value = Value::object([
        ("first", leaf.clone()),
        ("nested", Value::array([Value::array([leaf.clone()]), leaf])),
    ]);
    assert!(check(&value).is_ok());
}

#[test]
fn non_plain_values_are_rejected() {
    let value = Value::object([("blah", Value::opaque(Opaque::instance("Blah")))]);
    let err = check(&value).unwrap_err();
    assert_eq!(err.reason, InvalidReason::NotPlainObject);
    assert_eq!(
        err.to_string(),
        "obj.blah, type Blah = Blah {} is not a plain object"
    );

    let element = Value::from(Element::host("div").build());
    assert_eq!(
        check(&element).unwrap_err().reason,
        InvalidReason::NotPlainObject
    );
}

#[test]
fn first_failure_wins_and_later_siblings_are_not_visited() {
    let value = Value::array([Value::Number(f64::NAN), Value::Undefined]);
    let err = check(&value).unwrap_err();
    assert_eq!(err.reason, InvalidReason::NonFinite);
    assert_eq!(err.path.to_string(), "obj.0");
}
