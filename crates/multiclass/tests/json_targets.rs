//! Targets described as JSON documents.

use multiclass::{type_of_target, unique_labels, Label, TargetError, TargetType, Value};
use rstest::rstest;

fn parse(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

#[rstest]
#[case("[0.1, 0.6]", TargetType::Continuous)]
#[case("[1, -1, -1, 1]", TargetType::Binary)]
#[case(r#"["a", "b", "a"]"#, TargetType::Binary)]
#[case("[1, 0, 2]", TargetType::Multiclass)]
#[case("[1.0, 0.0, 2.0]", TargetType::Multiclass)]
#[case(r#"[["a", "b"], ["c"], []]"#, TargetType::MultilabelSequences)]
#[case("[[]]", TargetType::MultilabelSequences)]
#[case("[1, [2, 3]]", TargetType::Unknown)]
#[case("[1, null]", TargetType::Unknown)]
#[case("[]", TargetType::Binary)]
fn classifies_json(#[case] json: &str, #[case] expected: TargetType) {
    assert_eq!(type_of_target(&parse(json)), Ok(expected));
}

#[rstest]
#[case("3")]
#[case(r#""abc""#)]
#[case("null")]
#[case(r#"{"y": [1, 2]}"#)]
fn rejects_non_array_json(#[case] json: &str) {
    assert!(matches!(
        type_of_target(&parse(json)),
        Err(TargetError::InvalidInput { .. })
    ));
}

#[test]
fn labels_serialize_back_to_json() {
    let a = parse("[[1, 2], [3]]");
    let b = parse("[[1, 2], []]");
    let labels = unique_labels([&a, &b]).unwrap();
    assert_eq!(serde_json::to_string(&labels).unwrap(), "[1,2,3]");
    assert_eq!(labels.position(&Label::from(2)), Some(1));
}

#[test]
fn target_type_round_trips_through_json() {
    let t = type_of_target(&parse("[[1, 2], [3, 4]]")).unwrap();
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, r#""multilabel-sequences""#);
    assert_eq!(serde_json::from_str::<TargetType>(&json).unwrap(), t);
}
