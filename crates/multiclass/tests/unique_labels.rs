//! Label unification across one or more targets.

use multiclass::{unique_labels, unique_labels_of, Label, LabelKind, TargetError, TargetType, Value};
use ndarray::{array, Array2};
use rstest::rstest;

fn ints(values: &[i64]) -> Vec<Label> {
    values.iter().copied().map(Label::from).collect()
}

fn strs(values: &[&str]) -> Vec<Label> {
    values.iter().copied().map(Label::from).collect()
}

// =============================================================================
// Merging
// =============================================================================

#[rstest]
#[case::single(vec![Value::from(vec![3, 5, 5, 5, 7, 7])], ints(&[3, 5, 7]))]
#[case::overlapping(
    vec![Value::from(vec![1, 2, 3, 4]), Value::from(vec![2, 2, 3, 4])],
    ints(&[1, 2, 3, 4])
)]
#[case::interleaved(
    vec![Value::from(vec![1, 2, 10]), Value::from(vec![5, 11])],
    ints(&[1, 2, 5, 10, 11])
)]
#[case::binary_with_multiclass(
    vec![Value::from(vec![0, 1]), Value::from(vec![0, 1, 2])],
    ints(&[0, 1, 2])
)]
#[case::indicators(
    vec![
        Value::from(array![[0.0, 1.0], [1.0, 1.0]]),
        Value::from(Array2::<f64>::zeros((2, 2))),
    ],
    ints(&[0, 1])
)]
#[case::sequences(
    vec![
        Value::from(vec![vec![1, 2], vec![3]]),
        Value::from(vec![vec![1, 2], vec![]]),
    ],
    ints(&[1, 2, 3])
)]
#[case::column_vector(vec![Value::from(array![[2], [0], [2]])], ints(&[0, 2]))]
#[case::arrays_and_lists(
    vec![Value::from(array![4u32, 9]), Value::from(vec![1, 4, 7])],
    ints(&[1, 4, 7, 9])
)]
fn merges_numeric_labels(#[case] ys: Vec<Value>, #[case] expected: Vec<Label>) {
    let labels = unique_labels(&ys).unwrap();
    assert_eq!(labels.as_slice(), expected.as_slice());
}

#[test]
fn merges_string_labels() {
    let a = Value::from(vec!["c", "a", "c"]);
    let b = Value::from(vec!["b"]);
    let labels = unique_labels([&a, &b]).unwrap();
    assert_eq!(labels.as_slice(), strs(&["a", "b", "c"]).as_slice());
    assert_eq!(labels.kind(), Some(LabelKind::String));
}

#[test]
fn merges_string_sequences() {
    let y = Value::from(vec![vec!["dog"], vec!["cat", "dog"], vec![]]);
    let labels = unique_labels_of(&y).unwrap();
    assert_eq!(labels.as_slice(), strs(&["cat", "dog"]).as_slice());
}

#[test]
fn integer_and_float_labels_are_one_value() {
    let a = Value::from(vec![1.0, 2.0, 3.0]);
    let b = Value::from(vec![3, 4]);
    let labels = unique_labels([&a, &b]).unwrap();
    assert_eq!(labels.len(), 4);
    assert_eq!(labels.position(&Label::from(3)), Some(2));
}

#[test]
fn indicator_labels_are_column_indices() {
    let y = Value::from(array![[0, 0, 1, 0], [1, 0, 0, 0]]);
    let labels = unique_labels_of(&y).unwrap();
    assert_eq!(labels.as_slice(), ints(&[0, 1, 2, 3]).as_slice());
}

#[test]
fn positions_index_a_confusion_matrix() {
    let y_true = Value::from(vec!["spam", "ham", "eggs"]);
    let y_pred = Value::from(vec!["ham", "ham", "spam"]);
    let labels = unique_labels([&y_true, &y_pred]).unwrap();
    let n = labels.len();
    let mut matrix = Array2::<usize>::zeros((n, n));
    for (t, p) in ["spam", "ham", "eggs"].iter().zip(["ham", "ham", "spam"]) {
        let i = labels.position(&Label::from(*t)).unwrap();
        let j = labels.position(&Label::from(p)).unwrap();
        matrix[[i, j]] += 1;
    }
    // eggs, ham, spam
    assert_eq!(matrix, array![[0usize, 0, 1], [0, 1, 0], [0, 1, 0]]);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn no_targets() {
    let ys: Vec<Value> = Vec::new();
    assert_eq!(unique_labels(&ys), Err(TargetError::EmptyInput));
}

#[test]
fn multiclass_with_indicator_is_mixed() {
    let a = Value::from(vec![1, 2, 3]);
    let b = Value::from(array![[0, 1], [1, 0]]);
    assert_eq!(
        unique_labels([&a, &b]),
        Err(TargetError::MixedTypes {
            types: vec![TargetType::Multiclass, TargetType::MultilabelIndicator]
        })
    );
}

#[test]
fn sequences_with_single_label_is_mixed() {
    let a = Value::from(vec![1, 0]);
    let b = Value::from(vec![vec![1], vec![0, 2]]);
    assert!(matches!(
        unique_labels([&a, &b]),
        Err(TargetError::MixedTypes { .. })
    ));
}

#[test]
fn indicators_of_different_widths() {
    let a = Value::from(array![[0, 1], [1, 0]]);
    let b = Value::from(array![[0, 1, 0], [1, 0, 1]]);
    assert_eq!(
        unique_labels([&a, &b]),
        Err(TargetError::InconsistentShape { n_columns: vec![2, 3] })
    );
}

#[rstest]
#[case::continuous(Value::from(vec![0.1, 0.6]), TargetType::Continuous)]
#[case::continuous_multioutput(
    Value::from(array![[0.1, 0.6], [0.2, 0.3]]),
    TargetType::ContinuousMultioutput
)]
#[case::multiclass_multioutput(Value::from(array![[1, 2], [3, 1]]), TargetType::MulticlassMultioutput)]
#[case::unknown(Value::from(ndarray::Array3::<i64>::zeros((1, 2, 2))), TargetType::Unknown)]
fn unsupported_types(#[case] y: Value, #[case] target_type: TargetType) {
    assert_eq!(
        unique_labels_of(&y),
        Err(TargetError::UnsupportedType { target_type })
    );
}

#[test]
fn strings_with_numbers() {
    let a = Value::from(vec!["a", "b"]);
    let b = Value::from(vec![1, 2]);
    assert_eq!(unique_labels([&a, &b]), Err(TargetError::MixedLabelKinds));
}

#[test]
fn mixed_kinds_within_one_target() {
    // Classified through a string array, but the raw labels keep their kinds.
    let y = Value::Seq(vec![Value::from(1), Value::from("a")]);
    assert_eq!(unique_labels_of(&y), Err(TargetError::MixedLabelKinds));
}

#[test]
fn invalid_input_propagates() {
    let a = Value::from(vec![1, 2]);
    let b = Value::from("12");
    assert!(matches!(
        unique_labels([&a, &b]),
        Err(TargetError::InvalidInput { .. })
    ));
}
