//! Structural format tests for multilabel targets.
//!
//! These predicates look only at shape, element kind and nesting. They
//! never fail: input that does not fit a format is simply not in it.

use crate::value::{ElementKind, TargetArray, Value};

/// Is `y` a sequence whose samples are themselves sequences of labels?
///
/// True iff the first element exists, is a plain sequence, and is neither
/// an array nor a string. An empty `y` is not a sequence of sequences.
///
/// ```
/// use multiclass::{is_sequence_of_sequences, Value};
/// use ndarray::array;
///
/// assert!(!is_sequence_of_sequences(&Value::from(vec![0, 1, 0, 1])));
/// assert!(is_sequence_of_sequences(&Value::from(vec![vec![1], vec![0, 2], vec![]])));
/// assert!(!is_sequence_of_sequences(&Value::from(array![[1, 0], [0, 0]])));
/// ```
pub fn is_sequence_of_sequences(y: &Value) -> bool {
    match y {
        Value::Seq(items) => items.first().is_some_and(Value::is_sequence),
        // Only 1-D object arrays yield non-array elements.
        Value::Array(TargetArray::Object(a)) if a.ndim() == 1 => {
            a.iter().next().is_some_and(Value::is_sequence)
        }
        _ => false,
    }
}

/// Is `y` a label indicator matrix?
///
/// Requires a 2-D array with at least two columns holding at most two
/// distinct values, which must be of an integral kind or be floats equal
/// to their own truncation. A single column is a column vector of labels,
/// never an indicator matrix.
///
/// ```
/// use multiclass::{is_label_indicator_matrix, Value};
/// use ndarray::array;
///
/// assert!(is_label_indicator_matrix(&Value::from(array![[1, 0], [0, 0]])));
/// assert!(is_label_indicator_matrix(&Value::from(array![[1, 0, 0]])));
/// assert!(!is_label_indicator_matrix(&Value::from(array![[1], [0], [0]])));
/// assert!(!is_label_indicator_matrix(&Value::from(vec![0, 1, 0, 1])));
/// ```
pub fn is_label_indicator_matrix(y: &Value) -> bool {
    let Value::Array(array) = y else {
        return false;
    };
    if !array.n_columns().is_some_and(|cols| cols > 1) {
        return false;
    }
    let integral = match array.kind() {
        kind if kind.is_integral() => true,
        ElementKind::Float => array.is_integral(),
        _ => return false,
    };
    integral && array.distinct_count().is_some_and(|n| n <= 2)
}

/// Is `y` in either multilabel format?
///
/// ```
/// use multiclass::{is_multilabel, Value};
/// use ndarray::array;
///
/// assert!(!is_multilabel(&Value::from(vec![0, 1, 0, 1])));
/// assert!(is_multilabel(&Value::from(vec![vec![1], vec![0, 2], vec![]])));
/// assert!(is_multilabel(&Value::from(array![[1, 0], [0, 0]])));
/// assert!(!is_multilabel(&Value::from(array![[1], [0], [0]])));
/// ```
pub fn is_multilabel(y: &Value) -> bool {
    is_label_indicator_matrix(y) || is_sequence_of_sequences(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    fn object_array(items: Vec<Value>) -> Value {
        Value::from(Array1::from_vec(items))
    }

    #[test]
    fn tuples_and_object_arrays_are_sequences() {
        let y = object_array(vec![
            Value::from(vec![1]),
            Value::from(vec![0, 2]),
            Value::from(Vec::<i32>::new()),
        ]);
        assert!(is_sequence_of_sequences(&y));
        assert!(is_multilabel(&y));
    }

    #[test]
    fn single_empty_sample_is_a_sequence_of_sequences() {
        let y = Value::from(vec![Vec::<i32>::new()]);
        assert!(is_sequence_of_sequences(&y));
    }

    #[test]
    fn empty_input_is_not_a_sequence_of_sequences() {
        assert!(!is_sequence_of_sequences(&Value::Seq(vec![])));
        assert!(!is_sequence_of_sequences(&object_array(vec![])));
    }

    #[test]
    fn strings_and_arrays_are_not_samples() {
        assert!(!is_sequence_of_sequences(&Value::from(vec!["ab", "cd"])));
        assert!(!is_sequence_of_sequences(&Value::from("abc")));
        let y = Value::Seq(vec![Value::from(array![1, 2]), Value::from(array![3, 4])]);
        assert!(!is_sequence_of_sequences(&y));
    }

    #[test]
    fn nested_sequence_in_matrix_of_objects_is_not_a_sample() {
        let y = Value::from(Array2::from_elem((2, 2), Value::from(vec![1])));
        assert!(!is_sequence_of_sequences(&y));
    }

    #[test]
    fn indicator_accepts_integral_floats_and_bools() {
        assert!(is_label_indicator_matrix(&Value::from(array![[0.0, 1.0], [1.0, 1.0]])));
        assert!(is_label_indicator_matrix(&Value::from(array![[true, false], [false, false]])));
        assert!(is_label_indicator_matrix(&Value::from(array![[2u64, 5], [5, 2]])));
    }

    #[test]
    fn indicator_rejects_fractional_or_many_values() {
        assert!(!is_label_indicator_matrix(&Value::from(array![[0.0, 0.5], [0.5, 0.0]])));
        assert!(!is_label_indicator_matrix(&Value::from(array![[0, 1], [2, 1]])));
        assert!(!is_label_indicator_matrix(&Value::from(array![["a", "b"], ["b", "a"]])));
    }

    #[test]
    fn indicator_requires_an_array() {
        let y = Value::from(vec![vec![0, 1], vec![1, 1]]);
        assert!(!is_label_indicator_matrix(&y));
        assert!(is_sequence_of_sequences(&y));
    }

    #[test]
    fn indicator_rejects_other_dimensions() {
        assert!(!is_label_indicator_matrix(&Value::from(array![0, 1])));
        assert!(!is_label_indicator_matrix(&Value::from(ndarray::Array3::<i64>::zeros((2, 2, 2)))));
    }
}
