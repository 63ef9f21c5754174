//! Target type classification.
//!
//! [`type_of_target`] assigns exactly one [`TargetType`] to an array-like
//! value. The decision is an ordered list of rules over a few structural
//! facts; the first rule that matches wins:
//!
//! 1. sequence of sequences: `multilabel-sequences`
//! 2. label indicator matrix: `multilabel-indicator`
//! 3. not coercible to a rectangular array: `unknown`
//! 4. more than two dimensions, or object elements: `unknown`
//! 5. 2-D with zero columns: `unknown`
//! 6. floats with a non-integral value: `continuous[-multioutput]`
//! 7. at most two distinct values: `binary`
//! 8. otherwise: `multiclass[-multioutput]`
//!
//! The `-multioutput` suffix applies to 2-D input with at least two
//! columns. A single-column 2-D array is treated like 1-D input.

use tracing::debug;

use crate::error::TargetError;
use crate::predicates::{is_label_indicator_matrix, is_sequence_of_sequences};
use crate::target_type::TargetType;
use crate::value::{ElementKind, Value};

/// Options for [`type_of_target_with`].
///
/// # Example
///
/// ```
/// use multiclass::{type_of_target_with, ClassifyOptions, TargetError, Value};
///
/// let opts = ClassifyOptions::new()
///     .with_input_name("y_true")
///     .with_raise_unknown(true);
///
/// let err = type_of_target_with(&Value::from(3), &opts).unwrap_err();
/// assert!(err.to_string().starts_with("y_true: expected array-like"));
///
/// let ragged = Value::Seq(vec![Value::from(1), Value::from(vec![2, 3])]);
/// let err = type_of_target_with(&ragged, &opts).unwrap_err();
/// assert_eq!(err.root(), &TargetError::UnknownTarget);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Name of the input, used to prefix error messages.
    pub input_name: Option<String>,
    /// Return [`TargetError::UnknownTarget`] instead of `unknown`.
    pub raise_unknown: bool,
}

impl ClassifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input name used in error messages.
    pub fn with_input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = Some(name.into());
        self
    }

    /// Treat an `unknown` classification as an error.
    pub fn with_raise_unknown(mut self, raise: bool) -> Self {
        self.raise_unknown = raise;
        self
    }
}

/// Determine the type of target `y`.
///
/// # Errors
///
/// - [`TargetError::InvalidInput`] if `y` is not array-like.
/// - [`TargetError::InternalInvariant`] if a 2-D binary array escaped
///   indicator detection.
///
/// # Example
///
/// ```
/// use multiclass::{type_of_target, TargetType, Value};
/// use ndarray::array;
///
/// let t = |y: Value| type_of_target(&y).unwrap();
/// assert_eq!(t(Value::from(vec![0.1, 0.6])), TargetType::Continuous);
/// assert_eq!(t(Value::from(vec![1, -1, -1, 1])), TargetType::Binary);
/// assert_eq!(t(Value::from(vec!["a", "b", "c"])), TargetType::Multiclass);
/// assert_eq!(t(Value::from(array![[1, 2], [3, 1]])), TargetType::MulticlassMultioutput);
/// assert_eq!(t(Value::from(vec![vec!["a", "b"], vec!["c"], vec![]])), TargetType::MultilabelSequences);
/// assert_eq!(t(Value::from(array![[0, 1], [1, 1]])), TargetType::MultilabelIndicator);
/// ```
pub fn type_of_target(y: &Value) -> Result<TargetType, TargetError> {
    classify(y)
}

/// [`type_of_target`] with explicit options.
pub fn type_of_target_with(y: &Value, opts: &ClassifyOptions) -> Result<TargetType, TargetError> {
    let result = classify(y).and_then(|target_type| {
        if opts.raise_unknown && target_type == TargetType::Unknown {
            Err(TargetError::UnknownTarget)
        } else {
            Ok(target_type)
        }
    });
    match &opts.input_name {
        Some(name) => result.map_err(|e| e.named(name.as_str())),
        None => result,
    }
}

/// Require a discrete classification target.
///
/// Returns the target's type when it is `binary`, `multiclass`,
/// `multiclass-multioutput` or one of the multilabel formats.
///
/// # Errors
///
/// [`TargetError::NotClassification`] for continuous and unknown targets,
/// plus anything [`type_of_target`] returns.
pub fn check_classification_targets(y: &Value) -> Result<TargetType, TargetError> {
    let target_type = type_of_target(y)?;
    if target_type.is_classification() {
        Ok(target_type)
    } else {
        Err(TargetError::NotClassification { target_type })
    }
}

fn classify(y: &Value) -> Result<TargetType, TargetError> {
    if !y.is_array_like() {
        return Err(TargetError::InvalidInput { repr: y.to_string() });
    }

    if is_sequence_of_sequences(y) {
        debug!("first sample is a sequence");
        return Ok(TargetType::MultilabelSequences);
    }
    if is_label_indicator_matrix(y) {
        debug!("2-d array with at most two integral values");
        return Ok(TargetType::MultilabelIndicator);
    }

    let array = match y.to_array() {
        Ok(array) => array,
        Err(err) => {
            debug!(%err, "target does not coerce to a dense array, classifying as unknown");
            return Ok(TargetType::Unknown);
        }
    };

    let shape = array.shape();
    if shape.len() > 2 || array.kind() == ElementKind::Object {
        debug!(?shape, kind = %array.kind(), "unsupported dimensionality or element kind");
        return Ok(TargetType::Unknown);
    }
    let multioutput = match shape {
        [_, 0] => {
            debug!("2-d target without columns");
            return Ok(TargetType::Unknown);
        }
        [_, cols] => *cols > 1,
        _ => false,
    };

    if array.kind() == ElementKind::Float && !array.is_integral() {
        debug!(multioutput, "float target with non-integral values");
        return Ok(if multioutput {
            TargetType::ContinuousMultioutput
        } else {
            TargetType::Continuous
        });
    }

    let n_distinct = array
        .distinct_count()
        .ok_or(TargetError::InternalInvariant("object arrays have no distinct-value count"))?;
    if n_distinct <= 2 {
        if multioutput {
            return Err(TargetError::InternalInvariant(
                "2-d binary array-like should be multilabel",
            ));
        }
        debug!(n_distinct, "at most two distinct values");
        return Ok(TargetType::Binary);
    }

    debug!(n_distinct, multioutput, "more than two distinct values");
    Ok(if multioutput {
        TargetType::MulticlassMultioutput
    } else {
        TargetType::Multiclass
    })
}
