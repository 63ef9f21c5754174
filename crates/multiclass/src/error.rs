//! Error types for target classification and label unification.

use crate::target_type::TargetType;

/// Errors raised while classifying targets or merging their labels.
///
/// Every variant is surfaced to the caller as soon as it is detected.
/// An `unknown` classification is not an error; see
/// [`ClassifyOptions::with_raise_unknown`](crate::ClassifyOptions::with_raise_unknown)
/// to turn it into one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TargetError {
    /// The value is not array-like (scalar, mapping, null or bare string).
    #[error("expected array-like (array or non-string sequence), got {repr}")]
    InvalidInput { repr: String },

    /// `unique_labels` was called without any target.
    #[error("no target has been passed")]
    EmptyInput,

    /// The targets resolve to incompatible type families.
    #[error("mix of target types is not allowed, got {}", join_types(.types))]
    MixedTypes { types: Vec<TargetType> },

    /// Indicator matrices with differing column counts.
    #[error("multilabel indicator inputs have different numbers of labels: {n_columns:?}")]
    InconsistentShape { n_columns: Vec<usize> },

    /// The resolved type has no discrete label extraction.
    #[error("unknown label type: no extraction of discrete labels for {target_type}")]
    UnsupportedType { target_type: TargetType },

    /// Merged labels mix strings and numbers.
    #[error("mix of label input types (string and number)")]
    MixedLabelKinds,

    /// A nested element cannot act as a scalar label.
    #[error("label {repr} is not a scalar")]
    InvalidLabel { repr: String },

    /// The target classified as `unknown` and the caller asked for an error.
    #[error("unknown label type: target could not be classified")]
    UnknownTarget,

    /// The target is array-like but not a discrete classification target.
    #[error("target of type {target_type} is not a classification target")]
    NotClassification { target_type: TargetType },

    /// A classifier assumption broke. This is a bug, not a caller error.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(&'static str),

    /// Another error prefixed with the name of the offending input.
    #[error("{name}: {source}")]
    Named {
        name: String,
        #[source]
        source: Box<TargetError>,
    },
}

impl TargetError {
    /// Prefix this error with an input name, e.g. `y_true`.
    pub fn named(self, name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all name prefixes removed.
    pub fn root(&self) -> &TargetError {
        match self {
            Self::Named { source, .. } => source.root(),
            other => other,
        }
    }
}

fn join_types(types: &[TargetType]) -> String {
    let names: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
    format!("{{{}}}", names.join(", "))
}
