//! The closed set of target type tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shape and semantics of a target, as decided by
/// [`type_of_target`](crate::type_of_target).
///
/// The string form of each tag (see [`TargetType::as_str`]) is the
/// kebab-case name also used by serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetType {
    /// At most two discrete values, 1-D or a column vector.
    Binary,
    /// More than two discrete values, 1-D or a column vector.
    Multiclass,
    /// 2-D with more than two discrete values and at least two columns.
    MulticlassMultioutput,
    /// Floats that are not all integers, 1-D or a column vector.
    Continuous,
    /// 2-D floats that are not all integers, with at least two columns.
    ContinuousMultioutput,
    /// 2-D, at least two columns, at most two distinct integral values.
    MultilabelIndicator,
    /// A sequence whose samples are themselves sequences of labels.
    MultilabelSequences,
    /// Array-like, but none of the above.
    Unknown,
}

/// Coarse grouping used when merging labels from several targets.
///
/// `binary` and `multiclass` share [`TargetFamily::SingleLabel`]; every
/// tag without an extraction rule stays in its own family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetFamily {
    SingleLabel,
    Sequences,
    Indicator,
    Other(TargetType),
}

impl TargetType {
    /// All tags, in declaration order.
    pub const ALL: [TargetType; 8] = [
        Self::Binary,
        Self::Multiclass,
        Self::MulticlassMultioutput,
        Self::Continuous,
        Self::ContinuousMultioutput,
        Self::MultilabelIndicator,
        Self::MultilabelSequences,
        Self::Unknown,
    ];

    /// The tag's canonical name, e.g. `"multilabel-indicator"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Multiclass => "multiclass",
            Self::MulticlassMultioutput => "multiclass-multioutput",
            Self::Continuous => "continuous",
            Self::ContinuousMultioutput => "continuous-multioutput",
            Self::MultilabelIndicator => "multilabel-indicator",
            Self::MultilabelSequences => "multilabel-sequences",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true for the `-multioutput` variants.
    pub fn is_multioutput(self) -> bool {
        matches!(
            self,
            Self::MulticlassMultioutput | Self::ContinuousMultioutput
        )
    }

    /// Returns true for both multilabel formats.
    pub fn is_multilabel(self) -> bool {
        matches!(self, Self::MultilabelIndicator | Self::MultilabelSequences)
    }

    /// Returns true for real-valued targets.
    pub fn is_continuous(self) -> bool {
        matches!(self, Self::Continuous | Self::ContinuousMultioutput)
    }

    /// Returns true if a classifier can be trained on this target.
    pub fn is_classification(self) -> bool {
        matches!(
            self,
            Self::Binary
                | Self::Multiclass
                | Self::MulticlassMultioutput
                | Self::MultilabelIndicator
                | Self::MultilabelSequences
        )
    }

    /// The family used for cross-target consistency checks.
    pub fn family(self) -> TargetFamily {
        match self {
            Self::Binary | Self::Multiclass => TargetFamily::SingleLabel,
            Self::MultilabelSequences => TargetFamily::Sequences,
            Self::MultilabelIndicator => TargetFamily::Indicator,
            other => TargetFamily::Other(other),
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized tag name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized target type {0:?}")]
pub struct ParseTargetTypeError(pub String);

impl FromStr for TargetType {
    type Err = ParseTargetTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseTargetTypeError(s.to_owned()))
    }
}
