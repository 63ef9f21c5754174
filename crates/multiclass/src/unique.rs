//! Merging labels from several targets.
//!
//! [`unique_labels`] classifies every input, checks that they all belong
//! to one [`TargetFamily`], extracts each input's labels with the rule for
//! that family and returns their sorted union.
//!
//! Not allowed:
//! - a mix of single-label and multilabel targets
//! - a mix of indicator matrices and anything else
//! - indicator matrices with different numbers of columns
//! - a mix of string and numeric labels
//! - target types without discrete labels (`continuous*`, `*-multioutput`,
//!   `unknown`)

use std::borrow::Cow;
use std::collections::BTreeSet;

use tracing::trace;

use crate::classify::type_of_target;
use crate::error::TargetError;
use crate::label::{Label, OrderedLabels};
use crate::target_type::{TargetFamily, TargetType};
use crate::value::Value;

/// How discrete labels are read out of one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extractor {
    /// The distinct values themselves.
    Values,
    /// Every label of every sample.
    Sequences,
    /// Column indices `0..n_columns`.
    Columns,
}

impl Extractor {
    fn for_type(target_type: TargetType) -> Option<Self> {
        match target_type {
            TargetType::Binary | TargetType::Multiclass => Some(Self::Values),
            TargetType::MultilabelSequences => Some(Self::Sequences),
            TargetType::MultilabelIndicator => Some(Self::Columns),
            TargetType::MulticlassMultioutput
            | TargetType::Continuous
            | TargetType::ContinuousMultioutput
            | TargetType::Unknown => None,
        }
    }

    fn extract(self, y: &Value, out: &mut Vec<Label>) -> Result<(), TargetError> {
        match self {
            Self::Values => match y {
                Value::Array(array) => out.extend(array.labels()?),
                Value::Seq(items) => {
                    for item in items {
                        out.push(Label::try_from(item)?);
                    }
                }
                other => return Err(invalid_label(other)),
            },
            Self::Sequences => {
                for sample in samples(y)?.iter() {
                    extend_sample(sample, out)?;
                }
            }
            Self::Columns => {
                let n_columns = n_columns(y).ok_or(TargetError::InternalInvariant(
                    "indicator matrix without a column count",
                ))?;
                let n_columns = i64::try_from(n_columns).map_err(|_| {
                    TargetError::InternalInvariant("column count exceeds i64")
                })?;
                out.extend((0..n_columns).map(Label::from));
            }
        }
        Ok(())
    }
}

/// Extract an ordered collection of the distinct labels in `ys`.
///
/// `binary` and `multiclass` targets may be mixed. For indicator matrices
/// the labels are the column indices, not the cell values.
///
/// # Errors
///
/// - [`TargetError::EmptyInput`] when `ys` is empty.
/// - [`TargetError::MixedTypes`] when inputs belong to different families.
/// - [`TargetError::InconsistentShape`] for indicator matrices of
///   different widths.
/// - [`TargetError::UnsupportedType`] when the resolved type has no
///   discrete labels.
/// - [`TargetError::MixedLabelKinds`] when strings and numbers meet.
/// - Anything [`type_of_target`] returns for an input.
///
/// # Example
///
/// ```
/// use multiclass::{unique_labels, Label, Value};
///
/// let a = Value::from(vec![1, 2, 10]);
/// let b = Value::from(vec![5, 11]);
/// let labels = unique_labels([&a, &b]).unwrap();
///
/// let expected: Vec<Label> = [1, 2, 5, 10, 11].into_iter().map(Label::from).collect();
/// assert_eq!(labels.as_slice(), expected.as_slice());
/// assert_eq!(labels.position(&Label::from(10)), Some(3));
/// ```
pub fn unique_labels<'a, I>(ys: I) -> Result<OrderedLabels, TargetError>
where
    I: IntoIterator<Item = &'a Value>,
{
    let ys: Vec<&Value> = ys.into_iter().collect();
    if ys.is_empty() {
        return Err(TargetError::EmptyInput);
    }

    let types = ys
        .iter()
        .map(|y| type_of_target(y))
        .collect::<Result<Vec<_>, _>>()?;
    trace!(?types, "classified targets");
    let target_type = resolve_type(&types)?;

    if target_type == TargetType::MultilabelIndicator {
        let widths: BTreeSet<Option<usize>> = ys.iter().map(|y| n_columns(y)).collect();
        if widths.len() > 1 {
            return Err(TargetError::InconsistentShape {
                n_columns: widths.into_iter().flatten().collect(),
            });
        }
    }

    let extractor =
        Extractor::for_type(target_type).ok_or(TargetError::UnsupportedType { target_type })?;

    let mut labels = Vec::new();
    for y in &ys {
        extractor.extract(y, &mut labels)?;
    }

    let mut kinds = labels.iter().map(Label::kind);
    if let Some(first) = kinds.next() {
        if kinds.any(|kind| kind != first) {
            return Err(TargetError::MixedLabelKinds);
        }
    }

    let labels = OrderedLabels::from_unsorted(labels);
    trace!(%target_type, n_labels = labels.len(), "merged labels");
    Ok(labels)
}

/// [`unique_labels`] for a single target.
pub fn unique_labels_of(y: &Value) -> Result<OrderedLabels, TargetError> {
    unique_labels(std::iter::once(y))
}

/// Collapse per-input types into the one type labels are extracted for.
fn resolve_type(types: &[TargetType]) -> Result<TargetType, TargetError> {
    let families: BTreeSet<TargetFamily> = types.iter().map(|t| t.family()).collect();
    if families.len() > 1 {
        let distinct: BTreeSet<TargetType> = types.iter().copied().collect();
        return Err(TargetError::MixedTypes {
            types: distinct.into_iter().collect(),
        });
    }
    // binary and multiclass extract the same way; report the wider tag.
    types
        .iter()
        .copied()
        .max()
        .ok_or(TargetError::EmptyInput)
}

fn n_columns(y: &Value) -> Option<usize> {
    match y {
        Value::Array(array) => array.n_columns(),
        _ => None,
    }
}

/// The samples of a sequence-of-sequences target.
fn samples(y: &Value) -> Result<Cow<'_, [Value]>, TargetError> {
    match y {
        Value::Seq(items) => Ok(Cow::Borrowed(items.as_slice())),
        Value::Array(array) => array
            .outer_items()
            .map(Cow::Owned)
            .ok_or_else(|| invalid_label(y)),
        other => Err(invalid_label(other)),
    }
}

/// Push every label of one sample.
///
/// Iterating a sample follows sequence semantics: a string yields its
/// characters and a mapping yields its keys.
fn extend_sample(sample: &Value, out: &mut Vec<Label>) -> Result<(), TargetError> {
    match sample {
        Value::Seq(items) => {
            for item in items {
                out.push(Label::try_from(item)?);
            }
        }
        Value::Array(array) if array.ndim() == 1 => out.extend(array.labels()?),
        Value::Str(s) => out.extend(s.chars().map(|c| Label::Str(c.to_string()))),
        Value::Map(map) => out.extend(map.keys().map(|k| Label::Str(k.clone()))),
        other => return Err(invalid_label(other)),
    }
    Ok(())
}

fn invalid_label(value: &Value) -> TargetError {
    TargetError::InvalidLabel {
        repr: value.to_string(),
    }
}
