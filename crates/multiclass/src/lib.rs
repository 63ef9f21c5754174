//! multiclass: target type detection and label unification.
//!
//! Supervised learners need to know what kind of target they were given
//! before fitting anything. This crate answers two questions about label
//! data:
//!
//! - *What shape and semantics does a target have?* [`type_of_target`]
//!   assigns one [`TargetType`]: binary, multiclass, continuous, one of
//!   the multioutput variants, one of the multilabel formats, or unknown.
//! - *What labels do several targets share?* [`unique_labels`] merges the
//!   labels of one or more compatible targets into a sorted
//!   [`OrderedLabels`].
//!
//! # Key Types
//!
//! - [`Value`] / [`TargetArray`] - Array-like input, nested or dense
//! - [`TargetType`] / [`TargetFamily`] - Classification tags
//! - [`Label`] / [`OrderedLabels`] - Labels and their ordered union
//! - [`TargetError`] - Everything that can go wrong
//!
//! # Example
//!
//! ```
//! use multiclass::{type_of_target, unique_labels, Label, TargetType, Value};
//! use ndarray::array;
//!
//! let y = Value::from(array![[0, 1], [1, 1]]);
//! assert_eq!(type_of_target(&y).unwrap(), TargetType::MultilabelIndicator);
//!
//! let a = Value::from(vec![vec![1, 2], vec![3]]);
//! let b = Value::from(vec![vec![1, 2], vec![]]);
//! let labels = unique_labels([&a, &b]).unwrap();
//! assert_eq!(labels.len(), 3);
//! assert_eq!(labels[2], Label::from(3));
//! ```
//!
//! All operations are pure functions of their arguments and can be called
//! concurrently on shared inputs.

pub mod classify;
pub mod error;
pub mod label;
pub mod predicates;
pub mod target_type;
pub mod unique;
pub mod value;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use classify::{
    check_classification_targets, type_of_target, type_of_target_with, ClassifyOptions,
};
pub use error::TargetError;
pub use label::{Label, LabelKind, Number, OrderedLabels};
pub use predicates::{is_label_indicator_matrix, is_multilabel, is_sequence_of_sequences};
pub use target_type::{ParseTargetTypeError, TargetFamily, TargetType};
pub use unique::{unique_labels, unique_labels_of};
pub use value::{CoerceError, ElementKind, TargetArray, Value, MAX_DIMS};
