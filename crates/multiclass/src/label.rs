//! Label values and the ordered label collection.
//!
//! Labels carry their kind explicitly: a [`Label`] is either a
//! [`Number`] or a string, so checking that merged labels are of one kind
//! is a tag comparison.
//!
//! Numbers compare by value across representations: `true == 1` and
//! `1 == 1.0`. NaN sorts after every other number and equals itself, so
//! the ordering is total.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use crate::error::TargetError;
use crate::value::Value;

// =============================================================================
// Number
// =============================================================================

/// A numeric label.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Number {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// The value as a float. Large integers may lose precision; comparisons
    /// never go through this.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Bool(b) => f64::from(u8::from(b)),
            Self::Int(i) => i as f64,
            Self::UInt(u) => u as f64,
            Self::Float(f) => f,
        }
    }

    /// Exact integer value, if this is not a float.
    #[inline]
    fn as_i128(self) -> Option<i128> {
        match self {
            Self::Bool(b) => Some(i128::from(b)),
            Self::Int(i) => Some(i128::from(i)),
            Self::UInt(u) => Some(i128::from(u)),
            Self::Float(_) => None,
        }
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (None, Some(b)) => cmp_float_int(self.as_f64(), b),
            (Some(a), None) => cmp_float_int(other.as_f64(), a).reverse(),
            (None, None) => {
                let (a, b) = (self.as_f64(), other.as_f64());
                a.partial_cmp(&b)
                    .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
            }
        }
    }
}

/// Exact comparison of a float against an integer, NaN last.
///
/// The integer is never rounded to `f64`, so values above 2^53 stay
/// distinct.
fn cmp_float_int(x: f64, i: i128) -> Ordering {
    if x.is_nan() {
        return Ordering::Greater;
    }
    let t = x.trunc();
    // Saturates for infinities and anything beyond i128, which is still
    // outside the range of any integer label.
    (t as i128)
        .cmp(&i)
        .then_with(|| x.partial_cmp(&t).unwrap_or(Ordering::Equal))
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

// =============================================================================
// Label
// =============================================================================

/// Broad kind of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Numeric,
    String,
}

/// A single scalar label.
///
/// Numbers order before strings; a valid [`OrderedLabels`] never holds
/// both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Label {
    Number(Number),
    Str(String),
}

impl Label {
    #[inline]
    pub fn kind(&self) -> LabelKind {
        match self {
            Self::Number(_) => LabelKind::Numeric,
            Self::Str(_) => LabelKind::String,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::Number(_), Self::Str(_)) => Ordering::Less,
            (Self::Str(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => n.fmt(f),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<Number> for Label {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

macro_rules! impl_label_from {
    ($($t:ty => $variant:ident as $inner:ty),* $(,)?) => {
        $(
            impl From<$t> for Label {
                fn from(v: $t) -> Self {
                    Self::Number(Number::$variant(<$inner>::from(v)))
                }
            }
        )*
    };
}

impl_label_from! {
    bool => Bool as bool,
    i32 => Int as i64,
    i64 => Int as i64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl TryFrom<&Value> for Label {
    type Error = TargetError;

    /// Scalars become labels; nulls, mappings, sequences and arrays do not.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(Self::Number(Number::Bool(*b))),
            Value::Int(i) => Ok(Self::Number(Number::Int(*i))),
            Value::UInt(u) => Ok(Self::Number(Number::UInt(*u))),
            Value::Float(x) => Ok(Self::Number(Number::Float(*x))),
            Value::Str(s) => Ok(Self::Str(s.clone())),
            other => Err(TargetError::InvalidLabel {
                repr: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// OrderedLabels
// =============================================================================

/// Distinct labels in ascending natural order.
///
/// Ordinal positions are stable, so the collection can index the rows
/// and columns of a confusion matrix. It is read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderedLabels(Vec<Label>);

impl OrderedLabels {
    /// Sort and deduplicate.
    pub(crate) fn from_unsorted(mut labels: Vec<Label>) -> Self {
        labels.sort();
        labels.dedup();
        Self(labels)
    }

    /// Ordinal position of `label`, if present.
    pub fn position(&self, label: &Label) -> Option<usize> {
        self.0.binary_search(label).ok()
    }

    /// Kind shared by every label, or `None` when empty.
    pub fn kind(&self) -> Option<LabelKind> {
        self.0.first().map(Label::kind)
    }

    pub fn as_slice(&self) -> &[Label] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Label> {
        self.0
    }
}

impl Deref for OrderedLabels {
    type Target = [Label];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a OrderedLabels {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for OrderedLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match label {
                Label::Str(s) => write!(f, "{s:?}")?,
                Label::Number(n) => write!(f, "{n}")?,
            }
        }
        f.write_str("]")
    }
}
