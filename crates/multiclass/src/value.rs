//! Dynamic target values and their dense-array view.
//!
//! A target arrives either as a fixed-shape [`TargetArray`] or as a nested
//! [`Value::Seq`] whose shape and element kind are only known after
//! inspection. [`Value::to_array`] performs that inspection and yields the
//! dense view the classifier works on.
//!
//! # Element kinds
//!
//! | Kind | Code | Storage |
//! |------|------|---------|
//! | [`ElementKind::Bool`] | `b` | `ArrayD<bool>` |
//! | [`ElementKind::Int`] | `i` | `ArrayD<i64>` |
//! | [`ElementKind::UInt`] | `u` | `ArrayD<u64>` |
//! | [`ElementKind::Float`] | `f` | `ArrayD<f64>` |
//! | [`ElementKind::Str`] | `U` | `ArrayD<String>` |
//! | [`ElementKind::Object`] | `O` | `ArrayD<Value>` |

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use ndarray::{Array, ArrayD, Dimension, IxDyn};
use serde::Deserialize;

use crate::error::TargetError;
use crate::label::Label;

// =============================================================================
// ElementKind
// =============================================================================

/// Element type of a [`TargetArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Bool,
    Int,
    UInt,
    Float,
    /// Fixed-width strings.
    Str,
    /// Generic objects: anything that is not a number or a string.
    Object,
}

impl ElementKind {
    /// Single-character kind code (`b`, `i`, `u`, `f`, `U`, `O`).
    pub fn code(self) -> char {
        match self {
            Self::Bool => 'b',
            Self::Int => 'i',
            Self::UInt => 'u',
            Self::Float => 'f',
            Self::Str => 'U',
            Self::Object => 'O',
        }
    }

    /// Bool, signed or unsigned integer.
    #[inline]
    pub fn is_integral(self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::UInt)
    }

    /// Common kind able to hold elements of both `self` and `other`.
    ///
    /// Strings absorb numbers, mixed signed/unsigned integers widen to
    /// float, and objects absorb everything.
    pub fn promote(self, other: Self) -> Self {
        use ElementKind::*;
        match (self, other) {
            (Object, _) | (_, Object) => Object,
            (Str, _) | (_, Str) => Str,
            (Float, _) | (_, Float) => Float,
            (Int, UInt) | (UInt, Int) => Float,
            (Int, _) | (_, Int) => Int,
            (UInt, _) | (_, UInt) => UInt,
            (Bool, Bool) => Bool,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::Str => "str",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

// =============================================================================
// TargetArray
// =============================================================================

/// A fixed-shape n-dimensional array tagged with its element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetArray {
    Bool(ArrayD<bool>),
    Int(ArrayD<i64>),
    UInt(ArrayD<u64>),
    Float(ArrayD<f64>),
    Str(ArrayD<String>),
    Object(ArrayD<Value>),
}

/// Apply the same expression to whichever array a [`TargetArray`] holds.
macro_rules! each_array {
    ($array:expr, $a:ident => $body:expr) => {
        match $array {
            TargetArray::Bool($a) => $body,
            TargetArray::Int($a) => $body,
            TargetArray::UInt($a) => $body,
            TargetArray::Float($a) => $body,
            TargetArray::Str($a) => $body,
            TargetArray::Object($a) => $body,
        }
    };
}

impl TargetArray {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Bool(_) => ElementKind::Bool,
            Self::Int(_) => ElementKind::Int,
            Self::UInt(_) => ElementKind::UInt,
            Self::Float(_) => ElementKind::Float,
            Self::Str(_) => ElementKind::Str,
            Self::Object(_) => ElementKind::Object,
        }
    }

    pub fn shape(&self) -> &[usize] {
        each_array!(self, a => a.shape())
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        each_array!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns of a 2-D array.
    pub fn n_columns(&self) -> Option<usize> {
        match self.shape() {
            [_, cols] => Some(*cols),
            _ => None,
        }
    }

    /// True if every element is a finite value equal to its truncation.
    ///
    /// Only floats can fail this check; integral kinds always pass and
    /// strings or objects never do. NaN and infinities are not integral.
    pub fn is_integral(&self) -> bool {
        match self {
            Self::Bool(_) | Self::Int(_) | Self::UInt(_) => true,
            Self::Float(a) => a.iter().all(|&x| is_integral_float(x)),
            Self::Str(_) | Self::Object(_) => false,
        }
    }

    /// Number of distinct elements, or `None` for object arrays.
    ///
    /// Floats compare with `==`, so every NaN counts as its own value and
    /// `-0.0` equals `0.0`.
    pub fn distinct_count(&self) -> Option<usize> {
        match self {
            Self::Bool(a) => {
                let any_true = a.iter().any(|&b| b);
                let any_false = a.iter().any(|&b| !b);
                Some(usize::from(any_true) + usize::from(any_false))
            }
            Self::Int(a) => Some(count_sorted_distinct(a.iter().copied().collect())),
            Self::UInt(a) => Some(count_sorted_distinct(a.iter().copied().collect())),
            Self::Str(a) => Some(count_sorted_distinct(a.iter().collect())),
            Self::Float(a) => {
                let mut values: Vec<f64> = a.iter().copied().collect();
                values.sort_unstable_by(f64::total_cmp);
                values.dedup_by(|x, y| x == y);
                Some(values.len())
            }
            Self::Object(_) => None,
        }
    }

    /// Every element as a [`Label`], in logical order.
    ///
    /// Object arrays fail on their first non-scalar element.
    pub fn labels(&self) -> Result<Vec<Label>, TargetError> {
        match self {
            Self::Bool(a) => Ok(a.iter().map(|&b| Label::from(b)).collect()),
            Self::Int(a) => Ok(a.iter().map(|&i| Label::from(i)).collect()),
            Self::UInt(a) => Ok(a.iter().map(|&u| Label::from(u)).collect()),
            Self::Float(a) => Ok(a.iter().map(|&x| Label::from(x)).collect()),
            Self::Str(a) => Ok(a.iter().map(|s| Label::Str(s.clone())).collect()),
            Self::Object(a) => a.iter().map(Label::try_from).collect(),
        }
    }

    /// Elements along the first axis.
    ///
    /// For a 1-D array these are scalars; for higher dimensions each item
    /// is a sub-array. A 0-D array has no first axis and yields `None`.
    pub fn outer_items(&self) -> Option<Vec<Value>> {
        if self.ndim() == 0 {
            return None;
        }
        if self.ndim() == 1 {
            let mut items = Vec::with_capacity(self.len());
            self.push_elements(&mut items);
            return Some(items);
        }
        let items: Vec<Value> = each_array!(self, a => a
            .outer_iter()
            .map(|row| Value::Array(TargetArray::from(row.to_owned())))
            .collect());
        Some(items)
    }

    /// Push every element as a scalar [`Value`], in logical order.
    fn push_elements(&self, out: &mut Vec<Value>) {
        match self {
            Self::Bool(a) => out.extend(a.iter().map(|&b| Value::Bool(b))),
            Self::Int(a) => out.extend(a.iter().map(|&i| Value::Int(i))),
            Self::UInt(a) => out.extend(a.iter().map(|&u| Value::UInt(u))),
            Self::Float(a) => out.extend(a.iter().map(|&x| Value::Float(x))),
            Self::Str(a) => out.extend(a.iter().map(|s| Value::Str(s.clone()))),
            Self::Object(a) => out.extend(a.iter().cloned()),
        }
    }

    /// Build an array of `kind` from row-major scalar leaves.
    fn from_leaves(
        kind: ElementKind,
        shape: &[usize],
        leaves: Vec<Value>,
    ) -> Result<Self, CoerceError> {
        let shape = IxDyn(shape);
        let array = match kind {
            ElementKind::Bool => Self::Bool(build(shape, leaves, |v| match v {
                Value::Bool(b) => Ok(b),
                other => Err(other),
            })?),
            ElementKind::Int => Self::Int(build(shape, leaves, |v| match v {
                Value::Bool(b) => Ok(i64::from(b)),
                Value::Int(i) => Ok(i),
                other => Err(other),
            })?),
            ElementKind::UInt => Self::UInt(build(shape, leaves, |v| match v {
                Value::Bool(b) => Ok(u64::from(b)),
                Value::UInt(u) => Ok(u),
                other => Err(other),
            })?),
            ElementKind::Float => Self::Float(build(shape, leaves, |v| match v {
                Value::Bool(b) => Ok(f64::from(u8::from(b))),
                Value::Int(i) => Ok(i as f64),
                Value::UInt(u) => Ok(u as f64),
                Value::Float(x) => Ok(x),
                other => Err(other),
            })?),
            ElementKind::Str => Self::Str(build(shape, leaves, |v| match v {
                Value::Str(s) => Ok(s),
                scalar @ (Value::Bool(_) | Value::Int(_) | Value::UInt(_) | Value::Float(_)) => {
                    Ok(scalar.to_string())
                }
                other => Err(other),
            })?),
            ElementKind::Object => Self::Object(build(shape, leaves, Ok)?),
        };
        Ok(array)
    }
}

#[inline]
fn is_integral_float(x: f64) -> bool {
    x.is_finite() && x.trunc() == x
}

fn count_sorted_distinct<T: Ord>(mut values: Vec<T>) -> usize {
    values.sort_unstable();
    values.dedup();
    values.len()
}

fn build<T>(
    shape: IxDyn,
    leaves: Vec<Value>,
    convert: impl Fn(Value) -> Result<T, Value>,
) -> Result<ArrayD<T>, CoerceError> {
    let data = leaves
        .into_iter()
        .map(|v| convert(v).map_err(|v| CoerceError::Element { repr: v.to_string() }))
        .collect::<Result<Vec<T>, _>>()?;
    ArrayD::from_shape_vec(shape, data).map_err(|_| CoerceError::Shape)
}

macro_rules! impl_array_from {
    (@impl $t:ty, $variant:ident, $a:ident => $body:expr) => {
        impl<D: Dimension> From<Array<$t, D>> for TargetArray {
            fn from($a: Array<$t, D>) -> Self {
                Self::$variant($body.into_dyn())
            }
        }

        impl<D: Dimension> From<Array<$t, D>> for Value {
            fn from(a: Array<$t, D>) -> Self {
                Self::Array(TargetArray::from(a))
            }
        }
    };
    ($($t:ty => $variant:ident $(($conv:expr))?),* $(,)?) => {
        $(impl_array_from!(@impl $t, $variant, a => a $(.mapv($conv))?);)*
    };
}

impl_array_from! {
    bool => Bool,
    i32 => Int(i64::from),
    i64 => Int,
    u32 => UInt(u64::from),
    u64 => UInt,
    f32 => Float(f64::from),
    f64 => Float,
    String => Str,
    &str => Str(|s: &str| s.to_owned()),
    Value => Object,
}

impl From<TargetArray> for Value {
    fn from(a: TargetArray) -> Self {
        Self::Array(a)
    }
}

// =============================================================================
// Value
// =============================================================================

/// A target, or one element of one.
///
/// Only [`Value::Seq`] and [`Value::Array`] are array-like. Strings are
/// never treated as sequences of labels.
///
/// `Value` deserializes from any JSON document: arrays become sequences,
/// objects become mappings and numbers keep their integer or float type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// Ordered, non-string sequence (list or tuple).
    Seq(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Array(TargetArray),
}

/// Why a value could not be viewed as a dense array.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoerceError {
    #[error("ragged nested sequence: sub-shape {first:?} differs from {other:?}")]
    Ragged { first: Vec<usize>, other: Vec<usize> },

    #[error("element {repr} does not fit the promoted element kind")]
    Element { repr: String },

    #[error("element count does not match the discovered shape")]
    Shape,

    #[error("nesting exceeds {max} dimensions")]
    TooDeep { max: usize },
}

/// Deepest nesting coerced to a dense array.
pub const MAX_DIMS: usize = 32;

impl Value {
    /// Array or non-string sequence.
    #[inline]
    pub fn is_array_like(&self) -> bool {
        matches!(self, Self::Seq(_) | Self::Array(_))
    }

    /// A plain ordered sequence: not an array and not a string.
    #[inline]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Seq(_))
    }

    /// The dense-array view of this value.
    ///
    /// Arrays are borrowed as-is. Sequences must be rectangular; their
    /// element kinds are promoted with [`ElementKind::promote`] and an
    /// empty sequence becomes a float array of length 0. Scalars, nulls
    /// and mappings become 0-D arrays.
    pub fn to_array(&self) -> Result<Cow<'_, TargetArray>, CoerceError> {
        if let Self::Array(a) = self {
            return Ok(Cow::Borrowed(a));
        }
        let shape = shape_of(self, 0)?;
        let mut leaves = Vec::new();
        let mut kind = None;
        collect_leaves(self, &mut leaves, &mut kind);
        let kind = kind.unwrap_or(ElementKind::Float);
        TargetArray::from_leaves(kind, &shape, leaves).map(Cow::Owned)
    }

    /// Kind of a scalar leaf.
    fn leaf_kind(&self) -> ElementKind {
        match self {
            Self::Bool(_) => ElementKind::Bool,
            Self::Int(_) => ElementKind::Int,
            Self::UInt(_) => ElementKind::UInt,
            Self::Float(_) => ElementKind::Float,
            Self::Str(_) => ElementKind::Str,
            Self::Null | Self::Map(_) | Self::Seq(_) | Self::Array(_) => ElementKind::Object,
        }
    }
}

/// Shape of a nested value; `depth` counts the enclosing sequences.
fn shape_of(value: &Value, depth: usize) -> Result<Vec<usize>, CoerceError> {
    match value {
        Value::Seq(_) if depth >= MAX_DIMS => Err(CoerceError::TooDeep { max: MAX_DIMS }),
        Value::Seq(items) => {
            let mut inner: Option<Vec<usize>> = None;
            for item in items {
                let shape = shape_of(item, depth + 1)?;
                match &inner {
                    None => inner = Some(shape),
                    Some(first) if *first != shape => {
                        return Err(CoerceError::Ragged {
                            first: first.clone(),
                            other: shape,
                        });
                    }
                    Some(_) => {}
                }
            }
            let mut shape = vec![items.len()];
            shape.extend(inner.unwrap_or_default());
            Ok(shape)
        }
        Value::Array(a) if depth + a.ndim() > MAX_DIMS => {
            Err(CoerceError::TooDeep { max: MAX_DIMS })
        }
        Value::Array(a) => Ok(a.shape().to_vec()),
        _ => Ok(Vec::new()),
    }
}

fn collect_leaves(value: &Value, out: &mut Vec<Value>, kind: &mut Option<ElementKind>) {
    match value {
        Value::Seq(items) => {
            for item in items {
                collect_leaves(item, out, kind);
            }
        }
        Value::Array(a) => {
            merge_kind(kind, a.kind());
            a.push_elements(out);
        }
        leaf => {
            merge_kind(kind, leaf.leaf_kind());
            out.push(leaf.clone());
        }
    }
}

#[inline]
fn merge_kind(kind: &mut Option<ElementKind>, next: ElementKind) {
    *kind = Some(kind.map_or(next, |prev| prev.promote(next)));
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{key}': {item}")?;
                }
                f.write_str("}")
            }
            Self::Array(a) => write!(f, "array(shape={:?}, dtype={})", a.shape(), a.kind()),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! impl_value_from_scalar {
    ($($t:ty => $variant:ident as $inner:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::$variant(<$inner>::from(v))
                }
            }
        )*
    };
}

impl_value_from_scalar! {
    bool => Bool as bool,
    i32 => Int as i64,
    i64 => Int as i64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => Str as String,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Self::Str(s),
            Json::Array(items) => Self::Seq(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
