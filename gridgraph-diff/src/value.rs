//! Comparable field values.

use serde::Serialize;
use std::fmt;

/// A scalar (or small tuple of scalars) read from an entity field.
///
/// Equality for comparison purposes goes through [`FieldValue::matches`],
/// under which NaN equals NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Tuple(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns true if the two values are the same for comparison purposes.
    ///
    /// Floats within `tolerance` of each other match, and two NaNs always
    /// match. Tuples match element-wise.
    pub fn matches(&self, other: &FieldValue, tolerance: f64) -> bool {
        match (self, other) {
            (FieldValue::Float(a), FieldValue::Float(b)) => floats_match(*a, *b, tolerance),
            (FieldValue::Tuple(a), FieldValue::Tuple(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| x.matches(y, tolerance))
            }
            _ => self == other,
        }
    }
}

/// NaN-aware float equality.
pub fn floats_match(a: f64, b: f64, tolerance: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    a == b || (a - b).abs() <= tolerance
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(v) => write!(f, "{v:?}"),
            FieldValue::Tuple(values) => {
                f.write_str("(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

macro_rules! int_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(v: $ty) -> Self {
                    FieldValue::Int(i64::from(v))
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Float(f64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(v: &String) -> Self {
        FieldValue::Text(v.clone())
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(v: Option<V>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

impl<A: Into<FieldValue>, B: Into<FieldValue>> From<(A, B)> for FieldValue {
    fn from((a, b): (A, B)) -> Self {
        FieldValue::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<FieldValue>, B: Into<FieldValue>, C: Into<FieldValue>> From<(A, B, C)> for FieldValue {
    fn from((a, b, c): (A, B, C)) -> Self {
        FieldValue::Tuple(vec![a.into(), b.into(), c.into()])
    }
}
