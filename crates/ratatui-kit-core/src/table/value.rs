use std::borrow::Cow;
use std::cmp::Ordering;

/// A field value read out of a row by a [`super::Column`] accessor.
///
/// `Null` stands for an absent field. It always sorts last, whatever the direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Text shown when a column has no custom renderer.
    ///
    /// Empty or zero-like values display as `-`.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null | CellValue::Bool(false) | CellValue::Int(0) => Cow::Borrowed("-"),
            CellValue::Float(f) if *f == 0.0 || f.is_nan() => Cow::Borrowed("-"),
            CellValue::Text(s) if s.is_empty() => Cow::Borrowed("-"),
            CellValue::Bool(true) => Cow::Borrowed("true"),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Total order over non-null values: booleans, then numbers, then text.
    ///
    /// Integers and floats compare numerically with each other. `Null` compares greater than
    /// everything here; direction-aware null placement lives in [`super::sort`].
    pub fn compare(&self, other: &CellValue) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
            (Text(a), Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Bool(_) => 0,
            CellValue::Int(_) | CellValue::Float(_) => 1,
            CellValue::Text(_) => 2,
            CellValue::Null => 3,
        }
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&String> for CellValue {
    fn from(v: &String) -> Self {
        CellValue::Text(v.clone())
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values_display_as_dash() {
        assert_eq!(CellValue::Null.display(), "-");
        assert_eq!(CellValue::from("").display(), "-");
        assert_eq!(CellValue::Int(0).display(), "-");
        assert_eq!(CellValue::Int(42).display(), "42");
        assert_eq!(CellValue::from("Bob").display(), "Bob");
    }

    #[test]
    fn numbers_compare_across_int_and_float() {
        assert_eq!(
            CellValue::Int(2).compare(&CellValue::Float(1.5)),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Float(-0.5).compare(&CellValue::Int(0)),
            Ordering::Less
        );
    }

    #[test]
    fn mixed_variants_order_by_rank() {
        assert_eq!(
            CellValue::Int(99).compare(&CellValue::from("a")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Bool(true).compare(&CellValue::Int(-1)),
            Ordering::Less
        );
    }

    #[test]
    fn option_maps_none_to_null() {
        assert!(CellValue::from(None::<&str>).is_null());
        assert_eq!(CellValue::from(Some(3i64)), CellValue::Int(3));
    }
}
