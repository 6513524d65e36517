use crate::value::{FromValue, Kind, Value};

/// Rejected [`Array::push`]: the element's kind differs from the array's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("array of {expected} cannot hold a {found}")]
pub struct KindMismatch {
    pub expected: Kind,
    pub found: Kind,
}

/// An ordered, kind-homogeneous sequence of values.
///
/// Homogeneity is checked one level deep: `[[1, 2], ["a"]]` is valid because both elements
/// are arrays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    values: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` if it has the same kind as the existing elements.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<(), KindMismatch> {
        let value = value.into();
        if let Some(expected) = self.element_kind() {
            let found = value.kind();
            if found != expected {
                return Err(KindMismatch { expected, found });
            }
        }
        self.values.push(value);
        Ok(())
    }

    /// Kind shared by all elements, `None` while empty.
    pub fn element_kind(&self) -> Option<Kind> {
        self.values.first().map(Value::kind)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Each element converted to `T`, `None` where the conversion does not apply.
    pub fn values_of<T: FromValue>(&self) -> Vec<Option<T>> {
        self.values.iter().map(T::from_value).collect()
    }

    /// Each element viewed as a nested array, `None` where it is not one.
    pub fn nested_arrays(&self) -> Vec<Option<&Array>> {
        self.values.iter().map(Value::as_array).collect()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl TryFrom<Vec<Value>> for Array {
    type Error = KindMismatch;

    fn try_from(values: Vec<Value>) -> Result<Self, Self::Error> {
        let mut arr = Array::new();
        for v in values {
            arr.push(v)?;
        }
        Ok(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_mixed_scalars() {
        let mut arr = Array::new();
        arr.push(1).unwrap();
        let err = arr.push("a").unwrap_err();
        assert_eq!(err.expected, Kind::Integer);
        assert_eq!(err.found, Kind::String);
        assert_eq!(arr.len(), 1);
    }

    #[test]
    fn nested_arrays_may_differ_inside() {
        let inner_ints = Array::try_from(vec![Value::from(1), Value::from(2)]).unwrap();
        let inner_strs = Array::try_from(vec![Value::from("a")]).unwrap();
        let mut outer = Array::new();
        outer.push(inner_ints).unwrap();
        outer.push(inner_strs).unwrap();
        assert_eq!(outer.element_kind(), Some(Kind::Array));
        assert!(outer.nested_arrays().iter().all(Option::is_some));
    }

    #[test]
    fn values_of_reports_mismatches_as_none() {
        let arr = Array::try_from(vec![Value::from(1.5), Value::from(2.5)]).unwrap();
        assert_eq!(arr.values_of::<f64>(), vec![Some(1.5), Some(2.5)]);
        assert_eq!(arr.values_of::<i64>(), vec![None, None]);
    }
}
