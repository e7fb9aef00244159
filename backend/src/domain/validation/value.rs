//! Runtime shape of a request field as seen by the rule evaluators.

/// A borrowed view of one field's current value.
///
/// `Optional` is a distinct shape: rules that expect a string or a number do
/// not look inside it, so they never fire on optional fields.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(usize),
    Optional(Option<Box<FieldValue<'a>>>),
}

impl FieldValue<'_> {
    /// Whether the value is the "empty" representative of its kind.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Str(s) => s.is_empty(),
            FieldValue::Int(n) => *n == 0,
            FieldValue::Float(n) => *n == 0.0,
            FieldValue::Bool(b) => !b,
            FieldValue::List(len) => *len == 0,
            FieldValue::Optional(inner) => inner.is_none(),
        }
    }
}

/// Conversion of request field types into a [`FieldValue`].
pub trait AsFieldValue {
    fn field_value(&self) -> FieldValue<'_>;
}

impl AsFieldValue for String {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl AsFieldValue for f64 {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(*self)
    }
}

impl AsFieldValue for i64 {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Int(*self)
    }
}

impl AsFieldValue for bool {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl<T> AsFieldValue for Vec<T> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::List(self.len())
    }
}

impl<T: AsFieldValue> AsFieldValue for Option<T> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Optional(self.as_ref().map(|value| Box::new(value.field_value())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_representatives() {
        assert!(String::new().field_value().is_empty());
        assert!(0.0_f64.field_value().is_empty());
        assert!(0_i64.field_value().is_empty());
        assert!(false.field_value().is_empty());
        assert!(Vec::<String>::new().field_value().is_empty());
        assert!(None::<f64>.field_value().is_empty());
    }

    #[test]
    fn test_present_optional_is_not_empty_even_when_inner_is() {
        let slot = Some(String::new());
        let value = slot.field_value();

        assert!(!value.is_empty());
        assert_eq!(value, FieldValue::Optional(Some(Box::new(FieldValue::Str("")))));
    }

    #[test]
    fn test_non_empty_values() {
        assert!(!"lunch".to_string().field_value().is_empty());
        assert!(!(-1.5_f64).field_value().is_empty());
        assert!(!true.field_value().is_empty());
        assert!(!vec![1, 2].field_value().is_empty());
    }
}
