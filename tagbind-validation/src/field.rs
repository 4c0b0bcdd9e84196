// Field values as seen by the rule set

use crate::Node;
use std::borrow::Cow;

/// Read-only view of a field's current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Absent optional value
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
    /// Sequence with the given element count
    Seq(usize),
    /// Nested struct; its own fields carry the rules
    Struct,
}

impl<'a> Value<'a> {
    /// Whether this is the zero value for its kind.
    pub fn is_zero(&self) -> bool {
        match *self {
            Value::Nil => true,
            Value::Bool(b) => !b,
            Value::Int(n) => n == 0,
            Value::Uint(n) => n == 0,
            Value::Float(n) => n == 0.0,
            Value::Str(s) => s.is_empty(),
            Value::Seq(len) => len == 0,
            Value::Struct => false,
        }
    }

    /// Length for size rules: characters of a string, elements of a sequence.
    pub fn len(&self) -> Option<usize> {
        match *self {
            Value::Str(s) => Some(s.chars().count()),
            Value::Seq(len) => Some(len),
            _ => None,
        }
    }

    /// Textual rendering of scalar values.
    pub fn text(&self) -> Option<Cow<'a, str>> {
        match *self {
            Value::Str(s) => Some(Cow::Borrowed(s)),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Int(n) => Some(Cow::Owned(n.to_string())),
            Value::Uint(n) => Some(Cow::Owned(n.to_string())),
            Value::Float(n) => Some(Cow::Owned(n.to_string())),
            Value::Nil | Value::Seq(_) | Value::Struct => None,
        }
    }

    /// Numeric reading for range checks; strings are parsed.
    pub fn number(&self) -> Option<f64> {
        match *self {
            Value::Int(n) => Some(n as f64),
            Value::Uint(n) => Some(n as f64),
            Value::Float(n) => Some(n),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// A struct field the walker can inspect.
///
/// Implemented for the primitive types, `String`, `Option`, `Box`,
/// sequences, and every `#[derive(Binding)]` struct.
pub trait Field {
    fn value(&self) -> Value<'_>;

    fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Store the value described by `raw`. Returns `false` when `raw` does
    /// not convert to this type.
    fn apply_default(&mut self, _raw: &str) -> bool {
        false
    }

    /// Build a value of this type from a `Default(..)` parameter.
    fn parse_default(_raw: &str) -> Option<Self>
    where
        Self: Sized,
    {
        None
    }

    /// Nested structs reachable through this field.
    fn nodes(&mut self) -> Vec<&mut dyn Node> {
        Vec::new()
    }
}

/// Coerce a concrete field into the trait object the schema stores.
pub fn as_field<F: Field>(field: &mut F) -> &mut dyn Field {
    field
}

fn assign<F: Field>(slot: &mut F, raw: &str) -> bool {
    match F::parse_default(raw) {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

macro_rules! scalar_field {
    ($variant:ident as $repr:ty: $($ty:ty),+) => {
        $(
            impl Field for $ty {
                fn value(&self) -> Value<'_> {
                    Value::$variant(*self as $repr)
                }

                fn apply_default(&mut self, raw: &str) -> bool {
                    assign(self, raw)
                }

                fn parse_default(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }
            }
        )+
    };
}

scalar_field!(Int as i64: i8, i16, i32, i64, isize);
scalar_field!(Uint as u64: u8, u16, u32, u64, usize);
scalar_field!(Float as f64: f32, f64);

impl Field for bool {
    fn value(&self) -> Value<'_> {
        Value::Bool(*self)
    }

    fn apply_default(&mut self, raw: &str) -> bool {
        assign(self, raw)
    }

    fn parse_default(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl Field for String {
    fn value(&self) -> Value<'_> {
        Value::Str(self)
    }

    fn apply_default(&mut self, raw: &str) -> bool {
        assign(self, raw)
    }

    fn parse_default(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

// `None` is zero and never descended into; `Some` is never zero, even when
// the wrapped value is.
impl<T: Field> Field for Option<T> {
    fn value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.value(),
            None => Value::Nil,
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn apply_default(&mut self, raw: &str) -> bool {
        match self {
            Some(inner) => inner.apply_default(raw),
            None => assign(self, raw),
        }
    }

    fn parse_default(raw: &str) -> Option<Self> {
        T::parse_default(raw).map(Some)
    }

    fn nodes(&mut self) -> Vec<&mut dyn Node> {
        match self {
            Some(inner) => inner.nodes(),
            None => Vec::new(),
        }
    }
}

impl<T: Field> Field for Box<T> {
    fn value(&self) -> Value<'_> {
        (**self).value()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn apply_default(&mut self, raw: &str) -> bool {
        (**self).apply_default(raw)
    }

    fn parse_default(raw: &str) -> Option<Self> {
        T::parse_default(raw).map(Box::new)
    }

    fn nodes(&mut self) -> Vec<&mut dyn Node> {
        (**self).nodes()
    }
}

impl<T: Field> Field for Vec<T> {
    fn value(&self) -> Value<'_> {
        Value::Seq(self.len())
    }

    fn nodes(&mut self) -> Vec<&mut dyn Node> {
        self.iter_mut().flat_map(Field::nodes).collect()
    }
}

impl<T: Field> Field for [T] {
    fn value(&self) -> Value<'_> {
        Value::Seq(self.len())
    }

    fn nodes(&mut self) -> Vec<&mut dyn Node> {
        self.iter_mut().flat_map(Field::nodes).collect()
    }
}

impl<T: Field, const N: usize> Field for [T; N] {
    fn value(&self) -> Value<'_> {
        Value::Seq(N)
    }

    fn nodes(&mut self) -> Vec<&mut dyn Node> {
        self.iter_mut().flat_map(Field::nodes).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values() {
        assert!(String::new().is_zero());
        assert!(!"x".to_string().is_zero());
        assert!(0i32.is_zero());
        assert!(0u8.is_zero());
        assert!(0.0f64.is_zero());
        assert!(false.is_zero());
        assert!(Vec::<String>::new().is_zero());
        assert!(None::<String>.is_zero());
        assert!(!Some(String::new()).is_zero());
    }

    #[test]
    fn test_len_counts_characters() {
        assert_eq!("héllo".to_string().value().len(), Some(5));
        assert_eq!(vec![1, 2, 3].value().len(), Some(3));
        assert_eq!(7i64.value().len(), None);
    }

    #[test]
    fn test_text_rendering() {
        assert_eq!(42i32.value().text().as_deref(), Some("42"));
        assert_eq!(true.value().text().as_deref(), Some("true"));
        assert_eq!(Value::Seq(2).text(), None);
        assert_eq!(Value::Str(" 3 ").number(), Some(3.0));
        assert_eq!(Value::Str("abc").number(), None);
    }

    #[test]
    fn test_apply_default() {
        let mut name = String::new();
        assert!(name.apply_default("anon"));
        assert_eq!(name, "anon");

        let mut count = 0u32;
        assert!(count.apply_default("12"));
        assert_eq!(count, 12);
        assert!(!count.apply_default("twelve"));
        assert_eq!(count, 12);

        let mut maybe: Option<i64> = None;
        assert!(maybe.apply_default("-4"));
        assert_eq!(maybe, Some(-4));

        let mut tags: Vec<String> = Vec::new();
        assert!(!tags.apply_default("a"));
    }

    #[test]
    fn test_scalars_have_no_nodes() {
        let mut tags = vec!["a".to_string()];
        assert!(tags.nodes().is_empty());
        let mut missing: Option<String> = None;
        assert!(missing.nodes().is_empty());
    }
}
