//! Default values and field validation rules.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A declared default value for a field.
///
/// Presence is carried by the surrounding `Option<DefaultValue>`, never by
/// truthiness: `0`, `false`, and `""` are significant values. `Null` means an
/// explicit NULL default, which is distinct from having no default at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// A string literal.
    String(String),
    /// An integer literal.
    Int(i64),
    /// A float literal.
    Float(f64),
    /// A boolean literal.
    Bool(bool),
    /// An explicit NULL default.
    Null,
    /// A storage-side expression (e.g. `now()`).
    Expression(SmolStr),
    /// An array of values.
    Array(Vec<DefaultValue>),
}

impl DefaultValue {
    /// Try to get the value as a string literal.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if this is a storage-side expression.
    pub fn is_expression(&self) -> bool {
        matches!(self, Self::Expression(_))
    }
}

impl From<&str> for DefaultValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for DefaultValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for DefaultValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A declarative validation rule attached to a field.
///
/// Validations are not DDL by themselves, but rules that alter the effective
/// column shape (e.g. a length bound) participate in change detection. The
/// rule list compares order-sensitively, matching declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    /// Rule kind (e.g. `minLength`, `maxLength`, `pattern`).
    pub kind: SmolStr,
    /// Rule argument, if the kind takes one.
    pub value: Option<DefaultValue>,
    /// Message reported when the rule fails upstream.
    pub message: Option<String>,
}

impl Validation {
    /// Create a new validation rule.
    pub fn new(kind: impl Into<SmolStr>, value: Option<DefaultValue>) -> Self {
        Self {
            kind: kind.into(),
            value,
            message: None,
        }
    }

    /// Attach a failure message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_a_value() {
        // Absence is None, not a falsy literal.
        let none: Option<DefaultValue> = None;
        let zero = Some(DefaultValue::Int(0));
        assert_ne!(none, zero);
    }

    #[test]
    fn test_false_and_empty_string_are_values() {
        assert_ne!(None::<DefaultValue>, Some(DefaultValue::Bool(false)));
        assert_ne!(None::<DefaultValue>, Some(DefaultValue::String(String::new())));
    }

    #[test]
    fn test_null_is_distinct_from_absent() {
        assert_ne!(None::<DefaultValue>, Some(DefaultValue::Null));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(DefaultValue::Int(7).as_int(), Some(7));
        assert_eq!(DefaultValue::Bool(true).as_bool(), Some(true));
        assert_eq!(DefaultValue::from("a").as_string(), Some("a"));
        assert!(DefaultValue::Expression("now()".into()).is_expression());
    }

    #[test]
    fn test_validation_order_sensitive_equality() {
        let a = vec![
            Validation::new("minLength", Some(DefaultValue::Int(2))),
            Validation::new("maxLength", Some(DefaultValue::Int(64))),
        ];
        let mut b = a.clone();
        assert_eq!(a, b);
        b.reverse();
        assert_ne!(a, b);
    }
}
