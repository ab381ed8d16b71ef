//! Abstract field types for contract definitions.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The abstract type of a contract field.
///
/// Abstract types are storage-agnostic: the [`crate::mapper`] module maps them
/// to a storage column type and to a host-language type. Unrecognized input is
/// preserved as [`AbstractType::Custom`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbstractType {
    /// Short string (maps to VARCHAR).
    String,
    /// Unbounded text.
    Text,
    /// Boolean flag.
    Boolean,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit unsigned integer.
    UInt32,
    /// 64-bit unsigned integer.
    UInt64,
    /// Arbitrary-precision integer (maps to BIGINT).
    BigInt,
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
    /// Date without time of day.
    Date,
    /// Time without date.
    Time,
    /// Date and time.
    Timestamp,
    /// JSON document stored as text.
    Json,
    /// JSON document stored in binary form.
    Jsonb,
    /// UUID value.
    Uuid,
    /// Raw binary data.
    Bytes,
    /// Comma-separated array of scalars.
    SimpleArray,
    /// Schemaless value (maps to structured JSON storage).
    Any,
    /// An unrecognized type name, carried through verbatim.
    Custom(SmolStr),
}

impl AbstractType {
    /// Parse an abstract type from its declared name.
    ///
    /// Never fails: names outside the known set become [`AbstractType::Custom`].
    pub fn parse(s: &str) -> Self {
        match s {
            "string" => Self::String,
            "text" => Self::Text,
            "boolean" | "bool" => Self::Boolean,
            "int32" | "int" => Self::Int32,
            "int64" => Self::Int64,
            "uint32" => Self::UInt32,
            "uint64" => Self::UInt64,
            "bigint" => Self::BigInt,
            "float" => Self::Float,
            "double" => Self::Double,
            "date" => Self::Date,
            "time" => Self::Time,
            "timestamp" | "datetime" => Self::Timestamp,
            "json" => Self::Json,
            "jsonb" => Self::Jsonb,
            "uuid" => Self::Uuid,
            "bytes" => Self::Bytes,
            "simpleArray" | "simple-array" => Self::SimpleArray,
            "any" => Self::Any,
            other => Self::Custom(other.into()),
        }
    }

    /// Get the declared name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::BigInt => "bigint",
            Self::Float => "float",
            Self::Double => "double",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Json => "json",
            Self::Jsonb => "jsonb",
            Self::Uuid => "uuid",
            Self::Bytes => "bytes",
            Self::SimpleArray => "simpleArray",
            Self::Any => "any",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl std::fmt::Display for AbstractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!(AbstractType::parse("string"), AbstractType::String);
        assert_eq!(AbstractType::parse("int32"), AbstractType::Int32);
        assert_eq!(AbstractType::parse("bool"), AbstractType::Boolean);
        assert_eq!(AbstractType::parse("datetime"), AbstractType::Timestamp);
        assert_eq!(AbstractType::parse("simple-array"), AbstractType::SimpleArray);
    }

    #[test]
    fn test_parse_unknown_type_is_custom() {
        assert_eq!(
            AbstractType::parse("geography"),
            AbstractType::Custom("geography".into())
        );
    }

    #[test]
    fn test_round_trip() {
        for name in ["string", "text", "uuid", "jsonb", "any", "uint64"] {
            assert_eq!(AbstractType::parse(name).as_str(), name);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AbstractType::Timestamp), "timestamp");
        assert_eq!(format!("{}", AbstractType::Custom("point".into())), "point");
    }
}
