//! Mapping from abstract field types to storage and host types.
//!
//! Both functions are total: unrecognized abstract types degrade to the
//! generic varchar/string mapping instead of erroring. Repeated fields always
//! map to a single untyped array storage type (`simple-array`), regardless of
//! element type.

use crate::model::AbstractType;

/// Storage column type for an abstract type.
pub fn storage_type(ty: &AbstractType, repeated: bool) -> &'static str {
    if repeated {
        return "simple-array";
    }

    match ty {
        AbstractType::String => "varchar",
        AbstractType::Text => "text",
        AbstractType::Boolean => "boolean",
        AbstractType::Int32 | AbstractType::UInt32 => "integer",
        AbstractType::Int64 | AbstractType::UInt64 | AbstractType::BigInt => "bigint",
        AbstractType::Float => "real",
        AbstractType::Double => "double precision",
        AbstractType::Date => "date",
        AbstractType::Time => "time",
        AbstractType::Timestamp => "timestamp",
        AbstractType::Json => "json",
        AbstractType::Jsonb => "jsonb",
        AbstractType::Uuid => "uuid",
        AbstractType::Bytes => "bytea",
        AbstractType::SimpleArray => "simple-array",
        AbstractType::Any => "jsonb",
        AbstractType::Custom(_) => "varchar",
    }
}

/// Host-language (Rust) type for an abstract type.
pub fn host_type(ty: &AbstractType, repeated: bool) -> &'static str {
    if repeated {
        // Elements are stored untyped, so the host side carries strings too.
        return "Vec<String>";
    }

    match ty {
        AbstractType::String | AbstractType::Text => "String",
        AbstractType::Boolean => "bool",
        AbstractType::Int32 => "i32",
        AbstractType::Int64 | AbstractType::BigInt => "i64",
        AbstractType::UInt32 => "u32",
        AbstractType::UInt64 => "u64",
        AbstractType::Float => "f32",
        AbstractType::Double => "f64",
        AbstractType::Date => "chrono::NaiveDate",
        AbstractType::Time => "chrono::NaiveTime",
        AbstractType::Timestamp => "chrono::DateTime<chrono::Utc>",
        AbstractType::Json | AbstractType::Jsonb | AbstractType::Any => "serde_json::Value",
        AbstractType::Uuid => "uuid::Uuid",
        AbstractType::Bytes => "Vec<u8>",
        AbstractType::SimpleArray => "Vec<String>",
        AbstractType::Custom(_) => "String",
    }
}
