//! Value coercion from untyped JSON values to declared parameter kinds
//!
//! JSON decodes every numeric literal into a single 64-bit float
//! representation, so each numeric target kind is re-derived from that one
//! representation here. Narrowing casts truncate toward zero and saturate
//! at the target bounds (NaN becomes zero), per Rust `as` conversion rules.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Semantic kind of one declared operation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Str,
    Seq,
    Map,
    Record,
    Ref,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Str => "str",
            Self::Seq => "seq",
            Self::Map => "map",
            Self::Record => "record",
            Self::Ref => "ref",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic parameter-type failure. Which aspect mismatched (JSON type,
/// range, composite shape) is deliberately not distinguished.
#[derive(Debug, Error)]
#[error("type error: value does not match {expected} parameter")]
pub struct CoerceError {
    pub expected: ParamKind,
}

/// Converts one untyped JSON value into the declared parameter kind.
///
/// Bool and string targets require an exact JSON type match. Composite
/// targets pass the value through unchanged when the runtime shape matches:
/// `Seq` requires an array; `Map`, `Record`, and `Ref` require an object.
pub fn coerce(value: &Value, kind: ParamKind) -> Result<Value, CoerceError> {
    match kind {
        ParamKind::I8 => Ok(Value::from(number(value, kind)? as i8)),
        ParamKind::I16 => Ok(Value::from(number(value, kind)? as i16)),
        ParamKind::I32 => Ok(Value::from(number(value, kind)? as i32)),
        ParamKind::I64 => Ok(Value::from(number(value, kind)? as i64)),
        ParamKind::U8 => Ok(Value::from(number(value, kind)? as u8)),
        ParamKind::U16 => Ok(Value::from(number(value, kind)? as u16)),
        ParamKind::U32 => Ok(Value::from(number(value, kind)? as u32)),
        ParamKind::U64 => Ok(Value::from(number(value, kind)? as u64)),
        ParamKind::F32 => Ok(Value::from(number(value, kind)? as f32)),
        ParamKind::F64 => Ok(Value::from(number(value, kind)?)),
        ParamKind::Bool => pass_through(value, kind, Value::is_boolean),
        ParamKind::Str => pass_through(value, kind, Value::is_string),
        ParamKind::Seq => pass_through(value, kind, Value::is_array),
        ParamKind::Map | ParamKind::Record | ParamKind::Ref => {
            pass_through(value, kind, Value::is_object)
        }
    }
}

fn number(value: &Value, kind: ParamKind) -> Result<f64, CoerceError> {
    value.as_f64().ok_or(CoerceError { expected: kind })
}

fn pass_through(
    value: &Value,
    kind: ParamKind,
    matches: impl Fn(&Value) -> bool,
) -> Result<Value, CoerceError> {
    if matches(value) {
        Ok(value.clone())
    } else {
        Err(CoerceError { expected: kind })
    }
}
