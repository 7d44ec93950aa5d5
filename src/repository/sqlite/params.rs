//! Bind value conversion from sea-query to rusqlite.
//!
//! Statements are built with sea-query and executed over rusqlite, so the
//! builder's `Values` must become SQLite bind values. rusqlite takes owned
//! values, which keeps this a single pass.

use rusqlite::types::Value as SqlValue;
use sea_query::{Value, Values};

use crate::error::CatalogError;

/// Convert builder values into SQLite bind values.
///
/// # Errors
///
/// Returns [`CatalogError::Storage`] for value types the SQLite backend
/// has no binding for.
pub(crate) fn bind_values(values: &Values) -> Result<Vec<SqlValue>, CatalogError> {
    values.iter().map(convert).collect()
}

fn convert(value: &Value) -> Result<SqlValue, CatalogError> {
    match value {
        Value::Bool(Some(b)) => Ok(SqlValue::Integer(i64::from(*b))),
        Value::TinyInt(Some(i)) => Ok(SqlValue::Integer(i64::from(*i))),
        Value::SmallInt(Some(i)) => Ok(SqlValue::Integer(i64::from(*i))),
        Value::Int(Some(i)) => Ok(SqlValue::Integer(i64::from(*i))),
        Value::BigInt(Some(i)) => Ok(SqlValue::Integer(*i)),
        Value::TinyUnsigned(Some(u)) => Ok(SqlValue::Integer(i64::from(*u))),
        Value::SmallUnsigned(Some(u)) => Ok(SqlValue::Integer(i64::from(*u))),
        Value::Unsigned(Some(u)) => Ok(SqlValue::Integer(i64::from(*u))),
        Value::BigUnsigned(Some(u)) => {
            if *u > i64::MAX as u64 {
                return Err(CatalogError::storage(format!(
                    "unsigned value {u} exceeds i64::MAX and cannot be bound"
                )));
            }
            Ok(SqlValue::Integer(*u as i64))
        }
        Value::Float(Some(f)) => Ok(SqlValue::Real(f64::from(*f))),
        Value::Double(Some(d)) => Ok(SqlValue::Real(*d)),
        Value::String(Some(s)) => Ok(SqlValue::Text(s.clone())),
        Value::Bytes(Some(b)) => Ok(SqlValue::Blob(b.clone())),
        Value::Bool(None)
        | Value::TinyInt(None)
        | Value::SmallInt(None)
        | Value::Int(None)
        | Value::BigInt(None)
        | Value::TinyUnsigned(None)
        | Value::SmallUnsigned(None)
        | Value::Unsigned(None)
        | Value::BigUnsigned(None)
        | Value::Float(None)
        | Value::Double(None)
        | Value::String(None)
        | Value::Bytes(None) => Ok(SqlValue::Null),
        other => Err(CatalogError::storage(format!(
            "unsupported bind value in query: {other:?}"
        ))),
    }
}
