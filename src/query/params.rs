// Parameter Binding
//
// Callers describe each bound value with an explicit SqlParam variant. The
// variant order mirrors the dispatch priority: boolean, bytes, double, float,
// 32-bit int, 64-bit int, 16-bit int, text. Anything else is bound as text.

use std::fmt;

use rusqlite::Statement;

/// A value to bind to a statement placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Boolean(bool),
    Bytes(Vec<u8>),
    Double(f64),
    Float(f32),
    Int(i32),
    Long(i64),
    Short(i16),
    Text(String),
}

impl SqlParam {
    /// Bind any other value by its text representation
    pub fn text_of(value: impl fmt::Display) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        SqlParam::Boolean(v)
    }
}

impl From<Vec<u8>> for SqlParam {
    fn from(v: Vec<u8>) -> Self {
        SqlParam::Bytes(v)
    }
}

impl From<&[u8]> for SqlParam {
    fn from(v: &[u8]) -> Self {
        SqlParam::Bytes(v.to_vec())
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        SqlParam::Double(v)
    }
}

impl From<f32> for SqlParam {
    fn from(v: f32) -> Self {
        SqlParam::Float(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(v)
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Long(v)
    }
}

impl From<i16> for SqlParam {
    fn from(v: i16) -> Self {
        SqlParam::Short(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

/// Build a `Vec<SqlParam>` from heterogeneous values
#[macro_export]
macro_rules! sql_params {
    () => {
        ::std::vec::Vec::<$crate::query::params::SqlParam>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::query::params::SqlParam::from($value)),+]
    };
}

/// Bind `values` to the placeholders of `stmt`, in order.
///
/// The number of values must match the statement's placeholder count.
pub fn bind(stmt: &mut Statement<'_>, values: &[SqlParam]) -> rusqlite::Result<()> {
    let expected = stmt.parameter_count();
    if values.len() != expected {
        return Err(rusqlite::Error::InvalidParameterCount(values.len(), expected));
    }

    for (i, value) in values.iter().enumerate() {
        let idx = i + 1;
        match value {
            SqlParam::Boolean(b) => stmt.raw_bind_parameter(idx, *b)?,
            SqlParam::Bytes(b) => stmt.raw_bind_parameter(idx, b.as_slice())?,
            SqlParam::Double(d) => stmt.raw_bind_parameter(idx, *d)?,
            SqlParam::Float(f) => stmt.raw_bind_parameter(idx, *f)?,
            SqlParam::Int(n) => stmt.raw_bind_parameter(idx, *n)?,
            SqlParam::Long(n) => stmt.raw_bind_parameter(idx, *n)?,
            SqlParam::Short(n) => stmt.raw_bind_parameter(idx, *n)?,
            SqlParam::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
    }
    Ok(())
}
