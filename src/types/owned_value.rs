//! # Heap-Owned Column Values
//!
//! This module provides `OwnedValue`, the fully-owned value a cursor hands to
//! a scan destination for one column of the current row.
//!
//! ## Design
//!
//! Cursors produce rows from arbitrary sources (in-memory fixtures, SQLite
//! statements, network protocols), so the value type owns all of its data.
//! A destination borrows the value only for the duration of
//! `Slot::assign`, which copies whatever it needs.
//!
//! ## Conversion
//!
//! ```ignore
//! let v: OwnedValue = 42i64.into();
//! let v: OwnedValue = "alice".into();
//! let v: OwnedValue = None::<i64>.into(); // OwnedValue::Null
//! ```

/// Fully-owned value of a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    /// Microseconds since the Unix epoch.
    Timestamp(i64),
}

impl OwnedValue {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, OwnedValue::Null)
    }

    /// Short type label used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            OwnedValue::Null => "NULL",
            OwnedValue::Bool(_) => "BOOL",
            OwnedValue::Int(_) => "INT",
            OwnedValue::Float(_) => "FLOAT",
            OwnedValue::Text(_) => "TEXT",
            OwnedValue::Blob(_) => "BLOB",
            OwnedValue::Timestamp(_) => "TIMESTAMP",
        }
    }

    /// Formats the value as a display string.
    pub fn display_string(&self) -> String {
        match self {
            OwnedValue::Null => "NULL".to_string(),
            OwnedValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            OwnedValue::Int(i) => i.to_string(),
            OwnedValue::Float(f) => f.to_string(),
            OwnedValue::Text(s) => s.clone(),
            OwnedValue::Blob(b) => format!("\\x{}", hex::encode(b)),
            OwnedValue::Timestamp(ts) => format!("ts:{}", ts),
        }
    }
}

mod hex {
    pub fn encode(data: &[u8]) -> String {
        data.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl From<bool> for OwnedValue {
    fn from(b: bool) -> Self {
        OwnedValue::Bool(b)
    }
}

impl From<i64> for OwnedValue {
    fn from(i: i64) -> Self {
        OwnedValue::Int(i)
    }
}

impl From<i32> for OwnedValue {
    fn from(i: i32) -> Self {
        OwnedValue::Int(i as i64)
    }
}

impl From<f64> for OwnedValue {
    fn from(f: f64) -> Self {
        OwnedValue::Float(f)
    }
}

impl From<String> for OwnedValue {
    fn from(s: String) -> Self {
        OwnedValue::Text(s)
    }
}

impl From<&str> for OwnedValue {
    fn from(s: &str) -> Self {
        OwnedValue::Text(s.to_string())
    }
}

impl From<Vec<u8>> for OwnedValue {
    fn from(b: Vec<u8>) -> Self {
        OwnedValue::Blob(b)
    }
}

impl From<&[u8]> for OwnedValue {
    fn from(b: &[u8]) -> Self {
        OwnedValue::Blob(b.to_vec())
    }
}

impl<T: Into<OwnedValue>> From<Option<T>> for OwnedValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(OwnedValue::Null, Into::into)
    }
}
