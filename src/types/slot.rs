//! # Scan Destinations
//!
//! A cursor copies each column of the current row into a `Destination`. A
//! destination is either a typed `Slot` borrowed from the record being
//! decoded, or a discard sink for columns the record has no place for.
//!
//! ## Conversion Rules
//!
//! | Slot type          | Accepted values                                      |
//! |--------------------|------------------------------------------------------|
//! | `i64`              | INT, TIMESTAMP, decimal TEXT                         |
//! | `i8`..`u64`        | as `i64`, range-checked                              |
//! | `f64`, `f32`       | FLOAT, INT, numeric TEXT                             |
//! | `bool`             | BOOL, INT 0/1, TEXT `1 t T TRUE true True` and the   |
//! |                    | matching false forms                                 |
//! | `String`           | TEXT, UTF-8 BLOB, INT, FLOAT, BOOL                   |
//! | `Vec<u8>`          | BLOB, TEXT                                           |
//! | `OwnedValue`       | anything                                             |
//! | `Option<T>`        | NULL becomes `None`, everything else as `T`          |
//!
//! NULL into any slot that is not an `Option` fails. Numeric and boolean text
//! is parsed as-is, without trimming. A BLOB that is not valid UTF-8 cannot
//! become a `String`; scan it into `Vec<u8>` instead.

use std::any::type_name;
use std::fmt;

use eyre::{bail, eyre, Result, WrapErr};

use super::OwnedValue;

/// A typed, writable location that can receive one column value.
///
/// Implement this for your own types to control how a column is converted,
/// the way a custom scanner would.
pub trait Slot {
    fn assign(&mut self, value: &OwnedValue) -> Result<()>;
}

fn null_error<T: ?Sized>() -> eyre::Report {
    eyre!("converting NULL to {} is unsupported", type_name::<T>())
}

fn unsupported<T: ?Sized>(value: &OwnedValue) -> eyre::Report {
    eyre!(
        "unsupported conversion from {} to {}",
        value.kind(),
        type_name::<T>()
    )
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl Slot for i64 {
    fn assign(&mut self, value: &OwnedValue) -> Result<()> {
        *self = match value {
            OwnedValue::Int(i) | OwnedValue::Timestamp(i) => *i,
            OwnedValue::Text(s) => s
                .parse()
                .wrap_err_with(|| format!("converting {:?} to i64", s))?,
            OwnedValue::Null => return Err(null_error::<i64>()),
            other => return Err(unsupported::<i64>(other)),
        };
        Ok(())
    }
}

macro_rules! narrow_int_slot {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Slot for $ty {
                fn assign(&mut self, value: &OwnedValue) -> Result<()> {
                    if value.is_null() {
                        return Err(null_error::<$ty>());
                    }
                    let mut wide = 0i64;
                    wide.assign(value)
                        .map_err(|_| unsupported::<$ty>(value))?;
                    *self = <$ty>::try_from(wide).map_err(|_| {
                        eyre!("value {} out of range for {}", wide, type_name::<$ty>())
                    })?;
                    Ok(())
                }
            }
        )*
    };
}

narrow_int_slot!(i8, i16, i32, u8, u16, u32, u64);

impl Slot for f64 {
    fn assign(&mut self, value: &OwnedValue) -> Result<()> {
        *self = match value {
            OwnedValue::Float(f) => *f,
            OwnedValue::Int(i) => *i as f64,
            OwnedValue::Text(s) => s
                .parse()
                .wrap_err_with(|| format!("converting {:?} to f64", s))?,
            OwnedValue::Null => return Err(null_error::<f64>()),
            other => return Err(unsupported::<f64>(other)),
        };
        Ok(())
    }
}

impl Slot for f32 {
    fn assign(&mut self, value: &OwnedValue) -> Result<()> {
        if value.is_null() {
            return Err(null_error::<f32>());
        }
        let mut wide = 0f64;
        wide.assign(value).map_err(|_| unsupported::<f32>(value))?;
        if wide.is_finite() && wide.abs() > f32::MAX as f64 {
            bail!("value {} out of range for f32", wide);
        }
        *self = wide as f32;
        Ok(())
    }
}

impl Slot for bool {
    fn assign(&mut self, value: &OwnedValue) -> Result<()> {
        *self = match value {
            OwnedValue::Bool(b) => *b,
            OwnedValue::Int(0) => false,
            OwnedValue::Int(1) => true,
            OwnedValue::Int(i) => bail!("couldn't convert {} into type bool", i),
            OwnedValue::Text(s) => match parse_bool(s) {
                Some(b) => b,
                None => bail!("couldn't convert {:?} into type bool", s),
            },
            OwnedValue::Null => return Err(null_error::<bool>()),
            other => return Err(unsupported::<bool>(other)),
        };
        Ok(())
    }
}

impl Slot for String {
    fn assign(&mut self, value: &OwnedValue) -> Result<()> {
        *self = match value {
            OwnedValue::Text(s) => s.clone(),
            OwnedValue::Blob(b) => String::from_utf8(b.clone())
                .wrap_err("converting BLOB to String: invalid UTF-8")?,
            OwnedValue::Int(_) | OwnedValue::Float(_) | OwnedValue::Bool(_) => {
                value.display_string()
            }
            OwnedValue::Null => return Err(null_error::<String>()),
            other => return Err(unsupported::<String>(other)),
        };
        Ok(())
    }
}

impl Slot for Vec<u8> {
    fn assign(&mut self, value: &OwnedValue) -> Result<()> {
        *self = match value {
            OwnedValue::Blob(b) => b.clone(),
            OwnedValue::Text(s) => s.as_bytes().to_vec(),
            OwnedValue::Null => return Err(null_error::<Vec<u8>>()),
            other => return Err(unsupported::<Vec<u8>>(other)),
        };
        Ok(())
    }
}

impl Slot for OwnedValue {
    fn assign(&mut self, value: &OwnedValue) -> Result<()> {
        *self = value.clone();
        Ok(())
    }
}

impl<T: Slot + Default> Slot for Option<T> {
    fn assign(&mut self, value: &OwnedValue) -> Result<()> {
        if value.is_null() {
            *self = None;
            return Ok(());
        }
        match self {
            Some(inner) => inner.assign(value),
            None => {
                let mut inner = T::default();
                inner.assign(value)?;
                *self = Some(inner);
                Ok(())
            }
        }
    }
}

/// Where one column of the current row goes.
pub enum Destination<'a> {
    /// A typed slot inside the value being decoded.
    Slot(&'a mut dyn Slot),
    /// Accepts and drops the value.
    Discard,
}

impl Destination<'_> {
    pub fn assign(&mut self, value: &OwnedValue) -> Result<()> {
        match self {
            Destination::Slot(slot) => slot.assign(value),
            Destination::Discard => Ok(()),
        }
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, Destination::Discard)
    }
}

impl fmt::Debug for Destination<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Slot(_) => f.write_str("Slot"),
            Destination::Discard => f.write_str("Discard"),
        }
    }
}
