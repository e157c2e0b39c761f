//! Decode failures.
//!
//! End of data is not an error: `Decoder::decode` reports it as
//! `Ok(Decoded::EndOfData)`. What remains is either a problem with the target
//! type, detected before the cursor is touched, or a failure reported by the
//! cursor itself, passed through unchanged.

use std::any::type_name;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeErrorKind {
    /// The target is a scalar, not a composite of named fields.
    NotARecord,
    /// Field resolution was requested for a type that maps its own columns.
    SelfMapped,
    /// A self-mapped type returned no column map.
    MissingColumnMap,
}

/// The decode target cannot receive a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    pub type_name: &'static str,
    pub kind: TypeErrorKind,
}

impl TypeError {
    pub(crate) fn not_a_record<T: ?Sized>() -> Self {
        Self {
            type_name: type_name::<T>(),
            kind: TypeErrorKind::NotARecord,
        }
    }

    pub(crate) fn self_mapped<T: ?Sized>() -> Self {
        Self {
            type_name: type_name::<T>(),
            kind: TypeErrorKind::SelfMapped,
        }
    }

    pub(crate) fn missing_column_map<T: ?Sized>() -> Self {
        Self {
            type_name: type_name::<T>(),
            kind: TypeErrorKind::MissingColumnMap,
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TypeErrorKind::NotARecord => write!(
                f,
                "cannot decode into value of type {}: not a structured record",
                self.type_name
            ),
            TypeErrorKind::SelfMapped => write!(
                f,
                "cannot resolve fields of type {}: it supplies its own column map",
                self.type_name
            ),
            TypeErrorKind::MissingColumnMap => write!(
                f,
                "cannot decode into value of type {}: no column map supplied",
                self.type_name
            ),
        }
    }
}

impl Error for TypeError {}

/// Why a `decode` call did not populate its target.
#[derive(Debug)]
pub enum DecodeError {
    Type(TypeError),
    /// Failure reported by the cursor's `columns` or `scan`.
    Source(eyre::Report),
}

impl DecodeError {
    pub fn is_type_error(&self) -> bool {
        matches!(self, DecodeError::Type(_))
    }

    pub fn type_error(&self) -> Option<&TypeError> {
        match self {
            DecodeError::Type(err) => Some(err),
            DecodeError::Source(_) => None,
        }
    }

    pub fn into_source(self) -> Option<eyre::Report> {
        match self {
            DecodeError::Source(report) => Some(report),
            DecodeError::Type(_) => None,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Type(err) => fmt::Display::fmt(err, f),
            DecodeError::Source(report) => fmt::Display::fmt(report, f),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DecodeError::Type(_) => None,
            DecodeError::Source(report) => report.chain().nth(1),
        }
    }
}

impl From<TypeError> for DecodeError {
    fn from(err: TypeError) -> Self {
        DecodeError::Type(err)
    }
}

impl From<eyre::Report> for DecodeError {
    fn from(report: eyre::Report) -> Self {
        DecodeError::Source(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::WrapErr;

    #[test]
    fn test_type_error_message_names_the_type() {
        let err = TypeError::not_a_record::<i64>();
        assert_eq!(
            err.to_string(),
            "cannot decode into value of type i64: not a structured record"
        );
    }

    #[test]
    fn test_source_error_displays_verbatim() {
        let report = eyre::eyre!("connection reset");
        let err = DecodeError::from(report);
        assert_eq!(err.to_string(), "connection reset");
        assert!(!err.is_type_error());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_source_chain_is_preserved() {
        let report: eyre::Report = Err::<(), _>(std::io::Error::other("disk"))
            .wrap_err("reading page")
            .unwrap_err();
        let err = DecodeError::Source(report);
        assert_eq!(err.to_string(), "reading page");
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk".to_string()));
        assert_eq!(err.into_source().map(|r| r.to_string()), Some("reading page".to_string()));
    }

    #[test]
    fn test_decode_error_converts_into_report() {
        fn lift() -> eyre::Result<()> {
            Err::<(), _>(DecodeError::from(TypeError::not_a_record::<bool>()))?;
            Ok(())
        }
        let report = lift().unwrap_err();
        assert!(report.downcast_ref::<DecodeError>().is_some());
    }
}
