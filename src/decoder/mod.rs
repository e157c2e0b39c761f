//! # Decoder
//!
//! `Decoder` is the entry point: it owns a cursor and a `FieldResolver` for
//! one result set and turns one row into one record per `decode` call.
//!
//! ## Decode Pipeline
//!
//! ```text
//! decode(&mut target)
//!     │
//!     ├── no cursor bound ─────────────────────► Ok(EndOfData)
//!     ├── already exhausted ───────────────────► Ok(EndOfData)
//!     ├── opaque target, or mapped without map ► Err(Type)      (row kept)
//!     ├── cursor.advance() == false ───────────► Ok(EndOfData)  (now Exhausted)
//!     │
//!     ▼
//! columns (fetched once, reused for every row)
//!     │
//!     ▼
//! build_destinations ── self-mapped? ── yes ──► target's ColumnMap
//!     │                      │
//!     │                      no ─────────────► FieldResolver (cached per type)
//!     ▼
//! cursor.scan(destinations) ── Err ──────────► Err(Source)    (verbatim)
//!     │
//!     ▼
//! Ok(Row)
//! ```
//!
//! ## State Machine
//!
//! | State       | Meaning                                   | `decode` returns |
//! |-------------|-------------------------------------------|------------------|
//! | `Ready`     | cursor bound, rows may remain             | row or error     |
//! | `Exhausted` | cursor reported no more rows              | `EndOfData`      |
//! | `Closed`    | no cursor bound                           | `EndOfData`      |
//!
//! Errors never move the decoder out of `Ready`; the next call goes on to the
//! next row. There is no retry, look-ahead or re-decoding of a row.
//!
//! ## Thread Safety
//!
//! A decoder has no internal locking. It is `Send` when its cursor is, and
//! must be driven by one caller at a time.

mod builder;
mod error;
mod materialize;

pub use builder::DecoderBuilder;
pub use error::{DecodeError, TypeError, TypeErrorKind};

use std::marker::PhantomData;

use tracing::debug;

use crate::cursor::Cursor;
use crate::record::Record;
use crate::resolver::FieldResolver;
use materialize::{build_destinations, check_target};

/// Outcome of a successful `decode` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Decoded {
    /// The target now holds the next row.
    Row,
    /// No rows remain; the target was not touched.
    EndOfData,
}

impl Decoded {
    pub fn is_row(self) -> bool {
        self == Decoded::Row
    }

    pub fn is_end(self) -> bool {
        self == Decoded::EndOfData
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Ready,
    Exhausted,
    Closed,
}

/// Decoding session over one result set.
#[derive(Debug)]
pub struct Decoder<C> {
    cursor: Option<C>,
    resolver: FieldResolver,
    columns: Option<Vec<String>>,
    exhausted: bool,
}

impl<C> Default for Decoder<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C> Decoder<C> {
    /// A session with no source; every `decode` reports end of data.
    pub fn empty() -> Self {
        Self::with_parts(None, FieldResolver::new())
    }

    pub fn builder() -> DecoderBuilder<C> {
        DecoderBuilder::new()
    }

    pub(crate) fn with_parts(cursor: Option<C>, resolver: FieldResolver) -> Self {
        Self {
            cursor,
            resolver,
            columns: None,
            exhausted: false,
        }
    }

    pub fn state(&self) -> DecoderState {
        match (&self.cursor, self.exhausted) {
            (None, _) => DecoderState::Closed,
            (Some(_), true) => DecoderState::Exhausted,
            (Some(_), false) => DecoderState::Ready,
        }
    }

    pub fn resolver(&self) -> &FieldResolver {
        &self.resolver
    }

    /// Ends the session, keeping the resolver cache for the next one.
    pub fn into_resolver(self) -> FieldResolver {
        self.resolver
    }

    pub fn cursor(&self) -> Option<&C> {
        self.cursor.as_ref()
    }

    pub fn into_cursor(self) -> Option<C> {
        self.cursor
    }
}

impl<C: Cursor> Decoder<C> {
    pub fn new(cursor: C) -> Self {
        Self::with_parts(Some(cursor), FieldResolver::new())
    }

    /// Binds `cursor` if present; an absent source behaves as already exhausted.
    pub fn from_option(cursor: Option<C>) -> Self {
        Self::with_parts(cursor, FieldResolver::new())
    }

    /// Decodes the next row into `target`.
    pub fn decode<T: Record>(&mut self, target: &mut T) -> Result<Decoded, DecodeError> {
        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(Decoded::EndOfData);
        };
        if self.exhausted {
            return Ok(Decoded::EndOfData);
        }
        check_target(target)?;

        if !cursor.advance() {
            debug!("cursor exhausted");
            self.exhausted = true;
            return Ok(Decoded::EndOfData);
        }

        if self.columns.is_none() {
            self.columns = Some(cursor.columns().map_err(DecodeError::Source)?);
        }
        let columns = self.columns.as_deref().unwrap_or(&[]);

        let mut dest = build_destinations(columns, target, &mut self.resolver)?;
        cursor.scan(&mut dest).map_err(DecodeError::Source)?;
        Ok(Decoded::Row)
    }

    /// Iterates the remaining rows as fresh `T` values.
    ///
    /// The iterator stops after end of data or after the first error.
    pub fn rows<T: Record + Default>(&mut self) -> Rows<'_, C, T> {
        Rows {
            decoder: self,
            done: false,
            _record: PhantomData,
        }
    }
}

/// Iterator returned by [`Decoder::rows`].
pub struct Rows<'d, C, T> {
    decoder: &'d mut Decoder<C>,
    done: bool,
    _record: PhantomData<fn() -> T>,
}

impl<C: Cursor, T: Record + Default> Iterator for Rows<'_, C, T> {
    type Item = Result<T, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut record = T::default();
        match self.decoder.decode(&mut record) {
            Ok(Decoded::Row) => Some(Ok(record)),
            Ok(Decoded::EndOfData) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Decodes the cursor's current row into `target` without a session.
///
/// The cursor is not advanced; call `advance` first. Resolution uses a
/// throwaway resolver, so nothing is cached between calls.
pub fn decode_row<C, T>(cursor: &mut C, target: &mut T) -> Result<(), DecodeError>
where
    C: Cursor + ?Sized,
    T: Record,
{
    decode_row_with(cursor, target, &mut FieldResolver::new())
}

/// Like [`decode_row`], resolving through a caller-owned cache.
pub fn decode_row_with<C, T>(
    cursor: &mut C,
    target: &mut T,
    resolver: &mut FieldResolver,
) -> Result<(), DecodeError>
where
    C: Cursor + ?Sized,
    T: Record,
{
    check_target(target)?;
    let columns = cursor.columns().map_err(DecodeError::Source)?;
    let mut dest = build_destinations(&columns, target, resolver)?;
    cursor.scan(&mut dest).map_err(DecodeError::Source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{Row, RowCursor};
    use crate::record::{Layout, Slots};
    use crate::types::OwnedValue;

    crate::record! {
        #[derive(Debug, Default, PartialEq)]
        pub struct Sample {
            pub id: i64,
            pub amount: f64,
        }
    }

    /// Claims to be self-mapped but never supplies a map.
    #[derive(Default)]
    struct NoMap;

    impl Record for NoMap {
        fn layout() -> Layout {
            Layout::Mapped
        }

        fn slots(&mut self) -> Slots<'_> {
            Slots::new()
        }
    }

    fn cursor() -> RowCursor {
        RowCursor::new(
            ["id", "amount"],
            vec![
                Row::new(vec![OwnedValue::Int(1), OwnedValue::Float(1.5)]),
                Row::new(vec![OwnedValue::Int(2), OwnedValue::Float(2.5)]),
            ],
        )
    }

    #[test]
    fn test_zero_value_decoder_reports_end_of_data() {
        let mut decoder: Decoder<RowCursor> = Decoder::default();
        let mut sample = Sample::default();
        assert_eq!(decoder.decode(&mut sample).unwrap(), Decoded::EndOfData);
        assert_eq!(decoder.state(), DecoderState::Closed);
    }

    #[test]
    fn test_absent_source_beats_type_error() {
        let mut decoder = Decoder::<RowCursor>::from_option(None);
        let mut scalar = 0i64;
        assert_eq!(decoder.decode(&mut scalar).unwrap(), Decoded::EndOfData);
    }

    #[test]
    fn test_walks_rows_then_stays_exhausted() {
        let mut decoder = Decoder::new(cursor());
        let mut sample = Sample::default();

        assert!(decoder.decode(&mut sample).unwrap().is_row());
        assert_eq!(sample, Sample { id: 1, amount: 1.5 });
        assert!(decoder.decode(&mut sample).unwrap().is_row());
        assert_eq!(sample, Sample { id: 2, amount: 2.5 });

        for _ in 0..3 {
            assert!(decoder.decode(&mut sample).unwrap().is_end());
        }
        assert_eq!(decoder.state(), DecoderState::Exhausted);
        assert_eq!(decoder.cursor().map(RowCursor::remaining), Some(0));
    }

    #[test]
    fn test_type_error_does_not_consume_a_row() {
        let mut decoder = Decoder::new(cursor());
        let mut scalar = 0i64;
        let err = decoder.decode(&mut scalar).unwrap_err();
        assert!(err.is_type_error());
        assert_eq!(decoder.state(), DecoderState::Ready);

        let mut sample = Sample::default();
        assert!(decoder.decode(&mut sample).unwrap().is_row());
        assert_eq!(sample.id, 1);
    }

    #[test]
    fn test_missing_column_map_does_not_consume_a_row() {
        let mut decoder = Decoder::new(cursor());
        let err = decoder.decode(&mut NoMap).unwrap_err();
        assert_eq!(
            err.type_error().map(|e| e.kind),
            Some(TypeErrorKind::MissingColumnMap)
        );
        assert_eq!(decoder.cursor().map(RowCursor::remaining), Some(2));

        let mut sample = Sample::default();
        assert!(decoder.decode(&mut sample).unwrap().is_row());
        assert_eq!(sample.id, 1);
    }

    #[test]
    fn test_missing_column_map_fails_before_single_shot_scan() {
        let mut rows = cursor();
        assert!(rows.advance());
        let err = decode_row(&mut rows, &mut NoMap).unwrap_err();
        assert!(err.is_type_error());
        assert_eq!(rows.remaining(), 1);
    }

    #[test]
    fn test_empty_cursor_checks_target_before_reporting_end() {
        let mut decoder = Decoder::new(RowCursor::empty(["id"]));
        let err = decoder.decode(&mut 0i64).unwrap_err();
        assert_eq!(
            err.type_error().map(|e| e.kind),
            Some(TypeErrorKind::NotARecord)
        );
        assert_eq!(decoder.state(), DecoderState::Ready);

        let mut sample = Sample::default();
        assert_eq!(decoder.decode(&mut sample).unwrap(), Decoded::EndOfData);
        assert_eq!(decoder.state(), DecoderState::Exhausted);
    }

    #[test]
    fn test_rows_iterator_collects_remaining() {
        let mut decoder = Decoder::new(cursor());
        let all: Vec<Sample> = decoder.rows().collect::<Result<_, _>>().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].amount, 2.5);
        assert_eq!(decoder.resolver().computed(), 1);
    }

    #[test]
    fn test_rows_iterator_stops_after_error() {
        let mut decoder = Decoder::new(cursor());
        let mut rows = decoder.rows::<i64>();
        assert!(rows.next().unwrap().is_err());
        assert!(rows.next().is_none());
    }

    #[test]
    fn test_decode_row_does_not_advance() {
        let mut rows = cursor();
        assert!(rows.advance());
        let mut a = Sample::default();
        let mut b = Sample::default();
        decode_row(&mut rows, &mut a).unwrap();
        decode_row(&mut rows, &mut b).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id, 1);
    }

    #[test]
    fn test_decode_row_with_shares_cache() {
        let mut rows = cursor();
        let mut resolver = FieldResolver::new();
        let mut sample = Sample::default();
        while rows.advance() {
            decode_row_with(&mut rows, &mut sample, &mut resolver).unwrap();
        }
        assert_eq!(sample.id, 2);
        assert_eq!(resolver.computed(), 1);
    }

    #[test]
    fn test_builder_carries_resolver() {
        let mut first = Decoder::new(cursor());
        let mut sample = Sample::default();
        let _ = first.decode(&mut sample).unwrap();
        let warm = first.into_resolver();

        let mut second = Decoder::builder().cursor(cursor()).resolver(warm).build();
        let _ = second.decode(&mut sample).unwrap();
        assert_eq!(second.resolver().computed(), 1);
        assert_eq!(second.resolver().len(), 1);
    }
}
