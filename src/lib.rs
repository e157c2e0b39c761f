//! # rowdecode - Typed Row Decoding
//!
//! rowdecode turns the rows of a tabular query result into user-defined
//! records, one row per call, without hand-written per-field extraction.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rowdecode::{record, Decoder, Decoded, Row, RowCursor};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Payment {
//!         pub id: i64,
//!         pub amount: f64,
//!         pub settled: bool as "is_truth",
//!     }
//! }
//!
//! let rows = RowCursor::new(
//!     ["id", "amount", "is_truth"],
//!     vec![Row::new(vec![1i64.into(), 1.1f64.into(), false.into()])],
//! );
//! let mut decoder = Decoder::new(rows);
//! let mut payment = Payment::default();
//! while decoder.decode(&mut payment)? == Decoded::Row {
//!     println!("{:?}", payment);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Decoder (session state)       │
//! ├─────────────────────────────────────┤
//! │   Row Materializer (destinations)    │
//! ├──────────────────┬──────────────────┤
//! │  FieldResolver   │   ColumnMapper   │
//! │  (cached/type)   │  (self-supplied) │
//! ├──────────────────┴──────────────────┤
//! │    Record descriptors (record!)      │
//! ├─────────────────────────────────────┤
//! │   Cursor (columns / advance / scan)  │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`cursor`]: Cursor trait, `Row`, in-memory `RowCursor`
//! - [`record`]: `Record` descriptors, `ColumnMapper`, `ColumnMap`
//! - [`resolver`]: Column-to-field resolution and its per-type cache
//! - [`decoder`]: `Decoder`, single-shot `decode_row`, errors
//! - [`types`]: `OwnedValue`, `Slot`, `Destination`
//! - [`config`]: Constants

#[macro_use]
mod macros;

pub mod config;
pub mod cursor;
pub mod decoder;
pub mod record;
pub mod resolver;
pub mod types;

pub use cursor::{Cursor, Row, RowCursor};
pub use decoder::{
    decode_row, decode_row_with, DecodeError, Decoded, Decoder, DecoderBuilder, DecoderState,
    Rows, TypeError, TypeErrorKind,
};
pub use record::{ColumnMap, ColumnMapper, Field, Layout, Record, Slots};
pub use resolver::{ColumnMatch, FieldIndex, FieldResolver};
pub use types::{Destination, OwnedValue, Slot};
