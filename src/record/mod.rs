//! # Record Types
//!
//! A record is a value the decoder can populate from one row. This module
//! defines how a record type describes itself to the decoder.
//!
//! ## Two Ways to Be a Record
//!
//! ```text
//!                 Record
//!                   │
//!       ┌───────────┴────────────┐
//!       │                        │
//!  Layout::Struct           Layout::Mapped
//!  (record! macro)          (ColumnMapper)
//!       │                        │
//!  FieldResolver builds     the value hands over
//!  column -> field index    column -> slot itself,
//!  once per type, cached    fresh on every call
//! ```
//!
//! `Layout::Opaque` marks scalar types that implement `Record` only so that
//! decoding into them is reported as a type error instead of failing to
//! compile.
//!
//! ## Field Descriptors
//!
//! `Layout::Struct` carries a static table of `Field`s in declaration order.
//! `Record::slots` returns the writable slots of one instance in that same
//! order, so a field's position in the table works as a locator against any
//! instance of the type.

mod column_map;

pub use column_map::{ColumnMap, ColumnMapper};

use smallvec::SmallVec;

use crate::config::INLINE_FIELDS;
use crate::types::{OwnedValue, Slot};

/// Writable slots of one record instance, in declaration order.
pub type Slots<'a> = SmallVec<[&'a mut dyn Slot; INLINE_FIELDS]>;

/// Static description of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Declared field name, used as the column name when there is no annotation.
    pub name: &'static str,
    /// Explicit column-name annotation.
    pub column: Option<&'static str>,
    /// Whether the field is writable from outside the type (declared `pub`).
    pub exported: bool,
}

impl Field {
    /// The annotation, if present and non-empty.
    pub fn annotation(&self) -> Option<&'static str> {
        self.column.filter(|c| !c.is_empty())
    }
}

/// Shape of a decode target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Composite of named fields, resolved through `FieldResolver`.
    Struct(&'static [Field]),
    /// Supplies its own column map on every call.
    Mapped,
    /// Not a structured record.
    Opaque,
}

/// A value that can receive one decoded row.
///
/// Usually implemented through the [`record!`](crate::record!) macro or, for
/// self-mapped types, through the [`ColumnMapper`] blanket impl.
pub trait Record: 'static {
    fn layout() -> Layout;

    /// One slot per entry of `Layout::Struct`, in the same order.
    fn slots(&mut self) -> Slots<'_>;

    /// Self-supplied column map. When this returns `Some`, field resolution
    /// is skipped for the call.
    fn mapped_columns(&mut self) -> Option<ColumnMap<'_>> {
        None
    }
}

impl<T: ColumnMapper> Record for T {
    fn layout() -> Layout {
        Layout::Mapped
    }

    fn slots(&mut self) -> Slots<'_> {
        Slots::new()
    }

    fn mapped_columns(&mut self) -> Option<ColumnMap<'_>> {
        Some(self.column_map())
    }
}

macro_rules! opaque_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn layout() -> Layout {
                    Layout::Opaque
                }

                fn slots(&mut self) -> Slots<'_> {
                    Slots::new()
                }
            }
        )*
    };
}

opaque_record!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    Vec<u8>,
    OwnedValue,
);
