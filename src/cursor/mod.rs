//! # Cursor Abstraction
//!
//! A `Cursor` is the only thing the decoder needs from a data source: the
//! ordered column names of the result set, a way to step to the next row, and
//! a positional scan of the current row into destinations.
//!
//! ## Protocol
//!
//! ```text
//! columns() ──► ["id", "amount", "is_truth"]     (stable for the query)
//!
//! advance() ──► true    scan([d0, d1, d2]) copies row 0
//! advance() ──► true    scan([d0, d1, d2]) copies row 1
//! advance() ──► false   exhausted
//! ```
//!
//! `scan` receives exactly one destination per column, in column order.
//! Errors from `columns` and `scan` are handed to the caller of
//! `Decoder::decode` untouched.
//!
//! ## Implementations
//!
//! - [`RowCursor`]: in-memory rows, useful for fixtures and for buffering rows
//!   fetched from another driver
//! - `&mut C` and `Box<C>` forward to the inner cursor

mod memory;
mod row;

pub use memory::RowCursor;
pub use row::Row;

use eyre::Result;

use crate::types::Destination;

/// Row source driven by a `Decoder`.
pub trait Cursor {
    /// Column names of the result set, in the order `scan` fills destinations.
    fn columns(&self) -> Result<Vec<String>>;

    /// Steps to the next row. Returns false once the result set is exhausted.
    fn advance(&mut self) -> bool;

    /// Copies the current row into `dest`, one destination per column.
    fn scan(&mut self, dest: &mut [Destination<'_>]) -> Result<()>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn columns(&self) -> Result<Vec<String>> {
        (**self).columns()
    }

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn scan(&mut self, dest: &mut [Destination<'_>]) -> Result<()> {
        (**self).scan(dest)
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    fn columns(&self) -> Result<Vec<String>> {
        (**self).columns()
    }

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn scan(&mut self, dest: &mut [Destination<'_>]) -> Result<()> {
        (**self).scan(dest)
    }
}
