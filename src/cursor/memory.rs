//! In-memory cursor over pre-built rows.

use eyre::{bail, eyre, Result};

use super::{Cursor, Row};
use crate::types::Destination;

/// Cursor over rows held in memory.
///
/// Rows are yielded in insertion order. Each row must carry one value per
/// column; a ragged row fails at scan time rather than at construction so a
/// fixture can exercise that failure.
#[derive(Debug, Clone, Default)]
pub struct RowCursor {
    columns: Vec<String>,
    rows: Vec<Row>,
    next: usize,
    current: Option<usize>,
}

impl RowCursor {
    pub fn new<I, S>(columns: I, rows: Vec<Row>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
            next: 0,
            current: None,
        }
    }

    /// A cursor with columns but no rows.
    pub fn empty<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(columns, Vec::new())
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Rows not yet reached by `advance`.
    pub fn remaining(&self) -> usize {
        self.rows.len() - self.next
    }
}

impl Cursor for RowCursor {
    fn columns(&self) -> Result<Vec<String>> {
        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> bool {
        if self.next < self.rows.len() {
            self.current = Some(self.next);
            self.next += 1;
            true
        } else {
            self.current = None;
            false
        }
    }

    fn scan(&mut self, dest: &mut [Destination<'_>]) -> Result<()> {
        let Some(index) = self.current else {
            bail!("scan called without a current row");
        };
        let row = &self.rows[index];

        if dest.len() != self.columns.len() {
            bail!(
                "expected {} destination arguments in scan, not {}",
                self.columns.len(),
                dest.len()
            );
        }
        if row.column_count() != self.columns.len() {
            bail!(
                "row has {} values but {} columns",
                row.column_count(),
                self.columns.len()
            );
        }

        for (i, (d, value)) in dest.iter_mut().zip(&row.values).enumerate() {
            d.assign(value).map_err(|err| {
                eyre!(
                    "scan error on column index {}, name {:?}: {}",
                    i,
                    self.columns[i],
                    err
                )
            })?;
        }
        Ok(())
    }
}
