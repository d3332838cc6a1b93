use serde::{Deserialize, Serialize};

use crate::cursor::encode_cursor;

/// One page of rows plus the numbers needed to build connection metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub rows: Vec<T>,
    /// Rows matching the filter, ignoring pagination.
    pub total: u64,
    /// Position of `rows[0]` in the full ordered result.
    pub offset: u64,
}

impl<T> PageResult<T> {
    pub fn new(rows: Vec<T>, total: u64, offset: u64) -> Self {
        Self {
            rows,
            total,
            offset,
        }
    }

    /// Empty page at `offset`
    pub fn empty(total: u64, offset: u64) -> Self {
        Self::new(Vec::new(), total, offset)
    }

    /// Cursor of the `i`-th row on this page.
    pub fn cursor_at(&self, i: usize) -> String {
        encode_cursor(self.offset + i as u64)
    }

    pub fn start_cursor(&self) -> Option<String> {
        (!self.rows.is_empty()).then(|| self.cursor_at(0))
    }

    pub fn end_cursor(&self) -> Option<String> {
        self.rows.len().checked_sub(1).map(|i| self.cursor_at(i))
    }

    pub fn has_next_page(&self) -> bool {
        self.offset + (self.rows.len() as u64) < self.total
    }

    pub fn has_previous_page(&self) -> bool {
        self.offset > 0
    }

    /// `(cursor, row)` pairs in page order.
    pub fn edges(&self) -> impl Iterator<Item = (String, &T)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (self.cursor_at(i), row))
    }

    /// Map rows while preserving `total`/`offset` (domain → DTO convenience).
    pub fn map_rows<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            rows: self.rows.into_iter().map(f).collect(),
            total: self.total,
            offset: self.offset,
        }
    }
}
