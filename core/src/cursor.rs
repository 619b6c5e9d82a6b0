//! Chunk-at-a-time cursor over an engine result. Forward-only cursors
//! discard rows as the rowset moves past them; scrollable cursors retain
//! everything consumed so far, pulling further chunks on demand.

use crate::engine::{EngineResult, EngineValue};
use crate::err::Result;
use crate::type_info::ColumnMetadata;
use definitions::FetchOrientation;

pub struct EngineCursor {
    result: Option<Box<dyn EngineResult>>,
    metadata: Vec<ColumnMetadata>,
    rows_changed: Option<i64>,
    /// Rows retained in memory; `base` is the absolute index of rows[0].
    rows: Vec<Vec<EngineValue>>,
    base: usize,
    /// Absolute index of the current rowset start; None before the first
    /// fetch or after scrolling off the front.
    rowset_start: Option<usize>,
    scrollable: bool,
    /// Total row count, known once the engine iterator is exhausted.
    total: Option<usize>,
}

impl std::fmt::Debug for EngineCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCursor")
            .field("columns", &self.metadata.len())
            .field("base", &self.base)
            .field("rowset_start", &self.rowset_start)
            .field("scrollable", &self.scrollable)
            .finish()
    }
}

impl EngineCursor {
    pub fn new(result: Box<dyn EngineResult>, scrollable: bool) -> EngineCursor {
        let metadata = result
            .column_names()
            .into_iter()
            .zip(result.column_types())
            .map(|(name, ty)| ColumnMetadata::new(name, ty))
            .collect();
        let rows_changed = result.rows_changed();
        EngineCursor {
            result: Some(result),
            metadata,
            rows_changed,
            rows: Vec::new(),
            base: 0,
            rowset_start: None,
            scrollable,
            total: None,
        }
    }

    pub fn column_count(&self) -> usize {
        self.metadata.len()
    }

    pub fn metadata(&self) -> &[ColumnMetadata] {
        &self.metadata
    }

    pub fn rows_changed(&self) -> Option<i64> {
        self.rows_changed
    }

    pub fn is_scrollable(&self) -> bool {
        self.scrollable
    }

    pub fn rowset_start(&self) -> Option<usize> {
        self.rowset_start
    }

    /// Pull chunks until the absolute row index is buffered or the result
    /// ends. Returns whether the row exists.
    fn ensure(&mut self, abs: usize) -> Result<bool> {
        while self.base + self.rows.len() <= abs {
            let Some(result) = self.result.as_mut() else {
                return Ok(false);
            };
            match result.next_chunk()? {
                Some(chunk) => self.rows.extend(chunk.rows),
                None => {
                    self.total = Some(self.base + self.rows.len());
                    self.result = None;
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Buffer every remaining chunk. Done before commit so the result
    /// survives the transaction boundary.
    pub fn materialize(&mut self) -> Result<()> {
        if let Some(result) = self.result.as_mut() {
            while let Some(chunk) = result.next_chunk()? {
                self.rows.extend(chunk.rows);
            }
            self.total = Some(self.base + self.rows.len());
            self.result = None;
        }
        Ok(())
    }

    fn total_rows(&mut self) -> Result<usize> {
        self.materialize()?;
        Ok(self.total.expect("total is known after materialize"))
    }

    /// The buffered row at an absolute index; `ensure` or `seek` must have
    /// succeeded for it first.
    pub fn row(&self, abs: usize) -> Option<&Vec<EngineValue>> {
        abs.checked_sub(self.base).and_then(|i| self.rows.get(i))
    }

    /// Whether the absolute row exists, buffering as needed.
    pub fn has_row(&mut self, abs: usize) -> Result<bool> {
        self.ensure(abs)
    }

    fn trim_before(&mut self, abs: usize) {
        if abs > self.base {
            let drop = (abs - self.base).min(self.rows.len());
            self.rows.drain(..drop);
            self.base = abs;
        }
    }

    /// Move the rowset start per the fetch orientation. Returns the new
    /// absolute start, or None at a cursor boundary (SQL_NO_DATA).
    /// Orientation legality for forward-only cursors is the caller's check.
    pub fn seek(
        &mut self,
        orientation: FetchOrientation,
        offset: isize,
        rowset_size: usize,
    ) -> Result<Option<usize>> {
        let rowset = rowset_size.max(1);
        let target: Option<usize> = match orientation {
            FetchOrientation::SQL_FETCH_NEXT => {
                Some(self.rowset_start.map_or(0, |s| s + rowset))
            }
            FetchOrientation::SQL_FETCH_PRIOR => match self.rowset_start {
                None | Some(0) => None,
                Some(s) => Some(s.saturating_sub(rowset)),
            },
            FetchOrientation::SQL_FETCH_FIRST => Some(0),
            FetchOrientation::SQL_FETCH_LAST => {
                let total = self.total_rows()?;
                if total == 0 {
                    None
                } else {
                    Some(total.saturating_sub(rowset))
                }
            }
            FetchOrientation::SQL_FETCH_ABSOLUTE => {
                if offset > 0 {
                    Some((offset - 1) as usize)
                } else if offset == 0 {
                    None
                } else {
                    let total = self.total_rows()? as isize;
                    let t = total + offset;
                    if t < 0 {
                        None
                    } else {
                        Some(t as usize)
                    }
                }
            }
            FetchOrientation::SQL_FETCH_RELATIVE => match self.rowset_start {
                // relative from before-start behaves like absolute
                None => {
                    if offset > 0 {
                        Some((offset - 1) as usize)
                    } else {
                        None
                    }
                }
                Some(s) => {
                    let t = s as isize + offset;
                    if t < 0 {
                        None
                    } else {
                        Some(t as usize)
                    }
                }
            },
            FetchOrientation::SQL_FETCH_BOOKMARK => None,
        };

        let Some(target) = target else {
            self.rowset_start = None;
            return Ok(None);
        };
        if !self.ensure(target)? {
            // position past the end so PRIOR can come back
            self.rowset_start = self.total;
            return Ok(None);
        }
        self.rowset_start = Some(target);
        if !self.scrollable {
            self.trim_before(target);
        }
        Ok(Some(target))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::{DataChunk, EngineType};

    struct TestResult {
        chunks: std::collections::VecDeque<DataChunk>,
    }

    impl EngineResult for TestResult {
        fn column_names(&self) -> Vec<String> {
            vec!["i".to_string()]
        }

        fn column_types(&self) -> Vec<EngineType> {
            vec![EngineType::Integer]
        }

        fn rows_changed(&self) -> Option<i64> {
            None
        }

        fn next_chunk(&mut self) -> Result<Option<DataChunk>> {
            Ok(self.chunks.pop_front())
        }
    }

    fn cursor_over(n: i32, chunk_size: usize, scrollable: bool) -> EngineCursor {
        let rows: Vec<Vec<EngineValue>> = (0..n).map(|i| vec![EngineValue::Integer(i)]).collect();
        let chunks = rows
            .chunks(chunk_size)
            .map(|c| DataChunk::new(c.to_vec()))
            .collect();
        EngineCursor::new(Box::new(TestResult { chunks }), scrollable)
    }

    fn value_at(cursor: &EngineCursor, abs: usize) -> i32 {
        match cursor.row(abs).unwrap()[0] {
            EngineValue::Integer(i) => i,
            ref other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn forward_iteration_crosses_chunks() {
        let mut cursor = cursor_over(7, 3, false);
        for expected in 0..7 {
            let start = cursor
                .seek(FetchOrientation::SQL_FETCH_NEXT, 0, 1)
                .unwrap()
                .unwrap();
            assert_eq!(expected, value_at(&cursor, start));
        }
        assert_eq!(
            None,
            cursor.seek(FetchOrientation::SQL_FETCH_NEXT, 0, 1).unwrap()
        );
    }

    #[test]
    fn absolute_then_prior_returns_previous_row() {
        let mut cursor = cursor_over(10, 4, true);
        let start = cursor
            .seek(FetchOrientation::SQL_FETCH_ABSOLUTE, 5, 1)
            .unwrap()
            .unwrap();
        assert_eq!(4, value_at(&cursor, start));
        let start = cursor
            .seek(FetchOrientation::SQL_FETCH_PRIOR, 0, 1)
            .unwrap()
            .unwrap();
        assert_eq!(3, value_at(&cursor, start));
    }

    #[test]
    fn last_and_negative_absolute_materialize() {
        let mut cursor = cursor_over(5, 2, true);
        let start = cursor
            .seek(FetchOrientation::SQL_FETCH_LAST, 0, 1)
            .unwrap()
            .unwrap();
        assert_eq!(4, value_at(&cursor, start));
        let start = cursor
            .seek(FetchOrientation::SQL_FETCH_ABSOLUTE, -2, 1)
            .unwrap()
            .unwrap();
        assert_eq!(3, value_at(&cursor, start));
    }

    #[test]
    fn materialize_survives_result_exhaustion() {
        let mut cursor = cursor_over(6, 2, false);
        cursor.seek(FetchOrientation::SQL_FETCH_NEXT, 0, 1).unwrap();
        cursor.materialize().unwrap();
        // rows keep coming from the buffer
        for expected in 1..6 {
            let start = cursor
                .seek(FetchOrientation::SQL_FETCH_NEXT, 0, 1)
                .unwrap()
                .unwrap();
            assert_eq!(expected, value_at(&cursor, start));
        }
        assert_eq!(
            None,
            cursor.seek(FetchOrientation::SQL_FETCH_NEXT, 0, 1).unwrap()
        );
    }

    #[test]
    fn rowset_seek_returns_batch_start() {
        let mut cursor = cursor_over(10, 3, false);
        assert_eq!(
            Some(0),
            cursor.seek(FetchOrientation::SQL_FETCH_NEXT, 0, 4).unwrap()
        );
        assert_eq!(
            Some(4),
            cursor.seek(FetchOrientation::SQL_FETCH_NEXT, 0, 4).unwrap()
        );
        assert_eq!(
            Some(8),
            cursor.seek(FetchOrientation::SQL_FETCH_NEXT, 0, 4).unwrap()
        );
        assert_eq!(
            None,
            cursor.seek(FetchOrientation::SQL_FETCH_NEXT, 0, 4).unwrap()
        );
    }

    #[test]
    fn relative_before_start_acts_like_absolute() {
        let mut cursor = cursor_over(5, 5, true);
        let start = cursor
            .seek(FetchOrientation::SQL_FETCH_RELATIVE, 3, 1)
            .unwrap()
            .unwrap();
        assert_eq!(2, value_at(&cursor, start));
    }
}
