use crate::{
    storage::{cursor::Cursor, table::Table},
    types::{error::Result, row::Row},
};

pub trait Scanner {
    fn scan(&mut self) -> Result<Option<Row>>;
    fn scan_batch(&mut self, batch_size: usize) -> Result<Vec<Row>>;
}

/// Walks the root leaf from its first cell, decoding one row per call.
/// Once exhausted it stays exhausted; scan again with a new scanner.
pub struct SequentialScanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> SequentialScanner<'a> {
    pub fn new(table: &'a mut Table) -> Result<Self> {
        Ok(Self {
            cursor: table.start()?,
        })
    }
}

impl Scanner for SequentialScanner<'_> {
    fn scan(&mut self) -> Result<Option<Row>> {
        if self.cursor.end_of_table() {
            return Ok(None);
        }
        let row = self.cursor.row()?;
        self.cursor.advance()?;
        Ok(Some(row))
    }

    fn scan_batch(&mut self, batch_size: usize) -> Result<Vec<Row>> {
        let mut rows = Vec::with_capacity(batch_size);
        while rows.len() < batch_size {
            match self.scan()? {
                Some(row) => rows.push(row),
                None => break,
            }
        }
        Ok(rows)
    }
}

pub struct ScanIterator<S: Scanner> {
    scanner: S,
    failed: bool,
}

impl<S: Scanner> ScanIterator<S> {
    pub fn new(scanner: S) -> Self {
        Self {
            scanner,
            failed: false,
        }
    }
}

impl<S: Scanner> Iterator for ScanIterator<S> {
    type Item = Result<Row>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.scanner.scan() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Lazy scan over every row in cell order.
pub fn select(table: &mut Table) -> Result<ScanIterator<SequentialScanner<'_>>> {
    Ok(ScanIterator::new(SequentialScanner::new(table)?))
}
