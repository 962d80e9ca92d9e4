use tracing::{debug, warn};

use crate::{
    storage::table::Table,
    types::{
        error::{DatabaseError, Result},
        row::Row,
    },
};

/// Trait for inserting rows into the table
pub trait Inserter {
    /// Insert a single row
    fn insert(&mut self, row: Row) -> Result<()>;

    /// Insert rows in order, stopping at the first failure
    fn insert_batch(&mut self, rows: Vec<Row>) -> Result<()>;
}

/// Appends rows at the end of the table, keyed by row id.
///
/// No search for the sorted position takes place: keys come out of a scan in
/// the order they went in.
pub struct TableInserter<'a> {
    table: &'a mut Table,
}

impl<'a> TableInserter<'a> {
    pub fn new(table: &'a mut Table) -> Self {
        Self { table }
    }
}

impl Inserter for TableInserter<'_> {
    fn insert(&mut self, row: Row) -> Result<()> {
        let mut cursor = self.table.end()?;
        match cursor.insert(row.id, &row) {
            Err(e @ DatabaseError::TableFull { .. }) => {
                warn!(id = row.id, "rejected insert: {}", e);
                Err(e)
            }
            Err(e) => Err(e),
            Ok(()) => {
                debug!(id = row.id, cell = cursor.cell_num(), "inserted row");
                Ok(())
            }
        }
    }

    fn insert_batch(&mut self, rows: Vec<Row>) -> Result<()> {
        for row in rows {
            self.insert(row)?;
        }
        Ok(())
    }
}

pub fn insert(table: &mut Table, row: Row) -> Result<()> {
    TableInserter::new(table).insert(row)
}
