use thiserror::Error;

use crate::types::{CellNum, PageNum};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Db file is not a whole number of pages. Corrupt file. (length: {length} bytes)")]
    CorruptFile { length: u64 },

    #[error("Tried to fetch page number out of bounds. {page_num} >= {max_pages}")]
    PageOutOfBounds { page_num: PageNum, max_pages: usize },

    #[error("Tried to flush page {page_num} which was never loaded")]
    FlushUnloadedPage { page_num: PageNum },

    #[error("Page access out of bounds: offset {offset} + length {length} exceeds page size")]
    PageAccessOutOfBounds { offset: usize, length: usize },

    #[error("Invalid row size: expected {expected} bytes, got {actual} bytes")]
    InvalidRowSize { expected: usize, actual: usize },

    #[error("Invalid cell index {index} (max: {max})")]
    InvalidCellIndex { index: CellNum, max: CellNum },

    #[error("Invalid node type: {0}")]
    InvalidNodeType(u8),

    #[error("Table full (max cells per leaf: {max_cells})")]
    TableFull { max_cells: CellNum },

    #[error("Configuration error: {details}")]
    Config { details: String },
}

impl DatabaseError {
    /// Whether the store must be shut down after this error.
    ///
    /// Only a full table is reported back to the user; every other variant
    /// means the page cache can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DatabaseError::TableFull { .. })
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
