use std::path::Path;

use tempfile::{Builder, TempPath};

use crate::{
    storage::table::Table,
    types::{TABLE_MAX_PAGES, error::Result, row::Row},
};

/// An empty scratch database file, removed when dropped.
pub struct TempDatabase {
    path: TempPath,
    pub max_pages: usize,
}

impl TempDatabase {
    pub fn with_prefix(prefix: &str) -> Result<Self> {
        let path = Builder::new()
            .prefix(prefix)
            .suffix(".db")
            .tempfile()?
            .into_temp_path();
        Ok(Self {
            path,
            max_pages: TABLE_MAX_PAGES,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn open(&self) -> Result<Table> {
        Table::open_with_max_pages(&self.path, self.max_pages)
    }

    pub fn file_len(&self) -> Result<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }
}

pub fn user_row(id: u32) -> Row {
    Row::new(id, format!("user{}", id), format!("person{}@example.com", id))
}
