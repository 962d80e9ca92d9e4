use std::path::Path;

use tracing::info;

use crate::{
    storage::{cursor::Cursor, leaf_node::LeafNode, pager::Pager},
    types::{CellNum, PageNum, TABLE_MAX_PAGES, error::Result},
};

/// The single table of a store, rooted at one leaf page.
pub struct Table {
    pub(crate) pager: Pager,
    root_page_num: PageNum,
}

impl Table {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_max_pages(path, TABLE_MAX_PAGES)
    }

    pub fn open_with_max_pages<P: AsRef<Path>>(path: P, max_pages: usize) -> Result<Self> {
        let mut pager = Pager::open(path, max_pages)?;
        let root_page_num = 0;

        if pager.num_pages() == 0 {
            // New database file: page 0 becomes an empty root leaf.
            let mut root = LeafNode::new(pager.get_page(root_page_num)?);
            root.initialize()?;
            root.set_root(true)?;
            info!("initialized empty root leaf");
        }

        Ok(Self {
            pager,
            root_page_num,
        })
    }

    pub fn root_page_num(&self) -> PageNum {
        self.root_page_num
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn row_count(&mut self) -> Result<CellNum> {
        LeafNode::new(self.pager.get_page(self.root_page_num)?).num_cells()
    }

    /// Cursor at the first row.
    pub fn start(&mut self) -> Result<Cursor<'_>> {
        Cursor::start(self)
    }

    /// Cursor one past the last row.
    pub fn end(&mut self) -> Result<Cursor<'_>> {
        Cursor::end(self)
    }

    /// Flush every loaded page and close the file.
    pub fn close(self) -> Result<()> {
        self.pager.close()
    }
}
