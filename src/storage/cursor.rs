use crate::{
    storage::{leaf_node::LeafNode, table::Table},
    types::{
        CellNum, Key, PageNum,
        error::Result,
        row::Row,
    },
};

/// A position inside a table: a page and a cell index within it.
///
/// The cursor borrows its table mutably, so it cannot outlive it and no two
/// cursors over the same table exist at once.
pub struct Cursor<'a> {
    table: &'a mut Table,
    page_num: PageNum,
    cell_num: CellNum,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    pub fn start(table: &'a mut Table) -> Result<Self> {
        let page_num = table.root_page_num();
        let num_cells = LeafNode::new(table.pager.get_page(page_num)?).num_cells()?;
        Ok(Self {
            table,
            page_num,
            cell_num: 0,
            end_of_table: num_cells == 0,
        })
    }

    pub fn end(table: &'a mut Table) -> Result<Self> {
        let page_num = table.root_page_num();
        let num_cells = LeafNode::new(table.pager.get_page(page_num)?).num_cells()?;
        Ok(Self {
            table,
            page_num,
            cell_num: num_cells,
            end_of_table: true,
        })
    }

    pub fn page_num(&self) -> PageNum {
        self.page_num
    }

    pub fn cell_num(&self) -> CellNum {
        self.cell_num
    }

    pub fn end_of_table(&self) -> bool {
        self.end_of_table
    }

    pub fn advance(&mut self) -> Result<()> {
        let num_cells = LeafNode::new(self.table.pager.get_page(self.page_num)?).num_cells()?;
        self.cell_num += 1;
        if self.cell_num >= num_cells {
            self.end_of_table = true;
        }
        Ok(())
    }

    /// The serialized row stored in the current cell, borrowed from its page.
    pub fn value(&mut self) -> Result<&[u8]> {
        let page = self.table.pager.get_page(self.page_num)?;
        LeafNode::new(&*page).into_value(self.cell_num)
    }

    pub fn key(&mut self) -> Result<Key> {
        LeafNode::new(self.table.pager.get_page(self.page_num)?).key(self.cell_num)
    }

    pub fn row(&mut self) -> Result<Row> {
        Row::from_bytes(self.value()?)
    }

    /// Insert `(key, row)` at the cursor position.
    ///
    /// Cells at or after the position move one slot right. The caller picks a
    /// position that keeps keys ascending.
    pub fn insert(&mut self, key: Key, row: &Row) -> Result<()> {
        let mut node = LeafNode::new(self.table.pager.get_page(self.page_num)?);
        node.insert(self.cell_num, key, row)
    }
}
