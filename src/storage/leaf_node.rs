use std::ops::{Deref, DerefMut};

use crate::types::{
    CellNum, Key, PAGE_SIZE, PageNum,
    error::{DatabaseError, Result},
    page::Page,
    row::{ROW_SIZE, Row},
};

/*
 * Leaf Node Layout
 * ┌───────────────────────────────────────────────────────────────────┐
 * │ node_type(1) | is_root(1) | parent(4) | num_cells(4)              │
 * ├───────────────────────────────────────────────────────────────────┤
 * │ [key(4) | row(291)] [key(4) | row(291)] ...  (13 cells max)       │
 * ├───────────────────────────────────────────────────────────────────┤
 * │ unused tail                                                       │
 * └───────────────────────────────────────────────────────────────────┘
 */

// Common node header
pub const NODE_TYPE_SIZE: usize = size_of::<u8>();
pub const NODE_TYPE_OFFSET: usize = 0;
pub const IS_ROOT_SIZE: usize = size_of::<u8>();
pub const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
pub const PARENT_POINTER_SIZE: usize = size_of::<u32>();
pub const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
pub const COMMON_NODE_HEADER_SIZE: usize = NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

// Leaf node header
pub const LEAF_NODE_NUM_CELLS_SIZE: usize = size_of::<u32>();
pub const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

// Leaf node body
pub const LEAF_NODE_KEY_SIZE: usize = size_of::<Key>();
pub const LEAF_NODE_KEY_OFFSET: usize = 0;
pub const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: CellNum =
    (LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE) as CellNum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Internal = 0,
    Leaf = 1,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(NodeType::Internal),
            1 => Ok(NodeType::Leaf),
            _ => Err(DatabaseError::InvalidNodeType(value)),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            NodeType::Internal => 0,
            NodeType::Leaf => 1,
        }
    }
}

/// Typed view of a page as a leaf node.
///
/// Works over `&Page` for reads and `&mut Page` for writes. Cell indexes are
/// checked against `LEAF_NODE_MAX_CELLS` before any byte is touched.
pub struct LeafNode<P> {
    page: P,
}

impl<P: Deref<Target = Page>> LeafNode<P> {
    pub fn new(page: P) -> Self {
        Self { page }
    }

    /// Byte offset of cell `cell_num` from the start of the page.
    pub fn cell_offset(cell_num: CellNum) -> Result<usize> {
        if cell_num >= LEAF_NODE_MAX_CELLS {
            return Err(DatabaseError::InvalidCellIndex {
                index: cell_num,
                max: LEAF_NODE_MAX_CELLS,
            });
        }
        Ok(LEAF_NODE_HEADER_SIZE + cell_num as usize * LEAF_NODE_CELL_SIZE)
    }

    pub fn node_type(&self) -> Result<NodeType> {
        NodeType::from_u8(self.page.read_u8(NODE_TYPE_OFFSET)?)
    }

    pub fn is_root(&self) -> Result<bool> {
        Ok(self.page.read_u8(IS_ROOT_OFFSET)? != 0)
    }

    pub fn parent(&self) -> Result<PageNum> {
        self.page.read_u32(PARENT_POINTER_OFFSET)
    }

    pub fn num_cells(&self) -> Result<CellNum> {
        self.page.read_u32(LEAF_NODE_NUM_CELLS_OFFSET)
    }

    pub fn cell(&self, cell_num: CellNum) -> Result<&[u8]> {
        self.page.slice(Self::cell_offset(cell_num)?, LEAF_NODE_CELL_SIZE)
    }

    pub fn key(&self, cell_num: CellNum) -> Result<Key> {
        self.page.read_u32(Self::cell_offset(cell_num)? + LEAF_NODE_KEY_OFFSET)
    }

    pub fn value(&self, cell_num: CellNum) -> Result<&[u8]> {
        self.page.slice(
            Self::cell_offset(cell_num)? + LEAF_NODE_VALUE_OFFSET,
            LEAF_NODE_VALUE_SIZE,
        )
    }

    pub fn is_full(&self) -> Result<bool> {
        Ok(self.num_cells()? >= LEAF_NODE_MAX_CELLS)
    }
}

impl<'a> LeafNode<&'a Page> {
    /// Like `value`, but the returned bytes borrow the page rather than the view.
    pub fn into_value(self, cell_num: CellNum) -> Result<&'a [u8]> {
        let offset = Self::cell_offset(cell_num)? + LEAF_NODE_VALUE_OFFSET;
        self.page.slice(offset, LEAF_NODE_VALUE_SIZE)
    }
}

impl<P: DerefMut<Target = Page>> LeafNode<P> {
    /// Turn a fresh page into an empty, non-root leaf.
    pub fn initialize(&mut self) -> Result<()> {
        self.set_node_type(NodeType::Leaf)?;
        self.set_root(false)?;
        self.set_num_cells(0)
    }

    pub fn set_node_type(&mut self, node_type: NodeType) -> Result<()> {
        self.page.write_u8(NODE_TYPE_OFFSET, node_type.as_u8())
    }

    pub fn set_root(&mut self, is_root: bool) -> Result<()> {
        self.page.write_u8(IS_ROOT_OFFSET, is_root as u8)
    }

    pub fn set_parent(&mut self, parent: PageNum) -> Result<()> {
        self.page.write_u32(PARENT_POINTER_OFFSET, parent)
    }

    pub fn set_num_cells(&mut self, num_cells: CellNum) -> Result<()> {
        self.page.write_u32(LEAF_NODE_NUM_CELLS_OFFSET, num_cells)
    }

    pub fn set_key(&mut self, cell_num: CellNum, key: Key) -> Result<()> {
        let offset = Self::cell_offset(cell_num)? + LEAF_NODE_KEY_OFFSET;
        self.page.write_u32(offset, key)
    }

    pub fn value_mut(&mut self, cell_num: CellNum) -> Result<&mut [u8]> {
        let offset = Self::cell_offset(cell_num)? + LEAF_NODE_VALUE_OFFSET;
        self.page.slice_mut(offset, LEAF_NODE_VALUE_SIZE)
    }

    /// Insert `(key, row)` at `cell_num`, shifting later cells one slot right.
    ///
    /// Fails with `TableFull` once the node holds `LEAF_NODE_MAX_CELLS` cells;
    /// the node is left untouched in that case.
    pub fn insert(&mut self, cell_num: CellNum, key: Key, row: &Row) -> Result<()> {
        let num_cells = self.num_cells()?;
        if num_cells >= LEAF_NODE_MAX_CELLS {
            return Err(DatabaseError::TableFull {
                max_cells: LEAF_NODE_MAX_CELLS,
            });
        }
        if cell_num > num_cells {
            return Err(DatabaseError::InvalidCellIndex {
                index: cell_num,
                max: num_cells,
            });
        }

        if cell_num < num_cells {
            let src = Self::cell_offset(cell_num)?;
            let shifted = (num_cells - cell_num) as usize * LEAF_NODE_CELL_SIZE;
            self.page.copy_within(src, shifted, src + LEAF_NODE_CELL_SIZE)?;
        }

        self.set_key(cell_num, key)?;
        let value: &mut [u8; ROW_SIZE] = self
            .value_mut(cell_num)?
            .try_into()
            .map_err(|_| DatabaseError::InvalidRowSize {
                expected: ROW_SIZE,
                actual: LEAF_NODE_VALUE_SIZE,
            })?;
        row.write_to(value);
        self.set_num_cells(num_cells + 1)
    }
}
