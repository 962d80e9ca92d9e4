use std::ops::Range;

use crate::types::{
    PAGE_SIZE,
    error::{DatabaseError, Result},
};

/*
 * A page is an opaque 4096-byte buffer. The pager moves whole pages between
 * disk and memory; the leaf node layer interprets the bytes. Every accessor
 * checks its range against the page boundary and reports a violation as
 * DatabaseError::PageAccessOutOfBounds instead of touching adjacent memory.
 */

#[derive(Clone, PartialEq, Eq)]
pub struct Page {
    data: Box<[u8; PAGE_SIZE]>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            data: Box::new([0u8; PAGE_SIZE]),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..]
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data[..]
    }

    fn checked_range(offset: usize, length: usize) -> Result<Range<usize>> {
        match offset.checked_add(length) {
            Some(end) if end <= PAGE_SIZE => Ok(offset..end),
            _ => Err(DatabaseError::PageAccessOutOfBounds { offset, length }),
        }
    }

    pub fn slice(&self, offset: usize, length: usize) -> Result<&[u8]> {
        let range = Self::checked_range(offset, length)?;
        Ok(&self.data[range])
    }

    pub fn slice_mut(&mut self, offset: usize, length: usize) -> Result<&mut [u8]> {
        let range = Self::checked_range(offset, length)?;
        Ok(&mut self.data[range])
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        self.slice_mut(offset, 1)?[0] = value;
        Ok(())
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32> {
        let bytes = self.slice(offset, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn write_u32(&mut self, offset: usize, value: u32) -> Result<()> {
        self.slice_mut(offset, 4)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Move `length` bytes from `src` to `dest`; the ranges may overlap.
    pub fn copy_within(&mut self, src: usize, length: usize, dest: usize) -> Result<()> {
        let src_range = Self::checked_range(src, length)?;
        Self::checked_range(dest, length)?;
        self.data.copy_within(src_range, dest);
        Ok(())
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        f.debug_struct("Page").field("used_bytes", &used).finish()
    }
}
