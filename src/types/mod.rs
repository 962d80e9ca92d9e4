pub mod error;
pub mod page;
pub mod row;

// Common type aliases
pub type PageNum = u32;
pub type CellNum = u32;
pub type Key = u32;

// Storage constants
pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100; // default page bound for one table
