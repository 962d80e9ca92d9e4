pub mod cursor;
pub mod leaf_node;
pub mod pager;
pub mod table;
