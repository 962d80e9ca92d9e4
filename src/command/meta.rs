use std::io::Write;

use crate::{
    storage::{
        leaf_node::{
            COMMON_NODE_HEADER_SIZE, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE,
            LEAF_NODE_MAX_CELLS, LEAF_NODE_SPACE_FOR_CELLS, LeafNode,
        },
        table::Table,
    },
    types::{error::Result, row::ROW_SIZE},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommandResult {
    Success,
    Exit,
    Unrecognized,
}

pub fn do_meta_command<W: Write>(
    input: &str,
    table: &mut Table,
    out: &mut W,
) -> Result<MetaCommandResult> {
    match input {
        ".exit" => Ok(MetaCommandResult::Exit),
        ".btree" => {
            writeln!(out, "Tree:")?;
            print_leaf_node(table, out)?;
            Ok(MetaCommandResult::Success)
        }
        ".constants" => {
            writeln!(out, "Constants:")?;
            print_constants(out)?;
            Ok(MetaCommandResult::Success)
        }
        _ => Ok(MetaCommandResult::Unrecognized),
    }
}

fn print_constants<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "ROW_SIZE: {}", ROW_SIZE)?;
    writeln!(out, "COMMON_NODE_HEADER_SIZE: {}", COMMON_NODE_HEADER_SIZE)?;
    writeln!(out, "LEAF_NODE_HEADER_SIZE: {}", LEAF_NODE_HEADER_SIZE)?;
    writeln!(out, "LEAF_NODE_CELL_SIZE: {}", LEAF_NODE_CELL_SIZE)?;
    writeln!(out, "LEAF_NODE_SPACE_FOR_CELLS: {}", LEAF_NODE_SPACE_FOR_CELLS)?;
    writeln!(out, "LEAF_NODE_MAX_CELLS: {}", LEAF_NODE_MAX_CELLS)?;
    Ok(())
}

fn print_leaf_node<W: Write>(table: &mut Table, out: &mut W) -> Result<()> {
    let root_page_num = table.root_page_num();
    let page = table.pager.get_page(root_page_num)?;
    let node = LeafNode::new(&*page);
    let num_cells = node.num_cells()?;
    writeln!(out, "leaf (size {})", num_cells)?;
    for i in 0..num_cells {
        writeln!(out, "  - {} : {}", i, node.key(i)?)?;
    }
    Ok(())
}
