use std::fs;

use lembar::{
    command::{LineOutcome, process_line},
    storage::{
        leaf_node::{LEAF_NODE_MAX_CELLS, LeafNode},
        table::Table,
    },
    types::{PAGE_SIZE, error::DatabaseError, page::Page},
    utils::mock::TempDatabase,
};

fn run_script(table: &mut Table, lines: &[&str]) -> (String, LineOutcome) {
    let mut out = Vec::new();
    let mut outcome = LineOutcome::Continue;
    for line in lines {
        outcome = process_line(line, table, &mut out).unwrap();
        if outcome == LineOutcome::Exit {
            break;
        }
    }
    (String::from_utf8(out).unwrap(), outcome)
}

#[test]
fn test_insert_and_select_scenario() {
    let temp_db = TempDatabase::with_prefix("cmd_scenario").unwrap();
    let mut table = temp_db.open().unwrap();
    let (output, outcome) = run_script(
        &mut table,
        &[
            "insert 1 alice alice@x.com",
            "insert 2 bob bob@x.com",
            "select",
            ".exit",
        ],
    );
    assert_eq!(outcome, LineOutcome::Exit);
    assert_eq!(
        output,
        "Executed.\nExecuted.\n(1, alice, alice@x.com)\n(2, bob, bob@x.com)\nExecuted.\n"
    );
    table.close().unwrap();

    let mut table = temp_db.open().unwrap();
    let (output, _) = run_script(&mut table, &["select"]);
    assert_eq!(
        output,
        "(1, alice, alice@x.com)\n(2, bob, bob@x.com)\nExecuted.\n"
    );
}

#[test]
fn test_reported_errors_keep_the_loop_going() {
    let temp_db = TempDatabase::with_prefix("cmd_errors").unwrap();
    let mut table = temp_db.open().unwrap();
    let long_name = "a".repeat(32);
    let long_insert = format!("insert 1 {} a@x.com", long_name);
    let (output, outcome) = run_script(
        &mut table,
        &[
            ".tables",
            "delete 1",
            "insert 1 alice",
            "insert -3 neg neg@x.com",
            long_insert.as_str(),
            "",
            "select",
        ],
    );
    assert_eq!(outcome, LineOutcome::Continue);
    assert_eq!(
        output,
        "Unrecognized command '.tables'\n\
         Unrecognized keyword at start of 'delete 1'.\n\
         Syntax error. Could not parse statement.\n\
         ID must be positive.\n\
         String is too long.\n\
         Executed.\n"
    );
    assert_eq!(table.row_count().unwrap(), 0);
}

#[test]
fn test_table_full_message() {
    let temp_db = TempDatabase::with_prefix("cmd_full").unwrap();
    let mut table = temp_db.open().unwrap();
    let inserts: Vec<String> = (1..=LEAF_NODE_MAX_CELLS + 1)
        .map(|i| format!("insert {} user{} person{}@example.com", i, i, i))
        .collect();
    let lines: Vec<&str> = inserts.iter().map(String::as_str).collect();
    let (output, outcome) = run_script(&mut table, &lines);

    assert_eq!(outcome, LineOutcome::Continue);
    let mut expected = "Executed.\n".repeat(LEAF_NODE_MAX_CELLS as usize);
    expected.push_str("Error: Table full.\n");
    assert_eq!(output, expected);
}

#[test]
fn test_btree_meta_command() {
    let temp_db = TempDatabase::with_prefix("cmd_btree").unwrap();
    let mut table = temp_db.open().unwrap();
    let (output, _) = run_script(
        &mut table,
        &[
            "insert 3 c c@x.com",
            "insert 1 a a@x.com",
            "insert 2 b b@x.com",
            ".btree",
        ],
    );
    assert_eq!(
        output,
        "Executed.\nExecuted.\nExecuted.\nTree:\nleaf (size 3)\n  - 0 : 3\n  - 1 : 1\n  - 2 : 2\n"
    );
}

#[test]
fn test_constants_meta_command() {
    let temp_db = TempDatabase::with_prefix("cmd_constants").unwrap();
    let mut table = temp_db.open().unwrap();
    let (output, _) = run_script(&mut table, &[".constants"]);
    assert_eq!(
        output,
        "Constants:\n\
         ROW_SIZE: 291\n\
         COMMON_NODE_HEADER_SIZE: 6\n\
         LEAF_NODE_HEADER_SIZE: 10\n\
         LEAF_NODE_CELL_SIZE: 295\n\
         LEAF_NODE_SPACE_FOR_CELLS: 4086\n\
         LEAF_NODE_MAX_CELLS: 13\n"
    );
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let temp_db = TempDatabase::with_prefix("cmd_whitespace").unwrap();
    let mut table = temp_db.open().unwrap();
    let (output, outcome) = run_script(&mut table, &["  select  \n", " .exit\n"]);
    assert_eq!(output, "Executed.\n");
    assert_eq!(outcome, LineOutcome::Exit);
}

#[test]
fn test_fatal_error_is_returned_not_reported() {
    let temp_db = TempDatabase::with_prefix("cmd_fatal").unwrap();
    let mut page = Page::new();
    let mut root = LeafNode::new(&mut page);
    root.initialize().unwrap();
    root.set_root(true).unwrap();
    // A cell count past the leaf capacity makes the scan walk off the node.
    root.set_num_cells(LEAF_NODE_MAX_CELLS + 5).unwrap();
    fs::write(temp_db.path(), page.as_bytes()).unwrap();
    assert_eq!(temp_db.file_len().unwrap(), PAGE_SIZE as u64);

    let mut table = temp_db.open().unwrap();
    let mut out = Vec::new();
    let result = process_line("select", &mut table, &mut out);
    assert!(matches!(
        result,
        Err(DatabaseError::InvalidCellIndex { .. })
    ));
    assert!(result.unwrap_err().is_fatal());
    assert!(!String::from_utf8(out).unwrap().contains("Executed."));
}
