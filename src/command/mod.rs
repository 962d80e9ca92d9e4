pub mod meta;
pub mod statement;

use std::io::Write;

use tracing::debug;

use crate::{
    command::{
        meta::{MetaCommandResult, do_meta_command},
        statement::{Statement, prepare_statement},
    },
    executor::{insert::insert, scan::select},
    storage::table::Table,
    types::error::{DatabaseError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Exit,
}

/// Run one line of input against the table, writing any output to `out`.
///
/// User mistakes and a full table are reported on `out` and the loop goes on.
/// An `Err` is always fatal: the caller should close the table and stop.
pub fn process_line<W: Write>(
    line: &str,
    table: &mut Table,
    out: &mut W,
) -> Result<LineOutcome> {
    let input = line.trim();
    if input.is_empty() {
        return Ok(LineOutcome::Continue);
    }

    if input.starts_with('.') {
        return match do_meta_command(input, table, out)? {
            MetaCommandResult::Exit => Ok(LineOutcome::Exit),
            MetaCommandResult::Success => Ok(LineOutcome::Continue),
            MetaCommandResult::Unrecognized => {
                writeln!(out, "Unrecognized command '{}'", input)?;
                Ok(LineOutcome::Continue)
            }
        };
    }

    let statement = match prepare_statement(input) {
        Ok(statement) => statement,
        Err(e) => {
            debug!(input, "failed to prepare statement: {:?}", e);
            writeln!(out, "{}", e)?;
            return Ok(LineOutcome::Continue);
        }
    };

    match execute_statement(statement, table, out) {
        Ok(()) => writeln!(out, "Executed.")?,
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => report(&e, out)?,
    }
    Ok(LineOutcome::Continue)
}

fn report<W: Write>(error: &DatabaseError, out: &mut W) -> Result<()> {
    match error {
        DatabaseError::TableFull { .. } => writeln!(out, "Error: Table full.")?,
        other => writeln!(out, "Error: {}", other)?,
    }
    Ok(())
}

pub fn execute_statement<W: Write>(
    statement: Statement,
    table: &mut Table,
    out: &mut W,
) -> Result<()> {
    match statement {
        Statement::Insert(row) => insert(table, row),
        Statement::Select => {
            for row in select(table)? {
                writeln!(out, "{}", row?)?;
            }
            Ok(())
        }
    }
}
