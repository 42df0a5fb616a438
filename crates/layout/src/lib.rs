//! The table engine.
//!
//! A [`Table`] is built up from named columns and rows of cells, measured once
//! with [`Table::prepare`] and then drawn with [`Table::write`] onto anything
//! implementing [`FlowTarget`], breaking pages and repeating header rows as it
//! goes.

use quire_text::TextError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Cannot {operation} a table in state {state:?}.")]
    InvalidState {
        operation: &'static str,
        state: TableState,
    },
    #[error("Column '{0}' already exists.")]
    DuplicateColumn(String),
    #[error("Unknown column '{0}'.")]
    UnknownColumn(String),
    #[error("Invalid row: {0}")]
    InvalidRow(String),
    #[error("Text error: {0}")]
    Text(#[from] TextError),
    #[error("Generic layout error: {0}")]
    Generic(String),
}

mod borders;
pub mod pagination;
pub mod solver;
pub mod table;
mod target;

pub use solver::{column_offsets, distribute_column_widths};
pub use table::{Cell, Column, PreparedCell, Row, RowSpec, Table, TableState};
pub use target::FlowTarget;
