//! Table graph plus the prepare (measure) and write (draw) passes.

mod column;
mod row;

pub use column::Column;
pub use row::{Cell, PreparedCell, Row, RowSpec};

use crate::borders::{draw_cell_borders, owned_edges};
use crate::pagination::{fits, needs_break};
use crate::solver::{column_offsets, distribute_column_widths};
use crate::{FlowTarget, LayoutError};
use quire_render_core::Canvas;
use quire_style::{Cascade, DocumentDefaults, StyleOptions};
use quire_text::{TextManager, write_text_line};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Building,
    Prepared,
    Written,
}

#[derive(Debug, Clone)]
pub struct Table {
    pub options: StyleOptions,
    columns: Vec<Column>,
    column_index: HashMap<String, usize>,
    header_rows: Vec<Row>,
    rows: Vec<Row>,
    state: TableState,
}

impl Table {
    pub fn new(options: StyleOptions) -> Self {
        Self {
            options,
            columns: Vec::new(),
            column_index: HashMap::new(),
            header_rows: Vec::new(),
            rows: Vec::new(),
            state: TableState::Building,
        }
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    fn expect_state(&self, expected: TableState, operation: &'static str) -> Result<(), LayoutError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(LayoutError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    /// Appends a column. Insertion order is display order.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        options: StyleOptions,
    ) -> Result<&mut Column, LayoutError> {
        self.expect_state(TableState::Building, "add a column to")?;
        let name = name.into();
        if !self.header_rows.is_empty() || !self.rows.is_empty() {
            return Err(LayoutError::Generic(format!(
                "column '{}' added after rows; columns must come first",
                name
            )));
        }
        if self.column_index.contains_key(&name) {
            return Err(LayoutError::DuplicateColumn(name));
        }

        let index = self.columns.len();
        self.column_index.insert(name.clone(), index);
        self.columns.push(Column::new(name, options));
        Ok(&mut self.columns[index])
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        let index = *self.column_index.get(name)?;
        self.columns.get(index)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        let index = *self.column_index.get(name)?;
        self.columns.get_mut(index)
    }

    pub fn header_rows(&self) -> &[Row] {
        &self.header_rows
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn header_row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.header_rows.get_mut(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    /// Adds a header row, repeated at the top of every page the table spans.
    /// Returns its index among the header rows.
    pub fn add_header_row(&mut self, spec: RowSpec) -> Result<usize, LayoutError> {
        self.expect_state(TableState::Building, "add a row to")?;
        let row = self.attach(spec)?;
        self.header_rows.push(row);
        Ok(self.header_rows.len() - 1)
    }

    /// Adds a data row. Returns its index among the data rows.
    pub fn add_row(&mut self, spec: RowSpec) -> Result<usize, LayoutError> {
        self.expect_state(TableState::Building, "add a row to")?;
        let row = self.attach(spec)?;
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    /// Places the named cells into column order, creating placeholders behind
    /// spans and empty cells for columns left out.
    fn attach(&self, spec: RowSpec) -> Result<Row, LayoutError> {
        let count = self.columns.len();
        let mut slots: Vec<Option<Cell>> = vec![None; count];

        for (name, mut cell) in spec.cells {
            let start = *self
                .column_index
                .get(&name)
                .ok_or_else(|| LayoutError::UnknownColumn(name.clone()))?;
            let span = cell.span.max(1);
            if start + span > count {
                return Err(LayoutError::InvalidRow(format!(
                    "cell in column '{}' spans {} columns but only {} remain",
                    name,
                    span,
                    count - start
                )));
            }
            if slots[start..start + span].iter().any(Option::is_some) {
                return Err(LayoutError::InvalidRow(format!(
                    "column '{}' is covered by more than one cell",
                    name
                )));
            }

            cell.column = start;
            cell.span = span;
            slots[start] = Some(cell);
            for covered in start + 1..start + span {
                slots[covered] = Some(Cell::placeholder(covered));
            }
        }

        let cells = slots
            .into_iter()
            .enumerate()
            .map(|(column, slot)| {
                slot.unwrap_or_else(|| Cell {
                    column,
                    ..Cell::new("")
                })
            })
            .collect();

        Ok(Row {
            options: spec.options,
            cells,
            calculated_height: 0.0,
        })
    }

    /// Live cascade for `cell` in `row`; reflects the current options of every
    /// level.
    pub fn cascade<'a>(
        &'a self,
        row: &'a Row,
        cell: &'a Cell,
        defaults: &'a DocumentDefaults,
    ) -> Cascade<'a> {
        let mut cascade = Cascade::new(defaults)
            .with_cell(&cell.options)
            .with_row(&row.options)
            .with_table(&self.options);
        if let Some(column) = self.columns.get(cell.column) {
            cascade = cascade.with_column(&column.options);
        }
        cascade
    }

    /// Measures the table for `available_width` points: column widths and
    /// offsets first, then every cell and row height. Runs once.
    pub fn prepare(
        &mut self,
        text: &TextManager,
        defaults: &DocumentDefaults,
        available_width: f32,
    ) -> Result<(), LayoutError> {
        self.expect_state(TableState::Building, "prepare")?;

        let available = match self.options.max_width {
            Some(limit) if limit.pt() > 0.0 => limit.pt().min(available_width),
            _ => available_width,
        };
        let declared: Vec<Option<f32>> = self.columns.iter().map(Column::declared_width).collect();
        let widths = distribute_column_widths(&declared, available);
        let offsets = column_offsets(&widths);
        for ((column, width), offset) in self.columns.iter_mut().zip(widths).zip(offsets) {
            column.calculated_width = width;
            column.offset_x = offset;
        }

        let Table {
            options,
            columns,
            header_rows,
            rows,
            ..
        } = self;
        for row in header_rows.iter_mut().chain(rows.iter_mut()) {
            prepare_row(row, columns, options, text, defaults)?;
        }

        self.state = TableState::Prepared;
        Ok(())
    }

    /// Sum of all row heights, header rows counted once.
    pub fn height(&self) -> f32 {
        self.header_rows
            .iter()
            .chain(self.rows.iter())
            .map(|r| r.calculated_height)
            .sum()
    }

    /// Draws the table starting at the target's cursor, `x` being its left edge.
    ///
    /// Starts a new page first if not even the header rows plus the first data
    /// row fit, unless the cursor is already at the top of an untouched page. Whenever the next data row would cross the lowest line, a new
    /// page is started and the header rows are drawn again. The cursor ends at
    /// the bottom edge of the last row.
    pub fn write(&mut self, target: &mut dyn FlowTarget, x: f32) -> Result<(), LayoutError> {
        self.expect_state(TableState::Prepared, "write")?;

        let header_height: f32 = self.header_rows.iter().map(|r| r.calculated_height).sum();
        let first_height = self.rows.first().map_or(0.0, |r| r.calculated_height);
        let start_height = header_height + first_height;
        let fresh = target.at_page_top();
        if needs_break(target.cursor_y(), start_height, target.lowest_y(), fresh) {
            log::debug!("Table start does not fit, breaking page");
            target.new_page()?;
        }
        for header in &self.header_rows {
            self.write_row(header, target, x);
        }

        let mut rows_on_page = 0usize;
        let mut page_breaks = 0usize;
        for row in &self.rows {
            let room = fits(target.cursor_y(), row.calculated_height, target.lowest_y());
            if rows_on_page > 0 && !room {
                target.new_page()?;
                page_breaks += 1;
                rows_on_page = 0;
                for header in &self.header_rows {
                    self.write_row(header, target, x);
                }
            }
            self.write_row(row, target, x);
            rows_on_page += 1;
        }

        log::debug!(
            "Wrote table with {} rows across {} page break(s)",
            self.rows.len(),
            page_breaks
        );
        self.state = TableState::Written;
        Ok(())
    }

    fn write_row(&self, row: &Row, target: &mut dyn FlowTarget, x: f32) {
        let top = target.cursor_y();
        let canvas = target.canvas();
        let mut previous_span = None;

        for cell in row.visible_cells() {
            let (Some(prepared), Some(column)) = (&cell.prepared, self.columns.get(cell.column)) else {
                continue;
            };
            let cell_x = x + column.offset_x;
            draw_cell_text(canvas, prepared, cell_x, top);

            let edges = owned_edges(cell.column, cell.span, self.columns.len(), previous_span);
            draw_cell_borders(
                canvas,
                &prepared.style,
                edges,
                cell_x,
                top,
                prepared.width,
                row.calculated_height,
            );
            previous_span = Some(cell.span);
        }

        target.set_cursor_y(top - row.calculated_height);
    }
}

fn draw_cell_text(canvas: &mut Canvas, prepared: &PreparedCell, cell_x: f32, top: f32) {
    let Some(text) = &prepared.text else {
        return;
    };
    let style = &prepared.style;
    let text_height = style.text_height.pt();
    let pitch = quire_text::line_box_height(text_height, style.line_height);
    let first_top = top - style.margin.top.pt();
    let baseline_offset = text.baseline_offset(text_height, style.line_height);
    let text_x = cell_x + style.margin.left.pt();

    for (i, line) in text.lines.iter().enumerate() {
        let baseline = first_top - i as f32 * pitch - baseline_offset;
        write_text_line(canvas, line, text, text_x, baseline, prepared.usable_width, style);
    }
}

fn prepare_row(
    row: &mut Row,
    columns: &[Column],
    table: &StyleOptions,
    text: &TextManager,
    defaults: &DocumentDefaults,
) -> Result<(), LayoutError> {
    let row_options = &row.options;
    let measure = |cell: &Cell| prepare_cell(cell, row_options, columns, table, text, defaults);

    #[cfg(feature = "parallel")]
    let prepared: Vec<PreparedCell> = {
        use rayon::prelude::*;
        row.cells.par_iter().map(measure).collect::<Result<_, _>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let prepared: Vec<PreparedCell> = row.cells.iter().map(measure).collect::<Result<_, _>>()?;

    row.calculated_height = prepared.iter().map(|p| p.height).fold(0.0, f32::max);
    for (cell, measured) in row.cells.iter_mut().zip(prepared) {
        cell.prepared = Some(measured);
    }
    Ok(())
}

fn prepare_cell(
    cell: &Cell,
    row: &StyleOptions,
    columns: &[Column],
    table: &StyleOptions,
    text: &TextManager,
    defaults: &DocumentDefaults,
) -> Result<PreparedCell, LayoutError> {
    let spanned = columns
        .get(cell.column..cell.column + cell.span.max(1))
        .ok_or_else(|| LayoutError::InvalidRow(format!("cell at column {} is out of range", cell.column)))?;

    let style = Cascade::new(defaults)
        .with_cell(&cell.options)
        .with_row(row)
        .with_column(&spanned[0].options)
        .with_table(table)
        .resolve();

    if cell.is_placeholder() {
        return Ok(PreparedCell {
            style,
            text: None,
            width: 0.0,
            usable_width: 0.0,
            height: 0.0,
        });
    }

    let width: f32 = spanned.iter().map(|c| c.calculated_width).sum();
    let usable_width = (width - style.margin.horizontal_pt()).max(0.0);
    let text_height = style.text_height.pt();
    let prepared = text.prepare_text(&cell.value, usable_width, text_height, &style.font, style.style)?;
    let height = prepared.height(text_height, style.line_height) + style.margin.vertical_pt();

    Ok(PreparedCell {
        style,
        text: Some(prepared),
        width,
        usable_width,
        height,
    })
}
