use quire_style::{ResolvedStyle, StyleOptions};
use quire_text::PreparedText;

/// Measurements taken for one cell by the prepare pass.
#[derive(Debug, Clone)]
pub struct PreparedCell {
    pub style: ResolvedStyle,
    /// `None` for span placeholders.
    pub text: Option<PreparedText>,
    /// Full visual width of the span.
    pub width: f32,
    /// `width` minus the outer left and right margins.
    pub usable_width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Cell {
    /// Index of the first column this cell occupies.
    pub column: usize,
    /// Columns consumed; 0 marks a placeholder covered by a spanning cell.
    pub span: usize,
    pub value: String,
    pub options: StyleOptions,
    pub prepared: Option<PreparedCell>,
}

impl Cell {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            column: 0,
            span: 1,
            value: value.into(),
            options: StyleOptions::default(),
            prepared: None,
        }
    }

    pub fn span(mut self, span: usize) -> Self {
        self.span = span.max(1);
        self
    }

    pub fn options(mut self, options: StyleOptions) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn placeholder(column: usize) -> Self {
        Self {
            column,
            span: 0,
            ..Self::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.span == 0
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::new(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::new(value)
    }
}

/// A row attached to a table: exactly one cell per column, spans accounted for.
#[derive(Debug, Clone)]
pub struct Row {
    pub options: StyleOptions,
    pub cells: Vec<Cell>,
    pub calculated_height: f32,
}

impl Row {
    /// Cells that draw something, i.e. everything but span placeholders.
    pub fn visible_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| !c.is_placeholder())
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn cell_mut(&mut self, column: usize) -> Option<&mut Cell> {
        self.cells.get_mut(column)
    }
}

/// Cells keyed by column name, turned into a [`Row`] when added to a table.
/// Columns that are not named receive an empty cell.
#[derive(Debug, Clone, Default)]
pub struct RowSpec {
    pub(crate) options: StyleOptions,
    pub(crate) cells: Vec<(String, Cell)>,
}

impl RowSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: StyleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn cell(mut self, column: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.cells.push((column.into(), cell.into()));
        self
    }
}

impl<K, V> FromIterator<(K, V)> for RowSpec
where
    K: Into<String>,
    V: Into<Cell>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(RowSpec::new(), |spec, (column, cell)| spec.cell(column, cell))
    }
}
