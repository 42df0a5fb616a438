use quire_style::StyleOptions;

/// A named table column. `calculated_width` and `offset_x` are filled in by
/// [`Table::prepare`](super::Table::prepare).
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub options: StyleOptions,
    pub calculated_width: f32,
    pub offset_x: f32,
}

impl Column {
    pub fn new(name: impl Into<String>, options: StyleOptions) -> Self {
        Self {
            name: name.into(),
            options,
            calculated_width: 0.0,
            offset_x: 0.0,
        }
    }

    /// Declared width in points; see [`crate::distribute_column_widths`].
    pub fn declared_width(&self) -> Option<f32> {
        self.options.max_width.map(|w| w.pt())
    }
}
