//! Cell → row → column → table → document resolution.
//!
//! Nothing here caches: a [`Cascade`] only borrows the levels, so every call
//! sees the current state of each record. Callers that need a stable view take
//! a [`ResolvedStyle`] snapshot.

use crate::defaults::DocumentDefaults;
use crate::options::{StyleFlags, StyleOptions};
use quire_types::{Alignment, Color, FourSides, Length};

/// Every field concrete. Produced by [`Cascade::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub alignment: Alignment,
    pub color: Color,
    pub font: String,
    pub text_height: Length,
    pub line_height: f32,
    pub max_width: Option<Length>,
    pub style: StyleFlags,
    pub margin: FourSides<Length>,
    pub border_thickness: FourSides<Length>,
    pub border_color: Color,
}

impl ResolvedStyle {
    /// Vertical distance between two consecutive baselines, in points.
    pub fn line_pitch_pt(&self) -> f32 {
        self.text_height.pt() * self.line_height
    }

    pub fn has_border(&self) -> bool {
        let b = &self.border_thickness;
        !(b.top.is_zero() && b.right.is_zero() && b.bottom.is_zero() && b.left.is_zero())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Cascade<'a> {
    pub cell: Option<&'a StyleOptions>,
    pub row: Option<&'a StyleOptions>,
    pub column: Option<&'a StyleOptions>,
    pub table: Option<&'a StyleOptions>,
    pub document: &'a DocumentDefaults,
}

impl<'a> Cascade<'a> {
    pub fn new(document: &'a DocumentDefaults) -> Self {
        Self {
            cell: None,
            row: None,
            column: None,
            table: None,
            document,
        }
    }

    /// A one-level cascade for free-standing text outside any table.
    pub fn single(options: &'a StyleOptions, document: &'a DocumentDefaults) -> Self {
        Self::new(document).with_cell(options)
    }

    pub fn with_cell(mut self, options: &'a StyleOptions) -> Self {
        self.cell = Some(options);
        self
    }

    pub fn with_row(mut self, options: &'a StyleOptions) -> Self {
        self.row = Some(options);
        self
    }

    pub fn with_column(mut self, options: &'a StyleOptions) -> Self {
        self.column = Some(options);
        self
    }

    pub fn with_table(mut self, options: &'a StyleOptions) -> Self {
        self.table = Some(options);
        self
    }

    /// Levels from innermost to outermost.
    fn levels(&self) -> impl Iterator<Item = &'a StyleOptions> {
        [self.cell, self.row, self.column, self.table]
            .into_iter()
            .flatten()
    }

    fn first<T>(&self, field: impl Fn(&'a StyleOptions) -> Option<T>) -> Option<T> {
        self.levels().find_map(field)
    }

    pub fn alignment(&self) -> Alignment {
        self.first(|o| o.alignment).unwrap_or(self.document.alignment)
    }

    pub fn color(&self) -> Color {
        self.first(|o| o.color).unwrap_or(self.document.color)
    }

    pub fn font(&self) -> &'a str {
        self.first(|o| o.font.as_deref())
            .unwrap_or(self.document.font.as_str())
    }

    pub fn text_height(&self) -> Length {
        self.first(|o| o.text_height)
            .unwrap_or(self.document.text_height)
    }

    pub fn line_height(&self) -> f32 {
        self.first(|o| o.line_height)
            .unwrap_or(self.document.line_height)
    }

    pub fn max_width(&self) -> Option<Length> {
        self.first(|o| o.max_width)
    }

    pub fn style(&self) -> StyleFlags {
        self.first(|o| o.style).unwrap_or(self.document.style)
    }

    /// Merged outside-in so an explicit side on an inner level survives unless it
    /// equals the builtin value.
    pub fn margin(&self) -> FourSides<Length> {
        self.merge_sides(|o| o.margin.as_ref(), &self.document.margin)
    }

    pub fn border_thickness(&self) -> FourSides<Length> {
        self.merge_sides(
            |o| o.border_thickness.as_ref(),
            &self.document.border_thickness,
        )
    }

    pub fn border_color(&self) -> Color {
        self.first(|o| o.border_color)
            .or(self.document.border_color)
            .unwrap_or_else(|| self.color())
    }

    fn merge_sides(
        &self,
        field: impl Fn(&'a StyleOptions) -> Option<&'a FourSides<Length>>,
        builtin: &FourSides<Length>,
    ) -> FourSides<Length> {
        [self.table, self.column, self.row, self.cell]
            .into_iter()
            .flatten()
            .filter_map(field)
            .fold(*builtin, |outer, own| own.override_defaults(&outer, builtin))
    }

    pub fn resolve(&self) -> ResolvedStyle {
        ResolvedStyle {
            alignment: self.alignment(),
            color: self.color(),
            font: self.font().to_string(),
            text_height: self.text_height(),
            line_height: self.line_height(),
            max_width: self.max_width(),
            style: self.style(),
            margin: self.margin(),
            border_thickness: self.border_thickness(),
            border_color: self.border_color(),
        }
    }
}
