//! quire composes paginated PDF documents from flowing content.
//!
//! A [`FlowDocument`] keeps a cursor moving down the current page. Text,
//! images, rules and tables are written at the cursor, and a new page starts
//! whenever the next piece would cross the bottom of the writable area. Tables
//! repeat their header rows on every page they span. Header and footer text
//! may reference `{{pageNumber}}` and `{{totalPages}}`; it is drawn when the
//! document is saved, once the page count is known.
//!
//! ```no_run
//! use quire::{DocumentConfig, FlowDocument, RowSpec, StyleOptions};
//!
//! # fn main() -> Result<(), quire::FlowError> {
//! let mut doc = FlowDocument::new(DocumentConfig::default());
//! doc.set_title("Report Q1");
//! doc.add_footer_text("Page {{pageNumber}} of {{totalPages}}", StyleOptions::new())?;
//! doc.write_line("Quarterly hours", &StyleOptions::new())?;
//! doc.write_table(StyleOptions::new(), |table| {
//!     table.add_column("task", StyleOptions::new())?;
//!     table.add_column("hours", StyleOptions::new())?;
//!     table.add_header_row(RowSpec::new().cell("task", "Task").cell("hours", "Hours"))?;
//!     table.add_row(RowSpec::new().cell("task", "Review").cell("hours", "4.5"))?;
//!     Ok(())
//! })?;
//! doc.save_to_file("report.pdf", false)?;
//! # Ok(())
//! # }
//! ```

mod config;
mod document;
mod error;
mod header_footer;

pub use config::{DEFAULT_DATE_FORMAT, DocumentConfig, FontSetConfig};
pub use document::{DocumentState, FlowDocument};
pub use error::{ConfigError, FlowError};
pub use header_footer::{Fields, substitute};

pub use quire_layout::{Cell, Column, LayoutError, Row, RowSpec, Table, TableState};
pub use quire_style::{DocumentDefaults, ResolvedStyle, StyleFlags, StyleOptions};
pub use quire_text::{FontSource, TextError};
pub use quire_types::{Alignment, Color, FourSides, Length, PageSize};
