//! Core rendering abstractions for PDF generation.
//!
//! Layout code never touches PDF objects. It draws onto a [`Canvas`] per page and
//! registers the fonts and images it used; a [`DocumentRenderer`] backend turns
//! the finished pages into bytes.

mod canvas;
mod error;
mod resources;
mod traits;

pub use canvas::{Canvas, DrawOp, Page};
pub use error::RenderError;
pub use resources::{FontMetrics, FontProgram, FontResource, ImageResource, UnderlineMetrics};
pub use traits::{DocumentInfo, DocumentRenderer, RenderDocument};
