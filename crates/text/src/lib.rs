//! Text handling for quire: font-set registration, lazy font embedding,
//! measurement against real glyph metrics, greedy line breaking and drawing
//! single lines onto a page canvas.

mod builtin;
mod draw;
mod error;
mod manager;
mod source;
mod truetype;

pub use draw::write_text_line;
pub use error::TextError;
pub use manager::{FontHandle, PreparedFont, PreparedText, TextManager, line_box_height};
pub use source::{Face, FontSet, FontSource};
