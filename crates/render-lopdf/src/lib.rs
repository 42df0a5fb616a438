//! PDF backend built on `lopdf`.
//!
//! [`LopdfRenderer`] implements [`quire_render_core::DocumentRenderer`]: each
//! page canvas becomes a content stream, fonts are written as simple
//! WinAnsi-encoded dictionaries (embedding TrueType programs where present) and
//! images as RGB XObjects with an optional soft mask.

mod content;
mod objects;
mod overlay;
mod renderer;

pub use content::to_win_ansi;
pub use overlay::overlay_content;
pub use renderer::LopdfRenderer;
