pub mod color;
pub mod geometry;
pub mod length;
pub mod sides;

pub use color::Color;
pub use geometry::{Alignment, PageSize, Rect};
pub use length::{Length, MM_PER_PT, ParseLengthError};
pub use sides::FourSides;
