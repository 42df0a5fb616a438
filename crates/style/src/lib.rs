pub mod cascade;
pub mod defaults;
pub mod options;

pub use cascade::{Cascade, ResolvedStyle};
pub use defaults::DocumentDefaults;
pub use options::{StyleFlags, StyleOptions};
