use quire_layout::LayoutError;
use quire_render_core::RenderError;
use quire_text::TextError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything that can go wrong while composing or saving a document.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Text error: {0}")]
    Text(#[from] TextError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("The document has been finalized and can no longer be written to.")]
    Finalized,
}
