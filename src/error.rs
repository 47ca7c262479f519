use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to write Typst markup")]
    Markup(#[from] std::fmt::Error),

    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, Error>;
