//! The drawing surface the renderer targets.
//!
//! A canvas owns pagination, font metrics and output. The renderer only
//! hands it styled blocks in document order.

use crate::element::Span;

/// Relative font size of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontTier {
    /// Level 1 heading
    Title,
    /// Level 2 heading
    Section,
    /// Level 3 heading
    Subsection,
    /// Level 4 and deeper headings
    Minor,
    Body,
}

impl FontTier {
    pub fn for_heading(level: u8) -> Self {
        match level {
            1 => FontTier::Title,
            2 => FontTier::Section,
            3 => FontTier::Subsection,
            _ => FontTier::Minor,
        }
    }

    /// Size in points, or `None` for the configured body size.
    pub fn points(&self) -> Option<u32> {
        match self {
            FontTier::Title => Some(18),
            FontTier::Section => Some(16),
            FontTier::Subsection => Some(14),
            FontTier::Minor => Some(12),
            FontTier::Body => None,
        }
    }
}

/// A run of styled text laid out as one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub tier: FontTier,
    /// Semibold weight for the whole block
    pub bold: bool,
    /// Italic for the whole block, on top of per-span styling
    pub italic: bool,
    /// Left indentation in indent units
    pub indent: usize,
    pub spans: Vec<Span>,
}

/// Lines drawn verbatim in a fixed-width font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbatimBlock {
    pub language: Option<String>,
    pub lines: Vec<String>,
    pub indent: usize,
}

/// A table with automatic column sizing. Every row has `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    pub headers: Vec<Vec<Span>>,
    pub rows: Vec<Vec<Vec<Span>>>,
    pub indent: usize,
}

/// Page chrome applied once per document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSetup {
    /// Running header text
    pub header: Option<String>,
    /// Footer with current and total page number
    pub page_numbers: bool,
}

/// Document backend consumed by [`crate::render`].
///
/// Errors are returned to the caller of the renderer unchanged.
pub trait DocumentCanvas {
    type Error;

    fn page_setup(&mut self, setup: &PageSetup) -> Result<(), Self::Error>;

    fn text_block(&mut self, block: &TextBlock) -> Result<(), Self::Error>;

    fn verbatim_block(&mut self, block: &VerbatimBlock) -> Result<(), Self::Error>;

    fn table(&mut self, table: &TableBlock) -> Result<(), Self::Error>;
}
