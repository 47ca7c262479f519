//! Convert a reduced markdown dialect into paginated documents.
//!
//! [`parse`] turns text into [`MarkdownElement`]s, [`render`] draws them on
//! any [`DocumentCanvas`], and the `markdown_to_*` helpers drive the bundled
//! Typst backend through to PDF or SVG.

mod canvas;
mod config;
#[cfg(test)]
mod config_schema;
mod element;
mod error;
mod inline;
mod parser;
mod render;
mod typst;

pub use canvas::{DocumentCanvas, FontTier, PageSetup, TableBlock, TextBlock, VerbatimBlock};
pub use config::{Config, ConfigError};
pub use element::{MarkdownElement, NumberingType, QuoteLine, Span, Table};
pub use error::{Error, Result};
pub use inline::{parse_inline, plain_text};
pub use parser::{ParsedBlock, is_separator_row, parse_blocks, parse_table_rows, split_row};
pub use render::{render, render_with};
pub use typst::TypstCanvas;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

/// Parse markdown text into a vector of elements.
pub fn parse(markdown: &str) -> Vec<MarkdownElement> {
    parser::parse(markdown)
}

/// Convert markdown to Typst markup using default config.
pub fn markdown_to_typst(markdown: &str) -> Result<String> {
    markdown_to_typst_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to Typst markup with custom config.
pub fn markdown_to_typst_with_config(markdown: &str, config: &Config) -> Result<String> {
    let elements = parse(markdown);
    let mut canvas = TypstCanvas::new(config);
    render_with(&elements, &config.page_setup(), &mut canvas)?;
    Ok(canvas.finish())
}

/// Compile markdown to a Typst document.
fn compile_document(markdown: &str, config: &Config) -> Result<PagedDocument> {
    let typst_content = markdown_to_typst_with_config(markdown, config)?;

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(config.font_family().is_some());

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))?;
    log::debug!("compiled {} pages", doc.pages.len());
    Ok(doc)
}

/// Convert markdown to PDF bytes using default config.
pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>> {
    markdown_to_pdf_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to PDF bytes with custom config.
pub fn markdown_to_pdf_with_config(markdown: &str, config: &Config) -> Result<Vec<u8>> {
    let doc = compile_document(markdown, config)?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}

/// Result of rendering markdown to SVG pages.
pub struct SvgDocument {
    pub pages: Vec<String>,
    pub width_pt: f64,
    pub height_pt: f64,
}

/// Convert markdown to SVG pages using default config.
pub fn markdown_to_svg(markdown: &str) -> Result<SvgDocument> {
    markdown_to_svg_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to SVG pages with custom config.
pub fn markdown_to_svg_with_config(markdown: &str, config: &Config) -> Result<SvgDocument> {
    let doc = compile_document(markdown, config)?;

    let pages: Vec<String> = doc.pages.iter().map(typst_svg::svg).collect();

    // Get dimensions from first page (assuming all pages same size)
    let (width_pt, height_pt) = match doc.pages.first() {
        Some(first_page) => {
            let size = first_page.frame.size();
            (size.x.to_pt(), size.y.to_pt())
        }
        None => (595.0, 842.0), // A4 default
    };

    Ok(SvgDocument {
        pages,
        width_pt,
        height_pt,
    })
}
