//! Maps parsed elements onto canvas blocks.

use crate::canvas::{DocumentCanvas, FontTier, PageSetup, TableBlock, TextBlock, VerbatimBlock};
use crate::element::{MarkdownElement, Span, Table};
use crate::inline::parse_inline;

const BULLET: &str = "• ";
const CHECKED: &str = "☒ ";
const UNCHECKED: &str = "☐ ";

/// Indent applied to list items and code blocks
const BLOCK_INDENT: usize = 1;

/// Render elements with default page chrome.
pub fn render<C: DocumentCanvas>(elements: &[MarkdownElement], canvas: &mut C) -> Result<(), C::Error> {
    render_with(elements, &PageSetup::default(), canvas)
}

/// Render elements in order. The first canvas error aborts the rest of the document.
pub fn render_with<C: DocumentCanvas>(
    elements: &[MarkdownElement],
    setup: &PageSetup,
    canvas: &mut C,
) -> Result<(), C::Error> {
    canvas.page_setup(setup)?;
    for element in elements {
        render_element(element, canvas)?;
    }
    log::debug!("rendered {} elements", elements.len());
    Ok(())
}

fn render_element<C: DocumentCanvas>(element: &MarkdownElement, canvas: &mut C) -> Result<(), C::Error> {
    match element {
        MarkdownElement::Heading {
            level,
            content,
            indent_level,
        } => canvas.text_block(&TextBlock {
            tier: FontTier::for_heading(*level),
            bold: true,
            italic: false,
            indent: *indent_level,
            spans: vec![Span::plain(content.as_str())],
        }),
        MarkdownElement::Paragraph { content } => canvas.text_block(&body(parse_inline(content), 0)),
        MarkdownElement::CodeBlock { language, lines } => canvas.verbatim_block(&VerbatimBlock {
            language: language.clone(),
            lines: lines.clone(),
            indent: BLOCK_INDENT,
        }),
        MarkdownElement::Table(table) => canvas.table(&table_block(table)),
        MarkdownElement::BulletList { items } => {
            for item in items {
                canvas.text_block(&body(prefixed(BULLET, item), BLOCK_INDENT))?;
            }
            Ok(())
        }
        MarkdownElement::NumberedList { items, numbering } => {
            for (i, item) in items.iter().enumerate() {
                let label = format!("{}. ", numbering.label(i + 1));
                canvas.text_block(&body(prefixed(&label, item), BLOCK_INDENT))?;
            }
            Ok(())
        }
        MarkdownElement::Quote { lines } => {
            for line in lines {
                canvas.text_block(&TextBlock {
                    italic: true,
                    ..body(parse_inline(&line.text), usize::from(line.depth))
                })?;
            }
            Ok(())
        }
        MarkdownElement::Checkbox { is_checked, text } => {
            let glyph = if *is_checked { CHECKED } else { UNCHECKED };
            canvas.text_block(&body(prefixed(glyph, text), 0))
        }
    }
}

fn body(spans: Vec<Span>, indent: usize) -> TextBlock {
    TextBlock {
        tier: FontTier::Body,
        bold: false,
        italic: false,
        indent,
        spans,
    }
}

fn prefixed(prefix: &str, text: &str) -> Vec<Span> {
    let mut spans = vec![Span::plain(prefix)];
    spans.extend(parse_inline(text));
    spans
}

/// Header cells bold; data rows padded or cut to the header width.
fn table_block(table: &Table) -> TableBlock {
    let columns = table.headers.len();
    let headers: Vec<Vec<Span>> = table
        .headers
        .iter()
        .map(|cell| {
            parse_inline(cell)
                .into_iter()
                .map(|span| Span { bold: true, ..span })
                .collect()
        })
        .collect();
    let rows: Vec<Vec<Vec<Span>>> = table
        .data_rows()
        .iter()
        .map(|row| {
            (0..columns)
                .map(|i| row.get(i).map(|cell| parse_inline(cell)).unwrap_or_default())
                .collect()
        })
        .collect();

    TableBlock {
        headers,
        rows,
        indent: 0,
    }
}
