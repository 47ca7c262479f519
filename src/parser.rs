//! Line-oriented block parser for the reduced markdown dialect.
//!
//! Each line is classified by prefix in a fixed priority order. Multi-line
//! constructs (code blocks, tables, lists, quotes) greedily take every
//! following line that matches their own predicate and never backtrack.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::element::{MarkdownElement, NumberingType, QuoteLine, Table};

static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+)\s(.*)$").unwrap());

/// Arabic number, roman numeral characters, or a single letter, then `. `
static NUMBERED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+|[IVXLCDM]+|[a-zA-Z])\.\s(.*)$").unwrap());

const FENCE: &str = "```";

/// An element together with the source lines it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBlock {
    pub element: MarkdownElement,
    /// 0-based, end-exclusive line range after line-ending normalization
    pub lines: Range<usize>,
}

/// Parse markdown text into a list of elements
pub fn parse(text: &str) -> Vec<MarkdownElement> {
    parse_blocks(text).into_iter().map(|b| b.element).collect()
}

/// Parse markdown text, keeping the consumed line range of every element.
pub fn parse_blocks(text: &str) -> Vec<ParsedBlock> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.lines().collect();

    let mut blocks = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let (element, consumed) = parse_at(&lines[i..]);
        debug_assert!(consumed > 0);
        if let Some(element) = element {
            log::trace!("lines {}..{}: {:?}", i, i + consumed, element);
            blocks.push(ParsedBlock {
                element,
                lines: i..i + consumed,
            });
        }
        i += consumed;
    }

    log::debug!(
        "parsed {} elements from {} lines",
        blocks.len(),
        lines.len()
    );
    blocks
}

/// Recognize the construct starting at `lines[0]`.
///
/// Returns the element (if any) and how many lines it consumed, always at
/// least one.
fn parse_at(lines: &[&str]) -> (Option<MarkdownElement>, usize) {
    let line = lines[0];
    let trimmed = line.trim_start();

    if trimmed.is_empty() {
        return (None, 1);
    }

    if let Some(element) = heading(line) {
        return (Some(element), 1);
    }

    if trimmed.starts_with(FENCE) {
        let (element, consumed) = code_block(lines);
        return (Some(element), consumed);
    }

    if is_table_row(line) {
        let consumed = run_length(lines, is_table_row);
        return (parse_table_rows(&lines[..consumed]), consumed);
    }

    if is_bullet_item(line) {
        let consumed = run_length(lines, is_bullet_item);
        let items = lines[..consumed]
            .iter()
            .map(|l| l.trim_start()[2..].trim().to_string())
            .collect();
        return (Some(MarkdownElement::BulletList { items }), consumed);
    }

    if let Some(caps) = NUMBERED_REGEX.captures(trimmed) {
        let numbering = NumberingType::from_marker(&caps[1]);
        let consumed = run_length(lines, is_numbered_item);
        let items = lines[..consumed]
            .iter()
            .filter_map(|l| NUMBERED_REGEX.captures(l.trim_start()))
            .map(|c| c[2].trim().to_string())
            .collect();
        return (
            Some(MarkdownElement::NumberedList { items, numbering }),
            consumed,
        );
    }

    if is_quote_line(line) {
        let consumed = run_length(lines, is_quote_line);
        let lines = lines[..consumed].iter().map(|l| quote_line(l)).collect();
        return (Some(MarkdownElement::Quote { lines }), consumed);
    }

    if let Some((is_checked, text)) = checkbox(line) {
        return (
            Some(MarkdownElement::Checkbox {
                is_checked,
                text: text.to_string(),
            }),
            1,
        );
    }

    (
        Some(MarkdownElement::Paragraph {
            content: line.to_string(),
        }),
        1,
    )
}

/// Number of leading lines satisfying `pred`.
fn run_length(lines: &[&str], pred: fn(&str) -> bool) -> usize {
    lines.iter().take_while(|l| pred(l)).count()
}

fn heading(line: &str) -> Option<MarkdownElement> {
    let caps = HEADING_REGEX.captures(line.trim_start())?;
    let level = match caps[1].len() {
        n @ 1..=3 => n as u8,
        _ => 4,
    };
    let leading = line.chars().take_while(|c| c.is_whitespace()).count();
    Some(MarkdownElement::Heading {
        level,
        content: caps[2].trim().to_string(),
        indent_level: leading / 2,
    })
}

/// Consume an opening fence, the body, and the closing fence if present.
fn code_block(lines: &[&str]) -> (MarkdownElement, usize) {
    let info = lines[0].trim()[FENCE.len()..].trim();
    let language = (!info.is_empty()).then(|| info.to_string());

    let body: Vec<String> = lines[1..]
        .iter()
        .take_while(|l| !l.trim().starts_with(FENCE))
        .map(|l| l.to_string())
        .collect();
    // Opening fence, body, and the closing fence unless input ran out.
    let consumed = (1 + body.len() + 1).min(lines.len());

    (
        MarkdownElement::CodeBlock {
            language,
            lines: body,
        },
        consumed,
    )
}

fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed[1..].contains('|')
}

/// Split a table row into trimmed cells, dropping one outer pipe on each side.
pub fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(|c| c.trim().to_string()).collect()
}

fn is_separator_cell(cell: &str) -> bool {
    !cell.is_empty() && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
}

/// True when every cell only holds `-`, `:` and spaces.
pub fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| is_separator_cell(c))
}

/// Build a table from its row lines. Returns `None` when there are no rows.
pub fn parse_table_rows(lines: &[&str]) -> Option<MarkdownElement> {
    let rows: Vec<Vec<String>> = lines.iter().map(|l| split_row(l)).collect();
    let headers = rows.first()?.clone();
    let data_start_row = match rows.get(1) {
        Some(second) if is_separator_row(second) => 2,
        _ => 1,
    };
    Some(MarkdownElement::Table(Table {
        headers,
        rows,
        data_start_row,
    }))
}

fn is_bullet_item(line: &str) -> bool {
    line.trim_start().starts_with("- ") && checkbox(line).is_none()
}

fn is_numbered_item(line: &str) -> bool {
    NUMBERED_REGEX.is_match(line.trim_start())
}

fn is_quote_line(line: &str) -> bool {
    line.trim_start().starts_with('>')
}

fn quote_line(line: &str) -> QuoteLine {
    let trimmed = line.trim_start();
    let (depth, rest) = match trimmed.strip_prefix(">>") {
        Some(rest) => (2, rest),
        None => (1, &trimmed[1..]),
    };
    QuoteLine {
        depth,
        text: rest.trim().to_string(),
    }
}

/// `[x]`, `[X]` or `[ ]`, optionally after `- `. Returns the state and the text.
fn checkbox(line: &str) -> Option<(bool, &str)> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix("- ").unwrap_or(trimmed);
    let is_checked = if rest.starts_with("[x]") || rest.starts_with("[X]") {
        true
    } else if rest.starts_with("[ ]") {
        false
    } else {
        return None;
    };
    Some((is_checked, rest[3..].trim()))
}
