//! Canvas backend that writes Typst markup.
//!
//! Pagination, font metrics and page numbering are left to the Typst
//! compiler; this module only decides how each block is expressed.

use std::fmt::{self, Write};

use crate::canvas::{DocumentCanvas, PageSetup, TableBlock, TextBlock, VerbatimBlock};
use crate::config::Config;
use crate::element::Span;

/// Builds a Typst source document from canvas calls.
pub struct TypstCanvas<'a> {
    config: &'a Config,
    out: String,
    /// A heading opened an unbreakable group that closes after the next block
    group_open: bool,
}

impl<'a> TypstCanvas<'a> {
    pub fn new(config: &'a Config) -> Self {
        let mut out = String::new();
        // Set up paragraph settings to prevent widows/orphans
        out.push_str("#set par(linebreaks: \"optimized\")\n");
        out.push_str(&format!("#set text(size: {}pt)\n", config.font.body_size));
        if let Some(family) = config.font_family() {
            out.push_str(&format!("#set text(font: {family:?})\n"));
        }
        out.push('\n');

        Self {
            config,
            out,
            group_open: false,
        }
    }

    /// Close any open group and return the markup.
    pub fn finish(mut self) -> String {
        if self.group_open {
            self.out.push_str("]\n\n");
        }
        self.out
    }

    /// Append one block. Headings stay on the same page as the block after them.
    fn push_block(&mut self, markup: &str, keep_with_next: bool) {
        if self.group_open {
            self.out.push_str(markup);
            self.out.push_str("]\n\n");
            self.group_open = false;
        } else if keep_with_next {
            self.out.push_str("#block(breakable: false)[\n");
            self.out.push_str(markup);
            self.group_open = true;
        } else {
            self.out.push_str(markup);
        }
    }

    fn indent(&self, indent: usize, content: String) -> String {
        if indent == 0 {
            return content;
        }
        let em = self.config.layout.indent * indent as f64;
        format!("#pad(left: {em}em)[{content}]")
    }

    fn spans_to_typst(&self, spans: &[Span], out: &mut String) -> fmt::Result {
        for span in spans {
            self.span_to_typst(span, out)?;
        }
        Ok(())
    }

    fn span_to_typst(&self, span: &Span, out: &mut String) -> fmt::Result {
        if span.text.is_empty() {
            return Ok(());
        }
        let mut content = String::new();
        escape_into(&span.text, &mut content);

        if span.bold {
            content = format!("#strong[{content}]");
        }
        if span.italic {
            content = format!("#emph[{content}]");
        }
        if span.underline {
            let links = &self.config.links;
            if links.underline {
                content = format!("#underline[{content}]");
            }
            if !links.color.is_empty() {
                content = format!("#text(fill: rgb({:?}))[{content}]", links.color);
            }
        }
        out.write_str(&content)
    }
}

impl DocumentCanvas for TypstCanvas<'_> {
    type Error = fmt::Error;

    fn page_setup(&mut self, setup: &PageSetup) -> fmt::Result {
        if setup.header.is_none() && !setup.page_numbers {
            return Ok(());
        }

        self.out.push_str("#set page(\n");
        if let Some(header) = &setup.header {
            let mut text = String::new();
            escape_into(header, &mut text);
            writeln!(self.out, "  header: align(right)[{text}],")?;
        }
        if setup.page_numbers {
            self.out.push_str(
                "  footer: context align(center)[#counter(page).display(\"1 / 1\", both: true)],\n",
            );
        }
        self.out.push_str(")\n\n");
        Ok(())
    }

    fn text_block(&mut self, block: &TextBlock) -> fmt::Result {
        let mut content = String::new();
        self.spans_to_typst(&block.spans, &mut content)?;

        if block.italic {
            content = format!("#emph[{content}]");
        }
        let size = block.tier.points();
        if size.is_some() || block.bold {
            let mut args = Vec::new();
            if let Some(points) = size {
                args.push(format!("size: {points}pt"));
            }
            if block.bold {
                args.push("weight: \"semibold\"".to_string());
            }
            content = format!("#text({})[{content}]", args.join(", "));
        }

        let mut markup = self.indent(block.indent, content);
        markup.push_str("\n\n");
        self.push_block(&markup, size.is_some());
        Ok(())
    }

    fn verbatim_block(&mut self, block: &VerbatimBlock) -> fmt::Result {
        let fence = "`".repeat(longest_backtick_run(&block.lines).max(2) + 1);

        let mut raw = String::new();
        write!(raw, "{fence}")?;
        if let Some(lang) = &block.language {
            raw.push_str(lang);
        }
        raw.push('\n');
        for line in &block.lines {
            writeln!(raw, "{line}")?;
        }
        raw.push_str(&fence);

        // Keep code blocks together when possible
        let mut markup = format!("#block(breakable: false)[\n{}\n]", self.indent(block.indent, raw));
        markup.push_str("\n\n");
        self.push_block(&markup, false);
        Ok(())
    }

    fn table(&mut self, table: &TableBlock) -> fmt::Result {
        let col_count = table.headers.len();
        if col_count == 0 {
            return Ok(());
        }

        let mut markup = String::new();
        writeln!(markup, "#table(")?;
        writeln!(markup, "  columns: {col_count},")?;

        markup.push_str("  table.header(");
        for (i, cell) in table.headers.iter().enumerate() {
            if i > 0 {
                markup.push_str(", ");
            }
            markup.push('[');
            self.spans_to_typst(cell, &mut markup)?;
            markup.push(']');
        }
        markup.push_str("),\n");

        for row in &table.rows {
            for cell in row {
                markup.push_str("  [");
                self.spans_to_typst(cell, &mut markup)?;
                markup.push_str("],\n");
            }
        }
        markup.push(')');

        // Keep tables together when possible
        let mut markup = format!("#block(breakable: false)[\n{}\n]", self.indent(table.indent, markup));
        markup.push_str("\n\n");
        self.push_block(&markup, false);
        Ok(())
    }
}

/// Escape characters that carry meaning in Typst markup.
fn escape_into(text: &str, out: &mut String) {
    let mut prev = None;
    // Only digits seen so far, so a `.` here could read as `1.` at line start
    let mut leading_digits = true;
    for ch in text.chars() {
        let special = match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '~' | '='
            | '-' | '+' => true,
            '.' => leading_digits,
            // would continue a preceding `#call[..]`
            '(' => prev.is_none(),
            _ => false,
        };
        if special {
            out.push('\\');
        }
        out.push(ch);
        leading_digits &= ch.is_ascii_digit();
        prev = Some(ch);
    }
}

fn longest_backtick_run(lines: &[String]) -> usize {
    lines
        .iter()
        .flat_map(|line| line.split(|c: char| c != '`'))
        .map(str::len)
        .max()
        .unwrap_or(0)
}
