use mdpage::{
    Config, DocumentCanvas, FontTier, MarkdownElement, NumberingType, PageSetup, TableBlock,
    TextBlock, VerbatimBlock, parse, parse_blocks, plain_text, render_with,
};
use pretty_assertions::assert_eq;

const DOCUMENT: &str = "\
# Quarterly notes
  ## Indented section

Intro with **bold**, *italic* and a [link](https://example.com).

- first
- second
- [x] shipped
- [ ] pending

I. alpha
II. beta

| Item | Count |
|------|------:|
| a    | 1     |
| b    | 2     | extra |

> quoted
>> nested

```sh
echo hi
```
";

/// Flattened view of canvas calls.
#[derive(Default)]
struct Transcript {
    lines: Vec<String>,
}

impl DocumentCanvas for Transcript {
    type Error = std::convert::Infallible;

    fn page_setup(&mut self, setup: &PageSetup) -> Result<(), Self::Error> {
        self.lines.push(format!("setup numbers={}", setup.page_numbers));
        Ok(())
    }

    fn text_block(&mut self, block: &TextBlock) -> Result<(), Self::Error> {
        let tier = match block.tier {
            FontTier::Body => "body".to_string(),
            tier => format!("{}pt", tier.points().unwrap_or_default()),
        };
        let italic = if block.italic { " italic" } else { "" };
        self.lines.push(format!(
            "text {tier} indent={}{italic}: {}",
            block.indent,
            plain_text(&block.spans)
        ));
        Ok(())
    }

    fn verbatim_block(&mut self, block: &VerbatimBlock) -> Result<(), Self::Error> {
        self.lines.push(format!(
            "code {}: {}",
            block.language.as_deref().unwrap_or("-"),
            block.lines.join("|")
        ));
        Ok(())
    }

    fn table(&mut self, table: &TableBlock) -> Result<(), Self::Error> {
        let cells = |row: &Vec<Vec<mdpage::Span>>| {
            row.iter().map(|c| plain_text(c)).collect::<Vec<_>>().join(",")
        };
        let rows: Vec<String> = table.rows.iter().map(cells).collect();
        self.lines.push(format!(
            "table [{}] {}",
            cells(&table.headers),
            rows.join(" / ")
        ));
        Ok(())
    }
}

#[test]
fn element_sequence() {
    let elements = parse(DOCUMENT);
    let kinds: Vec<&str> = elements
        .iter()
        .map(|e| match e {
            MarkdownElement::Heading { .. } => "heading",
            MarkdownElement::Paragraph { .. } => "paragraph",
            MarkdownElement::CodeBlock { .. } => "code",
            MarkdownElement::Table(_) => "table",
            MarkdownElement::BulletList { .. } => "bullets",
            MarkdownElement::NumberedList { .. } => "numbered",
            MarkdownElement::Quote { .. } => "quote",
            MarkdownElement::Checkbox { .. } => "checkbox",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading", "heading", "paragraph", "bullets", "checkbox", "checkbox", "numbered",
            "table", "quote", "code",
        ]
    );
    assert!(matches!(
        elements[6],
        MarkdownElement::NumberedList {
            numbering: NumberingType::Roman,
            ..
        }
    ));
}

#[test]
fn blocks_cover_every_non_blank_line() {
    let blocks = parse_blocks(DOCUMENT);
    let consumed: usize = blocks.iter().map(|b| b.lines.len()).sum();
    let non_blank = DOCUMENT.lines().filter(|l| !l.trim().is_empty()).count();
    assert_eq!(consumed, non_blank);
    assert!(blocks.windows(2).all(|w| w[0].lines.end <= w[1].lines.start));
}

#[test]
fn rendered_transcript() {
    let mut transcript = Transcript::default();
    let setup = Config::default().page_setup();
    render_with(&parse(DOCUMENT), &setup, &mut transcript).unwrap();

    assert_eq!(
        transcript.lines,
        vec![
            "setup numbers=true",
            "text 18pt indent=0: Quarterly notes",
            "text 16pt indent=1: Indented section",
            "text body indent=0: Intro with bold, italic and a link.",
            "text body indent=1: • first",
            "text body indent=1: • second",
            "text body indent=0: ☒ shipped",
            "text body indent=0: ☐ pending",
            "text body indent=1: I. alpha",
            "text body indent=1: II. beta",
            "table [Item,Count] a,1 / b,2",
            "text body indent=1 italic: quoted",
            "text body indent=2 italic: nested",
            "code sh: echo hi",
        ]
    );
}

#[test]
fn crlf_input_matches_lf_input() {
    assert_eq!(parse(&DOCUMENT.replace('\n', "\r\n")), parse(DOCUMENT));
}

#[test]
fn typst_markup_for_document() {
    let markup = mdpage::markdown_to_typst(DOCUMENT).unwrap();
    assert!(markup.starts_with("#set par(linebreaks: \"optimized\")\n"));
    assert!(markup.contains("#text(size: 18pt, weight: \"semibold\")[Quarterly notes]"));
    assert!(markup.contains("table.header([#strong[Item]], [#strong[Count]])"));
    assert!(markup.contains("```sh\necho hi\n```"));
}

#[test]
fn pdf_output() {
    let pdf = mdpage::markdown_to_pdf(DOCUMENT).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn svg_output() {
    let doc = mdpage::markdown_to_svg(DOCUMENT).unwrap();
    assert_eq!(doc.pages.len(), 1);
    assert!(doc.pages[0].contains("<svg"));
    assert!(doc.width_pt > 0.0 && doc.height_pt > 0.0);
}
