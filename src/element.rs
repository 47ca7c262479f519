/// Inline text span with formatting flags.
///
/// Links are rendered underlined; their target is dropped during inline parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Span {
    /// Plain, unstyled text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Marker style of a numbered list, fixed by its first item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingType {
    /// `1.`
    Arabic,
    /// `I.`
    Roman,
    /// `a.` or `A.`
    Letter { uppercase: bool },
}

const ROMAN_NUMERALS: [&str; 10] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

impl NumberingType {
    /// Classify a list marker (without its trailing `.`).
    ///
    /// Only the literal numerals I to X count as roman here, so `XI` lands on
    /// arabic even though the parser accepts it as a list line.
    pub fn from_marker(marker: &str) -> Self {
        if ROMAN_NUMERALS.contains(&marker) {
            return NumberingType::Roman;
        }
        let mut chars = marker.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => NumberingType::Letter {
                uppercase: c.is_ascii_uppercase(),
            },
            _ => NumberingType::Arabic,
        }
    }

    /// Label for the item at 1-based `index`.
    pub fn label(&self, index: usize) -> String {
        match self {
            NumberingType::Arabic => index.to_string(),
            NumberingType::Roman => match index.checked_sub(1).and_then(|i| ROMAN_NUMERALS.get(i)) {
                Some(numeral) => (*numeral).to_string(),
                None => index.to_string(),
            },
            NumberingType::Letter { uppercase } => letter_label(index, *uppercase),
        }
    }
}

/// `1 -> a`, `26 -> z`, `27 -> aa`, ...
fn letter_label(index: usize, uppercase: bool) -> String {
    let base = if uppercase { b'A' } else { b'a' };
    let mut n = index.max(1);
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(base + (n % 26) as u8);
        n /= 26;
    }
    out.iter().rev().map(|&b| b as char).collect()
}

/// One line of a block quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteLine {
    /// 1 for `>`, 2 for `>>`
    pub depth: u8,
    pub text: String,
}

/// Block-level elements parsed from the markdown dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownElement {
    Heading {
        /// 1-3, or 4 for anything deeper
        level: u8,
        content: String,
        indent_level: usize,
    },
    Paragraph {
        content: String,
    },
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },
    Table(Table),
    BulletList {
        items: Vec<String>,
    },
    NumberedList {
        items: Vec<String>,
        numbering: NumberingType,
    },
    Quote {
        lines: Vec<QuoteLine>,
    },
    Checkbox {
        is_checked: bool,
        text: String,
    },
}

/// A pipe table. `rows` holds every consumed row, header row included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Index of the first data row: 2 when a separator row follows the header, else 1.
    pub data_start_row: usize,
}

impl Table {
    /// Rows rendered as table data.
    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows[self.data_start_row.min(self.rows.len())..]
    }
}
