//! In-memory rows and cells, prior to submission.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::Error;

/// Sheet title -> rows to write under that title.
pub type SheetData = BTreeMap<String, Vec<Row>>;

/// Background color of a row, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub text: String,
    pub hyperlink: Option<String>,
}

impl Cell {
    pub fn new<S: Into<String>>(text: S) -> Cell {
        Cell {
            text: text.into(),
            hyperlink: None,
        }
    }

    pub fn link<S: Into<String>, U: Into<String>>(text: S, url: U) -> Cell {
        Cell {
            text: text.into(),
            hyperlink: Some(url.into()),
        }
    }

    /// `=HYPERLINK("url","text")`, or `None` for a plain cell. An empty
    /// hyperlink counts as none.
    pub fn hyperlink_formula(&self) -> Option<String> {
        self.hyperlink.as_deref().filter(|url| !url.is_empty()).map(|url| {
            format!(
                "=HYPERLINK(\"{}\",\"{}\")",
                escape_formula_string(url),
                escape_formula_string(&self.text)
            )
        })
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::new(text)
    }
}

// Sheets string literals escape a double quote by doubling it.
fn escape_formula_string(s: &str) -> String {
    s.replace('"', "\"\"")
}

/// A row of cells. Bold and color apply to every cell in the row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub bold_text: bool,
    pub color: Option<Color>,
}

impl Row {
    pub fn new<I, C>(cells: I) -> Row
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Row {
            cells: cells.into_iter().map(Into::into).collect(),
            bold_text: false,
            color: None,
        }
    }

    pub fn bold(mut self) -> Row {
        self.bold_text = true;
        self
    }

    pub fn with_color(mut self, color: Color) -> Row {
        self.color = Some(color);
        self
    }

    /// Plain text of every cell; hyperlinks are dropped.
    pub fn to_cells(&self) -> Vec<String> {
        self.cells.iter().map(|cell| cell.text.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_cell_has_no_formula() {
        assert_eq!(Cell::new("hello").hyperlink_formula(), None);
    }

    #[test]
    fn empty_hyperlink_is_plain() {
        assert_eq!(Cell::link("hello", "").hyperlink_formula(), None);
    }

    #[test]
    fn hyperlink_formula() {
        let cell = Cell::link("issue 42", "https://github.com/golang/go/issues/42");
        assert_eq!(
            cell.hyperlink_formula().unwrap(),
            r#"=HYPERLINK("https://github.com/golang/go/issues/42","issue 42")"#
        );
    }

    #[test]
    fn hyperlink_formula_escapes_quotes() {
        let cell = Cell::link(r#"say "hi""#, "https://example.com/?q=\"x\"");
        assert_eq!(
            cell.hyperlink_formula().unwrap(),
            r#"=HYPERLINK("https://example.com/?q=""x""","say ""hi""")"#
        );
    }

    #[test]
    fn row_builder() {
        let row = Row::new(["a", "b"])
            .bold()
            .with_color(Color::rgb(255, 0, 128));
        assert!(row.bold_text);
        assert_eq!(row.color, Some(Color::rgb(255, 0, 128)));
        assert_eq!(row.cells, vec![Cell::new("a"), Cell::new("b")]);
    }

    #[test]
    fn to_cells_uses_text() {
        let row = Row::new(vec![Cell::new("name"), Cell::link("docs", "https://docs.rs")]);
        assert_eq!(row.to_cells(), vec!["name".to_string(), "docs".to_string()]);
    }

    #[test]
    fn parse_color() {
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
        assert_eq!("00FF7f".parse::<Color>().unwrap(), Color::rgb(0, 255, 127));
    }

    #[test]
    fn parse_bad_color() {
        for s in ["", "#fff", "#gg0000", "#12345678", "#ff00é"] {
            assert!(
                matches!(s.parse::<Color>(), Err(Error::InvalidColor(_))),
                "{:?} should not parse",
                s
            );
        }
    }
}
