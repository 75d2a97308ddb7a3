use core::fmt;

/// Field separator of a document, chosen once from its first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Semicolon,
    Tab,
    Comma,
}

impl Delimiter {
    /// Pick the delimiter for a line: semicolon, then tab, then comma.
    ///
    /// Comma is returned even if the line has no comma at all.
    pub fn sniff(line: &str) -> Self {
        if line.contains(';') {
            Delimiter::Semicolon
        } else if line.contains('\t') {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Comma => ',',
        }
    }

    /// Split a line and trim every field.
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.split(self.as_char()).map(str::trim).collect()
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Semicolon => write!(f, "semicolon"),
            Delimiter::Tab => write!(f, "tab"),
            Delimiter::Comma => write!(f, "comma"),
        }
    }
}
