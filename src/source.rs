use std::fmt;

/// A position in the source text, 1-based.
///
/// Columns count characters, not bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reference {
    pub line: u32,
    pub column: u32,
}

impl Reference {
    /// Start of file. Also what diagnostics report when there is no element to point at.
    pub const START: Self = Self { line: 1, column: 1 };

    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Same line, `columns` characters further right.
    #[must_use]
    pub const fn shifted(self, columns: u32) -> Self {
        Self {
            line: self.line,
            column: self.column.saturating_add(columns),
        }
    }

    pub(crate) fn advance_over(&mut self, text: &str) {
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    chars.next_if_eq(&'\n');
                    self.newline();
                }
                '\n' => self.newline(),
                _ => self.column = self.column.saturating_add(1),
            }
        }
    }

    fn newline(&mut self) {
        self.line = self.line.saturating_add(1);
        self.column = 1;
    }
}

impl Default for Reference {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
