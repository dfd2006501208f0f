use crate::*;

/// Line-buffered character cursor over a SQL fragment.
///
/// Every line, including the last, ends in a virtual `'\n'` so multi-line
/// input scans the same way as a single line. `\r\n` line endings are folded.
#[derive(Debug, Clone)]
pub(crate) struct Source {
    lines: Vec<Vec<char>>,
    line: usize,
    column: usize,
}

impl Source {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(|line| line.chars().collect()).collect(),
            line: 0,
            column: 0,
        }
    }

    /// 1-based position of the next character.
    pub(crate) fn location(&self) -> Location {
        Location::new(self.line + 1, self.column + 1)
    }

    fn char_at(&self, line: usize, column: usize) -> Option<char> {
        let chars = self.lines.get(line)?;
        match column.cmp(&chars.len()) {
            std::cmp::Ordering::Less => Some(chars[column]),
            std::cmp::Ordering::Equal => Some('\n'),
            std::cmp::Ordering::Greater => None,
        }
    }

    fn step(&self, line: usize, column: usize) -> (usize, usize) {
        match self.lines.get(line) {
            Some(chars) if column < chars.len() => (line, column + 1),
            _ => (line + 1, 0),
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.char_at(self.line, self.column)
    }

    /// The character after the next one.
    pub(crate) fn peek_second(&self) -> Option<char> {
        let (line, column) = self.step(self.line, self.column);
        self.char_at(line, column)
    }

    /// First character after any run of whitespace, without consuming.
    pub(crate) fn peek_past_whitespace(&self) -> Option<char> {
        let (mut line, mut column) = (self.line, self.column);
        loop {
            let c = self.char_at(line, column)?;
            if !c.is_whitespace() {
                return Some(c);
            }
            (line, column) = self.step(line, column);
        }
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        (self.line, self.column) = self.step(self.line, self.column);
        Some(c)
    }

    pub(crate) fn advance_if(&mut self, accept: impl Fn(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(c) if accept(c) => self.advance(),
            _ => None,
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.advance_if(char::is_whitespace).is_some() {}
    }

    /// Consume the remainder of the current line, leaving the line break.
    pub(crate) fn rest_of_line(&mut self) -> String {
        let Some(chars) = self.lines.get(self.line) else {
            return String::new();
        };
        let rest: String = chars.get(self.column..).unwrap_or_default().iter().collect();
        self.column = chars.len();
        rest
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_end_in_a_virtual_newline() {
        let mut source = Source::new("ab\nc");
        let scanned: String = std::iter::from_fn(|| source.advance()).collect();
        assert_eq!(scanned, "ab\nc\n");
        assert!(source.is_at_end());
    }

    #[test]
    fn tracks_line_and_column() {
        let mut source = Source::new("ab\r\ncd");
        assert_eq!(source.location(), Location::new(1, 1));
        source.advance();
        source.advance();
        assert_eq!(source.peek(), Some('\n'));
        assert_eq!(source.location(), Location::new(1, 3));
        source.advance();
        assert_eq!(source.location(), Location::new(2, 1));
        assert_eq!(source.peek(), Some('c'));
        assert_eq!(source.peek_second(), Some('d'));
    }

    #[test]
    fn rest_of_line_stops_before_the_break() {
        let mut source = Source::new("-- x y\nz");
        source.advance();
        source.advance();
        assert_eq!(source.rest_of_line(), " x y");
        assert_eq!(source.advance(), Some('\n'));
        assert_eq!(source.advance(), Some('z'));
    }

    #[test]
    fn peeks_across_lines() {
        let source = Source::new("  \n   'x'");
        assert_eq!(source.peek_past_whitespace(), Some('\''));
        assert!(Source::new("").is_at_end());
    }
}
