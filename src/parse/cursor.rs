//! forward-only line cursor shared by the geometry, variable and index readers

use super::error::{MalformedValue, TruncatedFile, UnexpectedKeyword};
use super::ParseError;

use std::str::FromStr;

/// split a file into lines, dropping any blank lines at the very end
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().collect();

    while lines.last().map_or(false, |line| line.trim().is_empty()) {
        lines.pop();
    }

    lines
}

/// A position in the lines of a file.
///
/// Every line handed out is trimmed. The only lookahead is [`LineCursor::peek`],
/// which is how the end of a part block is found: the block ends at the next
/// `part` line or at the end of the file.
#[derive(Debug, Clone)]
pub(crate) struct LineCursor<'a> {
    lines: &'a [&'a str],
    position: usize,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(lines: &'a [&'a str]) -> Self {
        Self { lines, position: 0 }
    }

    /// 1-based number of the line that will be read next
    pub(crate) fn line_number(&self) -> usize {
        self.position + 1
    }

    /// number of lines not yet consumed
    pub(crate) fn remaining(&self) -> usize {
        self.lines.len().saturating_sub(self.position)
    }

    /// `count` capped at the number of lines left, for sizing buffers from counts read out of the file
    pub(crate) fn capacity_for(&self, count: usize) -> usize {
        count.min(self.remaining())
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.lines.len()
    }

    pub(crate) fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.position).map(|line| line.trim())
    }

    pub(crate) fn at_keyword(&self, keyword: &str) -> bool {
        self.peek() == Some(keyword)
    }

    pub(crate) fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    /// consume the next line. `expected` describes it in the error if the file has ended
    pub(crate) fn next_line(&mut self, expected: &str) -> Result<&'a str, ParseError> {
        let line = self
            .peek()
            .ok_or_else(|| TruncatedFile::new(self.line_number(), expected))?;
        self.position += 1;
        Ok(line)
    }

    /// consume a line that must be exactly `keyword`
    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        let line_number = self.line_number();
        let line = self.next_line(keyword)?;

        if line != keyword {
            return Err(UnexpectedKeyword::new(line_number, keyword, line).into());
        }

        Ok(())
    }

    /// consume a line holding a single value
    pub(crate) fn next_value<T: FromStr>(&mut self, expected: &str) -> Result<T, ParseError> {
        let line_number = self.line_number();
        let line = self.next_line(expected)?;
        parse_token(line, line_number, expected)
    }

    /// move forward until the next line is `keyword`. Returns `false` if the
    /// end of the file was reached first
    pub(crate) fn skip_to_keyword(&mut self, keyword: &str) -> bool {
        while let Some(line) = self.peek() {
            if line == keyword {
                return true;
            }
            self.position += 1;
        }

        false
    }
}

pub(crate) fn parse_token<T: FromStr>(
    token: &str,
    line_number: usize,
    expected: &str,
) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|_| MalformedValue::new(line_number, token, expected).into())
}
