use crate::prelude::*;

/// Errors that come from the layout of an EnSight file rather than from the
/// meaning of its contents. Line numbers are 1-based.
#[derive(Debug, thiserror::Error, From)]
pub enum ParseError {
    #[error("{0}")]
    TruncatedFile(TruncatedFile),
    #[error("{0}")]
    MalformedValue(MalformedValue),
    #[error("{0}")]
    UnexpectedKeyword(UnexpectedKeyword),
    #[error("{0}")]
    UnsupportedNumberingMode(UnsupportedNumberingMode),
}

#[derive(Display, Debug, Clone, PartialEq, Eq)]
#[display(fmt = "file ended at line {line} while reading {expected}")]
pub struct TruncatedFile {
    pub line: usize,
    pub expected: String,
}

impl TruncatedFile {
    pub(crate) fn new<T: Into<String>>(line: usize, expected: T) -> Self {
        Self {
            line,
            expected: expected.into(),
        }
    }
}

#[derive(Display, Debug, Clone, PartialEq, Eq)]
#[display(fmt = "line {line}: could not read `{token}` as {expected}")]
pub struct MalformedValue {
    pub line: usize,
    pub token: String,
    pub expected: String,
}

impl MalformedValue {
    pub(crate) fn new<A: Into<String>, B: Into<String>>(line: usize, token: A, expected: B) -> Self {
        Self {
            line,
            token: token.into(),
            expected: expected.into(),
        }
    }
}

#[derive(Display, Debug, Clone, PartialEq, Eq)]
#[display(fmt = "line {line}: expected `{expected}`, got `{actual}`")]
pub struct UnexpectedKeyword {
    pub line: usize,
    pub expected: String,
    pub actual: String,
}

impl UnexpectedKeyword {
    pub(crate) fn new<A: Into<String>, B: Into<String>>(line: usize, expected: A, actual: B) -> Self {
        Self {
            line,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[derive(Display, Debug, Clone, PartialEq, Eq, Constructor)]
#[display(fmt = "line {line}: {entity} id mode `{mode}` is not supported, only `assign` is")]
pub struct UnsupportedNumberingMode {
    pub line: usize,
    pub entity: &'static str,
    pub mode: String,
}
