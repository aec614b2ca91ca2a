//! Non-fatal parse warnings.
//!
//! Parsing a configuration never fails: malformed input degrades to
//! missing fields. When asked, the parser still records what it skipped or
//! filled with defaults so an editor or CLI can point at the offending
//! line. Warnings never change the resulting [`Document`](crate::Document).

use crate::span::Span;
use thiserror::Error;

/// Warning kinds for categorizing what the parser noticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseWarningKind {
    /// A line that no rule matched and was skipped.
    UnrecognizedLine,
    /// An `Icon:`/`URL:`/`Description:` field with no open item to attach to.
    OrphanField,
    /// A social link or link card was emitted without a URL.
    MissingUrl,
    /// A `### ` category header with no name.
    EmptyHeading,
    /// A profile key that appeared more than once; the last value wins.
    DuplicateProfileKey,
}

impl ParseWarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseWarningKind::UnrecognizedLine => "unrecognized_line",
            ParseWarningKind::OrphanField => "orphan_field",
            ParseWarningKind::MissingUrl => "missing_url",
            ParseWarningKind::EmptyHeading => "empty_heading",
            ParseWarningKind::DuplicateProfileKey => "duplicate_profile_key",
        }
    }
}

/// A warning with its source location.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
#[error("line {line}: {message}")]
pub struct ParseWarning {
    /// Human-readable description.
    pub message: String,
    /// Warning categorization.
    pub kind: ParseWarningKind,
    /// 1-based line number the warning refers to.
    pub line: u32,
    /// Byte span of that line.
    pub span: Span,
}

impl ParseWarning {
    pub fn new(kind: ParseWarningKind, message: impl Into<String>, line: u32, span: Span) -> Self {
        Self {
            message: message.into(),
            kind,
            line,
            span,
        }
    }

    pub fn unrecognized_line(text: &str, line: u32, span: Span) -> Self {
        Self::new(
            ParseWarningKind::UnrecognizedLine,
            format!("ignored unrecognized line `{}`", text),
            line,
            span,
        )
    }

    pub fn orphan_field(field: &str, line: u32, span: Span) -> Self {
        Self::new(
            ParseWarningKind::OrphanField,
            format!("`{}` field outside of any link", field),
            line,
            span,
        )
    }

    pub fn missing_url(name: &str, line: u32, span: Span) -> Self {
        Self::new(
            ParseWarningKind::MissingUrl,
            format!("link `{}` has no URL", name),
            line,
            span,
        )
    }

    pub fn empty_heading(line: u32, span: Span) -> Self {
        Self::new(
            ParseWarningKind::EmptyHeading,
            "category heading without a name",
            line,
            span,
        )
    }

    pub fn duplicate_profile_key(key: &str, line: u32, span: Span) -> Self {
        Self::new(
            ParseWarningKind::DuplicateProfileKey,
            format!("profile field `{}` set more than once", key),
            line,
            span,
        )
    }
}

/// Warnings collected during one parse, in line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseWarnings {
    warnings: Vec<ParseWarning>,
}

impl ParseWarnings {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    pub fn push(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseWarning> {
        self.warnings.iter()
    }

    /// Count warnings of one kind.
    pub fn count(&self, kind: ParseWarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }

    /// Restore line order after out-of-order pushes (flush warnings are
    /// reported against the header line, which precedes later lines).
    pub(crate) fn sort_by_line(&mut self) {
        self.warnings.sort_by_key(|w| w.line);
    }
}

impl IntoIterator for ParseWarnings {
    type Item = ParseWarning;
    type IntoIter = std::vec::IntoIter<ParseWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseWarnings {
    type Item = &'a ParseWarning;
    type IntoIter = std::slice::Iter<'a, ParseWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.iter()
    }
}
