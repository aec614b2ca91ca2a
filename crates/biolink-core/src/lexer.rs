//! Line splitter for the configuration parser.
//!
//! Configuration files are scanned strictly line by line. The lexer yields
//! each physical line together with its 1-based number and byte span so
//! the parser can attach locations to warnings without re-scanning.
//!
//! Newline search uses `memchr`, which is SIMD accelerated on supported
//! platforms. Lines borrow from the input; nothing is copied.

use crate::span::Span;
use memchr::memchr;

/// A single physical line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text without its line terminator.
    pub text: &'a str,
    /// 1-based line number.
    pub number: u32,
    /// Byte span of `text` in the original input.
    pub span: Span,
}

impl<'a> Line<'a> {
    /// Check if this line contains only whitespace.
    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The line text with surrounding whitespace removed.
    #[inline(always)]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }
}

/// Iterator over the lines of a configuration file.
///
/// Both `\n` and `\r\n` terminate a line. A trailing newline does not
/// produce an extra empty line.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    offset: usize,
    line_number: u32,
}

impl<'a> Lexer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            line_number: 0,
        }
    }

    #[inline(always)]
    fn is_eof(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    #[inline(always)]
    fn read_line(&mut self) -> Option<Line<'a>> {
        if self.is_eof() {
            return None;
        }

        let start = self.offset;
        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => start + pos,
            None => self.bytes.len(),
        };

        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = if end < self.bytes.len() { end + 1 } else { end };
        self.line_number = self.line_number.saturating_add(1);

        Some(Line {
            // SAFETY: `start` is 0 or one past a '\n', and `text_end` is at a
            // '\n', a '\r' preceding it, or the end of input. All of these are
            // ASCII positions, hence valid UTF-8 char boundaries in a &str.
            text: unsafe { self.input.get_unchecked(start..text_end) },
            number: self.line_number,
            span: Span::new(offset_u32(start), offset_u32(text_end)),
        })
    }
}

/// Byte offsets past `u32::MAX` clamp instead of wrapping.
#[inline(always)]
fn offset_u32(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Line<'a>> {
        self.read_line()
    }
}
