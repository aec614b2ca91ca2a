//! Source locations for lines and warnings.
//!
//! The parser works line by line, so locations carry both the byte range
//! and the 1-based line number. Byte offsets make it cheap to slice the
//! original input back out when reporting a warning.

/// A byte range in the source text, `[start, end)`.
///
/// # Example
///
/// ```rust
/// use biolink_core::span::Span;
///
/// let span = Span::new(3, 10);
/// assert_eq!(span.len(), 7);
/// assert_eq!(span.slice("## Profile"), "Profile");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Borrow the covered text from `input`.
    ///
    /// Returns an empty string when the span does not fit `input` or does
    /// not fall on character boundaries, so a span from another document
    /// never panics.
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        input
            .get(self.start as usize..self.end as usize)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_out_of_bounds_is_empty() {
        let span = Span::new(3, 40);
        assert_eq!(span.slice("short"), "");
    }

    #[test]
    fn inverted_span_is_empty() {
        let span = Span::new(8, 2);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }
}
