use std::fmt;

/// Word-offset interval covered by a node.
///
/// Offsets are 1-based word positions; 0 is reserved for the dummy-root
/// convention used by downstream tooling. The interval is half-open: `end`
/// is not covered. Empty-category leaves cover no words and have
/// `start == end`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "Span start has to be at most end.");
        Span { start, end }
    }

    /// Lower bound of the span.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Upper bound of the span, exclusive.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get this span's bounds as a tuple.
    pub fn bounds(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Number of words covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns whether the span covers no words.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<usize> for Span {
    /// Unit span covering the single word at `idx`.
    fn from(idx: usize) -> Self {
        Span {
            start: idx,
            end: idx + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use crate::span::Span;

    #[test]
    fn unit_span() {
        let span = Span::from(3);
        assert_eq!(span.bounds(), (3, 4));
        assert_eq!(span.len(), 1);
        assert!(!span.is_empty());
    }

    #[test]
    fn empty_span() {
        let span = Span::new(2, 2);
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
    }

    #[test]
    #[should_panic]
    fn invalid_span_2_1() {
        Span::new(2, 1);
    }

    #[test]
    fn display() {
        assert_eq!(Span::new(1, 3).to_string(), "1..3");
    }
}
