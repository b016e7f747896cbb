/// Errors raised while parsing a bracketed tree.
///
/// Both variants are fatal: the parse call returns no partial tree. Anomalous
/// but recoverable label shapes (see [`LabelAnomaly`](crate::LabelAnomaly))
/// are reported separately and do not abort the parse.
#[derive(Clone, Debug, Eq, Fail, PartialEq)]
pub enum ParseError {
    /// Unbalanced parentheses, stray tokens, empty input, or multiple roots.
    #[fail(display = "malformed tree: {}", _0)]
    MalformedTree(String),
    /// A nonterminal head token matches none of the recognized label shapes.
    #[fail(display = "unrecognized nonterminal label: {}", _0)]
    LabelFormat(String),
}
