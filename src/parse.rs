use failure::Error;

use crate::error::ParseError;
use crate::label::Label;
use crate::node::{Node, NodeId, NonTerminal, Terminal};
use crate::tree::Tree;

/// Reserved part-of-speech marker for empty-category terminals.
pub const EMPTY_MARKER: &str = "-NONE-";

/// Trait to construct overt terminals during parsing.
///
/// The parser goes through a factory for every nonempty leaf, so callers can
/// normalize forms or tags while the tree is built. Empty-category leaves are
/// always stored verbatim and bypass the factory.
pub trait TerminalFactory {
    fn terminal(&self, pos: &str, form: &str) -> Terminal;
}

/// Default factory, stores tag and form untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct VerbatimTerminals;

impl TerminalFactory for VerbatimTerminals {
    fn terminal(&self, pos: &str, form: &str) -> Terminal {
        Terminal::new(pos, form)
    }
}

/// `TreeBuilder`
///
/// This struct is used to construct a [`Tree`] from its bracketed string
/// representation.
pub struct TreeBuilder<F = VerbatimTerminals> {
    assign_spans: bool,
    terminals: F,
}

impl TreeBuilder<VerbatimTerminals> {
    pub fn new() -> Self {
        TreeBuilder {
            assign_spans: true,
            terminals: VerbatimTerminals,
        }
    }
}

impl Default for TreeBuilder<VerbatimTerminals> {
    fn default() -> Self {
        TreeBuilder::new()
    }
}

// Items on the parse stack: an unmatched `(`, a raw token, or an already
// reduced node.
enum StackItem<'a> {
    Open,
    Token(&'a str),
    Node(NodeId),
}

impl<F> TreeBuilder<F>
where
    F: TerminalFactory,
{
    /// Replace the terminal factory.
    pub fn terminal_factory<G>(self, factory: G) -> TreeBuilder<G>
    where
        G: TerminalFactory,
    {
        TreeBuilder {
            assign_spans: self.assign_spans,
            terminals: factory,
        }
    }

    /// Set whether spans are computed after parsing. Defaults to `true`.
    pub fn assign_spans(mut self, assign: bool) -> Self {
        self.assign_spans = assign;
        self
    }

    /// Constructs a new tree from a `&str` containing a bracketed tree.
    pub fn parse(&self, line: &str) -> Result<Tree, Error> {
        let mut arena = Vec::new();
        let mut stack = Vec::new();
        for token in tokenize(line) {
            match token {
                "(" => stack.push(StackItem::Open),
                ")" => {
                    let node = self.reduce(&mut stack, &mut arena)?;
                    stack.push(StackItem::Node(node));
                }
                _ => stack.push(StackItem::Token(token)),
            }
        }
        let root = match stack.pop() {
            Some(StackItem::Node(root)) if stack.is_empty() => root,
            None => return Err(ParseError::MalformedTree("empty input".to_string()).into()),
            _ => {
                return Err(ParseError::MalformedTree(
                    "input does not reduce to a single tree".to_string(),
                )
                .into());
            }
        };
        Ok(Tree::new(arena, root, self.assign_spans))
    }

    // Reduce the topmost bracket to a node: pop constituents down to the
    // matching `(`, classify the bracket as terminal or nonterminal, and
    // store the resulting node in the arena.
    fn reduce<'a>(
        &self,
        stack: &mut Vec<StackItem<'a>>,
        arena: &mut Vec<Node>,
    ) -> Result<NodeId, Error> {
        let mut constituents = Vec::new();
        loop {
            match stack.pop() {
                Some(StackItem::Open) => break,
                Some(item) => constituents.push(item),
                None => {
                    return Err(ParseError::MalformedTree("unmatched `)`".to_string()).into());
                }
            }
        }
        // the bottom-most item inside the bracket is the head token
        let head = match constituents.pop() {
            Some(StackItem::Token(token)) => token,
            _ => {
                return Err(
                    ParseError::MalformedTree("bracket without head token".to_string()).into(),
                );
            }
        };
        constituents.reverse();

        if constituents.is_empty() {
            return Err(ParseError::MalformedTree(format!(
                "`{}` has no terminal and no children",
                head
            ))
            .into());
        }

        if constituents.len() == 1 {
            if let StackItem::Token(form) = &constituents[0] {
                let node = if head == EMPTY_MARKER {
                    Node::Empty(Terminal::new(head, *form))
                } else {
                    Node::Terminal(self.terminals.terminal(head, form))
                };
                arena.push(node);
                return Ok(NodeId::new(arena.len() - 1));
            }
        }

        let mut children = Vec::with_capacity(constituents.len());
        for item in constituents {
            match item {
                StackItem::Node(id) => children.push(id),
                StackItem::Token(token) => {
                    return Err(ParseError::MalformedTree(format!(
                        "stray token `{}` among the children of `{}`",
                        token, head
                    ))
                    .into());
                }
                // the pop loop stops at the first `(`
                StackItem::Open => unreachable!(),
            }
        }

        let (label, _anomaly) = Label::parse(head)?;
        let id = NodeId::new(arena.len());
        for (num, child) in children.iter().enumerate() {
            arena[child.index()].set_parent(id, num);
        }
        arena.push(Node::NonTerminal(NonTerminal::new(label, children)));
        Ok(id)
    }
}

// Split the line into `(`, `)` and whitespace-delimited tokens.
fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (idx, c) in line.char_indices() {
        if c == '(' || c == ')' || c.is_whitespace() {
            if let Some(from) = start.take() {
                tokens.push(&line[from..idx]);
            }
            if !c.is_whitespace() {
                tokens.push(&line[idx..=idx]);
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(from) = start {
        tokens.push(&line[from..]);
    }
    tokens
}
