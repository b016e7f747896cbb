use std::fmt;

use crate::label::Label;
use crate::span::Span;

/// Index of a node in a [`Tree`](crate::Tree)'s arena.
///
/// Nodes reference each other through `NodeId`s rather than owning pointers;
/// the tree's arena is the sole owner of every node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Enum representing nodes in a phrase-structure tree.
///
/// The variant set is closed: a node is a phrasal nonterminal, an overt
/// terminal, or an empty-category terminal. The two terminal variants carry
/// the same payload and differ only in span-width semantics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// Phrasal node with a decomposed label and at least one child.
    NonTerminal(NonTerminal),
    /// Overt terminal covering exactly one word position.
    Terminal(Terminal),
    /// Empty-category terminal covering no word positions.
    Empty(Terminal),
}

impl Node {
    /// Returns whether `self` is a nonterminal.
    pub fn is_nonterminal(&self) -> bool {
        match self {
            Node::NonTerminal(_) => true,
            Node::Terminal(_) | Node::Empty(_) => false,
        }
    }

    /// Returns whether `self` is an overt terminal.
    pub fn is_nonempty_leaf(&self) -> bool {
        match self {
            Node::Terminal(_) => true,
            Node::NonTerminal(_) | Node::Empty(_) => false,
        }
    }

    /// Returns whether `self` is an empty-category terminal.
    pub fn is_empty_leaf(&self) -> bool {
        match self {
            Node::Empty(_) => true,
            Node::NonTerminal(_) | Node::Terminal(_) => false,
        }
    }

    /// Returns whether the node covers no overt material.
    ///
    /// Based on the assigned span; before span assignment only empty-category
    /// leaves report `true`.
    pub fn is_empty(&self) -> bool {
        match self.span() {
            Some(span) => span.is_empty(),
            None => self.is_empty_leaf(),
        }
    }

    /// Get an `Option<&Terminal>`.
    ///
    /// Returns `None` if `self` is a `Node::NonTerminal`.
    pub fn terminal(&self) -> Option<&Terminal> {
        match self {
            Node::Terminal(ref terminal) | Node::Empty(ref terminal) => Some(terminal),
            Node::NonTerminal(_) => None,
        }
    }

    /// Get an `Option<&NonTerminal>`.
    ///
    /// Returns `None` if `self` is a terminal variant.
    pub fn nonterminal(&self) -> Option<&NonTerminal> {
        match self {
            Node::NonTerminal(ref inner) => Some(inner),
            Node::Terminal(_) | Node::Empty(_) => None,
        }
    }

    /// Get a node's span, or `None` before span assignment.
    pub fn span(&self) -> Option<Span> {
        match self {
            Node::NonTerminal(nt) => nt.span,
            Node::Terminal(t) | Node::Empty(t) => t.span,
        }
    }

    /// Arena index of the owning nonterminal, or `None` at the root.
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::NonTerminal(nt) => nt.parent,
            Node::Terminal(t) | Node::Empty(t) => t.parent,
        }
    }

    /// Position among the parent's children, or `None` at the root.
    pub fn child_index(&self) -> Option<usize> {
        match self {
            Node::NonTerminal(nt) => nt.child_index,
            Node::Terminal(t) | Node::Empty(t) => t.child_index,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId, child_index: usize) {
        match self {
            Node::NonTerminal(nt) => {
                nt.parent = Some(parent);
                nt.child_index = Some(child_index);
            }
            Node::Terminal(t) | Node::Empty(t) => {
                t.parent = Some(parent);
                t.child_index = Some(child_index);
            }
        }
    }

    pub(crate) fn set_span(&mut self, span: Span) {
        match self {
            Node::NonTerminal(nt) => nt.span = Some(span),
            Node::Terminal(t) | Node::Empty(t) => t.span = Some(span),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::NonTerminal(nt) => write!(f, "{}", nt.label()),
            Node::Terminal(t) | Node::Empty(t) => write!(f, "{} {}", t.pos, t.form),
        }
    }
}

/// Struct representing a phrasal tree node.
///
/// `NonTerminal`s are defined by their decomposed [`Label`] and an ordered,
/// non-empty list of children.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NonTerminal {
    label: Label,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    child_index: Option<usize>,
    span: Option<Span>,
}

impl NonTerminal {
    pub(crate) fn new(label: Label, children: Vec<NodeId>) -> Self {
        NonTerminal {
            label,
            children,
            parent: None,
            child_index: None,
            span: None,
        }
    }

    /// The decomposed nonterminal label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Arena indices of the children, in surface order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Struct representing a terminal.
///
/// Used for both overt and empty-category leaves; the enclosing [`Node`]
/// variant carries the distinction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Terminal {
    pos: String,
    form: String,
    parent: Option<NodeId>,
    child_index: Option<usize>,
    span: Option<Span>,
}

impl Terminal {
    /// Construct a terminal from a part-of-speech tag and a surface form.
    pub fn new(pos: impl Into<String>, form: impl Into<String>) -> Self {
        Terminal {
            pos: pos.into(),
            form: form.into(),
            parent: None,
            child_index: None,
            span: None,
        }
    }

    /// Part-of-speech tag, stored verbatim.
    pub fn pos(&self) -> &str {
        self.pos.as_str()
    }

    /// Surface form. For empty categories this is the trace string, e.g. `*`
    /// or `*T*-1`.
    pub fn form(&self) -> &str {
        self.form.as_str()
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.pos, self.form)
    }
}

#[cfg(test)]
mod tests {
    use crate::label::Label;
    use crate::node::{Node, NodeId, NonTerminal, Terminal};

    #[test]
    fn terminal_variants() {
        let overt = Node::Terminal(Terminal::new("VBD", "left"));
        assert!(overt.is_nonempty_leaf());
        assert!(!overt.is_empty_leaf());
        assert!(!overt.is_nonterminal());
        assert!(!overt.is_empty());
        assert_eq!(overt.terminal().unwrap().pos(), "VBD");
        assert_eq!(overt.terminal().unwrap().form(), "left");
        assert!(overt.nonterminal().is_none());
        assert_eq!(overt.to_string(), "VBD left");

        let empty = Node::Empty(Terminal::new("-NONE-", "*T*-1"));
        assert!(empty.is_empty_leaf());
        assert!(!empty.is_nonempty_leaf());
        assert!(empty.is_empty());
        assert_eq!(empty.terminal().unwrap().form(), "*T*-1");
    }

    #[test]
    fn nonterminal_node() {
        let (label, _) = Label::parse("NP-SBJ").unwrap();
        let nt = Node::NonTerminal(NonTerminal::new(label, vec![NodeId::new(0)]));
        assert!(nt.is_nonterminal());
        assert!(nt.terminal().is_none());
        assert_eq!(nt.nonterminal().unwrap().label().bare(), "NP");
        assert_eq!(nt.nonterminal().unwrap().children(), &[NodeId::new(0)]);
        assert_eq!(nt.parent(), None);
        assert_eq!(nt.child_index(), None);
        assert_eq!(nt.span(), None);
        assert_eq!(nt.to_string(), "NP-SBJ");
    }
}
