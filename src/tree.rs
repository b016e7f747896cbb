use std::ops::Index;

use failure::Error;

use crate::node::{Node, NodeId};
use crate::parse::TreeBuilder;
use crate::span::Span;

/// `Tree`
///
/// A phrase-structure tree parsed from its bracketed representation. Nodes
/// live in an arena owned by the tree and reference each other by [`NodeId`];
/// the leaf lists are computed eagerly on construction, in document order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    all_leaves: Vec<NodeId>,
    nonempty_leaves: Vec<NodeId>,
}

impl Tree {
    /// Parse a bracketed tree with default settings: spans assigned,
    /// terminals stored verbatim.
    ///
    /// Use [`TreeBuilder`] to suppress span assignment or to inject a
    /// terminal factory.
    pub fn parse(line: &str) -> Result<Tree, Error> {
        TreeBuilder::new().parse(line)
    }

    pub(crate) fn new(nodes: Vec<Node>, root: NodeId, assign_spans: bool) -> Self {
        let (all_leaves, nonempty_leaves) = collect_leaves(&nodes, root);
        let mut tree = Tree {
            nodes,
            root,
            all_leaves,
            nonempty_leaves,
        };
        if assign_spans {
            tree.assign_spans();
        }
        tree
    }

    /// Get the id of the root of the tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node.
    pub fn node(&self, node: NodeId) -> &Node {
        &self.nodes[node.index()]
    }

    /// Iterate over all nodes with their ids, in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId::new(idx), node))
    }

    /// All leaves, in document order.
    pub fn all_leaves(&self) -> &[NodeId] {
        &self.all_leaves
    }

    /// The overt leaves, in document order.
    pub fn nonempty_leaves(&self) -> &[NodeId] {
        &self.nonempty_leaves
    }

    /// Number of overt words covered by the tree.
    pub fn n_words(&self) -> usize {
        self.nonempty_leaves.len()
    }

    /// Get the parent of a node, or `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self[node].parent()
    }

    /// Get the children of a node, in surface order. Empty for leaves.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match &self[node] {
            Node::NonTerminal(nt) => nt.children(),
            Node::Terminal(_) | Node::Empty(_) => &[],
        }
    }

    /// Assign spans to every node.
    ///
    /// Word numbering starts at 1; 0 is reserved for the dummy-root
    /// convention of downstream tooling. An empty leaf takes the position of
    /// the next overt word without consuming it, so consecutive empty leaves
    /// end up with identical spans. That collapse is long-standing treebank
    /// behavior that consumers rely on; it is kept as is.
    fn assign_spans(&mut self) {
        let mut word = 1;
        for &id in &self.all_leaves {
            let span = match &self.nodes[id.index()] {
                Node::Terminal(_) => {
                    let span = Span::new(word, word + 1);
                    word += 1;
                    span
                }
                Node::Empty(_) => Span::new(word, word),
                // the leaf lists hold terminals only
                Node::NonTerminal(_) => unreachable!(),
            };
            self.nodes[id.index()].set_span(span);
        }
        self.assign_phrase_spans(self.root);
    }

    // Post-order pass: a nonterminal spans from its first child's start to
    // its last child's end.
    fn assign_phrase_spans(&mut self, id: NodeId) -> Span {
        let children = match &self.nodes[id.index()] {
            Node::NonTerminal(nt) => nt.children().to_vec(),
            Node::Terminal(_) | Node::Empty(_) => {
                // leaves received their spans in the word-numbering pass
                return self.nodes[id.index()].span().unwrap();
            }
        };
        let mut start = 0;
        let mut end = 0;
        for (num, &child) in children.iter().enumerate() {
            let span = self.assign_phrase_spans(child);
            if num == 0 {
                start = span.start();
            }
            end = span.end();
        }
        // children are never empty, the parser rejects childless brackets
        let span = Span::new(start, end);
        self.nodes[id.index()].set_span(span);
        span
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Node {
        &self.nodes[index.index()]
    }
}

// Depth-first pre-order collection of the leaf lists. The order is
// significant: it defines the word numbering used for span assignment.
fn collect_leaves(nodes: &[Node], root: NodeId) -> (Vec<NodeId>, Vec<NodeId>) {
    let mut all = Vec::new();
    let mut nonempty = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        match &nodes[id.index()] {
            Node::NonTerminal(nt) => {
                // push right-to-left so children come off in surface order
                stack.extend(nt.children().iter().rev().copied());
            }
            Node::Terminal(_) => {
                all.push(id);
                nonempty.push(id);
            }
            Node::Empty(_) => all.push(id),
        }
    }
    (all, nonempty)
}

#[cfg(test)]
mod tests {
    use crate::parse::TreeBuilder;
    use crate::tree::Tree;

    #[test]
    fn spans_for_overt_words() {
        let tree = Tree::parse("(IP-MAT (NP-SBJ (PRO$ his)) (VBD left))").unwrap();
        assert_eq!(tree[tree.root()].span().unwrap().bounds(), (1, 3));
        let np = tree.children(tree.root())[0];
        assert_eq!(tree[np].span().unwrap().bounds(), (1, 2));
        let vbd = tree.children(tree.root())[1];
        assert_eq!(tree[vbd].span().unwrap().bounds(), (2, 3));
    }

    #[test]
    fn empty_leaf_spans_are_zero_width() {
        let tree = Tree::parse("(NP-1 (-NONE- *))").unwrap();
        let leaf = tree.children(tree.root())[0];
        let span = tree[leaf].span().unwrap();
        assert_eq!(span.start(), span.end());
        assert!(tree[leaf].is_empty());
        assert_eq!(tree[tree.root()].span().unwrap().bounds(), (1, 1));
    }

    #[test]
    fn empty_leaf_takes_next_word_position() {
        let tree = Tree::parse("(IP (NP (-NONE- *exp*)) (VBD rained))").unwrap();
        let np = tree.children(tree.root())[0];
        let empty = tree.children(np)[0];
        assert_eq!(tree[empty].span().unwrap().bounds(), (1, 1));
        let vbd = tree.children(tree.root())[1];
        assert_eq!(tree[vbd].span().unwrap().bounds(), (1, 2));
        assert_eq!(tree[tree.root()].span().unwrap().bounds(), (1, 2));
    }

    #[test]
    fn consecutive_empty_leaves_collapse() {
        // known treebank quirk: two adjacent empty leaves share a position
        let tree = Tree::parse("(IP (NP (-NONE- *)) (NP (-NONE- *)) (VBD ran))").unwrap();
        let leaves = tree.all_leaves();
        assert_eq!(tree[leaves[0]].span(), tree[leaves[1]].span());
        assert_eq!(tree[leaves[0]].span().unwrap().bounds(), (1, 1));
    }

    #[test]
    fn span_contiguity() {
        let line = "(IP-MAT (NP-SBJ (D the) (N king)) (VBD sente) \
                    (NP-OB1 (-NONE- *ICH*-1)) (PP (P after) (NP (PRO hym))))";
        let tree = Tree::parse(line).unwrap();
        for (id, node) in tree.nodes() {
            let span = node.span().unwrap();
            if let Some(nt) = node.nonterminal() {
                let first = *nt.children().first().unwrap();
                let last = *nt.children().last().unwrap();
                assert_eq!(span.start(), tree[first].span().unwrap().start());
                assert_eq!(span.end(), tree[last].span().unwrap().end());
            } else if node.is_nonempty_leaf() {
                assert_eq!(span.len(), 1);
            } else {
                assert!(span.is_empty());
            }
            assert_eq!(tree[id].span().unwrap(), span);
        }
    }

    #[test]
    fn leaf_ordering_and_word_numbering() {
        let line = "(IP (NP (-NONE- *)) (VBD sang) (NP (D a) (N song)))";
        let tree = Tree::parse(line).unwrap();
        let forms = tree
            .all_leaves()
            .iter()
            .map(|&id| tree[id].terminal().unwrap().form())
            .collect::<Vec<_>>();
        assert_eq!(forms, vec!["*", "sang", "a", "song"]);

        // nonempty_leaves is the subsequence without empty categories,
        // numbered consecutively from 1
        let nonempty = tree.nonempty_leaves();
        assert_eq!(nonempty.len(), 3);
        for (num, &id) in nonempty.iter().enumerate() {
            assert_eq!(tree[id].span().unwrap().bounds(), (num + 1, num + 2));
        }
        assert_eq!(tree.n_words(), 3);
    }

    #[test]
    fn suppressed_spans_stay_unset() {
        let tree = TreeBuilder::new()
            .assign_spans(false)
            .parse("(IP (NP (D the) (N dog)) (VBD slept))")
            .unwrap();
        for (_, node) in tree.nodes() {
            assert_eq!(node.span(), None);
        }
        // leaf lists are computed regardless
        assert_eq!(tree.all_leaves().len(), 3);
    }

    #[test]
    fn parent_navigation() {
        let tree = Tree::parse("(IP (NP (D the) (N dog)) (VBD slept))").unwrap();
        let np = tree.children(tree.root())[0];
        let d = tree.children(np)[0];
        assert_eq!(tree.parent(d), Some(np));
        assert_eq!(tree.parent(np), Some(tree.root()));
        assert_eq!(tree.parent(tree.root()), None);
        assert!(tree.children(d).is_empty());
    }
}
