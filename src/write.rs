use std::fmt;

use crate::node::{Node, NodeId};
use crate::tree::Tree;

impl Tree {
    /// Canonical bracketed rendering of the subtree rooted at `node`.
    ///
    /// Nonterminal labels are reassembled from their decomposed parts, which
    /// normalizes anomalous trace/gap ordering to the canonical `=gap-trace`
    /// suffix order. Reparsing the output yields a structurally identical
    /// tree.
    pub fn subtree_to_string(&self, node: NodeId) -> String {
        let mut out = String::new();
        format_node(self, node, &mut out);
        out
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.subtree_to_string(self.root()))
    }
}

fn format_node(tree: &Tree, id: NodeId, out: &mut String) {
    match &tree[id] {
        Node::Terminal(t) | Node::Empty(t) => {
            out.push('(');
            out.push_str(t.pos());
            out.push(' ');
            out.push_str(t.form());
            out.push(')');
        }
        Node::NonTerminal(nt) => {
            out.push('(');
            out.push_str(&nt.label().to_string());
            for &child in nt.children() {
                out.push(' ');
                format_node(tree, child, out);
            }
            out.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::Tree;

    #[test]
    fn round_trip() {
        let line = "(IP-MAT (NP-SBJ (PRO$ his)) (VBD left) (. .))";
        let tree = Tree::parse(line).unwrap();
        assert_eq!(tree.to_string(), line);
    }

    #[test]
    fn round_trip_normalizes_whitespace() {
        let tree = Tree::parse("( IP-MAT  (NP (D the)\t(N dog))  )").unwrap();
        assert_eq!(tree.to_string(), "(IP-MAT (NP (D the) (N dog)))");
    }

    #[test]
    fn indices_serialize_in_canonical_order() {
        let tree = Tree::parse("(IP-MAT-1=2 (NP (-NONE- *)) (VBD ran))").unwrap();
        assert_eq!(tree.to_string(), "(IP-MAT=2-1 (NP (-NONE- *)) (VBD ran))");
        // anomalous input ends up in the same canonical rendering
        let tree = Tree::parse("(IP-MAT=2-1 (NP (-NONE- *)) (VBD ran))").unwrap();
        assert_eq!(tree.to_string(), "(IP-MAT=2-1 (NP (-NONE- *)) (VBD ran))");
    }

    #[test]
    fn subtree_rendering() {
        let tree = Tree::parse("(IP (NP (D the) (N dog)) (VBD slept))").unwrap();
        let np = tree.children(tree.root())[0];
        assert_eq!(tree.subtree_to_string(np), "(NP (D the) (N dog))");
        let d = tree.children(np)[0];
        assert_eq!(tree.subtree_to_string(d), "(D the)");
    }

    #[test]
    fn reparse_yields_identical_structure() {
        let line = "(IP-MAT (NP-SBJ-1 (-NONE- *T*)) (VBD wende) \
                    (PP (P to) (NP (NPR Rome))))";
        let tree = Tree::parse(line).unwrap();
        let reparsed = Tree::parse(&tree.to_string()).unwrap();
        assert_eq!(tree, reparsed);
    }
}
