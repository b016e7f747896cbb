//! Parsing for Penn-Treebank-style bracketed phrase-structure trees.
//!
//! The bracketed format supported here includes the extensions found in
//! historical treebanks: empty categories (`-NONE-` leaves), function tags
//! (`NP-SBJ`), and trace/gap coindexation (`NP-1`, `IP-MAT=2`).
//!
//! ```
//! use phrasetree::Tree;
//!
//! let tree = Tree::parse("(IP-MAT (NP-SBJ (PRO$ his)) (VBD left))").unwrap();
//! assert_eq!(tree.n_words(), 2);
//! assert_eq!(tree.to_string(), "(IP-MAT (NP-SBJ (PRO$ his)) (VBD left))");
//! ```

#[macro_use]
extern crate failure;

#[macro_use]
extern crate pest_derive;

mod error;
pub use crate::error::ParseError;

mod label;
pub use crate::label::{Label, LabelAnomaly};

mod node;
pub use crate::node::{Node, NodeId, NonTerminal, Terminal};

mod parse;
pub use crate::parse::{TerminalFactory, TreeBuilder, VerbatimTerminals, EMPTY_MARKER};

mod span;
pub use crate::span::Span;

mod tree;
pub use crate::tree::Tree;

mod write;
