//! Mutable, shared AST nodes for generated parsers.
//!
//! Trees use the child-sibling encoding: every node points at its first child and at its
//! next sibling. Nodes are reference counted, so one node can sit in several trees at once
//! and is freed when the last handle goes away.
//!
//! Nodes come in two kinds. Common nodes carry a token type and text. Nodes with hidden
//! tokens additionally keep the whitespace and comments the lexer skipped around their
//! token, which is enough to print a node back the way it was written.

mod error;
mod factory;
mod matching;
mod node;
mod render;
mod walk;

pub use cedar_token::{Token, TokenType};

/// Errors raised while building nodes.
pub use error::{AstError, AstResult};
/// Variant-aware node construction and tree duplication.
pub use factory::AstFactory;
/// Pattern marker that matches any node.
pub use matching::WILDCARD;
/// The node handle and its variants.
pub use node::{Ast, AstKind};
/// Child, sibling and preorder iteration.
pub use walk::{Preorder, Siblings, WalkEvent};
