//! Node construction for a configured variant, tree assembly and duplication.

use cedar_token::{Token, TokenType};
use tracing::{debug, trace};

use crate::{Ast, AstKind, AstResult};

/// Creates nodes of one [`AstKind`].
///
/// Generated parsers hold one factory and never name the node variant themselves; the
/// host application decides which variant the factory produces.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AstFactory {
    kind: AstKind,
}

impl AstFactory {
    pub fn new(kind: AstKind) -> Self {
        debug!(%kind, "AST factory configured");
        Self { kind }
    }

    pub const fn kind(&self) -> AstKind {
        self.kind
    }

    /// A new, empty node.
    pub fn create(&self) -> Ast {
        Ast::new(self.kind)
    }

    /// A new node initialized from `token`.
    pub fn create_from_token(&self, token: &dyn Token) -> AstResult<Ast> {
        let node = self.create();
        node.initialize(token)?;
        Ok(node)
    }

    /// A new node with the given type and text.
    pub fn create_with(&self, ty: TokenType, text: impl Into<String>) -> Ast {
        let node = self.create();
        node.initialize_with(ty, text);
        node
    }

    /// Builds a tree from a flat list: the first element is the root and the others become
    /// its children, in order. Absent elements are skipped.
    ///
    /// The root's previous children are discarded. Without a root, the first present
    /// element is returned with the remaining ones linked as its siblings.
    pub fn make(nodes: &[Option<Ast>]) -> Option<Ast> {
        let (root, rest) = nodes.split_first()?;
        let mut root = root.clone();
        if let Some(root) = &root {
            root.remove_children();
        }

        let mut tail: Option<Ast> = None;
        for node in rest.iter().flatten() {
            if let Some(tail) = &tail {
                tail.set_next_sibling(node.clone());
            } else if let Some(root) = &root {
                root.set_first_child(node.clone());
            } else {
                root = Some(node.clone());
            }
            // `node` may already carry siblings of its own.
            tail = node.siblings().last();
        }
        root
    }
}

impl Ast {
    /// Copies this node alone, keeping its variant, type, text and hidden tokens. The copy
    /// has no children and no siblings.
    pub fn dup(&self) -> Self {
        self.shallow_copy()
    }

    /// Deep copy of this node, its next siblings and all their descendants.
    pub fn dup_list(&self) -> Self {
        deep_copy(self, true)
    }

    /// Deep copy of this node and its descendants. Siblings are not copied.
    pub fn dup_tree(&self) -> Self {
        deep_copy(self, false)
    }
}

/// Copies without recursion; each work item is an original node paired with its copy
/// whose links still have to be filled in.
fn deep_copy(start: &Ast, with_siblings: bool) -> Ast {
    let root = start.shallow_copy();
    let mut pending = vec![(start.clone(), root.clone(), with_siblings)];
    while let Some((original, copy, with_siblings)) = pending.pop() {
        if let Some(child) = original.first_child() {
            let child_copy = child.shallow_copy();
            copy.set_first_child(child_copy.clone());
            pending.push((child, child_copy, true));
        }
        if !with_siblings {
            continue;
        }
        if let Some(next) = original.next_sibling() {
            let next_copy = next.shallow_copy();
            copy.set_next_sibling(next_copy.clone());
            pending.push((next, next_copy, true));
        }
    }
    trace!(root = %root, with_siblings, "duplicated tree");
    root
}
