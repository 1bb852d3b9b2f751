//! Iteration over child lists and subtrees.

use crate::Ast;

impl Ast {
    /// The children of this node, left to right.
    pub fn children(&self) -> Siblings {
        Siblings { next: self.first_child() }
    }

    /// This node followed by its next siblings.
    pub fn siblings(&self) -> Siblings {
        Siblings { next: Some(self.clone()) }
    }

    /// Preorder traversal over this node and its descendants. Siblings of `self` are not
    /// visited.
    pub fn preorder(&self) -> Preorder {
        Preorder::new(self.clone())
    }
}

/// Iterator along a `next_sibling` chain.
#[derive(Clone, Debug)]
pub struct Siblings {
    next: Option<Ast>,
}

impl Iterator for Siblings {
    type Item = Ast;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next_sibling();
        Some(current)
    }
}

/// Preorder walk event.
#[derive(Clone, Debug)]
pub enum WalkEvent {
    Enter(Ast),
    Leave(Ast),
}

impl WalkEvent {
    pub fn node(&self) -> &Ast {
        match self {
            Self::Enter(node) | Self::Leave(node) => node,
        }
    }
}

/// Preorder traversal producing enter and leave events.
///
/// Keeps its own stack, so arbitrarily deep trees can be walked. The links are read
/// lazily: changing a subtree that has not been entered yet is reflected in the walk.
#[derive(Clone, Debug)]
pub struct Preorder {
    /// Entered nodes with the next child still to visit.
    stack: Vec<(Ast, Option<Ast>)>,
    root: Option<Ast>,
    /// Whether the last event was an `Enter`.
    entered: bool,
}

impl Preorder {
    fn new(root: Ast) -> Self {
        Self { stack: Vec::new(), root: Some(root), entered: false }
    }

    /// Skips the children of the node just entered. The next event is the `Leave` of that
    /// node. Does nothing unless the last event was an `Enter`.
    pub fn skip_subtree(&mut self) {
        if !self.entered {
            return;
        }
        if let Some((_, next_child)) = self.stack.last_mut() {
            *next_child = None;
        }
    }
}

impl Iterator for Preorder {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let Some((_, next_child)) = self.stack.last_mut() else {
            let root = self.root.take()?;
            self.stack.push((root.clone(), root.first_child()));
            self.entered = true;
            return Some(WalkEvent::Enter(root));
        };
        match next_child.take() {
            Some(child) => {
                *next_child = child.next_sibling();
                self.stack.push((child.clone(), child.first_child()));
                self.entered = true;
                Some(WalkEvent::Enter(child))
            }
            None => {
                let (exited, _) = self.stack.pop()?;
                self.entered = false;
                Some(WalkEvent::Leave(exited))
            }
        }
    }
}
