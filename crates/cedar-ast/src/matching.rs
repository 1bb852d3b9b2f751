//! Structural comparison and pattern search.
//!
//! The `_partial` operations treat their argument as a pattern: a pattern list may be
//! shorter than the list it is compared against, and a pattern node of type [`WILDCARD`]
//! matches any node.

use cedar_token::TokenType;
use tracing::trace;

use crate::{Ast, WalkEvent};

/// Pattern node type that matches any node in partial comparisons.
pub const WILDCARD: TokenType = TokenType::INVALID;

#[derive(Clone, Copy, Debug)]
enum MatchMode {
    Exact,
    Partial,
}

impl Ast {
    /// Same type and same text. Children and siblings are not looked at.
    pub fn equals<'a>(&self, other: impl Into<Option<&'a Self>>) -> bool {
        let Some(other) = other.into() else { return false };
        if self.ptr_eq(other) {
            return true;
        }
        let (this, other) = (self.data(), other.data());
        this.ty == other.ty && this.text == other.text
    }

    /// Compares the sibling chains starting at `self` and `other` node by node. Both chains
    /// must have the same length. Children are not compared.
    pub fn equals_list<'a>(&self, other: impl Into<Option<&'a Self>>) -> bool {
        let mut this = Some(self.clone());
        let mut other = other.into().cloned();
        loop {
            match (this, other) {
                (Some(a), Some(b)) => {
                    if !a.equals(&b) {
                        return false;
                    }
                    this = a.next_sibling();
                    other = b.next_sibling();
                }
                (None, None) => return true,
                (Some(_), None) | (None, Some(_)) => return false,
            }
        }
    }

    /// Like [`Ast::equals_list`], but `pattern` only has to match a prefix of the chain and
    /// may contain wildcards. An absent pattern matches anything.
    pub fn equals_list_partial<'a>(&self, pattern: impl Into<Option<&'a Self>>) -> bool {
        let mut this = Some(self.clone());
        let mut pattern = pattern.into().cloned();
        loop {
            match (this, pattern) {
                (Some(a), Some(p)) => {
                    if !a.matches_pattern_node(&p) {
                        return false;
                    }
                    this = a.next_sibling();
                    pattern = p.next_sibling();
                }
                (_, None) => return true,
                (None, Some(_)) => return false,
            }
        }
    }

    /// Same shape, and the same type and text at every node. Siblings of `self` and
    /// `other` are not part of the comparison.
    pub fn equals_tree<'a>(&self, other: impl Into<Option<&'a Self>>) -> bool {
        let Some(other) = other.into() else { return false };
        compare_trees(self, other, MatchMode::Exact)
    }

    /// Matches `pattern` against the tree rooted at `self`. At every level the pattern's
    /// child list may stop early and wildcard nodes match anything, but every pattern node
    /// needs a counterpart. An absent pattern matches anything.
    pub fn equals_tree_partial<'a>(&self, pattern: impl Into<Option<&'a Self>>) -> bool {
        let Some(pattern) = pattern.into() else { return true };
        compare_trees(self, pattern, MatchMode::Partial)
    }

    /// Every node whose tree [`Ast::equals_tree`] `target`, in preorder.
    ///
    /// The search covers `self`, the siblings following it and all their descendants.
    /// Nodes inside a match are searched as well, so matches may nest.
    pub fn find_all<'a>(&self, target: impl Into<Option<&'a Self>>) -> Vec<Self> {
        match target.into() {
            Some(target) => self.do_work_for_find_all(target, MatchMode::Exact),
            None => Vec::new(),
        }
    }

    /// Every node whose tree [`Ast::equals_tree_partial`] `pattern`, in preorder.
    pub fn find_all_partial<'a>(&self, pattern: impl Into<Option<&'a Self>>) -> Vec<Self> {
        match pattern.into() {
            Some(pattern) => self.do_work_for_find_all(pattern, MatchMode::Partial),
            None => Vec::new(),
        }
    }

    fn do_work_for_find_all(&self, target: &Self, mode: MatchMode) -> Vec<Self> {
        let mut found = Vec::new();
        for start in self.siblings() {
            for event in start.preorder() {
                let WalkEvent::Enter(node) = event else { continue };
                if compare_trees(&node, target, mode) {
                    trace!(?mode, ty = %node.ty(), text = %node, "match");
                    found.push(node);
                }
            }
        }
        found
    }

    fn matches_pattern_node(&self, pattern: &Self) -> bool {
        pattern.ty() == WILDCARD || self.equals(pattern)
    }
}

/// Walks both trees with an explicit stack so the depth of the tree does not matter.
fn compare_trees(this: &Ast, other: &Ast, mode: MatchMode) -> bool {
    let mut pending = vec![(this.clone(), other.clone())];
    while let Some((a, b)) = pending.pop() {
        let same_node = match mode {
            MatchMode::Exact => a.equals(&b),
            MatchMode::Partial => a.matches_pattern_node(&b),
        };
        if !same_node {
            return false;
        }

        let mut a_child = a.first_child();
        let mut b_child = b.first_child();
        loop {
            match (a_child, b_child) {
                (Some(x), Some(y)) => {
                    a_child = x.next_sibling();
                    b_child = y.next_sibling();
                    pending.push((x, y));
                }
                (None, None) => break,
                // The pattern ran out first.
                (Some(_), None) if matches!(mode, MatchMode::Partial) => break,
                (Some(_), None) | (None, Some(_)) => return false,
            }
        }
    }
    true
}
