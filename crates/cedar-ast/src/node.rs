//! The node handle, its payload and the tree-building API.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use cedar_token::{HiddenRun, Token, TokenType};
use tracing::debug;

use crate::{AstError, AstResult};

/// Which node variant to construct.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum AstKind {
    /// Token type and text only.
    #[default]
    Common,
    /// Also keeps the hidden tokens around the originating token.
    WithHiddenTokens,
}

impl AstKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::WithHiddenTokens => "with-hidden-tokens",
        }
    }
}

impl fmt::Display for AstKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AstKind {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Self::Common),
            "with-hidden-tokens" => Ok(Self::WithHiddenTokens),
            _ => Err(AstError::UnknownKind(s.to_owned())),
        }
    }
}

/// Shared handle to a tree node.
///
/// Cloning the handle does not copy the node: both handles see the same text, type and
/// links. Linking one node under two parents therefore puts one physical subtree into
/// both trees, and a later mutation through either parent shows up in the other. Use
/// [`Ast::dup_tree`] when the trees must stay independent.
///
/// Handles are `!Send`; a tree belongs to the thread that built it.
#[derive(Clone)]
pub struct Ast(Rc<RefCell<AstData>>);

pub(crate) struct AstData {
    pub(crate) ty: TokenType,
    pub(crate) text: String,
    pub(crate) first_child: Option<Ast>,
    pub(crate) next_sibling: Option<Ast>,
    pub(crate) payload: Payload,
}

#[derive(Clone)]
pub(crate) enum Payload {
    Common,
    WithHiddenTokens(HiddenTokens),
}

/// Hidden runs captured from the originating token.
#[derive(Clone, Default)]
pub(crate) struct HiddenTokens {
    pub(crate) before: Option<Rc<HiddenRun>>,
    pub(crate) after: Option<Rc<HiddenRun>>,
}

impl Payload {
    fn empty(kind: AstKind) -> Self {
        match kind {
            AstKind::Common => Self::Common,
            AstKind::WithHiddenTokens => Self::WithHiddenTokens(HiddenTokens::default()),
        }
    }

    fn kind(&self) -> AstKind {
        match self {
            Self::Common => AstKind::Common,
            Self::WithHiddenTokens(_) => AstKind::WithHiddenTokens,
        }
    }
}

impl Ast {
    /// Creates a detached node of `kind` with [`TokenType::INVALID`] and empty text.
    pub fn new(kind: AstKind) -> Self {
        Self(Rc::new(RefCell::new(AstData {
            ty: TokenType::INVALID,
            text: String::new(),
            first_child: None,
            next_sibling: None,
            payload: Payload::empty(kind),
        })))
    }

    pub fn kind(&self) -> AstKind {
        self.0.borrow().payload.kind()
    }

    /// Creates a fresh, empty node of the same variant as `self`.
    pub fn factory(&self) -> Self {
        Self::new(self.kind())
    }

    /// Copies type and text from `token`. Nodes with hidden tokens also capture the token's
    /// hidden-before and hidden-after links.
    ///
    /// A node with hidden tokens rejects tokens that do not support hidden links and is
    /// left untouched in that case.
    pub fn initialize(&self, token: &dyn Token) -> AstResult<()> {
        let mut data = self.0.borrow_mut();
        if let Payload::WithHiddenTokens(hidden) = &mut data.payload {
            if !token.supports_hidden_tokens() {
                debug!(ty = %token.ty(), text = token.text(), "token without hidden-token links");
                return Err(AstError::MissingHiddenTokens {
                    ty: token.ty(),
                    text: token.text().to_owned(),
                });
            }
            hidden.before = token.hidden_before();
            hidden.after = token.hidden_after();
        }
        data.ty = token.ty();
        token.text().clone_into(&mut data.text);
        Ok(())
    }

    /// Sets type and text directly, without a token.
    pub fn initialize_with(&self, ty: TokenType, text: impl Into<String>) {
        let mut data = self.0.borrow_mut();
        data.ty = ty;
        data.text = text.into();
    }

    /// The token text of this node.
    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.0.borrow_mut().text = text.into();
    }

    /// The token type of this node.
    pub fn ty(&self) -> TokenType {
        self.0.borrow().ty
    }

    pub fn set_type(&self, ty: TokenType) {
        self.0.borrow_mut().ty = ty;
    }

    /// The leftmost child, `None` for a leaf.
    pub fn first_child(&self) -> Option<Self> {
        self.0.borrow().first_child.clone()
    }

    /// Replaces the whole child list with `child` and whatever siblings it already has.
    pub fn set_first_child(&self, child: impl Into<Option<Self>>) {
        self.0.borrow_mut().first_child = child.into();
    }

    /// The node to the right of this one.
    pub fn next_sibling(&self) -> Option<Self> {
        self.0.borrow().next_sibling.clone()
    }

    pub fn set_next_sibling(&self, sibling: impl Into<Option<Self>>) {
        self.0.borrow_mut().next_sibling = sibling.into();
    }

    /// Appends `child` after the current last child.
    ///
    /// `child` is linked, not copied, together with any siblings it already has. `None`
    /// leaves the tree unchanged.
    pub fn add_child(&self, child: impl Into<Option<Self>>) {
        let Some(child) = child.into() else { return };
        let Some(first) = self.first_child() else {
            self.set_first_child(child);
            return;
        };
        let mut last = first;
        while let Some(next) = last.next_sibling() {
            last = next;
        }
        last.set_next_sibling(child);
    }

    /// Drops the link to the children. The children themselves live on as long as
    /// something else refers to them.
    pub fn remove_children(&self) {
        self.0.borrow_mut().first_child = None;
    }

    pub fn number_of_children(&self) -> usize {
        self.children().count()
    }

    /// The hidden run right before this node's token. Always `None` for common nodes.
    pub fn hidden_before(&self) -> Option<Rc<HiddenRun>> {
        match &self.0.borrow().payload {
            Payload::WithHiddenTokens(hidden) => hidden.before.clone(),
            Payload::Common => None,
        }
    }

    /// The hidden run right after this node's token. Always `None` for common nodes.
    pub fn hidden_after(&self) -> Option<Rc<HiddenRun>> {
        match &self.0.borrow().payload {
            Payload::WithHiddenTokens(hidden) => hidden.after.clone(),
            Payload::Common => None,
        }
    }

    /// Returns `true` if both handles point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Copies variant, type, text and hidden tokens into a new unlinked node.
    pub(crate) fn shallow_copy(&self) -> Self {
        let data = self.0.borrow();
        Self(Rc::new(RefCell::new(AstData {
            ty: data.ty,
            text: data.text.clone(),
            first_child: None,
            next_sibling: None,
            payload: data.payload.clone(),
        })))
    }

    pub(crate) fn data(&self) -> Ref<'_, AstData> {
        self.0.borrow()
    }
}

impl Drop for AstData {
    // Unlinks iteratively so long sibling chains and deep trees don't overflow the stack.
    fn drop(&mut self) {
        let mut pending: Vec<Ast> = Vec::new();
        pending.extend(self.first_child.take());
        pending.extend(self.next_sibling.take());
        while let Some(Ast(node)) = pending.pop() {
            if let Ok(cell) = Rc::try_unwrap(node) {
                let mut data = cell.into_inner();
                pending.extend(data.first_child.take());
                pending.extend(data.next_sibling.take());
            }
        }
    }
}

impl fmt::Debug for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Ast")
            .field("kind", &data.payload.kind())
            .field("ty", &data.ty)
            .field("text", &data.text)
            .finish_non_exhaustive()
    }
}

/// Writes the node's own text.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.borrow().text)
    }
}
