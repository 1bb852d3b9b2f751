//! The token contract consumed by tree construction.

use std::fmt;
use std::rc::Rc;

use text_size::{TextRange, TextSize};

use crate::{HiddenRun, TokenType};

/// A token handed from the lexer to the tree builder.
///
/// Only [`Token::text`] and [`Token::ty`] are required. Token streams that keep skipped
/// whitespace and comments around also answer the hidden-token accessors; everyone else
/// keeps the defaults, which report that no hidden links are available.
pub trait Token: fmt::Debug {
    /// The lexeme.
    fn text(&self) -> &str;

    fn ty(&self) -> TokenType;

    /// Source range of the lexeme, empty when the producer does not track positions.
    fn range(&self) -> TextRange {
        TextRange::empty(TextSize::new(0))
    }

    /// Whether this token exposes hidden-before/hidden-after links at all.
    ///
    /// A token with no hidden neighbours still supports them; it just answers `None`.
    fn supports_hidden_tokens(&self) -> bool {
        false
    }

    /// The hidden tokens skipped immediately before this one.
    fn hidden_before(&self) -> Option<Rc<HiddenRun>> {
        None
    }

    /// The hidden tokens skipped immediately after this one.
    fn hidden_after(&self) -> Option<Rc<HiddenRun>> {
        None
    }
}

/// Plain token: a type, its text and where it came from.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CommonToken {
    ty: TokenType,
    text: Box<str>,
    range: TextRange,
}

impl CommonToken {
    /// Creates a token without position information.
    pub fn new(ty: impl Into<TokenType>, text: impl Into<Box<str>>) -> Self {
        Self { ty: ty.into(), text: text.into(), range: TextRange::empty(TextSize::new(0)) }
    }

    #[must_use]
    pub fn with_range(mut self, range: TextRange) -> Self {
        self.range = range;
        self
    }

    pub fn set_text(&mut self, text: impl Into<Box<str>>) {
        self.text = text.into();
    }

    pub fn set_ty(&mut self, ty: TokenType) {
        self.ty = ty;
    }
}

impl Token for CommonToken {
    fn text(&self) -> &str {
        &self.text
    }

    fn ty(&self) -> TokenType {
        self.ty
    }

    fn range(&self) -> TextRange {
        self.range
    }
}

impl fmt::Display for CommonToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[\"{}\",<{}>]", self.text.escape_debug(), self.ty)
    }
}
