//! Tokens as seen by the tree runtime.
//!
//! A lexer hands tokens to the tree builder through the [`Token`] trait. Tokens that went
//! through a [`HiddenTokenFilter`] also carry the whitespace and comments skipped around
//! them, see [`HiddenStreamToken`].

mod hidden;
mod token;
mod token_type;

/// Tokens carrying the hidden runs around them.
pub use hidden::{HiddenRun, HiddenStreamToken, HiddenTokenFilter};
/// The token contract and the plain token implementation.
pub use token::{CommonToken, Token};
/// Integer token-kind tag.
pub use token_type::{ParseTokenTypeError, TokenType};
