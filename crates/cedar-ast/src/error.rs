use cedar_token::TokenType;
use thiserror::Error;

pub type AstResult<T> = Result<T, AstError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    /// A node that keeps hidden tokens was initialized from a token that has none to give.
    #[error("token `{text}` of type {ty} does not expose hidden-token links")]
    MissingHiddenTokens { ty: TokenType, text: String },

    #[error("unknown AST node kind `{0}`")]
    UnknownKind(String),
}
