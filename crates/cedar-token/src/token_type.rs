use std::fmt;
use std::str::FromStr;

/// Integer token-kind tag assigned by the grammar.
///
/// The values below [`TokenType::MIN_USER`] are reserved by the runtime; grammars number
/// their own token kinds from there on.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TokenType(pub i32);

impl TokenType {
    /// Tokens the lexer discards without passing them on.
    pub const SKIP: Self = Self(-1);
    /// No meaningful kind. Default for freshly constructed nodes.
    pub const INVALID: Self = Self(0);
    pub const EOF: Self = Self(1);
    pub const NULL_TREE_LOOKAHEAD: Self = Self(3);
    /// First kind available to grammars.
    pub const MIN_USER: Self = Self(4);

    #[inline]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns `true` for kinds below [`TokenType::MIN_USER`].
    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0 < Self::MIN_USER.0
    }

    /// Name of a reserved kind, if this is one.
    pub const fn reserved_name(self) -> Option<&'static str> {
        match self.0 {
            -1 => Some("SKIP"),
            0 => Some("INVALID"),
            1 => Some("EOF"),
            3 => Some("NULL_TREE_LOOKAHEAD"),
            _ => None,
        }
    }
}

impl From<i32> for TokenType {
    #[inline]
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl From<TokenType> for i32 {
    #[inline]
    fn from(ty: TokenType) -> Self {
        ty.0
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reserved_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Error returned when a string names neither a reserved kind nor an integer.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid token type `{input}`")]
pub struct ParseTokenTypeError {
    input: String,
}

impl FromStr for TokenType {
    type Err = ParseTokenTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "SKIP" => Ok(Self::SKIP),
            "INVALID" => Ok(Self::INVALID),
            "EOF" => Ok(Self::EOF),
            "NULL_TREE_LOOKAHEAD" => Ok(Self::NULL_TREE_LOOKAHEAD),
            _ => trimmed
                .parse::<i32>()
                .map(Self)
                .map_err(|_parse_err| ParseTokenTypeError { input: s.to_owned() }),
        }
    }
}
