//! Tokens that remember the hidden tokens around them.

use std::collections::HashSet;
use std::fmt;
use std::mem;
use std::rc::Rc;

use text_size::TextRange;

use crate::{CommonToken, Token, TokenType};

/// Hidden tokens the lexer skipped between two real tokens, in source order.
///
/// A run is stored once and shared: the real token before it sees it as `hidden_after`,
/// the real token after it as `hidden_before`. Only the run in front of the first real
/// token has no left neighbour; it is marked as leading.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HiddenRun {
    tokens: Box<[CommonToken]>,
    leading: bool,
}

impl HiddenRun {
    /// A run that follows some real token.
    pub fn new(tokens: impl Into<Box<[CommonToken]>>) -> Self {
        Self { tokens: tokens.into(), leading: false }
    }

    /// A run at the start of the input, before any real token.
    pub fn leading(tokens: impl Into<Box<[CommonToken]>>) -> Self {
        Self { tokens: tokens.into(), leading: true }
    }

    pub fn tokens(&self) -> &[CommonToken] {
        &self.tokens
    }

    pub fn is_leading(&self) -> bool {
        self.leading
    }

    /// The skipped text, concatenated.
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::text).collect()
    }
}

/// A real token from a hidden-token stream.
///
/// Links are set while the stream is produced, before the token is shared.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HiddenStreamToken {
    token: CommonToken,
    hidden_before: Option<Rc<HiddenRun>>,
    hidden_after: Option<Rc<HiddenRun>>,
}

impl HiddenStreamToken {
    pub fn new(ty: impl Into<TokenType>, text: impl Into<Box<str>>) -> Self {
        Self::from_token(CommonToken::new(ty, text))
    }

    pub fn from_token(token: CommonToken) -> Self {
        Self { token, hidden_before: None, hidden_after: None }
    }

    #[must_use]
    pub fn with_range(mut self, range: TextRange) -> Self {
        self.token = self.token.with_range(range);
        self
    }

    #[must_use]
    pub fn with_hidden_before(mut self, run: Option<Rc<HiddenRun>>) -> Self {
        self.hidden_before = run;
        self
    }

    #[must_use]
    pub fn with_hidden_after(mut self, run: Option<Rc<HiddenRun>>) -> Self {
        self.hidden_after = run;
        self
    }

    pub fn set_hidden_before(&mut self, run: Option<Rc<HiddenRun>>) {
        self.hidden_before = run;
    }

    pub fn set_hidden_after(&mut self, run: Option<Rc<HiddenRun>>) {
        self.hidden_after = run;
    }
}

impl Token for HiddenStreamToken {
    fn text(&self) -> &str {
        self.token.text()
    }

    fn ty(&self) -> TokenType {
        self.token.ty()
    }

    fn range(&self) -> TextRange {
        self.token.range()
    }

    fn supports_hidden_tokens(&self) -> bool {
        true
    }

    fn hidden_before(&self) -> Option<Rc<HiddenRun>> {
        self.hidden_before.clone()
    }

    fn hidden_after(&self) -> Option<Rc<HiddenRun>> {
        self.hidden_after.clone()
    }
}

impl fmt::Display for HiddenStreamToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.token, f)
    }
}

/// Splits a lexer's output into real tokens and the hidden runs between them.
///
/// Tokens of a hidden type are collected into the current run; a real token closes the
/// run and becomes its right neighbour. [`TokenType::SKIP`] tokens are dropped. Hidden
/// tokens after the last real token end up in its `hidden_after`, so lexers usually push
/// their `EOF` token last. Without any real token there is nothing to attach them to and
/// they are lost.
#[derive(Debug, Default)]
pub struct HiddenTokenFilter {
    hidden_types: HashSet<TokenType>,
    tokens: Vec<HiddenStreamToken>,
    pending: Vec<CommonToken>,
}

impl HiddenTokenFilter {
    pub fn new(hidden_types: impl IntoIterator<Item = TokenType>) -> Self {
        Self { hidden_types: hidden_types.into_iter().collect(), ..Self::default() }
    }

    pub fn is_hidden(&self, ty: TokenType) -> bool {
        self.hidden_types.contains(&ty)
    }

    pub fn push(&mut self, token: CommonToken) {
        if token.ty() == TokenType::SKIP {
            return;
        }
        if self.is_hidden(token.ty()) {
            self.pending.push(token);
            return;
        }
        let run = self.close_run();
        if let Some(previous) = self.tokens.last_mut() {
            previous.hidden_after.clone_from(&run);
        }
        self.tokens.push(HiddenStreamToken::from_token(token).with_hidden_before(run));
    }

    /// The real tokens in input order.
    pub fn finish(mut self) -> Vec<HiddenStreamToken> {
        let run = self.close_run();
        if let Some(last) = self.tokens.last_mut() {
            last.hidden_after = run;
        }
        self.tokens
    }

    fn close_run(&mut self) -> Option<Rc<HiddenRun>> {
        if self.pending.is_empty() {
            return None;
        }
        let tokens = mem::take(&mut self.pending);
        let run = if self.tokens.is_empty() {
            HiddenRun::leading(tokens)
        } else {
            HiddenRun::new(tokens)
        };
        Some(Rc::new(run))
    }
}
