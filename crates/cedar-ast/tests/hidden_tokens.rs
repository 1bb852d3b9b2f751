use std::rc::Rc;

use cedar_ast::{Ast, AstError, AstFactory, AstKind, Token, TokenType};
use cedar_token::{CommonToken, HiddenStreamToken, HiddenTokenFilter};
use expect_test::expect;

const WS: TokenType = TokenType::new(4);
const COMMENT: TokenType = TokenType::new(5);
const IDENT: TokenType = TokenType::new(6);
const ASSIGN: TokenType = TokenType::new(7);

const SOURCE: &str = "/* top */ x /* lhs */ = y\n";

/// Splits `SOURCE` the way a lexer would: runs of spaces, comments, identifiers and `=`.
fn lex(source: &str) -> Vec<HiddenStreamToken> {
    let mut filter = HiddenTokenFilter::new([WS, COMMENT]);
    let mut rest = source;
    while !rest.is_empty() {
        let (ty, len) = if rest.starts_with("/*") {
            (COMMENT, rest.find("*/").map_or(rest.len(), |end| end + 2))
        } else if rest.starts_with(char::is_whitespace) {
            (WS, rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len()))
        } else if rest.starts_with('=') {
            (ASSIGN, 1)
        } else {
            (IDENT, rest.find(|c: char| !c.is_alphanumeric()).unwrap_or(rest.len()).max(1))
        };
        let (text, tail) = rest.split_at(len);
        filter.push(CommonToken::new(ty, text));
        rest = tail;
    }
    filter.push(CommonToken::new(TokenType::EOF, ""));
    filter.finish()
}

fn hidden_factory() -> AstFactory {
    AstFactory::new(AstKind::WithHiddenTokens)
}

fn nodes(tokens: &[HiddenStreamToken]) -> Vec<Ast> {
    let factory = hidden_factory();
    tokens.iter().map(|token| factory.create_from_token(token).unwrap()).collect()
}

#[test]
fn initialize_captures_hidden_links() {
    let tokens = lex(SOURCE);
    let [_, assign, ..] = tokens.as_slice() else { panic!("{tokens:?}") };
    let node = hidden_factory().create_from_token(assign).unwrap();

    assert_eq!(node.kind(), AstKind::WithHiddenTokens);
    assert_eq!(node.ty(), ASSIGN);
    assert_eq!(node.text(), "=");

    let before = node.hidden_before().unwrap();
    assert!(Rc::ptr_eq(&before, &tokens[0].hidden_after().unwrap()));
    let after = node.hidden_after().unwrap();
    assert!(Rc::ptr_eq(&after, &tokens[2].hidden_before().unwrap()));
}

#[test]
fn hidden_links_survive_tree_mutation() {
    let nodes = nodes(&lex(SOURCE));
    let [lhs, root, rhs, _eof] = nodes.as_slice() else { panic!("{nodes:?}") };

    let before = root.hidden_before();
    let after = root.hidden_after();

    root.add_child(lhs.clone());
    root.add_child(rhs.clone());
    root.set_text(":=");
    root.remove_children();
    root.set_next_sibling(lhs.clone());

    assert!(Rc::ptr_eq(&root.hidden_before().unwrap(), &before.unwrap()));
    assert!(Rc::ptr_eq(&root.hidden_after().unwrap(), &after.unwrap()));
}

#[test]
fn source_text_is_recovered() {
    let nodes = nodes(&lex(SOURCE));

    let rendered: Vec<_> = nodes.iter().map(Ast::to_source_string).collect();
    expect![[r#"["/* top */ x /* lhs */ ", "= ", "y\n", ""]"#]]
        .assert_eq(&format!("{rendered:?}"));
    assert_eq!(rendered.concat(), SOURCE);
}

#[test]
fn neighbours_share_one_run() {
    let nodes = nodes(&lex("x /* c */ y"));
    let [x, y, _eof] = nodes.as_slice() else { panic!("{nodes:?}") };

    assert!(Rc::ptr_eq(&x.hidden_after().unwrap(), &y.hidden_before().unwrap()));
    assert_eq!(x.hidden_after().unwrap().text(), " /* c */ ");
    assert_eq!(x.to_source_string() + &y.to_source_string(), "x /* c */ y");
}

#[test]
fn long_runs_are_dropped_with_the_node() {
    let source = format!("a{}b", " /* */".repeat(50_000));
    let tokens = lex(&source);
    let node = hidden_factory().create_from_token(&tokens[0]).unwrap();
    assert_eq!(node.hidden_after().unwrap().tokens().len(), 100_000);

    drop(tokens);
    drop(node);
}

#[test]
fn common_tokens_are_rejected_by_hidden_nodes() {
    let token = CommonToken::new(IDENT, "x");
    let node = Ast::new(AstKind::WithHiddenTokens);
    node.set_text("before");

    let err = node.initialize(&token).unwrap_err();
    assert_eq!(err, AstError::MissingHiddenTokens { ty: IDENT, text: "x".to_owned() });
    expect![["token `x` of type 6 does not expose hidden-token links"]]
        .assert_eq(&err.to_string());
    // Rejected tokens leave the node untouched.
    assert_eq!(node.text(), "before");
    assert_eq!(node.ty(), TokenType::INVALID);

    assert!(hidden_factory().create_from_token(&token).is_err());
}

#[test]
fn common_nodes_accept_any_token_and_drop_hidden_links() {
    let tokens = lex(SOURCE);
    let factory = AstFactory::new(AstKind::Common);

    let node = factory.create_from_token(&tokens[1]).unwrap();
    assert_eq!(node.text(), "=");
    assert!(node.hidden_before().is_none());
    assert!(node.hidden_after().is_none());
    assert_eq!(node.to_source_string(), "=");

    let plain = factory.create_from_token(&CommonToken::new(IDENT, "z")).unwrap();
    assert_eq!(plain.to_string_tree(), "z");
}

#[test]
fn hidden_variant_survives_factory_and_dup() {
    let tokens = lex(SOURCE);
    let node = hidden_factory().create_from_token(&tokens[0]).unwrap();

    assert_eq!(node.factory().kind(), AstKind::WithHiddenTokens);

    let copy = node.dup();
    assert_eq!(copy.kind(), AstKind::WithHiddenTokens);
    assert!(Rc::ptr_eq(&copy.hidden_after().unwrap(), &node.hidden_after().unwrap()));
    assert_eq!(copy.to_source_string(), node.to_source_string());
}

#[test]
fn hidden_nodes_compare_like_common_ones() {
    let tokens = lex(SOURCE);
    let with_hidden = hidden_factory().create_from_token(&tokens[0]).unwrap();
    let common = AstFactory::new(AstKind::Common).create_from_token(&tokens[0]).unwrap();

    assert!(with_hidden.equals(&common));
    assert!(with_hidden.equals_tree(&common));
}
