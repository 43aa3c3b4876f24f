use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn paths_are_single_tokens() {
    assert_eq!(
        kinds("query.anim_time * 2"),
        vec![
            TokenKind::Path("query.anim_time".to_owned()),
            TokenKind::Star,
            TokenKind::Number(2.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn minus_is_never_part_of_a_number() {
    assert_eq!(
        kinds("-1.5"),
        vec![TokenKind::Minus, TokenKind::Number(1.5), TokenKind::Eof]
    );
}

#[test]
fn number_forms() {
    assert_eq!(kinds(".5")[0], TokenKind::Number(0.5));
    assert_eq!(kinds("3.")[0], TokenKind::Number(3.0));
    assert_eq!(kinds("42")[0], TokenKind::Number(42.0));
}

#[test]
fn two_char_operators_win() {
    assert_eq!(
        kinds("a<=b&&c!=d||e+=1"),
        vec![
            TokenKind::Ident("a".to_owned()),
            TokenKind::Le,
            TokenKind::Ident("b".to_owned()),
            TokenKind::AndAnd,
            TokenKind::Ident("c".to_owned()),
            TokenKind::Ne,
            TokenKind::Ident("d".to_owned()),
            TokenKind::OrOr,
            TokenKind::Ident("e".to_owned()),
            TokenKind::PlusAssign,
            TokenKind::Number(1.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn identifiers_keep_their_case() {
    assert_eq!(kinds("Query.Age")[0], TokenKind::Path("Query.Age".to_owned()));
}

#[test]
fn spans_cover_token_text() {
    let src = "  math.sin( 90 )";
    let toks = tokenize(src).unwrap();
    assert_eq!(toks[0].text(src), "math.sin");
    assert_eq!(toks[2].text(src), "90");
    let eof = toks.last().unwrap();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.span.start, src.len());
}

#[test]
fn rejects_unsupported_input() {
    let err = tokenize("1 & 2").unwrap_err();
    assert_eq!(err.offset, 2);
    assert!(err.message.contains("bitwise"));

    assert!(tokenize("'abc'").unwrap_err().message.contains("string"));
    assert!(tokenize("1 # 2").unwrap_err().message.contains("unexpected character"));
    assert!(tokenize("12abc").unwrap_err().message.contains("invalid character"));
}

#[test]
fn overflowing_literals_are_rejected() {
    let huge = format!("1{}", "0".repeat(60));
    assert!(tokenize(&huge).unwrap_err().message.contains("out of range"));
}

#[test]
fn empty_input_is_just_eof() {
    assert_eq!(kinds("   "), vec![TokenKind::Eof]);
}
