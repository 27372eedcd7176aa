//! Snapshot tests of full token streams for representative inputs.

use ion_tokenizer::{TokenKind, Tokenizer};

#[derive(Debug, serde::Serialize)]
struct TokenView {
    kind: String,
    text: String,
}

fn token_stream(input: &str) -> Vec<TokenView> {
    let mut tokenizer = Tokenizer::new(input);
    let mut out = Vec::new();
    loop {
        let kind = tokenizer.lookahead(0).expect("lookahead should succeed");
        let text = tokenizer.value_as_string().unwrap_or_default();
        out.push(TokenView {
            kind: format!("{kind:?}"),
            text,
        });
        tokenizer.consume_token().expect("consume_token");
        if kind == TokenKind::Eof {
            break;
        }
    }
    out
}

#[test]
fn nested_struct_snapshot() {
    insta::assert_yaml_snapshot!(token_stream("{a:{b:1,c:2},d:false}"));
}

#[test]
fn sexp_with_annotation_snapshot() {
    insta::assert_yaml_snapshot!(token_stream("point::(1 2 3)"));
}

#[test]
fn mixed_string_kinds_snapshot() {
    insta::assert_yaml_snapshot!(token_stream("[\"hi\", \"hi\\u00FF\", '''long''']"));
}

#[test]
fn numeric_literal_forms_snapshot() {
    insta::assert_yaml_snapshot!(token_stream("123 -42 0x1F 1.5e10 -123d-1 2008-02-29T"));
}
