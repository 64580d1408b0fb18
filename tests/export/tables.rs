//! Tests for the shared table

use tokenset_core::{AttributeSpec, Container, TokenType, Value};
use tokenset_export::{Table, to_csv};

use crate::documented_tokens;

#[test]
fn table_follows_documentation_order() {
    let table = Table::collect(&documented_tokens(), None, None);
    assert_eq!(table.header, vec!["name", "stuff"]);
    assert_eq!(
        table.rows,
        vec![vec!["baz", ""], vec!["bar", "World"], vec!["foo", "Hello"]]
    );
}

#[test]
fn cells_render_values_and_blanks() {
    let ty = TokenType::define("tests::Mixed")
        .attribute("count", AttributeSpec::new())
        .attribute("later", AttributeSpec::new())
        .build();
    let tokens = Container::define("tests::Mixed")
        .token("a", ty.token().set("count", 3).request("later").build().unwrap())
        .token("b", ty.token().set("count", Value::Bool(true)).build().unwrap())
        .build()
        .unwrap();

    let table = Table::collect(&tokens, Some(&["name", "count", "later", "missing"]), None);
    assert_eq!(
        table.rows,
        vec![vec!["a", "3", "", ""], vec!["b", "true", "", ""]]
    );
}

#[test]
fn falsy_values_are_not_blank() {
    let ty = TokenType::define("tests::Falsy")
        .attribute("count", AttributeSpec::new())
        .attribute("flag", AttributeSpec::new())
        .build();
    let tokens = Container::define("tests::Falsy")
        .token("zero", ty.token().set("count", 0).set("flag", false).build().unwrap())
        .token("nil", ty.token().set("count", Value::Nil).set("flag", Value::Nil).build().unwrap())
        .build()
        .unwrap();

    let table = Table::collect(&tokens, Some(&["name", "count", "flag"]), None);
    assert_eq!(
        table.rows,
        vec![vec!["zero", "0", "false"], vec!["nil", "", ""]]
    );
}

#[test]
fn csv_quotes_awkward_cells() {
    let ty = TokenType::define("tests::Quoted")
        .attribute("text", AttributeSpec::new())
        .build();
    let tokens = Container::define("tests::Quoted")
        .token("plain", ty.token().set("text", "a,b").build().unwrap())
        .token("quote", ty.token().set("text", "say \"hi\"").build().unwrap())
        .build()
        .unwrap();

    assert_eq!(
        to_csv(&tokens, Some(&["name", "text"]), None),
        "name,text\r\nplain,\"a,b\"\r\nquote,\"say \"\"hi\"\"\"\r\n"
    );
}
