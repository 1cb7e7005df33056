//! Literal scenarios for the public operations
//!
//! Each case pins one observable behavior: comment collapsing, canonical spacing, hint
//! removal, statement splitting and lexer failure classification.

use rstest::rstest;
use sql_unlex::{
    first_non_hint_token, separate_statements, simple_skip_hints, simple_strip_comments,
    strip_comments, Error, TokenKind,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[rstest]
#[case::no_comments("SELECT 1", "SELECT 1")]
#[case::trailing_line_comment("SELECT 1 // comment", "SELECT 1 ")]
#[case::line_comment_with_newline("SELECT 1// comment \n+ 2", "SELECT 1\n+ 2")]
#[case::empty_block_comment("SELECT 1/**/+ 2", "SELECT 1 + 2")]
#[case::block_comment_with_newline("SELECT 1/*\n*/+ 2", "SELECT 1\n+ 2")]
#[case::hash_comment("SELECT 1 # c\nFROM t", "SELECT 1 \nFROM t")]
#[case::leading_comment("-- header\nSELECT 1", "SELECT 1")]
#[case::whitespace_kept("SELECT\n    a,\n    b\nFROM t", "SELECT\n    a,\n    b\nFROM t")]
#[case::multiple_statements(
    "SELECT 1; -- one\nSELECT 2 /* two */;",
    "SELECT 1; \nSELECT 2 ;"
)]
fn test_strip_comments(#[case] input: &str, #[case] expected: &str) {
    init_logging();
    assert_eq!(strip_comments("", input).unwrap(), expected);
}

#[rstest]
#[case::hint_removed("@{OPTIMIZER_VERSION=7}SELECT 1/*\n*/+ 2", "SELECT 1 + 2")]
#[case::table_hint(
    "SELECT * FROM t @{FORCE_INDEX=idx} WHERE a = @p",
    "SELECT * FROM t WHERE a = @p"
)]
#[case::join_hint(
    "SELECT * FROM a JOIN @{JOIN_METHOD=HASH_JOIN} b ON a.x = b.x",
    "SELECT * FROM a JOIN b ON a.x = b.x"
)]
#[case::no_hint("SELECT  1", "SELECT 1")]
fn test_simple_skip_hints(#[case] input: &str, #[case] expected: &str) {
    init_logging();
    assert_eq!(simple_skip_hints("", input).unwrap(), expected);
}

#[test]
fn test_canonical_forms() {
    let canonical = |source: &str| simple_strip_comments("", source).unwrap();

    insta::assert_snapshot!(
        canonical("@{ OPTIMIZER_VERSION = 7 }  SELECT  * FROM  t@{ FORCE_INDEX = i }"),
        @"@{OPTIMIZER_VERSION=7} SELECT * FROM t@{FORCE_INDEX=i}"
    );
    insta::assert_snapshot!(
        canonical("SELECT CAST ( x AS ARRAY < STRUCT < a INT64 > > ) , - 1"),
        @"SELECT CAST(x AS ARRAY<STRUCT<a INT64> >), -1"
    );
    insta::assert_snapshot!(
        canonical("SELECT ARRAY(SELECT 1), ( - 2 ), arr [ OFFSET ( 0 ) ] FROM UNNEST ( x )"),
        @"SELECT ARRAY(SELECT 1), (-2), arr[OFFSET (0)] FROM UNNEST(x)"
    );
    insta::assert_snapshot!(
        canonical("CREATE INDEX idx ON t ( a ) STORING ( b )"),
        @"CREATE INDEX idx ON t (a) STORING (b)"
    );
}

#[test]
fn test_canonical_multiple_statements() {
    let out = simple_strip_comments("", "SELECT 1 ;  -- first\n\n  SELECT 2 ;").unwrap();
    insta::assert_snapshot!(out, @r###"
    SELECT 1;
    SELECT 2;
    "###);
}

#[test]
fn test_separate_single_statement() {
    let statements = separate_statements("", "SELECT 1").unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].statement, "SELECT 1");
    assert_eq!(statements[0].terminator, "");
    assert_eq!((statements[0].pos, statements[0].end), (0, 8));
}

#[test]
fn test_separate_keeps_comments() {
    let statements =
        separate_statements("", "SELECT 1; /* two */ SELECT 2;\n-- three\nSELECT 3").unwrap();
    let texts: Vec<_> = statements
        .iter()
        .map(|s| (s.statement.as_str(), s.terminator.as_str()))
        .collect();
    insta::assert_debug_snapshot!(texts, @r###"
    [
        (
            "SELECT 1",
            ";",
        ),
        (
            "/* two */ SELECT 2",
            ";",
        ),
        (
            "-- three\nSELECT 3",
            "",
        ),
    ]
    "###);
}

#[test]
fn test_separate_unterminated_string() {
    init_logging();
    let err = separate_statements("", "SELECT \"123").unwrap_err();
    assert_eq!(err.statements.len(), 1);
    assert_eq!(err.statements[0].statement, "SELECT \"123");
    assert_eq!(err.statements[0].end, 11);
    assert!(matches!(err.error, Error::Lexer(_)));
    assert_eq!(err.error.waiting(), None);
}

#[test]
fn test_separate_error_keeps_comments_before_failure() {
    let err = separate_statements("", "SELECT 1;\n-- note\n'abc").unwrap_err();
    assert_eq!(err.statements.len(), 2);
    assert_eq!(err.statements[1].statement, "-- note\n'abc");
    assert_eq!(err.statements[1].pos, 10);
}

#[rstest]
#[case::triple_double("SELECT \"\"\"123", "\"\"\"")]
#[case::triple_single("SELECT '''123", "'''")]
#[case::raw_triple("SELECT r\"\"\"abc", "\"\"\"")]
#[case::bytes_triple("SELECT b'''abc", "'''")]
#[case::block_comment("SELECT 1 /* open", "*/")]
fn test_separate_waiting(#[case] input: &str, #[case] waiting: &str) {
    let err = separate_statements("", input).unwrap_err();
    assert_eq!(err.error.waiting(), Some(waiting));
    assert_eq!(
        err.error.to_string(),
        format!("lexer error with waiting: {}", waiting)
    );
    assert_eq!(err.statements.last().unwrap().end, input.len());
}

#[test]
fn test_stripped_statement_copy() {
    let statements = separate_statements("", "SELECT 1 -- one\n+ 2;").unwrap();
    let stripped = statements[0].strip_comments().unwrap();
    assert_eq!(stripped.statement, "SELECT 1 \n+ 2");
    assert_eq!(stripped.terminator, ";");
}

#[test]
fn test_first_non_hint_token() {
    let tok = first_non_hint_token("", "@{OPTIMIZER_VERSION=7} SELECT 1").unwrap();
    assert_eq!(tok.kind, TokenKind::Keyword);
    assert_eq!(tok.raw, "SELECT");
    assert_eq!(tok.pos, 23);

    let tok = first_non_hint_token("", "GRAPH FinGraph MATCH (n) RETURN n").unwrap();
    assert_eq!(tok.kind, TokenKind::Ident);
    assert_eq!(tok.raw, "GRAPH");
}

#[test]
fn test_first_non_hint_token_unclosed_hint() {
    let err = first_non_hint_token("query.sql", "@{OPTIMIZER_VERSION=7 SELECT 1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "can't get first token at query.sql:1:1: unclosed hint at query.sql:1:1"
    );
}
