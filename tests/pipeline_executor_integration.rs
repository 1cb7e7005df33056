//! Integration tests for PipelineExecutor
//!
//! These tests validate that the config-based executor:
//! 1. Agrees with the plain processor functions on a realistic script
//! 2. All default configs work without errors
//! 3. Configs loaded from JSON run like the built-in ones

use sql_unlex::sql::lexing::{Lexer, TokenSource};
use sql_unlex::sql::pipeline::{
    ConfigRegistry, ExecutionOutput, PipelineExecutor, ProcessError, StripHints, TokenStream,
};
use sql_unlex::sql::processor::{simple_skip_hints_with, strip_comments_with};
use sql_unlex::{separate_statements, simple_skip_hints, simple_strip_comments, strip_comments};

const SCRIPT: &str = "\
-- Schema for the singers demo
CREATE TABLE Singers (
  SingerId INT64 NOT NULL, /* primary */
  Tags ARRAY<STRING(MAX)>,
) PRIMARY KEY (SingerId);

@{OPTIMIZER_VERSION=7}
SELECT s.SingerId, ARRAY_LENGTH(s.Tags) AS n  # count
FROM Singers@{FORCE_INDEX=SingersByName} AS s
WHERE s.SingerId > -1;
";

fn text(output: ExecutionOutput<'_>) -> String {
    match output {
        ExecutionOutput::Text { text } => text,
        other => panic!("Expected text output, got {:?}", other),
    }
}

#[test]
fn test_text_configs_match_processor() {
    let executor = PipelineExecutor::new();

    assert_eq!(
        text(executor.execute("strip-comments", "demo.sql", SCRIPT).unwrap()),
        strip_comments("demo.sql", SCRIPT).unwrap()
    );
    assert_eq!(
        text(executor.execute("simple-strip-comments", "demo.sql", SCRIPT).unwrap()),
        simple_strip_comments("demo.sql", SCRIPT).unwrap()
    );
    assert_eq!(
        text(executor.execute("simple-skip-hints", "demo.sql", SCRIPT).unwrap()),
        simple_skip_hints("demo.sql", SCRIPT).unwrap()
    );
}

#[test]
fn test_skip_hints_on_script() {
    let out = simple_skip_hints("demo.sql", SCRIPT).unwrap();
    insta::assert_snapshot!(out, @r###"
    CREATE TABLE Singers (SingerId INT64 NOT NULL, Tags ARRAY<STRING(MAX)>,) PRIMARY KEY (SingerId);
    SELECT s.SingerId, ARRAY_LENGTH(s.Tags) AS n FROM Singers AS s WHERE s.SingerId > - 1;
    "###);
}

#[test]
fn test_statements_config_on_script() {
    let executor = PipelineExecutor::new();
    let output = executor
        .execute("separate-statements", "demo.sql", SCRIPT)
        .unwrap();

    match output {
        ExecutionOutput::Statements { statements, error } => {
            assert!(error.is_none());
            assert_eq!(statements, separate_statements("demo.sql", SCRIPT).unwrap());
            assert_eq!(statements.len(), 2);
            assert!(statements[0].statement.starts_with("-- Schema"));
            assert!(statements[1].statement.starts_with("@{OPTIMIZER_VERSION=7}"));
        }
        other => panic!("Expected statements output, got {:?}", other),
    }
}

#[test]
fn test_all_default_configs_run() {
    let executor = PipelineExecutor::new();
    for config in executor.list_configs() {
        let result = executor.execute(&config.name, "demo.sql", SCRIPT);
        assert!(result.is_ok(), "config {} failed: {:?}", config.name, result);

        let json = executor.execute_and_serialize(&config.name, "demo.sql", SCRIPT);
        assert!(json.is_ok(), "config {} did not serialize", config.name);
    }
}

#[test]
fn test_loaded_configs() {
    let mut registry = ConfigRegistry::new();
    registry
        .load_json(
            r#"[{"name": "split-no-hints", "filter": "strip-hints",
                 "target": {"kind": "statements"}}]"#,
        )
        .unwrap();
    let executor = PipelineExecutor::with_registry(registry);

    match executor.execute("split-no-hints", "", "@{A=1} SELECT 1; SELECT 2").unwrap() {
        ExecutionOutput::Statements { statements, .. } => {
            assert_eq!(statements[0].statement, "SELECT 1");
            assert_eq!(statements[0].pos, 7);
        }
        other => panic!("Expected statements output, got {:?}", other),
    }

    assert!(matches!(
        executor.execute("strip-comments", "", "SELECT 1"),
        Err(ProcessError::ConfigNotFound(_))
    ));
}

#[test]
fn test_stages_compose_over_any_source() {
    let lexer: Box<dyn TokenSource<'_>> = Box::new(Lexer::new("boxed.sql", "SELECT 1 /* c */"));
    assert_eq!(strip_comments_with(lexer).unwrap(), "SELECT 1 ");

    let lexer: Box<dyn TokenSource<'_>> = Box::new(Lexer::new("boxed.sql", "@{A=1} SELECT 1"));
    assert_eq!(simple_skip_hints_with(lexer).unwrap(), "SELECT 1");

    let raws: Vec<_> = StripHints::new(TokenStream::new(Lexer::new("", "a @{B=2} b")))
        .map(|tok| tok.unwrap().raw)
        .collect();
    assert_eq!(raws, vec!["a", "b", ""]);
}
