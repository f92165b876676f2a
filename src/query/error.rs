// ABOUTME: Error types for the jsonQuery subsystem
// ABOUTME: Distinguishes syntax, data, evaluation and serialization failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("empty query expression")]
    EmptyExpression,

    #[error("invalid query syntax: {0}")]
    SyntaxError(jmespath::JmespathError),

    #[error("invalid JSON input: {0}")]
    JsonError(String),

    #[error("query evaluation failed: {0}")]
    EvalError(jmespath::JmespathError),

    #[error("failed to serialize query result: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("failed to render YAML output: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("query output was not valid UTF-8: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, QueryError>;
