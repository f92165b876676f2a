// ABOUTME: Structured-data query subsystem backing the jsonQuery function
// ABOUTME: Compiles JMESPath expressions and formats results as JSON or YAML

pub mod directive;
pub mod error;

pub use directive::{OutputFormat, QuerySpec};
pub use error::{QueryError, Result};

use jmespath::Variable;
use serde::Serialize;
use std::rc::Rc;

/// Evaluate a query directive against a raw JSON document and return the
/// formatted result. The expression is syntax-checked before the document
/// is deserialized, so a malformed query fails fast regardless of input.
pub fn run_query(document: &str, directive: &str) -> Result<String> {
    let spec = QuerySpec::parse(directive)?;

    let expression = jmespath::compile(&spec.expression).map_err(QueryError::SyntaxError)?;

    let data = Variable::from_json(document).map_err(QueryError::JsonError)?;

    let result = expression
        .search(Rc::new(data))
        .map_err(QueryError::EvalError)?;

    format_result(&result, &spec.format)
}

fn format_result(result: &Variable, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Compact => Ok(serde_json::to_string(result)?),
        OutputFormat::Indent(width) => {
            let indent = " ".repeat(*width);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut buf = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            result.serialize(&mut serializer)?;
            Ok(String::from_utf8(buf)?)
        }
        OutputFormat::Yaml => {
            // convert to JSON first, then transcode, matching the
            // compact/indent pipelines
            let json = serde_json::to_value(result)?;
            Ok(serde_yaml::to_string(&json)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_scalar() {
        assert_eq!(run_query("{\"a\":1}", "a").unwrap(), "1");
        assert_eq!(run_query("{\"a\":\"x\"}", "a").unwrap(), "\"x\"");
    }

    #[test]
    fn test_nested_field_access() {
        assert_eq!(run_query("{\"a\":{\"b\":2}}", "a.b").unwrap(), "2");
    }

    #[test]
    fn test_indented_object_output() {
        let result = run_query("{\"a\":{\"b\":2}}", "-i4 a").unwrap();
        assert_eq!(result, "{\n    \"b\": 2\n}");
    }

    #[test]
    fn test_yaml_output() {
        let result = run_query("{\"a\":{\"b\":2}}", "-y a").unwrap();
        assert_eq!(result, "b: 2\n");
    }

    #[test]
    fn test_projection() {
        let doc = "{\"servers\":[{\"name\":\"a\"},{\"name\":\"b\"}]}";
        let result = run_query(doc, "servers[*].name").unwrap();
        assert_eq!(result, "[\"a\",\"b\"]");
    }

    #[test]
    fn test_missing_field_is_null() {
        assert_eq!(run_query("{\"a\":1}", "b").unwrap(), "null");
    }

    #[test]
    fn test_compact_round_trips_as_json() {
        let doc = "{\"a\":[1,2,{\"b\":true}]}";
        let rendered = run_query(doc, "a").unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let original: serde_json::Value = serde_json::from_str(doc).unwrap();
        assert_eq!(reparsed, original["a"]);
    }

    #[test]
    fn test_malformed_json_input() {
        assert!(matches!(
            run_query("{not json", "a"),
            Err(QueryError::JsonError(_))
        ));
    }

    #[test]
    fn test_syntax_checked_before_deserialization() {
        // both the query and the document are malformed; the error must be
        // the syntax failure, proving the document was never touched
        assert!(matches!(
            run_query("{not json", "a.["),
            Err(QueryError::SyntaxError(_))
        ));
    }
}
