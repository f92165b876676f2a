// ABOUTME: Parser for the jsonQuery inline flag directive mini-language
// ABOUTME: Splits "[-flag ]expression" into a query expression and output format

use super::error::{QueryError, Result};

/// How the query result is serialized back to text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Compact,
    Indent(usize),
    Yaml,
}

/// Parsed form of a `jsonQuery` directive, derived fresh per call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub expression: String,
    pub format: OutputFormat,
}

impl QuerySpec {
    /// Parse the combined flags-and-query string. If the directive begins
    /// with `-`, the first whitespace-delimited token is a flag word and
    /// the remainder after the first space is the expression; otherwise
    /// the whole directive is the expression with compact output.
    pub fn parse(directive: &str) -> Result<Self> {
        let (expression, format) = if let Some(rest) = directive.strip_prefix('-') {
            match rest.split_once(' ') {
                Some((flag, expression)) => (expression, flag_format(flag)),
                // a lone flag word leaves no expression to evaluate
                None => ("", OutputFormat::Compact),
            }
        } else {
            (directive, OutputFormat::Compact)
        };

        if expression.is_empty() {
            return Err(QueryError::EmptyExpression);
        }

        Ok(Self {
            expression: expression.to_string(),
            format,
        })
    }
}

/// Resolve the flag word. `i<N>` selects indented JSON with N spaces
/// (defaulting to 2 when N is absent or non-numeric), `y` selects YAML,
/// and anything else is consumed but ignored.
fn flag_format(flag: &str) -> OutputFormat {
    match flag.chars().next() {
        Some('i') => OutputFormat::Indent(flag[1..].parse().unwrap_or(2)),
        Some('y') => OutputFormat::Yaml,
        _ => OutputFormat::Compact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_expression() {
        let spec = QuerySpec::parse("a.b.c").unwrap();
        assert_eq!(spec.expression, "a.b.c");
        assert_eq!(spec.format, OutputFormat::Compact);
    }

    #[test]
    fn test_indent_flag() {
        let spec = QuerySpec::parse("-i4 a.b").unwrap();
        assert_eq!(spec.expression, "a.b");
        assert_eq!(spec.format, OutputFormat::Indent(4));
    }

    #[test]
    fn test_indent_flag_defaults_to_two() {
        let spec = QuerySpec::parse("-i a.b").unwrap();
        assert_eq!(spec.format, OutputFormat::Indent(2));

        let spec = QuerySpec::parse("-ix a.b").unwrap();
        assert_eq!(spec.format, OutputFormat::Indent(2));
    }

    #[test]
    fn test_yaml_flag() {
        let spec = QuerySpec::parse("-y services[0]").unwrap();
        assert_eq!(spec.expression, "services[0]");
        assert_eq!(spec.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_unrecognized_flag_is_ignored() {
        let spec = QuerySpec::parse("-z a.b").unwrap();
        assert_eq!(spec.expression, "a.b");
        assert_eq!(spec.format, OutputFormat::Compact);
    }

    #[test]
    fn test_only_first_space_splits() {
        let spec = QuerySpec::parse("-y a.b | [0]").unwrap();
        assert_eq!(spec.expression, "a.b | [0]");
        assert_eq!(spec.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_empty_expression_rejected() {
        assert!(matches!(
            QuerySpec::parse(""),
            Err(QueryError::EmptyExpression)
        ));
        assert!(matches!(
            QuerySpec::parse("-y"),
            Err(QueryError::EmptyExpression)
        ));
    }
}
