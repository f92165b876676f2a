// ABOUTME: Template engine implementation wrapping Handlebars
// ABOUTME: Compiles template sources with the function library and configured delimiters

use handlebars::Handlebars;
use std::borrow::Cow;

use super::context::EnvContext;
use super::error::{Result, TemplateError};
use super::functions;
use crate::generate::Delimiters;

// Stand-in for native `{{` sequences while a custom delimiter pair is
// active. Control characters survive rendering untouched, so literal
// braces in the template body round-trip through the engine.
const BRACE_MARKER: &str = "\u{1}[\u{1}";

pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    delimiters: Option<Delimiters>,
}

impl TemplateEngine {
    /// Create a new engine with the full function library registered and
    /// the default `{{` / `}}` delimiter pair.
    pub fn new() -> Self {
        Self::with_delimiters(None)
    }

    /// Create an engine that accepts a custom delimiter pair. Delimiters
    /// apply identically to every template compiled by this engine.
    pub fn with_delimiters(delimiters: Option<Delimiters>) -> Self {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(false);

        // Output is configuration text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        functions::register_functions(&mut handlebars);

        Self {
            handlebars,
            delimiters,
        }
    }

    /// Render a template source against the given environment context
    pub fn render(&self, source: &str, context: &EnvContext) -> Result<String> {
        let json_context = context.to_json()?;
        let source = self.normalize_delimiters(source);

        let rendered = self
            .handlebars
            .render_template(&source, &json_context)
            .map_err(TemplateError::RenderError)?;

        Ok(self.restore_braces(rendered))
    }

    /// Validate template syntax without rendering
    pub fn validate(&self, source: &str) -> Result<()> {
        let source = self.normalize_delimiters(source);
        match handlebars::Template::compile(&source) {
            Ok(_) => Ok(()),
            Err(e) => Err(TemplateError::SyntaxError(e.to_string())),
        }
    }

    /// Rewrite a custom delimiter pair to the engine's native one. With a
    /// custom pair active, native `{{` sequences are plain text: they are
    /// swapped for a marker before the rewrite and restored after
    /// rendering, so only the configured markers are ever parsed.
    fn normalize_delimiters<'a>(&self, source: &'a str) -> Cow<'a, str> {
        match &self.delimiters {
            None => Cow::Borrowed(source),
            Some(delims) if delims.is_default() => Cow::Borrowed(source),
            Some(delims) => {
                // a custom pair containing the native marker cannot be
                // disambiguated from literal braces; rewrite it as-is
                let protect = !delims.left.contains("{{") && !delims.right.contains("{{");
                let source = if protect {
                    source.replace("{{", BRACE_MARKER)
                } else {
                    source.to_owned()
                };
                Cow::Owned(source.replace(&delims.left, "{{").replace(&delims.right, "}}"))
            }
        }
    }

    fn restore_braces(&self, rendered: String) -> String {
        match &self.delimiters {
            Some(delims) if !delims.is_default() => rendered.replace(BRACE_MARKER, "{{"),
            _ => rendered,
        }
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn context_with(vars: &[(&str, &str)]) -> EnvContext {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvContext::from_vars(map)
    }

    #[test]
    fn test_basic_env_rendering() {
        let engine = TemplateEngine::new();
        let context = context_with(&[("NAME", "world")]);

        let result = engine.render("Hello {{Env.NAME}}!", &context).unwrap();
        assert_eq!(result, "Hello world!");
    }

    #[test]
    fn test_functions_are_registered() {
        let engine = TemplateEngine::new();
        let context = context_with(&[("PORT", "8080")]);

        let result = engine
            .render("port={{add (atoi Env.PORT) 1}}", &context)
            .unwrap();
        assert_eq!(result, "port=8081");
    }

    #[test]
    fn test_custom_delimiters() {
        let delims = Delimiters::new("[[", "]]");
        let engine = TemplateEngine::with_delimiters(Some(delims));
        let context = context_with(&[("NAME", "world")]);

        let result = engine
            .render("Hello [[Env.NAME]]!", &context)
            .unwrap();
        assert_eq!(result, "Hello world!");

        let result = engine
            .render("[[#if (isTrue \"yes\")]]on[[/if]]", &context)
            .unwrap();
        assert_eq!(result, "on");
    }

    #[test]
    fn test_custom_delimiters_leave_native_braces_as_text() {
        let delims = Delimiters::new("<%", "%>");
        let engine = TemplateEngine::with_delimiters(Some(delims));
        let context = context_with(&[]);

        // with a custom pair active, `{{`/`}}` are plain template text
        let result = engine
            .render("left=<%add 1 1%> raw={{upper \"x\"}}", &context)
            .unwrap();
        assert_eq!(result, "left=2 raw={{upper \"x\"}}");

        // a dangling `{{` with no closing pair is also just text
        let result = engine.render("open {{ brace", &context).unwrap();
        assert_eq!(result, "open {{ brace");
    }

    #[test]
    fn test_validate_catches_syntax_errors() {
        let engine = TemplateEngine::new();

        assert!(engine.validate("Hello {{Env.NAME}}").is_ok());
        assert!(engine.validate("Hello {{Env.NAME").is_err());
    }

    #[test]
    fn test_render_error_on_bad_function_call() {
        let engine = TemplateEngine::new();
        let context = context_with(&[]);

        let result = engine.render("{{default}}", &context);
        assert!(result.is_err());
    }
}
