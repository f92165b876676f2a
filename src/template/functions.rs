// ABOUTME: Template function library registered as handlebars helpers
// ABOUTME: Implements exists, default, parseUrl, jsonQuery, loop and friends

use handlebars::{
    handlebars_helper, BlockContext, Context, Handlebars, Helper, HelperDef, HelperResult,
    JsonValue, Output, RenderContext, RenderError, Renderable, ScopedJson,
};
use serde_json::json;
use std::fs;
use std::io;
use url::Url;

use crate::query;

/// Register the full function library with a handlebars instance.
/// The registry is fixed for the lifetime of the engine.
pub fn register_functions(handlebars: &mut Handlebars) {
    handlebars.register_helper("contains", Box::new(contains));
    handlebars.register_helper("exists", Box::new(ExistsHelper));
    handlebars.register_helper("split", Box::new(split));
    handlebars.register_helper("replace", Box::new(replace));
    handlebars.register_helper("default", Box::new(DefaultHelper));
    handlebars.register_helper("parseUrl", Box::new(ParseUrlHelper));
    handlebars.register_helper("atoi", Box::new(AtoiHelper));
    handlebars.register_helper("add", Box::new(add));
    handlebars.register_helper("isTrue", Box::new(is_true));
    handlebars.register_helper("lower", Box::new(lower));
    handlebars.register_helper("upper", Box::new(upper));
    handlebars.register_helper("jsonQuery", Box::new(JsonQueryHelper));
    handlebars.register_helper("loop", Box::new(LoopHelper));
    handlebars.register_helper("trimSuffix", Box::new(trim_suffix));
}

handlebars_helper!(contains: |map: object, key: str| map.contains_key(key));

handlebars_helper!(split: |s: str, sep: str| {
    s.split(sep).map(|part| part.to_owned()).collect::<Vec<String>>()
});

handlebars_helper!(replace: |s: str, from: str, to: str, n: i64| {
    if n < 0 {
        s.replace(from, to)
    } else {
        s.replacen(from, to, n as usize)
    }
});

handlebars_helper!(add: |a: i64, b: i64| a + b);

handlebars_helper!(is_true: |s: str| parse_bool(&s.to_lowercase()).unwrap_or(false));

handlebars_helper!(lower: |s: str| s.to_lowercase());

handlebars_helper!(upper: |s: str| s.to_uppercase());

handlebars_helper!(trim_suffix: |s: str, suffix: str| {
    s.strip_suffix(suffix).unwrap_or(s).to_owned()
});

/// Boolean literals accepted by `isTrue`. Anything else is simply false.
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "true" | "yes" => Some(true),
        "0" | "f" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// `exists path` - true when the path can be stat'ed, false when it does
/// not exist. Any other filesystem error aborts the render.
pub struct ExistsHelper;

impl HelperDef for ExistsHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let path = h
            .param(0)
            .and_then(|v| v.value().as_str())
            .ok_or_else(|| RenderError::new("exists requires a path parameter"))?;

        let found = match fs::metadata(path) {
            Ok(_) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                return Err(RenderError::new(format!(
                    "exists: unable to stat {}: {}",
                    path, e
                )))
            }
        };

        Ok(ScopedJson::Derived(JsonValue::from(found)))
    }
}

/// `default value fallback` - the first non-nil argument, which must be a
/// string. Deliberately strict: malformed calls fail the render instead of
/// silently substituting an empty string.
pub struct DefaultHelper;

impl HelperDef for DefaultHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        if h.params().is_empty() {
            return Err(RenderError::new("default called with no values!"));
        }

        let first = h.param(0).map(|v| v.value()).unwrap_or(&JsonValue::Null);
        if !first.is_null() {
            let value = first.as_str().ok_or_else(|| {
                RenderError::new("default value is not a string. hint: surround it w/ double quotes.")
            })?;
            return Ok(ScopedJson::Derived(JsonValue::from(value)));
        }

        match h.param(1) {
            None => Err(RenderError::new("default called with no default value")),
            Some(param) => {
                let fallback = param.value();
                if fallback.is_null() {
                    return Err(RenderError::new("default called with nil default value!"));
                }
                let fallback = fallback.as_str().ok_or_else(|| {
                    RenderError::new(
                        "default is not a string value. hint: surround it w/ double quotes.",
                    )
                })?;
                Ok(ScopedJson::Derived(JsonValue::from(fallback)))
            }
        }
    }
}

/// `atoi s` - string to integer, render error on non-numeric input
pub struct AtoiHelper;

impl HelperDef for AtoiHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let s = h
            .param(0)
            .and_then(|v| v.value().as_str())
            .ok_or_else(|| RenderError::new("atoi requires a string parameter"))?;

        let n = s
            .parse::<i64>()
            .map_err(|_| RenderError::new(format!("atoi: invalid integer: {:?}", s)))?;

        Ok(ScopedJson::Derived(JsonValue::from(n)))
    }
}

/// `parseUrl raw` - parsed URL as an object with scheme, host, port, path,
/// query, fragment, username and password fields. An unparseable URL is a
/// render error and aborts the whole run.
pub struct ParseUrlHelper;

impl HelperDef for ParseUrlHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let raw = h
            .param(0)
            .and_then(|v| v.value().as_str())
            .ok_or_else(|| RenderError::new("parseUrl requires a url parameter"))?;

        let parsed = Url::parse(raw)
            .map_err(|e| RenderError::new(format!("unable to parse url {}: {}", raw, e)))?;

        let value = json!({
            "scheme": parsed.scheme(),
            "host": parsed.host_str().unwrap_or(""),
            "port": parsed.port(),
            "path": parsed.path(),
            "query": parsed.query().unwrap_or(""),
            "fragment": parsed.fragment().unwrap_or(""),
            "username": parsed.username(),
            "password": parsed.password().unwrap_or(""),
        });

        Ok(ScopedJson::Derived(value))
    }
}

/// `jsonQuery json directive` - evaluates the query subsystem and returns
/// the formatted result string. All query errors propagate to the render.
pub struct JsonQueryHelper;

impl HelperDef for JsonQueryHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let document = h
            .param(0)
            .and_then(|v| v.value().as_str())
            .ok_or_else(|| RenderError::new("jsonQuery requires a JSON document parameter"))?;

        let directive = h
            .param(1)
            .and_then(|v| v.value().as_str())
            .ok_or_else(|| RenderError::new("jsonQuery requires a query parameter"))?;

        let rendered = query::run_query(document, directive)
            .map_err(|e| RenderError::new(format!("jsonQuery: {}", e)))?;

        Ok(ScopedJson::Derived(JsonValue::from(rendered)))
    }
}

/// A lazy, finite integer range for the `loop` block helper. Each
/// invocation builds a fresh range; values are produced one at a time as
/// the block consumes them, and dropping the range mid-iteration releases
/// everything immediately.
#[derive(Debug)]
pub struct LoopRange {
    next: i64,
    stop: i64,
    step: i64,
}

impl LoopRange {
    pub fn new(start: i64, stop: i64, step: i64) -> Self {
        Self {
            next: start,
            stop,
            step,
        }
    }

    /// Build a range from 1-3 positional arguments:
    /// `(stop)`, `(start stop)` or `(start stop step)`
    pub fn from_args(args: &[i64]) -> Result<Self, RenderError> {
        let (start, stop, step) = match args {
            [stop] => (0, *stop, 1),
            [start, stop] => (*start, *stop, 1),
            [start, stop, step] => (*start, *stop, *step),
            _ => {
                return Err(RenderError::new(format!(
                    "wrong number of arguments, expected 1-3, but got {}",
                    args.len()
                )))
            }
        };

        if step <= 0 {
            return Err(RenderError::new("loop step must be a positive integer"));
        }

        Ok(Self::new(start, stop, step))
    }
}

impl Iterator for LoopRange {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.next >= self.stop {
            return None;
        }
        let value = self.next;
        self.next += self.step;
        Some(value)
    }
}

/// `{{#loop start stop step}}...{{/loop}}` - renders the block once per
/// value, with the current integer bound to `this`.
pub struct LoopHelper;

impl HelperDef for LoopHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let args = h
            .params()
            .iter()
            .map(|p| {
                p.value()
                    .as_i64()
                    .ok_or_else(|| RenderError::new("loop expects integer arguments"))
            })
            .collect::<Result<Vec<i64>, RenderError>>()?;

        let range = LoopRange::from_args(&args)?;

        let template = h
            .template()
            .ok_or_else(|| RenderError::new("loop is a block helper"))?;

        rc.push_block(BlockContext::new());
        for value in range {
            if let Some(block) = rc.block_mut() {
                block.set_base_value(JsonValue::from(value));
            }
            template.render(r, ctx, rc, out)?;
        }
        rc.pop_block();

        Ok(())
    }
}
