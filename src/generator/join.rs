//! Join generator: several element values concatenated into one string.

use super::{
    affix_text, build_generator, build_optional, parse_options, value_to_text, BuildContext,
    CountRange, GenerateContext, GeneratorKind, RangeOptions, ValueGenerator,
};
use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_COUNT: CountRange = CountRange::new(1, 5);

#[derive(Debug, Deserialize)]
struct JoinOptions {
    element: Value,
    #[serde(default)]
    count: Option<RangeOptions>,
    #[serde(default)]
    separator: String,
    #[serde(default)]
    prefix: Option<Value>,
    #[serde(default)]
    suffix: Option<Value>,
}

/// Draws a count from `count`, calls one owned element generator that many
/// times and joins the results with `separator` between `prefix` and
/// `suffix`. A consuming element (unique file, for instance) is drained
/// progressively across calls.
#[derive(Debug)]
pub struct JoinGenerator {
    element: Box<dyn ValueGenerator>,
    count: CountRange,
    separator: String,
    prefix: Option<Box<dyn ValueGenerator>>,
    suffix: Option<Box<dyn ValueGenerator>>,
}

impl JoinGenerator {
    pub fn from_spec(spec: &Value, ctx: &mut BuildContext<'_>) -> Result<Self> {
        let opts: JoinOptions = parse_options(GeneratorKind::Join, spec)?;

        Ok(Self {
            element: build_generator(&opts.element, ctx)?,
            count: CountRange::with_defaults(opts.count, DEFAULT_COUNT),
            separator: opts.separator,
            prefix: build_optional(opts.prefix.as_ref(), ctx)?,
            suffix: build_optional(opts.suffix.as_ref(), ctx)?,
        })
    }
}

impl ValueGenerator for JoinGenerator {
    fn generate(&mut self, ctx: &mut GenerateContext<'_>) -> Result<Value> {
        let count = self.count.sample_count(ctx.rng);

        let mut parts = Vec::with_capacity(count);
        for _ in 0..count {
            parts.push(value_to_text(&self.element.generate(ctx)?));
        }

        let prefix = affix_text(&mut self.prefix, ctx)?;
        let suffix = affix_text(&mut self.suffix, ctx)?;

        Ok(Value::String(format!(
            "{}{}{}",
            prefix,
            parts.join(&self.separator),
            suffix
        )))
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Join
    }
}
