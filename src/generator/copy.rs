//! Copy generator: reuses a value produced earlier in the same record.

use super::{
    affix_text, build_optional, parse_options, value_to_text, BuildContext, GenerateContext,
    GeneratorKind, ValueGenerator,
};
use crate::error::Result;
use crate::path::FieldPath;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct CopyOptions {
    from: String,
    #[serde(default)]
    prefix: Option<Value>,
    #[serde(default)]
    suffix: Option<Value>,
}

/// Returns `prefix + record[from] + suffix` as a string.
///
/// `from` must name a leaf that comes earlier in template order; a leaf not
/// yet produced reads as empty.
#[derive(Debug)]
pub struct CopyGenerator {
    from: FieldPath,
    prefix: Option<Box<dyn ValueGenerator>>,
    suffix: Option<Box<dyn ValueGenerator>>,
}

impl CopyGenerator {
    pub fn from_spec(spec: &Value, ctx: &mut BuildContext<'_>) -> Result<Self> {
        let opts: CopyOptions = parse_options(GeneratorKind::Copy, spec)?;

        Ok(Self {
            from: FieldPath::parse(&opts.from),
            prefix: build_optional(opts.prefix.as_ref(), ctx)?,
            suffix: build_optional(opts.suffix.as_ref(), ctx)?,
        })
    }

    pub fn source(&self) -> &FieldPath {
        &self.from
    }
}

impl ValueGenerator for CopyGenerator {
    fn generate(&mut self, ctx: &mut GenerateContext<'_>) -> Result<Value> {
        let copied = self
            .from
            .get(ctx.record)
            .map(value_to_text)
            .unwrap_or_default();

        let prefix = affix_text(&mut self.prefix, ctx)?;
        let suffix = affix_text(&mut self.suffix, ctx)?;

        Ok(Value::String(format!("{}{}{}", prefix, copied, suffix)))
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Copy
    }
}
