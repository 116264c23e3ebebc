//! Cross-template reference generator.
//!
//! Samples uniformly from every value the producer template has emitted so
//! far at `property`. Construction registers the dependency, which is what
//! makes the producer track that path at all.

use super::{parse_options, BuildContext, GenerateContext, GeneratorKind, ValueGenerator};
use crate::error::{GeneratorError, Result};
use crate::path::FieldPath;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use serde_json::Value;

/// `other` wins when both producer keys are present
#[derive(Debug, Deserialize)]
struct ReferenceOptions {
    #[serde(default)]
    other: Option<String>,
    #[serde(default, rename = "otherGenerator")]
    other_generator: Option<String>,
    property: String,
}

#[derive(Debug, Clone)]
pub struct ReferenceGenerator {
    template: String,
    path: FieldPath,
}

impl ReferenceGenerator {
    pub fn new(template: &str, path: FieldPath, ctx: &mut BuildContext<'_>) -> Self {
        ctx.depend_on(template, &path);
        Self {
            template: template.to_string(),
            path,
        }
    }

    pub fn from_spec(spec: &Value, ctx: &mut BuildContext<'_>) -> Result<Self> {
        let opts: ReferenceOptions = parse_options(GeneratorKind::Reference, spec)?;
        let other = opts.other.or(opts.other_generator).ok_or_else(|| {
            GeneratorError::invalid_options(
                GeneratorKind::Reference.as_str(),
                "missing producer template `other`",
            )
        })?;
        Ok(Self::new(&other, FieldPath::parse(&opts.property), ctx))
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }
}

impl ValueGenerator for ReferenceGenerator {
    fn generate(&mut self, ctx: &mut GenerateContext<'_>) -> Result<Value> {
        let values = ctx.trackers.values(&self.template, &self.path);
        Ok(values.choose(&mut *ctx.rng).cloned().unwrap_or(Value::Null))
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Reference
    }
}
