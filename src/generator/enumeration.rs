//! Uniform choice from a fixed list of values.

use super::{parse_options, GenerateContext, GeneratorKind, ValueGenerator};
use crate::error::{GeneratorError, Result};
use rand::seq::IndexedRandom;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct EnumOptions {
    options: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct EnumGenerator {
    options: Vec<Value>,
}

impl EnumGenerator {
    pub fn new(options: Vec<Value>) -> Result<Self> {
        if options.is_empty() {
            return Err(GeneratorError::invalid_options(
                "enum",
                "`options` must be a non-empty list",
            ));
        }
        Ok(Self { options })
    }

    pub fn from_spec(spec: &Value) -> Result<Self> {
        let opts: EnumOptions = parse_options(GeneratorKind::Enum, spec)?;
        Self::new(opts.options)
    }
}

impl ValueGenerator for EnumGenerator {
    fn generate(&mut self, ctx: &mut GenerateContext<'_>) -> Result<Value> {
        Ok(self.options.choose(&mut *ctx.rng).cloned().unwrap_or(Value::Null))
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Enum
    }
}
