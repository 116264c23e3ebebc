//! Human-readable name generator.

use super::{GenerateContext, GeneratorKind, ValueGenerator};
use crate::error::Result;
use crate::names;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct NameGenerator;

impl ValueGenerator for NameGenerator {
    fn generate(&mut self, ctx: &mut GenerateContext<'_>) -> Result<Value> {
        Ok(Value::String(names::human_name(ctx.rng)))
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Name
    }
}
