//! Fixed-value generators: literal passthrough, null and constant.

use super::{GenerateContext, GeneratorKind, ValueGenerator};
use crate::error::Result;
use serde_json::Value;

/// Returns its value verbatim on every call.
///
/// Used for literal leaves and for specs whose kind is unknown, in which
/// case the whole spec object is returned.
#[derive(Debug, Clone)]
pub struct LiteralGenerator {
    value: Value,
}

impl LiteralGenerator {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl ValueGenerator for LiteralGenerator {
    fn generate(&mut self, _ctx: &mut GenerateContext<'_>) -> Result<Value> {
        Ok(self.value.clone())
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Default
    }
}

/// Always `null`
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGenerator;

impl ValueGenerator for NullGenerator {
    fn generate(&mut self, _ctx: &mut GenerateContext<'_>) -> Result<Value> {
        Ok(Value::Null)
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Null
    }
}

/// Returns the `value` option (`null` when absent)
#[derive(Debug, Clone)]
pub struct ConstantGenerator {
    value: Value,
}

impl ConstantGenerator {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn from_spec(spec: &Value) -> Self {
        Self::new(spec.get("value").cloned().unwrap_or(Value::Null))
    }
}

impl ValueGenerator for ConstantGenerator {
    fn generate(&mut self, _ctx: &mut GenerateContext<'_>) -> Result<Value> {
        Ok(self.value.clone())
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Constant
    }
}
