//! Unique identifier generator.

use super::{GenerateContext, GeneratorKind, ValueGenerator};
use crate::error::Result;
use serde_json::Value;
use std::fmt;
use ulid::{Generator, Ulid};

/// Emits ULIDs: unique across the run and strictly increasing, also within
/// one millisecond.
pub struct IdGenerator {
    ids: Generator,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            ids: Generator::new(),
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}

impl ValueGenerator for IdGenerator {
    fn generate(&mut self, _ctx: &mut GenerateContext<'_>) -> Result<Value> {
        // random part overflowed within one millisecond
        let id = self.ids.generate().unwrap_or_else(|_| Ulid::new());
        Ok(Value::String(id.to_string()))
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Id
    }
}
