//! Numeric ranges and the integer generator.
//!
//! Ranges are written `{min, max}` with inclusive `min` and exclusive `max`.
//! Either bound may be omitted and falls back to a per-use default; once
//! defaulted, a range with `max <= min` always yields `min`.

use super::{parse_options, GenerateContext, GeneratorKind, ValueGenerator};
use crate::error::Result;
use rand::{Rng, RngCore};
use serde::Deserialize;
use serde_json::Value;

/// `{min, max}` as written in a template, both optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RangeOptions {
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
}

/// Half-open integer range `[min, max)` with defaults applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountRange {
    pub min: i64,
    pub max: i64,
}

impl CountRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Fill the missing bounds of `options` from `fallback`
    pub fn with_defaults(options: Option<RangeOptions>, fallback: CountRange) -> Self {
        let options = options.unwrap_or_default();
        Self {
            min: options.min.unwrap_or(fallback.min),
            max: options.max.unwrap_or(fallback.max),
        }
    }

    pub fn sample(&self, rng: &mut dyn RngCore) -> i64 {
        if self.max <= self.min {
            self.min
        } else {
            rng.random_range(self.min..self.max)
        }
    }

    /// Sample as a count; negative draws clamp to zero
    pub fn sample_count(&self, rng: &mut dyn RngCore) -> usize {
        self.sample(rng).max(0) as usize
    }
}

const DEFAULT_INT_RANGE: CountRange = CountRange::new(0, 1000);

/// Random integer in a `{min, max}` range, `[0, 1000)` by default
#[derive(Debug, Clone)]
pub struct IntGenerator {
    range: CountRange,
}

impl IntGenerator {
    pub fn new(range: CountRange) -> Self {
        Self { range }
    }

    pub fn from_spec(spec: &Value) -> Result<Self> {
        let range: RangeOptions = parse_options(GeneratorKind::Int, spec)?;
        Ok(Self::new(CountRange::with_defaults(
            Some(range),
            DEFAULT_INT_RANGE,
        )))
    }
}

impl Default for IntGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_INT_RANGE)
    }
}

impl ValueGenerator for IntGenerator {
    fn generate(&mut self, ctx: &mut GenerateContext<'_>) -> Result<Value> {
        Ok(Value::from(self.range.sample(ctx.rng)))
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Int
    }
}
