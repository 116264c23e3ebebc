//! Value generators and the registry that builds them from leaf specs.
//!
//! A leaf spec is either a literal or an object carrying a `generator` kind
//! tag plus kind-specific options. Each leaf gets its own generator instance,
//! which may keep private state (a shuffled file pool, for instance) for the
//! whole run.
//!
//! Builtin kinds:
//! - `name`: random human-readable name
//! - `id`: unique, lexicographically sortable identifier
//! - `enum`: uniform pick from `options`
//! - `file`: contents of a file from `directory`, optionally `unique`
//! - `reference` / `ref`: value sampled from another template's history
//! - `join`: `count` element values joined by `separator`
//! - `copy`: value already produced at `from` in the current record
//! - `csv`: synthetic CSV document
//! - `javascript`: illustrative source snippet
//! - `int`: random integer in a range
//! - `null`, `constant`: fixed values
//!
//! Unknown or missing kinds fall back to returning the leaf spec object verbatim.

mod copy;
mod csv;
mod enumeration;
mod file;
mod id;
mod javascript;
mod join;
mod literal;
mod name;
mod numeric;
mod reference;

pub use copy::CopyGenerator;
pub use csv::CsvGenerator;
pub use enumeration::EnumGenerator;
pub use file::FileGenerator;
pub use id::IdGenerator;
pub use javascript::JavascriptGenerator;
pub use join::JoinGenerator;
pub use literal::{ConstantGenerator, LiteralGenerator, NullGenerator};
pub use name::NameGenerator;
pub use numeric::{CountRange, IntGenerator, RangeOptions};
pub use reference::ReferenceGenerator;

use crate::error::{GeneratorError, Result};
use crate::path::FieldPath;
use crate::tracker::TrackerRegistry;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Key marking an object as a generator spec rather than a nested document
pub const GENERATOR_KEY: &str = "generator";

/// Generator kind, parsed case-insensitively from the `generator` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Returns the leaf spec object verbatim
    Default,
    Null,
    Constant,
    Name,
    Id,
    Enum,
    File,
    Reference,
    Join,
    Copy,
    Csv,
    Javascript,
    Int,
}

impl GeneratorKind {
    /// Parse a kind name. Unknown names map to [`GeneratorKind::Default`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "null" => GeneratorKind::Null,
            "constant" => GeneratorKind::Constant,
            "name" => GeneratorKind::Name,
            "id" => GeneratorKind::Id,
            "enum" => GeneratorKind::Enum,
            "file" => GeneratorKind::File,
            "reference" | "ref" => GeneratorKind::Reference,
            "join" => GeneratorKind::Join,
            "copy" => GeneratorKind::Copy,
            "csv" => GeneratorKind::Csv,
            "javascript" => GeneratorKind::Javascript,
            "int" => GeneratorKind::Int,
            _ => GeneratorKind::Default,
        }
    }

    /// Kind of a leaf spec, or `None` when the leaf is a literal
    pub fn of_spec(spec: &Value) -> Option<Self> {
        let tag = spec.as_object()?.get(GENERATOR_KEY)?;
        Some(tag.as_str().map_or(GeneratorKind::Default, Self::from_name))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::Default => "default",
            GeneratorKind::Null => "null",
            GeneratorKind::Constant => "constant",
            GeneratorKind::Name => "name",
            GeneratorKind::Id => "id",
            GeneratorKind::Enum => "enum",
            GeneratorKind::File => "file",
            GeneratorKind::Reference => "reference",
            GeneratorKind::Join => "join",
            GeneratorKind::Copy => "copy",
            GeneratorKind::Csv => "csv",
            GeneratorKind::Javascript => "javascript",
            GeneratorKind::Int => "int",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when `value` is an object carrying a `generator` tag
pub fn is_generator_spec(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key(GENERATOR_KEY))
}

/// A consumer's need for a producer template's values at one path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub template: String,
    pub path: FieldPath,
}

/// State available while a generator is being constructed
pub struct BuildContext<'a> {
    pub rng: &'a mut dyn RngCore,
    pub trackers: &'a mut TrackerRegistry,
    dependencies: Vec<Dependency>,
}

impl<'a> BuildContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore, trackers: &'a mut TrackerRegistry) -> Self {
        Self {
            rng,
            trackers,
            dependencies: Vec::new(),
        }
    }

    /// Record a dependency and start tracking the producer path
    pub fn depend_on(&mut self, template: &str, path: &FieldPath) {
        self.trackers.track(template, path);
        let dependency = Dependency {
            template: template.to_string(),
            path: path.clone(),
        };
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
        }
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn into_dependencies(self) -> Vec<Dependency> {
        self.dependencies
    }
}

/// State available while a generator produces one value
pub struct GenerateContext<'a> {
    pub rng: &'a mut dyn RngCore,
    /// Record built so far, holding every leaf produced earlier in this record
    pub record: &'a Value,
    pub trackers: &'a TrackerRegistry,
}

/// Produces one value per call
pub trait ValueGenerator: fmt::Debug {
    fn generate(&mut self, ctx: &mut GenerateContext<'_>) -> Result<Value>;

    fn kind(&self) -> GeneratorKind;
}

/// Build the generator for one leaf spec.
///
/// Literals and specs with an unknown kind never fail; only a recognized
/// kind whose own required options are unusable is an error.
pub fn build_generator(spec: &Value, ctx: &mut BuildContext<'_>) -> Result<Box<dyn ValueGenerator>> {
    let Some(kind) = GeneratorKind::of_spec(spec) else {
        return Ok(Box::new(LiteralGenerator::new(spec.clone())));
    };

    debug!(kind = %kind, "building generator");

    let generator: Box<dyn ValueGenerator> = match kind {
        GeneratorKind::Default => Box::new(LiteralGenerator::new(spec.clone())),
        GeneratorKind::Null => Box::new(NullGenerator),
        GeneratorKind::Constant => Box::new(ConstantGenerator::from_spec(spec)),
        GeneratorKind::Name => Box::new(NameGenerator),
        GeneratorKind::Id => Box::new(IdGenerator::new()),
        GeneratorKind::Enum => Box::new(EnumGenerator::from_spec(spec)?),
        GeneratorKind::File => Box::new(FileGenerator::from_spec(spec, ctx)?),
        GeneratorKind::Reference => Box::new(ReferenceGenerator::from_spec(spec, ctx)?),
        GeneratorKind::Join => Box::new(JoinGenerator::from_spec(spec, ctx)?),
        GeneratorKind::Copy => Box::new(CopyGenerator::from_spec(spec, ctx)?),
        GeneratorKind::Csv => Box::new(CsvGenerator::from_spec(spec)?),
        GeneratorKind::Javascript => Box::new(JavascriptGenerator),
        GeneratorKind::Int => Box::new(IntGenerator::from_spec(spec)?),
    };

    Ok(generator)
}

/// Build an optional nested spec such as a `prefix` or `suffix`
pub(crate) fn build_optional(
    spec: Option<&Value>,
    ctx: &mut BuildContext<'_>,
) -> Result<Option<Box<dyn ValueGenerator>>> {
    spec.filter(|v| !v.is_null())
        .map(|v| build_generator(v, ctx))
        .transpose()
}

/// Evaluate an optional affix generator to text (empty when absent)
pub(crate) fn affix_text(
    affix: &mut Option<Box<dyn ValueGenerator>>,
    ctx: &mut GenerateContext<'_>,
) -> Result<String> {
    match affix {
        Some(generator) => Ok(value_to_text(&generator.generate(ctx)?)),
        None => Ok(String::new()),
    }
}

/// Deserialize a generator's options from its spec object
pub(crate) fn parse_options<T: DeserializeOwned>(kind: GeneratorKind, spec: &Value) -> Result<T> {
    serde_json::from_value(spec.clone())
        .map_err(|e| GeneratorError::invalid_options(kind.as_str(), e.to_string()))
}

/// Text form used when values are concatenated: strings raw, `null` empty,
/// everything else as compact JSON
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn build(spec: Value) -> Box<dyn ValueGenerator> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut trackers = TrackerRegistry::new();
        let mut ctx = BuildContext::new(&mut rng, &mut trackers);
        build_generator(&spec, &mut ctx).unwrap()
    }

    fn generate_once(generator: &mut dyn ValueGenerator) -> Value {
        let mut rng = StdRng::seed_from_u64(7);
        let trackers = TrackerRegistry::new();
        let record = json!({});
        let mut ctx = GenerateContext {
            rng: &mut rng,
            record: &record,
            trackers: &trackers,
        };
        generator.generate(&mut ctx).unwrap()
    }

    #[test]
    fn test_kind_names_are_case_insensitive() {
        assert_eq!(GeneratorKind::from_name("ENUM"), GeneratorKind::Enum);
        assert_eq!(GeneratorKind::from_name("Ref"), GeneratorKind::Reference);
        assert_eq!(GeneratorKind::from_name("reference"), GeneratorKind::Reference);
        assert_eq!(GeneratorKind::from_name("JavaScript"), GeneratorKind::Javascript);
        assert_eq!(GeneratorKind::from_name("nope"), GeneratorKind::Default);
    }

    #[test]
    fn test_of_spec() {
        assert_eq!(GeneratorKind::of_spec(&json!(1)), None);
        assert_eq!(GeneratorKind::of_spec(&json!({"a": 1})), None);
        assert_eq!(
            GeneratorKind::of_spec(&json!({"generator": "name"})),
            Some(GeneratorKind::Name)
        );
        assert_eq!(
            GeneratorKind::of_spec(&json!({"generator": 12})),
            Some(GeneratorKind::Default)
        );
    }

    #[test]
    fn test_literal_leaf_passes_through() {
        let mut generator = build(json!([1, 2, 3]));
        assert_eq!(generator.kind(), GeneratorKind::Default);
        assert_eq!(generate_once(generator.as_mut()), json!([1, 2, 3]));
    }

    #[test]
    fn test_unknown_kind_returns_spec_verbatim() {
        let spec = json!({"generator": "mystery", "size": {"min": 1}});
        let mut generator = build(spec.clone());
        assert_eq!(generator.kind(), GeneratorKind::Default);
        assert_eq!(generate_once(generator.as_mut()), spec);
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!("abc")), "abc");
        assert_eq!(value_to_text(&json!(null)), "");
        assert_eq!(value_to_text(&json!(42)), "42");
        assert_eq!(value_to_text(&json!([1, "a"])), "[1,\"a\"]");
    }

    #[test]
    fn test_recognized_kind_with_bad_options_fails() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut trackers = TrackerRegistry::new();
        let mut ctx = BuildContext::new(&mut rng, &mut trackers);
        let result = build_generator(&json!({"generator": "enum"}), &mut ctx);
        assert!(matches!(result, Err(GeneratorError::InvalidOptions { kind: "enum", .. })));
    }
}
