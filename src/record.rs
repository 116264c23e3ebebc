//! Per-template record generation.

use crate::context::GenerationContext;
use crate::error::{GeneratorError, Result};
use crate::generator::{build_generator, BuildContext, Dependency, GenerateContext, ValueGenerator};
use crate::path::FieldPath;
use crate::template::{flatten, FlatTemplate, TemplateSource};
use serde_json::{Map, Value};
use tracing::debug;

/// Owns one flattened template and one generator per leaf.
///
/// Leaves are produced in template order, so a leaf can read every value
/// produced before it in the same record. Tracked leaves are also appended
/// to this template's tracker for consumers in other templates.
#[derive(Debug)]
pub struct RecordGenerator {
    name: String,
    iterations: u64,
    template: FlatTemplate,
    leaves: Vec<(FieldPath, Box<dyn ValueGenerator>)>,
    dependencies: Vec<Dependency>,
}

impl RecordGenerator {
    /// Build generators for every leaf of `document`, registering any
    /// cross-template dependencies with the context's trackers.
    pub fn new(
        name: &str,
        iterations: u64,
        document: &Value,
        ctx: &mut GenerationContext,
    ) -> Result<Self> {
        let template = flatten(document);
        let mut build = BuildContext::new(&mut ctx.rng, &mut ctx.trackers);

        let mut leaves = Vec::with_capacity(template.len());
        for (path, spec) in template.iter() {
            let generator = build_generator(spec, &mut build).map_err(|e| GeneratorError::Leaf {
                template: name.to_string(),
                path: path.to_string(),
                source: Box::new(e),
            })?;
            leaves.push((path.clone(), generator));
        }

        let dependencies = build.into_dependencies();
        debug!(
            template = name,
            leaves = leaves.len(),
            dependencies = dependencies.len(),
            "built record generator"
        );

        Ok(Self {
            name: name.to_string(),
            iterations,
            template,
            leaves,
            dependencies,
        })
    }

    pub fn from_source(
        source: &TemplateSource,
        iterations: u64,
        ctx: &mut GenerationContext,
    ) -> Result<Self> {
        Self::new(&source.name, iterations, &source.document, ctx)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records one run is expected to produce
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn template(&self) -> &FlatTemplate {
        &self.template
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Distinct producer template names, in first-seen order
    pub fn producers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for dep in &self.dependencies {
            if !names.contains(&dep.template.as_str()) {
                names.push(&dep.template);
            }
        }
        names
    }

    /// Produce one record.
    ///
    /// Consumes destructive generator state and appends tracked values to
    /// this template's tracker.
    pub fn generate(&mut self, ctx: &mut GenerationContext) -> Result<Value> {
        let mut record = Value::Object(Map::new());

        for (path, generator) in &mut self.leaves {
            let mut leaf_ctx = GenerateContext {
                rng: &mut ctx.rng,
                record: &record,
                trackers: &ctx.trackers,
            };
            let value = generator
                .generate(&mut leaf_ctx)
                .map_err(|e| GeneratorError::Leaf {
                    template: self.name.clone(),
                    path: path.to_string(),
                    source: Box::new(e),
                })?;

            if ctx.trackers.tracks(&self.name, path) {
                ctx.trackers.add(&self.name, path, value.clone());
            }
            path.set(&mut record, value);
        }

        Ok(record)
    }
}
