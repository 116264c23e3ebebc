//! Generation driver.
//!
//! Builds one record generator per template, orders them so producers run
//! before consumers, then asks each for its configured number of records and
//! hands every record to a [`RecordSink`].

use crate::context::GenerationContext;
use crate::error::{GeneratorError, Result};
use crate::planner::{self, ExecutionPlan, UnresolvedTemplate};
use crate::record::RecordGenerator;
use crate::template::TemplateSource;
use crate::writer::RecordSink;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Records produced for one template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateStats {
    pub name: String,
    pub records: u64,
}

/// Outcome of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Per-template counts, in execution order
    pub templates: Vec<TemplateStats>,
    pub records_generated: u64,
    pub unresolved: Vec<UnresolvedTemplate>,
    pub seed: u64,
    pub elapsed_secs: f64,
}

impl RunStats {
    pub fn execution_order(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }
}

pub struct Engine {
    ctx: GenerationContext,
    generators: Vec<RecordGenerator>,
    strict: bool,
    progress_fn: Option<Box<dyn Fn(u64)>>,
}

impl Engine {
    pub fn new(ctx: GenerationContext) -> Self {
        Self {
            ctx,
            generators: Vec::new(),
            strict: false,
            progress_fn: None,
        }
    }

    /// Refuse to run when some template's producers cannot run first
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Called with the running total of records after each record
    pub fn with_progress<F: Fn(u64) + 'static>(mut self, f: F) -> Self {
        self.progress_fn = Some(Box::new(f));
        self
    }

    /// Build the record generator for one template.
    ///
    /// Construction registers the template's cross-template dependencies,
    /// so every template must be added before [`Engine::run`].
    pub fn add_template(&mut self, source: &TemplateSource, iterations: u64) -> Result<()> {
        if self.generators.iter().any(|g| g.name() == source.name) {
            return Err(GeneratorError::DuplicateTemplate(source.name.clone()));
        }

        let generator = RecordGenerator::from_source(source, iterations, &mut self.ctx)?;
        self.generators.push(generator);
        Ok(())
    }

    pub fn generators(&self) -> &[RecordGenerator] {
        &self.generators
    }

    pub fn context(&self) -> &GenerationContext {
        &self.ctx
    }

    /// Records a full run will produce
    pub fn total_records(&self) -> u64 {
        self.generators.iter().map(|g| g.iterations()).sum()
    }

    pub fn plan(&self) -> ExecutionPlan {
        planner::plan(&self.generators)
    }

    /// Generate every template in planned order, exactly `iterations`
    /// records each.
    pub fn run(&mut self, sink: &mut dyn RecordSink) -> Result<RunStats> {
        let start = Instant::now();
        let plan = self.plan();

        if self.strict && !plan.is_fully_resolved() {
            return Err(GeneratorError::UnresolvedDependencies(
                plan.unresolved.iter().map(|u| u.describe()).collect(),
            ));
        }
        plan.warn_unresolved();

        let mut templates = Vec::with_capacity(plan.order.len());
        let mut total: u64 = 0;

        for &index in &plan.order {
            let generator = &mut self.generators[index];
            info!(
                template = generator.name(),
                iterations = generator.iterations(),
                "generating"
            );

            let mut records = 0;
            for _ in 0..generator.iterations() {
                let record = generator.generate(&mut self.ctx)?;
                sink.write_record(generator.name(), &record)?;
                records += 1;
                total += 1;
                if let Some(ref progress) = self.progress_fn {
                    progress(total);
                }
            }

            info!(template = generator.name(), records, "finished");
            templates.push(TemplateStats {
                name: generator.name().to_string(),
                records,
            });
        }

        sink.finish()?;

        Ok(RunStats {
            templates,
            records_generated: total,
            unresolved: plan.unresolved,
            seed: self.ctx.seed(),
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::MemorySink;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    fn source(name: &str, document: serde_json::Value) -> TemplateSource {
        TemplateSource::new(name, None, document)
    }

    #[test]
    fn test_exact_iterations_per_template() {
        let mut engine = Engine::new(GenerationContext::new(42));
        engine
            .add_template(&source("a", json!({"x": {"generator": "int"}})), 3)
            .unwrap();
        engine
            .add_template(&source("b", json!({"y": 1})), 0)
            .unwrap();

        let mut sink = MemorySink::new();
        let stats = engine.run(&mut sink).unwrap();

        assert_eq!(sink.records("a").len(), 3);
        assert!(sink.records("b").is_empty());
        assert_eq!(stats.records_generated, 3);
        assert_eq!(stats.execution_order(), vec!["a", "b"]);
        assert_eq!(stats.seed, 42);
    }

    #[test]
    fn test_duplicate_template_rejected() {
        let mut engine = Engine::new(GenerationContext::new(1));
        engine.add_template(&source("a", json!({})), 1).unwrap();
        let err = engine.add_template(&source("a", json!({})), 1).unwrap_err();
        assert!(matches!(err, GeneratorError::DuplicateTemplate(name) if name == "a"));
    }

    #[test]
    fn test_strict_mode_refuses_unresolved() {
        let mut engine = Engine::new(GenerationContext::new(1)).with_strict(true);
        engine
            .add_template(
                &source("orders", json!({"user": {"generator": "ref", "other": "users", "property": "id"}})),
                2,
            )
            .unwrap();

        let mut sink = MemorySink::new();
        let err = engine.run(&mut sink).unwrap_err();
        assert!(err.to_string().contains("orders -> users"));
        assert_eq!(sink.total(), 0);
    }

    #[test]
    fn test_progress_reports_running_total() {
        let seen = Rc::new(Cell::new(0));
        let seen_clone = seen.clone();
        let mut engine = Engine::new(GenerationContext::new(1))
            .with_progress(move |n| seen_clone.set(n));
        engine.add_template(&source("a", json!({"k": 1})), 4).unwrap();
        engine.add_template(&source("b", json!({"k": 2})), 2).unwrap();
        assert_eq!(engine.total_records(), 6);

        engine.run(&mut MemorySink::new()).unwrap();
        assert_eq!(seen.get(), 6);
    }
}
