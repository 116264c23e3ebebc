//! Synthetic record generation from declarative JSON templates.
//!
//! Each template is a JSON document whose leaves are either literals or
//! generator specs (`{"generator": "<kind>", ...}`). A [`RecordGenerator`]
//! flattens the template into leaf paths and builds one [`ValueGenerator`]
//! per leaf. Templates may reference values produced by other templates; the
//! [`planner`] orders templates so producers run first, and the [`Engine`]
//! drives generation into a [`RecordSink`].

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod generator;
pub mod names;
pub mod path;
pub mod planner;
pub mod record;
pub mod template;
pub mod tracker;
pub mod writer;

pub use config::{GenerateConfig, GenerateYamlConfig, DEFAULT_ITERATIONS};
pub use context::GenerationContext;
pub use engine::{Engine, RunStats, TemplateStats};
pub use error::{GeneratorError, Result};
pub use generator::{build_generator, GeneratorKind, ValueGenerator};
pub use path::FieldPath;
pub use planner::{plan, ExecutionPlan, UnresolvedTemplate};
pub use record::RecordGenerator;
pub use template::{flatten, load_template, load_templates, FlatTemplate, TemplateSource};
pub use tracker::{TrackerRegistry, ValueTracker};
pub use writer::{JsonlWriterPool, MemorySink, RecordSink};
