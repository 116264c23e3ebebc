//! Configuration for a generation run.

use crate::error::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Iterations used when neither the file name nor any override gives a count
pub const DEFAULT_ITERATIONS: u64 = 10;

/// Output directory used when none is configured
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Runtime configuration for a generation run
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Template directory, file or glob pattern
    pub templates: String,
    /// Directory receiving `<template>.jsonl` files
    pub output: PathBuf,
    /// Random seed for reproducibility (None = system entropy)
    pub seed: Option<u64>,
    /// Iterations for templates without a count in their file name
    pub default_iterations: u64,
    /// Per-template iteration overrides
    pub iterations: BTreeMap<String, u64>,
    /// Fail instead of warning on unresolved dependencies
    pub strict: bool,
    /// Show progress
    pub progress: bool,
    /// Plan and build generators without writing output
    pub dry_run: bool,
}

impl GenerateConfig {
    pub fn builder() -> GenerateConfigBuilder {
        GenerateConfigBuilder::default()
    }

    /// Iteration count for a template.
    ///
    /// Per-template overrides win over the count parsed from the file name,
    /// which wins over the default.
    pub fn iterations_for(&self, name: &str, file_count: Option<u64>) -> u64 {
        self.iterations
            .get(name)
            .copied()
            .or(file_count)
            .unwrap_or(self.default_iterations)
    }
}

/// Builder for GenerateConfig
#[derive(Default)]
pub struct GenerateConfigBuilder {
    templates: Option<String>,
    output: Option<PathBuf>,
    config_file: Option<PathBuf>,
    seed: Option<u64>,
    default_iterations: Option<u64>,
    iterations: BTreeMap<String, u64>,
    strict: bool,
    progress: bool,
    dry_run: bool,
}

impl GenerateConfigBuilder {
    pub fn templates(mut self, templates: impl Into<String>) -> Self {
        self.templates = Some(templates.into());
        self
    }

    pub fn output(mut self, path: Option<PathBuf>) -> Self {
        self.output = path;
        self
    }

    pub fn config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn default_iterations(mut self, iterations: Option<u64>) -> Self {
        self.default_iterations = iterations;
        self
    }

    pub fn iteration_override(mut self, template: impl Into<String>, iterations: u64) -> Self {
        self.iterations.insert(template.into(), iterations);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Build the GenerateConfig, merging in the YAML file if one was given.
    /// Builder values override the file.
    pub fn build(self) -> Result<GenerateConfig> {
        let templates = self
            .templates
            .ok_or_else(|| GeneratorError::Config("template path is required".to_string()))?;

        let yaml = match self.config_file {
            Some(ref path) => Some(GenerateYamlConfig::load(path)?),
            None => None,
        };

        let seed = self.seed.or_else(|| yaml.as_ref().and_then(|y| y.seed));

        let default_iterations = self
            .default_iterations
            .or_else(|| yaml.as_ref().and_then(|y| y.default_iterations))
            .unwrap_or(DEFAULT_ITERATIONS);

        let output = self
            .output
            .or_else(|| yaml.as_ref().and_then(|y| y.output.clone()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let strict = self.strict || yaml.as_ref().and_then(|y| y.strict).unwrap_or(false);

        let mut iterations = yaml.map(|y| y.iterations).unwrap_or_default();
        iterations.extend(self.iterations);

        Ok(GenerateConfig {
            templates,
            output,
            seed,
            default_iterations,
            iterations,
            strict,
            progress: self.progress,
            dry_run: self.dry_run,
        })
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateYamlConfig {
    /// Random seed for reproducibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Iterations for templates without an explicit count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_iterations: Option<u64>,

    /// Output directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Fail on unresolved dependencies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    /// Per-template iteration overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub iterations: BTreeMap<String, u64>,
}

impl GenerateYamlConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GeneratorError::Config(format!("{}: {}", path.display(), e)))?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| GeneratorError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a YAML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml_ng::to_string(self)
            .map_err(|e| GeneratorError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
