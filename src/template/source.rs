//! Template discovery and loading.
//!
//! Template files are JSON documents named `<name>.json` or
//! `<name>.<iterations>.json`. The name routes records to their output
//! stream, so a file whose name cannot be derived unambiguously is rejected.

use crate::error::{GeneratorError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of template documents
pub const TEMPLATE_EXTENSION: &str = "json";

/// A parsed template ready to be turned into a record generator
#[derive(Debug, Clone)]
pub struct TemplateSource {
    pub name: String,
    /// Count encoded in the file name, if any
    pub iterations: Option<u64>,
    pub document: Value,
    pub origin: Option<PathBuf>,
}

impl TemplateSource {
    pub fn new(name: impl Into<String>, iterations: Option<u64>, document: Value) -> Self {
        Self {
            name: name.into(),
            iterations,
            document,
            origin: None,
        }
    }
}

/// Split a template file name into its name and optional iteration count.
///
/// `users.json` gives `("users", None)`, `users.250.json` gives
/// `("users", Some(250))`. Anything leaving zero or several name segments
/// (`.json`, `a.b.json`, `1.json`) is an error.
pub fn parse_template_file_name(path: &Path) -> Result<(String, Option<u64>)> {
    let name_err = |reason: &str| GeneratorError::TemplateName {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| name_err("file name is not valid UTF-8"))?;

    let stem = file_name
        .strip_suffix(TEMPLATE_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(file_name);

    let mut segments: Vec<&str> = stem.split('.').collect();

    let iterations = match segments.last() {
        Some(last) if segments.len() > 1 && is_count(last) => {
            let count = last
                .parse::<u64>()
                .map_err(|_| name_err("iteration count out of range"))?;
            segments.pop();
            Some(count)
        }
        _ => None,
    };

    match segments.as_slice() {
        [name] if !name.is_empty() && !is_count(name) => Ok((name.to_string(), iterations)),
        [name] if name.is_empty() => Err(name_err("template name is empty")),
        [_] => Err(name_err("template name is missing")),
        _ => Err(name_err("template name is ambiguous")),
    }
}

fn is_count(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Read and parse one template file
pub fn load_template(path: &Path) -> Result<TemplateSource> {
    let (name, iterations) = parse_template_file_name(path)?;

    let text = fs::read_to_string(path).map_err(|source| GeneratorError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&text).map_err(|source| GeneratorError::TemplateParse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(TemplateSource {
        name,
        iterations,
        document,
        origin: Some(path.to_path_buf()),
    })
}

/// Check if a path string contains glob pattern characters.
pub fn is_glob_pattern(path: &str) -> bool {
    path.contains('*') || path.contains('?') || path.contains('[')
}

/// Resolve a directory, glob pattern or single file into template paths.
///
/// Directories are searched recursively for `*.json`. Results are sorted
/// so declaration order is stable across platforms.
pub fn discover_templates(input: &Path) -> Result<Vec<PathBuf>> {
    let input_str = input.to_string_lossy();

    let pattern = if is_glob_pattern(&input_str) {
        input_str.into_owned()
    } else if input.is_dir() {
        input
            .join("**")
            .join(format!("*.{}", TEMPLATE_EXTENSION))
            .to_string_lossy()
            .into_owned()
    } else if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    } else {
        return Err(GeneratorError::Discovery(format!(
            "path does not exist: {}",
            input.display()
        )));
    };

    let entries = glob::glob(&pattern)
        .map_err(|e| GeneratorError::Discovery(format!("invalid glob pattern '{}': {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            GeneratorError::Discovery(format!("error reading path for pattern '{}': {}", pattern, e))
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(GeneratorError::Discovery(format!(
            "no template files match: {}",
            pattern
        )));
    }

    files.sort();
    Ok(files)
}

/// Discover and load every template under `input`, rejecting duplicate names
pub fn load_templates(input: &Path) -> Result<Vec<TemplateSource>> {
    let mut sources: Vec<TemplateSource> = Vec::new();
    for path in discover_templates(input)? {
        let source = load_template(&path)?;
        if sources.iter().any(|s| s.name == source.name) {
            return Err(GeneratorError::DuplicateTemplate(source.name));
        }
        sources.push(source);
    }
    Ok(sources)
}
