//! File-backed generator returning whole file contents.
//!
//! The directory is listed and shuffled once at construction. In unique mode
//! every call consumes one file from that pool; once it is empty the
//! generator returns an empty string forever.

use super::{parse_options, BuildContext, GenerateContext, GeneratorKind, ValueGenerator};
use crate::error::{GeneratorError, Result};
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct FileOptions {
    directory: PathBuf,
    #[serde(default)]
    unique: bool,
}

#[derive(Debug)]
pub struct FileGenerator {
    directory: PathBuf,
    files: Vec<PathBuf>,
    unique: bool,
}

impl FileGenerator {
    pub fn new(directory: &Path, unique: bool, ctx: &mut BuildContext<'_>) -> Result<Self> {
        let mut files = list_files(directory)?;
        files.shuffle(&mut *ctx.rng);

        Ok(Self {
            directory: directory.to_path_buf(),
            files,
            unique,
        })
    }

    pub fn from_spec(spec: &Value, ctx: &mut BuildContext<'_>) -> Result<Self> {
        let opts: FileOptions = parse_options(GeneratorKind::File, spec)?;
        Self::new(&opts.directory, opts.unique, ctx)
    }

    /// Files not yet consumed (all files when not unique)
    pub fn remaining(&self) -> usize {
        self.files.len()
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Regular files directly inside `directory`, sorted by path so a seeded
/// shuffle is reproducible regardless of listing order
fn list_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let source_err = |source| GeneratorError::FileSource {
        directory: directory.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(directory).map_err(source_err)? {
        let path = entry.map_err(source_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_content(path: &Path) -> Result<Value> {
    let bytes = fs::read(path).map_err(|source| GeneratorError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}

impl ValueGenerator for FileGenerator {
    fn generate(&mut self, ctx: &mut GenerateContext<'_>) -> Result<Value> {
        let picked = if self.unique {
            self.files.pop()
        } else {
            self.files.choose(&mut *ctx.rng).cloned()
        };

        match picked {
            Some(path) => read_content(&path),
            None => Ok(Value::String(String::new())),
        }
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::File
    }
}
