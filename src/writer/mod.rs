//! Record sinks.
//!
//! Generation hands every finished record to a [`RecordSink`]. The file sink
//! writes one JSON Lines file per template; the memory sink collects records
//! for library callers and tests.

use crate::error::Result;
use ahash::AHashMap;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const WRITER_BUFFER_SIZE: usize = 256 * 1024;
pub const RECORD_BUFFER_COUNT: usize = 100;
pub const OUTPUT_EXTENSION: &str = "jsonl";

/// Destination for generated records
pub trait RecordSink {
    fn write_record(&mut self, template: &str, record: &Value) -> Result<()>;

    /// Called once after the last record of the run
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Buffered JSON Lines writer for a single template
pub struct RecordWriter {
    writer: BufWriter<File>,
    write_count: usize,
    max_record_buffer: usize,
    records: u64,
}

impl RecordWriter {
    pub fn new(filename: &Path) -> std::io::Result<Self> {
        let file = File::create(filename)?;
        let writer = BufWriter::with_capacity(WRITER_BUFFER_SIZE, file);

        Ok(Self {
            writer,
            write_count: 0,
            max_record_buffer: RECORD_BUFFER_COUNT,
            records: 0,
        })
    }

    pub fn write_record(&mut self, record: &Value) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;

        self.records += 1;
        self.write_count += 1;
        if self.write_count >= self.max_record_buffer {
            self.write_count = 0;
            self.writer.flush()?;
        }

        Ok(())
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.write_count = 0;
        self.writer.flush()
    }
}

fn output_file(output_dir: &Path, template: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", template, OUTPUT_EXTENSION))
}

/// One `<template>.jsonl` file per template under an output directory.
///
/// Files are created lazily on a template's first record, so templates with
/// zero iterations leave no file behind.
pub struct JsonlWriterPool {
    output_dir: PathBuf,
    writers: AHashMap<String, RecordWriter>,
}

impl JsonlWriterPool {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            writers: AHashMap::new(),
        }
    }

    pub fn ensure_output_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.output_dir)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the file a template's records go to
    pub fn file_for(&self, template: &str) -> PathBuf {
        output_file(&self.output_dir, template)
    }

    pub fn get_writer(&mut self, template: &str) -> std::io::Result<&mut RecordWriter> {
        use std::collections::hash_map::Entry;

        match self.writers.entry(template.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let writer = RecordWriter::new(&output_file(&self.output_dir, template))?;
                Ok(entry.insert(writer))
            }
        }
    }

    pub fn close_all(&mut self) -> std::io::Result<()> {
        for (_, writer) in self.writers.iter_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl RecordSink for JsonlWriterPool {
    fn write_record(&mut self, template: &str, record: &Value) -> Result<()> {
        let writer = self.get_writer(template)?;
        writer.write_record(record)
    }

    fn finish(&mut self) -> Result<()> {
        self.close_all()?;
        Ok(())
    }
}

/// Keeps records in memory, grouped by template in first-write order
#[derive(Debug, Default)]
pub struct MemorySink {
    templates: Vec<(String, Vec<Value>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self, template: &str) -> &[Value] {
        self.templates
            .iter()
            .find(|(name, _)| name == template)
            .map(|(_, records)| records.as_slice())
            .unwrap_or(&[])
    }

    /// Template names in the order their first record arrived
    pub fn templates(&self) -> Vec<&str> {
        self.templates.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn total(&self) -> usize {
        self.templates.iter().map(|(_, records)| records.len()).sum()
    }
}

impl RecordSink for MemorySink {
    fn write_record(&mut self, template: &str, record: &Value) -> Result<()> {
        match self.templates.iter_mut().find(|(name, _)| name == template) {
            Some((_, records)) => records.push(record.clone()),
            None => self
                .templates
                .push((template.to_string(), vec![record.clone()])),
        }
        Ok(())
    }
}
