//! The `DataForge` facade
//!
//! Bundles a pipeline, a data generator and the formatter behind a handful
//! of dataset-level operations. Every operation takes an optional config and
//! resolves it once before any stage runs.

use dataforge_core::{
    CanonicalRecord, InputRecord, OutputFormat, ProcessingConfig, Result,
};
use dataforge_output::format_data;
use dataforge_pipeline::{Pipeline, ProcessedBatch};
use dataforge_synth::{DataGenerator, MockDataGenerator};
use serde_json::Value;
use tracing::info;

/// A processed batch together with its serialized form
#[derive(Debug, Clone)]
pub struct FormattedBatch {
    pub batch: ProcessedBatch,
    pub formatted: String,
    pub format: OutputFormat,
}

pub struct DataForge {
    pipeline: Pipeline,
    generator: Box<dyn DataGenerator>,
}

impl Default for DataForge {
    fn default() -> Self {
        Self::new(Pipeline::default(), Box::new(MockDataGenerator::new()))
    }
}

impl DataForge {
    pub fn new(pipeline: Pipeline, generator: Box<dyn DataGenerator>) -> Self {
        Self { pipeline, generator }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    pub fn process_data(
        &self,
        input: &[InputRecord],
        config: Option<ProcessingConfig>,
        existing: Option<&[CanonicalRecord]>,
    ) -> Result<ProcessedBatch> {
        let config = ProcessingConfig::resolve(config)?;
        self.pipeline.process(input, &config, existing)
    }

    /// Process loosely-typed JSON items, as received over the wire or from a file
    pub fn process_json(
        &self,
        items: &[Value],
        config: Option<ProcessingConfig>,
        existing: Option<&[CanonicalRecord]>,
    ) -> Result<ProcessedBatch> {
        let config = ProcessingConfig::resolve(config)?;
        self.pipeline.process_json(items, &config, existing)
    }

    pub fn process_and_format(
        &self,
        input: &[InputRecord],
        config: Option<ProcessingConfig>,
        existing: Option<&[CanonicalRecord]>,
    ) -> Result<String> {
        Ok(self.process_formatted(input, config, existing)?.formatted)
    }

    /// Process typed records and keep both the batch and its serialized form
    pub fn process_formatted(
        &self,
        input: &[InputRecord],
        config: Option<ProcessingConfig>,
        existing: Option<&[CanonicalRecord]>,
    ) -> Result<FormattedBatch> {
        let config = ProcessingConfig::resolve(config)?;
        let batch = self.pipeline.process(input, &config, existing)?;
        format_batch(batch, config)
    }

    /// JSON-item counterpart of [`DataForge::process_formatted`]
    pub fn process_json_formatted(
        &self,
        items: &[Value],
        config: Option<ProcessingConfig>,
        existing: Option<&[CanonicalRecord]>,
    ) -> Result<FormattedBatch> {
        let config = ProcessingConfig::resolve(config)?;
        let batch = self.pipeline.process_json(items, &config, existing)?;
        format_batch(batch, config)
    }

    pub fn generate_mock_data(&self, prompt: &str, count: usize) -> Vec<InputRecord> {
        self.generator.generate(prompt, count)
    }

    /// Generate, process and format a fresh dataset
    pub fn generate_dataset(
        &self,
        prompt: &str,
        count: usize,
        config: Option<ProcessingConfig>,
    ) -> Result<FormattedBatch> {
        let config = ProcessingConfig::resolve(config)?;
        let generated = self.generate_mock_data(prompt, count);
        let batch = self.pipeline.process(&generated, &config, None)?;
        info!(records = batch.records.len(), "created new dataset");
        format_batch(batch, config)
    }

    pub fn create_new_dataset(
        &self,
        prompt: &str,
        count: usize,
        config: Option<ProcessingConfig>,
    ) -> Result<String> {
        Ok(self.generate_dataset(prompt, count, config)?.formatted)
    }

    /// Process new records against an existing dataset and format the new records only
    ///
    /// Consistency conflicts are logged, never fatal.
    pub fn add_to_existing_dataset(
        &self,
        input: &[InputRecord],
        existing: &[CanonicalRecord],
        config: Option<ProcessingConfig>,
    ) -> Result<String> {
        let output = self.process_formatted(input, config, Some(existing))?;
        info!(
            added = output.batch.records.len(),
            existing = existing.len(),
            consistent = output.batch.is_consistent(),
            "processed records for existing dataset"
        );
        Ok(output.formatted)
    }
}

fn format_batch(batch: ProcessedBatch, config: ProcessingConfig) -> Result<FormattedBatch> {
    let formatted = format_data(&batch.records, &config)?;
    Ok(FormattedBatch {
        batch,
        formatted,
        format: config.output_format,
    })
}
