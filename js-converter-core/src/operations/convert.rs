use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::harness::assemble;
use crate::ledger::record_size;
use crate::literal::{rewrite, LiteralKind, TypeSequence};
use crate::output::{ConvertResult, ConvertedFile};
use crate::output_path::{resolve_output_path, OutputTarget};

/// Options for a convert operation
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub target: OutputTarget,
    pub ledger_path: PathBuf,
    pub converted_suffix: String,
}

impl ConvertOptions {
    /// Options taking ledger location and suffix from the config
    pub fn from_config(target: OutputTarget, config: &Config) -> Self {
        Self {
            target,
            ledger_path: config.ledger.path.clone(),
            converted_suffix: config.output.converted_suffix.clone(),
        }
    }
}

/// A converted program and the literal kinds its placeholders read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub program: String,
    pub types: TypeSequence,
    pub truncated: bool,
}

/// Rewrite a sample program and append the harness boilerplate
pub fn convert_source(source: &str) -> Conversion {
    let rewritten = rewrite(source);
    let program = assemble(&rewritten.lines, &rewritten.types);
    Conversion {
        program,
        types: rewritten.types,
        truncated: rewritten.truncated,
    }
}

/// Convert one file, write it out and record its input size
pub fn convert_file(input: &Path, options: &ConvertOptions) -> Result<ConvertedFile> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let conversion = convert_source(&source);
    debug!(
        file = %input.display(),
        literals = conversion.types.len(),
        truncated = conversion.truncated,
        "converted sample"
    );

    let output = resolve_output_path(input, &options.target, &options.converted_suffix);
    fs::write(&output, &conversion.program)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(input = %input.display(), output = %output.display(), "wrote harness");

    let input_size = record_size(&options.ledger_path, &output, &conversion.types)
        .with_context(|| {
            format!(
                "Failed to record input size in {}",
                options.ledger_path.display()
            )
        })?;

    Ok(ConvertedFile {
        input: input.display().to_string(),
        output: output.display().to_string(),
        strings: conversion.types.count(LiteralKind::String),
        integers: conversion.types.count(LiteralKind::Integer),
        doubles: conversion.types.count(LiteralKind::Double),
        input_size,
        truncated: conversion.truncated,
    })
}

/// Convert files one after another, stopping at the first failure
pub fn convert_operation(inputs: &[PathBuf], options: &ConvertOptions) -> Result<ConvertResult> {
    let mut files = Vec::with_capacity(inputs.len());
    for input in inputs {
        files.push(convert_file(input, options)?);
    }

    Ok(ConvertResult {
        files,
        ledger: options.ledger_path.display().to_string(),
    })
}
