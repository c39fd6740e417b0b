use clap::{ArgGroup, Parser};
use js_converter_core::{validate_input, validate_out_dir, ConvertError};
use std::path::{Path, PathBuf};

use super::types::OutputFormat;

/// Convert interesting js files (e.g. from Fuzzilli) into format fuzzable by this AFL setup.
#[derive(Parser, Debug)]
#[command(name = "js-converter")]
#[command(author, version, long_about = None)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["in_place", "out_dir"])
))]
pub struct Cli {
    /// The file name(s) of interesting sample js files
    #[arg(value_name = "FILE", required = true, value_parser = parse_input_file)]
    pub files: Vec<PathBuf>,

    /// Write the output directly to the input file
    #[arg(short = 'i', long)]
    pub in_place: bool,

    /// Write converted files into this directory
    #[arg(short = 'o', long, value_name = "OUT_DIR", value_parser = parse_out_dir)]
    pub out_dir: Option<PathBuf>,

    /// Input size ledger to update (overrides js-converter.toml)
    #[arg(long, value_name = "PATH", env = "JS_CONVERTER_LEDGER")]
    pub ledger: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub output: OutputFormat,

    /// Suppress the summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_input_file(value: &str) -> Result<PathBuf, ConvertError> {
    validate_input(Path::new(value))
}

fn parse_out_dir(value: &str) -> Result<PathBuf, ConvertError> {
    validate_out_dir(Path::new(value))
}
