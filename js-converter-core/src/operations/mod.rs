//! High-level operations that correspond to CLI commands
//!
//! These modules contain the file handling around the conversion core,
//! separated from CLI concerns like argument parsing and output formatting.

pub mod convert;

pub use convert::{convert_file, convert_operation, convert_source, Conversion, ConvertOptions};
