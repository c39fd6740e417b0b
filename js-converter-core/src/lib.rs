#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod harness;
pub mod ledger;
pub mod literal;
pub mod lock;
pub mod operations;
pub mod output;
pub mod output_path;

pub use config::Config;
pub use error::{ConvertError, LockHolder};
pub use harness::{assemble, default_inputs, default_value};
pub use ledger::{byte_size, input_size, record_size, Ledger, DEFAULT_LEDGER_PATH};
pub use literal::{
    classify_line, rewrite, rewrite_line, rewrite_with, LineAction, LiteralKind, LoopGuardSet,
    Rewrite, TypeSequence,
};
pub use lock::LockFile;
pub use operations::{convert_file, convert_operation, convert_source, Conversion, ConvertOptions};
pub use output::{ConvertResult, ConvertedFile, OutputFormat, OutputFormatter};
pub use output_path::{
    resolve_output_path, validate_input, validate_out_dir, OutputTarget, DEFAULT_CONVERTED_SUFFIX,
};
