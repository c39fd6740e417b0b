//! Harness boilerplate appended after the rewritten program body.

use serde_json::{json, Value};
use std::fmt::Write;

use crate::literal::{LiteralKind, TypeSequence};

/// Name of the entry function every sample program defines
pub const ENTRY_FUNCTION: &str = "main";
/// Line that closes the entry function in the sample corpus
pub const END_OF_MAIN_SENTINEL: &str = "noDFG(main);";
/// Input vector read by every placeholder
pub const INPUT_VECTOR: &str = "afl_input";
/// Runtime-provided routine that builds fuzzer input for a type sequence
pub const INPUT_GENERATOR: &str = "getAFLInputArray";
/// Iterations run with default values before fuzz data is injected
pub const WARM_UP_ITERATIONS: u32 = 10_000;

/// Default value used for a literal kind during warm-up
pub fn default_value(kind: LiteralKind) -> Value {
    match kind {
        LiteralKind::String => json!("string"),
        LiteralKind::Integer => json!(1337),
        LiteralKind::Double => json!(13.37),
    }
}

pub fn default_inputs(types: &TypeSequence) -> Vec<Value> {
    types.iter().map(default_value).collect()
}

/// Build the final program text from the rewritten body and its type sequence
pub fn assemble(lines: &[String], types: &TypeSequence) -> String {
    let mut program = String::new();
    for line in lines {
        program.push_str(line);
        program.push('\n');
    }

    let tags = Value::Array(
        types
            .iter()
            .map(|kind| Value::String(kind.as_str().to_string()))
            .collect(),
    );
    let defaults = Value::Array(default_inputs(types));

    writeln!(program, "let {INPUT_VECTOR}_types = {tags}").unwrap();
    writeln!(program, "let {INPUT_VECTOR} = {defaults}").unwrap();
    writeln!(
        program,
        "for (var i = 0; i < {WARM_UP_ITERATIONS}; ++i) {ENTRY_FUNCTION}()"
    )
    .unwrap();
    writeln!(
        program,
        "{INPUT_VECTOR} = {INPUT_GENERATOR}({INPUT_VECTOR}_types);"
    )
    .unwrap();
    writeln!(program, "{ENTRY_FUNCTION}();").unwrap();

    program
}
