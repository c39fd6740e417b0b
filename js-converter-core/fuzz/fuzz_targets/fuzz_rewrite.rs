#![no_main]

use js_converter_core::{assemble, rewrite};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);
    let result = rewrite(&source);

    let placeholders: usize = result
        .lines
        .iter()
        .map(|line| line.matches("afl_input[").count())
        .sum();
    // Samples may already contain the input vector name
    if !source.contains("afl_input[") {
        assert_eq!(placeholders, result.types.len());
    }

    let _ = assemble(&result.lines, &result.types);
});
