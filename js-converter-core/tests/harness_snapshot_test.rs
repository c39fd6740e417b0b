use js_converter_core::{convert_source, LiteralKind};

const SAMPLE: &str = r#"function main() {
  var v0 = "hello";
  var v1 = 42;
  var v2 = 0;
  while (v2 < 10) {
    v2 = v2 + 1;
  }
  var v3 = [1.5, -3];
  // keep 7
}
noDFG(main);
main();
"#;

#[test]
fn test_sample_program_snapshot() {
    let conversion = convert_source(SAMPLE);

    insta::assert_snapshot!(conversion.program.trim_end(), @r###"
function main() {
  var v0 = afl_input[0] /* string */;
  var v1 = afl_input[1] /* integer */;
  var v2 = 0;
  while (v2 < 10) {
    v2 = v2 + 1;
  }
  var v3 = [afl_input[2] /* double */, afl_input[3] /* integer */];
  // keep 7
}
let afl_input_types = ["string","integer","double","integer"]
let afl_input = ["string",1337,13.37,1337]
for (var i = 0; i < 10000; ++i) main()
afl_input = getAFLInputArray(afl_input_types);
main();
"###);
}

#[test]
fn test_sample_program_types() {
    let conversion = convert_source(SAMPLE);
    assert!(conversion.truncated);
    assert_eq!(
        conversion.types.as_slice(),
        &[
            LiteralKind::String,
            LiteralKind::Integer,
            LiteralKind::Double,
            LiteralKind::Integer,
        ]
    );
}

#[test]
fn test_program_without_sentinel_is_not_truncated() {
    let conversion = convert_source("function main() {\n  var v1 = 1;\n}\nmain();\n");
    assert!(!conversion.truncated);
    // The trailing call is kept in front of the harness
    assert!(conversion
        .program
        .starts_with("function main() {\n  var v1 = afl_input[0] /* integer */;\n}\nmain();\nlet afl_input_types"));
}

#[test]
fn test_nothing_after_sentinel_survives() {
    let conversion = convert_source("var v1 = 1;\nnoDFG(main);\nvar marker = \"after\";\n");
    assert!(!conversion.program.contains("noDFG"));
    assert!(!conversion.program.contains("marker"));
    assert_eq!(conversion.types.len(), 1);
}
