use js_converter_core::{rewrite, LoopGuardSet};

#[test]
fn test_loop_counter_lines_are_left_alone() {
    let source = "var v2 = 0;\nwhile (v2 < 10) {\n  v2 = v2 + 5;\n}\nvar v3 = 5;\n";
    let result = rewrite(source);

    assert_eq!(
        result.lines,
        vec![
            "var v2 = 0;",
            "while (v2 < 10) {",
            "  v2 = v2 + 5;",
            "}",
            "var v3 = afl_input[0] /* integer */;",
        ]
    );
    assert_eq!(result.types.len(), 1);
}

#[test]
fn test_guard_matches_as_substring() {
    // v1 is a guard, so v10 lines are protected as well
    let source = "while (v1 < 3) {\nvar v10 = 7;\nvar v20 = 7;\n";
    let result = rewrite(source);

    assert_eq!(result.lines[1], "var v10 = 7;");
    assert_eq!(result.lines[2], "var v20 = afl_input[0] /* integer */;");
}

#[test]
fn test_guard_defined_after_use_still_applies() {
    let source = "var count = 100;\nwhile (count > 0) {\n";
    let result = rewrite(source);

    assert_eq!(result.lines[0], "var count = 100;");
    assert!(result.types.is_empty());
}

#[test]
fn test_for_loops_and_comments_are_skipped() {
    let source = "for (let v5 = 0; v5 < 100; v5++) {\n// var v6 = 3;\n  format(\"x\", 1);\n";
    let result = rewrite(source);

    assert_eq!(result.lines[0], "for (let v5 = 0; v5 < 100; v5++) {");
    assert_eq!(result.lines[1], "// var v6 = 3;");
    // Any line starting with `for` counts as a for-loop
    assert_eq!(result.lines[2], "  format(\"x\", 1);");
    assert!(result.types.is_empty());
}

#[test]
fn test_while_without_trailing_space_is_not_a_guard() {
    let guards = LoopGuardSet::from_source("while (v1) {\nwhile (v2< 3) {\n");
    assert!(guards.is_empty());
}
