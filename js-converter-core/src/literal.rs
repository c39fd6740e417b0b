//! Literal classification and rewriting.
//!
//! Sample programs are scanned line by line. Every string, double and integer
//! literal that survives the exclusion rules is replaced by an indexed read from
//! the fuzzer input vector, e.g. `var v1 = 1337;` becomes
//! `var v1 = afl_input[0] /* integer */;`.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use crate::harness::{END_OF_MAIN_SENTINEL, INPUT_VECTOR};

static LOOP_GUARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"while \(([A-Za-z_$][A-Za-z0-9_$]*) ").expect("loop guard pattern is valid")
});

static STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?:\\"|[^"])*""#).expect("string pattern is valid"));

static DOUBLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+\.\d+(?:e[+-]\d+)?").expect("double pattern is valid"));

// The separator is kept so digits inside identifiers and the index of an
// already injected placeholder (`afl_input[3]`) are never picked up.
static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"( | \[|,|:|~)-?\d+").expect("integer pattern is valid"));

/// Kind of a replaced literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    String,
    Integer,
    Double,
}

impl LiteralKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Double => "double",
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered record of replaced literal kinds.
///
/// The position of an entry is the index its placeholder reads from the input
/// vector, so the sequence is append-only while a file is being rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeSequence {
    kinds: Vec<LiteralKind>,
}

impl TypeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a literal and return the placeholder that replaces it
    pub fn placeholder(&mut self, kind: LiteralKind) -> String {
        let index = self.kinds.len();
        self.kinds.push(kind);
        format!("{INPUT_VECTOR}[{index}] /* {kind} */")
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LiteralKind> + '_ {
        self.kinds.iter().copied()
    }

    pub fn as_slice(&self) -> &[LiteralKind] {
        &self.kinds
    }

    /// Number of recorded literals of the given kind
    pub fn count(&self, kind: LiteralKind) -> usize {
        self.kinds.iter().filter(|k| **k == kind).count()
    }
}

impl From<Vec<LiteralKind>> for TypeSequence {
    fn from(kinds: Vec<LiteralKind>) -> Self {
        Self { kinds }
    }
}

/// Identifiers used as `while` loop counters in a program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopGuardSet {
    names: BTreeSet<String>,
}

impl LoopGuardSet {
    /// Collect every identifier appearing as `while (<name> ` in the source
    pub fn from_source(source: &str) -> Self {
        let names = LOOP_GUARD_RE
            .captures_iter(source)
            .map(|caps| caps[1].to_string())
            .collect();
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// True when any guard name occurs anywhere in the line, even inside a longer identifier
    pub fn guards(&self, line: &str) -> bool {
        self.names.iter().any(|name| line.contains(name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// What the rewriter does with a single source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    /// End of the entry function reached, drop this line and everything after it
    Stop,
    /// Copy the line verbatim
    Keep,
    /// Replace literals in the line
    Rewrite,
}

pub fn classify_line(line: &str, loop_guards: &LoopGuardSet) -> LineAction {
    if line.trim() == END_OF_MAIN_SENTINEL {
        return LineAction::Stop;
    }

    let trimmed = line.trim_start();
    if trimmed.starts_with("//") || trimmed.starts_with("for") || loop_guards.guards(line) {
        LineAction::Keep
    } else {
        LineAction::Rewrite
    }
}

/// Replace the literals of one line, strings first, then doubles, then integers.
///
/// Each pass runs on the output of the previous one. Swapping the order would let
/// the integer pass pick up the digits of a double.
pub fn rewrite_line(line: &str, types: &mut TypeSequence) -> String {
    let line = STRING_RE.replace_all(line, |_: &Captures| types.placeholder(LiteralKind::String));
    let line = DOUBLE_RE.replace_all(&line, |_: &Captures| types.placeholder(LiteralKind::Double));
    let line = INTEGER_RE.replace_all(&line, |caps: &Captures| {
        format!("{}{}", &caps[1], types.placeholder(LiteralKind::Integer))
    });
    line.into_owned()
}

/// Result of rewriting a whole program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    pub lines: Vec<String>,
    pub types: TypeSequence,
    /// Whether the end-of-main sentinel cut the program short
    pub truncated: bool,
}

/// Rewrite a program with a fresh type sequence
pub fn rewrite(source: &str) -> Rewrite {
    rewrite_with(source, TypeSequence::new())
}

/// Rewrite a program, continuing the numbering of an existing type sequence
pub fn rewrite_with(source: &str, mut types: TypeSequence) -> Rewrite {
    let loop_guards = LoopGuardSet::from_source(source);
    let mut lines = Vec::new();
    let mut truncated = false;

    for line in source.lines() {
        match classify_line(line, &loop_guards) {
            LineAction::Stop => {
                truncated = true;
                break;
            },
            LineAction::Keep => lines.push(line.to_string()),
            LineAction::Rewrite => lines.push(rewrite_line(line, &mut types)),
        }
    }

    Rewrite {
        lines,
        types,
        truncated,
    }
}
