//! Persisted record of the input buffer size each converted harness needs.
//!
//! The ledger is a single JSON object mapping output paths to byte sizes. Every
//! update loads the whole record, replaces one key and writes it back, under a
//! [`LockFile`] and through an atomic rename.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions, Permissions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::literal::{LiteralKind, TypeSequence};
use crate::lock::LockFile;

/// Ledger location used when nothing else is configured
pub const DEFAULT_LEDGER_PATH: &str = ".afl_input_sizes.json";

/// Bytes the fuzzer reserves for one literal of the given kind
pub fn byte_size(kind: LiteralKind) -> u64 {
    match kind {
        LiteralKind::String => 10,
        LiteralKind::Integer => 2,
        LiteralKind::Double => 8,
    }
}

/// Total input buffer size for a type sequence
pub fn input_size(types: &TypeSequence) -> u64 {
    types.iter().map(byte_size).sum()
}

#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
    entries: BTreeMap<String, u64>,
}

impl Ledger {
    /// Load the ledger at `path`.
    ///
    /// A missing, empty or unparsable record (including one that is not UTF-8)
    /// yields an empty ledger. Other read failures are returned.
    pub fn load(path: &Path) -> Result<Self> {
        let entries = match fs::read(path) {
            Ok(content) => match serde_json::from_slice(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    if !content.iter().all(u8::is_ascii_whitespace) {
                        warn!(path = %path.display(), error = %e, "discarding unreadable ledger");
                    }
                    BTreeMap::new()
                },
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read ledger: {}", path.display()));
            },
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }

    pub fn set(&mut self, key: impl Into<String>, size: u64) {
        self.entries.insert(key.into(), size);
    }

    pub fn entries(&self) -> &BTreeMap<String, u64> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the whole ledger, sorted by key with 4-space indentation
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries
            .serialize(&mut serializer)
            .context("Failed to serialize ledger")?;
        buf.push(b'\n');

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary ledger in {}", dir.display()))?;
        tmp.write_all(&buf)
            .with_context(|| format!("Failed to write ledger: {}", self.path.display()))?;
        tmp.as_file()
            .set_permissions(self.target_permissions()?)
            .with_context(|| format!("Failed to set ledger permissions: {}", self.path.display()))?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace ledger: {}", self.path.display()))?;

        Ok(())
    }

    /// Permissions the saved ledger should carry: those of the current record,
    /// or the umask default for a new one.
    fn target_permissions(&self) -> Result<Permissions> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.permissions()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(false)
                    .open(&self.path)
                    .with_context(|| format!("Failed to create ledger: {}", self.path.display()))?;
                Ok(file.metadata()?.permissions())
            },
            Err(e) => {
                Err(e).with_context(|| format!("Failed to inspect ledger: {}", self.path.display()))
            },
        }
    }
}

/// Ledger key for an output path
pub fn ledger_key(output_path: &Path) -> String {
    output_path.to_string_lossy().into_owned()
}

/// Record the input size of `output_path` in the ledger at `ledger_path`.
///
/// Returns the stored size. Entries for other outputs are left untouched.
pub fn record_size(ledger_path: &Path, output_path: &Path, types: &TypeSequence) -> Result<u64> {
    let lock = LockFile::acquire(ledger_path)?;

    let mut ledger = Ledger::load(ledger_path)?;
    let size = input_size(types);
    let key = ledger_key(output_path);
    debug!(ledger = %ledger_path.display(), key = %key, size, "recording input size");
    ledger.set(key, size);
    ledger.save()?;

    lock.release()?;
    Ok(size)
}
