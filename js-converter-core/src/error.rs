use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating conversion inputs and shared state
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("\"{}\" is not a valid file.", .0.display())]
    NotAFile(PathBuf),

    #[error("\"{}\" is not a valid JavaScript file.", .0.display())]
    NotJavaScript(PathBuf),

    #[error("\"{}\" is not a valid directory.", .0.display())]
    NotADirectory(PathBuf),

    #[error(
        "Another js-converter process is updating the ledger (PID: {holder}). \
         If this is incorrect, remove the lock file at: {}",
        .path.display()
    )]
    LedgerLocked { path: PathBuf, holder: LockHolder },
}

/// Process holding a lock, unknown while the holder has not written its PID yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockHolder(pub Option<u32>);

impl fmt::Display for LockHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(pid) => write!(f, "{pid}"),
            None => f.write_str("unknown"),
        }
    }
}
