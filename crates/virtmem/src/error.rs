use std::io;
use std::path::PathBuf;

use mmu::TranslateError;
use thiserror::Error;

/// Everything that can abort a run. None of these are retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open backing store {}", path.display())]
    OpenBackingStore {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("backing store {} is {len} bytes, expected at least {expected}", path.display())]
    BackingStoreSize {
        path: PathBuf,
        len: u64,
        expected: usize,
    },

    #[error("cannot open trace {}", path.display())]
    OpenTrace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read trace {}", path.display())]
    ReadTrace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("trace line {line}: {text:?} is not a logical address")]
    TraceParse { line: usize, text: String },

    #[error("trace line {line}")]
    Translate {
        line: usize,
        #[source]
        source: TranslateError,
    },

    #[error("cannot write report")]
    Output(#[from] io::Error),
}
