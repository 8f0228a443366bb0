//! Trace file reader.
//!
//! A trace holds one decimal logical address per line. By default lines are parsed the way
//! C's `atoi` does: leading whitespace, an optional sign and the longest run of digits, with
//! everything else ignored and a line without digits reading as 0.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::warn;
use mmu::LogicalAddress;

use crate::Error;

/// How strictly trace lines are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// `atoi` semantics: never fails, malformed lines read as 0.
    #[default]
    Lenient,
    /// Every line must be a plain non-negative decimal integer.
    Strict,
}

/// One address read from the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    /// 1-based line number.
    pub line: usize,
    /// The number as written in the trace, reported back unchanged.
    pub value: i64,
    pub address: LogicalAddress,
}

/// Result of reading a line with `atoi` semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lenient {
    pub value: i32,
    /// Whether the whole line was a well-formed integer.
    pub clean: bool,
}

/// Parses `line` with `atoi` semantics. Overflow wraps in 32-bit two's complement.
pub fn parse_lenient(line: &[u8]) -> Lenient {
    let trimmed = line.trim_ascii_start();
    let (negative, rest) = match trimmed.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, trimmed),
    };

    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    let magnitude = rest[..digits].iter().fold(0i32, |acc, &digit| {
        acc.wrapping_mul(10).wrapping_add(i32::from(digit - b'0'))
    });
    let value = if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    };

    Lenient {
        value,
        clean: digits > 0 && rest[digits..].trim_ascii().is_empty(),
    }
}

/// Parses `line` as a plain non-negative decimal integer.
pub fn parse_strict(line: &[u8]) -> Option<u32> {
    let text = std::str::from_utf8(line).ok()?.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Iterator over the addresses of a trace.
pub struct TraceReader<R> {
    lines: std::io::Split<R>,
    mode: ParseMode,
    line: usize,
    path: PathBuf,
}

impl TraceReader<BufReader<File>> {
    /// Opens the trace file at `path`.
    pub fn open(path: &Path, mode: ParseMode) -> Result<Self, Error> {
        let file = File::open(path).map_err(|source| Error::OpenTrace {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), path, mode))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Reads a trace from `reader`; `path` is only used in error messages.
    pub fn new(reader: R, path: &Path, mode: ParseMode) -> Self {
        Self {
            lines: reader.split(b'\n'),
            mode,
            line: 0,
            path: path.to_path_buf(),
        }
    }

    fn parse(&self, bytes: &[u8]) -> Result<TraceEntry, Error> {
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

        let value = match self.mode {
            ParseMode::Strict => {
                i64::from(parse_strict(bytes).ok_or_else(|| Error::TraceParse {
                    line: self.line,
                    text: String::from_utf8_lossy(bytes).into_owned(),
                })?)
            }
            ParseMode::Lenient => {
                let parsed = parse_lenient(bytes);
                if !parsed.clean {
                    warn!(
                        "{}:{}: {:?} is not a plain integer, reading it as {}",
                        self.path.display(),
                        self.line,
                        String::from_utf8_lossy(bytes),
                        parsed.value
                    );
                }
                i64::from(parsed.value)
            }
        };

        Ok(TraceEntry {
            line: self.line,
            value,
            address: LogicalAddress::new(value as u32),
        })
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEntry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = match self.lines.next()? {
            Ok(bytes) => bytes,
            Err(source) => {
                return Some(Err(Error::ReadTrace {
                    path: self.path.clone(),
                    source,
                }));
            }
        };
        self.line += 1;
        Some(self.parse(&bytes))
    }
}
