//! Per-access records and the end-of-run summary.

use std::io::{self, Write};

use mmu::{Statistics, Translation};

use crate::trace::TraceEntry;

/// Writes the run's report to `out`.
pub struct Report<W> {
    out: W,
    per_access: bool,
}

impl<W: Write> Report<W> {
    /// Creates a report. With `per_access` off only the summary is written.
    pub fn new(out: W, per_access: bool) -> Self {
        Self { out, per_access }
    }

    /// Writes the record for one translated trace entry.
    pub fn access(&mut self, entry: &TraceEntry, translation: &Translation) -> io::Result<()> {
        if !self.per_access {
            return Ok(());
        }
        writeln!(self.out, "Accessing logical: {}", translation.page)?;
        writeln!(
            self.out,
            "Virtual address: {} Physical address: {} Value: {}",
            entry.value, translation.physical, translation.value
        )
    }

    /// Writes the summary and flushes the output.
    pub fn summary(&mut self, stats: &Statistics) -> io::Result<()> {
        writeln!(self.out, "Number of Translated Addresses = {}", stats.translations)?;
        writeln!(self.out, "Page Faults = {}", stats.page_faults)?;
        writeln!(self.out, "Page Fault Rate = {:.3}", stats.fault_rate())?;
        writeln!(self.out, "TLB Hits = {}", stats.tlb_hits)?;
        writeln!(self.out, "TLB Hit Rate = {:.3}", stats.hit_rate())?;
        self.out.flush()
    }
}
