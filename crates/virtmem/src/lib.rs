//! # virtmem
//!
//! Replays a trace of logical addresses through the [`mmu`] translation engine, printing
//! one record per address and a hit/fault summary at the end.

mod backing;
pub mod cli;
pub mod console;
mod error;
mod report;
pub mod trace;

use std::io::Write;

use log::info;
use mmu::{Mmu, Statistics, layout};

pub use backing::BackingFile;
pub use cli::Args;
pub use error::Error;
pub use report::Report;
pub use trace::{ParseMode, TraceEntry, TraceReader};

/// Runs one simulation as described by `args`, writing the report to `out`.
///
/// Both input files are opened before the first translation. Any error ends the run.
pub fn run<W: Write>(args: &Args, out: W) -> Result<Statistics, Error> {
    let backing = BackingFile::open(&args.backing_store)?;
    let trace = TraceReader::open(&args.trace, args.parse_mode())?;
    info!(
        "simulating {} pages of {} bytes over {} frames with a {}-entry TLB",
        layout::PAGE_COUNT,
        layout::PAGE_SIZE,
        args.frames,
        layout::TLB_ENTRIES
    );

    let mut mmu = Mmu::with_frames(&backing, args.frames);
    let mut report = Report::new(out, !args.quiet);

    for entry in trace {
        let entry = entry?;
        let translation = mmu
            .translate(entry.address)
            .map_err(|source| Error::Translate {
                line: entry.line,
                source,
            })?;
        report.access(&entry, &translation)?;
    }

    let stats = *mmu.stats();
    report.summary(&stats)?;
    info!(
        "translated {} addresses: {} TLB hits, {} page table hits, {} page faults, {} frames in use",
        stats.translations,
        stats.tlb_hits,
        stats.page_table_hits,
        stats.page_faults,
        mmu.frames_in_use()
    );

    Ok(stats)
}
