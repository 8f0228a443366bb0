use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use mmu::layout;

use crate::trace::ParseMode;

#[derive(Debug, Parser)]
#[command(name = "virtmem")]
#[command(version)]
#[command(about = "Replays a trace of logical addresses through a simulated TLB and demand-paged memory")]
pub struct Args {
    /// Backing store file holding the initial content of every logical page
    pub backing_store: PathBuf,

    /// Trace file with one decimal logical address per line
    pub trace: PathBuf,

    /// Reject malformed trace lines instead of reading them as 0
    #[arg(long)]
    pub strict: bool,

    /// Number of physical frames
    #[arg(long, default_value_t = layout::FRAME_COUNT, value_parser = parse_frames)]
    pub frames: usize,

    /// Print only the summary, not one record per address
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Returns how trace lines should be parsed.
    pub fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    /// Returns the log level selected by `-v`.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_frames(value: &str) -> Result<usize, String> {
    let frames: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a frame count"))?;
    if (1..=layout::FRAME_COUNT).contains(&frames) {
        Ok(frames)
    } else {
        Err(format!("frame count must be between 1 and {}", layout::FRAME_COUNT))
    }
}
