use std::error::Error as _;
use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use virtmem::{Args, console::Console};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            // Usage problems exit with 1, not clap's default of 2.
            let _ = err.print();
            return ExitCode::from(1);
        }
    };

    if let Err(err) = Console::init(args.log_level()) {
        eprintln!("warning: {err}");
    }

    let out = BufWriter::new(io::stdout().lock());
    match virtmem::run(&args, out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("run aborted: {err:?}");
            let mut message = err.to_string();
            let mut source = err.source();
            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            eprintln!("error: {message}");
            ExitCode::from(1)
        }
    }
}
