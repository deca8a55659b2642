//! Headless runner: reads the trace protocol on stdin, writes JSON lines.
//!
//! ```text
//! $ printf 'moveLeft\nhardDrop\nsnapshot\n' | blockfall-trace --seed 7
//! ```

use std::io::{self, BufWriter};

use anyhow::Result;

use blockfall::config::parse_args;
use blockfall::trace::TraceDriver;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    let mut driver = TraceDriver::new(config.resolve_seed());
    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    driver.run(stdin.lock(), &mut out)
}
