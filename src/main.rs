use anyhow::Result;
use clap::Parser;
use tracing::error;

use chatstat::{analysis, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    match analysis::run_chat_analysis(&args) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(error = %e, "Error");
            std::process::exit(1);
        }
    }
}
