use std::io;
use anyhow::Result;
use clap::Parser;
use log::error;
use crate::cli::Args;
use crate::initialization::init;
use crate::worker::run;

mod calendar;
mod cli;
mod config;
mod errors;
mod generators;
mod initialization;
mod labeler;
mod logging;
pub mod models;
mod worker;

fn main() -> Result<()> {
    let args = Args::parse();

    // If initialization fails we can't log, the error goes straight to stderr
    let config = init(&args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&config, &args.command, &mut out) {
        error!("Run failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
