#![allow(missing_docs)]

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::Cli;

fn main() {
    // Enable backtraces unless a RUST_BACKTRACE value has already been explicitly provided.
    if std::env::var_os("RUST_BACKTRACE").is_none() {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    if let Err(err) = Cli::parse().run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
