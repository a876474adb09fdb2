//! Command line entrypoint.

use crate::{
    commands::{decode, node},
    logging,
};
use clap::{ArgAction, Parser, Subcommand};

/// Decode and fetch beacon chain blocks.
#[derive(Debug, Parser)]
#[command(author, version, about = "Beacon block decoder", long_about = None)]
pub(crate) struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Log verbosity. Repeat for more output (-v debug, -vv trace).
    ///
    /// Ignored when `RUST_LOG` is set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub(crate) verbosity: u8,
}

impl Cli {
    /// Installs logging and runs the selected command.
    pub(crate) fn run(self) -> eyre::Result<()> {
        logging::init(self.verbosity)?;
        match self.command {
            Commands::Decode(command) => command.execute(),
            Commands::Block(command) => run_until_done(command.execute()),
            Commands::Balance(command) => run_until_done(command.execute()),
            Commands::ChainId(command) => run_until_done(command.execute()),
        }
    }
}

fn run_until_done<F>(fut: F) -> eyre::Result<()>
where
    F: std::future::Future<Output = eyre::Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(fut)
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Decode a block message read from a file or stdin
    #[command(name = "decode")]
    Decode(decode::Command),
    /// Fetch and decode a block from a beacon node
    #[command(name = "block")]
    Block(node::BlockCommand),
    /// Print the balance of a validator in Gwei
    #[command(name = "balance")]
    Balance(node::BalanceCommand),
    /// Print the chain id of a beacon node
    #[command(name = "chain-id")]
    ChainId(node::ChainIdCommand),
}
