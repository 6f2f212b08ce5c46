use super::RailsimOperation;
use clap::Parser;

/// command line tool preparing rail-only transit scenarios for micro-simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct RailsimApp {
    #[command(subcommand)]
    pub op: RailsimOperation,
}
