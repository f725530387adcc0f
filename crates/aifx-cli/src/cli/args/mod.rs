use clap::{Parser, Subcommand};

pub mod container;
pub use container::*;

#[derive(Parser)]
#[command(
    name = "aifx",
    version,
    about = "Package audio into AIFM provenance containers and verify their integrity"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Package an audio file and its provenance into an .aifm container
    Convert(ConvertArgs),
    /// Print a container's manifest and attestation, then verify it
    Inspect(InspectArgs),
    /// Verify payload integrity against the checksum ledger
    Verify(VerifyArgs),
}
