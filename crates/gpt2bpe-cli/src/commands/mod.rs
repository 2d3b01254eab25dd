use crate::commands::{check::CheckArgs, decode::DecodeArgs, encode::EncodeArgs};

pub mod check;
pub mod decode;
pub mod encode;

/// Subcommands for gpt2bpe.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Encode text lines into space-separated token ids.
    Encode(EncodeArgs),

    /// Decode lines of space-separated token ids into text.
    Decode(DecodeArgs),

    /// Check that a text file survives an encode/decode round trip.
    Check(CheckArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
        }
    }
}
