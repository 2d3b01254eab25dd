use std::io::{BufRead, Write};

use gpt2bpe::{TokenDecoder, Tokenizer};

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    tokenizer_args::TokenizerArgs,
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    tokenizer: TokenizerArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let tokenizer = self.tokenizer.load_tokenizer()?;
        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        decode_lines(&mut reader, &mut writer, &tokenizer)
    }
}

/// Decode each line of ids; the text carries its own line endings.
fn decode_lines(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    tokenizer: &Tokenizer<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    for (lineno, line) in reader.lines().enumerate() {
        let tokens = line?
            .split_whitespace()
            .map(|s| {
                s.parse::<u32>()
                    .map_err(|err| format!("line {}: bad token id {s:?}: {err}", lineno + 1))
            })
            .collect::<Result<Vec<u32>, _>>()?;

        let text = tokenizer.try_decode_to_string(&tokens)?;
        write!(writer, "{text}")?;
    }
    writer.flush()?;
    Ok(())
}
