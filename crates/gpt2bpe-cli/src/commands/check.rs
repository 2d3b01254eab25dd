use std::{fs, time::Instant};

use gpt2bpe::{TokenDecoder, TokenEncoder};

use crate::{logging::LogArgs, tokenizer_args::TokenizerArgs};

/// Args for the check command.
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Text file to round trip.
    text_file: String,

    /// File of whitespace-separated token ids the text must encode to.
    #[arg(long)]
    expected: Option<String>,

    #[command(flatten)]
    tokenizer: TokenizerArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl CheckArgs {
    /// Run the check command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let tokenizer = self.tokenizer.load_tokenizer()?;
        let text = fs::read_to_string(&self.text_file)?;

        let start = Instant::now();
        let tokens = tokenizer.try_encode(&text)?;
        let encode_time = start.elapsed();

        let start = Instant::now();
        let decoded = tokenizer.try_decode_to_string(&tokens)?;
        let decode_time = start.elapsed();

        if decoded != text {
            let at = text
                .char_indices()
                .zip(decoded.chars())
                .find(|((_, a), b)| a != b)
                .map(|((idx, _), _)| idx)
                .unwrap_or_else(|| text.len().min(decoded.len()));
            return Err(format!("round trip mismatch at byte {at} of {}", self.text_file).into());
        }

        if let Some(path) = &self.expected {
            let expected = read_token_ids(&fs::read_to_string(path)?)?;
            compare_tokens(&tokens, &expected)?;
            log::info!("{} tokens match {path}", expected.len());
        }

        // Line batches exercise the batch (and, with --parallel, rayon) paths.
        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        let start = Instant::now();
        let batch = tokenizer.try_encode_batch(&lines)?;
        let batch_time = start.elapsed();
        log::info!(
            "batch: {} lines, {} tokens in {batch_time:?}",
            lines.len(),
            batch.iter().map(Vec::len).sum::<usize>()
        );

        let bytes_per_token = if tokens.is_empty() {
            0.0
        } else {
            text.len() as f64 / tokens.len() as f64
        };
        println!(
            "ok: {} bytes, {} tokens ({bytes_per_token:.2} bytes/token); encode {encode_time:?}, decode {decode_time:?}",
            text.len(),
            tokens.len(),
        );
        Ok(())
    }
}

/// Parse whitespace-separated token ids.
fn read_token_ids(text: &str) -> Result<Vec<u32>, String> {
    text.split_whitespace()
        .map(|s| {
            s.parse::<u32>()
                .map_err(|err| format!("bad token id {s:?}: {err}"))
        })
        .collect()
}

/// Report the first position where `tokens` and `expected` disagree.
fn compare_tokens(
    tokens: &[u32],
    expected: &[u32],
) -> Result<(), String> {
    let Some(idx) = tokens
        .iter()
        .zip(expected)
        .position(|(a, b)| a != b)
        .or_else(|| (tokens.len() != expected.len()).then_some(tokens.len().min(expected.len())))
    else {
        return Ok(());
    };
    Err(format!(
        "token mismatch at index {idx}: got {:?}, expected {:?} ({} vs {} tokens)",
        tokens.get(idx),
        expected.get(idx),
        tokens.len(),
        expected.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_token_ids() {
        assert_eq!(read_token_ids("31373 995\n220").unwrap(), vec![31373, 995, 220]);
        assert_eq!(read_token_ids("").unwrap(), Vec::<u32>::new());
        assert!(read_token_ids("1 two").is_err());
    }

    #[test]
    fn test_compare_tokens() {
        assert!(compare_tokens(&[1, 2, 3], &[1, 2, 3]).is_ok());

        let err = compare_tokens(&[1, 5, 3], &[1, 2, 3]).unwrap_err();
        assert!(err.starts_with("token mismatch at index 1"), "{err}");

        let err = compare_tokens(&[1, 2], &[1, 2, 3]).unwrap_err();
        assert!(err.starts_with("token mismatch at index 2"), "{err}");
        assert!(err.contains("got None, expected Some(3)"), "{err}");
    }
}
