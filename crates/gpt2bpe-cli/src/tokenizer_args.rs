use std::{fs::File, io::BufReader, num::NonZeroUsize, sync::Arc};

use gpt2bpe::{Tokenizer, TokenizerOptions};

/// Tokenizer selection and configuration arg group.
#[derive(clap::Args, Debug)]
pub struct TokenizerArgs {
    /// Directory holding ``encoder.json`` and ``vocab.bpe``.
    #[arg(long, default_value = ".")]
    tokenizer_dir: String,

    /// JSON file of tokenizer options; flags below override it.
    #[arg(long)]
    options: Option<String>,

    /// Total reduction cache entries; 0 disables the cache.
    #[arg(long)]
    cache_capacity: Option<usize>,

    /// Limit on per-thread pools (regex clones, cache shards).
    #[arg(long)]
    max_pool: Option<NonZeroUsize>,

    /// Use rayon for batch encoding and decoding.
    #[arg(long)]
    parallel: bool,
}

impl TokenizerArgs {
    /// Resolve the tokenizer options.
    pub fn tokenizer_options(&self) -> Result<TokenizerOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.options {
            Some(path) => TokenizerOptions::from_json_reader(BufReader::new(File::open(path)?))?,
            None => TokenizerOptions::default(),
        };
        if let Some(cache_capacity) = self.cache_capacity {
            options.set_cache_capacity(cache_capacity);
        }
        if self.max_pool.is_some() {
            options.set_max_pool(self.max_pool);
        }
        if self.parallel {
            options.set_parallel(true);
        }
        Ok(options)
    }

    /// Load the tokenizer.
    pub fn load_tokenizer(&self) -> Result<Arc<Tokenizer<u32>>, Box<dyn std::error::Error>> {
        let options = self.tokenizer_options()?;
        log::info!("tokenizer dir: {}", self.tokenizer_dir);
        log::debug!("{options:?}");
        Ok(Tokenizer::from_dir(&self.tokenizer_dir, options)?)
    }
}
