//! # Text Segmentor

use core::{num::NonZeroUsize, ops::Range};

use crate::{
    concurrency::PoolToy,
    errors::BpeResult,
    regex::{GPT2_PATTERN, RegexWrapper, RegexWrapperPattern},
};

/// Expected bytes per chunk; used for buffer pre-sizing.
pub const EXPECTED_BYTES_PER_CHUNK: f32 = 4.0;

/// Chunk reference for [`TextSegmentor`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpanRef {
    /// A pattern match.
    Word(Range<usize>),

    /// Text between matches, not covered by the pattern.
    Gap(Range<usize>),
}

impl SpanRef {
    /// The byte range of this span.
    pub fn range(&self) -> &Range<usize> {
        match self {
            SpanRef::Word(range) => range,
            SpanRef::Gap(range) => range,
        }
    }
}

impl From<SpanRef> for Range<usize> {
    fn from(span: SpanRef) -> Self {
        match span {
            SpanRef::Word(range) => range,
            SpanRef::Gap(range) => range,
        }
    }
}

/// Pretokenizer: splits text into chunks with a regex pattern.
///
/// The compiled regex is cloned per thread slot, so concurrent callers
/// do not contend on the regex's interior scratch buffers.
///
/// With [`GPT2_PATTERN`], whitespace runs are cut out before the regex runs.
/// The pattern's `\s+(?!\S)` backtracks once per run character, and a long
/// enough run exhausts the `fancy_regex` backtrack stack. The cut reproduces
/// the pattern's own split: a run followed by text yields all but its last
/// char, which starts the next chunk; a run ending the text is one chunk.
#[derive(Clone, Debug)]
pub struct TextSegmentor {
    regex_pool: PoolToy<RegexWrapper>,
    whitespace_runs: bool,
}

impl TextSegmentor {
    /// Compile a segmentor from a pattern.
    ///
    /// ## Arguments
    /// * `pattern` - The chunk split pattern.
    /// * `max_pool` - The maximum size of the regex pool; if None, lib defaults are used.
    pub fn from_pattern<P>(
        pattern: P,
        max_pool: Option<NonZeroUsize>,
    ) -> BpeResult<Self>
    where
        P: Into<RegexWrapperPattern>,
    {
        let regex = pattern.into().compile()?;
        Ok(Self::init(regex, max_pool))
    }

    /// Create a segmentor from a compiled regex.
    pub fn init(
        regex: RegexWrapper,
        max_pool: Option<NonZeroUsize>,
    ) -> Self {
        let whitespace_runs = regex.as_str() == GPT2_PATTERN.as_str();
        Self {
            regex_pool: PoolToy::init(regex, max_pool),
            whitespace_runs,
        }
    }

    /// Are whitespace runs split outside the regex?
    pub fn splits_whitespace_runs(&self) -> bool {
        self.whitespace_runs
    }

    /// Get the split regex for the current thread.
    pub fn regex(&self) -> &RegexWrapper {
        self.regex_pool.get()
    }

    /// Visit every span of `text`, in order.
    ///
    /// Every byte of `text` is covered by exactly one span;
    /// bytes the pattern skips are reported as [`SpanRef::Gap`].
    pub fn for_each_span<F>(
        &self,
        text: &str,
        mut f: F,
    ) -> BpeResult<()>
    where
        F: FnMut(SpanRef) -> BpeResult<()>,
    {
        if !self.whitespace_runs {
            return self.for_each_match(text, 0..text.len(), &mut f);
        }

        // Start of the text not yet handed out.
        let mut pending = 0;
        let mut pos = 0;
        while let Some(Range { start, end }) = next_whitespace_run(text, pos) {
            self.for_each_match(text, pending..start, &mut f)?;
            if end == text.len() {
                f(SpanRef::Word(start..end))?;
                return Ok(());
            }
            let last = text[..end]
                .char_indices()
                .next_back()
                .map_or(start, |(idx, _)| idx);
            if start < last {
                f(SpanRef::Word(start..last))?;
            }
            pending = last;
            pos = end;
        }
        self.for_each_match(text, pending..text.len(), &mut f)
    }

    /// Run the regex over `text[range]`, reporting spans in `text` offsets.
    fn for_each_match<F>(
        &self,
        text: &str,
        range: Range<usize>,
        f: &mut F,
    ) -> BpeResult<()>
    where
        F: FnMut(SpanRef) -> BpeResult<()>,
    {
        let base = range.start;
        let mut last = base;
        for m in self.regex().find_iter(&text[range.clone()]) {
            let Range { start, end } = m?;
            if start == end {
                continue;
            }
            let (start, end) = (base + start, base + end);
            if last < start {
                f(SpanRef::Gap(last..start))?;
            }
            f(SpanRef::Word(start..end))?;
            last = end;
        }
        if last < range.end {
            f(SpanRef::Gap(last..range.end))?;
        }
        Ok(())
    }

    /// Split text into spans.
    pub fn split_spans(
        &self,
        text: &str,
    ) -> BpeResult<Vec<SpanRef>> {
        let capacity = text.len() as f32 / EXPECTED_BYTES_PER_CHUNK;
        let mut spans = Vec::with_capacity(capacity as usize);
        self.for_each_span(text, |span| {
            spans.push(span);
            Ok(())
        })?;
        Ok(spans)
    }

    /// Split text into chunk slices.
    pub fn split_chunks<'t>(
        &self,
        text: &'t str,
    ) -> BpeResult<Vec<&'t str>> {
        Ok(self
            .split_spans(text)?
            .into_iter()
            .map(|span| &text[Range::from(span)])
            .collect())
    }
}

/// The next maximal run of whitespace at or after `from`.
fn next_whitespace_run(
    text: &str,
    from: usize,
) -> Option<Range<usize>> {
    let start = from + text[from..].find(char::is_whitespace)?;
    let end = text[start..]
        .find(|c: char| !c.is_whitespace())
        .map_or(text.len(), |idx| start + idx);
    Some(start..end)
}
