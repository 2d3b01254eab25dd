//! # `DataGym` Vocabulary Files
//!
//! GPT-2 was published as two files:
//! * ``encoder.json`` - a JSON object of ``{ token-string: id }``;
//! * ``vocab.bpe`` - merge rules, one ``left right`` pair per line, in rank order;
//!   the first line is a ``#version`` header, the last line is the trailer.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use serde_json::Value;

use crate::{
    errors::{BpeError, BpeResult},
    types::{SymbolPair, TokenType},
    vocab::{MergeRankTable, UnifiedBpeVocab, Vocabulary},
};

/// File name of the token/id map within a vocabulary directory.
pub const ENCODER_JSON_FILE: &str = "encoder.json";

/// File name of the merge rules within a vocabulary directory.
pub const VOCAB_BPE_FILE: &str = "vocab.bpe";

/// Parse an ``encoder.json`` document.
///
/// ## Returns
/// The ``(token, id)`` entries, in no particular order.
pub fn read_encoder_json<R: Read>(reader: R) -> BpeResult<Vec<(String, usize)>> {
    let value: Value = serde_json::from_reader(reader)?;
    let Value::Object(map) = value else {
        return Err(BpeError::Parse(
            "encoder.json: expected a top-level object".to_string(),
        ));
    };

    let entries = map
        .into_iter()
        .map(|(token, id)| match id.as_u64() {
            Some(id) => usize::try_from(id)
                .map(|id| (token, id))
                .map_err(|_| BpeError::TokenOutOfRange),
            None => Err(BpeError::Parse(format!(
                "encoder.json: id for {token:?} is not a non-negative integer: {id}"
            ))),
        })
        .collect::<BpeResult<Vec<_>>>()?;

    log::debug!("read {} encoder.json entries", entries.len());
    Ok(entries)
}

/// Parse a ``vocab.bpe`` document.
///
/// The content is split on ``\n``; the first (header) and last (trailer)
/// elements are dropped. A trailing ``\r`` is stripped from every line,
/// and blank lines are ignored.
///
/// ## Returns
/// The merges, in rank order.
pub fn read_vocab_bpe<R: Read>(mut reader: R) -> BpeResult<Vec<SymbolPair>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let lines: Vec<&str> = content.split('\n').collect();
    let body = match lines.len() {
        0..=2 => &[][..],
        n => &lines[1..n - 1],
    };

    let mut merges = Vec::with_capacity(body.len());
    for (idx, line) in body.iter().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }
        match line.split_once(' ') {
            Some((left, right)) if !left.is_empty() && !right.is_empty() => {
                merges.push((left.to_string(), right.to_string()))
            }
            _ => {
                return Err(BpeError::Parse(format!(
                    "vocab.bpe line {}: expected \"left right\", found {line:?}",
                    idx + 2
                )));
            }
        }
    }

    log::debug!("read {} vocab.bpe merges", merges.len());
    Ok(merges)
}

/// Count merge rules whose fused symbol is absent from the vocabulary.
///
/// Such rules produce symbols which will fail encoding with
/// [`BpeError::UnknownToken`] if they survive a reduction.
pub fn count_unmapped_merges<T: TokenType>(
    vocabulary: &Vocabulary<T>,
    ranks: &MergeRankTable,
) -> usize {
    ranks
        .sorted_pairs()
        .iter()
        .filter(|((left, right), _)| {
            let mut fused = String::with_capacity(left.len() + right.len());
            fused.push_str(left);
            fused.push_str(right);
            vocabulary.lookup_token(&fused).is_none()
        })
        .count()
}

/// Build a [`UnifiedBpeVocab`] from ``vocab.bpe`` and ``encoder.json`` readers.
pub fn read_datagym_vocab<T, VR, ER>(
    vocab_bpe_reader: VR,
    encoder_json_reader: ER,
) -> BpeResult<UnifiedBpeVocab<T>>
where
    T: TokenType,
    VR: Read,
    ER: Read,
{
    let ranks = MergeRankTable::from_merges(read_vocab_bpe(vocab_bpe_reader)?)?;
    let vocabulary = Vocabulary::from_usize_entries(read_encoder_json(encoder_json_reader)?)?;

    let unmapped = count_unmapped_merges(&vocabulary, &ranks);
    if unmapped > 0 {
        log::warn!("{unmapped} merge rules produce tokens missing from encoder.json");
    }

    Ok(UnifiedBpeVocab::new(vocabulary, ranks))
}

/// Load a [`UnifiedBpeVocab`] from a directory holding
/// [`ENCODER_JSON_FILE`] and [`VOCAB_BPE_FILE`].
pub fn load_datagym_dir<T, P>(dir: P) -> BpeResult<UnifiedBpeVocab<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    log::info!("loading GPT-2 vocabulary from {}", dir.display());

    let vocab_reader = BufReader::new(File::open(dir.join(VOCAB_BPE_FILE))?);
    let encoder_reader = BufReader::new(File::open(dir.join(ENCODER_JSON_FILE))?);

    read_datagym_vocab(vocab_reader, encoder_reader)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempdir::TempDir;

    use super::*;

    const VOCAB_BPE: &str = "#version: 0.2\nh e\nl l\nhe ll\nhell o\n";
    const ENCODER_JSON: &str =
        r#"{"h":0,"e":1,"l":2,"o":3,"he":4,"ll":5,"hell":6,"hello":7}"#;

    #[test]
    fn test_read_vocab_bpe() {
        let merges = read_vocab_bpe(VOCAB_BPE.as_bytes()).unwrap();
        assert_eq!(
            merges,
            vec![
                ("h".to_string(), "e".to_string()),
                ("l".to_string(), "l".to_string()),
                ("he".to_string(), "ll".to_string()),
                ("hell".to_string(), "o".to_string()),
            ]
        );
    }

    #[test]
    fn test_read_vocab_bpe_header_and_trailer() {
        // No trailing newline: the last merge line is the trailer.
        let merges = read_vocab_bpe("#version: 0.2\na b\nc d".as_bytes()).unwrap();
        assert_eq!(merges, vec![("a".to_string(), "b".to_string())]);

        // Trailing newline: the trailer is the empty tail, the last merge stays.
        let merges = read_vocab_bpe("#version: 0.2\na b\nc d\n".as_bytes()).unwrap();
        assert_eq!(merges.len(), 2);
        assert_eq!(merges[1], ("c".to_string(), "d".to_string()));

        // CRLF line endings.
        let merges = read_vocab_bpe("#version: 0.2\r\na b\r\nc d\r\n".as_bytes()).unwrap();
        assert_eq!(merges.len(), 2);
        assert_eq!(merges[1], ("c".to_string(), "d".to_string()));

        assert!(read_vocab_bpe("".as_bytes()).unwrap().is_empty());
        assert!(read_vocab_bpe("#version: 0.2\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_read_vocab_bpe_malformed() {
        let err = read_vocab_bpe("#version: 0.2\na b\nbad\n".as_bytes()).unwrap_err();
        match err {
            BpeError::Parse(msg) => assert!(msg.contains("line 3"), "{msg}"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_read_encoder_json() {
        let mut entries = read_encoder_json(ENCODER_JSON.as_bytes()).unwrap();
        entries.sort_by_key(|(_, id)| *id);
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[7], ("hello".to_string(), 7));

        assert!(matches!(
            read_encoder_json("[1, 2]".as_bytes()),
            Err(BpeError::Parse(_))
        ));
        assert!(matches!(
            read_encoder_json(r#"{"a": -1}"#.as_bytes()),
            Err(BpeError::Parse(_))
        ));
        assert!(matches!(
            read_encoder_json("{".as_bytes()),
            Err(BpeError::Json(_))
        ));
    }

    #[test]
    fn test_read_datagym_vocab() {
        let vocab: UnifiedBpeVocab<u32> =
            read_datagym_vocab(VOCAB_BPE.as_bytes(), ENCODER_JSON.as_bytes()).unwrap();

        assert_eq!(vocab.vocabulary().len(), 8);
        assert_eq!(vocab.ranks().len(), 4);
        assert_eq!(vocab.ranks().rank("hell", "o"), Some(3));
        assert_eq!(count_unmapped_merges(vocab.vocabulary(), vocab.ranks()), 0);
    }

    #[test]
    fn test_count_unmapped_merges() {
        let vocabulary = Vocabulary::<u32>::from_entries([("a", 0), ("b", 1)]).unwrap();
        let ranks = MergeRankTable::from_merges([("a", "b")]).unwrap();
        assert_eq!(count_unmapped_merges(&vocabulary, &ranks), 1);
    }

    #[test]
    fn test_load_datagym_dir() {
        let dir = TempDir::new("gpt2bpe").unwrap();

        File::create(dir.path().join(VOCAB_BPE_FILE))
            .unwrap()
            .write_all(VOCAB_BPE.as_bytes())
            .unwrap();
        File::create(dir.path().join(ENCODER_JSON_FILE))
            .unwrap()
            .write_all(ENCODER_JSON.as_bytes())
            .unwrap();

        let vocab: UnifiedBpeVocab<u16> = load_datagym_dir(dir.path()).unwrap();
        assert_eq!(vocab.vocabulary().lookup_token("hello"), Some(7));
    }

    #[test]
    fn test_load_datagym_dir_missing() {
        let dir = TempDir::new("gpt2bpe").unwrap();
        assert!(matches!(
            load_datagym_dir::<u32, _>(dir.path()),
            Err(BpeError::Io(_))
        ));
    }
}
