//! # Dictionary Decoder

use std::sync::Arc;

use crate::{
    decoders::TokenDecoder,
    errors::BpeResult,
    types::TokenType,
    vocab::{ByteUnicodeCodec, UnifiedBpeVocab},
};

/// A decoder which maps each id back to its token string,
/// then inverts the byte/unicode codec.
#[derive(Clone, Debug)]
pub struct DictionaryDecoder<T: TokenType> {
    vocab: Arc<UnifiedBpeVocab<T>>,
    codec: ByteUnicodeCodec,
}

impl<T: TokenType> DictionaryDecoder<T> {
    /// Build a decoder over a shared vocabulary.
    pub fn from_unified_vocab(vocab: Arc<UnifiedBpeVocab<T>>) -> Self {
        Self {
            vocab,
            codec: ByteUnicodeCodec::default(),
        }
    }

    /// The shared vocabulary.
    pub fn vocab(&self) -> &Arc<UnifiedBpeVocab<T>> {
        &self.vocab
    }
}

impl<T: TokenType> TokenDecoder<T> for DictionaryDecoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens, buf)))]
    fn try_decode_append(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> BpeResult<()> {
        let vocabulary = self.vocab.vocabulary();
        for &id in tokens {
            let token = vocabulary.try_id_token(id)?;
            self.codec.decode_append(token, buf)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        encoders::{BpeTokenEncoder, TokenEncoder},
        errors::BpeError,
        types::{check_is_send, check_is_sync},
        vocab::{
            MergeRankTable,
            Vocabulary,
            testing::{build_hello_vocab, build_test_vocab},
        },
    };

    #[test]
    fn test_hello() {
        let vocab: Arc<UnifiedBpeVocab<u32>> = Arc::new(build_hello_vocab());
        let decoder = DictionaryDecoder::from_unified_vocab(vocab);
        check_is_send(&decoder);
        check_is_sync(&decoder);

        assert_eq!(decoder.try_decode_to_string(&[7]).unwrap(), "hello");
        assert_eq!(decoder.try_decode_to_string(&[6, 3, 4]).unwrap(), "hellohe");
        assert_eq!(decoder.try_decode_to_string(&[]).unwrap(), "");
    }

    #[test]
    fn test_unknown_id() {
        let vocab: Arc<UnifiedBpeVocab<u32>> = Arc::new(build_hello_vocab());
        let decoder = DictionaryDecoder::from_unified_vocab(vocab);
        match decoder.try_decode_to_bytes(&[0, 999]) {
            Err(BpeError::UnknownId { id }) => assert_eq!(id, 999),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_unmapped_char() {
        // "\u{0100}" is the stand-in for byte 0x00; "\u{4e00}" is not a stand-in.
        let vocabulary =
            Vocabulary::<u32>::from_entries([("\u{0100}", 0), ("\u{4e00}", 1)]).unwrap();
        let vocab = Arc::new(UnifiedBpeVocab::new(vocabulary, MergeRankTable::default()));
        let decoder = DictionaryDecoder::from_unified_vocab(vocab);

        assert_eq!(decoder.try_decode_to_bytes(&[0]).unwrap(), vec![0u8]);
        assert!(matches!(
            decoder.try_decode_to_bytes(&[1]),
            Err(BpeError::UnmappedChar { ch: '\u{4e00}' })
        ));
    }

    #[test]
    fn test_partial_utf8() {
        let vocab: Arc<UnifiedBpeVocab<u32>> = Arc::new(build_test_vocab());
        let encoder = BpeTokenEncoder::new(vocab.clone(), 0, None).unwrap();
        let decoder = DictionaryDecoder::from_unified_vocab(vocab);

        // "\u{e9}" is two bytes, and two single-byte tokens in this vocab.
        let tokens = encoder.try_encode("\u{e9}").unwrap();
        assert_eq!(tokens.len(), 2);

        assert_eq!(decoder.try_decode_to_bytes(&tokens[..1]).unwrap(), vec![0xC3]);
        assert!(matches!(
            decoder.try_decode_to_string(&tokens[..1]),
            Err(BpeError::InvalidUtf8(_))
        ));
        assert_eq!(
            decoder.try_decode_to_string_lossy(&tokens[..1]).unwrap(),
            "\u{fffd}"
        );
        assert_eq!(decoder.try_decode_to_string(&tokens).unwrap(), "\u{e9}");
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            "hello world",
            "hello san francisco",
            "it's not the heat, it's the salt",
            "the cat ate all the fish.\n\n  \t tabs\r\n",
            "\u{1f600} caf\u{e9} \u{4f60}\u{597d}",
        ];

        let vocab: Arc<UnifiedBpeVocab<u16>> = Arc::new(build_test_vocab());
        let encoder = BpeTokenEncoder::new(vocab.clone(), 64, None).unwrap();
        let decoder = DictionaryDecoder::from_unified_vocab(vocab);

        let batch = encoder.try_encode_batch(&samples).unwrap();
        let refs: Vec<&[u16]> = batch.iter().map(Vec::as_slice).collect();
        assert_eq!(decoder.try_decode_batch_to_strings(&refs).unwrap(), samples);
        assert_eq!(
            decoder.try_decode_batch_to_bytes(&refs).unwrap(),
            samples.iter().map(|s| s.as_bytes().to_vec()).collect::<Vec<_>>()
        );
    }
}
