//! # Byte/Unicode Codec
//!
//! GPT-2 vocabularies are stored as text; but the tokenizer operates on raw bytes.
//! Every byte is therefore given a printable stand-in character:
//!
//! * ``[0x21-0x7E]``, ``[0xA1-0xAC]``, ``[0xAE-0xFF]`` map to themselves
//!   (ISO/IEC 8859-1 printable, non-whitespace);
//! * the remaining 68 bytes (controls, space, ``0x7F-0xA0``, soft hyphen ``0xAD``)
//!   map to ``U+0100`` onwards, in ascending byte order.
//!
//! ```rust
//! use gpt2bpe::vocab::ByteUnicodeCodec;
//!
//! let codec = ByteUnicodeCodec::default();
//! assert_eq!(codec.encode_bytes(b" hello"), "\u{0120}hello");
//! assert_eq!(codec.decode_text("\u{0120}hello").unwrap(), b" hello");
//! ```

use core::fmt::Debug;

use crate::{
    errors::{BpeError, BpeResult},
    types::WCHashMap,
};

/// Number of bytes which do not map to themselves.
pub const REMAPPED_BYTE_COUNT: usize = 68;

/// First code point used for remapped bytes.
pub const REMAPPED_BASE: u32 = 0x100;

/// Is this byte printable (and not whitespace) as an ISO/IEC 8859-1 character?
#[inline(always)]
pub const fn is_printable_byte(byte: u8) -> bool {
    matches!(byte, 0x21..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF)
}

/// ``0..=255`` Byte/Char Bijection Table.
///
/// Built once per value; encoders and decoders hold their own copy.
#[derive(Clone, PartialEq)]
pub struct ByteUnicodeCodec {
    /// Table mapping from byte ordinal (position) to char.
    byte_chars: [char; 256],

    /// Hash map from char to byte ordinal value.
    char_bytes: WCHashMap<char, u8>,
}

impl Debug for ByteUnicodeCodec {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ByteUnicodeCodec")
            .field("remapped", &REMAPPED_BYTE_COUNT)
            .finish()
    }
}

impl Default for ByteUnicodeCodec {
    fn default() -> Self {
        let mut byte_chars = ['\0'; 256];

        let mut n = 0u32;
        for b in 0..=255u8 {
            byte_chars[b as usize] = if is_printable_byte(b) {
                char::from(b)
            } else {
                let c = char::from_u32(REMAPPED_BASE + n)
                    .expect("U+0100..U+0144 are valid scalar values");
                n += 1;
                c
            };
        }
        debug_assert_eq!(n as usize, REMAPPED_BYTE_COUNT);

        let char_bytes: WCHashMap<char, u8> = byte_chars
            .iter()
            .enumerate()
            .map(|(b, &c)| (c, b as u8))
            .collect();
        debug_assert_eq!(char_bytes.len(), 256);

        Self {
            byte_chars,
            char_bytes,
        }
    }
}

impl ByteUnicodeCodec {
    /// Get the byte-ord => char table.
    pub fn byte_chars(&self) -> &[char; 256] {
        &self.byte_chars
    }

    /// Get the char corresponding to a byte.
    #[inline(always)]
    pub fn char_for_byte(
        &self,
        byte: u8,
    ) -> char {
        self.byte_chars[byte as usize]
    }

    /// Get the byte corresponding to a char, if any.
    #[inline(always)]
    pub fn byte_for_char(
        &self,
        ch: char,
    ) -> Option<u8> {
        self.char_bytes.get(&ch).copied()
    }

    /// Map raw bytes to their stand-in characters.
    ///
    /// No UTF-8 validity is assumed of `bytes`.
    pub fn encode_bytes(
        &self,
        bytes: &[u8],
    ) -> String {
        bytes.iter().map(|&b| self.char_for_byte(b)).collect()
    }

    /// Append the encoded form of `bytes` to a target string.
    #[inline(always)]
    pub fn encode_append(
        &self,
        bytes: &[u8],
        out: &mut String,
    ) {
        out.extend(bytes.iter().map(|&b| self.char_for_byte(b)));
    }

    /// Append one single-char symbol per byte to `symbols`.
    ///
    /// This is the seed sequence of a reduction.
    pub fn append_symbols(
        &self,
        bytes: &[u8],
        symbols: &mut Vec<String>,
    ) {
        symbols.extend(bytes.iter().map(|&b| self.char_for_byte(b).to_string()));
    }

    /// Invert [`Self::encode_bytes`].
    ///
    /// ## Returns
    /// The raw bytes, or [`BpeError::UnmappedChar`] for the first char
    /// which the codec never produces.
    pub fn decode_text(
        &self,
        text: &str,
    ) -> BpeResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(text.len());
        self.decode_append(text, &mut buf)?;
        Ok(buf)
    }

    /// Decode `text` appending the raw bytes to `buf`.
    pub fn decode_append(
        &self,
        text: &str,
        buf: &mut Vec<u8>,
    ) -> BpeResult<()> {
        for ch in text.chars() {
            match self.byte_for_char(ch) {
                Some(b) => buf.push(b),
                None => return Err(BpeError::UnmappedChar { ch }),
            }
        }
        Ok(())
    }
}
