use std::ops::Range;

use base64_simd::URL_SAFE_NO_PAD as b64;

use crate::{
    JwtError,
    decoding::SplitJwt,
};

/// Handle to one decoded section inside a [`DecodeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    start: usize,
    end: usize,
}
impl From<Segment> for Range<usize> {
    fn from(value: Segment) -> Self {
        value.start..value.end
    }
}

/// Single buffer backing every base64-decoded section of one token.
///
/// Sections are appended in the order they are decoded, which lets the
/// decoder postpone payload decoding until the signature has been checked.
/// The buffer is sized up front for all three sections, so decoding never
/// reallocates, and it is released when the arena is dropped.
#[derive(Debug)]
pub struct DecodeArena {
    data: Vec<u8>,
}

impl DecodeArena {
    /// Allocates an arena large enough for every section of `parts`
    #[must_use]
    pub fn for_token(parts: &SplitJwt<'_>) -> Self {
        let data = Vec::with_capacity(
            b64.estimated_decoded_length(parts.b64_header().len())
                + b64.estimated_decoded_length(parts.b64_payload().len())
                + b64.estimated_decoded_length(parts.b64_signature().len()),
        );
        Self { data }
    }

    /// Decodes an unpadded base64url section into the arena.
    ///
    /// # Errors
    ///
    /// [`JwtError::InvalidEncoding`] when `encoded` is not unpadded base64url.
    /// The arena is left unchanged in that case.
    pub fn decode(&mut self, encoded: &[u8]) -> Result<Segment, JwtError> {
        let start = self.data.len();
        if b64.decode_append(encoded, &mut self.data).is_err() {
            self.data.truncate(start);
            return Err(JwtError::InvalidEncoding);
        }
        Ok(Segment {
            start,
            end: self.data.len(),
        })
    }

    /// Returns the decoded bytes of `segment`
    #[must_use]
    pub fn bytes(&self, segment: Segment) -> &[u8] {
        &self.data[Range::from(segment)]
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::{
        DecodeArena,
        JwtError,
        SplitJwt,
    };

    #[test]
    fn try_decode_valid_jwt_ok() {
        let parts = SplitJwt::try_from("e30.e30.U0lH").unwrap();
        let mut arena = DecodeArena::for_token(&parts);
        let header = arena.decode(parts.b64_header()).unwrap();
        let signature = arena.decode(parts.b64_signature()).unwrap();
        let claims = arena.decode(parts.b64_payload()).unwrap();
        assert_eq!(arena.bytes(header), b"{}");
        assert_eq!(arena.bytes(signature), b"SIG");
        assert_eq!(arena.bytes(claims), b"{}");
    }

    #[test]
    fn empty_section_decodes_empty() {
        let parts = SplitJwt::try_from("e30.e30.").unwrap();
        let mut arena = DecodeArena::for_token(&parts);
        let signature = arena.decode(parts.b64_signature()).unwrap();
        assert!(arena.bytes(signature).is_empty());
    }

    #[test]
    fn invalid_base64_rejected() {
        let parts = SplitJwt::try_from("=.e30.U0lH").unwrap();
        let mut arena = DecodeArena::for_token(&parts);
        let err = arena.decode(parts.b64_header()).unwrap_err();
        assert_eq!(err, JwtError::InvalidEncoding);
    }

    #[test]
    fn padded_and_standard_alphabet_rejected() {
        let mut arena = DecodeArena { data: Vec::new() };
        // "{}" padded
        assert_eq!(arena.decode(b"e30=").unwrap_err(), JwtError::InvalidEncoding);
        // '+' and '/' belong to the standard alphabet only
        assert_eq!(arena.decode(b"a+/b").unwrap_err(), JwtError::InvalidEncoding);
        // url-safe variants decode fine
        arena.decode(b"a-_b").unwrap();
    }

    #[test]
    fn failed_decode_leaves_arena_untouched() {
        let mut arena = DecodeArena { data: Vec::new() };
        let first = arena.decode(b"e30").unwrap();
        arena.decode(b"!!!!").unwrap_err();
        let second = arena.decode(b"U0lH").unwrap();
        assert_eq!(arena.bytes(first), b"{}");
        assert_eq!(arena.bytes(second), b"SIG");
    }
}
