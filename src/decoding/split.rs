use memchr::memchr_iter;

use crate::error::SplitError;

/// Borrowed view of a compact JWT split on its two `.` separators.
///
/// No decoding is performed; every accessor returns a slice of the original
/// token, so [`SplitJwt::b64_message`] is exactly the signed input.
#[derive(Debug)]
pub struct SplitJwt<'a> {
    data: &'a [u8],
    header_end: usize,
    message_end: usize,
}

impl<'a> TryFrom<&'a [u8]> for SplitJwt<'a> {
    type Error = SplitError;
    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        let mut it = memchr_iter(b'.', value);
        let header_end = it.next().ok_or(SplitError::Undersized)?;
        let message_end = it.next().ok_or(SplitError::Undersized)?;
        it.next().map_or(Ok(()), |_| Err(SplitError::Oversized))?;
        Ok(SplitJwt {
            data: value,
            header_end,
            message_end,
        })
    }
}

impl<'a> TryFrom<&'a str> for SplitJwt<'a> {
    type Error = SplitError;
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        value.as_bytes().try_into()
    }
}

impl SplitJwt<'_> {
    /// Encoded header: everything before the first `.`
    #[must_use]
    pub fn b64_header(&self) -> &[u8] {
        &self.data[..self.header_end]
    }

    /// Encoded payload: between the first and the last `.`
    #[must_use]
    pub fn b64_payload(&self) -> &[u8] {
        &self.data[self.header_end + 1..self.message_end]
    }

    /// Signing input: everything before the last `.`, verbatim
    #[must_use]
    pub fn b64_message(&self) -> &[u8] {
        &self.data[..self.message_end]
    }

    /// Encoded signature: everything after the last `.`
    #[must_use]
    pub fn b64_signature(&self) -> &[u8] {
        &self.data[self.message_end + 1..]
    }
}
