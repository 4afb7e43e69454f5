use std::fmt::Display;

use thiserror::Error;

use crate::claims::RegisteredClaim;

/// Errors raised during JWT decoding, verification, and validation.
///
/// Structural failures ([`JwtError::MalformedToken`], [`JwtError::InvalidEncoding`],
/// [`JwtError::InvalidPayload`]), cryptographic failures ([`JwtError::InvalidSignature`],
/// [`JwtError::InvalidDecodingKey`], [`JwtError::UnsupportedAlgorithm`]) and claim
/// policy failures are kept distinct so callers can respond to each differently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JwtError {
    /// Error raised when the token does not contain exactly two `.` separators
    #[error("jwt must contain exactly three dot-delimited sections")]
    MalformedToken(#[from] SplitError),

    /// Error raised when a JWT section is not valid base64 url-safe (unpadded) encoded
    #[error("jwt must use unpadded base64 url safe encoding")]
    InvalidEncoding,

    /// Error raised when a decoded JWT section cannot be deserialized from JSON
    #[error("jwt {0} could not be deserialized")]
    InvalidPayload(Section),

    /// Error raised when the [`DecodingKey`] variant does not belong to the algorithm
    /// family declared by the token's `alg` header
    ///
    /// [`DecodingKey`]: crate::crypto::DecodingKey
    #[error("decoding key does not match the jwt 'alg' header")]
    InvalidDecodingKey,

    /// Error raised when the signature is invalid
    #[error("invalid signature")]
    InvalidSignature,

    /// Error raised when the `alg` header is absent, unknown, or not implemented
    #[error("jwt 'alg' is absent or unsupported")]
    UnsupportedAlgorithm,

    /// Error raised when `exp` (Expiration Time) claim indicates the token is expired
    #[error("jwt 'exp' claim indicates token is expired")]
    TokenExpired,

    /// Error raised when `nbf` (Not Before) claim indicates the token is not yet valid
    #[error("jwt 'nbf' claim indicates token is not yet valid")]
    TokenNotYetValid,

    /// Error raised when `iat` (Issued At) claim lies in the future
    #[error("jwt 'iat' claim indicates token was issued in the future")]
    IssuedInFuture,

    /// Error raised when a claim listed as required is absent
    #[error("jwt is missing required '{0}' claim")]
    MissingClaim(RegisteredClaim),

    /// Error raised when `aud` claim does not contain an expected audience
    #[error("jwt 'aud' claim did not contain an expected audience")]
    InvalidAudience,

    /// Error raised when `iss` claim is not an expected issuer
    #[error("jwt 'iss' claim was not an expected issuer")]
    InvalidIssuer,

    /// Error raised when `sub` claim is not an expected subject
    #[error("jwt 'sub' claim was not an expected subject")]
    InvalidSubject,

    /// Error raised by a [`KeyProvider`] when no key is available for the token
    ///
    /// [`KeyProvider`]: crate::validation::KeyProvider
    #[error("verification key not found in keystore")]
    VerificationKeyNotFound,

    /// Error raised when key bytes cannot be parsed into a [`DecodingKey`]
    ///
    /// [`DecodingKey`]: crate::crypto::DecodingKey
    #[error("key material was rejected by the crypto backend")]
    KeyRejected,

    /// Error raised when JWT is larger than the configured size limit
    #[error("jwt was above set size threshold")]
    OverSizeThreshold,

    /// Generic error raised by any arbitrary [`TokenValidator`]
    ///
    /// [`TokenValidator`]: crate::validation::TokenValidator
    #[error("custom validation error: {0}")]
    CustomValidationError(&'static str),
}

/// Errors raised while splitting a compact-encoded JWT
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SplitError {
    /// Error raised when the token contains fewer than three sections
    #[error("token contained less than three sections")]
    Undersized,

    /// Error raised when the token contains more than three sections
    #[error("token contained more than three sections")]
    Oversized,
}

/// JWT section that failed JSON deserialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// JOSE header
    Header,
    /// Claims (payload)
    Claims,
}
impl Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Claims => write!(f, "claims"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::{
        JwtError,
        Section,
        SplitError,
    };
    use crate::claims::RegisteredClaim;

    #[test]
    fn split_error_converts_to_malformed_token() {
        let err: JwtError = SplitError::Oversized.into();
        assert_eq!(err, JwtError::MalformedToken(SplitError::Oversized));
    }

    #[test]
    fn messages_name_the_failing_part() {
        assert_eq!(
            JwtError::InvalidPayload(Section::Claims).to_string(),
            "jwt claims could not be deserialized"
        );
        assert_eq!(
            JwtError::MissingClaim(RegisteredClaim::Exp).to_string(),
            "jwt is missing required 'exp' claim"
        );
    }
}
