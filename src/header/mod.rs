//! JOSE header of a compact-encoded JWT
//!
//! Only the RFC 7515 parameters needed to select and verify a key are kept:
//! `alg`, `typ`, `cty` and `kid`. Every other header parameter is ignored.

use serde::Deserialize;

use crate::{
    Algorithm,
    JwtError,
    error::Section,
};

/// Decoded JWT header
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Header {
    alg: Algorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kid: Option<String>,
}

// `alg` is kept as a string here so an unknown or absent algorithm surfaces as
// `UnsupportedAlgorithm` rather than as a JSON error.
#[derive(Deserialize)]
struct RawHeader {
    alg: Option<String>,
    typ: Option<String>,
    cty: Option<String>,
    kid: Option<String>,
}

impl Header {
    /// Creates a header for `alg` with no optional parameters set
    #[must_use]
    pub const fn new(alg: Algorithm) -> Self {
        Self {
            alg,
            typ: None,
            cty: None,
            kid: None,
        }
    }

    /// Sets the `kid` (Key ID) parameter
    #[must_use]
    pub fn with_kid(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    /// Sets the `typ` (Type) parameter
    #[must_use]
    pub fn with_typ(mut self, typ: impl Into<String>) -> Self {
        self.typ = Some(typ.into());
        self
    }

    /// `alg` (Algorithm) Header Parameter
    ///
    /// Ref: [RFC 7515 4.1.1](<https://datatracker.ietf.org/doc/html/rfc7515#section-4.1.1>)
    #[must_use]
    pub const fn alg(&self) -> Algorithm {
        self.alg
    }

    /// `typ` (Type) Header Parameter
    ///
    /// Ref: [RFC 7515 4.1.9](<https://datatracker.ietf.org/doc/html/rfc7515#section-4.1.9>)
    #[must_use]
    pub fn typ(&self) -> Option<&str> {
        self.typ.as_deref()
    }

    /// `cty` (Content Type) Header Parameter
    ///
    /// Ref: [RFC 7515 4.1.10](<https://datatracker.ietf.org/doc/html/rfc7515#section-4.1.10>)
    #[must_use]
    pub fn cty(&self) -> Option<&str> {
        self.cty.as_deref()
    }

    /// `kid` (Key ID) Header Parameter
    ///
    /// Ref: [RFC 7515 4.1.4](<https://datatracker.ietf.org/doc/html/rfc7515#section-4.1.4>)
    #[must_use]
    pub fn kid(&self) -> Option<&str> {
        self.kid.as_deref()
    }

    /// Deserializes a header from its decoded JSON bytes.
    ///
    /// # Errors
    ///
    /// - [`JwtError::InvalidPayload`] when `json` is not a JSON object with
    ///   string-valued parameters
    /// - [`JwtError::UnsupportedAlgorithm`] when `alg` is absent or unknown
    pub(crate) fn from_json(json: &[u8]) -> Result<Self, JwtError> {
        let raw: RawHeader =
            serde_json::from_slice(json).map_err(|_| JwtError::InvalidPayload(Section::Header))?;
        let alg = raw
            .alg
            .as_deref()
            .ok_or(JwtError::UnsupportedAlgorithm)?
            .parse()?;
        Ok(Self {
            alg,
            typ: raw.typ,
            cty: raw.cty,
            kid: raw.kid,
        })
    }
}
