//! Compact JWT decoding
//!
//! A token is split on its separators without copying, then its sections are
//! decoded into a single per-token [`DecodeArena`]. The payload is only
//! decoded once the signature has been verified.
mod decode;
mod split;

pub use decode::{
    DecodeArena,
    Segment,
};
use serde::de::DeserializeOwned;
pub use split::SplitJwt;

use crate::{
    JwtError,
    claims::RegisteredClaims,
    crypto,
    error::Section,
    header::Header,
    validation::{
        ClaimValidator,
        KeyProvider,
        TokenValidator,
        ValidationOptions,
    },
};

/// A verified and validated JWT
///
/// Owns its header and claims; nothing borrows from the input token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken<C> {
    header: Header,
    claims: C,
}

impl<C> DecodedToken<C> {
    /// Decoded JOSE header
    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Claims deserialized into the caller's type
    #[must_use]
    pub const fn claims(&self) -> &C {
        &self.claims
    }

    /// Consumes the token, returning its header and claims
    #[must_use]
    pub fn into_parts(self) -> (Header, C) {
        (self.header, self.claims)
    }

    /// Consumes the token, returning its claims
    #[must_use]
    pub fn into_claims(self) -> C {
        self.claims
    }
}

pub(crate) fn decode_token<C, KP>(
    token: &[u8],
    key_provider: &KP,
    options: &ValidationOptions,
    validators: &[Box<dyn TokenValidator<C> + Send + Sync>],
) -> Result<DecodedToken<C>, JwtError>
where
    C: DeserializeOwned,
    KP: KeyProvider + ?Sized,
{
    verify_and_decode(token, key_provider, options, validators)
        .inspect_err(|err| tracing::debug!(error = %err, "jwt rejected"))
}

fn verify_and_decode<C, KP>(
    token: &[u8],
    key_provider: &KP,
    options: &ValidationOptions,
    validators: &[Box<dyn TokenValidator<C> + Send + Sync>],
) -> Result<DecodedToken<C>, JwtError>
where
    C: DeserializeOwned,
    KP: KeyProvider + ?Sized,
{
    if let Some(size_limit) = options.max_token_size()
        && token.len() > size_limit
    {
        return Err(JwtError::OverSizeThreshold);
    }

    let parts = SplitJwt::try_from(token)?;
    let mut arena = DecodeArena::for_token(&parts);

    let header = arena.decode(parts.b64_header())?;
    let header = Header::from_json(arena.bytes(header))?;

    let key = key_provider.resolve_key(&header)?;
    let signature = arena.decode(parts.b64_signature())?;
    crypto::verify(
        header.alg(),
        key,
        parts.b64_message(),
        arena.bytes(signature),
        options,
    )?;

    let payload = arena.decode(parts.b64_payload())?;
    let (registered, claims) = deserialize_claims::<C>(arena.bytes(payload))?;

    ClaimValidator::new(options).validate(&registered)?;
    for validator in validators {
        validator.validate(&header, &claims)?;
    }

    Ok(DecodedToken { header, claims })
}

/// Decodes header and claims without verifying anything but their encoding
pub(crate) fn decode_unverified<C: DeserializeOwned>(
    token: &[u8],
) -> Result<DecodedToken<C>, JwtError> {
    let parts = SplitJwt::try_from(token)?;
    let mut arena = DecodeArena::for_token(&parts);

    let header = arena.decode(parts.b64_header())?;
    let header = Header::from_json(arena.bytes(header))?;
    let payload = arena.decode(parts.b64_payload())?;
    let claims = serde_json::from_slice::<C>(arena.bytes(payload))
        .map_err(|_| JwtError::InvalidPayload(Section::Claims))?;

    Ok(DecodedToken { header, claims })
}

// The payload is deserialized twice so registered-claim checks never depend
// on the shape of the caller's type.
fn deserialize_claims<C: DeserializeOwned>(
    payload: &[u8],
) -> Result<(RegisteredClaims, C), JwtError> {
    let registered = serde_json::from_slice::<RegisteredClaims>(payload)
        .map_err(|_| JwtError::InvalidPayload(Section::Claims))?;
    let claims =
        serde_json::from_slice::<C>(payload).map_err(|_| JwtError::InvalidPayload(Section::Claims))?;
    Ok((registered, claims))
}
