use aws_lc_rs::{
    hmac::{
        self,
        HMAC_SHA256,
        HMAC_SHA384,
        HMAC_SHA512,
    },
    signature::ParsedPublicKey,
};
use subtle::ConstantTimeEq;

use crate::{
    Algorithm,
    JwtError,
    crypto::{
        DecodingKey,
        key::KeyMaterial,
    },
    validation::ValidationOptions,
};

const ES256_SIGNATURE_LEN: usize = 64;
const ES384_SIGNATURE_LEN: usize = 96;
const ED25519_SIGNATURE_LEN: usize = 64;

/// Verifies `signature` over `message` for the algorithm `alg` declared by the
/// token header.
///
/// `message` is the verbatim dot-delimited base64url header and payload
/// (the JWS signing input) and `signature` is the decoded signature section.
///
/// When [`ValidationOptions::insecure_skip_signature`] is set no
/// cryptographic work is performed and this succeeds for every implemented
/// algorithm, whatever the key. Tokens accepted that way MUST NOT be trusted.
///
/// # Errors
///
/// - [`JwtError::UnsupportedAlgorithm`] when `alg` is reserved but not implemented
/// - [`JwtError::InvalidDecodingKey`] when `key` does not belong to `alg`
/// - [`JwtError::InvalidSignature`] when the signature does not verify, including
///   when it has the wrong length for `alg`
pub fn verify(
    alg: Algorithm,
    key: &DecodingKey,
    message: &[u8],
    signature: &[u8],
    options: &ValidationOptions,
) -> Result<(), JwtError> {
    if options.insecure_skip_signature() && alg.is_supported() {
        tracing::warn!(%alg, "jwt signature verification skipped; claims are untrusted");
        return Ok(());
    }

    let material = key.material();
    let result = match alg {
        Algorithm::HS256 => verify_hmac(hmac_secret(material)?, HMAC_SHA256, message, signature),
        Algorithm::HS384 => verify_hmac(hmac_secret(material)?, HMAC_SHA384, message, signature),
        Algorithm::HS512 => verify_hmac(hmac_secret(material)?, HMAC_SHA512, message, signature),
        Algorithm::ES256 => match material {
            KeyMaterial::Es256(key) => verify_fixed(key, ES256_SIGNATURE_LEN, message, signature),
            _ => Err(JwtError::InvalidDecodingKey),
        },
        Algorithm::ES384 => match material {
            KeyMaterial::Es384(key) => verify_fixed(key, ES384_SIGNATURE_LEN, message, signature),
            _ => Err(JwtError::InvalidDecodingKey),
        },
        Algorithm::EdDSA => match material {
            KeyMaterial::EdDsa(key) => verify_fixed(key, ED25519_SIGNATURE_LEN, message, signature),
            _ => Err(JwtError::InvalidDecodingKey),
        },
        Algorithm::ES512
        | Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => Err(JwtError::UnsupportedAlgorithm),
    };
    result.inspect_err(|err| {
        tracing::debug!(%alg, key_family = ?key.family(), error = %err, "jwt signature rejected");
    })
}

fn hmac_secret(material: &KeyMaterial) -> Result<&[u8], JwtError> {
    match material {
        KeyMaterial::Secret(secret) => Ok(secret.as_slice()),
        _ => Err(JwtError::InvalidDecodingKey),
    }
}

fn verify_hmac(
    secret: &[u8],
    alg: hmac::Algorithm,
    message: &[u8],
    signature: &[u8],
) -> Result<(), JwtError> {
    let tag = hmac::sign(&hmac::Key::new(alg, secret), message);
    let expected = tag.as_ref();
    // `ct_eq` on slices of unequal length is false without comparing contents
    if bool::from(expected.ct_eq(signature)) {
        Ok(())
    } else {
        Err(JwtError::InvalidSignature)
    }
}

fn verify_fixed(
    key: &ParsedPublicKey,
    signature_len: usize,
    message: &[u8],
    signature: &[u8],
) -> Result<(), JwtError> {
    if signature.len() != signature_len {
        return Err(JwtError::InvalidSignature);
    }
    key.verify_sig(message, signature)
        .map_err(|_| JwtError::InvalidSignature)
}
