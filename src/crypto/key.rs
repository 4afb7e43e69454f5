use std::fmt::Debug;

use aws_lc_rs::signature::{
    ECDSA_P256_SHA256_FIXED,
    ECDSA_P384_SHA384_FIXED,
    ED25519,
    ParsedPublicKey,
    VerificationAlgorithm,
};
use zeroize::Zeroizing;

use crate::{
    JwtError,
    algorithm::AlgorithmFamily,
};

pub(crate) enum KeyMaterial {
    Secret(Zeroizing<Vec<u8>>),
    EdDsa(ParsedPublicKey),
    Es256(ParsedPublicKey),
    Es384(ParsedPublicKey),
}

/// Key used to verify a JWT signature.
///
/// A key belongs to exactly one algorithm family. A shared secret verifies
/// `HS256`, `HS384` and `HS512`; each public key verifies only its own
/// algorithm. Using a key with a token whose `alg` header names another
/// family fails with [`JwtError::InvalidDecodingKey`].
///
/// Public keys are parsed once, at construction.
pub struct DecodingKey {
    material: KeyMaterial,
}

impl DecodingKey {
    /// Creates an HMAC key from a shared secret. The secret is zeroized on drop.
    ///
    /// # Errors
    ///
    /// [`JwtError::KeyRejected`] when `secret` is empty
    pub fn from_secret(secret: impl AsRef<[u8]>) -> Result<Self, JwtError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(JwtError::KeyRejected);
        }
        Ok(Self {
            material: KeyMaterial::Secret(Zeroizing::new(secret.to_vec())),
        })
    }

    /// Creates an `EdDSA` key from a raw 32-byte Ed25519 public key
    ///
    /// # Errors
    ///
    /// [`JwtError::KeyRejected`] when `public_key` is not a valid Ed25519 public key
    pub fn from_ed25519_public_key(public_key: impl AsRef<[u8]>) -> Result<Self, JwtError> {
        Ok(Self {
            material: KeyMaterial::EdDsa(parse(&ED25519, public_key.as_ref())?),
        })
    }

    /// Creates an `ES256` key from a SEC1-encoded P-256 public key
    ///
    /// # Errors
    ///
    /// [`JwtError::KeyRejected`] when `public_key` is not a valid P-256 point
    pub fn from_es256_public_key(public_key: impl AsRef<[u8]>) -> Result<Self, JwtError> {
        Ok(Self {
            material: KeyMaterial::Es256(parse(&ECDSA_P256_SHA256_FIXED, public_key.as_ref())?),
        })
    }

    /// Creates an `ES384` key from a SEC1-encoded P-384 public key
    ///
    /// # Errors
    ///
    /// [`JwtError::KeyRejected`] when `public_key` is not a valid P-384 point
    pub fn from_es384_public_key(public_key: impl AsRef<[u8]>) -> Result<Self, JwtError> {
        Ok(Self {
            material: KeyMaterial::Es384(parse(&ECDSA_P384_SHA384_FIXED, public_key.as_ref())?),
        })
    }

    /// Returns the algorithm family this key verifies
    #[must_use]
    pub const fn family(&self) -> AlgorithmFamily {
        match self.material {
            KeyMaterial::Secret(_) => AlgorithmFamily::Hmac,
            KeyMaterial::EdDsa(_) => AlgorithmFamily::EdDsa,
            KeyMaterial::Es256(_) | KeyMaterial::Es384(_) => AlgorithmFamily::Ecdsa,
        }
    }

    pub(crate) const fn material(&self) -> &KeyMaterial {
        &self.material
    }
}

impl Debug for DecodingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.material {
            KeyMaterial::Secret(_) => "Secret(<redacted>)",
            KeyMaterial::EdDsa(_) => "EdDsa",
            KeyMaterial::Es256(_) => "Es256",
            KeyMaterial::Es384(_) => "Es384",
        };
        write!(f, "DecodingKey::{kind}")
    }
}

fn parse(
    alg: &'static dyn VerificationAlgorithm,
    public_key: &[u8],
) -> Result<ParsedPublicKey, JwtError> {
    ParsedPublicKey::new(alg, public_key).map_err(|_| JwtError::KeyRejected)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use aws_lc_rs::signature::{
        ECDSA_P256_SHA256_FIXED_SIGNING,
        ECDSA_P384_SHA384_FIXED_SIGNING,
        EcdsaKeyPair,
        Ed25519KeyPair,
        KeyPair,
    };

    use super::DecodingKey;
    use crate::{
        JwtError,
        algorithm::AlgorithmFamily,
    };

    #[test]
    fn empty_secret_rejected() {
        let err = DecodingKey::from_secret(b"").unwrap_err();
        assert_eq!(err, JwtError::KeyRejected);
    }

    #[test]
    fn secret_redacted_from_debug() {
        let key = DecodingKey::from_secret("hunter2").unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn families() {
        let key = DecodingKey::from_secret("secret").unwrap();
        assert_eq!(key.family(), AlgorithmFamily::Hmac);

        let pair = Ed25519KeyPair::generate().unwrap();
        let key = DecodingKey::from_ed25519_public_key(pair.public_key()).unwrap();
        assert_eq!(key.family(), AlgorithmFamily::EdDsa);

        let pair = EcdsaKeyPair::generate(&ECDSA_P256_SHA256_FIXED_SIGNING).unwrap();
        let key = DecodingKey::from_es256_public_key(pair.public_key()).unwrap();
        assert_eq!(key.family(), AlgorithmFamily::Ecdsa);

        let pair = EcdsaKeyPair::generate(&ECDSA_P384_SHA384_FIXED_SIGNING).unwrap();
        let key = DecodingKey::from_es384_public_key(pair.public_key()).unwrap();
        assert_eq!(key.family(), AlgorithmFamily::Ecdsa);
    }

    #[test]
    fn malformed_public_keys_rejected() {
        let err = DecodingKey::from_ed25519_public_key([0u8; 7]).unwrap_err();
        assert_eq!(err, JwtError::KeyRejected);

        let err = DecodingKey::from_es256_public_key([4u8; 65]).unwrap_err();
        assert_eq!(err, JwtError::KeyRejected);

        // a P-256 point is not a P-384 key
        let pair = EcdsaKeyPair::generate(&ECDSA_P256_SHA256_FIXED_SIGNING).unwrap();
        let err = DecodingKey::from_es384_public_key(pair.public_key()).unwrap_err();
        assert_eq!(err, JwtError::KeyRejected);
    }
}
