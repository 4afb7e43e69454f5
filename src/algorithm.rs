use std::{
    fmt::Display,
    str::FromStr,
};

use crate::JwtError;

/// JWS Signature Algorithm
///
/// Every algorithm registered here is recognised when parsing a JWT header.
/// Only the HMAC, ECDSA P-256/P-384 and Ed25519 algorithms are verified; the
/// remaining variants are reserved and always rejected with
/// [`JwtError::UnsupportedAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Algorithm {
    /// `HMAC` using `SHA-256`
    HS256,

    /// `HMAC` using `SHA-384`
    HS384,

    /// `HMAC` using `SHA-512`
    HS512,

    /// `ECDSA` using `P-256` (`secp256r1`) curve and `SHA-256` digest
    ES256,

    /// `ECDSA` using `P-384` curve and `SHA-384` digest
    ES384,

    /// `EdDSA` using Ed25519 curve
    EdDSA,

    /// `ECDSA` using `P-521` curve and `SHA-512` digest (reserved)
    ES512,

    /// `RSASSA-PKCS1-v1_5` using `SHA-256` (reserved)
    RS256,

    /// `RSASSA-PKCS1-v1_5` using `SHA-384` (reserved)
    RS384,

    /// `RSASSA-PKCS1-v1_5` using `SHA-512` (reserved)
    RS512,

    /// `RSASSA-PSS` using `SHA-256` and MGF1 with SHA-256 (reserved)
    PS256,

    /// `RSASSA-PSS` using `SHA-384` and MGF1 with SHA-384 (reserved)
    PS384,

    /// `RSASSA-PSS` using `SHA-512` and MGF1 with SHA-512 (reserved)
    PS512,
}

/// Key family an [`Algorithm`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// Shared-secret MAC algorithms
    Hmac,
    /// Elliptic-curve DSA over NIST curves
    Ecdsa,
    /// Edwards-curve DSA
    EdDsa,
    /// RSA PKCS#1 v1.5 and PSS
    Rsa,
}

impl Algorithm {
    /// Returns the key family of this algorithm
    #[must_use]
    pub const fn family(self) -> AlgorithmFamily {
        match self {
            Self::HS256 | Self::HS384 | Self::HS512 => AlgorithmFamily::Hmac,
            Self::ES256 | Self::ES384 | Self::ES512 => AlgorithmFamily::Ecdsa,
            Self::EdDSA => AlgorithmFamily::EdDsa,
            Self::RS256 | Self::RS384 | Self::RS512 | Self::PS256 | Self::PS384 | Self::PS512 => {
                AlgorithmFamily::Rsa
            }
        }
    }

    /// Returns `true` if signatures of this algorithm can be verified
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(
            self,
            Self::HS256 | Self::HS384 | Self::HS512 | Self::ES256 | Self::ES384 | Self::EdDSA
        )
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HS256 => write!(f, "HS256"),
            Self::HS384 => write!(f, "HS384"),
            Self::HS512 => write!(f, "HS512"),
            Self::ES256 => write!(f, "ES256"),
            Self::ES384 => write!(f, "ES384"),
            Self::ES512 => write!(f, "ES512"),
            Self::EdDSA => write!(f, "EdDSA"),
            Self::RS256 => write!(f, "RS256"),
            Self::RS384 => write!(f, "RS384"),
            Self::RS512 => write!(f, "RS512"),
            Self::PS256 => write!(f, "PS256"),
            Self::PS384 => write!(f, "PS384"),
            Self::PS512 => write!(f, "PS512"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    /// Parses a JWS `alg` value. Matching is exact and case-sensitive; `none`
    /// and any unregistered name yield [`JwtError::UnsupportedAlgorithm`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(Self::HS256),
            "HS384" => Ok(Self::HS384),
            "HS512" => Ok(Self::HS512),
            "ES256" => Ok(Self::ES256),
            "ES384" => Ok(Self::ES384),
            "ES512" => Ok(Self::ES512),
            "EdDSA" => Ok(Self::EdDSA),
            "RS256" => Ok(Self::RS256),
            "RS384" => Ok(Self::RS384),
            "RS512" => Ok(Self::RS512),
            "PS256" => Ok(Self::PS256),
            "PS384" => Ok(Self::PS384),
            "PS512" => Ok(Self::PS512),
            _ => Err(JwtError::UnsupportedAlgorithm),
        }
    }
}
