//! Registered claim view over a JWT payload (RFC 7519 section 4.1)

use std::fmt::Display;

use serde::{
    Deserialize,
    Deserializer,
};
use serde_with::{
    OneOrMany,
    formats::PreferMany,
    serde_as,
};

/// Names of the registered claims that can be required or validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisteredClaim {
    /// `exp` (Expiration Time) Claim
    Exp,
    /// `nbf` (Not Before) Claim
    Nbf,
    /// `iat` (Issued At) Claim
    Iat,
    /// `aud` (Audience) Claim
    Aud,
    /// `iss` (Issuer) Claim
    Iss,
    /// `sub` (Subject) Claim
    Sub,
}
impl Display for RegisteredClaim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exp => write!(f, "exp"),
            Self::Nbf => write!(f, "nbf"),
            Self::Iat => write!(f, "iat"),
            Self::Aud => write!(f, "aud"),
            Self::Iss => write!(f, "iss"),
            Self::Sub => write!(f, "sub"),
        }
    }
}

/// The registered claims of a JWT payload, decoded independently of the
/// caller's own claims type. Unknown fields are ignored.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisteredClaims {
    #[serde(default, deserialize_with = "numeric_date")]
    exp: Option<i64>,
    #[serde(default, deserialize_with = "numeric_date")]
    nbf: Option<i64>,
    #[serde(default, deserialize_with = "numeric_date")]
    iat: Option<i64>,
    #[serde_as(as = "Option<OneOrMany<_, PreferMany>>")]
    aud: Option<Vec<String>>,
    #[serde(default)]
    iss: Option<String>,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    jti: Option<String>,
}

impl RegisteredClaims {
    /// `exp` (Expiration Time) Claim, in seconds since the Unix epoch
    ///
    /// Ref: [RFC 7519 4.1.4](<https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.4>)
    #[must_use]
    pub const fn exp(&self) -> Option<i64> {
        self.exp
    }

    /// `nbf` (Not Before) Claim, in seconds since the Unix epoch
    ///
    /// Ref: [RFC 7519 4.1.5](<https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.5>)
    #[must_use]
    pub const fn nbf(&self) -> Option<i64> {
        self.nbf
    }

    /// `iat` (Issued At) Claim, in seconds since the Unix epoch
    ///
    /// Ref: [RFC 7519 4.1.6](<https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.6>)
    #[must_use]
    pub const fn iat(&self) -> Option<i64> {
        self.iat
    }

    /// `aud` (Audience) Claim. A single-string audience yields one item.
    ///
    /// Ref: [RFC 7519 4.1.3](<https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.3>)
    pub fn aud(&self) -> impl Iterator<Item = &str> {
        self.aud.iter().flatten().map(String::as_str)
    }

    /// `iss` (Issuer) Claim
    ///
    /// Ref: [RFC 7519 4.1.1](<https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.1>)
    #[must_use]
    pub fn iss(&self) -> Option<&str> {
        self.iss.as_deref()
    }

    /// `sub` (Subject) Claim
    ///
    /// Ref: [RFC 7519 4.1.2](<https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.2>)
    #[must_use]
    pub fn sub(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// `jti` (JWT ID) Claim
    ///
    /// Ref: [RFC 7519 4.1.7](<https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.7>)
    #[must_use]
    pub fn jti(&self) -> Option<&str> {
        self.jti.as_deref()
    }

    /// Returns `true` if `claim` is present in the payload
    #[must_use]
    pub const fn contains(&self, claim: RegisteredClaim) -> bool {
        match claim {
            RegisteredClaim::Exp => self.exp.is_some(),
            RegisteredClaim::Nbf => self.nbf.is_some(),
            RegisteredClaim::Iat => self.iat.is_some(),
            RegisteredClaim::Aud => self.aud.is_some(),
            RegisteredClaim::Iss => self.iss.is_some(),
            RegisteredClaim::Sub => self.sub.is_some(),
        }
    }
}

// NumericDate may be fractional; sub-second precision is dropped.
#[allow(clippy::cast_possible_truncation)]
fn numeric_date<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumericDate {
        Seconds(i64),
        Fractional(f64),
    }

    Ok(
        Option::<NumericDate>::deserialize(deserializer)?.map(|date| match date {
            NumericDate::Seconds(secs) => secs,
            NumericDate::Fractional(secs) => secs.trunc() as i64,
        }),
    )
}
