//! Selects the verification key by `kid` and runs a custom scope check.
use aws_lc_rs::{
    rand::SystemRandom,
    signature::{
        ECDSA_P256_SHA256_FIXED_SIGNING,
        EcdsaKeyPair,
        KeyPair,
    },
};
use base64_simd::URL_SAFE_NO_PAD as b64;
use jwtgate::{
    Algorithm,
    DecodingKey,
    Header,
    JwtError,
    Verifier,
    claims::RegisteredClaim,
    validation::keystore::LocalKeystore,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    scope: Vec<String>,
}

fn sign(
    pair: &EcdsaKeyPair,
    kid: &str,
    claims: &Claims,
) -> Result<String, Box<dyn std::error::Error>> {
    let header = Header::new(Algorithm::ES256).with_kid(kid).with_typ("JWT");
    let mut jwt = b64.encode_to_string(serde_json::to_vec(&header)?);
    jwt.push('.');
    jwt.push_str(&b64.encode_to_string(serde_json::to_vec(claims)?));
    let signature = pair.sign(&SystemRandom::new(), jwt.as_bytes())?;
    jwt.push('.');
    jwt.push_str(&b64.encode_to_string(signature));
    Ok(jwt)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let current = EcdsaKeyPair::generate(&ECDSA_P256_SHA256_FIXED_SIGNING)?;
    let retired = EcdsaKeyPair::generate(&ECDSA_P256_SHA256_FIXED_SIGNING)?;

    let mut keystore = LocalKeystore::empty();
    keystore.add_key(
        "2026-10",
        DecodingKey::from_es256_public_key(current.public_key())?,
    );
    keystore.add_key(
        "2026-09",
        DecodingKey::from_es256_public_key(retired.public_key())?,
    );
    keystore.remove_key("2026-09");

    let verifier = Verifier::<Claims, _>::builder(keystore)
        .with_required_claims([RegisteredClaim::Exp, RegisteredClaim::Sub])
        .with_leeway(30)
        .with(|_: &Header, claims: &Claims| {
            if claims.scope.iter().any(|s| s == "read") {
                Ok(())
            } else {
                Err(JwtError::CustomValidationError("missing 'read' scope"))
            }
        })
        .build();

    let claims = Claims {
        sub: "service-a".into(),
        exp: 4_102_444_800,
        scope: vec!["read".into()],
    };

    let decoded = verifier.verify(sign(&current, "2026-10", &claims)?)?;
    println!(
        "kid {:?} verified for {}",
        decoded.header().kid(),
        decoded.claims().sub
    );

    for (pair, kid) in [(&retired, "2026-09"), (&retired, "2026-10")] {
        if let Err(err) = verifier.verify(sign(pair, kid, &claims)?) {
            println!("kid {kid}: {err}");
        }
    }
    Ok(())
}
