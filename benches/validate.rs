#![allow(clippy::unwrap_used)]
use std::hint::black_box;

use aws_lc_rs::{
    encoding::AsDer,
    hmac::{
        self,
        HMAC_SHA256,
        HMAC_SHA384,
        HMAC_SHA512,
    },
    rand::SystemRandom,
    signature::{
        ECDSA_P256_SHA256_FIXED_SIGNING,
        ECDSA_P384_SHA384_FIXED_SIGNING,
        EcdsaKeyPair,
        Ed25519KeyPair,
        KeyPair,
    },
};
use base64_simd::URL_SAFE_NO_PAD as b64;
use criterion::{
    Criterion,
    Throughput,
    criterion_group,
    criterion_main,
};
use jsonwebtoken::Validation;
use jwtgate::{
    Algorithm,
    DecodingKey,
    Header,
    ValidationOptions,
    Verifier,
    claims::RegisteredClaims,
    validation::ClaimValidator,
};
use serde::{
    Deserialize,
    Serialize,
};

// NOTE: [`Clone`] is NOT required by `jwtgate` but is required by [`jsonwebtoken`]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    aud: Vec<String>,
    exp: i64,
    iat: i64,
    sub: String,
}

fn claims() -> Claims {
    let iat: i64 = 0;
    let exp: i64 = 4_102_444_800;
    let sub = "test".into();
    let aud = vec!["jwtgate-test".into()];
    Claims { aud, exp, iat, sub }
}

fn header(alg: Algorithm) -> Header {
    Header::new(alg).with_kid("testkey").with_typ("JWT")
}

fn encode(alg: Algorithm, sign: impl Fn(&[u8]) -> Vec<u8>) -> String {
    let mut jwt = b64.encode_to_string(serde_json::to_vec(&header(alg)).unwrap());
    jwt.push('.');
    jwt.push_str(&b64.encode_to_string(serde_json::to_vec(&claims()).unwrap()));
    let signature = sign(jwt.as_bytes());
    jwt.push('.');
    jwt.push_str(&b64.encode_to_string(signature));
    jwt
}

fn verifier(key: DecodingKey) -> Verifier<Claims> {
    Verifier::builder(key)
        .with_audience(["jwtgate-test"])
        .with_issued_at_validation()
        .build()
}

fn jwst_val(alg: jsonwebtoken::Algorithm) -> Validation {
    let mut validation = jsonwebtoken::Validation::new(alg);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "aud", "sub", "iat"]);
    validation.set_audience(&["jwtgate-test"]);
    validation
}

fn bench_pair(
    c: &mut Criterion,
    alg: Algorithm,
    jwt: &str,
    key: DecodingKey,
    jkey: &jsonwebtoken::DecodingKey,
    jalg: jsonwebtoken::Algorithm,
) {
    let mut group = c.benchmark_group(alg.to_string());
    group.throughput(Throughput::Bytes(jwt.len() as u64));

    let validator = verifier(key);
    group.bench_function("jwtgate", |b| {
        b.iter(|| black_box(validator.verify(black_box(jwt.as_bytes())).unwrap()));
    });

    let validation = jwst_val(jalg);
    group.bench_function("jsonwebtoken", |b| {
        b.iter(|| {
            black_box(
                jsonwebtoken::decode::<Claims>(
                    black_box(jwt),
                    black_box(jkey),
                    black_box(&validation),
                )
                .unwrap(),
            );
        });
    });
    group.finish();
}

fn validate(c: &mut Criterion) {
    for (alg, jalg, signing) in [
        (
            Algorithm::ES256,
            jsonwebtoken::Algorithm::ES256,
            &ECDSA_P256_SHA256_FIXED_SIGNING,
        ),
        (
            Algorithm::ES384,
            jsonwebtoken::Algorithm::ES384,
            &ECDSA_P384_SHA384_FIXED_SIGNING,
        ),
    ] {
        let pair = EcdsaKeyPair::generate(signing).unwrap();
        let rng = SystemRandom::new();
        let jwt = encode(alg, |m| pair.sign(&rng, m).unwrap().as_ref().to_vec());
        let key = match alg {
            Algorithm::ES256 => DecodingKey::from_es256_public_key(pair.public_key()),
            _ => DecodingKey::from_es384_public_key(pair.public_key()),
        }
        .unwrap();
        let jkey =
            jsonwebtoken::DecodingKey::from_ec_der(pair.public_key().as_der().unwrap().as_ref());
        bench_pair(c, alg, &jwt, key, &jkey, jalg);
    }

    let pair = Ed25519KeyPair::generate().unwrap();
    let jwt = encode(Algorithm::EdDSA, |m| pair.sign(m).as_ref().to_vec());
    let key = DecodingKey::from_ed25519_public_key(pair.public_key()).unwrap();
    let jkey = jsonwebtoken::DecodingKey::from_ed_der(pair.public_key().as_der().unwrap().as_ref());
    bench_pair(
        c,
        Algorithm::EdDSA,
        &jwt,
        key,
        &jkey,
        jsonwebtoken::Algorithm::EdDSA,
    );

    let secret = [b'\xFF'; 64];
    for (alg, jalg, hmac_alg) in [
        (Algorithm::HS256, jsonwebtoken::Algorithm::HS256, HMAC_SHA256),
        (Algorithm::HS384, jsonwebtoken::Algorithm::HS384, HMAC_SHA384),
        (Algorithm::HS512, jsonwebtoken::Algorithm::HS512, HMAC_SHA512),
    ] {
        let hkey = hmac::Key::new(hmac_alg, &secret);
        let jwt = encode(alg, |m| hmac::sign(&hkey, m).as_ref().to_vec());
        let key = DecodingKey::from_secret(secret).unwrap();
        let jkey = jsonwebtoken::DecodingKey::from_secret(&secret);
        bench_pair(c, alg, &jwt, key, &jkey, jalg);
    }
}

fn claims_only(c: &mut Criterion) {
    let registered: RegisteredClaims = serde_json::from_slice(&serde_json::to_vec(&claims()).unwrap()).unwrap();
    let options = ValidationOptions::default()
        .with_leeway(60)
        .with_audience(["jwtgate-test"])
        .with_subject(["test"]);
    let validator = ClaimValidator::new(&options);
    c.bench_function("registered_claims", |b| {
        b.iter(|| black_box(validator.validate(black_box(&registered)).unwrap()));
    });
}

criterion_group!(benches, validate, claims_only);
criterion_main!(benches);
