// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! JWKS document generation from a PEM encoded X.509 signing certificate.
//!
//! The output is served from an OIDC discovery endpoint. Two encodings are
//! kept as existing consumers expect them:
//!
//! - `e` is the exponent as a full 8 byte big-endian integer, not the minimal form.
//! - `x5t` is base64url over the uppercase hex text of the SHA-1 fingerprint,
//!   not over the raw digest.

use crate::error::{Result, SltError};
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use x509_parser::prelude::{FromDer, X509Certificate};
use x509_parser::public_key::PublicKey;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Jwk {
    #[serde(rename = "use")]
    pub use_: String,
    pub kty: String,
    pub kid: String,
    pub alg: String,
    pub n: String,
    pub e: String,
    pub x5c: Vec<String>,
    pub x5t: String,
}

/// Build a single-key JWKS from a PEM certificate with an RSA public key
pub fn generate(pem_data: &[u8]) -> Result<JwkSet> {
    let pem_obj = ::pem::parse(pem_data)
        .map_err(|e| SltError::Certificate(format!("Failed to parse PEM: {}", e)))?;
    if pem_obj.tag() != "CERTIFICATE" {
        return Err(SltError::Certificate(format!(
            "expected a CERTIFICATE PEM block, found {}",
            pem_obj.tag()
        )));
    }
    let der = pem_obj.contents();

    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|e| SltError::Certificate(format!("Failed to parse certificate: {}", e)))?;

    let (modulus, exponent) = match cert.public_key().parsed() {
        Ok(PublicKey::RSA(rsa)) => (strip_leading_zeros(rsa.modulus), exponent_value(rsa.exponent)?),
        Ok(_) => {
            return Err(SltError::Certificate(
                "certificate public key is not RSA".to_string(),
            ))
        }
        Err(e) => {
            return Err(SltError::Certificate(format!(
                "Failed to parse public key: {}",
                e
            )))
        }
    };

    let n = URL_SAFE_NO_PAD.encode(modulus);
    let e = URL_SAFE_NO_PAD.encode(exponent.to_be_bytes());
    let kid = thumbprint(&n, exponent);

    let fingerprint = hex::encode_upper(Sha1::digest(der));
    let x5t = URL_SAFE_NO_PAD.encode(fingerprint.as_bytes());

    Ok(JwkSet {
        keys: vec![Jwk {
            use_: "sig".to_string(),
            kty: "RSA".to_string(),
            kid,
            alg: "RS256".to_string(),
            n,
            e,
            x5c: vec![STANDARD.encode(der)],
            x5t,
        }],
    })
}

/// RFC 7638 SHA-256 thumbprint, hex encoded
fn thumbprint(n: &str, exponent: u64) -> String {
    let minimal_e = URL_SAFE_NO_PAD.encode(strip_leading_zeros(&exponent.to_be_bytes()));
    let canonical = format!(r#"{{"e":"{}","kty":"RSA","n":"{}"}}"#, minimal_e, n);
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn exponent_value(bytes: &[u8]) -> Result<u64> {
    let significant = strip_leading_zeros(bytes);
    if significant.len() > 8 {
        return Err(SltError::Certificate(format!(
            "RSA exponent of {} bytes does not fit in 64 bits",
            significant.len()
        )));
    }
    Ok(significant
        .iter()
        .fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}
