//! HMAC signature verification for inbound webhooks.
//!
//! A delivery carries `X-WAREST-Signature: <label>=<hexdigest>`. The digest is
//! an HMAC over the raw request body, keyed with a shared secret followed by
//! the sender's username (`X-WAREST-Username`, possibly empty). Each
//! configured secret is tried in order until one matches.
//!
//! Digests are compared with [`subtle::ConstantTimeEq`] over the full length of
//! the expected digest, so the comparison time depends on neither the first
//! mismatching character nor the length of the claimed digest.

use hmac::{digest::KeyInit, Hmac, Mac};
use sha2::{Sha224, Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::algorithm::AlgorithmId;
use crate::secrets::SecretSet;

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;

/// Signing input used when a request carries no body at all.
pub const EMPTY_BODY: &[u8] = b"{}";

/// Parsed `X-WAREST-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    label: String,
    digest: String,
}

impl SignatureHeader {
    /// Parses `"<label>=<hexdigest>"`, splitting on the first `=`.
    ///
    /// Returns `None` when the header is absent, has no `=`, or the digest is
    /// empty after trimming. The digest is not checked for hex characters or
    /// length; a malformed digest simply never matches.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let (label, digest) = raw?.split_once('=')?;
        let digest = digest.trim();
        if digest.is_empty() {
            return None;
        }

        Some(Self {
            label: label.trim().to_string(),
            digest: digest.to_string(),
        })
    }

    /// Renders a header value, e.g. `HMAC-SHA256=ab12...`.
    pub fn format(algorithm: AlgorithmId, digest: &str) -> String {
        format!("{}={}", algorithm.header_token(), digest)
    }

    /// Text before the `=`, usually the algorithm token. Informational only.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Claimed hex digest as sent.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

/// Computes keyed digests for the verifier.
///
/// The production implementation is [`HmacSigner`]; the trait exists so the
/// verifier's use of the digest function can be observed.
pub trait DigestSigner: Send + Sync {
    /// Returns the lowercase hex HMAC of `body` under `key`.
    fn sign_hex(&self, algorithm: AlgorithmId, key: &[u8], body: &[u8]) -> String;
}

/// HMAC over the SHA-2 family.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSigner;

impl DigestSigner for HmacSigner {
    fn sign_hex(&self, algorithm: AlgorithmId, key: &[u8], body: &[u8]) -> String {
        match algorithm {
            AlgorithmId::Sha224 => mac_hex::<Hmac<Sha224>>(key, body),
            AlgorithmId::Sha256 => mac_hex::<Hmac<Sha256>>(key, body),
            AlgorithmId::Sha384 => mac_hex::<Hmac<Sha384>>(key, body),
            AlgorithmId::Sha512 => mac_hex::<Hmac<Sha512>>(key, body),
        }
    }
}

fn mac_hex<M: Mac + KeyInit>(key: &[u8], body: &[u8]) -> String {
    let mut mac = <M as KeyInit>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Bytes that are actually signed: an empty body is signed as `{}`.
pub fn signing_input(body: &[u8]) -> &[u8] {
    if body.is_empty() {
        EMPTY_BODY
    } else {
        body
    }
}

/// Derives the HMAC key for one secret: the secret followed by the identity.
fn derive_key(secret: &str, identity: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(secret.len() + identity.len());
    key.extend_from_slice(secret.as_bytes());
    key.extend_from_slice(identity.as_bytes());
    key
}

/// Computes the lowercase hex digest a sender would put in the signature
/// header for `body`.
pub fn sign_payload(body: &[u8], secret: &str, identity: &str, algorithm: AlgorithmId) -> String {
    HmacSigner.sign_hex(algorithm, &derive_key(secret, identity), signing_input(body))
}

/// Request-scoped inputs to a single verification.
#[derive(Debug, Clone, Copy)]
pub struct VerificationContext<'a> {
    /// Raw request body exactly as received.
    pub body: &'a [u8],
    /// Raw `X-WAREST-Signature` header value, if present.
    pub signature: Option<&'a str>,
    /// Identity component mixed into the key; empty when not supplied.
    pub identity: &'a str,
    /// Resolved hash function.
    pub algorithm: AlgorithmId,
}

/// Verifies webhook signatures against a [`SecretSet`].
#[derive(Debug, Clone, Default)]
pub struct SignatureVerifier<S = HmacSigner> {
    signer: S,
    debug_signature: bool,
}

impl SignatureVerifier<HmacSigner> {
    /// Creates a verifier using HMAC-SHA2.
    ///
    /// When `debug_signature` is set, every non-matching attempt is logged at
    /// debug level together with the secret and both digests. Never enable
    /// this in production.
    pub fn new(debug_signature: bool) -> Self {
        Self::with_signer(HmacSigner, debug_signature)
    }
}

impl<S: DigestSigner> SignatureVerifier<S> {
    /// Creates a verifier with a custom digest implementation.
    pub fn with_signer(signer: S, debug_signature: bool) -> Self {
        Self {
            signer,
            debug_signature,
        }
    }

    /// Returns true when any secret in `secrets` produces the claimed digest.
    ///
    /// A missing or malformed signature header fails before any digest is
    /// computed. Secrets are tried in order and the first match wins.
    pub fn verify(&self, context: &VerificationContext<'_>, secrets: &SecretSet) -> bool {
        let Some(header) = SignatureHeader::parse(context.signature) else {
            warn!("Signature header missing or malformed");
            return false;
        };

        let claimed = header.digest().to_ascii_lowercase();
        let body = signing_input(context.body);

        for (index, secret) in secrets.iter().enumerate() {
            let key = derive_key(secret, context.identity);
            let expected = self.signer.sign_hex(context.algorithm, &key, body);

            if digests_match(expected.as_bytes(), claimed.as_bytes()) {
                debug!(
                    secret_index = index,
                    algorithm = %context.algorithm,
                    "Signature matched"
                );
                return true;
            }

            if self.debug_signature {
                debug!(
                    secret_index = index,
                    secret = %secret,
                    expected = %expected,
                    received = %header.digest(),
                    "Signature not matched with secret"
                );
            }
        }

        warn!(
            algorithm = %context.algorithm,
            secrets_tried = secrets.len(),
            "Signature did not match any configured secret"
        );
        false
    }
}

/// Constant-time digest equality that always walks all of `expected`.
fn digests_match(expected: &[u8], claimed: &[u8]) -> bool {
    let mut equal = (expected.len() as u64).ct_eq(&(claimed.len() as u64));
    for (index, byte) in expected.iter().enumerate() {
        let other = claimed.get(index).copied().unwrap_or(0);
        equal &= byte.ct_eq(&other);
    }
    bool::from(equal)
}

/// Verifies a signature with HMAC-SHA2 and debug tracing disabled.
///
/// See [`SignatureVerifier::verify`].
pub fn verify(
    raw_body: &[u8],
    claimed_signature: Option<&str>,
    identity: &str,
    secrets: &SecretSet,
    algorithm: AlgorithmId,
) -> bool {
    let context = VerificationContext {
        body: raw_body,
        signature: claimed_signature,
        identity,
        algorithm,
    };
    SignatureVerifier::new(false).verify(&context, secrets)
}
