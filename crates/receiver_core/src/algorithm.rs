//! Signature algorithm negotiation.
//!
//! Senders announce the digest they used in `X-WAREST-Signature-Alg`, for
//! example `HMAC-SHA512`. Resolution is total: anything unrecognised falls
//! back to SHA-256 instead of failing the request.

use std::fmt;

#[cfg(test)]
#[path = "algorithm_tests.rs"]
mod tests;

/// Prefix shared by every algorithm token, compared after upper-casing.
const HEADER_PREFIX: &str = "HMAC-SHA";

/// Hash function used for the webhook HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlgorithmId {
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl AlgorithmId {
    /// Resolves an `X-WAREST-Signature-Alg` header value.
    ///
    /// The value is upper-cased and must read `HMAC-SHA<bits>` with bits in
    /// {224, 256, 384, 512}. Every other input, including the empty string,
    /// yields [`AlgorithmId::Sha256`].
    pub fn resolve(header_value: &str) -> Self {
        let normalized = header_value.trim().to_ascii_uppercase();
        normalized
            .strip_prefix(HEADER_PREFIX)
            .and_then(Self::from_bits)
            .unwrap_or_default()
    }

    /// Parses an algorithm name as written in sender configuration.
    ///
    /// Accepts bare bit counts (`"512"`) and SHA-2 names in any case with or
    /// without a dash (`"sha256"`, `"SHA-384"`). Returns `None` when the
    /// input names no supported algorithm.
    pub fn from_config(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_uppercase().replace('-', "");
        let bits = normalized.strip_prefix("SHA").unwrap_or(&normalized);
        Self::from_bits(bits)
    }

    fn from_bits(bits: &str) -> Option<Self> {
        match bits {
            "224" => Some(AlgorithmId::Sha224),
            "256" => Some(AlgorithmId::Sha256),
            "384" => Some(AlgorithmId::Sha384),
            "512" => Some(AlgorithmId::Sha512),
            _ => None,
        }
    }

    /// Digest size in bits.
    pub fn bits(self) -> u16 {
        match self {
            AlgorithmId::Sha224 => 224,
            AlgorithmId::Sha256 => 256,
            AlgorithmId::Sha384 => 384,
            AlgorithmId::Sha512 => 512,
        }
    }

    /// Lowercase algorithm name, e.g. `sha384`.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmId::Sha224 => "sha224",
            AlgorithmId::Sha256 => "sha256",
            AlgorithmId::Sha384 => "sha384",
            AlgorithmId::Sha512 => "sha512",
        }
    }

    /// Token sent in `X-WAREST-Signature-Alg` and as the signature label.
    ///
    /// This is the inverse of [`AlgorithmId::resolve`].
    pub fn header_token(self) -> String {
        format!("{}{}", HEADER_PREFIX, self.bits())
    }

    /// Length of the lowercase hex digest this algorithm produces.
    pub fn hex_len(self) -> usize {
        usize::from(self.bits()) / 4
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves an algorithm hint; see [`AlgorithmId::resolve`].
pub fn resolve(header_value: &str) -> AlgorithmId {
    AlgorithmId::resolve(header_value)
}
