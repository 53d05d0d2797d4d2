//! Deterministic claim hashing.
//!
//! The verification cache is keyed by a digest of the claim text rather than
//! the text itself. The digest is SHA-256 truncated to its first 128 bits,
//! computed over the exact bytes of the claim (no case folding, no
//! whitespace normalisation), so two claims share a key only if their text is
//! identical.

use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a [`ClaimHash`].
pub const CLAIM_HASH_LEN: usize = 16;

/// Truncated content digest of a claim's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClaimHash([u8; CLAIM_HASH_LEN]);

impl ClaimHash {
    /// Hash claim text.
    pub fn of(text: &str) -> Self {
        let mut h = Sha256::new();

        // Domain separator keeps claim keys apart from any other digest use
        h.update(b"claim:");
        h.update(text.as_bytes());

        let digest = h.finalize();
        let mut out = [0u8; CLAIM_HASH_LEN];
        out.copy_from_slice(&digest[..CLAIM_HASH_LEN]);
        Self(out)
    }

    /// Lowercase hex rendering (32 chars)
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl std::fmt::Display for ClaimHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// Inline hex encoding to avoid adding another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: &[u8]) -> String {
        let mut s = String::with_capacity(bytes.len() * 2);
        for &b in bytes {
            s.push(HEX_CHARS[(b >> 4) as usize] as char);
            s.push(HEX_CHARS[(b & 0x0f) as usize] as char);
        }
        s
    }
}
