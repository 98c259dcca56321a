use std::fmt;

use sha2::{Digest, Sha256};

use super::domain::Pid;

/// Hex digest prefix length kept for on-screen readability. PIDs are opaque
/// tokens, not full-strength 256-bit identifiers.
pub const PID_LENGTH: usize = 16;

/// Process-wide hashing salt, loaded once at startup and read-only afterward.
/// The inner value is redacted from `Debug` output so it cannot leak into logs
/// or error artifacts.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    /// Accepts any non-empty value; surrounding whitespace is not part of the
    /// secret. Returns `None` for missing/blank input so the caller can treat
    /// it as a fatal configuration condition.
    pub fn new(value: &str) -> Option<Salt> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Salt(trimmed.to_string()))
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Salt(<redacted>)")
    }
}

/// Derive the pseudonymous ID for a raw identifier.
///
/// Pure function: identical identifier and salt always produce the identical
/// PID. The identifier is trimmed and case-folded first, so `"A@x.org "` and
/// `"a@x.org"` collide by design. Empty input is valid and hashes to a
/// deterministic PID; callers needing per-row uniqueness without an identifier
/// seed the input with [`row_token`] instead.
pub fn hash_identifier(raw: &str, salt: &Salt) -> Pid {
    let normalized = raw.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(normalized.as_bytes());
    let digest = hasher.finalize();

    let mut hex = String::with_capacity(PID_LENGTH);
    for byte in digest.iter().take(PID_LENGTH / 2) {
        hex.push_str(&format!("{byte:02x}"));
    }
    Pid(hex)
}

/// Row-local discriminator for records with no mapped identifier.
pub fn row_token(row: usize) -> String {
    format!("row_{row}")
}
