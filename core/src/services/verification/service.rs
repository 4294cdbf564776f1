//! Confirmation code issuer.
//!
//! Codes are never stored. A code is a keyed digest over the user's
//! persisted state: user id, role, and the monotonic `code_epoch`. Any
//! change to those inputs invalidates every code issued before it, which is
//! how one-time use is enforced (a successful exchange advances the epoch).

use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};

use crate::domain::entities::user::User;

/// Length of the hex-encoded confirmation code
pub const CODE_LENGTH: usize = 32;

/// Stateless issuer of confirmation codes
#[derive(Clone)]
pub struct CodeIssuer {
    secret: String,
}

impl CodeIssuer {
    /// Creates an issuer with the given server-side secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Derive the confirmation code currently valid for `user`
    pub fn issue(&self, user: &User) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(user.id.as_bytes());
        hasher.update(user.role.as_str().as_bytes());
        hasher.update(user.code_epoch.to_be_bytes());
        let digest = hasher.finalize();
        hex::encode(digest)[..CODE_LENGTH].to_string()
    }

    /// Verify a submitted code against the user's current state.
    ///
    /// The comparison is constant-time so the code cannot be guessed
    /// byte-by-byte through timing.
    pub fn verify(&self, user: &User, candidate: &str) -> bool {
        let expected = self.issue(user);
        constant_time_eq(expected.as_bytes(), candidate.as_bytes())
    }
}
