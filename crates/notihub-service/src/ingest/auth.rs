//! Shared-secret check for producers.

use subtle::ConstantTimeEq;

/// The secret producers must present.
///
/// An empty secret means accept-all mode.
#[derive(Clone, Default)]
pub struct SharedSecret {
    secret: Option<String>,
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret")
            .field("enforced", &self.is_enforced())
            .finish()
    }
}

impl SharedSecret {
    /// Creates a secret; an empty string disables enforcement.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        Self {
            secret: (!secret.is_empty()).then_some(secret),
        }
    }

    /// Accept-all mode.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether a secret is configured.
    pub fn is_enforced(&self) -> bool {
        self.secret.is_some()
    }

    /// Checks a presented token in constant time.
    pub fn verify(&self, presented: Option<&str>) -> bool {
        match (&self.secret, presented) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(expected), Some(token)) => {
                bool::from(expected.as_bytes().ct_eq(token.as_bytes()))
            }
        }
    }
}
