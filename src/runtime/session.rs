// src/runtime/session.rs
use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Hex characters shown for a session.
const SHORT_LEN: usize = 8;

/// Identifier of one core lifetime, regenerated on every reset.
///
/// Drawn from the core's own random source so seeded cores get
/// reproducible sessions. Displays as 8 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill(&mut bytes);
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }

    pub fn short(&self) -> String {
        let mut encoded = self.0.simple().to_string();
        encoded.truncate(SHORT_LEN);
        encoded
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

impl Serialize for SessionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_short_form_is_eight_hex_chars() {
        let id = SessionId::generate(&mut StdRng::seed_from_u64(1));
        let short = id.to_string();
        assert_eq!(short.len(), 8);
        assert!(short.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(id.uuid().get_version_num(), 4);
    }

    #[test]
    fn test_seeded_sessions_repeat() {
        let a = SessionId::generate(&mut StdRng::seed_from_u64(9));
        let b = SessionId::generate(&mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
