//! Record identifiers drawn from a record's random stream.

use rand::RngCore;
use std::collections::HashSet;
use uuid::Uuid;

/// Draw a UUID v4 from the provided random source.
pub fn draw_uuid<R: RngCore + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

/// Identifiers issued so far by one generator.
#[derive(Debug, Default)]
pub struct IdRegistry {
    issued: HashSet<Uuid>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as issued. Returns `false` if it was already taken.
    pub fn claim(&mut self, id: Uuid) -> bool {
        self.issued.insert(id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.issued.contains(id)
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_uuid_version() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let id = draw_uuid(&mut rng);
        assert_eq!(id.get_version_num(), 4);
    }

    #[test]
    fn test_uuid_deterministic() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(draw_uuid(&mut rng1), draw_uuid(&mut rng2));
        assert_ne!(draw_uuid(&mut rng1), draw_uuid(&mut rng1));
    }

    #[test]
    fn test_registry_detects_collision() {
        let mut registry = IdRegistry::new();
        let id = Uuid::from_u128(1);
        assert!(registry.claim(id));
        assert!(!registry.claim(id));
        assert_eq!(registry.len(), 1);
    }
}
