//! Scripted random source for pinning sampler behaviour in tests.

use rand::RngCore;

/// Convert a unit float back into a `u64` that [`crate::sampler::unit`] maps
/// onto it.
pub fn unit_to_u64(u: f64) -> u64 {
    ((u * (1u64 << 53) as f64) as u64) << 11
}

/// `RngCore` that replays a fixed list of values, cycling when exhausted.
pub struct ScriptedRng {
    values: Vec<u64>,
    position: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u64>) -> Self {
        assert!(!values.is_empty(), "scripted rng needs at least one value");
        Self {
            values,
            position: 0,
        }
    }

    pub fn units(units: &[f64]) -> Self {
        Self::new(units.iter().map(|&u| unit_to_u64(u)).collect())
    }

    /// Number of values consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
