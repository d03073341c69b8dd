//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through SubsystemRng instances derived
//! from the single master seed handed to the engine.
//!
//! Each rule gets its own RNG stream, seeded deterministically
//! from (master_seed XOR slot_index). This means:
//!   - Adding a new rule never changes existing rules' streams.
//!   - Each rule's stream is fully reproducible in isolation.
//!   - Tests can hand a rule any seeded stream they like.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use uuid::Uuid;

/// A named, deterministic RNG for a single rule.
pub struct SubsystemRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SubsystemRng {
    /// Create an RNG from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n). Returns 0 when n is 0.
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        self.inner.next_u64() % n
    }

    /// Uniform float in [lo, hi).
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Bernoulli trial: returns true with probability p.
    /// p >= 1.0 always fires, p <= 0.0 never does.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick one element uniformly. None on an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let idx = self.next_u64_below(items.len() as u64) as usize;
        items.get(idx)
    }

    /// A version-4 UUID built from this stream, so ids replay with the seed.
    pub fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.inner.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// All rule RNGs for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_subsystem(&self, slot: SubsystemSlot) -> SubsystemRng {
        SubsystemRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every rule's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum SubsystemSlot {
    Seed = 0,
    Security = 1,
    Energy = 2,
    Transparency = 3,
    Cleanliness = 4,
}

impl SubsystemSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Security => "security",
            Self::Energy => "energy",
            Self::Transparency => "transparency",
            Self::Cleanliness => "cleanliness",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chance_respects_bounds() {
        let mut rng = SubsystemRng::new(7, 1);
        assert!((0..1000).all(|_| rng.chance(1.0)));
        assert!((0..1000).all(|_| !rng.chance(0.0)));
    }

    #[test]
    fn range_stays_half_open() {
        let mut rng = SubsystemRng::new(11, 2);
        for _ in 0..1000 {
            let v = rng.range_f64(2.0, 3.0);
            assert!((2.0..3.0).contains(&v), "{v} outside [2, 3)");
        }
    }

    #[test]
    fn slots_yield_distinct_streams() {
        let bank = RngBank::new(42);
        let mut a = bank.for_subsystem(SubsystemSlot::Security);
        let mut b = bank.for_subsystem(SubsystemSlot::Energy);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn uuid_replays_with_seed() {
        let mut a = SubsystemRng::new(5, 3);
        let mut b = SubsystemRng::new(5, 3);
        let id = a.uuid();
        assert_eq!(id, b.uuid());
        assert_eq!(id.get_version_num(), 4);
    }
}
