use std::sync::atomic::{AtomicU64, Ordering};

static SEED_COUNTER: AtomicU64 = AtomicU64::new(0x5EED_0F_C0FFEE);

/// Small deterministic generator owned by one evaluation context.
///
/// Contexts are never shared across threads, so each one carries its own state and no locking
/// is needed when particles are evaluated in parallel.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Create a generator with a seed unique within this process.
    pub fn from_process_counter() -> Self {
        let n = SEED_COUNTER.fetch_add(0x9E37_79B9_7F4A_7C15, Ordering::Relaxed);
        Self::new(n)
    }

    /// Next raw 64-bit sample.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform sample in `[0, 1)`.
    pub fn next_f32_01(&mut self) -> f32 {
        // 24 bits of precision.
        let v = self.next_u64() >> 40;
        (v as f32) * (1.0 / ((1u32 << 24) as f32))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
