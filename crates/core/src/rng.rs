//! Seeded random streams shared by generation, combat, and status resolution.
//! Every concern draws from its own stream derived from the run seed, so adding draws to one
//! system never shifts the values another system sees.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Layout,
    Decoration,
    Combat,
}

impl Stream {
    fn code(self) -> u64 {
        match self {
            Stream::Layout => 1,
            Stream::Decoration => 2,
            Stream::Combat => 3,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SimRng {
    inner: ChaCha8Rng,
}

impl SimRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn for_stream(run_seed: u64, stream: Stream) -> Self {
        Self::seed_from_u64(derive_stream_seed(run_seed, stream))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform integer in `min..=max`.
    pub fn range_inclusive(&mut self, min_value: i32, max_value: i32) -> i32 {
        debug_assert!(min_value <= max_value);
        let span = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
        min_value + (self.next_u64() % span) as i32
    }

    pub fn range_usize(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        let span = (max_value - min_value + 1) as u64;
        min_value + (self.next_u64() % span) as usize
    }

    /// Uniform float in `[0, 1)` built from the top 53 bits of one draw.
    pub fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    pub fn coin(&mut self) -> bool {
        self.next_u64() & 1 == 0
    }

    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        Some(items[self.range_usize(0, items.len() - 1)])
    }
}

pub fn derive_stream_seed(run_seed: u64, stream: Stream) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= stream.code().wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
