//! Per-agent random streams.
//!
//! An agent's stream depends only on the run seed and its own id, so target
//! sampling and mistake rolls for one agent are unaffected by how many other
//! agents share the arena.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// SplitMix64 finaliser; decorrelates the seeds of neighbouring agent ids.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        let seed = mix(run_seed.rotate_left(32) ^ u64::from(agent.0));
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// A value from the `Standard` distribution; `f32` is uniform in `[0, 1)`.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// True with probability `p`.  `p <= 0` never fires, `p >= 1` always does.
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.random::<f32>() < p
    }

    /// Uniform pick from `items`; `None` only when `items` is empty.
    #[inline]
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }
}
