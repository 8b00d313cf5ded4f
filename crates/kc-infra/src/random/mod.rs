//! Uniform picks backed by the thread-local generator.

use kc_core::ports::RandomPort;
use rand::Rng;

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomPort for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        rand::rng().random_range(0..len)
    }

    fn pick_in_range(&self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        rand::rng().random_range(min..=max)
    }
}
