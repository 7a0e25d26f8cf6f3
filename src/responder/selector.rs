//! Sources of randomness for picking among canned responses.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one response out of an intent's list.
pub trait ResponseSelector: Send + Sync + std::fmt::Debug {
    /// Choose an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;

    /// Choose one of `responses`, or `None` if there are none.
    fn select<'a>(&self, responses: &'a [String]) -> Option<&'a str> {
        if responses.is_empty() {
            return None;
        }
        let index = self.pick(responses.len()).min(responses.len() - 1);
        Some(responses[index].as_str())
    }

    fn name(&self) -> &'static str;
}

/// Uniform choice from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl ResponseSelector for RandomSelector {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Uniform choice from a seeded generator, reproducible across runs.
#[derive(Debug)]
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        SeededSelector {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ResponseSelector for SeededSelector {
    fn pick(&self, len: usize) -> usize {
        self.rng.lock().random_range(0..len)
    }

    fn name(&self) -> &'static str {
        "seeded"
    }
}

/// Always the first response.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSelector;

impl ResponseSelector for FirstSelector {
    fn pick(&self, _len: usize) -> usize {
        0
    }

    fn name(&self) -> &'static str {
        "first"
    }
}
