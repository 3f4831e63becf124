//! Simulated failure injection.
//!
//! Handlers ask an injected [`FailureInjector`] whether a critical step should
//! fail instead of consulting a global random source. Production wiring uses
//! [`RandomFailureInjector`]; tests pin the outcome with
//! [`FixedFailureInjector`] or seed the random one.

use std::sync::Mutex;

/// Decides whether a simulated failure happens.
pub trait FailureInjector: Send + Sync + std::fmt::Debug {
    /// Returns true when the caller should fail. `probability` is in `[0, 1]`.
    fn should_fail(&self, probability: f64) -> bool;
}

/// Uniform sampler backed by `fastrand`.
#[derive(Debug)]
pub struct RandomFailureInjector {
    rng: Mutex<fastrand::Rng>,
}

impl RandomFailureInjector {
    /// Sampler seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Sampler that yields the same sequence for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl Default for RandomFailureInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl FailureInjector for RandomFailureInjector {
    fn should_fail(&self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        // A poisoned lock still holds a usable generator.
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.f64() < probability
    }
}

/// Injector with a predetermined answer, ignoring the probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFailureInjector {
    fail: bool,
}

impl FixedFailureInjector {
    pub fn always_fail() -> Self {
        Self { fail: true }
    }

    pub fn never_fail() -> Self {
        Self { fail: false }
    }
}

impl FailureInjector for FixedFailureInjector {
    fn should_fail(&self, _probability: f64) -> bool {
        self.fail
    }
}
