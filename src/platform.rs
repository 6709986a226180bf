//! Host facilities used by the headless runner.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Sleeps precisely; short waits spin instead of yielding to the scheduler.
pub fn sleep(duration: Duration) {
    spin_sleep::sleep(duration);
}

/// A fast generator, reproducible when seeded.
pub fn rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}
