//! Inter-record pacing.

use rand::Rng;
use std::time::Duration;

/// Pacing configuration for the generation loop.
///
/// When sleeping is enabled, each inter-record delay is drawn uniformly from
/// `[0, max_sleep)`. Pacing is fully disableable so tests can run the loop
/// at full speed with zero cumulative sleep.
#[derive(Debug, Clone, Copy)]
pub struct PaceConfig {
    pub enable_sleep: bool,
    pub max_sleep: Duration,
}

impl PaceConfig {
    /// No sleeping between records.
    pub fn disabled() -> Self {
        Self {
            enable_sleep: false,
            max_sleep: Duration::ZERO,
        }
    }

    /// Uniform random delay in `[0, max_sleep)` between records.
    pub fn uniform(max_sleep: Duration) -> Self {
        Self {
            enable_sleep: true,
            max_sleep,
        }
    }

    /// Draw the next inter-record delay.
    pub fn next_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        if !self.enable_sleep || self.max_sleep.is_zero() {
            return Duration::ZERO;
        }
        self.max_sleep.mul_f64(rng.gen::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_disabled_pacing_never_sleeps() {
        let mut rng = StdRng::seed_from_u64(42);
        let pace = PaceConfig::disabled();

        for _ in 0..1000 {
            assert_eq!(pace.next_delay(&mut rng), Duration::ZERO);
        }
    }

    #[test]
    fn test_uniform_delay_stays_below_max() {
        let mut rng = StdRng::seed_from_u64(42);
        let max = Duration::from_secs(2);
        let pace = PaceConfig::uniform(max);

        for _ in 0..1000 {
            assert!(pace.next_delay(&mut rng) < max);
        }
    }

    #[test]
    fn test_uniform_delay_is_not_fixed_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        let pace = PaceConfig::uniform(Duration::from_secs(2));

        let delays: std::collections::HashSet<u128> =
            (0..100).map(|_| pace.next_delay(&mut rng).as_nanos()).collect();
        assert!(delays.len() > 90);
    }
}
