//! Synthetic demand history for items that only carry aggregate sales.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use time::{Date, Duration};

use crate::forecast::{HistoricalSeries, Observation};

/// Growth applied linearly across the window (20% by the last day).
const WINDOW_GROWTH: f64 = 0.2;
/// Noise standard deviation as a share of the base demand.
const NOISE_SHARE: f64 = 0.1;

/// RNG for one history window; seeded runs are reproducible.
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Per-item seed: `seed` mixed with an FNV-1a hash of the SKU, so seeded
/// runs repeat while each item draws its own noise.
pub fn item_seed(seed: u64, sku: &str) -> u64 {
    let hash = sku.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    });
    seed ^ hash
}

/// `days` daily observations ending the day before `as_of`.
///
/// Day `i` is `base * (1 + i/days * 0.2)` plus gaussian noise with
/// standard deviation `base * 0.1`, floored at zero.
pub fn synthesize<R: Rng>(base_demand: f64, days: usize, as_of: Date, rng: &mut R) -> HistoricalSeries {
    let observations = (0..days)
        .map(|i| {
            let trend = base_demand * (1.0 + i as f64 / days as f64 * WINDOW_GROWTH);
            let noise = standard_normal(rng) * base_demand * NOISE_SHARE;
            Observation {
                date: as_of.saturating_sub(Duration::days((days - i) as i64)),
                value: (trend + noise).max(0.0),
            }
        })
        .collect();
    HistoricalSeries::from_ordered(observations)
}

/// Box-Muller transform.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn window_ends_before_as_of() {
        let h = synthesize(10.0, 90, date!(2024 - 06 - 30), &mut rng(Some(1)));
        assert_eq!(h.len(), 90);
        assert_eq!(h.last_date(), Some(date!(2024 - 06 - 29)));
        assert_eq!(h.observations()[0].date, date!(2024 - 04 - 01));
        assert!(h.values().iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn seeded_runs_repeat() {
        let as_of = date!(2024 - 06 - 30);
        let a = synthesize(5.0, 30, as_of, &mut rng(Some(42)));
        let b = synthesize(5.0, 30, as_of, &mut rng(Some(42)));
        assert_eq!(a, b);
    }

    #[test]
    fn item_seed_depends_on_sku() {
        assert_eq!(item_seed(7, "SKU0"), item_seed(7, "SKU0"));
        assert_ne!(item_seed(7, "SKU0"), item_seed(7, "SKU1"));
        assert_ne!(item_seed(7, "SKU0"), item_seed(8, "SKU0"));
    }

    #[test]
    fn zero_base_is_all_zero() {
        let h = synthesize(0.0, 10, date!(2024 - 06 - 30), &mut rng(Some(3)));
        assert!(h.values().iter().all(|v| *v == 0.0));
    }
}
