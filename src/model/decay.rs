use std::collections::{BTreeMap, HashMap, HashSet};

use itertools::Itertools;
use tracing::debug;

use crate::model::{
    constants::{
        EFFECTIVE_RETENTION_CEILING, EFFECTIVE_RETENTION_FLOOR, RETENTION_CEILING, RETENTION_FALLBACK,
        RETENTION_FLOOR
    },
    identity::rider_id,
    rating_tracker::RiderTracker,
    structures::race::Race
};

/// # Season churn decay
///
/// At every year boundary in the race sequence, all ratings regress once
/// toward the pool mean. The retention rate for the transition into a
/// year is derived from measured rider turnover:
///
/// - overlap ratio = |riders in prior year ∩ riders in new year| /
///   |riders in prior year|, clamped to [0.5, 0.95]
/// - effective rate = clamp(overlap + user offset, 0.1, 1.0)
///
/// A high-turnover winter (privateer churn) pulls the pool harder toward
/// the mean; a stable grid barely moves.
///
/// Rates are precomputed for the whole run from the date-sorted race
/// list, keyed by the year being entered.
pub fn retention_rates<'a>(sorted_races: impl IntoIterator<Item = &'a Race>) -> HashMap<String, f64> {
    let mut year_to_riders: BTreeMap<&str, HashSet<String>> = BTreeMap::new();
    for race in sorted_races {
        let riders = year_to_riders.entry(race.year()).or_default();
        for result in &race.results {
            riders.insert(rider_id(&result.rider_name));
        }
    }

    let mut rates = HashMap::new();
    for (prev_year, curr_year) in year_to_riders.keys().copied().tuple_windows() {
        let prev = &year_to_riders[prev_year];
        let curr = &year_to_riders[curr_year];

        let rate = if prev.is_empty() {
            RETENTION_FALLBACK
        } else {
            let overlap = prev.intersection(curr).count();
            overlap as f64 / prev.len() as f64
        };

        rates.insert(
            curr_year.to_string(),
            rate.clamp(RETENTION_FLOOR, RETENTION_CEILING)
        );
    }

    rates
}

/// Combines a computed retention rate with the user offset, clamped to
/// its hard bounds.
pub fn effective_rate(base_rate: f64, offset: f64) -> f64 {
    (base_rate + offset).clamp(EFFECTIVE_RETENTION_FLOOR, EFFECTIVE_RETENTION_CEILING)
}

/// Applies one season's regression to every tracked rider:
/// `rating = round(mean + (rating - mean) * rate)`.
///
/// `mean_fallback` stands in for the pool mean when no riders are tracked
/// yet (a decay on an empty pool is a no-op either way).
pub fn apply_season_decay(tracker: &mut RiderTracker, rate: f64, mean_fallback: i32) {
    let mean = tracker.mean_rating(mean_fallback);

    debug!(rate, mean, riders = tracker.len(), "applying season churn decay");

    for (_, rider) in tracker.iter_mut() {
        let distance = rider.rating as f64 - mean;
        rider.rating = (mean + distance * rate).round() as i32;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::{
        model::{
            decay::{apply_season_decay, effective_rate, retention_rates},
            rating_tracker::RiderTracker,
            structures::tier::ClassTier
        },
        utils::test_utils::{generate_race, generate_rider}
    };

    #[test]
    fn test_retention_from_year_overlap() {
        let races = vec![
            generate_race("r1", "2019-05-01", ClassTier::Premier, &["A", "B", "C", "D"]),
            generate_race("r2", "2020-05-01", ClassTier::Premier, &["A", "B", "E", "F"]),
        ];

        let rates = retention_rates(&races);

        // 2 of 4 riders returned
        assert_abs_diff_eq!(*rates.get("2020").unwrap(), 0.5);
        assert!(!rates.contains_key("2019"));
    }

    #[test]
    fn test_retention_clamped_to_band() {
        // Full overlap would be 1.0; clamps to 0.95
        let races = vec![
            generate_race("r1", "2019-05-01", ClassTier::Premier, &["A", "B"]),
            generate_race("r2", "2020-05-01", ClassTier::Premier, &["A", "B"]),
        ];
        assert_abs_diff_eq!(*retention_rates(&races).get("2020").unwrap(), 0.95);

        // Zero overlap clamps up to 0.5
        let races = vec![
            generate_race("r1", "2019-05-01", ClassTier::Premier, &["A", "B"]),
            generate_race("r2", "2020-05-01", ClassTier::Premier, &["C", "D"]),
        ];
        assert_abs_diff_eq!(*retention_rates(&races).get("2020").unwrap(), 0.5);
    }

    #[test]
    fn test_effective_rate_always_in_bounds() {
        for base in [0.0, 0.3, 0.5, 0.85, 0.95, 1.0] {
            for offset in [-1.0, -0.5, -0.1, 0.0, 0.1, 0.5, 1.0] {
                let rate = effective_rate(base, offset);
                assert!((0.1..=1.0).contains(&rate), "rate {rate} out of bounds");
            }
        }
    }

    #[test]
    fn test_decay_regresses_toward_pool_mean() {
        let mut tracker = RiderTracker::new();
        tracker.insert(generate_rider("A", 1800, "2019-01-01", ClassTier::Premier));
        tracker.insert(generate_rider("B", 1200, "2019-01-01", ClassTier::Premier));

        // Mean 1500, rate 0.5: distances halve
        apply_season_decay(&mut tracker, 0.5, 1500);

        assert_eq!(tracker.get("a").unwrap().rating, 1650);
        assert_eq!(tracker.get("b").unwrap().rating, 1350);
    }

    #[test]
    fn test_decay_at_full_retention_is_identity() {
        let mut tracker = RiderTracker::new();
        tracker.insert(generate_rider("A", 1777, "2019-01-01", ClassTier::Premier));
        tracker.insert(generate_rider("B", 1413, "2019-01-01", ClassTier::Premier));

        apply_season_decay(&mut tracker, 1.0, 1500);

        assert_eq!(tracker.get("a").unwrap().rating, 1777);
        assert_eq!(tracker.get("b").unwrap().rating, 1413);
    }
}
