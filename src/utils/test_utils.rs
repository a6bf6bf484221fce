use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::{
    identity::rider_id,
    structures::{
        race::{Race, RaceResult},
        rider_rating::{RatingPoint, RiderRating},
        tier::ClassTier
    }
};

pub fn generate_result(position: u32, name: &str) -> RaceResult {
    RaceResult {
        position,
        rider_name: name.to_string(),
        number: None,
        machine: None,
        moto1: None,
        moto2: None
    }
}

/// A race whose results are the given names in finishing order,
/// positions 1..=n.
pub fn generate_race(id: &str, date: &str, tier: ClassTier, finish_order: &[&str]) -> Race {
    let results = finish_order
        .iter()
        .enumerate()
        .map(|(i, name)| generate_result(i as u32 + 1, name))
        .collect();

    generate_race_with_results(id, date, tier, results)
}

pub fn generate_race_with_results(id: &str, date: &str, tier: ClassTier, results: Vec<RaceResult>) -> Race {
    Race {
        id: id.to_string(),
        name: format!("Race {id}"),
        date: date.to_string(),
        venue: "Test Track".to_string(),
        tier,
        discipline: Default::default(),
        results
    }
}

/// A freshly-debuted rider at the given rating.
pub fn generate_rider(name: &str, rating: i32, date: &str, tier: ClassTier) -> RiderRating {
    let year = date.split('-').next().unwrap_or(date);
    RiderRating::debut(rider_id(name), name, None, rating, date, year, tier)
}

/// A rider with `n_races` history entries (debut inclusive), for tests
/// that need someone past the provisional period.
pub fn generate_rider_with_history(name: &str, rating: i32, n_races: usize, tier: ClassTier) -> RiderRating {
    let mut rider = generate_rider(name, rating, "2015-01-01", tier);
    for i in 1..n_races {
        rider.history.push(RatingPoint {
            date: format!("2015-{:02}-01", (i % 12) + 1),
            rating,
            race_name: format!("Backfill {i}")
        });
    }

    rider
}

/// A field of `n` riders with seeded pseudo-random ratings around `base`,
/// reproducible across runs.
pub fn generate_rated_field(n: usize, base: i32, spread: i32, seed: u64, tier: ClassTier) -> Vec<RiderRating> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..n)
        .map(|i| {
            let rating = base + rng.random_range(-spread..=spread);
            generate_rider(&format!("Rider {i}"), rating, "2015-01-01", tier)
        })
        .collect()
}
