use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::model::{
    constants::VOLATILITY_WINDOW,
    structures::tier::{ClassTier, TierCounters}
};

/// One point of a rider's rating trajectory. The first point of every
/// rider is labelled `"Debut"`; subsequent points carry the race name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RatingPoint {
    pub date: String,
    pub rating: i32,
    pub race_name: String
}

pub const DEBUT_LABEL: &str = "Debut";

/// Full rating state for one rider, mutated across a single engine run
/// and handed back by value in the final report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RiderRating {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub rating: i32,
    /// Monotonically non-decreasing across the run.
    pub peak_rating: i32,
    pub peak_year: String,
    pub history: Vec<RatingPoint>,
    /// `None` until the rider has been through a rated (N >= 2) race.
    pub last_race_date: Option<String>,
    pub tier: ClassTier,
    pub tier_counts: TierCounters,
    pub tier_wins: TierCounters,
    pub tier_top3s: TierCounters,
    pub tier_top5s: TierCounters,
    pub tier_top10s: TierCounters,
    pub tier_elite_races: TierCounters,
    pub elite_races: u32,
    /// Population standard deviation of `recent_deltas`; 0 until the
    /// window holds at least 2 entries.
    pub volatility: f64,
    pub recent_deltas: VecDeque<f64>,
    /// Net rating transferred against each named opponent. Positive means
    /// this rider has taken points off that opponent overall. BTreeMap so
    /// report serialization is deterministic.
    pub nemesis_map: BTreeMap<String, f64>,
    pub mulligans_used: u32
}

impl RiderRating {
    /// Creates a debut state seeded at `rating`, with a single "Debut"
    /// history point and peak equal to the seed.
    pub fn debut(
        id: String,
        name: &str,
        number: Option<String>,
        rating: i32,
        date: &str,
        year: &str,
        tier: ClassTier
    ) -> RiderRating {
        RiderRating {
            id,
            name: name.trim().to_string(),
            number,
            rating,
            peak_rating: rating,
            peak_year: year.to_string(),
            history: vec![RatingPoint {
                date: date.to_string(),
                rating,
                race_name: DEBUT_LABEL.to_string()
            }],
            last_race_date: None,
            tier,
            tier_counts: TierCounters::default(),
            tier_wins: TierCounters::default(),
            tier_top3s: TierCounters::default(),
            tier_top5s: TierCounters::default(),
            tier_top10s: TierCounters::default(),
            tier_elite_races: TierCounters::default(),
            elite_races: 0,
            volatility: 0.0,
            recent_deltas: VecDeque::new(),
            nemesis_map: BTreeMap::new(),
            mulligans_used: 0
        }
    }

    /// Number of races on record, debut entry inclusive. Drives the
    /// provisional-period check.
    pub fn race_count(&self) -> usize {
        self.history.len()
    }

    /// Pushes a signed (unrounded) rating delta into the rolling window,
    /// evicting the oldest entry past the window size, and recomputes
    /// volatility once the window holds at least 2 entries.
    pub fn record_delta(&mut self, delta: f64) {
        self.recent_deltas.push_back(delta);
        if self.recent_deltas.len() > VOLATILITY_WINDOW {
            self.recent_deltas.pop_front();
        }

        if self.recent_deltas.len() > 1 {
            self.volatility = population_std_dev(self.recent_deltas.iter().copied());
        }
    }

    /// Applies a finalized post-race rating, maintaining the peak and the
    /// history trail.
    pub fn apply_rating(&mut self, new_rating: i32, date: &str, year: &str, race_name: &str, tier: ClassTier) {
        if new_rating > self.peak_rating {
            self.peak_rating = new_rating;
            self.peak_year = year.to_string();
        }

        self.rating = new_rating;
        self.history.push(RatingPoint {
            date: date.to_string(),
            rating: new_rating,
            race_name: race_name.to_string()
        });
        self.last_race_date = Some(date.to_string());
        self.tier = tier;
    }

    /// Accumulates net rating transferred against a named opponent.
    pub fn record_nemesis(&mut self, opponent_name: &str, delta: f64) {
        *self.nemesis_map.entry(opponent_name.to_string()).or_insert(0.0) += delta;
    }
}

fn population_std_dev(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let n = values.clone().count() as f64;
    let mean = values.clone().sum::<f64>() / n;
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    variance.sqrt()
}
