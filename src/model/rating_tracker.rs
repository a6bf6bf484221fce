use indexmap::IndexMap;

use crate::model::{
    constants::{CHASE_PACK_END, CHASE_PACK_START, INSIGHT_MIN_POOL, INSIGHT_TOP_N},
    structures::{insight::GlobalInsight, rider_rating::RiderRating, tier::ClassTier}
};

/// The rider table for one engine run. Keyed by folded rider identifier;
/// private to the run and handed back by value at the end.
///
/// Backed by an IndexMap so ranking can be done with an in-place sort and
/// iteration order stays deterministic across identical runs. Ties in
/// rating break by identifier, lexicographically ascending.
pub struct RiderTracker {
    riders: IndexMap<String, RiderRating>
}

impl Default for RiderTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RiderTracker {
    pub fn new() -> RiderTracker {
        RiderTracker {
            riders: IndexMap::new()
        }
    }

    pub fn contains(&self, rider_id: &str) -> bool {
        self.riders.contains_key(rider_id)
    }

    pub fn get(&self, rider_id: &str) -> Option<&RiderRating> {
        self.riders.get(rider_id)
    }

    pub fn get_mut(&mut self, rider_id: &str) -> Option<&mut RiderRating> {
        self.riders.get_mut(rider_id)
    }

    pub fn insert(&mut self, rating: RiderRating) {
        self.riders.insert(rating.id.clone(), rating);
    }

    pub fn len(&self) -> usize {
        self.riders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RiderRating)> {
        self.riders.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut RiderRating)> {
        self.riders.iter_mut()
    }

    /// Arithmetic mean rating across all tracked riders, or `fallback`
    /// for an empty pool.
    pub fn mean_rating(&self, fallback: i32) -> f64 {
        if self.riders.is_empty() {
            return fallback as f64;
        }

        let total: i64 = self.riders.values().map(|r| r.rating as i64).sum();
        total as f64 / self.riders.len() as f64
    }

    /// Highest current rating among riders whose current tier matches.
    pub fn max_rating_in_tier(&self, tier: ClassTier) -> Option<i32> {
        self.riders
            .values()
            .filter(|r| r.tier == tier)
            .map(|r| r.rating)
            .max()
    }

    /// Sorts the table into ranked order: rating descending, identifier
    /// ascending on equal ratings.
    pub fn sort(&mut self) {
        self.riders
            .sort_by(|k1, v1, k2, v2| v2.rating.cmp(&v1.rating).then_with(|| k1.cmp(k2)));
    }

    /// Ranks the pool and records one era insight, provided at least 10
    /// riders are tracked. Leaves the table in ranked order.
    pub fn snapshot_insight(&mut self, date: &str) -> Option<GlobalInsight> {
        if self.riders.len() < INSIGHT_MIN_POOL {
            return None;
        }

        self.sort();
        let ranked: Vec<&RiderRating> = self.riders.values().collect();

        let top10_sum: i64 = ranked.iter().take(INSIGHT_TOP_N).map(|r| r.rating as i64).sum();
        let avg_top10 = (top10_sum as f64 / INSIGHT_TOP_N as f64).round() as i32;

        let chase_pack = &ranked[CHASE_PACK_START..CHASE_PACK_END];
        let chase_sum: i64 = chase_pack.iter().map(|r| r.rating as i64).sum();
        let chase_pack_avg = (chase_sum as f64 / chase_pack.len() as f64).round() as i32;

        Some(GlobalInsight {
            date: date.to_string(),
            avg_top10,
            dominance_gap: ranked[0].rating - ranked[1].rating,
            leader: ranked[0].name.clone(),
            runner_up: ranked[1].name.clone(),
            chase_pack_avg
        })
    }

    /// Consumes the tracker, yielding the rider table in its current
    /// (ranked, if `sort` was called) order.
    pub fn into_inner(self) -> IndexMap<String, RiderRating> {
        self.riders
    }
}
