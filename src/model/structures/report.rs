use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::structures::{insight::GlobalInsight, rider_rating::RiderRating};

/// Output of one full engine run: the rider table (ranked by rating
/// descending, id ascending on ties) and the era insight series in date
/// order. Handed back by value; the engine keeps nothing between runs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RatingReport {
    pub riders: IndexMap<String, RiderRating>,
    pub insights: Vec<GlobalInsight>
}

impl RatingReport {
    /// Riders in ranked order, highest rated first.
    pub fn ranked(&self) -> impl Iterator<Item = &RiderRating> {
        self.riders.values()
    }
}
