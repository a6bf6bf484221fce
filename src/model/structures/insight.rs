use serde::{Deserialize, Serialize};

/// Pool-wide strength snapshot, recorded after each race once at least
/// 10 riders are tracked.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GlobalInsight {
    pub date: String,
    /// Mean rating of the top 10, rounded.
    pub avg_top10: i32,
    /// Rating gap between rank 1 and rank 2.
    pub dominance_gap: i32,
    pub leader: String,
    pub runner_up: String,
    /// Mean rating of ranks 2 through 6, rounded.
    pub chase_pack_avg: i32
}
