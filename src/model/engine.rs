use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::info;

use crate::{
    model::{
        constants::{
            BASELINE_FRONT_SAMPLE_MAX_POS, BASELINE_FRONT_SEED_MAX_POS, BASELINE_MID_SAMPLE_MAX_POS,
            BASELINE_MID_SAMPLE_MIN_POS, BASELINE_MID_SEED_MAX_POS, ELITE_THRESHOLD_RATIO, ELO_DIVISOR,
            MULLIGAN_FIELD_QUANTILE, MULLIGAN_RATING_MARGIN, RETENTION_FALLBACK
        },
        decay::{apply_season_decay, effective_rate, retention_rates},
        identity::rider_id,
        rating_tracker::RiderTracker,
        structures::{
            config::EngineConfig,
            insight::GlobalInsight,
            race::{Race, RaceResult},
            report::RatingReport,
            rider_rating::RiderRating,
            tier::ClassTier
        }
    },
    utils::progress_utils::progress_bar
};

/// # Rating engine
///
/// The deterministic batch computation: an ordered list of races in, a
/// rider table plus an era-insight series out. One instance is good for
/// exactly one run; nothing is cached between invocations.
///
/// Per race, in order:
/// 1. If the race opens a new season and decay is enabled, regress all
///    ratings toward the pool mean using the measured retention rate.
/// 2. Seed debuts (baseline estimator) and update finish counters.
/// 3. Round-robin pairwise rating exchange with dynamic K-factors and
///    optional loss dampening; deltas accumulate and apply in two passes.
/// 4. Elite-threshold credit against the current tier leader.
/// 5. Era insight snapshot once the pool holds at least 10 riders.
pub struct RatingEngine {
    config: EngineConfig,
    tracker: RiderTracker,
    insights: Vec<GlobalInsight>,
    current_year: Option<String>,
    retention_rates: HashMap<String, f64>
}

impl RatingEngine {
    pub fn new(config: EngineConfig) -> RatingEngine {
        RatingEngine {
            config: config.validated(),
            tracker: RiderTracker::new(),
            insights: Vec::new(),
            current_year: None,
            retention_rates: HashMap::new()
        }
    }

    /// Processes the full race history and yields the final report. The
    /// input is sorted by date ascending; input order only matters for
    /// riders tied on finishing position within a race (stable sort).
    pub fn process(mut self, races: &[Race]) -> RatingReport {
        let mut sorted: Vec<&Race> = races.iter().collect();
        sorted.sort_by(|a, b| a.date.cmp(&b.date));

        self.retention_rates = retention_rates(sorted.iter().copied());

        let bar = progress_bar(sorted.len() as u64, "Processing race results".to_string());
        for race in &sorted {
            self.process_race(race);

            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        self.tracker.sort();

        info!(
            riders = self.tracker.len(),
            insights = self.insights.len(),
            races = sorted.len(),
            "engine run complete"
        );

        RatingReport {
            riders: self.tracker.into_inner(),
            insights: self.insights
        }
    }

    fn process_race(&mut self, race: &Race) {
        let year = race.year().to_string();
        self.maybe_decay(&year);
        self.current_year = Some(year.clone());

        // Stable sort: tied positions keep their input order.
        let mut results: Vec<&RaceResult> = race.results.iter().collect();
        results.sort_by_key(|r| r.position);

        self.register_participants(race, &results, &year);

        let n = results.len();
        if n < 2 {
            // Participation still counts; nothing to exchange.
            return;
        }

        let deltas = self.exchange_ratings(&results, n);
        self.apply_deltas(race, &year, &deltas);
        self.apply_elite_credit(race.tier, deltas.keys());

        if let Some(insight) = self.tracker.snapshot_insight(&race.date) {
            self.insights.push(insight);
        }
    }

    /// One-shot regression toward the pool mean when the race sequence
    /// crosses into a new year.
    fn maybe_decay(&mut self, year: &str) {
        if !self.config.season_decay_enabled {
            return;
        }

        match &self.current_year {
            Some(current) if year > current.as_str() => {
                let base_rate = self
                    .retention_rates
                    .get(year)
                    .copied()
                    .unwrap_or(RETENTION_FALLBACK);
                let rate = effective_rate(base_rate, self.config.decay_offset);

                apply_season_decay(&mut self.tracker, rate, self.config.base_rating);
            }
            _ => {}
        }
    }

    /// # Baseline estimator + bookkeeping
    ///
    /// Seeds a debut state for every rider not yet in the table, then
    /// updates participation and finish counters for everyone in the
    /// field. Baselines come from riders already rated *before* this
    /// race; two debuts in the same race never seed off each other.
    fn register_participants(&mut self, race: &Race, results: &[&RaceResult], year: &str) {
        let (front_avg, mid_avg) = self.baseline_averages(results);

        for result in results {
            let id = rider_id(&result.rider_name);
            if !self.tracker.contains(&id) {
                let seed = if self.config.bootstrap_new_entrants {
                    if result.position <= BASELINE_FRONT_SEED_MAX_POS {
                        front_avg
                    } else if result.position <= BASELINE_MID_SEED_MAX_POS {
                        mid_avg
                    } else {
                        self.config.base_rating
                    }
                } else {
                    self.config.base_rating
                };

                self.tracker.insert(RiderRating::debut(
                    id.clone(),
                    &result.rider_name,
                    result.number.clone(),
                    seed,
                    &race.date,
                    year,
                    race.tier
                ));
            }

            let rider = self.tracker.get_mut(&id).expect("rider was just seeded");
            rider.tier_counts.increment(race.tier);
            if result.position == 1 {
                rider.tier_wins.increment(race.tier);
            }
            if result.position <= 3 {
                rider.tier_top3s.increment(race.tier);
            }
            if result.position <= 5 {
                rider.tier_top5s.increment(race.tier);
            }
            if result.position <= 10 {
                rider.tier_top10s.increment(race.tier);
            }
        }
    }

    /// Average current rating of already-rated riders finishing in the
    /// front band (1-5) and the midfield band (7-12), used to seed
    /// debuts. Falls back to the base rating when a band is empty.
    fn baseline_averages(&self, results: &[&RaceResult]) -> (i32, i32) {
        let rated: Vec<(u32, i32)> = results
            .iter()
            .filter_map(|result| {
                self.tracker
                    .get(&rider_id(&result.rider_name))
                    .map(|r| (result.position, r.rating))
            })
            .collect();

        let front_avg = band_average(
            &rated,
            1,
            BASELINE_FRONT_SAMPLE_MAX_POS,
            self.config.base_rating
        );
        let mid_avg = band_average(
            &rated,
            BASELINE_MID_SAMPLE_MIN_POS,
            BASELINE_MID_SAMPLE_MAX_POS,
            self.config.base_rating
        );

        (front_avg, mid_avg)
    }

    /// # Pairwise rating exchange
    ///
    /// Every ordered pair in the field trades rating on the logistic
    /// expected-outcome model, with the per-pair K scaled by 1/(N-1) so
    /// total exchange is independent of field size. Deltas accumulate
    /// here and are applied afterwards in one pass; within this loop all
    /// rating reads see the pre-race table.
    ///
    /// The nemesis ledger and mulligan use counts do mutate in-loop;
    /// dampening is per-pair, so one bad race can consume several
    /// mulligans up to the cap.
    fn exchange_ratings(&mut self, results: &[&RaceResult], n: usize) -> IndexMap<String, f64> {
        let scale = 1.0 / (n as f64 - 1.0);
        let catastrophe_cutoff = n as f64 * MULLIGAN_FIELD_QUANTILE;
        let mut deltas: IndexMap<String, f64> = IndexMap::new();

        for i in 0..n {
            for j in (i + 1)..n {
                let winner_id = rider_id(&results[i].rider_name);
                let loser_id = rider_id(&results[j].rider_name);

                let (winner_rating, winner_k, winner_name) = {
                    let winner = self.tracker.get(&winner_id).expect("winner was seeded this race");
                    (winner.rating, self.k_factor(winner.race_count()), winner.name.clone())
                };
                let (loser_rating, mut loser_k, loser_name, loser_mulligans) = {
                    let loser = self.tracker.get(&loser_id).expect("loser was seeded this race");
                    (
                        loser.rating,
                        self.k_factor(loser.race_count()),
                        loser.name.clone(),
                        loser.mulligans_used
                    )
                };

                // Mulligan: halve an established leader's loss sensitivity
                // on a bottom-quartile finish, while uses remain.
                if self.config.loss_dampening_enabled
                    && loser_mulligans < self.config.loss_dampening_cap
                    && loser_rating > self.config.base_rating + MULLIGAN_RATING_MARGIN
                    && results[j].position as f64 > catastrophe_cutoff
                {
                    loser_k *= 0.5;
                    self.tracker
                        .get_mut(&loser_id)
                        .expect("loser was seeded this race")
                        .mulligans_used += 1;
                }

                let expected_winner =
                    1.0 / (1.0 + 10f64.powf((loser_rating - winner_rating) as f64 / ELO_DIVISOR));
                let expected_loser = 1.0 - expected_winner;

                let delta_win = winner_k * scale * (1.0 - expected_winner);
                let delta_loss = loser_k * scale * (0.0 - expected_loser);

                *deltas.entry(winner_id.clone()).or_insert(0.0) += delta_win;
                *deltas.entry(loser_id.clone()).or_insert(0.0) += delta_loss;

                self.tracker
                    .get_mut(&winner_id)
                    .expect("winner was seeded this race")
                    .record_nemesis(&loser_name, delta_win);
                self.tracker
                    .get_mut(&loser_id)
                    .expect("loser was seeded this race")
                    .record_nemesis(&winner_name, delta_loss);
            }
        }

        deltas
    }

    /// Elevated K while a rider's recorded history (debut inclusive) is
    /// within the provisional period.
    fn k_factor(&self, race_count: usize) -> f64 {
        if race_count <= self.config.provisional_races as usize {
            self.config.provisional_k
        } else {
            self.config.standard_k
        }
    }

    /// Applies accumulated deltas: the summed delta rounds once per
    /// rider, the unrounded delta feeds the volatility window.
    fn apply_deltas(&mut self, race: &Race, year: &str, deltas: &IndexMap<String, f64>) {
        for (id, delta) in deltas {
            let rider = self.tracker.get_mut(id).expect("delta refers to a seeded rider");
            let new_rating = (rider.rating as f64 + delta).round() as i32;

            rider.record_delta(*delta);
            rider.apply_rating(new_rating, &race.date, year, &race.name, race.tier);
        }
    }

    /// # Elite threshold classification
    ///
    /// The threshold is 90% of the highest current rating among riders
    /// whose current tier matches the race tier, recomputed fresh each
    /// race so it drifts with the pool's peak. Participants at or above
    /// it accrue longevity credit.
    fn apply_elite_credit<'a>(&mut self, tier: ClassTier, participants: impl Iterator<Item = &'a String>) {
        let Some(max_tier_rating) = self.tracker.max_rating_in_tier(tier) else {
            return;
        };
        let threshold = max_tier_rating as f64 * ELITE_THRESHOLD_RATIO;

        for id in participants {
            if let Some(rider) = self.tracker.get_mut(id) {
                if rider.rating as f64 >= threshold {
                    rider.elite_races += 1;
                    rider.tier_elite_races.increment(tier);
                }
            }
        }
    }
}

fn band_average(rated: &[(u32, i32)], min_pos: u32, max_pos: u32, fallback: i32) -> i32 {
    let band: Vec<i32> = rated
        .iter()
        .filter(|(pos, _)| (min_pos..=max_pos).contains(pos))
        .map(|(_, rating)| *rating)
        .collect();

    if band.is_empty() {
        return fallback;
    }

    (band.iter().map(|r| *r as f64).sum::<f64>() / band.len() as f64).round() as i32
}
