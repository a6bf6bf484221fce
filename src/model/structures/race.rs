use serde::{Deserialize, Serialize};

use crate::model::structures::{discipline::Discipline, tier::ClassTier};

/// A single finishing entry within a race. Fields beyond position and
/// rider name are passed through untouched; the engine ignores them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RaceResult {
    pub position: u32,
    pub rider_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moto1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moto2: Option<String>
}

/// One race event. Dates are ISO `YYYY-MM-DD` strings and sort
/// lexicographically; the engine orders the full input by date before
/// processing anything.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Race {
    pub id: String,
    pub name: String,
    pub date: String,
    pub venue: String,
    pub tier: ClassTier,
    #[serde(default)]
    pub discipline: Discipline,
    pub results: Vec<RaceResult>
}

impl Race {
    /// The season a race belongs to, taken from the date's year component.
    pub fn year(&self) -> &str {
        self.date.split('-').next().unwrap_or(&self.date)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        model::structures::{race::Race, tier::ClassTier},
        utils::test_utils::generate_race
    };

    #[test]
    fn test_year_from_iso_date() {
        let race = generate_race("anaheim-1", "2021-01-16", ClassTier::Premier, &["A", "B"]);
        assert_eq!(race.year(), "2021");
    }

    #[test]
    fn test_deserialize_ignores_opaque_fields() {
        let json = r#"{
            "id": "r1",
            "name": "Hangtown National",
            "date": "1997-05-18",
            "venue": "Hangtown",
            "tier": "PREMIER",
            "discipline": "MX",
            "results": [
                { "position": 1, "rider_name": "J. McGrath", "machine": "Honda CR250" },
                { "position": 2, "rider_name": "E. Stanton" }
            ]
        }"#;

        let race: Race = serde_json::from_str(json).unwrap();
        assert_eq!(race.results.len(), 2);
        assert_eq!(race.results[0].machine.as_deref(), Some("Honda CR250"));
        assert_eq!(race.results[1].machine, None);
    }
}
