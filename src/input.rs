use std::{fs, path::Path};

use thiserror::Error;
use tracing::warn;

use crate::model::structures::{race::Race, report::RatingReport};

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error
    }
}

/// Loads a race file (JSON array of races). Races with an empty results
/// list are dropped here; the engine does not defend against them.
pub fn load_races(path: &Path) -> Result<Vec<Race>, ProcessorError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| ProcessorError::Io {
        path: display.clone(),
        source
    })?;

    let races: Vec<Race> = serde_json::from_str(&text).map_err(|source| ProcessorError::Parse {
        path: display,
        source
    })?;

    let total = races.len();
    let races: Vec<Race> = races.into_iter().filter(|r| !r.results.is_empty()).collect();
    if races.len() < total {
        warn!(dropped = total - races.len(), "dropped races with no results");
    }

    Ok(races)
}

/// Writes the final report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &RatingReport) -> Result<(), ProcessorError> {
    let display = path.display().to_string();
    let json = serde_json::to_string_pretty(report).map_err(|source| ProcessorError::Parse {
        path: display.clone(),
        source
    })?;

    fs::write(path, json).map_err(|source| ProcessorError::Io {
        path: display,
        source
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::input::{load_races, ProcessorError};

    #[test]
    fn test_load_drops_empty_results() {
        let json = r#"[
            {
                "id": "r1", "name": "Round 1", "date": "2020-01-04",
                "venue": "A1", "tier": "PREMIER",
                "results": [{ "position": 1, "rider_name": "A" }]
            },
            {
                "id": "r2", "name": "Round 2", "date": "2020-01-11",
                "venue": "A2", "tier": "PREMIER",
                "results": []
            }
        ]"#;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let races = load_races(file.path()).unwrap();
        assert_eq!(races.len(), 1);
        assert_eq!(races[0].id, "r1");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_races(std::path::Path::new("/nonexistent/races.json")).unwrap_err();
        assert!(matches!(err, ProcessorError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_races(file.path()).unwrap_err();
        assert!(matches!(err, ProcessorError::Parse { .. }));
    }
}
