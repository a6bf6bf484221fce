use std::path::PathBuf;

use clap::Parser;

use crate::model::structures::config::EngineConfig;

#[derive(Parser, Clone)]
#[command(
    display_name = "MXR Processor",
    author = "Motocross Rating",
    long_about = "Computes historical skill ratings and era-strength insights from race results"
)]
pub struct Args {
    /// JSON file holding the full race history (array of races)
    #[arg(short, long, env = "MXR_RACES", help = "Path to the race history file")]
    pub races: PathBuf,

    /// Where to write the JSON rating report; prints a summary table if omitted
    #[arg(short, long, help = "Path for the JSON report output")]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = EngineConfig::default().base_rating)]
    pub base_rating: i32,

    #[arg(long, default_value_t = EngineConfig::default().standard_k)]
    pub standard_k: f64,

    #[arg(long, default_value_t = EngineConfig::default().provisional_k)]
    pub provisional_k: f64,

    /// Number of races a rider stays on the elevated provisional K
    #[arg(long, default_value_t = EngineConfig::default().provisional_races)]
    pub provisional_races: u32,

    /// Seed debut ratings from rated peers in the same race
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub bootstrap_new_entrants: bool,

    /// Dampen catastrophic losses for established leaders
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub loss_dampening: bool,

    #[arg(long, default_value_t = EngineConfig::default().loss_dampening_cap)]
    pub loss_dampening_cap: u32,

    /// Regress ratings toward the pool mean at season boundaries
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub season_decay: bool,

    /// Offset added to the measured retention rate, -1.0 to 1.0
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub decay_offset: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}

impl Args {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            base_rating: self.base_rating,
            standard_k: self.standard_k,
            provisional_k: self.provisional_k,
            provisional_races: self.provisional_races,
            bootstrap_new_entrants: self.bootstrap_new_entrants,
            loss_dampening_enabled: self.loss_dampening,
            loss_dampening_cap: self.loss_dampening_cap,
            season_decay_enabled: self.season_decay,
            decay_offset: self.decay_offset
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::args::Args;

    #[test]
    fn test_defaults_map_to_engine_config() {
        let args = Args::parse_from(["mxr-processor", "--races", "races.json"]);
        let config = args.engine_config();

        assert_eq!(config.base_rating, 1500);
        assert_eq!(config.standard_k, 32.0);
        assert!(!config.bootstrap_new_entrants);
        assert!(!config.loss_dampening_enabled);
        assert!(!config.season_decay_enabled);
    }

    #[test]
    fn test_toggles_and_overrides() {
        let args = Args::parse_from([
            "mxr-processor",
            "--races",
            "races.json",
            "--bootstrap-new-entrants",
            "--loss-dampening",
            "--loss-dampening-cap",
            "5",
            "--season-decay",
            "--decay-offset",
            "-0.1",
        ]);
        let config = args.engine_config();

        assert!(config.bootstrap_new_entrants);
        assert!(config.loss_dampening_enabled);
        assert_eq!(config.loss_dampening_cap, 5);
        assert!(config.season_decay_enabled);
        assert_eq!(config.decay_offset, -0.1);
    }
}
