use clap::Parser;
use mxr_processor::{
    args::Args,
    input::{load_races, write_report, ProcessorError},
    model::RatingEngine
};
use tracing::info;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), ProcessorError> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let races = load_races(&args.races)?;
    info!(races = races.len(), "loaded race history");

    let report = RatingEngine::new(args.engine_config()).process(&races);

    match &args.output {
        Some(path) => {
            write_report(path, &report)?;
            info!(path = %path.display(), "wrote rating report");
        }
        None => {
            println!("{:<4} {:<28} {:>6} {:>6}  {}", "#", "Rider", "Elo", "Peak", "Last race");
            for (rank, rider) in report.ranked().take(25).enumerate() {
                println!(
                    "{:<4} {:<28} {:>6} {:>6}  {}",
                    rank + 1,
                    rider.name,
                    rider.rating,
                    rider.peak_rating,
                    rider.last_race_date.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}

fn init_logging(level: &str) {
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}
