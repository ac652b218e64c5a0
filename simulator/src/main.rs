mod autopilot;
mod config;
mod runner;

use clap::Parser;
use snake_engine::{log, logger};

use config::{get_config_manager, CONFIG_FILE};
use runner::Runner;

#[derive(Parser)]
#[command(name = "snake_simulator", about = "Drives the snake rule engine without a display")]
struct Args {
    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    #[arg(long)]
    seed: Option<u64>,

    /// Overrides `max_ticks` from the config file.
    #[arg(long)]
    ticks: Option<u64>,

    #[arg(long)]
    realtime: bool,

    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,

    /// Writes the default config to `--config` and exits.
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Simulator".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager = get_config_manager(&args.config);

    if args.write_default_config {
        config_manager.write_default()?;
        log!("Default config written to {}", args.config);
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    if let Some(ticks) = args.ticks {
        if ticks == 0 {
            return Err("--ticks must be greater than 0".into());
        }
        config.max_ticks = ticks;
    }
    config.realtime |= args.realtime;

    let mut runner = Runner::new(&config, args.seed)?;
    let report = runner.run().await;

    log!("Finished: {}", report);

    Ok(())
}
