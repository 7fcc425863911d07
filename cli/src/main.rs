use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::EnvFilter;

use printer_queue_core::{Orchestrator, SimulationConfig, WallClock};

#[derive(Parser, Debug)]
#[command(name = "printer-queue")]
#[command(version)]
#[command(about = "Real-time simulation of print jobs dispatched across a printer pool")]
struct Args {
    /// TOML file with a simulation configuration; flags override its values
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Number of printers in the pool
    #[arg(long, short = 'p')]
    printers: Option<usize>,

    /// Simulated seconds per real second
    #[arg(long, short = 's')]
    speed: Option<u32>,

    /// Simulated run length in seconds
    #[arg(long, short = 'd')]
    duration: Option<u64>,

    /// RNG seed (defaults to the start timestamp)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => {
                let config = load_config(path)?;
                info!(path = %path.display(), "loaded configuration");
                config
            }
            None => SimulationConfig::default(),
        };

        if let Some(printers) = self.printers {
            config.printer_count = printers;
        }
        if let Some(speed) = self.speed {
            config.speed_multiplier = speed;
        }
        if let Some(duration) = self.duration {
            config.duration_secs = duration;
        }
        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }

        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_config(&contents).map_err(|e| format!("invalid config {}: {}", path.display(), e).into())
}

fn parse_config(contents: &str) -> Result<SimulationConfig, toml::de::Error> {
    toml::from_str(contents)
}

fn now_ms() -> Result<u64, Box<dyn std::error::Error>> {
    let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH)?;
    Ok(u64::try_from(since_epoch.as_millis())?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let json = args.json;

    // Logs go to stderr so the report on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config = args.into_config()?;
    let mut orchestrator = Orchestrator::new(config, now_ms()?)?;
    let report = orchestrator.run(&mut WallClock::new())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
