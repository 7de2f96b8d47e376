use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use surge_keeper::{FileOracleSource, Keeper, KeeperConfig};

#[derive(Parser, Debug)]
#[command(name = "surge-keeper")]
#[command(about = "Off-chain calibration service for the Surge fee engine")]
struct Args {
    /// Path to keeper configuration file
    #[arg(short, long, default_value = "keeper.toml")]
    config: String,

    /// Path to the oracle observation snapshot (JSON, keyed by pool id)
    #[arg(short, long, default_value = "oracle.json")]
    oracle_snapshot: String,

    /// Update interval in seconds; overrides the configured value
    #[arg(short, long)]
    interval: Option<u64>,

    /// Run a single calibration pass and exit
    #[arg(long)]
    once: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = KeeperConfig::load(&args.config)?;
    let interval = args.interval.unwrap_or(config.update_interval_secs);
    info!(
        config = %args.config,
        pools = config.pools.len(),
        interval,
        "starting keeper"
    );

    let oracle = FileOracleSource::load(&args.oracle_snapshot)?;
    let mut keeper = Keeper::new(config, oracle);

    loop {
        keeper.refresh_all();
        if args.once {
            return Ok(());
        }
        thread::sleep(Duration::from_secs(interval));
        // Re-read the snapshot so long-running keepers pick up observations
        // written between passes
        // TODO: replace the file snapshot with a live accumulator feed
        keeper.set_oracle(FileOracleSource::load(&args.oracle_snapshot)?);
    }
}
