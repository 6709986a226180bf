#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::env;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use maze_chase::app::{App, RunOptions};
use maze_chase::config::GameConfig;
use maze_chase::formatter::TickFormatter;

struct Args {
    options: RunOptions,
    quiet: bool,
}

fn parse_args() -> Result<Args> {
    let mut options = RunOptions::default();
    let mut quiet = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ticks" => {
                let value = args.next().context("--ticks needs a value")?;
                options.max_ticks = Some(value.parse().with_context(|| format!("invalid tick count: {value}"))?);
            }
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                options.seed = Some(value.parse().with_context(|| format!("invalid seed: {value}"))?);
            }
            "--press" => {
                let value = args.next().context("--press needs TICK:KEY")?;
                let (tick, key) = value.split_once(':').with_context(|| format!("expected TICK:KEY, got {value}"))?;
                let tick = tick.parse().with_context(|| format!("invalid tick in {value}"))?;
                options.presses.push((tick, key.to_string()));
            }
            "--quiet" | "-q" => quiet = true,
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(Args { options, quiet })
}

fn init_tracing(quiet: bool) -> Result<()> {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().event_format(TickFormatter))
        .with(ErrorLayer::default())
        .try_init()
        .context("could not install the tracing subscriber")
}

pub fn main() -> Result<()> {
    let args = parse_args()?;
    init_tracing(args.quiet)?;

    let config = GameConfig::standard()?;
    info!(
        tick_rate = config.normal_tick_rate,
        frame_rate = config.frame_rate,
        max_ticks = ?args.options.max_ticks,
        seed = ?args.options.seed,
        "Starting simulation"
    );

    let mut app = App::new(config, args.options)?;
    let summary = app.run();

    if !args.quiet {
        for line in app.timing_table() {
            info!("{line}");
        }
    }
    println!(
        "ticks={} score={} dots={} lives={}",
        summary.ticks, summary.score, summary.dots, summary.lives
    );
    Ok(())
}
