//! venue: drives the crowd-monitoring simulator from the command line.
//!
//! Runs a fixed number of ticks either as fast as possible or on the real
//! tick timer, then writes `zone_counts.csv` and a `crowd_logs_<ms>.csv`
//! history export to the output directory.  With `--broadcast` every tick is
//! also published to stdout as JSON lines; logs and the summary then go to
//! stderr.

mod bell;
mod config;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use cm_core::{SafeLimits, ZoneId};
use cm_flow::{FlowModel, RandomWalkFlow};
use cm_forecast::{Forecaster, parse_date};
use cm_output::{BroadcastObserver, CsvWriter, SimOutputObserver, save_history};
use cm_sim::{ControllerBuilder, PeriodicTicker, SimulationController};

use bell::BellNotifier;
use config::VenueConfig;

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "venue", about = "Run the crowd-monitoring zone simulator")]
struct Cli {
    /// Number of ticks to run
    #[arg(long, default_value_t = 20)]
    ticks: u64,

    /// Tick on the periodic timer at the configured period instead of stepping
    #[arg(long)]
    realtime: bool,

    /// Start with festival mode on
    #[arg(long)]
    festival: bool,

    /// Forecast this date (YYYY-MM-DD) and turn on festival mode if it is busy
    #[arg(long)]
    date: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "output/venue")]
    out: PathBuf,

    /// Publish crowdUpdate / alert events to stdout as JSON lines
    #[arg(long)]
    broadcast: bool,

    /// Use the random-walk flow model with this seed
    #[arg(long, value_name = "SEED")]
    random_walk: Option<u64>,

    /// Redirect a batch out of the Main Hall to this zone before running
    #[arg(long, value_name = "ZONE")]
    redirect: Option<String>,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => VenueConfig::load(path)?,
        None => VenueConfig::default(),
    };
    if cli.festival {
        cfg.simulation.festival_mode = true;
    }

    let mut summary: Box<dyn Write> =
        if cli.broadcast { Box::new(io::stderr()) } else { Box::new(io::stdout()) };

    if let Some(date) = &cli.date {
        let forecast = Forecaster::default().day_forecast(parse_date(date)?);
        let peak = forecast.peak().map(|p| (p.time.clone(), p.crowd_level));
        writeln!(
            summary,
            "Forecast {}: {} (x{:.1}){}",
            date,
            forecast.day_type.label(),
            forecast.multiplier,
            forecast.special_day.as_ref().map(|d| format!(", {}", d.name)).unwrap_or_default(),
        )?;
        if let Some((time, level)) = peak {
            writeln!(summary, "  peak {level}% at {time}")?;
        }
        if forecast.suggests_festival_mode() {
            cfg.simulation.festival_mode = true;
        }
    }

    let builder = ControllerBuilder::new(cfg.simulation.clone())
        .run_config(cfg.run.clone())
        .initial_zones(cfg.initial_zones)
        .limits(cfg.limits)
        .try_notifier(BellNotifier::open());

    match cli.random_walk {
        Some(seed) => run(builder.flow_model(RandomWalkFlow::new(seed)).build()?, &cli, cfg.limits, summary),
        None => run(builder.build()?, &cli, cfg.limits, summary),
    }
}

fn run<F: FlowModel>(
    mut ctrl:    SimulationController<F>,
    cli:         &Cli,
    limits:      SafeLimits,
    mut summary: Box<dyn Write>,
) -> Result<()> {
    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating {}", cli.out.display()))?;

    if let Some(dest) = &cli.redirect {
        let moved = ctrl.redirect_named(dest);
        writeln!(summary, "Redirected {moved} from {} to {dest}", ZoneId::MainHall.display_name())?;
    }

    let csv = SimOutputObserver::new(CsvWriter::new(&cli.out)?);
    let broadcast = cli.broadcast.then(|| BroadcastObserver::new(io::stdout(), limits));
    let mut observer = (csv, broadcast);

    writeln!(
        summary,
        "Running {} ticks ({}), festival mode {}",
        cli.ticks,
        if cli.realtime { "realtime" } else { "stepped" },
        if ctrl.config().festival_mode { "on" } else { "off" },
    )?;

    let t0 = Instant::now();
    let ctrl = if cli.realtime {
        let shared = ctrl.into_shared();
        let ticker = PeriodicTicker::start(Arc::clone(&shared), observer)?;
        let poll = ticker.period() / 4;
        while current_tick(&shared)? < cli.ticks {
            thread::sleep(poll.max(Duration::from_millis(1)));
        }
        observer = ticker.stop().ok_or_else(|| anyhow!("ticker thread panicked"))?;
        Arc::try_unwrap(shared)
            .map_err(|_| anyhow!("controller still shared"))?
            .into_inner()
            .map_err(|_| anyhow!("controller lock poisoned"))?
    } else {
        ctrl.run_ticks(cli.ticks, &mut observer);
        ctrl
    };
    let elapsed = t0.elapsed();

    let (mut csv, broadcast) = observer;
    if let Some(e) = csv.take_error() {
        eprintln!("output error: {e}");
    }
    if let Some(e) = broadcast.and_then(|mut b| b.take_error()) {
        eprintln!("broadcast error: {e}");
    }

    let export = ctrl.export_history()?;
    let history_path = save_history(&cli.out, &export)?;
    info!(path = %history_path.display(), "run complete");

    print_summary(&mut *summary, &ctrl, &cli.out, &history_path, csv.rows_written(), elapsed)?;
    Ok(())
}

fn current_tick<F: FlowModel>(shared: &cm_sim::SharedController<F>) -> Result<u64> {
    let ctrl = shared.lock().map_err(|_| anyhow!("controller lock poisoned"))?;
    Ok(ctrl.current_tick().0)
}

fn print_summary<F: FlowModel>(
    out:          &mut dyn Write,
    ctrl:         &SimulationController<F>,
    dir:          &Path,
    history_path: &Path,
    rows:         u64,
    elapsed:      Duration,
) -> Result<()> {
    let snap = ctrl.snapshot();
    writeln!(out, "Simulation complete in {:.3} s", elapsed.as_secs_f64())?;
    writeln!(out, "  {}/zone_counts.csv : {rows} rows", dir.display())?;
    writeln!(out, "  {} : {} rows", history_path.display(), ctrl.history().len())?;
    writeln!(out, "  notifications      : {}", ctrl.notifications_sent())?;
    writeln!(out)?;

    writeln!(out, "{:<10} {:>8} {:>8} {:<6}", "Zone", "Count", "Limit", "Gate")?;
    writeln!(out, "{}", "-".repeat(35))?;
    let gates = ctrl.gates();
    for zone in snap.zones.zones(&ctrl.limits()) {
        let gate = if !zone.id.has_gate() {
            "-"
        } else if gates.is_open(zone.id) {
            "open"
        } else {
            "closed"
        };
        writeln!(
            out,
            "{:<10} {:>8} {:>8} {:<6}{}",
            zone.name,
            zone.count,
            zone.capacity,
            gate,
            if zone.is_over_limit() { "  OVER LIMIT" } else { "" },
        )?;
    }
    Ok(())
}
