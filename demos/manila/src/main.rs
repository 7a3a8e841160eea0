//! manila — track one provider across Metro Manila.
//!
//! Builds a route set between two points, drives the simulated provider
//! along the recommended route (optionally switching to an alternative part
//! way through), prints every frame, and writes `frames.csv`/`routes.csv`.
//!
//! ```text
//! cargo run -p manila -- --from quiapo --to san-juan
//! cargo run -p manila --features osrm -- --osrm https://router.project-osrm.org --realtime
//! RUST_LOG=debug cargo run -p manila -- --switch-to 1 --switch-after-ms 4000
//! ```

mod places;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tr_core::{RouteId, SessionId, SimTime, TrackingConfig};
use tr_output::{CsvWriter, OutputWriter, TrackingOutputObserver};
use tr_route::{RouteSet, RoutingClient, StraightLineClient};
use tr_sim::{
    Frame, ManualTicker, RealtimeTicker, SimStatus, Ticker, TrackingObserver, TrackingSession,
    TrackingSessionBuilder,
};

use places::parse_point;

/// Segments used by the offline router when no OSRM server is given.
const OFFLINE_SEGMENTS: usize = 24;

#[derive(Parser, Debug)]
#[command(name = "manila", about = "Simulate a provider driving to a customer")]
struct Args {
    /// Provider position: a place name or `lon,lat`.
    #[arg(long, default_value = "quiapo")]
    from: String,

    /// Customer position: a place name or `lon,lat`.
    #[arg(long, default_value = "san-juan")]
    to: String,

    /// JSON file with `TrackingConfig` fields; missing fields keep defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config seed.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 0)]
    session: u32,

    /// OSRM base URL.  Without it routes come from the offline straight-line router.
    #[cfg(feature = "osrm")]
    #[arg(long)]
    osrm: Option<String>,

    /// Sleep between ticks instead of jumping straight to them.
    #[arg(long)]
    realtime: bool,

    /// Real-time speed multiplier.
    #[arg(long, default_value_t = 1.0)]
    speedup: f64,

    /// Switch to this route id once `--switch-after-ms` has elapsed.
    #[arg(long)]
    switch_to: Option<u32>,

    #[arg(long, default_value_t = 5_000)]
    switch_after_ms: u64,

    /// Directory for frames.csv and routes.csv.
    #[arg(long, default_value = "output/manila")]
    out: PathBuf,

    /// Only print the summary.
    #[arg(long)]
    quiet: bool,
}

// ── Observer wrapper that prints frames ───────────────────────────────────────

struct ConsoleObserver<W: OutputWriter> {
    inner:  TrackingOutputObserver<W>,
    quiet:  bool,
    pauses: usize,
}

impl<W: OutputWriter> ConsoleObserver<W> {
    fn new(inner: TrackingOutputObserver<W>, quiet: bool) -> Self {
        Self { inner, quiet, pauses: 0 }
    }
}

impl<W: OutputWriter> TrackingObserver for ConsoleObserver<W> {
    fn on_routes(&mut self, routes: &RouteSet) {
        if !self.quiet {
            print_routes(routes);
        }
        self.inner.on_routes(routes);
    }

    fn on_frame(&mut self, frame: &Frame) {
        if frame.status == SimStatus::Paused {
            self.pauses += 1;
        }
        if !self.quiet {
            println!(
                "{}  {:<9} #{:<3} {}  {:>5.1}°  {:>3} min  {}",
                frame.at,
                frame.status,
                frame.index,
                frame.position,
                frame.bearing_deg,
                frame.eta_minutes,
                frame.instruction(),
            );
        }
        self.inner.on_frame(frame);
    }

    fn on_arrived(&mut self, frame: &Frame) {
        self.inner.on_arrived(frame);
    }
}

fn print_routes(routes: &RouteSet) {
    println!();
    println!("{:<4} {:<20} {:<9} {:>8} {:>8} {:>6}", "Id", "Route", "Traffic", "km", "min", "Pts");
    println!("{}", "-".repeat(60));
    for r in routes.routes() {
        let marker = if r.id == routes.selected_id() { "*" } else { " " };
        println!(
            "{marker}{:<3} {:<20} {:<9} {:>8.2} {:>8.1} {:>6}",
            r.id.0,
            r.name,
            r.traffic,
            r.distance_km,
            r.duration_min,
            r.len(),
        );
    }
    println!();
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<TrackingConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => TrackingConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(feature = "osrm")]
fn routing_client(args: &Args) -> Result<Box<dyn RoutingClient>> {
    match &args.osrm {
        Some(url) => {
            info!(url = %url, "using OSRM routing");
            Ok(Box::new(tr_route::osrm::OsrmClient::new(url.clone())?))
        }
        None => Ok(Box::new(StraightLineClient::new(OFFLINE_SEGMENTS))),
    }
}

#[cfg(not(feature = "osrm"))]
fn routing_client(_args: &Args) -> Result<Box<dyn RoutingClient>> {
    Ok(Box::new(StraightLineClient::new(OFFLINE_SEGMENTS)))
}

/// Drive the session to completion, switching routes once if asked.
fn drive<T, W>(
    session:  &mut TrackingSession,
    ticker:   &mut T,
    observer: &mut ConsoleObserver<W>,
    switch:   Option<(RouteId, SimTime)>,
) -> Result<usize>
where
    T: Ticker,
    W: OutputWriter,
{
    let start = ticker.now();
    session.start(start, observer)?;

    let mut fired = 0;
    if let Some((to, at)) = switch {
        while let Some(due) = session.simulator().next_due() {
            if due > at {
                break;
            }
            ticker.wait_until(due);
            fired += session.advance_to(ticker.now(), observer);
        }
        if session.state().status.is_active() {
            ticker.wait_until(at);
            session.select_route(to, ticker.now(), observer)?;
        }
    }
    fired += session.run(ticker, observer);
    Ok(fired)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let origin = parse_point(&args.from)?;
    let destination = parse_point(&args.to)?;

    println!("=== manila — provider tracking ===");
    println!("From {origin}  to {destination}  |  seed {}", config.seed);

    // 1. One-shot route fetch.
    let mut session = TrackingSessionBuilder::new(config, routing_client(&args)?)
        .origin(origin)
        .destination(destination)
        .session_id(SessionId(args.session))
        .build()?;

    // 2. Output.
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let writer = CsvWriter::new(Path::new(&args.out))?;
    let mut obs = ConsoleObserver::new(TrackingOutputObserver::new(writer, session.id()), args.quiet);

    // 3. Run.
    let switch = args
        .switch_to
        .map(|id| (RouteId(id), SimTime::ZERO.after_ms(args.switch_after_ms)));
    let t0 = Instant::now();
    let fired = if args.realtime {
        drive(&mut session, &mut RealtimeTicker::with_speedup(args.speedup), &mut obs, switch)?
    } else {
        drive(&mut session, &mut ManualTicker::new(), &mut obs, switch)?
    };
    let elapsed = t0.elapsed();

    obs.inner.finish();
    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    let state = session.state();
    let route = session.routes().selected();
    info!(fired, status = %state.status, "run finished");
    println!();
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!("  route        : {} ({})", route.name, route.id);
    println!("  status       : {}", state.status);
    println!("  ticks        : {}", state.ticks);
    println!("  pauses       : {}", obs.pauses);
    println!("  frames.csv   : {} rows", obs.inner.frames_written());
    println!("  output dir   : {}", args.out.display());

    Ok(())
}
