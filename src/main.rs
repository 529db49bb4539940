mod catalog;
mod celestrak;
mod predict;
mod render;
mod web;

use askama::Template;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use crate::catalog::load_dataset;
use crate::celestrak::{Query, QueryKind};
use crate::predict::{positions, EarthFixedMethod, Frame, PositionSample, TimeMode, TimeSeries};
use crate::render::{circular_orbit_figure, DemoOptions, EarthTexture};
use crate::web::state::dataset_cache;
use crate::web::ui::templates::StandaloneTemplate;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "orbit-viewer")]
#[command(about = "CelesTrak satellite positions on a 3D globe")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web viewer
    Serve,
    /// Download (or refresh) a dataset and list its satellites
    Fetch(DatasetArgs),
    /// Print propagated positions of one satellite
    Positions(PositionsArgs),
    /// Write a standalone HTML page with an idealised circular orbit
    Demo(DemoArgs),
}

#[derive(Args)]
struct DatasetArgs {
    /// GROUP, CATNR, INTDES, NAME or SPECIAL
    #[arg(long, default_value = "GROUP")]
    query: String,
    /// Query value, defaults to the kind's default
    #[arg(long)]
    value: Option<String>,
}

impl DatasetArgs {
    fn to_query(&self) -> Result<Query, String> {
        let kind = QueryKind::parse(&self.query).map_err(|e| e.to_string())?;
        let value = self.value.as_deref().unwrap_or(kind.default_value());
        Query::new(kind, value).map_err(|e| e.to_string())
    }
}

#[derive(Args)]
struct PositionsArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    /// Satellite name, defaults to the first one in the dataset
    #[arg(long)]
    satellite: Option<String>,
    /// inertial (TEME; eci, gcrs and teme accepted) or earth_fixed (ecef, itrs)
    #[arg(long, default_value = "inertial", value_parser = parse_frame)]
    frame: Frame,
    /// Earth-fixed method: rotation or geodetic
    #[arg(long, default_value = "rotation", value_parser = parse_method)]
    method: EarthFixedMethod,
    /// Shift the start from now, e.g. "90m" or "1h 30m"
    #[arg(long, value_parser = humantime::parse_duration, conflicts_with = "at")]
    offset: Option<Duration>,
    /// Apply the offset into the past
    #[arg(long, requires = "offset")]
    ago: bool,
    /// Start at a fixed UTC instant
    #[arg(long, value_parser = parse_utc)]
    at: Option<DateTime<Utc>>,
    /// Forward window, e.g. "90m"
    #[arg(long, default_value = "0s", value_parser = humantime::parse_duration)]
    window: Duration,
    /// Sample spacing
    #[arg(long, default_value = "1m", value_parser = humantime::parse_duration)]
    step: Duration,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl PositionsArgs {
    fn time_mode(&self) -> Result<TimeMode, String> {
        if let Some(instant) = self.at {
            return Ok(TimeMode::At { instant });
        }
        match self.offset {
            Some(offset) => {
                let minutes = (offset.as_secs() / 60) as i64;
                let minutes = if self.ago { -minutes } else { minutes };
                TimeMode::offset(minutes).map_err(|e| e.to_string())
            }
            None => Ok(TimeMode::Now),
        }
    }

    fn series(&self, now: DateTime<Utc>) -> Result<TimeSeries, String> {
        let start = self.time_mode()?.resolve(now);
        let window = chrono::Duration::from_std(self.window).map_err(|e| e.to_string())?;
        let step = chrono::Duration::from_std(self.step).map_err(|e| e.to_string())?;
        TimeSeries::new(start, window, step).map_err(|e| e.to_string())
    }
}

#[derive(Args)]
struct DemoArgs {
    /// Orbit altitude above the equator in km
    #[arg(long, default_value_t = render::DEFAULT_ALTITUDE_KM)]
    altitude: f64,
    /// Number of points along the orbit
    #[arg(long, default_value_t = render::DEFAULT_ORBIT_POINTS)]
    points: usize,
    /// Tilt the globe by the Earth's axial tilt
    #[arg(long)]
    tilt: bool,
    /// Equirectangular Earth image (PNG or JPEG)
    #[arg(long)]
    texture: Option<PathBuf>,
    #[arg(long, short, default_value = "orbit.html")]
    output: PathBuf,
}

fn parse_frame(s: &str) -> Result<Frame, String> {
    serde_json::from_value(serde_json::Value::String(s.to_lowercase()))
        .map_err(|_| format!("unknown frame '{}'", s))
}

fn parse_method(s: &str) -> Result<EarthFixedMethod, String> {
    serde_json::from_value(serde_json::Value::String(s.to_lowercase()))
        .map_err(|_| format!("unknown method '{}'", s))
}

fn parse_utc(s: &str) -> Result<DateTime<Utc>, String> {
    web::api::params::parse_instant(s).map_err(|_| format!("invalid UTC instant '{}'", s))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Fetch(args) => fetch(&config, &args).await,
        Commands::Positions(args) => print_positions(&config, &args).await,
        Commands::Demo(args) => demo(&args),
    }
}

async fn serve(config: Config) -> ExitCode {
    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn fetch(config: &Config, args: &DatasetArgs) -> ExitCode {
    let query = match args.to_query() {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Invalid query: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let cache = dataset_cache(&config.data);
    let path = match cache.ensure(&query).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Download failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match load_dataset(&path, cache.format()) {
        Ok(set) if set.is_empty() => {
            println!("{}: no satellites for {}={}", path.display(), query.kind, query.value);
            ExitCode::SUCCESS
        }
        Ok(set) => {
            println!("{} ({} satellites)", path.display(), set.len());
            for name in set.names() {
                println!("  {}", name);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Parse error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn print_positions(config: &Config, args: &PositionsArgs) -> ExitCode {
    let (query, series) = match args
        .dataset
        .to_query()
        .and_then(|q| Ok((q, args.series(Utc::now())?)))
    {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid arguments: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let cache = dataset_cache(&config.data);
    let path = match cache.ensure(&query).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Download failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let set = match load_dataset(&path, cache.format()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let satellite = match args.satellite.as_deref() {
        Some(name) => set.get(name).map_err(|e| e.to_string()),
        None => set
            .first()
            .ok_or_else(|| format!("no satellites for {}={}", query.kind, query.value)),
    };
    let satellite = match satellite {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let samples = match positions(&satellite, &series, args.frame, args.method) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Propagation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&samples) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Serialization failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!(
            "{} (NORAD {}), {}",
            satellite.name(),
            satellite.info.norad_id,
            args.frame
        );
        print_table(&samples);
    }

    ExitCode::SUCCESS
}

fn print_table(samples: &[PositionSample]) {
    println!(
        "{:<20} {:>11} {:>11} {:>11} {:>8} {:>9} {:>10} {:>9}",
        "time (UTC)", "x (km)", "y (km)", "z (km)", "km/s", "lat", "lon", "alt (km)"
    );
    for sample in samples {
        let [x, y, z] = sample.position_km;
        println!(
            "{:<20} {:>11.3} {:>11.3} {:>11.3} {:>8.3} {:>9.4} {:>10.4} {:>9.2}",
            sample.timestamp.format("%Y-%m-%d %H:%M:%S"),
            x,
            y,
            z,
            sample.speed_km_s(),
            sample.subpoint.latitude_deg,
            sample.subpoint.longitude_deg,
            sample.subpoint.altitude_km
        );
    }
}

fn demo(args: &DemoArgs) -> ExitCode {
    let texture = match args.texture.as_deref().map(EarthTexture::load_from_path) {
        Some(Ok(t)) => Some(t),
        Some(Err(e)) => {
            eprintln!("Texture error: {}", e);
            return ExitCode::FAILURE;
        }
        None => None,
    };

    let options = DemoOptions {
        altitude_km: args.altitude,
        points: args.points,
        tilt: args.tilt,
        ..DemoOptions::default()
    };
    let figure = circular_orbit_figure(&options, texture.as_ref());

    match write_standalone(&args.output, &figure) {
        Ok(()) => {
            println!("Wrote {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to write {}: {}", args.output.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn write_standalone(path: &Path, figure: &render::Figure) -> Result<(), Box<dyn std::error::Error>> {
    // Keep "</script>" out of the inlined JSON.
    let figure_json = serde_json::to_string(figure)?.replace("</", "<\\/");
    let page = StandaloneTemplate {
        title: "Circular orbit".to_string(),
        figure_json,
    }
    .render()?;
    fs::write(path, page)?;
    Ok(())
}
