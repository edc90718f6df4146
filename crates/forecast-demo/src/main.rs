// File: crates/forecast-demo/src/main.rs
// Summary: Demo loads a forecast file and prints axes, snapshot rows and spot quality; also checks spot locations.

mod input;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use forecast_core::{
    build_axes, build_chart_data, build_snapshots, day_spans, map_energy_to_left_axis,
    resolve_active_snapshot_label, Axis, CoastGeometry, CoastValidator, ForecastChartPoint, ForecastRange,
    ForecastRecord, SnapshotItem, SpotConfig, ValidatorConfig,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "forecast-demo", version, about = "Surf forecast chart and spot location toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build chart axes and snapshot rows from a forecast file (.json or .csv)
    Forecast {
        input: String,
        /// 48h or 7d
        #[arg(long, default_value = "48h")]
        range: ForecastRange,
        #[arg(long, default_value = "es-ES")]
        locale: String,
        /// Reference time (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<String>,
        /// Spot configuration JSON used to grade each row
        #[arg(long)]
        spot: Option<PathBuf>,
        /// Snapshot label to mark as active
        #[arg(long)]
        select: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check whether a coordinate is a plausible coastal spot
    Validate {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
        /// Max distance from the coast for points on land, meters
        #[arg(long, default_value_t = 1_300.0)]
        band: f64,
        /// GeoJSON with land/coastline features; defaults to the bundled dataset
        #[arg(long)]
        geometry: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Forecast { input, range, locale, now, spot, select, json } => {
            run_forecast(&input, range, &locale, now.as_deref(), spot, select.as_deref(), json)
        }
        Command::Validate { lat, lng, band, geometry, json } => run_validate(lat, lng, band, geometry, json),
    }
}

fn run_forecast(
    raw: &str,
    range: ForecastRange,
    locale: &str,
    now: Option<&str>,
    spot: Option<PathBuf>,
    select: Option<&str>,
    json: bool,
) -> Result<()> {
    let (path, used_alt) = input::resolve_path(raw)?;
    log::info!("using input file {}{}", path.display(), if used_alt { " (extension added)" } else { "" });

    let records = input::load_forecasts(&path).with_context(|| format!("failed to load '{}'", path.display()))?;
    if records.is_empty() {
        anyhow::bail!("no forecast records loaded; check the file format");
    }
    let now_ms = match now {
        Some(s) => ForecastRecord::parse_date(s)?.timestamp_millis(),
        None => Utc::now().timestamp_millis(),
    };
    let spot: Option<SpotConfig> = spot
        .map(|p| -> Result<SpotConfig> {
            let text = std::fs::read_to_string(&p).with_context(|| format!("reading {}", p.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing spot config {}", p.display()))
        })
        .transpose()?;

    let points = build_chart_data(&records);
    let axes = build_axes(&points);
    let energy = map_energy_to_left_axis(&points, &axes);
    let snapshots = build_snapshots(&points, range, locale, now_ms);
    let active = resolve_active_snapshot_label(&snapshots, select);

    if json {
        let out = serde_json::json!({
            "points": points,
            "axes": axes,
            "energyOnHeightAxis": energy,
            "snapshots": snapshots,
            "activeSnapshot": active,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Loaded {} records from {}", records.len(), path.display());
    print_axis(&axes.height);
    print_axis(&axes.energy);
    for span in day_spans(&points, &Utc) {
        println!("  day {}: {} .. {}", span.date, fmt_ms(span.start), fmt_ms(span.end));
    }

    println!();
    println!("Snapshots ({range}, {locale}):");
    println!("  {:<10} {:>6} {:>8} {:>7} {:>8} {:>6} {:>5}", "", "hour", "height", "period", "energy", "wind", "dir");
    for item in &snapshots {
        let [label, hour, height, period, energy, wind, dir] = item.cells();
        let marker = if item.label == active { '*' } else { ' ' };
        let grade = spot.as_ref().map(|s| grade_row(s, item, &points)).unwrap_or_default();
        println!("{marker} {label:<10} {hour:>6} {height:>8} {period:>7} {energy:>8} {wind:>6} {dir:>5} {grade}");
    }
    Ok(())
}

fn grade_row(spot: &SpotConfig, item: &SnapshotItem, points: &[ForecastChartPoint]) -> String {
    let Some(point) = item.time.and_then(|t| points.iter().find(|p| p.time == t)) else {
        return String::new();
    };
    let c = spot.optimal_conditions.assess(point);
    let q = |v: Option<forecast_core::ConditionQuality>| v.map(|q| q.as_str()).unwrap_or("-");
    format!("wind={} period={}", q(c.wind), q(c.period))
}

fn print_axis(axis: &Axis) {
    println!(
        "{}: step {} range [{}, {}] ticks {:?}",
        axis.label, axis.step, axis.min, axis.max, axis.ticks
    );
}

fn fmt_ms(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ms.to_string())
}

fn run_validate(lat: f64, lng: f64, band: f64, geometry: Option<PathBuf>, json: bool) -> Result<()> {
    let validator = match geometry {
        Some(p) => {
            let text = std::fs::read_to_string(&p).with_context(|| format!("reading {}", p.display()))?;
            let geometry = CoastGeometry::from_geojson(&text).with_context(|| format!("parsing {}", p.display()))?;
            CoastValidator::new(geometry, ValidatorConfig::default())
        }
        None => CoastValidator::bundled()?,
    };
    let result = validator.validate_with_band(lat, lng, band);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    let verdict = match result.reason {
        None => "valid".to_string(),
        Some(r) => format!("invalid ({})", r.as_str()),
    };
    println!(
        "({lat}, {lng}): {verdict}; {:.0} m to the coast (beach band {band} m)",
        result.distance_to_coast_meters
    );
    Ok(())
}
