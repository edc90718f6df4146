// File: crates/forecast-demo/src/input.rs
// Summary: Forecast file loading (JSON arrays of API records or flat CSV exports).

use anyhow::{Context, Result};
use forecast_core::{ForecastRecord, Swell, Wind};
use std::path::{Path, PathBuf};

/// Resolve the input path, trying `.json` then `.csv` when the name has no extension.
/// Returns (actual_path, used_alt)
pub fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if p.extension().is_none() {
        for ext in ["json", "csv"] {
            let alt = p.with_extension(ext);
            if alt.exists() {
                return Ok((alt, true));
            }
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

pub fn load_forecasts(path: &Path) -> Result<Vec<ForecastRecord>> {
    let is_csv = path
        .extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
        load_forecast_csv(file)
    } else {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        parse_forecast_json(&text)
    }
}

pub fn parse_forecast_json(text: &str) -> Result<Vec<ForecastRecord>> {
    serde_json::from_str(text).context("parsing forecast JSON (expected an array of records)")
}

/// Flat CSV export: one primary swell per row.
pub fn load_forecast_csv<R: std::io::Read>(reader: R) -> Result<Vec<ForecastRecord>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();
    log::debug!("csv headers: {headers:?}");

    let idx = |names: &[&str]| -> Option<usize> { headers.iter().position(|h| names.contains(&h.as_str())) };

    let i_date = idx(&["date", "time", "timestamp", "datetime"]).context("missing date column")?;
    let i_height = idx(&["height", "wave_height", "swell_height"]);
    let i_period = idx(&["period", "wave_period", "swell_period"]);
    let i_angle = idx(&["angle", "swell_angle", "direction"]);
    let i_wind_speed = idx(&["wind_speed", "wind"]);
    let i_wind_angle = idx(&["wind_angle", "wind_direction"]);
    let i_energy = idx(&["energy"]);

    if i_height.is_none() || i_period.is_none() {
        log::warn!("no swell height/period columns; swell will read as flat");
    }

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let num = |i: Option<usize>| -> Option<f64> { i.and_then(|ix| rec.get(ix)).and_then(|s| s.parse::<f64>().ok()) };

        let raw_date = rec.get(i_date).unwrap_or_default();
        let date = match ForecastRecord::parse_date(raw_date) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("skipping row {}: {e}", row + 1);
                continue;
            }
        };

        let swell = match (num(i_height), num(i_period)) {
            (None, None) => None,
            (h, p) => Some(Swell { height: h.unwrap_or(0.0), period: p.unwrap_or(0.0), angle: num(i_angle).unwrap_or(0.0) }),
        };
        out.push(ForecastRecord {
            date,
            valid_swells: swell.into_iter().collect(),
            wind: Wind { speed: num(i_wind_speed).unwrap_or(0.0), angle: num(i_wind_angle).unwrap_or(0.0) },
            energy: num(i_energy).unwrap_or(0.0),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_become_records() {
        let data = "date,height,period,angle,wind_speed,wind_angle,energy\n\
                    2024-05-01T06:00:00Z,1.25,12.1,290,10.5,45,410\n\
                    bogus,1.0,10,280,5,90,300\n\
                    2024-05-01T09:00:00Z,,,,8,60,\n";
        let records = load_forecast_csv(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].valid_swells[0].height, 1.25);
        assert_eq!(records[0].wind.angle, 45.0);
        assert_eq!(records[0].energy, 410.0);
        assert!(records[1].valid_swells.is_empty());
        assert_eq!(records[1].energy, 0.0);
    }

    #[test]
    fn csv_without_date_column_fails() {
        assert!(load_forecast_csv("height,period\n1,10\n".as_bytes()).is_err());
    }

    #[test]
    fn json_array_parses() {
        let records = parse_forecast_json(
            r#"[{"date":"2024-05-01T06:00:00Z","validSwells":[{"height":1.0,"period":9,"angle":300}],"wind":{"speed":4,"angle":10},"energy":150}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert!(parse_forecast_json(r#"{"date":"x"}"#).is_err());
    }
}
