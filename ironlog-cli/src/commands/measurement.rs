use anyhow::Result;
use std::str::FromStr;

use super::output;
use super::AppContext;
use crate::features::{Feature, FeatureGate};
use crate::models::{parse_weight, Measurement, MeasurementKind, NewMeasurement};

const CHART_WIDTH: usize = 40;

pub async fn list_measurements(ctx: &AppContext, kind: Option<String>) -> Result<()> {
    let kind = kind.as_deref().map(MeasurementKind::from_str).transpose()?;
    let measurements = ctx.api()?.list_measurements(kind).await?;

    output::heading("Measurements");

    if measurements.is_empty() {
        println!("No measurements recorded.");
        return Ok(());
    }

    for measurement in &measurements {
        println!(
            "{:>6}  {}  {:<12} {} {}",
            measurement.id,
            measurement.recorded_at.format("%Y-%m-%d"),
            measurement.kind.to_string(),
            measurement.value,
            measurement.unit
        );
    }

    Ok(())
}

pub async fn add_measurement(
    ctx: &AppContext,
    kind: &str,
    value: &str,
    unit: Option<String>,
) -> Result<()> {
    let kind = MeasurementKind::from_str(kind)?;
    // same decimal handling as set weights
    let value = parse_weight(value)?;
    if value <= 0.0 {
        return Err(anyhow::anyhow!("Measurement must be positive"));
    }

    let mut measurement = NewMeasurement::now(kind, value);
    if let Some(unit) = unit {
        measurement.unit = unit;
    }

    let saved = ctx.api()?.add_measurement(&measurement).await?;

    output::success(format!(
        "Recorded {}: {} {}",
        saved.kind, saved.value, saved.unit
    ));
    Ok(())
}

pub async fn delete_measurement(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.api()?.delete_measurement(id).await?;
    output::success(format!("Deleted measurement #{}", id));
    Ok(())
}

pub async fn chart_measurements(ctx: &AppContext, kind: &str) -> Result<()> {
    let kind = MeasurementKind::from_str(kind)?;
    let client = ctx.api()?;
    FeatureGate::from_store(client.tokens().as_ref())?.ensure(Feature::MeasurementCharts)?;

    let mut measurements = client.list_measurements(Some(kind)).await?;
    measurements.reverse();

    output::heading(&format!("{} over time", kind));

    if measurements.is_empty() {
        println!("No measurements recorded.");
        return Ok(());
    }

    for line in chart_lines(&measurements, CHART_WIDTH) {
        println!("{}", line);
    }

    Ok(())
}

/// One bar per entry, scaled between the lowest and highest value
fn chart_lines(measurements: &[Measurement], width: usize) -> Vec<String> {
    let (min, max) = measurements
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), m| {
            (lo.min(m.value), hi.max(m.value))
        });
    let span = max - min;
    let width = width.max(1);

    measurements
        .iter()
        .map(|m| {
            let filled = if span > 0.0 {
                1 + ((m.value - min) / span * (width - 1) as f64).round() as usize
            } else {
                width
            };
            format!(
                "{}  {:>7.1} {:<3} {}",
                m.recorded_at.format("%Y-%m-%d"),
                m.value,
                m.unit,
                "█".repeat(filled)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn series(values: &[f64]) -> Vec<Measurement> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| Measurement {
                id: i as i64 + 1,
                kind: MeasurementKind::BodyWeight,
                value,
                unit: "kg".to_string(),
                recorded_at: start + Duration::days(i as i64 * 7),
            })
            .collect()
    }

    fn bar_lengths(lines: &[String]) -> Vec<usize> {
        lines.iter().map(|l| l.matches('█').count()).collect()
    }

    #[test]
    fn test_bars_scale_between_min_and_max() {
        let lines = chart_lines(&series(&[80.0, 82.0, 84.0]), 11);
        assert_eq!(bar_lengths(&lines), vec![1, 6, 11]);
        assert!(lines[0].starts_with("2024-01-01"));
        assert!(lines[2].contains("84.0 kg"));
    }

    #[test]
    fn test_flat_series_fills_width() {
        let lines = chart_lines(&series(&[70.0, 70.0]), 8);
        assert_eq!(bar_lengths(&lines), vec![8, 8]);
    }
}
