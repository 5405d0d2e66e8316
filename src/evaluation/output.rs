use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::evaluation::harness::StrategyReport;

/// Round a float to n decimal places.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// Write one row per strategy to a CSV file. Quality columns are blank for a
/// strategy that found nothing.
pub fn write_csv(reports: &[StrategyReport], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "strategy",
        "found",
        "elapsed_s",
        "kcal_avg_error",
        "macro_avg_error",
        "strict_success_rate",
    ])?;

    for report in reports {
        wtr.write_record([
            report.strategy.to_string(),
            report.found.to_string(),
            format!("{:.4}", report.elapsed.as_secs_f64()),
            optional(report.quality.map(|q| q.kcal_avg_error)),
            optional(report.quality.map(|q| q.macro_avg_error)),
            optional(report.quality.map(|q| q.strict_success_rate)),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write all reports to a JSON file with rounded floats.
pub fn write_json(reports: &[StrategyReport], tolerance: f64, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "tolerance": tolerance,
        "strategies": reports.iter().map(|r| {
            serde_json::json!({
                "strategy": r.strategy.as_str(),
                "found": r.found,
                "elapsed_s": round_to(r.elapsed.as_secs_f64(), 4),
                "quality": r.quality.map(|q| serde_json::json!({
                    "kcal_avg_error": round_to(q.kcal_avg_error, 2),
                    "macro_avg_error": round_to(q.macro_avg_error, 2),
                    "strict_success_rate": round_to(q.strict_success_rate, 2),
                })),
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}
