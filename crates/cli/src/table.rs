//! Comparison table export (CSV or Parquet) for report bundles.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use pinplan::report::ScenarioBundle;
use polars::prelude::*;

/// One row per scenario: config, metrics, warnings and pros/cons.
pub fn comparison_frame<H>(bundles: &[ScenarioBundle<H>]) -> PolarsResult<DataFrame> {
    let scenario: Vec<&str> = bundles.iter().map(|b| b.name.as_str()).collect();
    let formation: Vec<&str> = bundles.iter().map(|b| b.config.formation.label()).collect();
    let pins: Vec<u32> = bundles
        .iter()
        .map(|b| b.config.pin_count.get() as u32)
        .collect();
    let wires: Vec<u32> = bundles
        .iter()
        .map(|b| b.result.wires.len() as u32)
        .collect();
    let divergence: Vec<Option<f64>> = bundles
        .iter()
        .map(|b| b.result.metrics.divergence_angle_deg)
        .collect();
    let crossing: Vec<Option<f64>> = bundles
        .iter()
        .map(|b| b.result.metrics.crossing_height_ratio)
        .collect();
    let spread: Vec<Option<f64>> = bundles
        .iter()
        .map(|b| b.result.metrics.entry_spread_ratio)
        .collect();
    let warnings: Vec<String> = bundles
        .iter()
        .map(|b| {
            b.result
                .metrics
                .warnings
                .iter()
                .map(|w| w.code())
                .collect::<Vec<_>>()
                .join(";")
        })
        .collect();
    let pros: Vec<String> = bundles.iter().map(|b| b.assessment.pros.join("; ")).collect();
    let cons: Vec<String> = bundles.iter().map(|b| b.assessment.cons.join("; ")).collect();

    df!(
        "scenario" => scenario,
        "formation" => formation,
        "pins" => pins,
        "wires" => wires,
        "divergence_angle_deg" => divergence,
        "crossing_height_ratio" => crossing,
        "entry_spread_ratio" => spread,
        "warnings" => warnings,
        "pros" => pros,
        "cons" => cons,
    )
}

/// Write `df` as CSV (`.csv` or no extension) or Parquet (`.parquet`).
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let ext = path.extension().and_then(|e| e.to_str());
    match ext {
        Some("parquet") => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            ParquetWriter::new(file).finish(df)?;
        }
        Some("csv") | None => {
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
        }
        Some(other) => bail!("unsupported table extension .{other} (use .csv or .parquet)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinplan::planner::ExtraSide;
    use pinplan::report::assemble;
    use pinplan::synth::{draw_snapshot, ReplayToken, SynthCfg};
    use tempfile::tempdir;

    #[test]
    fn frame_has_one_row_per_scenario() {
        let snap = draw_snapshot(&SynthCfg::default(), ReplayToken::new(3, 0));
        let bundles = assemble(&snap, 0, ExtraSide::Left);
        let df = comparison_frame(&bundles).unwrap();
        assert_eq!(df.shape(), (6, 10));
    }

    #[test]
    fn csv_written_and_unknown_extension_rejected() {
        let snap = draw_snapshot(&SynthCfg::default(), ReplayToken::new(3, 1));
        let bundles = assemble(&snap, 0, ExtraSide::Right);
        let mut df = comparison_frame(&bundles).unwrap();
        let dir = tempdir().unwrap();

        let csv = dir.path().join("out/report.csv");
        write_table(&mut df, &csv).unwrap();
        let text = std::fs::read_to_string(&csv).unwrap();
        assert!(text.starts_with("scenario,formation,pins,wires"));
        assert_eq!(text.lines().count(), 7);

        assert!(write_table(&mut df, &dir.path().join("report.xlsx")).is_err());
    }
}
