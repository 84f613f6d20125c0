pub mod chart;
pub mod document;
pub mod pdf;
pub mod png;
pub mod table;
pub mod text;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::harness::BenchResults;

pub use chart::LineChart;
pub use document::{build_report, write_report, ReportConfig};
pub use table::{results_table, summary};

pub const CHART_FILE: &str = "sorting_performance.png";
pub const REPORT_FILE: &str = "sorting_analysis_report.pdf";
pub const DATA_FILE: &str = "sorting_results.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub chart: PathBuf,
    pub report: PathBuf,
    pub data: PathBuf,
}

impl ReportPaths {
    pub fn in_dir(dir: &Path) -> Self {
        ReportPaths {
            chart: dir.join(CHART_FILE),
            report: dir.join(REPORT_FILE),
            data: dir.join(DATA_FILE),
        }
    }
}

#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_chart(results: &BenchResults, path: &Path) -> Result<()> {
    let chart = LineChart::from_results(results);
    chart.save_png(path)?;
    info!(width = chart.width, height = chart.height, "chart written");
    Ok(())
}

pub fn write_results_json(results: &BenchResults, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json).map_err(|e| Error::write(path, e))
}
