use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use sortbench::report::{self, ReportConfig, ReportPaths};
use sortbench::{run_experiments, ExperimentConfig};

/// Time insertion, merge, heap and quick sort on random data and write a
/// chart plus a short PDF report.
#[derive(Parser, Debug)]
#[command(name = "sortbench", version, about)]
struct Cli {
    /// Directory the chart, report and results are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Only write the chart; skip the PDF report and the JSON results
    #[arg(long)]
    chart_only: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let cli = Cli::parse();
    let config = ExperimentConfig::default();

    println!("Running experiments... (this may take a short while)");
    let results = run_experiments(&config)?;

    fs::create_dir_all(&cli.out_dir)?;
    let paths = ReportPaths::in_dir(&cli.out_dir);
    report::write_chart(&results, &paths.chart)?;

    if !cli.chart_only {
        report::write_results_json(&results, &paths.data)?;
        report::write_report(&results, &paths.chart, &ReportConfig::default(), &paths.report)?;
        info!("report complete");
        println!("PDF saved to: {}", paths.report.display());
        println!("Results saved to: {}", paths.data.display());
    }
    println!("Plot image saved to: {}", paths.chart.display());
    print!("{}", report::summary(&results));
    Ok(())
}
