//! Calibration check.
//!
//! Calibrates a stored cold/atm/hot measurement and compares the result with
//! the stored spectrum. Exits non-zero when they differ.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use calibration::{run_check, ReferenceDataset, ResidualReport, Tolerance};

#[derive(Parser, Debug)]
#[command(name = "calib-check")]
#[command(about = "Check that the cold/atm/hot calibration reproduces its reference spectrum")]
struct Args {
    /// Reference dataset (JSON or YAML); the built-in reference when omitted
    #[arg(short, long, env = "CALIB_DATASET")]
    dataset: Option<PathBuf>,

    /// Relative tolerance
    #[arg(long, default_value_t = 1e-5)]
    rtol: f64,

    /// Absolute tolerance
    #[arg(long, default_value_t = 1e-8)]
    atol: f64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn tolerance(&self) -> Tolerance {
        Tolerance {
            rtol: self.rtol,
            atol: self.atol,
        }
    }

    fn load_dataset(&self) -> Result<ReferenceDataset> {
        match &self.dataset {
            Some(path) => ReferenceDataset::from_path(path)
                .with_context(|| format!("Failed to load reference dataset {}", path.display())),
            None => ReferenceDataset::embedded().context("Built-in reference dataset is unreadable"),
        }
    }
}

/// Load the dataset named by `args` and replay it. Any error makes the
/// process exit non-zero.
fn check(args: &Args) -> Result<ResidualReport> {
    let dataset = args.load_dataset()?;
    let tol = args.tolerance();
    info!(
        channels = dataset.channels(),
        rtol = tol.rtol,
        atol = tol.atol,
        description = dataset.description.as_deref().unwrap_or(""),
        "Running calibration check"
    );

    Ok(run_check(&dataset, tol)?)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let report = check(&args)?;

    info!(
        worst_channel = report.worst_channel,
        max_abs_residual = report.max_abs_residual,
        "Calibration check passed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calibration::CalibrationError;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("calib-check").chain(argv.iter().copied())).unwrap()
    }

    fn write_dataset(dir: &std::path::Path, dataset: &ReferenceDataset) -> PathBuf {
        let path = dir.join("reference.json");
        std::fs::write(&path, serde_json::to_string(dataset).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_default_args_check_builtin_reference() {
        let args = parse(&[]);
        assert_eq!(args.tolerance(), Tolerance::default());
        assert!(args.dataset.is_none());

        let report = check(&args).unwrap();
        assert_eq!(report.channels, 410);
    }

    #[test]
    fn test_drifted_dataset_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut dataset = ReferenceDataset::embedded().unwrap();
        dataset.expected[7] += 1e-4;
        let path = write_dataset(dir.path(), &dataset);

        let args = parse(&["--dataset", path.to_str().unwrap()]);
        let err = check(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CalibrationError>(),
            Some(CalibrationError::Drift { channel: 7, .. })
        ));
    }

    #[test]
    fn test_atol_flag_widens_tolerance() {
        let dir = tempfile::tempdir().unwrap();
        let mut dataset = ReferenceDataset::embedded().unwrap();
        dataset.expected[7] += 1e-4;
        let path = write_dataset(dir.path(), &dataset);

        let args = parse(&["-d", path.to_str().unwrap(), "--atol", "1e-3"]);
        assert_eq!(args.tolerance().atol, 1e-3);
        assert!(check(&args).is_ok());
    }

    #[test]
    fn test_missing_dataset_reports_path() {
        let args = parse(&["--dataset", "/nonexistent/reference.json"]);
        let err = check(&args).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/reference.json"));
    }
}
