//! Plot configuration: optional YAML file, overridden by command line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ppath_common::{PanelFlags, PathRecord, SelectionMode};
use renderer::{FigureOptions, PpathPlotOptions};

/// Contents of a plot configuration file. Every field is optional; unset
/// fields fall back to the defaults for one path or for a list of paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub figure: FigureOptions,
    pub planetary_radius: Option<f64>,
    pub rscale: Option<f64>,
    pub select: Option<SelectionMode>,
    /// Comma separated panel names: pos, los, no_map
    pub show: Option<String>,
}

/// Flag values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub select: Option<String>,
    pub show: Option<String>,
    pub planetary_radius: Option<f64>,
    pub rscale: Option<f64>,
    pub dpi: Option<f64>,
}

impl PlotConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: PlotConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) -> Result<()> {
        if let Some(select) = &overrides.select {
            self.select = Some(select.parse()?);
        }
        if let Some(show) = &overrides.show {
            self.show = Some(show.clone());
        }
        if let Some(pr) = overrides.planetary_radius {
            self.planetary_radius = Some(pr);
        }
        if let Some(rscale) = overrides.rscale {
            self.rscale = Some(rscale);
        }
        if let Some(dpi) = overrides.dpi {
            self.figure.dpi = dpi;
        }
        Ok(())
    }

    /// Plot options for one path (`list == false`) or a list of paths.
    pub fn plot_options(&self, list: bool) -> Result<PpathPlotOptions> {
        let mut opts = if list {
            PpathPlotOptions::for_list()
        } else {
            PpathPlotOptions::default()
        };
        if let Some(pr) = self.planetary_radius {
            opts.planetary_radius = pr;
        }
        if let Some(rscale) = self.rscale {
            opts.rscale = rscale;
        }
        if let Some(select) = self.select {
            opts.select = select;
        }
        if let Some(show) = &self.show {
            opts.panels = show.parse::<PanelFlags>()?;
        }
        Ok(opts)
    }
}

/// Read path records from `inputs`. A file holds either one record or a
/// JSON array of records.
pub fn load_records(inputs: &[PathBuf]) -> Result<Vec<PathRecord>> {
    let mut records = Vec::new();
    for path in inputs {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read path record: {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        if value.is_array() {
            let list: Vec<PathRecord> = serde_json::from_value(value)
                .with_context(|| format!("Invalid path record list in {}", path.display()))?;
            records.extend(list);
        } else {
            let record: PathRecord = serde_json::from_value(value)
                .with_context(|| format!("Invalid path record in {}", path.display()))?;
            records.push(record);
        }
    }
    Ok(records)
}
