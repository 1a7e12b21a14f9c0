//! Batch map definitions loaded from YAML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use renderer::RenderOptions;

/// Figure layout of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapLayout {
    /// Single Robinson world map
    Robinson,
    /// Nearside views of the point and of its antipode
    Perspective,
}

impl MapLayout {
    pub fn suffix(self) -> &'static str {
        match self {
            MapLayout::Robinson => "Robinson",
            MapLayout::Perspective => "Perspective",
        }
    }
}

/// One map of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapJob {
    pub layout: MapLayout,
    /// File name, relative to the batch output directory
    pub file: PathBuf,
    #[serde(flatten)]
    pub options: RenderOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapBatch {
    /// Classification grid; the command line wins when both are set
    #[serde(default)]
    pub grid: Option<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub maps: Vec<MapJob>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("images")
}

impl MapBatch {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let batch: MapBatch = serde_yaml::from_str(yaml).context("Invalid map batch definition")?;
        Ok(batch)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    /// Jobs with output paths resolved against `output_dir`.
    pub fn resolved_jobs(&self, output_dir: Option<&Path>) -> Vec<MapJob> {
        let dir = output_dir.unwrap_or(&self.output_dir);
        self.maps
            .iter()
            .map(|job| {
                let mut job = job.clone();
                job.options.output_path = Some(dir.join(&job.file));
                job
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLED: &str = include_str!("../config/antipode_maps.yaml");

    #[test]
    fn test_bundled_batch() {
        let batch = MapBatch::from_yaml_str(BUNDLED).unwrap();
        assert_eq!(batch.maps.len(), 12);
        assert_eq!(batch.grid.as_deref(), Some(Path::new("antipode_grid.nc")));

        let robinson = batch.maps.iter().filter(|m| m.layout == MapLayout::Robinson).count();
        assert_eq!(robinson, 6);

        let uk = &batch.maps[8];
        assert!(uk.options.recenter);
        assert_eq!(uk.options.point_latitude, 51.80);
        assert!(!uk.options.show_oceans);
        assert!(uk.options.show_point);
    }

    #[test]
    fn test_defaults_fill_missing_options() {
        let batch = MapBatch::from_yaml_str(
            "maps:\n  - layout: perspective\n    file: a.png\n    show_oceans: true\n",
        )
        .unwrap();
        assert_eq!(batch.output_dir, PathBuf::from("images"));
        let job = &batch.maps[0];
        assert!(job.options.show_oceans);
        assert!(job.options.show_point);
        assert_eq!(job.options.point_longitude, -81.36);
    }

    #[test]
    fn test_resolved_paths() {
        let batch = MapBatch::from_yaml_str("output_dir: out\nmaps:\n  - layout: robinson\n    file: a.png\n").unwrap();
        let jobs = batch.resolved_jobs(None);
        assert_eq!(jobs[0].options.output_path, Some(PathBuf::from("out/a.png")));

        let jobs = batch.resolved_jobs(Some(Path::new("elsewhere")));
        assert_eq!(jobs[0].options.output_path, Some(PathBuf::from("elsewhere/a.png")));
    }

    #[test]
    fn test_unknown_layout_rejected() {
        assert!(MapBatch::from_yaml_str("maps:\n  - layout: mercator\n    file: a.png\n").is_err());
    }
}
