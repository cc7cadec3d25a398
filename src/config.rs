//! JSON run configuration for the `measure_loss` tool.
//!
//! ```json
//! {
//!   "input": "sample.png",
//!   "params": { "xLeft": 0.2, "xRight": 0.8, "waveguideLength": 1.5, "ySpan": 20 },
//!   "output": { "reportJson": "out/report.json", "signalCropImage": "out/crop.png" }
//! }
//! ```
//! Omitted parameters fall back to [`GeometricParams::default`]. A
//! `position` block pins the sample edges and centerline manually; it is
//! ignored while `autoselect` is true.
use crate::analyzer::{GeometricParams, LossRequest};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: GeometricParams,
    #[serde(default)]
    pub position: Option<PositionConfig>,
    #[serde(default = "default_autoselect")]
    pub autoselect: bool,
    pub output: OutputConfig,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionConfig {
    pub x_start: Option<usize>,
    pub x_end: Option<usize>,
    pub y_center: Option<usize>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    pub report_json: PathBuf,
    #[serde(default)]
    pub signal_crop_image: Option<PathBuf>,
    #[serde(default)]
    pub overview_image: Option<PathBuf>,
}

fn default_autoselect() -> bool {
    true
}

impl RunConfig {
    pub fn loss_request(&self) -> LossRequest {
        let position = self.position.unwrap_or_default();
        LossRequest {
            params: self.params,
            x_start: position.x_start,
            x_end: position.x_end,
            y_center: position.y_center,
            autoselect: self.autoselect,
        }
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(contents: &str) -> Result<RunConfig, serde_json::Error> {
    serde_json::from_str(contents)
}
