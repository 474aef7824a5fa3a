//! Scenario files for the offline `project` command

use std::path::{Path, PathBuf};

use finproj_core::ProjectionInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Json,
    Yaml,
}

impl ScenarioFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ScenarioFormat::Json),
            "yaml" | "yml" => Some(ScenarioFormat::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported scenario file {}: expected .json, .yaml or .yml", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid JSON scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML scenario: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}

pub fn parse_scenario(
    text: &str,
    format: ScenarioFormat,
) -> Result<ProjectionInput, ScenarioError> {
    let input = match format {
        ScenarioFormat::Json => serde_json::from_str(text)?,
        ScenarioFormat::Yaml => serde_saphyr::from_str(text)?,
    };
    Ok(input)
}

/// Read a `ProjectionInput` from a JSON or YAML file
pub fn load_scenario(path: &Path) -> Result<ProjectionInput, ScenarioError> {
    let format = ScenarioFormat::from_path(path).ok_or_else(|| ScenarioError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scenario(&text, format)
}
