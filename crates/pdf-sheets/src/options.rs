use crate::constants::DEFAULT_TOLERANCE_MM;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Batch analysis configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisOptions {
    /// Largest per-side difference (mm) for two pages to form a sheet
    pub tolerance_mm: f64,
    /// Also look for documents in subfolders
    pub recursive: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            tolerance_mm: DEFAULT_TOLERANCE_MM,
            recursive: false,
        }
    }
}

impl AnalysisOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| SheetsError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SheetsError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance_mm.is_finite() || self.tolerance_mm < 0.0 {
            return Err(SheetsError::Config(format!(
                "Tolerance must be a non-negative number of millimeters, got {}",
                self.tolerance_mm
            )));
        }
        Ok(())
    }
}

/// Where and how the report is written
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub output_dir: PathBuf,
    /// Also write the whole report as JSON
    pub write_json: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            write_json: false,
        }
    }
}
