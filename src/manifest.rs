//! Project manifest (costume.yaml) parsing.
//!
//! The manifest defines per-project defaults: the reference sheet, the
//! output directory, the composite tolerance, and the scan thresholds. All
//! fields are optional; a missing manifest means defaults everywhere.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CostumeError, Result};
use crate::scan::ScanConfig;

/// Manifest filename looked up in the working directory.
pub const MANIFEST_FILENAME: &str = "costume.yaml";

/// Project manifest loaded from costume.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Reference sheet used when a command is not given one explicitly.
    pub sheet: Option<PathBuf>,

    /// Output directory for recolored sheets and seeded costumes.
    pub output: PathBuf,

    /// Default composite tolerance.
    pub tolerance: u8,

    /// Strip detection thresholds.
    pub scan: ScanConfig,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sheet: None,
            output: PathBuf::from("recolors"),
            tolerance: 0,
            scan: ScanConfig::default(),
        }
    }
}

impl Manifest {
    /// Load a manifest from a costume.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CostumeError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a manifest from YAML text.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| CostumeError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check costume.yaml syntax".to_string()),
        })
    }

    /// Load the manifest from `dir` if one exists, defaults otherwise.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILENAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}
