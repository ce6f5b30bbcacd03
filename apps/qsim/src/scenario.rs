//! JSON scenario files.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use qs_fit::FitConfig;
use qs_sim::SimConfig;

/// One scenario: the run to simulate and how to test its samples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub simulation: SimConfig,
    #[serde(default)]
    pub fit:        FitConfig,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
