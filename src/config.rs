//! Settings Module
//! Compiled-in defaults, optionally overridden by a `balanco.json` in the
//! working directory.

use crate::data::DropPolicy;
use crate::stats::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Google Sheets CSV export consumed out of the box.
pub const DEFAULT_SOURCE_URL: &str =
    "https://docs.google.com/spreadsheets/d/1USAp-HVIxoi0LSUfsxb3Y7lAYWlb_JphF2nEsnEqCT8/export?format=csv&gid=0";

pub const SETTINGS_FILE: &str = "balanco.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source_url: String,
    pub drop_policy: DropPolicy,
    pub top_n: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            drop_policy: DropPolicy::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl Settings {
    /// Read settings from `path`; absent or invalid files fall back to the
    /// defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "ignoring invalid settings file");
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }
}
