// Engine settings, loaded from a JSON file or taken from defaults
use crate::error::CutlistError;
use cutlist_shared::models::{Placement, Separator};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CutlistSettings {
    /// Used whenever the notation probe cannot reach a verdict.
    pub fallback_separator: Separator,
    /// Where the temporary probe instance is placed.
    pub probe_origin: [f64; 3],
    pub csv_delimiter: String, // Should be char, but JSON string is easier
    pub diagnostics: DiagnosticSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DiagnosticSettings {
    pub verbose: bool,
    pub component_discovery: bool,
}

impl Default for CutlistSettings {
    fn default() -> Self {
        CutlistSettings {
            fallback_separator: Separator::Dot,
            probe_origin: [0.0, 0.0, 0.0],
            csv_delimiter: ",".to_string(),
            diagnostics: DiagnosticSettings::default(),
        }
    }
}

impl CutlistSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CutlistError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let settings: CutlistSettings = serde_json::from_str(&raw)?;
        settings.delimiter_byte()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn probe_placement(&self) -> Placement {
        Placement::at(self.probe_origin)
    }

    pub fn delimiter_byte(&self) -> Result<u8, CutlistError> {
        match self.csv_delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(CutlistError::ConfigError(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            ))),
        }
    }
}
