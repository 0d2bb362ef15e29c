use serde::{Deserialize, Serialize};
use ts_rs::TS;

use meridian_instruments::gate::GateOverrides;
use meridian_validity::config::ValidityConfig;

use crate::error::ReportError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Scoring thresholds and designated item sets.
///
/// Every field has a default, so an empty object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub validity: ValidityConfig,
    #[serde(default)]
    pub gates: GateOverrides,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            validity: ValidityConfig::default(),
            gates: GateOverrides::default(),
        }
    }
}

impl ScoringConfig {
    /// Parse a config document, migrating older shapes first.
    pub fn from_json_str(contents: &str) -> Result<Self, ReportError> {
        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;

        let migrated = migrate(json, on_disk_version)?;
        Ok(serde_json::from_value(migrated)?)
    }

    /// Serialize with the current version stamped, regardless of what was loaded.
    pub fn to_json_string(&self) -> Result<String, ReportError> {
        let mut stamped = self.clone();
        stamped.config_version = CURRENT_VERSION;
        Ok(serde_json::to_string_pretty(&stamped)?)
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, ReportError> {
    if from_version > CURRENT_VERSION {
        return Err(ReportError::Config(format!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    // v0 → v1: `gate_overrides` renamed to `gates`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ReportError::Config("config is not a JSON object".to_string()))?;
        if let Some(gates) = obj.remove("gate_overrides") {
            obj.entry("gates").or_insert(gates);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated scoring config v0 → v1 (gate_overrides → gates)");
    }

    Ok(json)
}
