//! Persisted simulation configuration.
//!
//! One of the four top-level records in the store. The scheduler reads a
//! fresh copy on every scheduling decision, so external edits (for example
//! via the CLI against the shared store) take effect on the next tick.

use serde::{Deserialize, Serialize};

/// Coarse preset scaling overall simulation aggressiveness.
///
/// Stored and reported as-is; the scheduler derives its cadence from
/// `noise_level` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivacyMode {
    Full,
    Moderate,
    Minimal,
    Disabled,
}

/// Simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Master switch. Off by default for safety.
    #[serde(default)]
    pub enabled: bool,
    /// 0.0 to 1.0; higher means more frequent synthetic activity.
    #[serde(default = "default_noise_level")]
    pub noise_level: f64,
    /// Only simulate inside the profile's active schedule windows.
    #[serde(default = "default_true")]
    pub respect_schedule: bool,
    #[serde(default = "default_privacy_mode")]
    pub privacy_mode: PrivacyMode,
}

fn default_noise_level() -> f64 {
    0.5
}
fn default_true() -> bool {
    true
}
fn default_privacy_mode() -> PrivacyMode {
    PrivacyMode::Moderate
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            noise_level: default_noise_level(),
            respect_schedule: true,
            privacy_mode: PrivacyMode::Moderate,
        }
    }
}

impl SimulationConfig {
    /// Get a config value as string by field name.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by field name. Returns an error if the key is
    /// unknown or the value cannot be parsed as the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| format!("unknown config key: {key}"))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| format!("unknown config key: {key}"))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
            serde_json::Value::Number(_) => {
                let n = value.parse::<f64>()?;
                serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| format!("cannot parse '{value}' as number"))?
            }
            _ => serde_json::Value::String(value.into()),
        };
        obj.insert(key.to_string(), new_value);
        *self = serde_json::from_value(json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_disabled() {
        let cfg = SimulationConfig::default();
        assert!(!cfg.enabled);
        assert_eq!(cfg.noise_level, 0.5);
        assert!(cfg.respect_schedule);
        assert_eq!(cfg.privacy_mode, PrivacyMode::Moderate);
    }

    #[test]
    fn config_roundtrip() {
        let cfg = SimulationConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let parsed: SimulationConfig = serde_json::from_str("{\"enabled\": true}").unwrap();
        assert!(parsed.enabled);
        assert_eq!(parsed.noise_level, 0.5);
    }

    #[test]
    fn get_and_set_by_key() {
        let mut cfg = SimulationConfig::default();
        assert_eq!(cfg.get("enabled").as_deref(), Some("false"));
        cfg.set("noise_level", "0.8").unwrap();
        assert_eq!(cfg.noise_level, 0.8);
        cfg.set("enabled", "true").unwrap();
        assert!(cfg.enabled);
        assert!(cfg.set("nonexistent", "1").is_err());
        assert!(cfg.set("enabled", "not_a_bool").is_err());
    }
}
