//! Configuration options for the adapter.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::device::SamplerDescription;
use crate::error::Result;

/// Adapter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterOptions {
    /// Vertex buffer capacity allocated up front, in vertices.
    pub initial_vertex_capacity: usize,

    /// Index buffer capacity allocated up front, in indices.
    pub initial_index_capacity: usize,

    /// How GPU buffers grow when a frame outgrows them.
    pub growth: GrowthPolicy,

    /// When modifier key state is forwarded to the GUI.
    pub modifier_policy: ModifierPolicy,

    /// Sampler used for every GUI texture.
    pub sampler: SamplerDescription,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            initial_vertex_capacity: 1024 * 4,
            initial_index_capacity: 1024 * 6,
            growth: GrowthPolicy::Exact,
            modifier_policy: ModifierPolicy::OnChange,
            sampler: SamplerDescription::POINT_CLAMP,
        }
    }
}

impl AdapterOptions {
    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&text)?;
        debug!("loaded adapter options from {}", path.display());
        Ok(options)
    }

    /// Serializes options to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Buffer growth strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GrowthPolicy {
    /// Reallocate to exactly the frame's demand.
    #[default]
    Exact,
    /// Reallocate to the next power of two at or above the demand.
    Doubling,
}

impl GrowthPolicy {
    /// New capacity for a buffer that must hold `demand` elements.
    pub fn grow(self, demand: usize) -> usize {
        match self {
            GrowthPolicy::Exact => demand,
            GrowthPolicy::Doubling => demand.next_power_of_two(),
        }
    }
}

/// Modifier key forwarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ModifierPolicy {
    /// Forward a modifier whenever its aggregate state changes.
    #[default]
    OnChange,
    /// Forward all modifiers only on ticks where some key or button went down.
    /// A modifier released alone is reported on the next such tick.
    OnKeyPress,
    /// Forward all modifiers every tick.
    EveryTick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = AdapterOptions::default();
        assert_eq!(opts.initial_vertex_capacity, 4096);
        assert_eq!(opts.initial_index_capacity, 6144);
        assert_eq!(opts.growth, GrowthPolicy::Exact);
        assert_eq!(opts.modifier_policy, ModifierPolicy::OnChange);
        assert_eq!(opts.sampler, SamplerDescription::POINT_CLAMP);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let opts = AdapterOptions::from_json_str(r#"{ "growth": "Doubling" }"#).unwrap();
        assert_eq!(opts.growth, GrowthPolicy::Doubling);
        assert_eq!(opts.initial_vertex_capacity, 4096);
    }

    #[test]
    fn test_json_round_trip() {
        let opts = AdapterOptions {
            initial_vertex_capacity: 10,
            modifier_policy: ModifierPolicy::OnKeyPress,
            ..AdapterOptions::default()
        };
        let json = opts.to_json_string().unwrap();
        assert_eq!(AdapterOptions::from_json_str(&json).unwrap(), opts);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = AdapterOptions::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, crate::BridgeError::Config(_)));
    }

    #[test]
    fn test_growth_policy() {
        assert_eq!(GrowthPolicy::Exact.grow(5000), 5000);
        assert_eq!(GrowthPolicy::Doubling.grow(5000), 8192);
        assert_eq!(GrowthPolicy::Doubling.grow(4096), 4096);
    }
}
