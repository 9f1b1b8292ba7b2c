//! Typed, validated engine configuration.
//!
//! A `group.key = value` line reader hands its parsed pairs to
//! [`Configuration::from_entries`]; everything past that point —
//! validation, defaulting, rejecting unknown/duplicate keys — lives
//! here.

mod entries;
mod groups;

pub use entries::ConfigEntry;
pub use groups::{
    CoulombConfig, HydrophobicityConfig, ImpalaConfig, InsertionVectorConfig, ProbeConfig,
    RigidBodyConfig, SimulationConfig, StericConfig, TrajectoryOutputConfig, ViscosityConfig,
};

use crate::error::EngineError;
use crate::forcefield::StericMode;

/// The fully validated, defaulted configuration an `Engine` is set up
/// with. Every scalar has a default; unknown or duplicate keys, or
/// malformed values, are rejected by [`Configuration::from_entries`]
/// before an `Engine` ever sees them.
#[derive(Clone, Debug)]
pub struct Configuration {
    pub simulation: SimulationConfig,
    pub spring: SpringConfig,
    pub steric: StericConfig,
    pub hydrophobicity: HydrophobicityConfig,
    pub coulomb: CoulombConfig,
    pub impala: ImpalaConfig,
    pub insertion_vector: InsertionVectorConfig,
    pub viscosity: ViscosityConfig,
    pub probe: ProbeConfig,
    pub rigid_body: RigidBodyConfig,
    pub pdb_trajectory: TrajectoryOutputConfig,
    pub xtc_trajectory: TrajectoryOutputConfig,
    pub csv_sampling: TrajectoryOutputConfig,
    pub potential_grid: GridFileConfig,
    pub density_grid: GridFileConfig,
}

#[derive(Clone, Copy, Debug)]
pub struct SpringConfig {
    pub enable: bool,
    pub scale: f32,
    pub cutoff: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            enable: true,
            scale: 1.0,
            cutoff: 12.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GridFileConfig {
    pub enable: bool,
    pub path: String,
    pub scale: Option<f32>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            spring: SpringConfig::default(),
            steric: StericConfig::default(),
            hydrophobicity: HydrophobicityConfig::default(),
            coulomb: CoulombConfig::default(),
            impala: ImpalaConfig::default(),
            insertion_vector: InsertionVectorConfig::default(),
            viscosity: ViscosityConfig::default(),
            probe: ProbeConfig::default(),
            rigid_body: RigidBodyConfig::default(),
            pdb_trajectory: TrajectoryOutputConfig::default(),
            xtc_trajectory: TrajectoryOutputConfig::default(),
            csv_sampling: TrajectoryOutputConfig::default(),
            potential_grid: GridFileConfig::default(),
            density_grid: GridFileConfig::default(),
        }
    }
}

impl Configuration {
    /// Builds a `Configuration` from `group.key = value` entries,
    /// starting from defaults and applying each entry in turn. Unknown
    /// keys, duplicate keys, and unparsable values are all fatal
    /// (`EngineError::Configuration`), matching the MSP contract.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut seen = crate::new_map::<String, ()>();

        for (key, value) in entries {
            let key = key.as_ref().trim().to_string();
            let value = value.as_ref().trim();

            if seen.contains_key(&key) {
                return Err(EngineError::configuration(
                    "Configuration::from_entries",
                    format!("duplicate key `{key}`"),
                ));
            }
            seen.insert(key.clone(), ());

            entries::apply_entry(&mut config, &key, value)?;
        }

        Ok(config)
    }
}

/// Parses a BioSpring MSP boolean literal:
/// `{true, True, 1, on, yes}` / `{false, False, 0, off, no}`.
pub(crate) fn parse_bool(stage: &'static str, key: &str, value: &str) -> Result<bool, EngineError> {
    match value {
        "true" | "True" | "1" | "on" | "yes" => Ok(true),
        "false" | "False" | "0" | "off" | "no" => Ok(false),
        other => Err(EngineError::configuration(
            stage,
            format!("key `{key}`: `{other}` is not a valid boolean"),
        )),
    }
}

pub(crate) fn parse_f32(stage: &'static str, key: &str, value: &str) -> Result<f32, EngineError> {
    value.parse::<f32>().map_err(|_| {
        EngineError::configuration(stage, format!("key `{key}`: `{value}` is not a valid number"))
    })
}

pub(crate) fn parse_usize(stage: &'static str, key: &str, value: &str) -> Result<usize, EngineError> {
    value.parse::<usize>().map_err(|_| {
        EngineError::configuration(stage, format!("key `{key}`: `{value}` is not a valid integer"))
    })
}

pub(crate) fn parse_i64(stage: &'static str, key: &str, value: &str) -> Result<i64, EngineError> {
    value.parse::<i64>().map_err(|_| {
        EngineError::configuration(stage, format!("key `{key}`: `{value}` is not a valid integer"))
    })
}

pub(crate) fn parse_steric_mode(stage: &'static str, key: &str, value: &str) -> Result<StericMode, EngineError> {
    match value {
        "linear" => Ok(StericMode::Linear),
        "lennard-jones-8-6-lewitt" => Ok(StericMode::LennardJones86Lewitt),
        "lennard-jones-8-6-zacharias" => Ok(StericMode::LennardJones86Zacharias),
        "lennard-jones-8-6-amber" => Ok(StericMode::LennardJones86Amber),
        other => Err(EngineError::configuration(
            stage,
            format!("key `{key}`: unknown steric mode `{other}`"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Configuration::default();
        assert!(config.simulation.timestep > 0.0);
        assert!(config.spring.enable);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let entries = vec![("unknown.param".to_string(), "1".to_string())];
        assert!(Configuration::from_entries(entries).is_err());
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let entries = vec![
            ("simulation.nbsteps".to_string(), "10".to_string()),
            ("simulation.nbsteps".to_string(), "20".to_string()),
        ];
        assert!(Configuration::from_entries(entries).is_err());
    }

    #[test]
    fn malformed_value_is_rejected() {
        let entries = vec![("spring.cutoff".to_string(), "notafloat".to_string())];
        assert!(Configuration::from_entries(entries).is_err());
    }

    #[test]
    fn valid_entries_override_defaults() {
        let entries = vec![
            ("simulation.nbsteps".to_string(), "500".to_string()),
            ("steric.mode".to_string(), "lennard-jones-8-6-amber".to_string()),
        ];
        let config = Configuration::from_entries(entries).unwrap();
        assert_eq!(config.simulation.nbsteps, 500);
        assert_eq!(config.steric.mode, StericMode::LennardJones86Amber);
    }
}
