//! Applies one parsed `group.key = value` entry onto a [`super::Configuration`]
//! being built up by [`super::Configuration::from_entries`].

use super::{parse_bool, parse_f32, parse_i64, parse_steric_mode, parse_usize, Configuration};
use crate::error::EngineError;

const STAGE: &str = "Configuration::from_entries";

/// A single parsed `group.key = value` line, as the excluded MSP reader
/// would hand it to [`super::Configuration::from_entries`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

pub(super) fn apply_entry(config: &mut Configuration, key: &str, value: &str) -> Result<(), EngineError> {
    let Some((group, name)) = key.split_once('.') else {
        return Err(EngineError::configuration(STAGE, format!("key `{key}` is missing a `group.name`")));
    };

    match (group, name) {
        ("simulation", "nbsteps") => config.simulation.nbsteps = parse_i64(STAGE, key, value)?,
        ("simulation", "timestep") => config.simulation.timestep = parse_f32(STAGE, key, value)?,
        ("simulation", "samplerate") => config.simulation.samplerate = parse_usize(STAGE, key, value)?,
        ("simulation", "enable_parallel_forces") => {
            config.simulation.enable_parallel_forces = parse_bool(STAGE, key, value)?
        }

        ("spring", "enable") => config.spring.enable = parse_bool(STAGE, key, value)?,
        ("spring", "scale") => config.spring.scale = parse_f32(STAGE, key, value)?,
        ("spring", "cutoff") => config.spring.cutoff = parse_f32(STAGE, key, value)?,

        ("steric", "enable") => config.steric.enable = parse_bool(STAGE, key, value)?,
        ("steric", "gridscale") | ("steric", "scale") => config.steric.scale = parse_f32(STAGE, key, value)?,
        ("steric", "cutoff") => config.steric.cutoff = parse_f32(STAGE, key, value)?,
        ("steric", "mode") => config.steric.mode = parse_steric_mode(STAGE, key, value)?,

        ("hydrophobicity", "enable") => config.hydrophobicity.enable = parse_bool(STAGE, key, value)?,
        ("hydrophobicity", "scale") => config.hydrophobicity.scale = parse_f32(STAGE, key, value)?,
        ("hydrophobicity", "cutoff") => config.hydrophobicity.cutoff = parse_f32(STAGE, key, value)?,

        ("coulomb", "enable") => config.coulomb.enable = parse_bool(STAGE, key, value)?,
        ("coulomb", "scale") => config.coulomb.scale = parse_f32(STAGE, key, value)?,
        ("coulomb", "cutoff") => config.coulomb.cutoff = parse_f32(STAGE, key, value)?,
        ("coulomb", "dielectric") => config.coulomb.dielectric = parse_f32(STAGE, key, value)?,

        ("impala", "enable") => config.impala.enable = parse_bool(STAGE, key, value)?,
        ("impala", "scale") => config.impala.scale = parse_f32(STAGE, key, value)?,
        ("impala", "upperoffset") => config.impala.upper_offset = parse_f32(STAGE, key, value)?,
        ("impala", "uppercurvature") => config.impala.upper_curvature = parse_f32(STAGE, key, value)?,
        ("impala", "loweroffset") => config.impala.lower_offset = parse_f32(STAGE, key, value)?,
        ("impala", "lowercurvature") => config.impala.lower_curvature = parse_f32(STAGE, key, value)?,

        ("insertionvector", "enable") => config.insertion_vector.enable = parse_bool(STAGE, key, value)?,
        ("insertionvector", "vector") => {
            let (first, second) = value.split_once(',').ok_or_else(|| {
                EngineError::configuration(STAGE, format!("key `{key}`: expected `first,second`, got `{value}`"))
            })?;
            config.insertion_vector.first_particle_id = parse_i64(STAGE, key, first.trim())?;
            config.insertion_vector.second_particle_id = parse_i64(STAGE, key, second.trim())?;
        }

        ("viscosity", "enable") => config.viscosity.enable = parse_bool(STAGE, key, value)?,
        ("viscosity", "value") => config.viscosity.value = parse_f32(STAGE, key, value)?,

        ("probe", "enable") => config.probe.enable = parse_bool(STAGE, key, value)?,
        ("probe", "enableelectrostatic") => config.probe.enable_electrostatic = parse_bool(STAGE, key, value)?,
        ("probe", "enablesteric") => config.probe.enable_steric = parse_bool(STAGE, key, value)?,
        ("probe", "x") => config.probe.x = parse_f32(STAGE, key, value)?,
        ("probe", "y") => config.probe.y = parse_f32(STAGE, key, value)?,
        ("probe", "z") => config.probe.z = parse_f32(STAGE, key, value)?,
        ("probe", "mass") => config.probe.mass = parse_f32(STAGE, key, value)?,
        ("probe", "epsilon") => config.probe.epsilon = parse_f32(STAGE, key, value)?,
        ("probe", "radius") => config.probe.radius = parse_f32(STAGE, key, value)?,
        ("probe", "charge") => config.probe.charge = parse_f32(STAGE, key, value)?,

        ("rigidbody", "enable") => config.rigid_body.enable = parse_bool(STAGE, key, value)?,
        ("rigidbody", "enablesampling") => config.rigid_body.enable_sampling = parse_bool(STAGE, key, value)?,
        ("rigidbody", "enablemontecarlo") => config.rigid_body.enable_montecarlo = parse_bool(STAGE, key, value)?,
        ("rigidbody", "montecarlo_translation_norm") => {
            config.rigid_body.montecarlo_translation_norm = parse_f32(STAGE, key, value)?
        }
        ("rigidbody", "montecarlo_rotation_norm") => {
            config.rigid_body.montecarlo_rotation_norm = parse_f32(STAGE, key, value)?
        }
        ("rigidbody", "montecarlo_temperature") => {
            config.rigid_body.montecarlo_temperature = parse_f32(STAGE, key, value)?
        }

        ("pdbtrajectory", "enable") => config.pdb_trajectory.enable = parse_bool(STAGE, key, value)?,
        ("pdbtrajectory", "path") => config.pdb_trajectory.path = value.to_string(),
        ("pdbtrajectory", "frequency") => config.pdb_trajectory.frequency = parse_usize(STAGE, key, value)?,

        ("xtctrajectory", "enable") => config.xtc_trajectory.enable = parse_bool(STAGE, key, value)?,
        ("xtctrajectory", "path") => config.xtc_trajectory.path = value.to_string(),
        ("xtctrajectory", "frequency") => config.xtc_trajectory.frequency = parse_usize(STAGE, key, value)?,

        ("csvsampling", "enable") => config.csv_sampling.enable = parse_bool(STAGE, key, value)?,
        ("csvsampling", "path") => config.csv_sampling.path = value.to_string(),
        ("csvsampling", "frequency") => config.csv_sampling.frequency = parse_usize(STAGE, key, value)?,

        ("potentialgrid", "enable") => config.potential_grid.enable = parse_bool(STAGE, key, value)?,
        ("potentialgrid", "path") => config.potential_grid.path = value.to_string(),
        ("potentialgrid", "scale") => config.potential_grid.scale = Some(parse_f32(STAGE, key, value)?),

        ("densitygrid", "enable") => config.density_grid.enable = parse_bool(STAGE, key, value)?,
        ("densitygrid", "path") => config.density_grid.path = value.to_string(),
        ("densitygrid", "scale") => config.density_grid.scale = Some(parse_f32(STAGE, key, value)?),

        _ => return Err(EngineError::configuration(STAGE, format!("unknown parameter `{key}`"))),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_vector_parses_particle_id_pair() {
        let mut config = Configuration::default();
        apply_entry(&mut config, "insertionvector.vector", "3, 17").unwrap();
        assert_eq!(config.insertion_vector.first_particle_id, 3);
        assert_eq!(config.insertion_vector.second_particle_id, 17);
    }

    #[test]
    fn impala_membrane_geometry_keys_parse() {
        let mut config = Configuration::default();
        apply_entry(&mut config, "impala.upperoffset", "15.0").unwrap();
        apply_entry(&mut config, "impala.uppercurvature", "0.05").unwrap();
        assert_eq!(config.impala.upper_offset, 15.0);
        assert_eq!(config.impala.upper_curvature, 0.05);
    }

    #[test]
    fn unknown_group_is_rejected() {
        let mut config = Configuration::default();
        assert!(apply_entry(&mut config, "nosuchgroup.key", "1").is_err());
    }
}
