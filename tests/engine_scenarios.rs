// End-to-end scenarios for the simulation engine: one test per
// literal scenario, covering the full Configuration -> Topology ->
// Engine pipeline rather than individual kernels or collections.

use biospring::config::Configuration;
use biospring::engine::Engine;
use biospring::topology::Topology;
use biospring::vector::{distance, Vec3};

fn two_particle_topology(first: Vec3, second: Vec3, stiffness: f32, equilibrium: f32) -> Topology {
    let mut topology = Topology::new(0);
    let a = topology.add_particle("A", first);
    let b = topology.add_particle("B", second);
    topology.add_spring(a, b, Some(equilibrium), stiffness).unwrap();
    topology
}

#[test]
fn two_particle_spring_relaxes_to_equilibrium() {
    let mut config = Configuration::default();
    config.simulation.timestep = 0.01;
    config.simulation.nbsteps = 1000;
    config.simulation.enable_parallel_forces = false;
    config.spring.scale = 1.0;

    let topology = two_particle_topology(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), 1.0, 1.0);
    let mut engine = Engine::setup(config, topology, None, None).unwrap();
    engine.run().unwrap();

    let particles = engine.particles();
    let final_distance = distance(particles.by_index(0), particles.by_index(1));
    assert!((final_distance - 1.0).abs() < 1e-2, "final distance was {final_distance}");
    assert!(particles.by_index(0).position.iter().all(|c| c.is_finite()));
    assert!(particles.by_index(1).position.iter().all(|c| c.is_finite()));
}

#[test]
fn two_particle_coulomb_attracts_opposite_charges() {
    let mut config = Configuration::default();
    config.spring.enable = false;
    config.coulomb.enable = true;
    config.coulomb.dielectric = 1.0;
    config.simulation.enable_parallel_forces = false;

    let mut topology = Topology::new(0);
    let a = topology.add_particle("A", Vec3::new(0.0, 0.0, 0.0));
    let b = topology.add_particle("B", Vec3::new(2.0, 0.0, 0.0));
    topology.particles.get_mut(a).unwrap().set_charge(1.0);
    topology.particles.get_mut(b).unwrap().set_charge(-1.0);

    let mut engine = Engine::setup(config, topology, None, None).unwrap();
    let initial_distance = distance(engine.particles().by_index(0), engine.particles().by_index(1));

    engine.compute_step().unwrap();

    let particles = engine.particles();
    let after_distance = distance(particles.by_index(0), particles.by_index(1));
    assert!(after_distance < initial_distance, "pair should be drawn together by opposite charges");

    let force_a = particles.by_index(0).previous_force;
    let force_b = particles.by_index(1).previous_force;
    assert!((force_a + force_b).norm() < 1e-4, "forces on the pair should be equal and opposite");
}

#[test]
fn cutoff_spring_creation_on_ten_particle_grid_matches_combination_count() {
    let mut topology = Topology::new(0);
    for i in 0..10 {
        topology.add_particle(format!("P{i}"), Vec3::new(i as f32, 0.0, 0.0));
    }
    let added = topology.add_springs_from_cutoff(100.0, 1.0);
    assert_eq!(added, 45); // C(10, 2)
    assert_eq!(topology.springs.len(), 45);
    assert!(topology.springs.iter().all(|s| s.stiffness == 1.0));
}

#[test]
fn configuration_rejects_unknown_parameter_and_malformed_value() {
    let unknown = Configuration::from_entries(vec![("unknown.param", "1")]);
    assert!(unknown.is_err());

    let malformed = Configuration::from_entries(vec![("spring.cutoff", "notafloat")]);
    assert!(malformed.is_err());
}

#[test]
fn static_particles_never_move() {
    let mut config = Configuration::default();
    config.simulation.enable_parallel_forces = false;
    let mut topology = two_particle_topology(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), 1.0, 1.0);
    topology.particles.get_mut(0).unwrap().is_static = true;
    let initial_position = topology.particles.get(0).unwrap().position;

    let mut engine = Engine::setup(config, topology, None, None).unwrap();
    for _ in 0..50 {
        engine.compute_step().unwrap();
    }

    assert_eq!(engine.particles().get(0).unwrap().position, initial_position);
}
