//! A group of particles sharing a `rigid_body_id`, integrated as one frame.

use nalgebra::{UnitQuaternion, Vector3};

use crate::topology::ParticleCollection;
use crate::vector::Vec3;

/// Translation + rotation state of one rigid body, plus the force/torque
/// accumulated against it during the current step's force loop.
#[derive(Clone, Debug)]
pub struct RigidBody {
    id: usize,
    member_indices: Vec<usize>,

    pub reference_point: Vec3,
    pub translational_velocity: Vec3,
    pub orientation: UnitQuaternion<f32>,
    pub angular_velocity: Vec3,

    total_mass: f32,
    inertia_tensor: nalgebra::Matrix3<f32>,

    accumulated_force: Vec3,
    accumulated_torque: Vec3,
}

impl RigidBody {
    /// Builds a rigid body from the particles at `member_indices`
    /// (already known to share `id` as their `rigid_body_id`),
    /// computing its reference point (center of mass) and inertia
    /// tensor from their current positions and masses.
    pub fn new(id: usize, member_indices: Vec<usize>, particles: &ParticleCollection) -> Self {
        let members: Vec<_> = member_indices.iter().map(|&i| particles.by_index(i)).collect();
        let total_mass: f32 = members.iter().map(|p| p.mass()).sum();
        let reference_point = members
            .iter()
            .fold(Vec3::zeros(), |acc, p| acc + p.position * p.mass())
            / total_mass;

        let mut inertia_tensor = nalgebra::Matrix3::<f32>::zeros();
        for particle in &members {
            let r = particle.position - reference_point;
            let r_sq = r.norm_squared();
            let identity_term = nalgebra::Matrix3::<f32>::identity() * r_sq;
            let outer = r * r.transpose();
            inertia_tensor += (identity_term - outer) * particle.mass();
        }

        Self {
            id,
            member_indices,
            reference_point,
            translational_velocity: Vec3::zeros(),
            orientation: UnitQuaternion::identity(),
            angular_velocity: Vec3::zeros(),
            total_mass,
            inertia_tensor,
            accumulated_force: Vec3::zeros(),
            accumulated_torque: Vec3::zeros(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn member_indices(&self) -> &[usize] {
        &self.member_indices
    }

    pub fn total_mass(&self) -> f32 {
        self.total_mass
    }

    pub fn reset_accumulators(&mut self) {
        self.accumulated_force = Vec3::zeros();
        self.accumulated_torque = Vec3::zeros();
    }

    /// Accumulates one constituent particle's force (and its torque
    /// about the reference point) into this body's running totals.
    /// Called once per dynamic particle during the force loop.
    pub fn accumulate(&mut self, particle_position: Vec3, particle_force: Vec3) {
        self.accumulated_force += particle_force;
        let arm = particle_position - self.reference_point;
        self.accumulated_torque += arm.cross(&particle_force);
    }

    /// Integrates translational and angular velocity from the
    /// accumulated force/torque, then updates orientation with a
    /// first-order quaternion composition `q <- normalize(q + 0.5*dt*omega_quat*q)`.
    pub fn integrate(&mut self, timestep: f32) {
        self.translational_velocity += self.accumulated_force * (timestep / self.total_mass);

        let inverse_inertia = self
            .inertia_tensor
            .try_inverse()
            .unwrap_or_else(nalgebra::Matrix3::identity);
        self.angular_velocity += inverse_inertia * self.accumulated_torque * timestep;

        let omega = self.angular_velocity;
        let omega_quat = nalgebra::Quaternion::new(0.0, omega.x, omega.y, omega.z);
        let current = self.orientation.into_inner();
        let delta = current + omega_quat * current * (0.5 * timestep);
        self.orientation = UnitQuaternion::from_quaternion(delta);

        self.reference_point += self.translational_velocity * timestep;
    }

    /// The velocity every member particle inherits this step: rigid
    /// translation plus the rotational contribution `omega x r`.
    pub fn member_velocity(&self, particle_position: Vec3) -> Vec3 {
        let arm = particle_position - self.reference_point;
        self.translational_velocity + self.angular_velocity.cross(&arm)
    }

    /// Rigidly propagated position for a member currently at
    /// `previous_position` relative to the body's previous reference
    /// point `previous_reference_point`.
    pub fn propagate_position(&self, previous_position: Vec3, previous_reference_point: Vec3) -> Vec3 {
        let local = previous_position - previous_reference_point;
        let rotated: Vector3<f32> = self.orientation * local;
        self.reference_point + rotated
    }
}
