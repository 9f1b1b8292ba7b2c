//! The interactor capability contract: an opaque external producer of
//! per-particle forces and consumer of the engine's state snapshot.

use crate::vector::Vec3;

/// One particle's state as published to interactors; read-only, taken
/// under the engine's interactor mutex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSnapshot {
    pub uid: u64,
    pub position: Vec3,
    pub force: Vec3,
}

/// A snapshot of every particle's position and force, published once
/// per step before the force loop runs.
#[derive(Clone, Debug, Default)]
pub struct SystemStateSnapshot {
    pub step: u64,
    pub particles: Vec<ParticleSnapshot>,
}

/// An external per-particle force an interactor stages for the next
/// step; each stage overwrites any prior entry for the same uid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StagedForce {
    pub uid: u64,
    pub force: Vec3,
}

/// Capability contract every interactor implements.
///
/// All cross-thread state exchange is mediated by a single mutex the
/// engine owns; an interactor never reads particle fields outside a
/// `sync_system_state_data` call.
pub trait Interactor: Send {
    /// One-time handshake before `start_interaction_thread` begins
    /// polling; called on the simulation thread.
    fn setup_interaction(&mut self);

    /// Begins the external thread. Implementations typically spawn a
    /// thread here that loops while `continue_interaction_thread`
    /// returns `true`, calling `sync_system_state_data` each iteration.
    fn start_interaction_thread(&mut self);

    /// Polled by the interactor's own thread loop; `false` ends the
    /// loop without engine involvement.
    fn continue_interaction_thread(&self) -> bool;

    /// Called by the engine inside the step, with the interactor mutex
    /// held: publishes `snapshot` and returns any forces the interactor
    /// wants staged for the next step.
    fn sync_system_state_data(&mut self, snapshot: &SystemStateSnapshot) -> Vec<StagedForce>;

    /// Cooperative shutdown; the engine calls this on teardown.
    fn stop_interaction_thread(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoInteractor {
        running: bool,
        last_step: u64,
    }

    impl Interactor for EchoInteractor {
        fn setup_interaction(&mut self) {
            self.running = true;
        }

        fn start_interaction_thread(&mut self) {}

        fn continue_interaction_thread(&self) -> bool {
            self.running
        }

        fn sync_system_state_data(&mut self, snapshot: &SystemStateSnapshot) -> Vec<StagedForce> {
            self.last_step = snapshot.step;
            snapshot
                .particles
                .iter()
                .map(|p| StagedForce {
                    uid: p.uid,
                    force: Vec3::zeros(),
                })
                .collect()
        }

        fn stop_interaction_thread(&mut self) {
            self.running = false;
        }
    }

    #[test]
    fn echo_interactor_stages_one_force_per_particle() {
        let mut interactor = EchoInteractor {
            running: false,
            last_step: 0,
        };
        interactor.setup_interaction();
        let snapshot = SystemStateSnapshot {
            step: 3,
            particles: vec![ParticleSnapshot {
                uid: 0,
                position: Vec3::zeros(),
                force: Vec3::zeros(),
            }],
        };
        let staged = interactor.sync_system_state_data(&snapshot);
        assert_eq!(staged.len(), 1);
        assert_eq!(interactor.last_step, 3);
        interactor.stop_interaction_thread();
        assert!(!interactor.continue_interaction_thread());
    }
}
