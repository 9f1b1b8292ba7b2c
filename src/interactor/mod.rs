//! External interaction capability: a synchronized handoff point
//! between the simulation thread and any external force-producing or
//! state-consuming thread.

pub mod interactor;

pub use interactor::{Interactor, ParticleSnapshot, StagedForce, SystemStateSnapshot};

use parking_lot::Mutex;
use std::sync::Arc;

/// Owns the registered interactors behind one shared mutex, so the
/// engine can publish a snapshot and collect staged forces from all of
/// them without any interactor observing a torn state.
#[derive(Default)]
pub struct InteractorRegistry {
    interactors: Arc<Mutex<Vec<Box<dyn Interactor>>>>,
}

impl InteractorRegistry {
    pub fn new() -> Self {
        Self {
            interactors: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn register(&self, mut interactor: Box<dyn Interactor>) {
        interactor.setup_interaction();
        interactor.start_interaction_thread();
        self.interactors.lock().push(interactor);
    }

    pub fn is_empty(&self) -> bool {
        self.interactors.lock().is_empty()
    }

    /// Publishes `snapshot` to every registered interactor and returns
    /// the concatenation of their staged forces, in registration order.
    pub fn sync(&self, snapshot: &SystemStateSnapshot) -> Vec<StagedForce> {
        let mut guard = self.interactors.lock();
        let mut staged = Vec::new();
        for interactor in guard.iter_mut() {
            staged.extend(interactor.sync_system_state_data(snapshot));
        }
        staged
    }

    pub fn shutdown(&self) {
        let mut guard = self.interactors.lock();
        for interactor in guard.iter_mut() {
            interactor.stop_interaction_thread();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingInteractor {
        calls: usize,
    }

    impl Interactor for CountingInteractor {
        fn setup_interaction(&mut self) {}
        fn start_interaction_thread(&mut self) {}
        fn continue_interaction_thread(&self) -> bool {
            true
        }
        fn sync_system_state_data(&mut self, snapshot: &SystemStateSnapshot) -> Vec<StagedForce> {
            self.calls += 1;
            snapshot
                .particles
                .iter()
                .map(|p| StagedForce {
                    uid: p.uid,
                    force: crate::vector::Vec3::zeros(),
                })
                .collect()
        }
        fn stop_interaction_thread(&mut self) {}
    }

    #[test]
    fn registry_syncs_every_registered_interactor() {
        let registry = InteractorRegistry::new();
        registry.register(Box::new(CountingInteractor { calls: 0 }));
        registry.register(Box::new(CountingInteractor { calls: 0 }));

        let snapshot = SystemStateSnapshot {
            step: 0,
            particles: vec![ParticleSnapshot {
                uid: 7,
                position: crate::vector::Vec3::zeros(),
                force: crate::vector::Vec3::zeros(),
            }],
        };
        let staged = registry.sync(&snapshot);
        assert_eq!(staged.len(), 2);
        registry.shutdown();
    }

    #[test]
    fn empty_registry_reports_empty() {
        let registry = InteractorRegistry::new();
        assert!(registry.is_empty());
    }
}
