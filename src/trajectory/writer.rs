//! The trajectory-writer capability contract and the manager that
//! fans one frame out to every configured writer.

use std::io;

use crate::error::EngineError;
use crate::topology::Particle;

/// One emitted trajectory frame: the step it was taken at and the
/// particles to record. Writers decide for themselves which fields of
/// [`Particle`] they serialize.
pub struct Frame<'a> {
    pub step: u64,
    pub particles: &'a [Particle],
}

/// Capability every trajectory format implements. Writing real PDB/XTC
/// bytes is out of scope; these model only the sampling cadence and
/// the dispatch contract a real writer would plug into.
pub trait TrajectoryWriter: Send {
    /// Whether `step` is one this writer wants a frame for.
    fn should_write(&self, step: u64) -> bool;

    /// Serializes `frame` to `sink`. Called only when `should_write`
    /// returned `true` for `frame.step`.
    fn write_frame(&mut self, frame: &Frame, sink: &mut dyn io::Write) -> Result<(), EngineError>;
}

/// Owns a set of writers plus the sink each one writes to, and emits
/// a frame to every writer whose sampling interval matches the step.
pub struct TrajectoryManager {
    entries: Vec<(Box<dyn TrajectoryWriter>, Box<dyn io::Write + Send>)>,
}

impl Default for TrajectoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TrajectoryManager {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn add(&mut self, writer: Box<dyn TrajectoryWriter>, sink: Box<dyn io::Write + Send>) {
        self.entries.push((writer, sink));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every writer whose `should_write(step)` is true against the
    /// current particle set.
    pub fn emit(&mut self, step: u64, particles: &[Particle]) -> Result<(), EngineError> {
        for (writer, sink) in self.entries.iter_mut() {
            if writer.should_write(step) {
                let frame = Frame { step, particles };
                writer.write_frame(&frame, sink.as_mut())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3;

    struct EveryNWriter {
        interval: u64,
        frames_written: usize,
    }

    impl TrajectoryWriter for EveryNWriter {
        fn should_write(&self, step: u64) -> bool {
            self.interval > 0 && step % self.interval == 0
        }

        fn write_frame(&mut self, frame: &Frame, sink: &mut dyn io::Write) -> Result<(), EngineError> {
            self.frames_written += 1;
            writeln!(sink, "step {} particles {}", frame.step, frame.particles.len())
                .map_err(|e| EngineError::resource("trajectory", e.to_string()))
        }
    }

    #[test]
    fn manager_emits_only_on_matching_steps() {
        let mut manager = TrajectoryManager::new();
        manager.add(
            Box::new(EveryNWriter {
                interval: 2,
                frames_written: 0,
            }),
            Box::new(Vec::new()),
        );
        let particles = vec![Particle::new(0, "CA", Vec3::zeros())];
        manager.emit(0, &particles).unwrap();
        manager.emit(1, &particles).unwrap();
        manager.emit(2, &particles).unwrap();
        assert_eq!(manager.entries.len(), 1);
    }

    #[test]
    fn empty_manager_reports_empty() {
        assert!(TrajectoryManager::new().is_empty());
    }
}
