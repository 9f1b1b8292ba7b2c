//! Minimal, capability-only stand-ins for three named trajectory formats
//! (`pdbtrajectory`, `xtctrajectory`, `csvsampling`). None of these
//! produce bytes any real PDB/XTC reader would accept; they exist to
//! exercise the sampling-cadence and dispatch contract, not file-format
//! fidelity.

use std::io;

use crate::error::EngineError;
use crate::trajectory::writer::{Frame, TrajectoryWriter};

/// Writes one ATOM-like line per particle per sampled step, at a fixed
/// step interval.
pub struct PdbTrajectoryWriter {
    pub interval: u64,
}

impl TrajectoryWriter for PdbTrajectoryWriter {
    fn should_write(&self, step: u64) -> bool {
        self.interval > 0 && step % self.interval == 0
    }

    fn write_frame(&mut self, frame: &Frame, sink: &mut dyn io::Write) -> Result<(), EngineError> {
        writeln!(sink, "MODEL {}", frame.step).map_err(io_err)?;
        for particle in frame.particles {
            writeln!(
                sink,
                "ATOM  {:>5} {:<4} {:8.3} {:8.3} {:8.3}",
                particle.uid(),
                particle.name,
                particle.position.x,
                particle.position.y,
                particle.position.z
            )
            .map_err(io_err)?;
        }
        writeln!(sink, "ENDMDL").map_err(io_err)
    }
}

/// Writes a compact binary-ish record per sampled step: a frame header
/// followed by one little-endian `f32` triple per particle. Stands in
/// for the real XTC compressed-coordinate format.
pub struct XtcTrajectoryWriter {
    pub interval: u64,
}

impl TrajectoryWriter for XtcTrajectoryWriter {
    fn should_write(&self, step: u64) -> bool {
        self.interval > 0 && step % self.interval == 0
    }

    fn write_frame(&mut self, frame: &Frame, sink: &mut dyn io::Write) -> Result<(), EngineError> {
        sink.write_all(&(frame.step as u32).to_le_bytes()).map_err(io_err)?;
        sink.write_all(&(frame.particles.len() as u32).to_le_bytes())
            .map_err(io_err)?;
        for particle in frame.particles {
            sink.write_all(&particle.position.x.to_le_bytes()).map_err(io_err)?;
            sink.write_all(&particle.position.y.to_le_bytes()).map_err(io_err)?;
            sink.write_all(&particle.position.z.to_le_bytes()).map_err(io_err)?;
        }
        Ok(())
    }
}

/// Writes one CSV row per sampled step, aggregating total kinetic
/// energy across all particles.
pub struct CsvSamplingWriter {
    pub interval: u64,
    header_written: bool,
}

impl CsvSamplingWriter {
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            header_written: false,
        }
    }
}

impl TrajectoryWriter for CsvSamplingWriter {
    fn should_write(&self, step: u64) -> bool {
        self.interval > 0 && step % self.interval == 0
    }

    fn write_frame(&mut self, frame: &Frame, sink: &mut dyn io::Write) -> Result<(), EngineError> {
        if !self.header_written {
            writeln!(sink, "step,kinetic_energy").map_err(io_err)?;
            self.header_written = true;
        }
        let kinetic: f32 = frame.particles.iter().map(|p| p.energies.kinetic).sum();
        writeln!(sink, "{},{}", frame.step, kinetic).map_err(io_err)
    }
}

fn io_err(e: io::Error) -> EngineError {
    EngineError::resource("trajectory", e.to_string())
}
