//! Plain-text save format.
//!
//! ```text
//! # particles
//! <x> <y> <z> <pinned:0|1>
//! # constraints
//! <index_a> <index_b>
//! ```
//!
//! Particle indices are line order within the particle section. Rest lengths
//! are not stored: a loaded constraint takes the distance between its loaded
//! endpoints as rest length, so a cloth saved while stretched comes back
//! relaxed in that shape.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::cloth::Cloth;
use crate::constraint::DistanceConstraint;
use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::solver::ConstraintSolver;
use crate::vec::Vec3;

pub const PARTICLES_HEADER: &str = "# particles";
pub const CONSTRAINTS_HEADER: &str = "# constraints";

/// Lines dropped while reading a save.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines with the wrong field count or unparsable fields.
    pub malformed: usize,
    /// Constraint lines naming a particle index that does not exist.
    pub dangling: usize,
}

/// Result of parsing a save.
#[derive(Clone, Debug)]
pub struct LoadedState<F: Float> {
    pub particles: Vec<Particle<F>>,
    pub constraints: Vec<DistanceConstraint<F>>,
    pub report: LoadReport,
}

/// Write particles, then the active constraints as index pairs.
pub fn write_state<F: Float, W: Write>(
    mut writer: W,
    particles: &[Particle<F>],
    constraints: &[DistanceConstraint<F>],
) -> io::Result<()> {
    writeln!(writer, "{PARTICLES_HEADER}")?;
    for p in particles {
        let Vec3 { x, y, z } = p.position;
        writeln!(writer, "{} {} {} {}", x, y, z, u8::from(p.pinned))?;
    }
    writeln!(writer, "{CONSTRAINTS_HEADER}")?;
    for c in constraints.iter().filter(|c| c.is_active()) {
        writeln!(writer, "{} {}", c.a, c.b)?;
    }
    writer.flush()
}

/// Parse a save, skipping anything that does not fit.
///
/// Never fails: malformed lines (including ones that are not valid UTF-8) and
/// dangling indices are counted in the report, and a read error ends parsing
/// with whatever was read so far.
pub fn read_state<F: Float, R: BufRead>(mut reader: R) -> LoadedState<F> {
    let mut particles = Vec::new();
    let mut pairs = Vec::new();
    let mut report = LoadReport::default();
    let mut in_constraints = false;
    let mut buf = Vec::new();
    let mut number = 0usize;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => number += 1,
            Err(err) => {
                tracing::warn!(line = number + 1, %err, "stopped reading cloth state");
                break;
            }
        }
        let Ok(line) = std::str::from_utf8(&buf) else {
            tracing::debug!(line = number, "skipping line that is not valid UTF-8");
            report.malformed += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with(PARTICLES_HEADER) {
            continue;
        }
        if line.starts_with(CONSTRAINTS_HEADER) {
            in_constraints = true;
            continue;
        }

        if in_constraints {
            match parse_pair(line) {
                Some((a, b)) => match (in_range(a, particles.len()), in_range(b, particles.len())) {
                    (Some(a), Some(b)) => pairs.push((a, b)),
                    _ => {
                        tracing::debug!(line = number, a, b, "skipping dangling constraint");
                        report.dangling += 1;
                    }
                },
                None => {
                    tracing::debug!(line = number, "skipping malformed constraint");
                    report.malformed += 1;
                }
            }
        } else {
            match parse_particle(line) {
                Some(p) => particles.push(p),
                None => {
                    tracing::debug!(line = number, "skipping malformed particle");
                    report.malformed += 1;
                }
            }
        }
    }

    let constraints = pairs
        .into_iter()
        .map(|(a, b)| DistanceConstraint::new(a, b, &particles))
        .collect();
    LoadedState { particles, constraints, report }
}

fn parse_particle<F: Float>(line: &str) -> Option<Particle<F>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [x, y, z, pinned] = fields.as_slice() else {
        return None;
    };
    let position = Vec3::new(x.parse().ok()?, y.parse().ok()?, z.parse().ok()?);
    let pinned: i64 = pinned.parse().ok()?;
    Some(Particle::with_pinned(position, pinned != 0))
}

/// Indices are read signed so that a negative one is reported as dangling,
/// not malformed.
fn parse_pair(line: &str) -> Option<(i64, i64)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [a, b] = fields.as_slice() else {
        return None;
    };
    Some((a.parse().ok()?, b.parse().ok()?))
}

fn in_range(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

pub fn save_file<F: Float>(
    path: &Path,
    particles: &[Particle<F>],
    constraints: &[DistanceConstraint<F>],
) -> Result<(), ClothError> {
    let file = File::create(path).map_err(|e| ClothError::io(path, e))?;
    write_state(BufWriter::new(file), particles, constraints).map_err(|e| ClothError::io(path, e))
}

pub fn load_file<F: Float>(path: &Path) -> Result<LoadedState<F>, ClothError> {
    let file = File::open(path).map_err(|e| ClothError::io(path, e))?;
    Ok(read_state(BufReader::new(file)))
}

impl<F: Float> Cloth<F> {
    pub fn try_save(&self, path: impl AsRef<Path>) -> Result<(), ClothError> {
        let path = path.as_ref();
        save_file(path, self.particles(), self.constraints())?;
        tracing::info!(
            path = %path.display(),
            particles = self.particle_count(),
            constraints = self.active_constraint_count(),
            "cloth state saved"
        );
        Ok(())
    }

    /// Replace the cloth with a saved state. On error the cloth is untouched;
    /// otherwise every handle is invalidated and any drag ends.
    pub fn try_load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, ClothError> {
        let path = path.as_ref();
        let loaded = load_file(path)?;
        self.replace(ConstraintSolver::from_parts(loaded.particles, loaded.constraints));
        tracing::info!(
            path = %path.display(),
            particles = self.particle_count(),
            constraints = self.constraint_count(),
            malformed = loaded.report.malformed,
            dangling = loaded.report.dangling,
            "cloth state loaded"
        );
        Ok(loaded.report)
    }

    /// [`Cloth::try_save`], reporting only success.
    pub fn save(&self, path: impl AsRef<Path>) -> bool {
        match self.try_save(path) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "failed to save cloth state");
                false
            }
        }
    }

    /// [`Cloth::try_load`], reporting only success.
    pub fn load(&mut self, path: impl AsRef<Path>) -> bool {
        match self.try_load(path) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(%err, "failed to load cloth state");
                false
            }
        }
    }
}
