//! Generation-checked particle handles.
//!
//! Every rebuild of the particle collection (reset, pattern switch, load)
//! starts a new generation. Handles minted before that point are rejected
//! instead of silently addressing a different particle.

use crate::error::ClothError;

/// Stable reference to one particle of one generation of a cloth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParticleHandle {
    index: usize,
    generation: u32,
}

impl ParticleHandle {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        ParticleHandle { index, generation }
    }

    /// Position of the particle in the collection and the save file.
    pub fn index(self) -> usize {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }

    /// Resolve against the current generation and particle count.
    pub(crate) fn resolve(self, generation: u32, count: usize) -> Result<usize, ClothError> {
        if self.generation != generation {
            return Err(ClothError::StaleHandle {
                index: self.index,
                generation: self.generation,
                current: generation,
            });
        }
        if self.index >= count {
            return Err(ClothError::ParticleOutOfBounds { index: self.index, count });
        }
        Ok(self.index)
    }
}
