//! Verlet cloth simulation with runtime pinning, dragging and tearing.
//!
//! `weft` models a cloth as point masses joined by distance constraints.
//! Each tick applies gravity and wind, integrates with position Verlet,
//! clamps into the world box, then relaxes the constraints for a fixed number
//! of Gauss-Seidel passes. Built for interactive use: cheap, stable and
//! approximately inextensible rather than physically exact.
//!
//! # Features
//!
//! - **Topologies**: square, triangle and hexagon grids with a pinned top row
//! - **Interaction**: nearest-particle picking, pin toggling, drag, tear
//! - **Safe handles**: generation-checked particle handles survive rebuilds
//!   by failing loudly instead of dangling
//! - **Persistence**: plain-text save/load of positions, pins and topology
//! - **Observable**: monitor tick phases via the `StepObserver` trait
//!
//! ```
//! use weft::{Cloth, ClothConfig, GridConfig, GridPattern};
//!
//! let mut cloth: Cloth = Cloth::new(ClothConfig {
//!     pattern: GridPattern::Triangle,
//!     grid: GridConfig::new(10, 10, 8.0).with_offset(200.0, 200.0),
//!     ..ClothConfig::default()
//! });
//! let corner = cloth.particles()[99].position;
//! if let Some(h) = cloth.find_nearest(corner, 30.0) {
//!     cloth.tear(h).unwrap();
//! }
//! cloth.tick(10.0, 0.0, false, 0.1, 5);
//! ```

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod handle;
pub mod grid;
pub mod config;
pub mod solver;
pub mod observer;
pub mod cloth;
pub mod interaction;
pub mod persistence;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use particle::Particle;
pub use constraint::DistanceConstraint;
pub use handle::ParticleHandle;
pub use grid::{GridConfig, GridPattern, Topology};
pub use config::{SolverConfig, WorldBounds};
pub use solver::ConstraintSolver;
pub use observer::{StepObserver, NoOpStepObserver};
pub use cloth::{Cloth, ClothConfig};
pub use interaction::PressOutcome;
pub use persistence::{LoadReport, LoadedState};
pub use error::ClothError;
