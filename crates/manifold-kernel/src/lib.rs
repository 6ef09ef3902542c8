//! Geometry/topology engine collaborator for the regression suite.
//!
//! Exposes named manifolds through the [`ManifoldEngine`] trait, the
//! deterministic [`CensusKernel`] implementation, and the small numeric
//! helpers (real formatting, hyperbolic model maps, link diagrams) the
//! documentation examples exercise.

pub mod census_kernel;
pub mod hyperbolic;
pub mod links;
pub mod number;
pub mod traits;
pub mod types;

pub use census_kernel::CensusKernel;
pub use links::LinkDiagram;
pub use traits::*;
pub use types::*;
