use crate::links::LinkDiagram;
use crate::types::*;

/// Read-only access to the named objects of the geometry engine.
/// Implemented by `CensusKernel`; the regression suite only ever talks to
/// the engine through this trait.
pub trait ManifoldEngine {
    /// Canonical names of every manifold in the census, in census order.
    fn census(&self) -> Vec<String>;

    /// Look up a manifold by canonical name or alias (e.g. `4_1`).
    fn record(&self, name: &str) -> Result<ManifoldRecord, EngineError>;

    /// Hyperbolic volume of a manifold.
    fn volume(&self, name: &str) -> Result<f64, EngineError> {
        Ok(self.record(name)?.volume)
    }

    /// Chern–Simons invariant, `None` when it is not available for this manifold.
    fn chern_simons(&self, name: &str) -> Result<Option<f64>, EngineError> {
        Ok(self.record(name)?.chern_simons)
    }

    /// Opaque serialized triangulation, suitable for persistence.
    fn to_bytes(&self, name: &str) -> Result<Vec<u8>, EngineError>;

    /// Names of every link diagram in the link table.
    fn links(&self) -> Vec<String>;

    /// Look up a link diagram by name.
    fn link(&self, name: &str) -> Result<LinkDiagram, EngineError>;
}
