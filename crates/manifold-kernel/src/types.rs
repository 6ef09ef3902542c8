use serde::{Deserialize, Serialize};

/// Invariants and bookkeeping for one named manifold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifoldRecord {
    /// Canonical census name, e.g. `m004`.
    pub name: String,
    /// Number of ideal tetrahedra in the census triangulation.
    pub num_tetrahedra: u16,
    /// Number of (unfilled) torus cusps.
    pub num_cusps: u8,
    /// Hyperbolic volume.
    pub volume: f64,
    /// Chern–Simons invariant, absent when the engine cannot compute it.
    pub chern_simons: Option<f64>,
    /// First homology group, e.g. `Z/5 + Z`.
    pub homology: String,
    /// Defining polynomial of the trace field in the variable `x`.
    pub trace_field: String,
}

impl ManifoldRecord {
    /// The kernel-level representation: name followed by one `(0,0)` filling per cusp.
    pub fn repr(&self) -> String {
        let mut out = self.name.clone();
        for _ in 0..self.num_cusps {
            out.push_str("(0,0)");
        }
        out
    }
}

/// Numeric precision an engine object is computed at.
///
/// `High` objects are the `ManifoldHP` variants: the same census data, held to
/// a tighter tolerance in verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precision {
    #[default]
    Double,
    High,
}

impl Precision {
    pub fn name(self) -> &'static str {
        match self {
            Precision::Double => "double",
            Precision::High => "high",
        }
    }

    /// User-facing type name of manifolds at this precision.
    pub fn type_name(self) -> &'static str {
        match self {
            Precision::Double => "Manifold",
            Precision::High => "ManifoldHP",
        }
    }

    /// Relative tolerance when checking a claimed volume.
    pub fn volume_tolerance(self) -> f64 {
        match self {
            Precision::Double => 1e-9,
            Precision::High => 1e-14,
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from engine queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown manifold: {name}")]
    UnknownManifold { name: String },

    #[error("unknown link: {name}")]
    UnknownLink { name: String },

    #[error("invalid point {point:?}: {reason}")]
    InvalidPoint { point: [f64; 3], reason: String },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("malformed triangulation bytes: {reason}")]
    MalformedBytes { reason: String },
}

/// Header decoded from the opaque serialized form of a manifold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHeader {
    pub name: String,
    pub num_tetrahedra: u16,
    pub num_cusps: u8,
}
