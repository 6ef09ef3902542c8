//! Census database with a swappable identity resolver.
//!
//! `Kernel` answers from the engine's own records. `Enriched` substitutes the
//! richer manifold type that also exposes Ptolemy coordinate data. The
//! substitution is only ever made through [`ManifoldDatabase::with_resolver`],
//! which puts the previous resolver back when the body returns or unwinds.

use std::fmt;

use manifold_kernel::hyperbolic::ptolemy_coordinate_count;
use manifold_kernel::{EngineError, ManifoldEngine, ManifoldRecord};
use tracing::debug;

/// How census lookups turn a name into a manifold object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    Kernel,
    Enriched,
}

impl fmt::Display for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resolver::Kernel => "kernel",
            Resolver::Enriched => "enriched",
        })
    }
}

/// A manifold returned by a census lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct CensusEntry {
    pub record: ManifoldRecord,
    /// Whether the enriched type was substituted.
    pub enriched: bool,
}

impl CensusEntry {
    /// Database entries print one `(0,0)` filling per cusp, like the kernel type.
    pub fn repr(&self) -> String {
        self.record.repr()
    }

    /// Ptolemy coordinate count for `SL(n)`. Only the enriched type has it.
    pub fn ptolemy_coordinates(&self, n: u32) -> Result<u64, EngineError> {
        if !self.enriched {
            return Err(EngineError::InvalidArgument {
                reason: format!(
                    "{} was resolved by the kernel and has no Ptolemy data",
                    self.record.name
                ),
            });
        }
        ptolemy_coordinate_count(self.record.num_tetrahedra, n)
    }
}

/// Census lookups through the active resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifoldDatabase {
    resolver: Resolver,
}

impl Default for ManifoldDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifoldDatabase {
    pub fn new() -> Self {
        Self {
            resolver: Resolver::Kernel,
        }
    }

    pub fn resolver(&self) -> Resolver {
        self.resolver
    }

    pub fn lookup(&self, engine: &dyn ManifoldEngine, name: &str) -> Result<CensusEntry, EngineError> {
        Ok(CensusEntry {
            record: engine.record(name)?,
            enriched: self.resolver == Resolver::Enriched,
        })
    }

    /// Run `f` with `resolver` installed, then restore the previous one.
    pub fn with_resolver<T>(&mut self, resolver: Resolver, f: impl FnOnce(&ManifoldDatabase) -> T) -> T {
        let guard = ResolverGuard::install(self, resolver);
        f(&*guard.db)
    }
}

struct ResolverGuard<'a> {
    db: &'a mut ManifoldDatabase,
    previous: Resolver,
}

impl<'a> ResolverGuard<'a> {
    fn install(db: &'a mut ManifoldDatabase, resolver: Resolver) -> Self {
        let previous = db.resolver;
        db.resolver = resolver;
        debug!(%previous, %resolver, "resolver substituted");
        Self { db, previous }
    }
}

impl Drop for ResolverGuard<'_> {
    fn drop(&mut self) {
        self.db.resolver = self.previous;
        debug!(resolver = %self.previous, "resolver restored");
    }
}
