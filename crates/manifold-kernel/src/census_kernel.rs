//! CensusKernel: deterministic engine backed by a fixed census table.
//!
//! Produces the same records, link diagrams and serialized bytes on every
//! platform, so documentation examples written against it are reproducible.

use std::collections::HashMap;

use tracing::debug;

use crate::links::LinkDiagram;
use crate::traits::ManifoldEngine;
use crate::types::*;

/// Leading bytes of every serialized triangulation.
const MAGIC: &[u8; 2] = b"MK";
/// Serialization format version.
const ENCODING_VERSION: u8 = 1;

/// Deterministic census-backed engine.
pub struct CensusKernel {
    manifolds: Vec<ManifoldRecord>,
    aliases: HashMap<String, String>,
    links: Vec<LinkDiagram>,
}

impl CensusKernel {
    pub fn new() -> Self {
        let aliases = [("4_1", "m004"), ("L5a1", "m129")]
            .iter()
            .map(|(a, c)| (a.to_string(), c.to_string()))
            .collect();
        Self {
            manifolds: census_table(),
            aliases,
            links: link_table(),
        }
    }

    fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }
}

impl Default for CensusKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifoldEngine for CensusKernel {
    fn census(&self) -> Vec<String> {
        self.manifolds.iter().map(|m| m.name.clone()).collect()
    }

    fn record(&self, name: &str) -> Result<ManifoldRecord, EngineError> {
        let canonical = self.canonical(name);
        debug!(name, canonical, "census lookup");
        self.manifolds
            .iter()
            .find(|m| m.name == canonical)
            .cloned()
            .ok_or_else(|| EngineError::UnknownManifold {
                name: name.to_string(),
            })
    }

    fn to_bytes(&self, name: &str) -> Result<Vec<u8>, EngineError> {
        let record = self.record(name)?;
        Ok(encode(&record))
    }

    fn links(&self) -> Vec<String> {
        self.links.iter().map(|l| l.name.clone()).collect()
    }

    fn link(&self, name: &str) -> Result<LinkDiagram, EngineError> {
        self.links
            .iter()
            .find(|l| l.name == name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownLink {
                name: name.to_string(),
            })
    }
}

// ── Serialization ───────────────────────────────────────────────────────────

/// Encode a record as `MK`, version, tetrahedra (u16 LE), cusps, name length, name.
fn encode(record: &ManifoldRecord) -> Vec<u8> {
    let name = record.name.as_bytes();
    let mut out = Vec::with_capacity(7 + name.len());
    out.extend_from_slice(MAGIC);
    out.push(ENCODING_VERSION);
    out.extend_from_slice(&record.num_tetrahedra.to_le_bytes());
    out.push(record.num_cusps);
    out.push(name.len().min(u8::MAX as usize) as u8);
    out.extend_from_slice(&name[..name.len().min(u8::MAX as usize)]);
    out
}

/// Decode the header of bytes produced by [`ManifoldEngine::to_bytes`].
pub fn decode_header(bytes: &[u8]) -> Result<EncodedHeader, EngineError> {
    let malformed = |reason: &str| EngineError::MalformedBytes {
        reason: reason.to_string(),
    };
    if bytes.len() < 7 || &bytes[..2] != MAGIC {
        return Err(malformed("missing header"));
    }
    if bytes[2] != ENCODING_VERSION {
        return Err(malformed("unsupported version"));
    }
    let num_tetrahedra = u16::from_le_bytes([bytes[3], bytes[4]]);
    let num_cusps = bytes[5];
    let len = bytes[6] as usize;
    let name_bytes = bytes.get(7..7 + len).ok_or_else(|| malformed("truncated name"))?;
    let name = std::str::from_utf8(name_bytes)
        .map_err(|_| malformed("name is not UTF-8"))?
        .to_string();
    Ok(EncodedHeader {
        name,
        num_tetrahedra,
        num_cusps,
    })
}

// ── Tables ──────────────────────────────────────────────────────────────────

fn census_table() -> Vec<ManifoldRecord> {
    let row = |name: &str,
               tets: u16,
               cusps: u8,
               volume: f64,
               cs: Option<f64>,
               homology: &str,
               field: &str| ManifoldRecord {
        name: name.to_string(),
        num_tetrahedra: tets,
        num_cusps: cusps,
        volume,
        chern_simons: cs,
        homology: homology.to_string(),
        trace_field: field.to_string(),
    };
    vec![
        row("m003", 2, 1, 2.029883212819307, None, "Z/5 + Z", "x^2 - x + 1"),
        row("m004", 2, 1, 2.029883212819307, Some(0.0), "Z", "x^2 - x + 1"),
        row("m125", 4, 2, 3.663862376708876, Some(0.0), "Z + Z", "x^2 + 1"),
        row("m129", 4, 2, 3.663862376708876, None, "Z + Z", "x^2 + 1"),
    ]
}

fn link_table() -> Vec<LinkDiagram> {
    let link = |name: &str, pd: Vec<[u32; 4]>, components: usize, exterior: Option<&str>| {
        LinkDiagram {
            name: name.to_string(),
            pd,
            components,
            exterior: exterior.map(str::to_string),
        }
    };
    vec![
        link("3_1", vec![[1, 5, 2, 4], [3, 1, 4, 6], [5, 3, 6, 2]], 1, None),
        link(
            "4_1",
            vec![[4, 2, 5, 1], [8, 6, 1, 5], [6, 3, 7, 4], [2, 7, 3, 8]],
            1,
            Some("m004"),
        ),
        link("L2a1", vec![[4, 1, 3, 2], [2, 3, 1, 4]], 2, None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_census_order() {
        let k = CensusKernel::new();
        assert_eq!(k.census(), vec!["m003", "m004", "m125", "m129"]);
    }

    #[test]
    fn test_alias_resolves_to_canonical() {
        let k = CensusKernel::new();
        assert_eq!(k.record("4_1").unwrap().name, "m004");
    }

    #[test]
    fn test_unknown_manifold() {
        let k = CensusKernel::new();
        assert!(matches!(
            k.record("m999"),
            Err(EngineError::UnknownManifold { .. })
        ));
    }

    #[test]
    fn test_missing_chern_simons_is_none() {
        let k = CensusKernel::new();
        assert_eq!(k.chern_simons("m003").unwrap(), None);
        assert_eq!(k.chern_simons("m004").unwrap(), Some(0.0));
    }

    #[test]
    fn test_bytes_header_round_trip() {
        let k = CensusKernel::new();
        let bytes = k.to_bytes("m125").unwrap();
        let header = decode_header(&bytes).unwrap();
        assert_eq!(header.name, "m125");
        assert_eq!(header.num_tetrahedra, 4);
        assert_eq!(header.num_cusps, 2);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_header(b"xx").is_err());
        assert!(decode_header(b"MK\x02\x00\x00\x00\x00").is_err());
        assert!(decode_header(b"MK\x01\x02\x00\x01\x09m0").is_err());
    }

    #[test]
    fn test_link_table_is_consistent() {
        let k = CensusKernel::new();
        for name in k.links() {
            let link = k.link(&name).unwrap();
            assert!(
                link.structural_problems().is_empty(),
                "{name}: {:?}",
                link.structural_problems()
            );
        }
    }

    #[test]
    fn test_repr_has_one_filling_per_cusp() {
        let k = CensusKernel::new();
        assert_eq!(k.record("m004").unwrap().repr(), "m004(0,0)");
        assert_eq!(k.record("m125").unwrap().repr(), "m125(0,0)(0,0)");
    }
}
