//! Documentation of the engine-facing modules: numbers, the kernel's
//! manifold and triangulation types, the census database and the top-level
//! package.

use manifold_kernel::Precision;

use crate::doctest::{DocModule, DocUnit};

// ── number ──────────────────────────────────────────────────────────────────

const NUMBER: &str = r#"
    Reals print at the active accuracy; with no accuracy set they print in
    full.

        >>> accuracy
        None
        >>> number 0.1
        0.1
        >>> number 2.5e-3
        0.0025
        >>> number 123456.789
        123456.789
        >>> number 3
        3
"#;

pub fn number_modules() -> Vec<DocModule> {
    vec![DocModule::new("number", vec![DocUnit::new("Number", NUMBER)])]
}

// ── kernel ──────────────────────────────────────────────────────────────────

const MANIFOLD_VOLUME: &str = r#"
    The hyperbolic volume.

        >>> volume m004
        2.0298832
        >>> volume m125
        3.6638624
"#;

const MANIFOLD_CHERN_SIMONS: &str = r#"
    The Chern-Simons invariant, when known.

        >>> chern_simons m004
        0
        >>> chern_simons m003
        None
"#;

const MANIFOLD_IDENTIFY: &str = r#"
        >>> identify m004
        [m004(0,0), 4_1(0,0), K2_1(0,0), K4a1(0,0), otet02_00001(0,0)]
"#;

const MANIFOLD_BROWSE: &str = r#"
        >>> browse m004
"#;

const TRIANGULATION_TESTER: &str = r#"
        >>> triangulation_tester
        All tests passed
"#;

const TRIANGULATION_EXTRA: &str = r#"
    A triangulation of a cusped manifold.

        >>> M = m004
        >>> num_tetrahedra M
        2
        >>> num_cusps M
        1
        >>> manifold M
        m004(0,0)
"#;

const MANIFOLD_EXTRA: &str = r#"
    Manifolds can be named by census name or by knot name.

        >>> M = 4_1
        >>> manifold M
        m004(0,0)
        >>> homology M
        Z
        >>> homology m003
        Z/5 + Z

    Unknown names are reported.

        >>> volume m999
        Error: unknown manifold: m999
"#;

pub fn kernel_modules() -> Vec<DocModule> {
    vec![DocModule::new(
        "kernel",
        vec![
            DocUnit::new("Manifold.volume", MANIFOLD_VOLUME),
            DocUnit::new("Manifold.chern_simons", MANIFOLD_CHERN_SIMONS),
            DocUnit::new("Manifold.identify", MANIFOLD_IDENTIFY),
            DocUnit::new("Manifold.browse", MANIFOLD_BROWSE),
            DocUnit::new("get_triangulation_tester", TRIANGULATION_TESTER),
            DocUnit::new("Triangulation_extra", TRIANGULATION_EXTRA),
            DocUnit::new("Manifold_extra", MANIFOLD_EXTRA),
        ],
    )]
}

// ── kernel_hp ───────────────────────────────────────────────────────────────

const MANIFOLD_HP_EXTRA: &str = r#"
    High precision manifolds carry the same census data under their own type.

        >>> precision
        high
        >>> M = m004
        >>> type M
        ManifoldHP
        >>> volume M
        2.0298832
        >>> verify_volume M 2.029883212819307
        True
        >>> verify_volume M 2.0298832128
        False
"#;

/// The kernel documentation again, evaluated with high precision manifolds.
pub fn kernel_hp_modules() -> Vec<DocModule> {
    kernel_modules()
        .into_iter()
        .map(|mut module| {
            module.name = "kernel_hp".to_string();
            module.units.push(DocUnit::new("ManifoldHP_extra", MANIFOLD_HP_EXTRA));
            module.with_precision(Precision::High)
        })
        .collect()
}

// ── database ────────────────────────────────────────────────────────────────

const CENSUS: &str = r#"
        >>> census
        m003, m004, m125, m129
        >>> census_lookup m129
        m129(0,0)(0,0)
"#;

const CENSUS_RESOLVER: &str = r#"
    Lookups go through the kernel resolver unless a caller substitutes the
    enriched one.

        >>> resolver
        kernel
        >>> census_lookup L5a1
        m129(0,0)(0,0)
"#;

pub fn database_modules() -> Vec<DocModule> {
    vec![DocModule::new(
        "database",
        vec![
            DocUnit::new("ManifoldTable", CENSUS),
            DocUnit::new("ManifoldTable.resolver", CENSUS_RESOLVER),
        ],
    )]
}

// ── snappy ──────────────────────────────────────────────────────────────────

const SNAPPY: &str = r#"
        >>> volume m004
        2.029883212819307
        >>> accuracy  # doctest: +NATIVE
        None
        >>> accuracy  # doctest: +ALGEBRA
        8
        >>> field  # doctest: +NATIVE
        native
        >>> field  # doctest: +ALGEBRA
        algebra
"#;

const SNAPPY_TRACE_FIELD: &str = r#"
    The trace field, converted by the active field backend.

        >>> trace_field m004  # doctest: +NATIVE
        x^2 - x + 1
        >>> trace_field m004  # doctest: +ALGEBRA
        Number Field in x with defining polynomial x^2 - x + 1
"#;

pub fn snappy_modules() -> Vec<DocModule> {
    vec![DocModule::new(
        "snappy",
        vec![
            DocUnit::new("snappy", SNAPPY),
            DocUnit::new("Manifold.trace_field", SNAPPY_TRACE_FIELD),
        ],
    )]
}
