use crate::doctest::{DocModule, DocUnit};

const COHOMOLOGY_FRACTAL: &str = r#"
        >>> scene inside_view m004  # doctest: +MODERN_GL
        inside_view m004: 64 pixels
"#;

const GEODESIC: &str = r#"
    Distance between points of the upper half-space.

        >>> distance 0 0 1 0 0 2
        0.69314718
        >>> distance 0 0 1 1 0 1
        0.96242365
"#;

const GEODESICS: &str = r#"
    Along a vertical geodesic distance is the log of the height ratio.

        >>> distance 0 0 1 0 0 10
        2.3025851
"#;

const IDEAL_RAYTRACING_DATA: &str = r#"
        >>> to_ball 0 0 3
        (0, 0, 0.5)
        >>> to_ball 0 0 1
        (0, 0, 0)
"#;

const UPPER_HALFSPACE_UTILITIES: &str = r#"
        >>> to_ball 1 0 1
        (0.4, 0, 0.2)
        >>> distance 0 0 0 0 0 1
        Error: invalid point [0.0, 0.0, 0.0]: height must be positive in the upper half-space
"#;

pub fn raytracing_modules() -> Vec<DocModule> {
    [
        ("cohomology_fractal", COHOMOLOGY_FRACTAL),
        ("geodesic", GEODESIC),
        ("geodesics", GEODESICS),
        ("ideal_raytracing_data", IDEAL_RAYTRACING_DATA),
        ("upper_halfspace_utilities", UPPER_HALFSPACE_UTILITIES),
    ]
    .into_iter()
    .map(|(name, text)| DocModule::new(name, vec![DocUnit::new(name, text)]))
    .collect()
}
