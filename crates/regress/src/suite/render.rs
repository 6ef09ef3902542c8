use crate::doctest::{DocModule, DocUnit};

const SCENES: &str = r#"
    Scenes describe what a window would show.

        >>> scene dirichlet_domain m004
        dirichlet_domain m004: 8 faces
        >>> scene cusp_neighborhood m125
        cusp_neighborhood m125: 2 cusps, 8 horoballs
        >>> scene browser 4_1
        browser m004: 4 lines
"#;

const RENDER: &str = r#"
        >>> render dirichlet_domain m003
        svg document, 8 elements
"#;

/// Documentation of the rendering module, run by the visual battery.
pub fn render_modules() -> Vec<DocModule> {
    vec![DocModule::new(
        "render",
        vec![DocUnit::new("Scene", SCENES), DocUnit::new("SvgBackend.render", RENDER)],
    )]
}
