//! Scenes for the visual battery and the software SVG backend.
//!
//! A [`Scene`] is a flat list of drawable elements built from a census
//! manifold. Backends turn scenes into documents; the built-in
//! [`SvgBackend`] projects 3D elements isometrically and writes SVG.

use std::fmt;

use manifold_kernel::hyperbolic::uhs_distance;
use manifold_kernel::number::format_real;
use manifold_kernel::{EngineError, ManifoldEngine, ManifoldRecord, Precision};
use nalgebra::{Point3, Rotation3, Vector3};

use crate::errors::RegressError;

/// Pixels per side of the inside-view raster.
pub const INSIDE_VIEW_RESOLUTION: usize = 8;

/// The kinds of scene the visual battery knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    DirichletDomain,
    CuspNeighborhood,
    InsideView,
    Browser,
}

impl SceneKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dirichlet_domain" => Some(SceneKind::DirichletDomain),
            "cusp_neighborhood" => Some(SceneKind::CuspNeighborhood),
            "inside_view" => Some(SceneKind::InsideView),
            "browser" => Some(SceneKind::Browser),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::DirichletDomain => "dirichlet_domain",
            SceneKind::CuspNeighborhood => "cusp_neighborhood",
            SceneKind::InsideView => "inside_view",
            SceneKind::Browser => "browser",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One drawable element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A triangular face with a shade in `[0, 1]`.
    Face { corners: [Point3<f64>; 3], shade: f64 },
    /// A horoball seen as a sphere resting on the boundary plane.
    Horoball { center: Point3<f64>, radius: f64 },
    /// A raster cell.
    Pixel { row: usize, col: usize, shade: f64 },
    /// A line of text.
    Label(String),
}

/// A renderable picture of one manifold.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub kind: SceneKind,
    pub record: ManifoldRecord,
    pub precision: Precision,
    pub elements: Vec<Element>,
}

impl Scene {
    /// Build a scene of `kind` for the manifold `name`.
    ///
    /// `accuracy` controls how reals are printed in text elements.
    pub fn build(
        kind: SceneKind,
        engine: &dyn ManifoldEngine,
        name: &str,
        accuracy: Option<u32>,
    ) -> Result<Self, EngineError> {
        let record = engine.record(name)?;
        let elements = match kind {
            SceneKind::DirichletDomain => dirichlet_faces(&record),
            SceneKind::CuspNeighborhood => horoballs(&record),
            SceneKind::InsideView => inside_view(&record)?,
            SceneKind::Browser => browser_lines(&record, accuracy),
        };
        Ok(Self {
            kind,
            record,
            precision: Precision::Double,
            elements,
        })
    }

    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// One-line description used by the `scene` command.
    pub fn summary(&self) -> String {
        let name = &self.record.name;
        let n = self.elements.len();
        match self.kind {
            SceneKind::DirichletDomain => format!("{} {name}: {n} faces", self.kind),
            SceneKind::CuspNeighborhood => format!(
                "{} {name}: {} cusps, {n} horoballs",
                self.kind, self.record.num_cusps
            ),
            SceneKind::InsideView => format!("{} {name}: {n} pixels", self.kind),
            SceneKind::Browser => format!("{} {name}: {n} lines", self.kind),
        }
    }
}

fn dirichlet_faces(record: &ManifoldRecord) -> Vec<Element> {
    let base = [
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, -1.0, -1.0),
        Vector3::new(-1.0, 1.0, -1.0),
        Vector3::new(-1.0, -1.0, 1.0),
    ];
    let mut faces = Vec::new();
    for t in 0..record.num_tetrahedra {
        let offset = Vector3::new(3.0 * f64::from(t), 0.0, 0.0);
        let v: Vec<Point3<f64>> = base.iter().map(|b| Point3::from(b + offset)).collect();
        for skip in 0..4usize {
            let corners: Vec<Point3<f64>> = (0..4).filter(|k| *k != skip).map(|k| v[k]).collect();
            faces.push(Element::Face {
                corners: [corners[0], corners[1], corners[2]],
                shade: 0.4 + 0.15 * skip as f64,
            });
        }
    }
    faces
}

fn horoballs(record: &ManifoldRecord) -> Vec<Element> {
    let mut balls = Vec::new();
    for cusp in 0..record.num_cusps {
        for t in 0..record.num_tetrahedra {
            let radius = 0.5 / (1.0 + f64::from(t));
            balls.push(Element::Horoball {
                center: Point3::new(2.0 * f64::from(t), 2.0 * f64::from(cusp), radius),
                radius,
            });
        }
    }
    balls
}

fn inside_view(record: &ManifoldRecord) -> Result<Vec<Element>, EngineError> {
    let eye = [0.0, 0.0, 1.0];
    let depth = 1.0 + record.volume / 10.0;
    let half = (INSIDE_VIEW_RESOLUTION as f64 - 1.0) / 2.0;
    let mut pixels = Vec::with_capacity(INSIDE_VIEW_RESOLUTION * INSIDE_VIEW_RESOLUTION);
    for row in 0..INSIDE_VIEW_RESOLUTION {
        for col in 0..INSIDE_VIEW_RESOLUTION {
            let target = [
                (col as f64 - half) / 4.0,
                (row as f64 - half) / 4.0,
                depth,
            ];
            let shade = (-uhs_distance(eye, target)?).exp();
            pixels.push(Element::Pixel { row, col, shade });
        }
    }
    Ok(pixels)
}

fn browser_lines(record: &ManifoldRecord, accuracy: Option<u32>) -> Vec<Element> {
    let cs = record
        .chern_simons
        .map_or_else(|| "None".to_string(), |v| format_real(v, accuracy));
    vec![
        Element::Label(record.repr()),
        Element::Label(format!("volume: {}", format_real(record.volume, accuracy))),
        Element::Label(format!("homology: {}", record.homology)),
        Element::Label(format!("chern-simons: {cs}")),
    ]
}

// ── Backends ────────────────────────────────────────────────────────────────

/// Something that can draw scenes.
pub trait RenderBackend {
    fn name(&self) -> &str;

    /// Whether the backend has the modern OpenGL path the inside view needs.
    fn supports_modern_gl(&self) -> bool;

    /// Render a scene to a document.
    fn render(&self, scene: &Scene) -> Result<String, RegressError>;
}

/// Software backend producing SVG.
#[derive(Debug, Clone, Copy)]
pub struct SvgBackend {
    pub width: f64,
    pub height: f64,
}

impl Default for SvgBackend {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 300.0,
        }
    }
}

/// Isometric projection: rotate about z by 0.8, then about x by 0.6.
fn project(p: &Point3<f64>) -> (f64, f64) {
    let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), 0.6)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), 0.8);
    let r = rotation * p;
    (r.x, -r.z)
}

struct Viewport {
    min_x: f64,
    min_y: f64,
    scale: f64,
    padding: f64,
}

impl Viewport {
    fn fit(points: &[(f64, f64)], width: f64, height: f64) -> Self {
        let padding = 30.0;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
        for (x, y) in points {
            min_x = min_x.min(*x);
            max_x = max_x.max(*x);
            min_y = min_y.min(*y);
            max_y = max_y.max(*y);
        }
        if points.is_empty() {
            (min_x, max_x, min_y, max_y) = (0.0, 1.0, 0.0, 1.0);
        }
        let data_w = (max_x - min_x).max(0.001);
        let data_h = (max_y - min_y).max(0.001);
        let scale = ((width - 2.0 * padding) / data_w).min((height - 2.0 * padding) / data_h);
        Self {
            min_x,
            min_y,
            scale,
            padding,
        }
    }

    fn map(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            (x - self.min_x) * self.scale + self.padding,
            (y - self.min_y) * self.scale + self.padding,
        )
    }
}

fn grey(shade: f64) -> u8 {
    (shade.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl RenderBackend for SvgBackend {
    fn name(&self) -> &str {
        "svg"
    }

    fn supports_modern_gl(&self) -> bool {
        true
    }

    fn render(&self, scene: &Scene) -> Result<String, RegressError> {
        if scene.elements.is_empty() {
            return Err(RegressError::Render {
                reason: format!("{} {} has nothing to draw", scene.kind, scene.record.name),
            });
        }

        let mut anchors = Vec::new();
        for element in &scene.elements {
            match element {
                Element::Face { corners, .. } => anchors.extend(corners.iter().map(project)),
                Element::Horoball { center, radius } => {
                    let (x, y) = project(center);
                    anchors.push((x - radius, y - radius));
                    anchors.push((x + radius, y + radius));
                }
                _ => {}
            }
        }
        let view = Viewport::fit(&anchors, self.width, self.height);
        let cell = (self.width.min(self.height) - 60.0) / INSIDE_VIEW_RESOLUTION as f64;

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n\
             <title>{} {}('{}')</title>\n",
            self.width,
            self.height,
            scene.kind,
            scene.precision.type_name(),
            scene.record.repr()
        );
        let mut line = 0;
        for element in &scene.elements {
            match element {
                Element::Face { corners, shade } => {
                    let pts: Vec<String> = corners
                        .iter()
                        .map(|c| {
                            let (x, y) = view.map(project(c));
                            format!("{x:.1},{y:.1}")
                        })
                        .collect();
                    let g = grey(*shade);
                    svg.push_str(&format!(
                        "  <polygon points=\"{}\" fill=\"rgb({g},{g},{})\" stroke=\"#2a2a4a\"/>\n",
                        pts.join(" "),
                        g.saturating_add(40)
                    ));
                }
                Element::Horoball { center, radius } => {
                    let (x, y) = view.map(project(center));
                    svg.push_str(&format!(
                        "  <circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"{:.1}\" fill=\"none\" stroke=\"#6080c0\"/>\n",
                        radius * view.scale
                    ));
                }
                Element::Pixel { row, col, shade } => {
                    let g = grey(*shade);
                    svg.push_str(&format!(
                        "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{cell:.1}\" height=\"{cell:.1}\" fill=\"rgb({g},{g},{g})\"/>\n",
                        30.0 + *col as f64 * cell,
                        30.0 + *row as f64 * cell
                    ));
                }
                Element::Label(text) => {
                    line += 1;
                    svg.push_str(&format!(
                        "  <text x=\"20\" y=\"{}\" font-family=\"monospace\" font-size=\"13\">{text}</text>\n",
                        20 * line
                    ));
                }
            }
        }
        svg.push_str("</svg>\n");
        Ok(svg)
    }
}
