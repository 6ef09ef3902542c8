//! The command interpreter documentation examples run in.
//!
//! Each line is a command followed by whitespace-separated arguments, or an
//! assignment `NAME = VALUE` that binds a name for the rest of the unit.
//! Bound names are substituted wherever a manifold or link name is expected.

use std::collections::HashMap;

use manifold_kernel::hyperbolic::{ptolemy_coordinate_count, uhs_distance, uhs_to_ball};
use manifold_kernel::number::{format_real, format_tuple};
use manifold_kernel::{EngineError, ManifoldEngine, Precision};

use crate::database::ManifoldDatabase;
use crate::environment::{Environment, FieldBackend};
use crate::render::{RenderBackend, Scene, SceneKind, SvgBackend};

/// Why an example line could not be evaluated. Rendered into the example's
/// output as `Error: <message>`.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("unknown command: {name}")]
    UnknownCommand { name: String },

    #[error("{command} expects {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },

    #[error("not a number: {text}")]
    BadNumber { text: String },

    #[error("unknown scene kind: {name}")]
    UnknownScene { name: String },

    #[error("render failed: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn truth(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

/// Interpreter state for one documentation unit.
pub struct Session<'a> {
    engine: &'a dyn ManifoldEngine,
    database: &'a ManifoldDatabase,
    env: &'a Environment,
    precision: Precision,
    bindings: HashMap<String, String>,
}

impl<'a> Session<'a> {
    pub fn new(engine: &'a dyn ManifoldEngine, database: &'a ManifoldDatabase, env: &'a Environment) -> Self {
        Self {
            engine,
            database,
            env,
            precision: Precision::Double,
            bindings: HashMap::new(),
        }
    }

    /// Create manifolds at `precision` instead of double precision.
    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Evaluate an example's source and return what it prints.
    pub fn eval(&mut self, source: &str) -> Result<String, EvalError> {
        let mut out = Vec::new();
        for line in source.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let printed = self.eval_line(line)?;
            if !printed.is_empty() {
                out.push(printed);
            }
        }
        Ok(out.join("\n"))
    }

    fn resolve<'s>(&'s self, name: &'s str) -> &'s str {
        self.bindings.get(name).map(String::as_str).unwrap_or(name)
    }

    fn eval_line(&mut self, line: &str) -> Result<String, EvalError> {
        if let Some((lhs, rhs)) = line.split_once(" = ") {
            let lhs = lhs.trim();
            if !lhs.is_empty() && lhs.chars().all(|c| c.is_alphanumeric() || c == '_') {
                let value = self.resolve(rhs.trim()).to_string();
                self.bindings.insert(lhs.to_string(), value);
                return Ok(String::new());
            }
        }

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();
        let acc = self.env.accuracy();

        let out = match command {
            "print" => rest.trim().to_string(),
            "accuracy" => acc.map_or_else(|| "None".to_string(), |d| d.to_string()),
            "field" => self.env.field().to_string(),
            "precision" => self.precision.to_string(),
            "number" => format_real(number(arg(command, &args, 0, "a number")?)?, acc),

            "manifold" => self.record(command, &args)?.repr(),
            "type" => {
                self.record(command, &args)?;
                self.precision.type_name().to_string()
            }
            "volume" => format_real(self.record(command, &args)?.volume, acc),
            "chern_simons" => self
                .record(command, &args)?
                .chern_simons
                .map_or_else(|| "None".to_string(), |v| format_real(v, acc)),
            "num_tetrahedra" => self.record(command, &args)?.num_tetrahedra.to_string(),
            "num_cusps" => self.record(command, &args)?.num_cusps.to_string(),
            "homology" => self.record(command, &args)?.homology,
            "trace_field" => {
                let poly = self.record(command, &args)?.trace_field;
                match self.env.field() {
                    FieldBackend::Native => poly,
                    FieldBackend::Algebra => {
                        format!("Number Field in x with defining polynomial {poly}")
                    }
                }
            }

            "census" => self.engine.census().join(", "),
            "census_lookup" => {
                let name = self.resolve(arg(command, &args, 0, "a manifold name")?);
                self.database.lookup(self.engine, name)?.repr()
            }
            "resolver" => self.database.resolver().to_string(),

            "distance" => {
                let p = numbers::<6>(command, &args, "two points x y t")?;
                format_real(uhs_distance([p[0], p[1], p[2]], [p[3], p[4], p[5]])?, acc)
            }
            "to_ball" => {
                let p = numbers::<3>(command, &args, "a point x y t")?;
                format_tuple(&uhs_to_ball(p)?, acc)
            }
            "ptolemy_coordinates" => {
                let record = self.record(command, &args)?;
                let n = arg(command, &args, 1, "a manifold name and N")?;
                let n: u32 = n.parse().map_err(|_| EvalError::BadNumber {
                    text: n.to_string(),
                })?;
                ptolemy_coordinate_count(record.num_tetrahedra, n)?.to_string()
            }

            "crossings" => self.link(command, &args)?.crossing_number().to_string(),
            "components" => self.link(command, &args)?.count_components().to_string(),
            "exterior" => self
                .link(command, &args)?
                .exterior
                .unwrap_or_else(|| "None".to_string()),

            "verify_hyperbolicity" => {
                let record = self.record(command, &args)?;
                truth(record.volume > 0.0 && record.volume.is_finite())
            }
            "verify_volume" => {
                let record = self.record(command, &args)?;
                let claimed = number(arg(command, &args, 1, "a manifold name and a volume")?)?;
                let tolerance = self.precision.volume_tolerance() * record.volume.abs().max(1.0);
                truth((record.volume - claimed).abs() <= tolerance)
            }

            "scene" => self.scene(command, &args)?.summary(),
            "render" => {
                let scene = self.scene(command, &args)?;
                SvgBackend::default()
                    .render(&scene)
                    .map_err(|e| EvalError::Render {
                        reason: e.to_string(),
                    })?;
                format!("svg document, {} elements", scene.elements.len())
            }

            other => {
                return Err(EvalError::UnknownCommand {
                    name: other.to_string(),
                })
            }
        };
        Ok(out)
    }

    fn record(&self, command: &str, args: &[&str]) -> Result<manifold_kernel::ManifoldRecord, EvalError> {
        let name = self.resolve(arg(command, args, 0, "a manifold name")?);
        Ok(self.engine.record(name)?)
    }

    fn link(&self, command: &str, args: &[&str]) -> Result<manifold_kernel::LinkDiagram, EvalError> {
        let name = self.resolve(arg(command, args, 0, "a link name")?);
        Ok(self.engine.link(name)?)
    }

    fn scene(&self, command: &str, args: &[&str]) -> Result<Scene, EvalError> {
        let kind = arg(command, args, 0, "a scene kind and a manifold name")?;
        let kind = SceneKind::from_name(kind).ok_or_else(|| EvalError::UnknownScene {
            name: kind.to_string(),
        })?;
        let name = self.resolve(arg(command, args, 1, "a scene kind and a manifold name")?);
        Ok(Scene::build(kind, self.engine, name, self.env.accuracy())?.with_precision(self.precision))
    }
}

fn arg<'s>(command: &str, args: &[&'s str], index: usize, expected: &'static str) -> Result<&'s str, EvalError> {
    args.get(index).copied().ok_or_else(|| EvalError::MissingArgument {
        command: command.to_string(),
        expected,
    })
}

fn number(text: &str) -> Result<f64, EvalError> {
    text.parse().map_err(|_| EvalError::BadNumber {
        text: text.to_string(),
    })
}

fn numbers<const N: usize>(command: &str, args: &[&str], expected: &'static str) -> Result<[f64; N], EvalError> {
    let mut out = [0.0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = number(arg(command, args, i, expected)?)?;
    }
    Ok(out)
}
