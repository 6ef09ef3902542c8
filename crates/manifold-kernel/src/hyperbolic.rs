//! Hyperbolic 3-space helpers used by the raytracing and Ptolemy modules.
//!
//! Points of the upper half-space model are `[x, y, t]` with `t > 0`.

use crate::types::EngineError;

fn check_uhs(point: [f64; 3]) -> Result<(), EngineError> {
    if point.iter().any(|c| !c.is_finite()) {
        return Err(EngineError::InvalidPoint {
            point,
            reason: "non-finite coordinate".to_string(),
        });
    }
    if point[2] <= 0.0 {
        return Err(EngineError::InvalidPoint {
            point,
            reason: "height must be positive in the upper half-space".to_string(),
        });
    }
    Ok(())
}

/// Hyperbolic distance between two points of the upper half-space.
///
/// `cosh d = 1 + |p - q|^2 / (2 t_p t_q)`.
pub fn uhs_distance(p: [f64; 3], q: [f64; 3]) -> Result<f64, EngineError> {
    check_uhs(p)?;
    check_uhs(q)?;
    let sq: f64 = p.iter().zip(q.iter()).map(|(a, b)| (a - b) * (a - b)).sum();
    Ok((1.0 + sq / (2.0 * p[2] * q[2])).acosh())
}

/// Map a point of the upper half-space to the Poincaré ball.
///
/// `(0, 0, 1)` goes to the origin and the vertical axis to the z-axis.
pub fn uhs_to_ball(p: [f64; 3]) -> Result<[f64; 3], EngineError> {
    check_uhs(p)?;
    let [x, y, t] = p;
    let norm_sq = x * x + y * y + t * t;
    let denom = x * x + y * y + (t + 1.0) * (t + 1.0);
    Ok([2.0 * x / denom, 2.0 * y / denom, (norm_sq - 1.0) / denom])
}

/// Number of Ptolemy coordinates attached to one tetrahedron for `SL(n)`:
/// the integral points `a0 + a1 + a2 + a3 = n` minus the four vertices.
pub fn ptolemy_coordinates_per_tetrahedron(n: u32) -> Result<u64, EngineError> {
    if n < 2 {
        return Err(EngineError::InvalidArgument {
            reason: format!("Ptolemy varieties need N >= 2, got {n}"),
        });
    }
    let n = u64::from(n);
    Ok((n + 3) * (n + 2) * (n + 1) / 6 - 4)
}

/// Total Ptolemy coordinates of a triangulation before edge identifications.
pub fn ptolemy_coordinate_count(num_tetrahedra: u16, n: u32) -> Result<u64, EngineError> {
    Ok(u64::from(num_tetrahedra) * ptolemy_coordinates_per_tetrahedron(n)?)
}
