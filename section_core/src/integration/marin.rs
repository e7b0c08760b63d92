//! # Marin Integration
//!
//! Closed-form integration of area moments over arbitrary simple polygons,
//! after Marin, J.: *Computing columns, footings and gates through moments
//! of area*, Computers and Structures 18(2), 1984, and the section
//! integrator built on it.
//!
//! `marin_moment` evaluates the polygon area moment of arbitrary
//! polynomial order by a vertex summation; [`MarinIntegrator`] uses those
//! moments to turn per-zone polynomial stress fields into the three
//! stress resultants.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use geo::Coord;
use once_cell::sync::Lazy;

use crate::errors::SectionResult;
use crate::geometry::CompoundGeometry;
use crate::results::{StrainPlane, StressResultant};

use super::partition::{
    neutral_axis_angle, partition_surface, rotate_plane, uniform_surface_zones,
    unrotate_moments, StressZone,
};
use super::SectionIntegrator;

/// Memo table for the Marin binomial coefficient products.
///
/// Entries are pure functions of the key, shared process-wide and never
/// evicted; the key space is bounded by the polynomial orders in use. A
/// racing duplicate insert writes the same value, so the lock only guards
/// the map structure.
static MARIN_COEFF_CACHE: Lazy<Mutex<HashMap<(u32, u32, u32, u32), f64>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Standard binomial coefficient C(n, k) as f64.
fn binomial(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

/// The binomial coefficient product of the Marin vertex summation,
/// `C(j+k, j) * C(m+n-j-k, n-k)`, memoized on `(m, n, j, k)`.
pub fn marin_coeff(m: u32, n: u32, j: u32, k: u32) -> f64 {
    let key = (m, n, j, k);
    {
        let cache = MARIN_COEFF_CACHE
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(&value) = cache.get(&key) {
            return value;
        }
    }
    let value = binomial(j + k, j) * binomial(m + n - j - k, n - k);
    MARIN_COEFF_CACHE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key, value);
    value
}

/// Integrate y^m * z^n over the polygon bounded by `vertices`.
///
/// Vertices form a closed ring; the iteration wraps from the last vertex
/// back to the first, so the closing vertex may but need not be repeated.
/// Counter-clockwise vertex order yields the positive moment, clockwise
/// the negated one; summing a CCW exterior with CW hole rings therefore
/// subtracts the holes automatically.
///
/// Polygons with fewer than 3 vertices (or zero enclosed area) integrate
/// to 0 for all orders.
pub fn marin_moment(vertices: &[Coord<f64>], m: u32, n: u32) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut moment = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let cross = a.x * b.y - b.x * a.y;
        if cross == 0.0 {
            continue;
        }
        let mut sum_j = 0.0;
        for j in 0..=m {
            let mut sum_k = 0.0;
            for k in 0..=n {
                sum_k += marin_coeff(m, n, j, k)
                    * a.y.powi((n - k) as i32)
                    * b.y.powi(k as i32);
            }
            sum_j += sum_k * a.x.powi((m - j) as i32) * b.x.powi(j as i32);
        }
        moment += sum_j * cross;
    }
    moment / (binomial(m + n, n) * ((m + n + 1) * (m + n + 2)) as f64)
}

/// Section integrator based on the Marin algorithm.
///
/// Rotates the section so the neutral axis is horizontal, partitions each
/// material polygon into polynomial stress zones, evaluates the zone
/// moments in closed form and assembles (N, Mx, My), un-rotating the
/// moment pair at the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarinIntegrator;

impl MarinIntegrator {
    /// Create a Marin integrator.
    pub fn new() -> Self {
        MarinIntegrator
    }

    /// Rotate the section and reduce it to a flat list of stress zones.
    ///
    /// Returns the rotation angle along with the zones; a uniform strain
    /// plane short-circuits to unpartitioned whole-polygon zones at angle
    /// zero.
    fn prepare_input(
        &self,
        geometry: &CompoundGeometry,
        plane: &StrainPlane,
    ) -> SectionResult<(f64, Vec<StressZone>)> {
        let mut zones = Vec::new();

        if plane.is_uniform() {
            for surface in &geometry.geometries {
                zones.extend(uniform_surface_zones(surface, plane.eps_a)?);
            }
            for point in &geometry.point_geometries {
                zones.push(StressZone::Point {
                    y: point.y,
                    z: point.z,
                    force: point.material.stress(plane.eps_a) * point.area,
                });
            }
            return Ok((0.0, zones));
        }

        let angle = neutral_axis_angle(plane);
        let rotated = geometry.rotate(-angle);
        let rotated_plane = rotate_plane(plane);

        for surface in &rotated.geometries {
            zones.extend(partition_surface(surface, &rotated_plane)?);
        }
        for point in &rotated.point_geometries {
            let strain = rotated_plane.strain_at_z(point.z);
            zones.push(StressZone::Point {
                y: point.y,
                z: point.z,
                force: point.material.stress(strain) * point.area,
            });
        }
        Ok((angle, zones))
    }

    /// Sum zone contributions and un-rotate the moment pair.
    fn integrate(&self, angle: f64, zones: &[StressZone]) -> StressResultant {
        let mut n = 0.0;
        let mut m_x = 0.0;
        let mut m_y = 0.0;

        for zone in zones {
            match zone {
                StressZone::Surface { ring, coeffs } => {
                    for (k, &coeff) in coeffs.iter().enumerate() {
                        if coeff == 0.0 {
                            continue;
                        }
                        let k = k as u32;
                        n += coeff * marin_moment(ring, 0, k);
                        m_x += coeff * marin_moment(ring, 0, k + 1);
                        m_y += coeff * marin_moment(ring, 1, k);
                    }
                }
                StressZone::Point { y, z, force } => {
                    n += force;
                    m_x += force * z;
                    m_y += force * y;
                }
            }
        }

        // N is rotation invariant; the moments map back to section axes
        let (m_x, m_y) = unrotate_moments(angle, m_x, m_y);
        StressResultant::new(n, m_x, m_y)
    }
}

impl SectionIntegrator for MarinIntegrator {
    fn name(&self) -> &'static str {
        "marin"
    }

    fn integrate_strain_response(
        &self,
        geometry: &CompoundGeometry,
        plane: &StrainPlane,
    ) -> SectionResult<StressResultant> {
        let (angle, zones) = self.prepare_input(geometry, plane)?;
        Ok(self.integrate(angle, &zones))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SurfaceGeometry;
    use crate::materials::{Elastic, ElasticPlastic};

    fn unit_square() -> Vec<Coord<f64>> {
        vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 0.0, y: 1.0 },
        ]
    }

    #[test]
    fn test_unit_square_moments() {
        let square = unit_square();
        assert!((marin_moment(&square, 0, 0) - 1.0).abs() < 1e-12);
        assert!((marin_moment(&square, 1, 0) - 0.5).abs() < 1e-12);
        assert!((marin_moment(&square, 0, 1) - 0.5).abs() < 1e-12);
        // Second moments of the unit square about its corner
        assert!((marin_moment(&square, 2, 0) - 1.0 / 3.0).abs() < 1e-12);
        assert!((marin_moment(&square, 0, 2) - 1.0 / 3.0).abs() < 1e-12);
        assert!((marin_moment(&square, 1, 1) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_closed_ring_equals_open_ring() {
        let open = unit_square();
        let mut closed = unit_square();
        closed.push(closed[0]);
        for (m, n) in [(0, 0), (1, 0), (0, 1), (2, 1), (1, 3)] {
            let a = marin_moment(&open, m, n);
            let b = marin_moment(&closed, m, n);
            assert!((a - b).abs() < 1e-12, "m={m} n={n}");
        }
    }

    #[test]
    fn test_reversed_ring_negates_every_moment() {
        let ring = vec![
            Coord { x: -1.0, y: 2.0 },
            Coord { x: 3.0, y: 1.0 },
            Coord { x: 2.0, y: 4.0 },
            Coord { x: 0.0, y: 5.0 },
        ];
        let mut reversed = ring.clone();
        reversed.reverse();
        for (m, n) in [(0, 0), (1, 0), (0, 1), (2, 0), (0, 2), (1, 1), (2, 3)] {
            let forward = marin_moment(&ring, m, n);
            let backward = marin_moment(&reversed, m, n);
            assert!(
                (forward + backward).abs() < 1e-9,
                "m={m} n={n}: {forward} vs {backward}"
            );
        }
    }

    #[test]
    fn test_hole_subtraction() {
        // 4x4 square with a concentric 2x2 hole: outer CCW, hole CW
        let outer = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 4.0, y: 0.0 },
            Coord { x: 4.0, y: 4.0 },
            Coord { x: 0.0, y: 4.0 },
        ];
        let hole = vec![
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 1.0, y: 3.0 },
            Coord { x: 3.0, y: 3.0 },
            Coord { x: 3.0, y: 1.0 },
        ];
        let area = marin_moment(&outer, 0, 0) + marin_moment(&hole, 0, 0);
        assert!((area - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_polygons() {
        assert_eq!(marin_moment(&[], 0, 0), 0.0);
        assert_eq!(marin_moment(&[Coord { x: 1.0, y: 2.0 }], 0, 0), 0.0);
        assert_eq!(
            marin_moment(
                &[Coord { x: 1.0, y: 2.0 }, Coord { x: 3.0, y: 4.0 }],
                0,
                0
            ),
            0.0
        );
        // Collinear ring encloses nothing
        let line = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 2.0, y: 2.0 },
        ];
        assert!(marin_moment(&line, 0, 0).abs() < 1e-12);
    }

    #[test]
    fn test_marin_coeff_memo_idempotent() {
        let first = marin_coeff(3, 2, 1, 1);
        for _ in 0..10 {
            assert_eq!(marin_coeff(3, 2, 1, 1), first);
        }
        // C(2,1) * C(3,1) = 2 * 3
        assert_eq!(first, 6.0);
        assert_eq!(marin_coeff(0, 0, 0, 0), 1.0);
    }

    #[test]
    fn test_marin_coeff_concurrent() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    let mut values = Vec::new();
                    for m in 0..4u32 {
                        for n in 0..4u32 {
                            for j in 0..=m {
                                for k in 0..=n {
                                    values.push(marin_coeff(m, n, j, k));
                                }
                            }
                        }
                    }
                    values
                })
            })
            .collect();
        let expected = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>();
        for values in &expected[1..] {
            assert_eq!(values, &expected[0]);
        }
    }

    #[test]
    fn test_elastic_rectangle_pure_bending() {
        // 10 x 20 elastic rectangle centered at the origin, bent about y.
        // Mx = integral of E*(-kappa*z)*z dA = -E*kappa*I_yy
        let e = 200_000.0;
        let kappa = 1.0e-5;
        let surface = SurfaceGeometry::from_vertices(
            &[(-5.0, -10.0), (5.0, -10.0), (5.0, 10.0), (-5.0, 10.0)],
            Elastic::new(e).into(),
        )
        .unwrap();
        let section = CompoundGeometry::new(vec![surface]);
        let plane = StrainPlane::new(0.0, kappa, 0.0);

        let result = MarinIntegrator::new()
            .integrate_strain_response(&section, &plane)
            .unwrap();

        let i_yy = 10.0 * 20.0_f64.powi(3) / 12.0;
        assert!(result.n.abs() < 1e-6);
        assert!((result.m_x - (-e * kappa * i_yy)).abs() < 1e-6 * e * kappa * i_yy);
        assert!(result.m_y.abs() < 1e-6);
    }

    #[test]
    fn test_yielded_steel_rectangle_moment() {
        // Fully plastic rectangle: moment approaches fy * Z with
        // Z = b*h^2/4 (plastic section modulus), minus the small elastic
        // core correction. With yield at z = +/- 2 out of h = 200:
        // M = -fy*b*(h^2/4 - c^2/3) for core half-depth c = 2.
        let fy = 400.0;
        let e = 200_000.0;
        let kappa = 1.0e-3;
        let surface = SurfaceGeometry::from_vertices(
            &[(-5.0, -100.0), (5.0, -100.0), (5.0, 100.0), (-5.0, 100.0)],
            ElasticPlastic::new(e, fy).into(),
        )
        .unwrap();
        let section = CompoundGeometry::new(vec![surface]);
        let plane = StrainPlane::new(0.0, kappa, 0.0);

        let result = MarinIntegrator::new()
            .integrate_strain_response(&section, &plane)
            .unwrap();

        let c = fy / e / kappa; // elastic core half-depth = 2
        let expected = -fy * 10.0 * (100.0_f64.powi(2) - c * c / 3.0);
        assert!(result.n.abs() < 1e-6);
        assert!(
            (result.m_x - expected).abs() < 1e-9 * expected.abs(),
            "m_x = {}, expected {}",
            result.m_x,
            expected
        );
    }
}
