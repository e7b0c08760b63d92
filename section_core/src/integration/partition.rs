//! # Strain-Plane Rotation and Stress-Zone Partitioning
//!
//! Rotates a section into the frame where the neutral axis is horizontal
//! and cuts each material polygon into stress zones along the strain
//! limits of its constitutive law.
//!
//! In the rotated frame the strain field collapses to a single scalar
//! curvature, `eps(z) = eps_a - kappa * z`, so every strain limit maps to
//! a horizontal line `z = (eps_a - eps) / kappa` and the zone between two
//! limits is the polygon clipped against a horizontal band.

use geo::orient::{Direction, Orient};
use geo::winding_order::{Winding, WindingOrder};
use geo::{BooleanOps, BoundingRect, Coord, Polygon, Rect};

use crate::errors::{SectionError, SectionResult};
use crate::geometry::SurfaceGeometry;
use crate::results::StrainPlane;

/// Strain plane in the rotated frame: one scalar curvature remains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedStrainPlane {
    /// Strain at the origin
    pub eps_a: f64,

    /// Magnitude of the curvature vector
    pub kappa: f64,
}

impl RotatedStrainPlane {
    /// Strain at height z in the rotated frame.
    pub fn strain_at_z(&self, z: f64) -> f64 {
        self.eps_a - self.kappa * z
    }
}

/// Angle of the curvature vector from the y axis.
///
/// Rotating the section by the negated angle makes the neutral axis
/// horizontal. Callers must route uniform strain planes (both curvatures
/// zero) to the single-zone path instead; `atan2(0, 0)` does not describe
/// a neutral axis.
pub fn neutral_axis_angle(plane: &StrainPlane) -> f64 {
    debug_assert!(!plane.is_uniform());
    plane.kappa_z.atan2(plane.kappa_y)
}

/// Collapse a strain plane to its rotated-frame form.
pub fn rotate_plane(plane: &StrainPlane) -> RotatedStrainPlane {
    RotatedStrainPlane {
        eps_a: plane.eps_a,
        kappa: plane.curvature(),
    }
}

/// Map bending moments from the rotated frame back to the original axes.
pub fn unrotate_moments(angle: f64, m_x: f64, m_y: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (cos * m_x + sin * m_y, -sin * m_x + cos * m_y)
}

/// One contribution to the stress resultants, in rotated-frame
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum StressZone {
    /// A polygon ring over which stress is the polynomial
    /// `sum coeffs[k] * z^k`. Hole rings arrive wound clockwise and
    /// subtract their share through the moment sign convention.
    Surface {
        ring: Vec<Coord<f64>>,
        coeffs: Vec<f64>,
    },
    /// A reinforcement bar reduced to a point force.
    Point { y: f64, z: f64, force: f64 },
}

/// Cut one rotated surface into stress zones along its material's strain
/// limits.
pub fn partition_surface(
    surface: &SurfaceGeometry,
    plane: &RotatedStrainPlane,
) -> SectionResult<Vec<StressZone>> {
    let polygon = surface.polygon();
    let bbox = polygon.bounding_rect().ok_or_else(|| {
        SectionError::malformed_geometry("surface polygon has no bounding rectangle")
    })?;
    // Pad so band edges clamped to the bounding rectangle still enclose
    // boundary vertices
    let pad = 1e-3 * (bbox.width() + bbox.height()).max(1.0);

    let mut zones = Vec::new();
    for segment in surface
        .material
        .polynomial_zones(plane.eps_a, plane.kappa)?
    {
        // Strain limits to rotated-frame z; infinite limits clamp to the
        // polygon extent
        let za = (plane.eps_a - segment.eps_low) / plane.kappa;
        let zb = (plane.eps_a - segment.eps_high) / plane.kappa;
        let z0 = za.min(zb).max(bbox.min().y - pad);
        let z1 = za.max(zb).min(bbox.max().y + pad);
        if z1 <= z0 {
            // Zone lies entirely outside the polygon
            continue;
        }

        let band = Rect::new(
            Coord {
                x: bbox.min().x - pad,
                y: z0,
            },
            Coord {
                x: bbox.max().x + pad,
                y: z1,
            },
        )
        .to_polygon();

        for clipped in polygon.intersection(&band) {
            collect_ring_zones(clipped, &segment.coeffs, &mut zones)?;
        }
    }
    Ok(zones)
}

/// Produce the uniform-strain zones of a surface: its own rings with a
/// constant stress coefficient, no partitioning.
pub fn uniform_surface_zones(
    surface: &SurfaceGeometry,
    eps_a: f64,
) -> SectionResult<Vec<StressZone>> {
    let sigma = surface.material.stress(eps_a);
    let mut zones = Vec::new();
    if sigma != 0.0 {
        collect_ring_zones(surface.polygon().clone(), &[sigma], &mut zones)?;
    }
    Ok(zones)
}

/// Split a polygon into per-ring surface zones, enforcing the orientation
/// invariant (exterior CCW, holes CW).
///
/// Zero-area slivers left over from clipping have no winding order and
/// integrate to nothing; they are dropped rather than rejected.
fn collect_ring_zones(
    polygon: Polygon<f64>,
    coeffs: &[f64],
    zones: &mut Vec<StressZone>,
) -> SectionResult<()> {
    let polygon = polygon.orient(Direction::Default);
    match polygon.exterior().winding_order() {
        Some(WindingOrder::CounterClockwise) => {}
        Some(WindingOrder::Clockwise) => {
            return Err(SectionError::malformed_geometry(format!(
                "exterior ring of a stress zone is clockwise ({} vertices)",
                polygon.exterior().0.len()
            )));
        }
        None => return Ok(()),
    }
    zones.push(StressZone::Surface {
        ring: polygon.exterior().0.clone(),
        coeffs: coeffs.to_vec(),
    });
    for hole in polygon.interiors() {
        match hole.winding_order() {
            Some(WindingOrder::Clockwise) => {}
            Some(WindingOrder::CounterClockwise) => {
                return Err(SectionError::malformed_geometry(format!(
                    "hole ring of a stress zone is counter-clockwise ({} vertices)",
                    hole.0.len()
                )));
            }
            None => continue,
        }
        zones.push(StressZone::Surface {
            ring: hole.0.clone(),
            coeffs: coeffs.to_vec(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{Elastic, ElasticPlastic};
    use crate::integration::marin::marin_moment;

    #[test]
    fn test_neutral_axis_angle() {
        let plane = StrainPlane::new(0.0, 1.0e-5, 0.0);
        assert_eq!(neutral_axis_angle(&plane), 0.0);

        let plane = StrainPlane::new(0.0, 0.0, 1.0e-5);
        assert!((neutral_axis_angle(&plane) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let plane = StrainPlane::new(0.0, 1.0e-5, 1.0e-5);
        assert!((neutral_axis_angle(&plane) - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_plane_curvature() {
        let plane = StrainPlane::new(-0.001, 3.0e-5, 4.0e-5);
        let rotated = rotate_plane(&plane);
        assert_eq!(rotated.eps_a, -0.001);
        assert!((rotated.kappa - 5.0e-5).abs() < 1e-18);
        assert!((rotated.strain_at_z(10.0) - (-0.001 - 5.0e-4)).abs() < 1e-12);
    }

    #[test]
    fn test_unrotate_identity_at_zero_angle() {
        let (m_x, m_y) = unrotate_moments(0.0, 10.0, 20.0);
        assert!((m_x - 10.0).abs() < 1e-12);
        assert!((m_y - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_unrotate_quarter_turn() {
        let (m_x, m_y) = unrotate_moments(std::f64::consts::FRAC_PI_2, 10.0, 20.0);
        assert!((m_x - 20.0).abs() < 1e-12);
        assert!((m_y - (-10.0)).abs() < 1e-12);
    }

    #[test]
    fn test_elastic_surface_single_zone() {
        // An unbounded elastic law never splits the polygon
        let surface = SurfaceGeometry::from_vertices(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 20.0), (0.0, 20.0)],
            Elastic::new(200_000.0).into(),
        )
        .unwrap();
        let plane = RotatedStrainPlane {
            eps_a: 0.0,
            kappa: 1.0e-4,
        };
        let zones = partition_surface(&surface, &plane).unwrap();
        assert_eq!(zones.len(), 1);

        // The single zone covers the whole polygon
        match &zones[0] {
            StressZone::Surface { ring, coeffs } => {
                assert!((marin_moment(ring, 0, 0) - 200.0).abs() < 1e-6);
                assert_eq!(coeffs.len(), 2);
            }
            _ => panic!("expected a surface zone"),
        }
    }

    #[test]
    fn test_elastic_plastic_surface_splits_at_yield() {
        // Steel rectangle bent hard enough that both faces yield: three
        // bands (bottom plastic, elastic core, top plastic)
        let law = ElasticPlastic::new(200_000.0, 400.0);
        let surface = SurfaceGeometry::from_vertices(
            &[(0.0, -100.0), (10.0, -100.0), (10.0, 100.0), (0.0, 100.0)],
            law.into(),
        )
        .unwrap();
        // eps_sy = 0.002; with kappa = 1e-4 the yield lines sit at
        // z = -/+ 20, inside the section
        let plane = RotatedStrainPlane {
            eps_a: 0.0,
            kappa: 1.0e-4,
        };
        let zones = partition_surface(&surface, &plane).unwrap();
        assert_eq!(zones.len(), 3);

        // Zone areas: 800 (plastic), 400 (elastic core), 800 (plastic)
        let mut areas: Vec<f64> = zones
            .iter()
            .map(|zone| match zone {
                StressZone::Surface { ring, .. } => marin_moment(ring, 0, 0),
                _ => 0.0,
            })
            .collect();
        areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((areas[0] - 400.0).abs() < 1e-6);
        assert!((areas[1] - 800.0).abs() < 1e-6);
        assert!((areas[2] - 800.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_zone_skips_zero_stress() {
        let surface = SurfaceGeometry::from_vertices(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            Elastic::new(200_000.0).into(),
        )
        .unwrap();
        assert!(uniform_surface_zones(&surface, 0.0).unwrap().is_empty());
        assert_eq!(uniform_surface_zones(&surface, 0.001).unwrap().len(), 1);
    }
}
